use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    condition::{ConditionTable, OPENWEATHER_CONDITIONS},
    error::{Result, WeatherError},
    model::{Astronomy, Condition, Location, Pressure, WeatherRecord, Wind},
    provider::{RawPayload, cached_or_live, dump_payload, get_json, percent},
    units,
};

use super::{ProviderId, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_FILE: &str = "owm_weather.json";

/// OpenWeatherMap One Call 3.0. Sunrise and sunset arrive inline; there is
/// no lunar data and precipitation is not reported reliably.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    location: Location,
    base_url: String,
    cache_dir: PathBuf,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, location: Location, cache_dir: PathBuf) -> Self {
        Self {
            api_key,
            location,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir,
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn current_path(&self) -> PathBuf {
        self.cache_dir.join(CURRENT_FILE)
    }

    async fn request_onecall(&self) -> Result<serde_json::Value> {
        let url = format!("{}/data/3.0/onecall", self.base_url);
        let lat = self.location.latitude.to_string();
        let lon = self.location.longitude.to_string();

        get_json(
            &self.http,
            ProviderId::OpenWeather,
            &url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
                ("exclude", "minutely,hourly,daily,alerts"),
            ],
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    dt: i64,
    sunrise: i64,
    sunset: i64,
    temp: f64,
    pressure: f64,
    humidity: u8,
    uvi: f64,
    clouds: u8,
    wind_speed: f64,
    #[serde(default)]
    wind_deg: Option<f64>,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    current: OwCurrent,
}

fn local_time(secs: i64) -> Result<String> {
    units::epoch_to_local(secs).ok_or_else(|| {
        WeatherError::schema(ProviderId::OpenWeather, format!("timestamp {secs} out of range"))
    })
}

fn time_of_day(secs: i64) -> Result<String> {
    units::epoch_to_time(secs).ok_or_else(|| {
        WeatherError::schema(ProviderId::OpenWeather, format!("timestamp {secs} out of range"))
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    fn conditions(&self) -> &'static ConditionTable {
        &OPENWEATHER_CONDITIONS
    }

    fn cache_paths(&self) -> Vec<PathBuf> {
        vec![self.current_path()]
    }

    async fn fetch(&self, use_cache: bool, debug: bool) -> Result<RawPayload> {
        let current =
            cached_or_live(&self.current_path(), use_cache, self.request_onecall()).await?;

        if debug {
            dump_payload(self.id(), "onecall", &current);
        }

        Ok(RawPayload { current, astronomy: None })
    }

    fn extract(&self, payload: &RawPayload) -> Result<WeatherRecord> {
        let id = self.id();
        let current = OwOneCallResponse::deserialize(&payload.current)
            .map_err(|e| WeatherError::schema(id, e))?
            .current;

        let weather = current
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::schema(id, "current.weather is empty"))?;

        let is_day = (current.sunrise..current.sunset).contains(&current.dt);
        let group = self.conditions().lookup(weather.id)?.group;
        let icon = self.resolve_icon(weather.id, is_day)?;
        let observed = local_time(current.dt)?;

        Ok(WeatherRecord {
            provider: id,
            location_name: self.location.name.clone(),
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            local_time: observed.clone(),
            last_updated: observed,
            temperature_f: current.temp,
            pressure: Pressure::from_hpa(current.pressure),
            humidity_pct: percent(id, "humidity", current.humidity)?,
            uv_index: current.uvi,
            cloud_cover_pct: percent(id, "clouds", current.clouds)?,
            wind: Wind {
                speed_mph: current.wind_speed,
                direction: current.wind_deg.map(units::deg_to_compass).unwrap_or_default().to_string(),
            },
            condition: Condition { code: weather.id, text: weather.main, group },
            precipitation_in: None,
            is_day,
            astronomy: Astronomy {
                sunrise: time_of_day(current.sunrise)?,
                sunset: time_of_day(current.sunset)?,
                moonrise: None,
                moonset: None,
                moon_phase: None,
            },
            icon,
        })
    }
}
