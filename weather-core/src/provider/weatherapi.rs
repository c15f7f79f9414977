use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    condition::{ConditionTable, WEATHERAPI_CONDITIONS},
    error::{Result, WeatherError},
    model::{Astronomy, Condition, Location, Pressure, WeatherRecord, Wind},
    provider::{RawPayload, cached_or_live, dump_payload, get_json, percent},
};

use super::{ProviderId, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";
const CURRENT_FILE: &str = "wapi_weather.json";
const ASTRO_FILE: &str = "wapi_astro.json";

/// WeatherAPI.com: current conditions and astronomy come from two endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    location: Location,
    base_url: String,
    cache_dir: PathBuf,
    http: Client,
}

impl WeatherApiProvider {
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

    fn astro_path(&self) -> PathBuf {
        self.cache_dir.join(ASTRO_FILE)
    }

    async fn request_current(&self) -> Result<serde_json::Value> {
        let url = format!("{}/v1/current.json", self.base_url);
        let q = self.location.coordinates();

        get_json(
            &self.http,
            ProviderId::WeatherApi,
            &url,
            &[("key", self.api_key.as_str()), ("q", q.as_str()), ("aqi", "yes")],
        )
        .await
    }

    async fn request_astronomy(&self) -> Result<serde_json::Value> {
        let url = format!("{}/v1/astronomy.json", self.base_url);
        let q = match &self.location.postal_code {
            Some(zip) => zip.clone(),
            None => self.location.coordinates(),
        };

        get_json(
            &self.http,
            ProviderId::WeatherApi,
            &url,
            &[("key", self.api_key.as_str()), ("q", q.as_str())],
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: u16,
}

/// `precip_in` is usually a number but may be the string "no".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WaPrecip {
    Amount(f64),
    Marker(String),
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    last_updated: String,
    temp_f: f64,
    pressure_in: f64,
    pressure_mb: f64,
    humidity: u8,
    uv: f64,
    cloud: u8,
    wind_mph: f64,
    wind_dir: String,
    condition: WaCondition,
    #[serde(default)]
    precip_in: Option<WaPrecip>,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
    moonrise: Option<String>,
    moonset: Option<String>,
    moon_phase: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaAstronomy {
    astro: WaAstro,
}

#[derive(Debug, Deserialize)]
struct WaAstronomyResponse {
    astronomy: WaAstronomy,
}

fn precipitation(raw: Option<WaPrecip>) -> Result<Option<f64>> {
    match raw {
        None => Ok(None),
        Some(WaPrecip::Amount(inches)) => Ok(Some(inches)),
        Some(WaPrecip::Marker(s)) if s.trim().eq_ignore_ascii_case("no") => Ok(None),
        Some(WaPrecip::Marker(s)) => s.trim().parse().map(Some).map_err(|_| {
            WeatherError::schema(ProviderId::WeatherApi, format!("precip_in: unexpected value {s:?}"))
        }),
    }
}

/// WeatherAPI reports missing moon events as e.g. "No moonrise".
fn moon_event(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty() && !s.starts_with("No "))
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    fn conditions(&self) -> &'static ConditionTable {
        &WEATHERAPI_CONDITIONS
    }

    fn cache_paths(&self) -> Vec<PathBuf> {
        vec![self.current_path(), self.astro_path()]
    }

    async fn fetch(&self, use_cache: bool, debug: bool) -> Result<RawPayload> {
        let current =
            cached_or_live(&self.current_path(), use_cache, self.request_current()).await?;
        let astronomy =
            cached_or_live(&self.astro_path(), use_cache, self.request_astronomy()).await?;

        if debug {
            dump_payload(self.id(), "current", &current);
            dump_payload(self.id(), "astronomy", &astronomy);
        }

        Ok(RawPayload { current, astronomy: Some(astronomy) })
    }

    fn extract(&self, payload: &RawPayload) -> Result<WeatherRecord> {
        let id = self.id();
        let parsed =
            WaResponse::deserialize(&payload.current).map_err(|e| WeatherError::schema(id, e))?;

        let astro_json = payload
            .astronomy
            .as_ref()
            .ok_or_else(|| WeatherError::schema(id, "astronomy payload is missing"))?;
        let astro = WaAstronomyResponse::deserialize(astro_json)
            .map_err(|e| WeatherError::schema(id, e))?
            .astronomy
            .astro;

        let current = parsed.current;
        let is_day = current.is_day != 0;
        let code = current.condition.code;
        let group = self.conditions().lookup(code)?.group;
        let icon = self.resolve_icon(code, is_day)?;

        Ok(WeatherRecord {
            provider: id,
            location_name: parsed.location.name,
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            local_time: parsed.location.localtime,
            last_updated: current.last_updated,
            temperature_f: current.temp_f,
            pressure: Pressure::from_hpa_and_in_hg(current.pressure_mb, current.pressure_in),
            humidity_pct: percent(id, "humidity", current.humidity)?,
            uv_index: current.uv,
            cloud_cover_pct: percent(id, "cloud", current.cloud)?,
            wind: Wind { speed_mph: current.wind_mph, direction: current.wind_dir },
            condition: Condition { code, text: current.condition.text, group },
            precipitation_in: precipitation(current.precip_in)?,
            is_day,
            astronomy: Astronomy {
                sunrise: astro.sunrise,
                sunset: astro.sunset,
                moonrise: moon_event(astro.moonrise),
                moonset: moon_event(astro.moonset),
                moon_phase: astro.moon_phase.filter(|s| !s.is_empty()),
            },
            icon,
        })
    }
}
