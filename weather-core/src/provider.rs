use std::{
    convert::TryFrom,
    fmt::Debug,
    future::Future,
    path::{Path, PathBuf},
    time::SystemTime,
};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    Config,
    cache,
    condition::ConditionTable,
    error::{Result, WeatherError},
    icon::Icon,
    model::WeatherRecord,
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};

pub mod openweather;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" | "owm" => Ok(ProviderId::OpenWeather),
            "weatherapi" | "wapi" => Ok(ProviderId::WeatherApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, weatherapi."
            )),
        }
    }
}

/// Raw upstream JSON, exactly as fetched or cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub current: Value,
    /// Present only for providers serving astronomy from a separate endpoint.
    pub astronomy: Option<Value>,
}

/// One upstream weather service: its wire format, cache artifacts and
/// condition codes.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    fn conditions(&self) -> &'static ConditionTable;

    /// Every cache artifact `fetch` reads or writes.
    fn cache_paths(&self) -> Vec<PathBuf>;

    /// Load the cached artifacts when `use_cache` is set, otherwise query the
    /// provider and overwrite them.
    async fn fetch(&self, use_cache: bool, debug: bool) -> Result<RawPayload>;

    fn extract(&self, payload: &RawPayload) -> Result<WeatherRecord>;

    fn resolve_icon(&self, code: u16, is_day: bool) -> Result<Icon> {
        let info = self.conditions().lookup(code)?;
        Ok(Icon::for_condition(info.group, is_day))
    }
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `weather configure {id}` and enter your API key."
        )
    })?;

    let location = config.location.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No location configured.\n\
                 Hint: run `weather configure {id}` and enter your coordinates."
        )
    })?;

    let cache_dir = config.cache_dir();

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => {
            Box::new(OpenWeatherProvider::new(api_key.to_owned(), location, cache_dir))
        }
        ProviderId::WeatherApi => {
            Box::new(WeatherApiProvider::new(api_key.to_owned(), location, cache_dir))
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

/// Produce the current weather record for `provider`, reusing its cache when
/// `prefer_cache` is set and every artifact is still fresh.
pub async fn load_weather(
    provider: &dyn WeatherProvider,
    prefer_cache: bool,
    debug: bool,
) -> Result<WeatherRecord> {
    let use_cache = cache::may_reuse_all(&provider.cache_paths(), prefer_cache, SystemTime::now());

    let payload = match provider.fetch(use_cache, debug).await {
        Err(WeatherError::CacheMiss { path }) => {
            warn!(path = %path.display(), "cache artifact disappeared, fetching live data");
            provider.fetch(false, debug).await?
        }
        other => other?,
    };

    provider.extract(&payload)
}

/// Read `path` from the cache, or run `live` and persist its result there.
pub(crate) async fn cached_or_live<F>(path: &Path, use_cache: bool, live: F) -> Result<Value>
where
    F: Future<Output = Result<Value>>,
{
    if use_cache {
        debug!(path = %path.display(), "using cached response");
        return cache::read_artifact(path);
    }

    let value = live.await?;
    cache::write_artifact(path, &value)?;
    Ok(value)
}

/// GET `url` and parse the body as JSON.
pub(crate) async fn get_json(
    http: &Client,
    provider: ProviderId,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Value> {
    debug!(%provider, url, query = ?redact(query), "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| WeatherError::upstream(provider, format!("failed to send request: {e}")))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::upstream(provider, format!("failed to read body: {e}")))?;

    if !status.is_success() {
        return Err(WeatherError::upstream(
            provider,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| WeatherError::upstream(provider, format!("response is not JSON: {e}")))
}

/// Reject percentages outside 0..=100.
pub(crate) fn percent(provider: ProviderId, field: &str, value: u8) -> Result<u8> {
    if value > 100 {
        return Err(WeatherError::schema(provider, format!("{field}: {value} is not a percentage")));
    }
    Ok(value)
}

pub(crate) fn dump_payload(provider: ProviderId, kind: &str, value: &Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    info!(%provider, kind, "payload:\n{pretty}");
}

const SECRET_PARAMS: &[&str] = &["key", "appid"];

fn redact<'a>(query: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    query
        .iter()
        .map(|&(k, v)| if SECRET_PARAMS.contains(&k) { (k, "***") } else { (k, v) })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, model::Location};

    fn located_config() -> Config {
        let mut cfg = Config::default();
        cfg.location = Some(Location {
            name: "Reading".into(),
            latitude: 42.556,
            longitude: -71.109,
            postal_code: None,
        });
        cfg
    }

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = located_config();
        let err = provider_from_config(ProviderId::OpenWeather, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn provider_from_config_errors_when_missing_location() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "KEY".to_string());
        let err = provider_from_config(ProviderId::WeatherApi, &cfg).unwrap_err();
        assert!(err.to_string().contains("No location configured"));
    }

    #[test]
    fn default_provider_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = default_provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
        assert!(msg.contains("Hint: run `weather configure"));
    }

    #[test]
    fn default_provider_from_config_builds_matching_variant() {
        let mut cfg = located_config();
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "KEY".to_string());

        let provider = default_provider_from_config(&cfg).expect("provider should build");
        assert_eq!(provider.id(), ProviderId::WeatherApi);
        assert_eq!(provider.cache_paths().len(), 2);
    }

    #[test]
    fn api_keys_are_redacted() {
        let redacted = redact(&[("key", "SECRET"), ("q", "1,2"), ("appid", "SECRET")]);
        assert_eq!(redacted, vec![("key", "***"), ("q", "1,2"), ("appid", "***")]);
    }

    #[test]
    fn percentages_are_bounded() {
        assert_eq!(percent(ProviderId::WeatherApi, "humidity", 100).unwrap(), 100);
        assert_eq!(percent(ProviderId::WeatherApi, "humidity", 0).unwrap(), 0);

        let err = percent(ProviderId::OpenWeather, "clouds", 101).unwrap_err();
        assert!(matches!(err, WeatherError::SchemaMismatch { provider: ProviderId::OpenWeather, .. }));
        assert!(err.to_string().contains("clouds"));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        assert_eq!(truncate_body(&body).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
