use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{model::Location, provider::ProviderId};

/// Environment variable selecting the provider, overriding `default_provider`.
pub const PROVIDER_ENV: &str = "WEATHER_PROVIDER";

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "openweather" or "weatherapi".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// The location weather is reported for.
    pub location: Option<Location>,

    /// Where raw provider responses are cached. Defaults to the system temp dir.
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No default provider configured.\n\
                 Hint: run `weather configure <provider>` (e.g. `weather configure weatherapi`) first."
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Load config from disk (or defaults on first run), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let cfg = Self::load_from_disk()?;
        cfg.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load only the config file, without environment overrides.
    pub fn load_from_disk() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply `WEATHER_PROVIDER` and per-provider `<ID>_KEY` variables looked up
    /// through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup(PROVIDER_ENV).filter(|s| !s.is_empty()) {
            let id = ProviderId::try_from(provider.as_str())
                .with_context(|| format!("Invalid {PROVIDER_ENV}"))?;
            self.set_default_provider(id);
        }

        for id in ProviderId::all() {
            if let Some(key) = lookup(&Self::api_key_env(*id)).filter(|s| !s.is_empty()) {
                self.providers.insert(id.as_str().to_string(), ProviderConfig { api_key: key });
            }
        }

        Ok(self)
    }

    /// e.g. `WEATHERAPI_KEY`, `OPENWEATHER_KEY`.
    pub fn api_key_env(id: ProviderId) -> String {
        format!("{}_KEY", id.as_str().to_uppercase())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn default_provider_id_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_provider_id().unwrap_err();

        assert!(err.to_string().contains("No default provider configured"));
    }

    #[test]
    fn set_api_key_and_default_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::OpenWeather);

        let key = cfg.provider_api_key(ProviderId::OpenWeather);
        assert_eq!(key, Some("OPEN_KEY"));
        assert!(cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WEATHER_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");

        assert_eq!(default, ProviderId::OpenWeather);
        assert!(cfg.is_provider_configured(ProviderId::WeatherApi));
    }

    #[test]
    fn env_overrides_provider_and_keys() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "FILE_KEY".into());

        let cfg = cfg
            .with_overrides(env(&[
                ("WEATHER_PROVIDER", "weatherapi"),
                ("WEATHERAPI_KEY", "ENV_KEY"),
                ("OPENWEATHER_KEY", ""),
            ]))
            .unwrap();

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::WeatherApi);
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("ENV_KEY"));
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("FILE_KEY"));
    }

    #[test]
    fn invalid_env_provider_is_rejected() {
        let err = Config::default().with_overrides(env(&[("WEATHER_PROVIDER", "nope")])).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown provider"));
    }

    #[test]
    fn parses_location_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            default_provider = "openweather"
            cache_dir = "/var/tmp/weather"

            [providers.openweather]
            api_key = "abc"

            [location]
            name = "Reading"
            latitude = 42.556
            longitude = -71.109
            "#,
        )
        .unwrap();

        let location = cfg.location.as_ref().expect("location parsed");
        assert_eq!(location.name, "Reading");
        assert_eq!(location.postal_code, None);
        assert_eq!(cfg.cache_dir(), PathBuf::from("/var/tmp/weather"));
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("abc"));
    }

    #[test]
    fn cache_dir_defaults_to_temp() {
        assert_eq!(Config::default().cache_dir(), std::env::temp_dir());
    }
}
