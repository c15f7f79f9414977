use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderId;

/// Failures surfaced while loading and normalizing weather data.
///
/// Everything except [`WeatherError::CacheMiss`] aborts the invocation.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No cached data at {}", path.display())]
    CacheMiss { path: PathBuf },

    #[error("Cached data at {} is not valid JSON: {source}", path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} request failed: {detail}")]
    Upstream { provider: ProviderId, detail: String },

    #[error(
        "{provider} returned unknown condition code {code}.\n\
         Hint: the condition table for this provider needs updating."
    )]
    UnknownConditionCode { provider: ProviderId, code: u16 },

    #[error("{provider} response does not match the expected schema: {detail}")]
    SchemaMismatch { provider: ProviderId, detail: String },

    #[error("Cache file I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WeatherError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::CacheMiss { .. })
    }

    pub(crate) fn upstream(provider: ProviderId, detail: impl Into<String>) -> Self {
        Self::Upstream { provider, detail: detail.into() }
    }

    pub(crate) fn schema(provider: ProviderId, detail: impl std::fmt::Display) -> Self {
        Self::SchemaMismatch { provider, detail: detail.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cache_miss_is_recoverable() {
        let miss = WeatherError::CacheMiss { path: "/tmp/x.json".into() };
        assert!(!miss.is_fatal());

        let unknown =
            WeatherError::UnknownConditionCode { provider: ProviderId::WeatherApi, code: 9999 };
        assert!(unknown.is_fatal());
        assert!(unknown.to_string().contains("9999"));

        let upstream = WeatherError::upstream(ProviderId::OpenWeather, "status 401");
        assert!(upstream.is_fatal());
        assert!(upstream.to_string().contains("openweather"));
    }

    #[test]
    fn io_message_covers_reads_and_writes() {
        let err = WeatherError::Io {
            path: "/tmp/x.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cache file I/O failed for /tmp/x.json"), "{msg}");
        assert!(err.is_fatal());
    }
}
