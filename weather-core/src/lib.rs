//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Adapters normalizing each upstream provider into one [`WeatherRecord`]
//! - The freshness-gated cache of raw provider responses
//! - Unit conversions and per-provider condition tables
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod condition;
pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod units;

pub use condition::{ConditionGroup, ConditionInfo, ConditionTable};
pub use config::{Config, ProviderConfig};
pub use error::{Result, WeatherError};
pub use icon::Icon;
pub use model::{Astronomy, Condition, Location, Pressure, WeatherRecord, Wind};
pub use provider::{ProviderId, RawPayload, WeatherProvider, load_weather};
