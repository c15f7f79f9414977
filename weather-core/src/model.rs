use serde::{Deserialize, Serialize};

use crate::{condition::ConditionGroup, icon::Icon, provider::ProviderId, units};

/// The fixed location weather is reported for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Some providers accept a postal code instead of coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Location {
    /// `lat,lon` query form.
    pub fn coordinates(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Barometric pressure, kept in all three units at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pressure {
    pub hpa: f64,
    pub in_hg: f64,
    pub mm_hg: f64,
}

impl Pressure {
    pub fn from_hpa(hpa: f64) -> Self {
        Self::from_hpa_and_in_hg(hpa, units::hpa_to_in_hg(hpa))
    }

    /// For providers reporting both hPa and inHg.
    pub fn from_hpa_and_in_hg(hpa: f64, in_hg: f64) -> Self {
        Self { hpa, in_hg, mm_hg: units::in_hg_to_mm_hg(in_hg) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub speed_mph: f64,
    /// 16-point compass label, empty when the provider gave no bearing.
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub code: u16,
    pub text: String,
    pub group: ConditionGroup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: Option<String>,
    pub moonset: Option<String>,
    pub moon_phase: Option<String>,
}

/// Provider-independent snapshot of current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub provider: ProviderId,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub local_time: String,
    pub last_updated: String,
    pub temperature_f: f64,
    pub pressure: Pressure,
    pub humidity_pct: u8,
    pub uv_index: f64,
    pub cloud_cover_pct: u8,
    pub wind: Wind,
    pub condition: Condition,
    /// Inches. `None` when the provider did not report a value.
    pub precipitation_in: Option<f64>,
    pub is_day: bool,
    pub astronomy: Astronomy,
    pub icon: Icon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_units_agree() {
        let p = Pressure::from_hpa(1013.25);
        assert!((p.in_hg - units::hpa_to_in_hg(1013.25)).abs() < 1e-9);
        assert!((p.mm_hg - units::in_hg_to_mm_hg(p.in_hg)).abs() < 1e-9);
        assert!((p.mm_hg - 760.0).abs() < 0.5);
    }

    #[test]
    fn location_query_uses_coordinates() {
        let loc = Location {
            name: "Reading".into(),
            latitude: 42.556,
            longitude: -71.109,
            postal_code: None,
        };
        assert_eq!(loc.coordinates(), "42.556,-71.109");
    }
}
