//! Pure conversions used when normalizing provider payloads.

use chrono::{DateTime, Local, TimeZone};

const HPA_TO_IN_HG: f64 = 0.02953;
const IN_HG_TO_MM_HG: f64 = 25.4;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn hpa_to_in_hg(hpa: f64) -> f64 {
    hpa * HPA_TO_IN_HG
}

pub fn in_hg_to_mm_hg(in_hg: f64) -> f64 {
    in_hg * IN_HG_TO_MM_HG
}

/// 16-point compass label for a wind bearing in degrees.
pub fn deg_to_compass(degrees: f64) -> &'static str {
    let index = (degrees / 22.5).round().rem_euclid(16.0) as usize;
    COMPASS_POINTS[index % 16]
}

/// `YYYY-mm-dd HH:MM AM` in the process's local timezone.
pub fn epoch_to_local(secs: i64) -> Option<String> {
    epoch_to_local_in(secs, &Local)
}

/// `HH:MM AM` in the process's local timezone.
pub fn epoch_to_time(secs: i64) -> Option<String> {
    epoch_to_time_in(secs, &Local)
}

pub fn epoch_to_local_in<Tz>(secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at(secs, tz).map(|dt| dt.format("%F %I:%M %p").to_string())
}

pub fn epoch_to_time_in<Tz>(secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at(secs, tz).map(|dt| dt.format("%I:%M %p").to_string())
}

fn at<Tz: TimeZone>(secs: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn standard_atmosphere_in_inches() {
        let in_hg = hpa_to_in_hg(1013.25);
        assert!((in_hg - 29.92).abs() < 0.01, "got {in_hg}");
    }

    #[test]
    fn pressure_chain_is_monotonic() {
        let samples = [950.0, 980.5, 1000.0, 1013.25, 1040.0];
        let mm: Vec<f64> = samples.iter().map(|&h| in_hg_to_mm_hg(hpa_to_in_hg(h))).collect();
        assert!(mm.windows(2).all(|w| w[0] < w[1]));
        assert!((in_hg_to_mm_hg(1.0) - 25.4).abs() < f64::EPSILON);
    }

    #[test]
    fn compass_cardinal_points() {
        assert_eq!(deg_to_compass(0.0), "N");
        assert_eq!(deg_to_compass(90.0), "E");
        assert_eq!(deg_to_compass(180.0), "S");
        assert_eq!(deg_to_compass(270.0), "W");
        assert_eq!(deg_to_compass(360.0), "N");
    }

    #[test]
    fn compass_boundary_at_eleven_and_a_quarter() {
        assert_eq!(deg_to_compass(11.0), "N");
        assert_eq!(deg_to_compass(12.0), "NNE");
        assert_eq!(deg_to_compass(348.0), "NNW");
        assert_eq!(deg_to_compass(349.0), "N");
    }

    #[test]
    fn epoch_formats() {
        // 2024-06-28 14:05:00 UTC
        let ts = 1_719_583_500;
        assert_eq!(epoch_to_local_in(ts, &Utc).as_deref(), Some("2024-06-28 02:05 PM"));
        assert_eq!(epoch_to_time_in(ts, &Utc).as_deref(), Some("02:05 PM"));
    }
}
