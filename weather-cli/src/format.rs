//! Text layouts for a [`WeatherRecord`].

use colored::{ColoredString, Colorize};
use weather_core::{Icon, WeatherRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Full,
    Short,
    Tiny,
    OneLine,
}

pub fn render(record: &WeatherRecord, layout: Layout) -> Vec<String> {
    match layout {
        Layout::Full => full(record),
        Layout::Short => short(record),
        Layout::Tiny => tiny(record),
        Layout::OneLine => vec![one_line(record)],
    }
}

/// Icon glyph in its terminal color.
pub fn colored_icon(icon: Icon) -> ColoredString {
    let glyph = icon.glyph();
    match icon {
        Icon::Sun | Icon::Haze | Icon::Thunderstorm | Icon::Tornado | Icon::Squall => {
            glyph.yellow().bold()
        }
        Icon::Rain | Icon::Mist => glyph.blue().bold(),
        Icon::Moon | Icon::Clouds | Icon::Fog | Icon::Snow => glyph.white().bold(),
    }
}

fn rule() -> String {
    "-".repeat(40).as_str().cyan().bold().to_string()
}

fn full(r: &WeatherRecord) -> Vec<String> {
    let mut lines = vec![
        rule(),
        format!("{} | {}", r.location_name, r.last_updated).as_str().magenta().to_string(),
        format!("{} {:.1}\u{b0}F", "Temperature:".red().bold(), r.temperature_f),
        format!("{} {}%", "Humidity:".blue(), r.humidity_pct),
        format!("{} {:.0} hPa", "Pressure:".cyan().bold(), r.pressure.hpa),
        format!("          {:.3} inHg", r.pressure.in_hg),
        format!("          {:.3} mmHg", r.pressure.mm_hg),
        format!("{} {} {}", "Weather:".bold(), r.condition.text, colored_icon(r.icon)),
        format!("{} {}%", "Clouds :".bold(), r.cloud_cover_pct),
        format!("{} {:.1}", "UV index:".bold(), r.uv_index),
        format!("{} {} mph {}", "Wind:".green().bold(), r.wind.speed_mph, r.wind.direction)
            .trim_end()
            .to_string(),
    ];

    if let Some(precip) = r.precipitation_in {
        lines.push(format!("{} {precip} in", "Precipitation:".blue()));
    }

    let astro = &r.astronomy;
    lines.push(format!("{} {}", "Sun rise: ".yellow().bold(), astro.sunrise));
    lines.push(format!("{} {}", "Sun set : ".yellow().bold(), astro.sunset));
    if let Some(moonrise) = &astro.moonrise {
        lines.push(format!("{} {moonrise}", "Moon rise:".white().dimmed()));
    }
    if let Some(moonset) = &astro.moonset {
        lines.push(format!("{} {moonset}", "Moon set :".white().dimmed()));
    }
    if let Some(phase) = &astro.moon_phase {
        lines.push(format!("Phase : {phase}").as_str().white().to_string());
    }

    lines.push(rule());
    lines
}

fn short(r: &WeatherRecord) -> Vec<String> {
    vec![
        format!("Temp: {:.1}\u{b0}F", r.temperature_f),
        format!("  rH: {}%", r.humidity_pct),
        format!(" {:.2} inHg", r.pressure.in_hg),
        format!(" {} mph {}", r.wind.speed_mph, r.wind.direction).trim_end().to_string(),
        r.condition.text.clone(),
    ]
}

fn tiny(r: &WeatherRecord) -> Vec<String> {
    vec![
        format!("T:{:.1}\u{b0}F rH:{}%", r.temperature_f, r.humidity_pct),
        format!("P:{:.2}inHg", r.pressure.in_hg),
    ]
}

fn one_line(r: &WeatherRecord) -> String {
    let label = |s: &str| s.cyan().to_string();
    let value = |s: String| s.as_str().yellow().to_string();

    let text = format!(
        "{}{} {} {}{} {}{} {}{}",
        label(&format!("{}: ", r.location_name)),
        value(format!("{:.1}\u{b0}F", r.temperature_f)),
        r.icon.glyph(),
        label("Wind: "),
        value(format!("{} mph {}", r.wind.speed_mph, r.wind.direction)),
        label("Humidity: "),
        value(format!("{}%", r.humidity_pct)),
        label("Pressure: "),
        value(format!("{:.2} inHg / {:.3} mmHg", r.pressure.in_hg, r.pressure.mm_hg)),
    );

    text.as_str().on_blue().bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{Astronomy, Condition, ConditionGroup, Pressure, ProviderId, Wind};

    fn record() -> WeatherRecord {
        WeatherRecord {
            provider: ProviderId::WeatherApi,
            location_name: "Reading".into(),
            latitude: 42.556,
            longitude: -71.109,
            local_time: "2024-06-28 14:05".into(),
            last_updated: "2024-06-28 14:00".into(),
            temperature_f: 50.6,
            pressure: Pressure::from_hpa_and_in_hg(1009.0, 29.8),
            humidity_pct: 52,
            uv_index: 1.0,
            cloud_cover_pct: 75,
            wind: Wind { speed_mph: 4.3, direction: "NW".into() },
            condition: Condition { code: 1009, text: "Overcast".into(), group: ConditionGroup::Clouds },
            precipitation_in: None,
            is_day: true,
            astronomy: Astronomy {
                sunrise: "05:09 AM".into(),
                sunset: "08:25 PM".into(),
                moonrise: None,
                moonset: None,
                moon_phase: None,
            },
            icon: Icon::Clouds,
        }
    }

    #[test]
    fn tiny_is_two_lines() {
        assert_eq!(render(&record(), Layout::Tiny), vec!["T:50.6\u{b0}F rH:52%", "P:29.80inHg"]);
    }

    #[test]
    fn short_layout() {
        assert_eq!(
            render(&record(), Layout::Short),
            vec!["Temp: 50.6\u{b0}F", "  rH: 52%", " 29.80 inHg", " 4.3 mph NW", "Overcast"]
        );
    }

    #[test]
    fn full_skips_absent_optional_lines() {
        let text = render(&record(), Layout::Full).join("\n");
        assert!(text.contains("Sun rise"));
        assert!(!text.contains("Moon rise"));
        assert!(!text.contains("Precipitation"));

        let mut rainy = record();
        rainy.precipitation_in = Some(0.0);
        rainy.astronomy.moon_phase = Some("Full Moon".into());
        let text = render(&rainy, Layout::Full).join("\n");
        assert!(text.contains("Precipitation"));
        assert!(text.contains("Full Moon"));
    }

    #[test]
    fn colored_icon_keeps_glyph() {
        for icon in Icon::all() {
            assert!(colored_icon(*icon).to_string().contains(icon.glyph()));
        }
        let text = render(&record(), Layout::Full).join("\n");
        assert!(text.contains(Icon::Clouds.glyph()));
    }

    #[test]
    fn one_line_mentions_location_and_pressure() {
        let lines = render(&record(), Layout::OneLine);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Reading"));
        assert!(lines[0].contains("29.80 inHg"));
    }
}
