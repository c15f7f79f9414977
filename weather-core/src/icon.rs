use crate::condition::ConditionGroup;

/// Display icon for a condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    Moon,
    Clouds,
    Rain,
    Fog,
    Mist,
    Haze,
    Snow,
    Thunderstorm,
    Tornado,
    Squall,
}

impl Icon {
    pub const fn all() -> &'static [Icon] {
        &[
            Icon::Sun,
            Icon::Moon,
            Icon::Clouds,
            Icon::Rain,
            Icon::Fog,
            Icon::Mist,
            Icon::Haze,
            Icon::Snow,
            Icon::Thunderstorm,
            Icon::Tornado,
            Icon::Squall,
        ]
    }

    /// Clear skies show the sun by day and the moon by night; every other
    /// group has a single icon.
    pub fn for_condition(group: ConditionGroup, is_day: bool) -> Self {
        match group {
            ConditionGroup::Clear if is_day => Icon::Sun,
            ConditionGroup::Clear => Icon::Moon,
            ConditionGroup::Clouds => Icon::Clouds,
            ConditionGroup::Rain => Icon::Rain,
            ConditionGroup::Snow => Icon::Snow,
            ConditionGroup::Fog => Icon::Fog,
            ConditionGroup::Mist => Icon::Mist,
            ConditionGroup::Haze => Icon::Haze,
            ConditionGroup::Thunderstorm => Icon::Thunderstorm,
            ConditionGroup::Tornado => Icon::Tornado,
            ConditionGroup::Squall => Icon::Squall,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::Moon => "moon",
            Icon::Clouds => "clouds",
            Icon::Rain => "rain",
            Icon::Fog => "fog",
            Icon::Mist => "mist",
            Icon::Haze => "haze",
            Icon::Snow => "snow",
            Icon::Thunderstorm => "thunderstorm",
            Icon::Tornado => "tornado",
            Icon::Squall => "squall",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}",
            Icon::Moon => "\u{263d}",
            Icon::Clouds => "\u{2601}",
            Icon::Rain => "\u{2614}",
            Icon::Fog => "\u{1f32b}",
            Icon::Mist | Icon::Haze => "\u{2591}",
            Icon::Snow => "\u{2744}",
            Icon::Thunderstorm => "\u{26a1}",
            Icon::Tornado => "\u{1f32a}",
            Icon::Squall => "\u{1f32c}",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
