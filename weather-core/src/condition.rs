//! Per-provider condition code tables.
//!
//! Each provider publishes its own integer codes. A table maps them onto the
//! fixed set of [`ConditionGroup`]s so icons and layouts never see a
//! provider-specific code. Supporting another provider means adding another
//! table here.

use crate::{
    error::{Result, WeatherError},
    provider::ProviderId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionGroup {
    Clear,
    Clouds,
    Rain,
    Snow,
    Fog,
    Mist,
    Haze,
    Thunderstorm,
    Tornado,
    Squall,
}

impl ConditionGroup {
    pub const fn all() -> &'static [ConditionGroup] {
        &[
            ConditionGroup::Clear,
            ConditionGroup::Clouds,
            ConditionGroup::Rain,
            ConditionGroup::Snow,
            ConditionGroup::Fog,
            ConditionGroup::Mist,
            ConditionGroup::Haze,
            ConditionGroup::Thunderstorm,
            ConditionGroup::Tornado,
            ConditionGroup::Squall,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionGroup::Clear => "Clear",
            ConditionGroup::Clouds => "Clouds",
            ConditionGroup::Rain => "Rain",
            ConditionGroup::Snow => "Snow",
            ConditionGroup::Fog => "Fog",
            ConditionGroup::Mist => "Mist",
            ConditionGroup::Haze => "Haze",
            ConditionGroup::Thunderstorm => "Thunderstorm",
            ConditionGroup::Tornado => "Tornado",
            ConditionGroup::Squall => "Squall",
        }
    }
}

impl std::fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub code: u16,
    pub group: ConditionGroup,
    pub day: &'static str,
    pub night: &'static str,
}

impl ConditionInfo {
    pub fn description(&self, is_day: bool) -> &'static str {
        if is_day { self.day } else { self.night }
    }
}

/// Condition codes of one provider, sorted by code.
#[derive(Debug)]
pub struct ConditionTable {
    provider: ProviderId,
    entries: &'static [ConditionInfo],
}

impl ConditionTable {
    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn entries(&self) -> &'static [ConditionInfo] {
        self.entries
    }

    pub fn get(&self, code: u16) -> Option<&'static ConditionInfo> {
        self.entries
            .binary_search_by_key(&code, |c| c.code)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn lookup(&self, code: u16) -> Result<&'static ConditionInfo> {
        self.get(code)
            .ok_or(WeatherError::UnknownConditionCode { provider: self.provider, code })
    }
}

const fn same(code: u16, group: ConditionGroup, text: &'static str) -> ConditionInfo {
    ConditionInfo { code, group, day: text, night: text }
}

const fn day_night(
    code: u16,
    group: ConditionGroup,
    day: &'static str,
    night: &'static str,
) -> ConditionInfo {
    ConditionInfo { code, group, day, night }
}

use ConditionGroup::{Clear, Clouds, Fog, Haze, Mist, Rain, Snow, Squall, Thunderstorm, Tornado};

pub static WEATHERAPI_CONDITIONS: ConditionTable =
    ConditionTable { provider: ProviderId::WeatherApi, entries: WEATHERAPI_ENTRIES };

const WEATHERAPI_ENTRIES: &[ConditionInfo] = &[
    day_night(1000, Clear, "Sunny", "Clear"),
    same(1003, Clouds, "Partly cloudy"),
    same(1006, Clouds, "Cloudy"),
    same(1009, Clouds, "Overcast"),
    same(1030, Mist, "Mist"),
    same(1063, Rain, "Patchy rain possible"),
    same(1066, Snow, "Patchy snow possible"),
    same(1069, Snow, "Patchy sleet possible"),
    same(1072, Snow, "Patchy freezing drizzle possible"),
    same(1087, Thunderstorm, "Thundery outbreaks possible"),
    same(1114, Snow, "Blowing snow"),
    same(1117, Snow, "Blizzard"),
    same(1135, Fog, "Fog"),
    same(1147, Fog, "Freezing fog"),
    same(1150, Rain, "Patchy light drizzle"),
    same(1153, Rain, "Light drizzle"),
    same(1168, Rain, "Freezing drizzle"),
    same(1171, Rain, "Heavy freezing drizzle"),
    same(1180, Rain, "Patchy light rain"),
    same(1183, Rain, "Light rain"),
    same(1186, Rain, "Moderate rain at times"),
    same(1189, Rain, "Moderate rain"),
    same(1192, Rain, "Heavy rain at times"),
    same(1195, Rain, "Heavy rain"),
    same(1198, Rain, "Light freezing rain"),
    same(1201, Rain, "Moderate or heavy freezing rain"),
    same(1204, Snow, "Light sleet"),
    same(1207, Snow, "Moderate or heavy sleet"),
    same(1210, Snow, "Patchy light snow"),
    same(1213, Snow, "Light snow"),
    same(1216, Snow, "Patchy moderate snow"),
    same(1219, Snow, "Moderate snow"),
    same(1222, Snow, "Patchy heavy snow"),
    same(1225, Snow, "Heavy snow"),
    same(1237, Snow, "Ice pellets"),
    same(1240, Rain, "Light rain shower"),
    same(1243, Rain, "Moderate or heavy rain shower"),
    same(1246, Rain, "Torrential rain shower"),
    same(1249, Snow, "Light sleet showers"),
    same(1252, Snow, "Moderate or heavy sleet showers"),
    same(1255, Snow, "Light snow showers"),
    same(1258, Snow, "Moderate or heavy snow showers"),
    same(1261, Snow, "Light showers of ice pellets"),
    same(1264, Snow, "Moderate or heavy showers of ice pellets"),
    same(1273, Thunderstorm, "Patchy light rain with thunder"),
    same(1276, Thunderstorm, "Moderate or heavy rain with thunder"),
    same(1279, Thunderstorm, "Patchy light snow with thunder"),
    same(1282, Thunderstorm, "Moderate or heavy snow with thunder"),
];

pub static OPENWEATHER_CONDITIONS: ConditionTable =
    ConditionTable { provider: ProviderId::OpenWeather, entries: OPENWEATHER_ENTRIES };

// 3xx drizzle codes are folded into Rain.
const OPENWEATHER_ENTRIES: &[ConditionInfo] = &[
    same(200, Thunderstorm, "thunderstorm with light rain"),
    same(201, Thunderstorm, "thunderstorm with rain"),
    same(202, Thunderstorm, "thunderstorm with heavy rain"),
    same(210, Thunderstorm, "light thunderstorm"),
    same(211, Thunderstorm, "thunderstorm"),
    same(212, Thunderstorm, "heavy thunderstorm"),
    same(221, Thunderstorm, "ragged thunderstorm"),
    same(230, Thunderstorm, "thunderstorm with light drizzle"),
    same(231, Thunderstorm, "thunderstorm with drizzle"),
    same(232, Thunderstorm, "thunderstorm with heavy drizzle"),
    same(300, Rain, "light intensity drizzle"),
    same(301, Rain, "drizzle"),
    same(302, Rain, "heavy intensity drizzle"),
    same(310, Rain, "light intensity drizzle rain"),
    same(311, Rain, "drizzle rain"),
    same(312, Rain, "heavy intensity drizzle rain"),
    same(313, Rain, "shower rain and drizzle"),
    same(314, Rain, "heavy shower rain and drizzle"),
    same(321, Rain, "shower drizzle"),
    same(500, Rain, "light rain"),
    same(501, Rain, "moderate rain"),
    same(502, Rain, "heavy intensity rain"),
    same(503, Rain, "very heavy rain"),
    same(504, Rain, "extreme rain"),
    same(511, Rain, "freezing rain"),
    same(520, Rain, "light intensity shower rain"),
    same(521, Rain, "shower rain"),
    same(522, Rain, "heavy intensity shower rain"),
    same(531, Rain, "ragged shower rain"),
    same(600, Snow, "light snow"),
    same(601, Snow, "snow"),
    same(602, Snow, "heavy snow"),
    same(611, Snow, "sleet"),
    same(612, Snow, "light shower sleet"),
    same(613, Snow, "shower sleet"),
    same(615, Snow, "light rain and snow"),
    same(616, Snow, "rain and snow"),
    same(620, Snow, "light shower snow"),
    same(621, Snow, "shower snow"),
    same(622, Snow, "heavy shower snow"),
    same(701, Mist, "mist"),
    same(711, Haze, "smoke"),
    same(721, Haze, "haze"),
    same(731, Haze, "sand/dust whirls"),
    same(741, Fog, "fog"),
    same(751, Haze, "sand"),
    same(761, Haze, "dust"),
    same(762, Haze, "volcanic ash"),
    same(771, Squall, "squalls"),
    same(781, Tornado, "tornado"),
    same(800, Clear, "clear sky"),
    same(801, Clouds, "few clouds: 11-25%"),
    same(802, Clouds, "scattered clouds: 25-50%"),
    same(803, Clouds, "broken clouds: 51-84%"),
    same(804, Clouds, "overcast clouds: 85-100%"),
];
