//! Severe-weather alert classification.
//!
//! [`classify`] maps a [`WeatherObservation`] to the list of alerts it triggers.
//! Thresholds are evaluated on Celsius / meters-per-second values; descriptions
//! always echo the measurement in the observation's own unit.
//!
//! Rules are grouped (temperature, feels-like, humidity, wind, condition). Each
//! group is an ordered table and fires at most once: the first matching rule wins.
//! Groups are evaluated in that fixed order and the output keeps it; display
//! ordering by severity is left to [`crate::present`].

use serde::{Deserialize, Serialize};

use crate::model::{UnitSystem, WeatherObservation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Temperature,
    FeelsLike,
    Humidity,
    Wind,
    Storm,
    Rain,
    Snow,
    Fog,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Temperature => "temperature",
            AlertCategory::FeelsLike => "feels_like",
            AlertCategory::Humidity => "humidity",
            AlertCategory::Wind => "wind",
            AlertCategory::Storm => "storm",
            AlertCategory::Rain => "rain",
            AlertCategory::Snow => "snow",
            AlertCategory::Fog => "fog",
        }
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity. Ordered so that `High > Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque style tag for presenters, one per rule.
///
/// Carries no meaning for classification; a renderer maps it to icons/colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationHint {
    ExtremeHeat,
    HighTemperature,
    ExtremeCold,
    Freezing,
    DangerousHeatIndex,
    ExtremeWindChill,
    HighHumidity,
    LowHumidity,
    HighWind,
    Windy,
    Thunderstorm,
    HeavyRain,
    Snow,
    HeavySnow,
    Fog,
}

impl PresentationHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationHint::ExtremeHeat => "extreme-heat",
            PresentationHint::HighTemperature => "high-temperature",
            PresentationHint::ExtremeCold => "extreme-cold",
            PresentationHint::Freezing => "freezing",
            PresentationHint::DangerousHeatIndex => "dangerous-heat-index",
            PresentationHint::ExtremeWindChill => "extreme-wind-chill",
            PresentationHint::HighHumidity => "high-humidity",
            PresentationHint::LowHumidity => "low-humidity",
            PresentationHint::HighWind => "high-wind",
            PresentationHint::Windy => "windy",
            PresentationHint::Thunderstorm => "thunderstorm",
            PresentationHint::HeavyRain => "heavy-rain",
            PresentationHint::Snow => "snow",
            PresentationHint::HeavySnow => "heavy-snow",
            PresentationHint::Fog => "fog",
        }
    }
}

/// One triggered alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub category: AlertCategory,
    pub severity: Severity,
    pub headline: String,
    /// Triggering measurement, formatted in the observation's unit.
    pub description: String,
    pub recommendation: String,
    pub presentation_hint: PresentationHint,
}

/// Threshold inputs: Celsius and m/s regardless of the observation's unit.
#[derive(Debug, Clone, Copy)]
struct Normalized {
    temp_c: f64,
    feels_like_c: f64,
    humidity: u8,
    wind_mps: f64,
    code: u16,
}

impl From<&WeatherObservation> for Normalized {
    fn from(obs: &WeatherObservation) -> Self {
        Self {
            temp_c: obs.unit.to_celsius(obs.temperature),
            feels_like_c: obs.unit.to_celsius(obs.feels_like_temperature),
            humidity: obs.humidity_percent,
            wind_mps: obs.unit.to_mps(obs.wind_speed),
            code: obs.condition_code,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Describe {
    Temperature,
    FeelsLike,
    Humidity,
    Wind,
    Fixed(&'static str),
}

impl Describe {
    fn render(self, obs: &WeatherObservation) -> String {
        let unit: UnitSystem = obs.unit;
        match self {
            Describe::Temperature => {
                format!("Temperature is {:.1}{}", obs.temperature, unit.temperature_symbol())
            }
            Describe::FeelsLike => {
                format!("Feels like {:.1}{}", obs.feels_like_temperature, unit.temperature_symbol())
            }
            Describe::Humidity => format!("Humidity is {}%", obs.humidity_percent),
            Describe::Wind => format!("Wind speed is {:.1} {}", obs.wind_speed, unit.wind_symbol()),
            Describe::Fixed(text) => text.to_string(),
        }
    }
}

/// Predicate plus record template.
struct Rule {
    matches: fn(&Normalized) -> bool,
    category: AlertCategory,
    severity: Severity,
    hint: PresentationHint,
    headline: &'static str,
    describe: Describe,
    recommendation: &'static str,
}

impl Rule {
    fn record(&self, obs: &WeatherObservation) -> AlertRecord {
        AlertRecord {
            category: self.category,
            severity: self.severity,
            headline: self.headline.to_string(),
            description: self.describe.render(obs),
            recommendation: self.recommendation.to_string(),
            presentation_hint: self.hint,
        }
    }
}

const TEMPERATURE_RULES: &[Rule] = &[
    Rule {
        matches: |n| n.temp_c >= 35.0,
        category: AlertCategory::Temperature,
        severity: Severity::High,
        hint: PresentationHint::ExtremeHeat,
        headline: "Extreme Heat Warning",
        describe: Describe::Temperature,
        recommendation: "Stay hydrated, avoid direct sun, and wear lightweight clothing",
    },
    Rule {
        matches: |n| n.temp_c >= 30.0,
        category: AlertCategory::Temperature,
        severity: Severity::Moderate,
        hint: PresentationHint::HighTemperature,
        headline: "High Temperature",
        describe: Describe::Temperature,
        recommendation: "Wear sunscreen and stay hydrated",
    },
    Rule {
        matches: |n| n.temp_c <= -10.0,
        category: AlertCategory::Temperature,
        severity: Severity::High,
        hint: PresentationHint::ExtremeCold,
        headline: "Extreme Cold Warning",
        describe: Describe::Temperature,
        recommendation: "Wear multiple layers, cover exposed skin, and limit outdoor time",
    },
    Rule {
        matches: |n| n.temp_c <= 0.0,
        category: AlertCategory::Temperature,
        severity: Severity::Moderate,
        hint: PresentationHint::Freezing,
        headline: "Freezing Temperature",
        describe: Describe::Temperature,
        recommendation: "Wear warm clothing and watch for ice on roads",
    },
];

const FEELS_LIKE_RULES: &[Rule] = &[
    Rule {
        matches: |n| n.feels_like_c >= 40.0,
        category: AlertCategory::FeelsLike,
        severity: Severity::High,
        hint: PresentationHint::DangerousHeatIndex,
        headline: "Dangerous Heat Index",
        describe: Describe::FeelsLike,
        recommendation: "Avoid strenuous activity, seek air conditioning, drink plenty of water",
    },
    Rule {
        matches: |n| n.feels_like_c <= -20.0,
        category: AlertCategory::FeelsLike,
        severity: Severity::High,
        hint: PresentationHint::ExtremeWindChill,
        headline: "Extreme Wind Chill",
        describe: Describe::FeelsLike,
        recommendation: "Limit time outdoors, cover all exposed skin, frostbite risk is high",
    },
];

const HUMIDITY_RULES: &[Rule] = &[
    Rule {
        matches: |n| n.humidity >= 90,
        category: AlertCategory::Humidity,
        severity: Severity::Moderate,
        hint: PresentationHint::HighHumidity,
        headline: "Very High Humidity",
        describe: Describe::Humidity,
        recommendation: "Stay hydrated and avoid strenuous activity",
    },
    Rule {
        matches: |n| n.humidity <= 20,
        category: AlertCategory::Humidity,
        severity: Severity::Moderate,
        hint: PresentationHint::LowHumidity,
        headline: "Low Humidity",
        describe: Describe::Humidity,
        recommendation: "Use moisturizer and stay hydrated",
    },
];

const WIND_RULES: &[Rule] = &[
    Rule {
        matches: |n| n.wind_mps >= 20.0,
        category: AlertCategory::Wind,
        severity: Severity::High,
        hint: PresentationHint::HighWind,
        headline: "High Wind Warning",
        describe: Describe::Wind,
        recommendation: "Secure loose objects, avoid outdoor activities",
    },
    Rule {
        matches: |n| n.wind_mps >= 10.0,
        category: AlertCategory::Wind,
        severity: Severity::Moderate,
        hint: PresentationHint::Windy,
        headline: "Windy Conditions",
        describe: Describe::Wind,
        recommendation: "Hold onto hats and lightweight items",
    },
];

// One chain: a thunderstorm code never also reports rain, etc.
const CONDITION_RULES: &[Rule] = &[
    Rule {
        matches: |n| (200..300).contains(&n.code),
        category: AlertCategory::Storm,
        severity: Severity::High,
        hint: PresentationHint::Thunderstorm,
        headline: "Thunderstorm Alert",
        describe: Describe::Fixed("Thunderstorm in the area"),
        recommendation: "Seek indoor shelter, avoid open areas and tall objects",
    },
    // 500 (light) and 501 (moderate) rain do not alert.
    Rule {
        matches: |n| (502..600).contains(&n.code),
        category: AlertCategory::Rain,
        severity: Severity::Moderate,
        hint: PresentationHint::HeavyRain,
        headline: "Heavy Rain",
        describe: Describe::Fixed("Heavy rainfall expected"),
        recommendation: "Bring an umbrella, use caution when driving",
    },
    Rule {
        matches: |n| (600..602).contains(&n.code),
        category: AlertCategory::Snow,
        severity: Severity::Moderate,
        hint: PresentationHint::Snow,
        headline: "Snow Alert",
        describe: Describe::Fixed("Snowfall expected"),
        recommendation: "Allow extra travel time, drive cautiously",
    },
    Rule {
        matches: |n| (602..700).contains(&n.code),
        category: AlertCategory::Snow,
        severity: Severity::High,
        hint: PresentationHint::HeavySnow,
        headline: "Snow Alert",
        describe: Describe::Fixed("Snowfall expected"),
        recommendation: "Allow extra travel time, drive cautiously",
    },
    Rule {
        matches: |n| (700..800).contains(&n.code),
        category: AlertCategory::Fog,
        severity: Severity::Moderate,
        hint: PresentationHint::Fog,
        headline: "Reduced Visibility",
        describe: Describe::Fixed("Fog or mist reducing visibility"),
        recommendation: "Use low beam headlights, drive slowly",
    },
];

const RULE_GROUPS: &[&[Rule]] =
    &[TEMPERATURE_RULES, FEELS_LIKE_RULES, HUMIDITY_RULES, WIND_RULES, CONDITION_RULES];

/// Classify an observation into alerts, in group evaluation order.
///
/// Pure and total: every observation yields a (possibly empty) list.
pub fn classify(observation: &WeatherObservation) -> Vec<AlertRecord> {
    let normalized = Normalized::from(observation);

    let alerts: Vec<AlertRecord> = RULE_GROUPS
        .iter()
        .filter_map(|group| group.iter().find(|rule| (rule.matches)(&normalized)))
        .map(|rule| rule.record(observation))
        .collect();

    tracing::debug!(
        unit = %observation.unit,
        condition_code = observation.condition_code,
        alerts = alerts.len(),
        "classified observation"
    );

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(temp: f64, humidity: u8, wind: f64, code: u16) -> WeatherObservation {
        WeatherObservation {
            temperature: temp,
            feels_like_temperature: temp,
            humidity_percent: humidity,
            wind_speed: wind,
            condition_code: code,
            unit: UnitSystem::Metric,
        }
    }

    fn of(alerts: &[AlertRecord], category: AlertCategory) -> Vec<&AlertRecord> {
        alerts.iter().filter(|a| a.category == category).collect()
    }

    #[test]
    fn temperature_bands() {
        let cases = [
            (35.0, Some((Severity::High, PresentationHint::ExtremeHeat))),
            (34.9, Some((Severity::Moderate, PresentationHint::HighTemperature))),
            (30.0, Some((Severity::Moderate, PresentationHint::HighTemperature))),
            (29.9, None),
            (0.1, None),
            (0.0, Some((Severity::Moderate, PresentationHint::Freezing))),
            (-9.9, Some((Severity::Moderate, PresentationHint::Freezing))),
            (-10.0, Some((Severity::High, PresentationHint::ExtremeCold))),
        ];

        for (temp, expected) in cases {
            let alerts = classify(&metric(temp, 50, 0.0, 800));
            let temps = of(&alerts, AlertCategory::Temperature);
            match expected {
                Some((severity, hint)) => {
                    assert_eq!(temps.len(), 1, "temp {temp}");
                    assert_eq!(temps[0].severity, severity, "temp {temp}");
                    assert_eq!(temps[0].presentation_hint, hint, "temp {temp}");
                }
                None => assert!(temps.is_empty(), "temp {temp}"),
            }
        }
    }

    #[test]
    fn feels_like_fires_independently_of_temperature() {
        let obs = WeatherObservation { feels_like_temperature: 41.0, ..metric(25.0, 50, 0.0, 800) };
        let alerts = classify(&obs);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, AlertCategory::FeelsLike);
        assert_eq!(alerts[0].headline, "Dangerous Heat Index");
        assert_eq!(alerts[0].description, "Feels like 41.0°C");

        let obs = WeatherObservation { feels_like_temperature: -20.0, ..metric(5.0, 50, 0.0, 800) };
        let alerts = classify(&obs);
        assert_eq!(alerts[0].presentation_hint, PresentationHint::ExtremeWindChill);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn humidity_bands() {
        assert_eq!(classify(&metric(20.0, 90, 0.0, 800))[0].headline, "Very High Humidity");
        assert_eq!(classify(&metric(20.0, 20, 0.0, 800))[0].headline, "Low Humidity");
        assert!(classify(&metric(20.0, 89, 0.0, 800)).is_empty());
        assert!(classify(&metric(20.0, 21, 0.0, 800)).is_empty());
        assert_eq!(classify(&metric(20.0, 95, 0.0, 800))[0].description, "Humidity is 95%");
    }

    #[test]
    fn wind_bands() {
        let high = classify(&metric(20.0, 50, 20.0, 800));
        assert_eq!(high[0].severity, Severity::High);
        assert_eq!(high[0].description, "Wind speed is 20.0 m/s");

        let moderate = classify(&metric(20.0, 50, 10.0, 800));
        assert_eq!(moderate[0].severity, Severity::Moderate);
        assert_eq!(moderate[0].presentation_hint, PresentationHint::Windy);

        assert!(classify(&metric(20.0, 50, 9.99, 800)).is_empty());
    }

    #[test]
    fn condition_chain() {
        let category_of = |code| {
            classify(&metric(20.0, 50, 0.0, code)).first().map(|a| (a.category, a.severity))
        };

        assert_eq!(category_of(200), Some((AlertCategory::Storm, Severity::High)));
        assert_eq!(category_of(299), Some((AlertCategory::Storm, Severity::High)));
        assert_eq!(category_of(300), None);
        assert_eq!(category_of(500), None);
        assert_eq!(category_of(501), None);
        assert_eq!(category_of(502), Some((AlertCategory::Rain, Severity::Moderate)));
        assert_eq!(category_of(520), Some((AlertCategory::Rain, Severity::Moderate)));
        assert_eq!(category_of(600), Some((AlertCategory::Snow, Severity::Moderate)));
        assert_eq!(category_of(601), Some((AlertCategory::Snow, Severity::Moderate)));
        assert_eq!(category_of(602), Some((AlertCategory::Snow, Severity::High)));
        assert_eq!(category_of(622), Some((AlertCategory::Snow, Severity::High)));
        assert_eq!(category_of(741), Some((AlertCategory::Fog, Severity::Moderate)));
        assert_eq!(category_of(800), None);
        assert_eq!(category_of(804), None);
    }

    #[test]
    fn imperial_descriptions_use_input_unit() {
        let obs = WeatherObservation {
            temperature: 95.0,
            feels_like_temperature: 104.0,
            humidity_percent: 50,
            wind_speed: 44.74,
            condition_code: 800,
            unit: UnitSystem::Imperial,
        };
        let alerts = classify(&obs);

        let descriptions: Vec<&str> = alerts.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(
            descriptions,
            ["Temperature is 95.0°F", "Feels like 104.0°F", "Wind speed is 44.7 mph"]
        );
    }

    #[test]
    fn presentation_hint_tags_are_stable() {
        assert_eq!(PresentationHint::HeavySnow.as_str(), "heavy-snow");
        let json = serde_json::to_string(&PresentationHint::DangerousHeatIndex).unwrap();
        assert_eq!(json, "\"dangerous-heat-index\"");
        assert_eq!(serde_json::to_string(&AlertCategory::FeelsLike).unwrap(), "\"feels_like\"");
    }
}
