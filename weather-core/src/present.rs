//! Helpers for consumers that display or speak alerts.

use std::cmp::Reverse;

use crate::{
    alert::{AlertRecord, Severity},
    model::{UnitSystem, WeatherReport},
};

/// Order alerts for display: high severity first, evaluation order kept within a severity.
pub fn sort_for_display(alerts: &mut [AlertRecord]) {
    alerts.sort_by_key(|alert| Reverse(alert.severity));
}

/// Spoken warning listing high-severity headlines, if any.
pub fn high_severity_warning(alerts: &[AlertRecord]) -> Option<String> {
    let headlines: Vec<&str> = alerts
        .iter()
        .filter(|a| a.severity == Severity::High)
        .map(|a| a.headline.as_str())
        .collect();

    if headlines.is_empty() {
        None
    } else {
        Some(format!("Warning: {}", headlines.join(". ")))
    }
}

/// One-paragraph spoken summary of a report, in the report's unit system.
pub fn weather_speech(report: &WeatherReport) -> String {
    let obs = &report.observation;
    let temp_word = match obs.unit {
        UnitSystem::Metric => "degrees Celsius",
        UnitSystem::Imperial => "degrees Fahrenheit",
    };
    let wind_word = match obs.unit {
        UnitSystem::Metric => "meters per second",
        UnitSystem::Imperial => "miles per hour",
    };

    format!(
        "The weather in {} is {}. The temperature is {:.0} {temp_word}, feels like {:.0}. \
         Humidity is {} percent, with wind at {:.1} {wind_word}.",
        report.location_name,
        report.condition_text.to_lowercase(),
        obs.temperature,
        obs.feels_like_temperature,
        obs.humidity_percent,
        obs.wind_speed,
    )
}

/// [`weather_speech`] followed by the high-severity warning, when there is one.
pub fn speech_with_alerts(report: &WeatherReport, alerts: &[AlertRecord]) -> String {
    let mut speech = weather_speech(report);
    if let Some(warning) = high_severity_warning(alerts) {
        speech.push(' ');
        speech.push_str(&warning);
    }
    speech
}
