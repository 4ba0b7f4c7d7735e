use chrono::Local;
use weather_core::{AlertRecord, PresentationHint, Severity, WeatherReport};

/// Terminal glyph for an alert style tag.
fn glyph(hint: PresentationHint) -> &'static str {
    match hint {
        PresentationHint::ExtremeHeat => "🌡️",
        PresentationHint::HighTemperature => "☀️",
        PresentationHint::ExtremeCold => "🥶",
        PresentationHint::Freezing | PresentationHint::Snow | PresentationHint::HeavySnow => "❄️",
        PresentationHint::DangerousHeatIndex => "🔥",
        PresentationHint::ExtremeWindChill | PresentationHint::HighWind => "💨",
        PresentationHint::HighHumidity => "💦",
        PresentationHint::LowHumidity => "🏜️",
        PresentationHint::Windy => "🌬️",
        PresentationHint::Thunderstorm => "⛈️",
        PresentationHint::HeavyRain => "🌧️",
        PresentationHint::Fog => "🌫️",
    }
}

pub fn render_report(report: &WeatherReport) -> String {
    let obs = &report.observation;
    let temp_symbol = obs.unit.temperature_symbol();
    let location = if report.country.is_empty() {
        report.location_name.clone()
    } else {
        format!("{}, {}", report.location_name, report.country)
    };

    format!(
        "📍 {location}\n\
         {condition}\n\
         Temperature: {temp:.1}{temp_symbol} (feels like {feels:.1}{temp_symbol})\n\
         Humidity:    {humidity}%\n\
         Wind:        {wind:.1} {wind_symbol}\n\
         Observed:    {observed}\n",
        condition = report.condition_text,
        temp = obs.temperature,
        feels = obs.feels_like_temperature,
        humidity = obs.humidity_percent,
        wind = obs.wind_speed,
        wind_symbol = obs.unit.wind_symbol(),
        observed = report.observation_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    )
}

pub fn render_alerts(alerts: &[AlertRecord]) -> String {
    if alerts.is_empty() {
        return "No weather alerts.\n".to_string();
    }

    let mut out = format!("\n⚠️  Weather Alerts ({})\n", alerts.len());
    for alert in alerts {
        let level = match alert.severity {
            Severity::High => "HIGH",
            Severity::Moderate => "MODERATE",
        };
        out.push_str(&format!(
            "\n{} [{level}] {}\n   {}\n   💡 {}\n",
            glyph(alert.presentation_hint),
            alert.headline,
            alert.description,
            alert.recommendation,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weather_core::{UnitSystem, WeatherObservation, classify};

    fn report() -> WeatherReport {
        WeatherReport {
            location_name: "Reykjavik".to_string(),
            country: "IS".to_string(),
            condition_text: "light snow".to_string(),
            observation_time: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            observation: WeatherObservation {
                temperature: -12.0,
                feels_like_temperature: -21.0,
                humidity_percent: 80,
                wind_speed: 8.0,
                condition_code: 600,
                unit: UnitSystem::Metric,
            },
        }
    }

    #[test]
    fn report_shows_measurements_in_unit() {
        let text = render_report(&report());

        assert!(text.contains("Reykjavik, IS"));
        assert!(text.contains("Temperature: -12.0°C (feels like -21.0°C)"));
        assert!(text.contains("Wind:        8.0 m/s"));
    }

    #[test]
    fn alerts_render_headline_and_recommendation() {
        let alerts = classify(&report().observation);
        let text = render_alerts(&alerts);

        assert!(text.contains("Weather Alerts (3)"));
        assert!(text.contains("🥶 [HIGH] Extreme Cold Warning"));
        assert!(text.contains("💨 [HIGH] Extreme Wind Chill"));
        assert!(text.contains("❄️ [MODERATE] Snow Alert"));
    }

    #[test]
    fn no_alerts_message() {
        assert_eq!(render_alerts(&[]), "No weather alerts.\n");
    }
}
