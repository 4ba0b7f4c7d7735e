use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::model::{PartialObservation, UnitSystem, WeatherReport, WeatherRequest};

use super::{FetchError, WeatherSource};

/// Current-weather lookups against the OpenWeather 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, base_url, http })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReport, FetchError> {
        let city = request.city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        info!(city, unit = %request.unit, "requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", request.unit.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(city, status = status.as_u16(), "OpenWeather request failed");
            return Err(status_error(status, city, &body));
        }

        parse_current(&body, request.unit)
    }
}

fn status_error(status: StatusCode, city: &str, body: &str) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        FetchError::NotFound { city: city.to_string() }
    } else {
        FetchError::Api { status: status.as_u16(), body: truncate_body(body) }
    }
}

/// Map an OpenWeather current-weather body, whose values are already in `unit`.
pub fn parse_current(body: &str, unit: UnitSystem) -> Result<WeatherReport, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let condition = parsed.weather.into_iter().next().unwrap_or_default();

    let observation = PartialObservation {
        temperature: parsed.main.temp,
        feels_like_temperature: parsed.main.feels_like,
        humidity_percent: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        condition_code: condition.id,
        unit,
    }
    .resolve();

    let observation_time = parsed.dt.and_then(unix_to_utc).unwrap_or_else(Utc::now);

    Ok(WeatherReport {
        location_name: parsed.name.unwrap_or_else(|| "Unknown".to_string()),
        country: parsed.sys.country.unwrap_or_default(),
        condition_text: condition.description.unwrap_or_else(|| "Unknown".to_string()),
        observation_time,
        observation,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWeather {
    id: Option<u16>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCurrentResponse {
    name: Option<String>,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
