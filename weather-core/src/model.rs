use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OpenWeather condition id for "clear sky"; used when a source omits the condition.
pub const CLEAR_SKY_CODE: u16 = 800;

const MPS_PER_MPH: f64 = 2.237;

/// Measurement system an observation is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius, meters/second.
    #[default]
    Metric,
    /// Fahrenheit, miles/hour.
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }

    /// Temperature in this system converted to Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Celsius converted to a temperature in this system.
    pub fn celsius_to_unit(self, celsius: f64) -> f64 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Wind speed in this system converted to meters/second.
    pub fn to_mps(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value / MPS_PER_MPH,
        }
    }

    pub fn mps_to_unit(self, mps: f64) -> f64 {
        match self {
            UnitSystem::Metric => mps,
            UnitSystem::Imperial => mps * MPS_PER_MPH,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// A single weather observation, all measurements expressed in `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature: f64,
    pub feels_like_temperature: f64,
    pub humidity_percent: u8,
    /// m/s for metric, mph for imperial.
    pub wind_speed: f64,
    /// OpenWeather condition id (2xx thunderstorm, 5xx rain, 6xx snow, 7xx atmosphere).
    pub condition_code: u16,
    pub unit: UnitSystem,
}

impl WeatherObservation {
    /// The same observation re-expressed in `target` units.
    pub fn in_unit(&self, target: UnitSystem) -> Self {
        if self.unit == target {
            return *self;
        }

        let convert_temp = |v: f64| target.celsius_to_unit(self.unit.to_celsius(v));

        Self {
            temperature: convert_temp(self.temperature),
            feels_like_temperature: convert_temp(self.feels_like_temperature),
            wind_speed: target.mps_to_unit(self.unit.to_mps(self.wind_speed)),
            unit: target,
            ..*self
        }
    }
}

/// Observation as delivered by a best-effort source, with any field possibly missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialObservation {
    pub temperature: Option<f64>,
    pub feels_like_temperature: Option<f64>,
    pub humidity_percent: Option<u8>,
    pub wind_speed: Option<f64>,
    pub condition_code: Option<u16>,
    pub unit: UnitSystem,
}

impl PartialObservation {
    /// Fill gaps: measurements default to zero, the condition to [`CLEAR_SKY_CODE`].
    pub fn resolve(self) -> WeatherObservation {
        WeatherObservation {
            temperature: self.temperature.unwrap_or(0.0),
            feels_like_temperature: self.feels_like_temperature.unwrap_or(0.0),
            humidity_percent: self.humidity_percent.unwrap_or(0),
            wind_speed: self.wind_speed.unwrap_or(0.0),
            condition_code: self.condition_code.unwrap_or(CLEAR_SKY_CODE),
            unit: self.unit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    pub unit: UnitSystem,
}

/// Current conditions for a location, as returned by a weather source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: String,
    pub condition_text: String,
    pub observation_time: DateTime<Utc>,
    pub observation: WeatherObservation,
}
