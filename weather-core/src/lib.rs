//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Weather observations and unit handling
//! - Severe-weather alert classification
//! - Presentation helpers (display ordering, spoken summaries)
//! - Abstraction over the weather source, with an OpenWeather implementation
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod alert;
pub mod config;
pub mod model;
pub mod present;
pub mod provider;

pub use alert::{AlertCategory, AlertRecord, PresentationHint, Severity, classify};
pub use config::Config;
pub use model::{
    CLEAR_SKY_CODE, PartialObservation, UnitSystem, WeatherObservation, WeatherReport,
    WeatherRequest,
};
pub use provider::{FetchError, WeatherSource, source_from_config};
