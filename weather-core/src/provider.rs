use crate::{
    Config, WeatherReport, WeatherRequest, provider::openweather::OpenWeatherSource,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod openweather;

/// Errors a weather source reports to its caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City name cannot be empty")]
    EmptyCity,

    #[error("City '{city}' not found")]
    NotFound { city: String },

    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current conditions for `request.city`, expressed in `request.unit`.
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReport, FetchError>;
}

/// Construct the weather source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let api_key = config.effective_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let source = OpenWeatherSource::new(
        api_key,
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(Box::new(source))
}
