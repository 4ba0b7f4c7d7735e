use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::info;
use weather_core::{
    Config, PartialObservation, UnitSystem, WeatherRequest, classify,
    present::{sort_for_display, speech_with_alerts},
    source_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookups with severe-weather alerts")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and default units.
    Configure,

    /// Show current weather and alerts for a city.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,

        /// Unit system; defaults to the configured one.
        #[arg(long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        /// Print the report and alerts as JSON.
        #[arg(long)]
        json: bool,

        /// Do not show alerts.
        #[arg(long)]
        no_alerts: bool,

        /// Print the spoken summary instead of the report.
        #[arg(long, conflicts_with = "json")]
        speech: bool,
    },

    /// Classify a hand-entered observation without any network access.
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub temp: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub feels_like: Option<f64>,

    #[arg(long)]
    pub humidity: Option<u8>,

    #[arg(long)]
    pub wind: Option<f64>,

    /// OpenWeather condition id; omitted means clear sky (800).
    #[arg(long)]
    pub code: Option<u16>,

    #[arg(long, value_parser = parse_units, default_value = "metric")]
    pub units: UnitSystem,

    #[arg(long)]
    pub json: bool,
}

impl ClassifyArgs {
    fn observation(&self) -> PartialObservation {
        PartialObservation {
            temperature: self.temp,
            feels_like_temperature: self.feels_like,
            humidity_percent: self.humidity,
            wind_speed: self.wind,
            condition_code: self.code,
            unit: self.units,
        }
    }
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, json, no_alerts, speech } => {
                show(city, units, json, no_alerts, speech).await
            }
            Command::Classify(args) => classify_offline(&args),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Default units:", UnitSystem::all().to_vec())
        .with_starting_cursor(if config.units == UnitSystem::Imperial { 1 } else { 0 })
        .prompt()
        .context("Failed to read unit system")?;

    config.set_api_key(api_key.trim().to_string());
    config.units = units;
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: String,
    units: Option<UnitSystem>,
    json: bool,
    no_alerts: bool,
    speech: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;
    let request = WeatherRequest { city, unit: units.unwrap_or(config.units) };

    let report = source.current(&request).await?;

    let mut alerts = if no_alerts { Vec::new() } else { classify(&report.observation) };
    info!(location = %report.location_name, alerts = alerts.len(), "weather fetched");

    if speech {
        println!("{}", speech_with_alerts(&report, &alerts));
        return Ok(());
    }

    sort_for_display(&mut alerts);

    if json {
        let value = serde_json::json!({ "report": report, "alerts": alerts });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", output::render_report(&report));
        print!("{}", output::render_alerts(&alerts));
    }

    Ok(())
}

fn classify_offline(args: &ClassifyArgs) -> anyhow::Result<()> {
    let observation = args.observation().resolve();
    let mut alerts = classify(&observation);
    sort_for_display(&mut alerts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
    } else {
        print!("{}", output::render_alerts(&alerts));
    }

    Ok(())
}
