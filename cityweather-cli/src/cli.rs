use std::path::PathBuf;

use clap::Parser;
use cityweather_core::{
    Config, UnitSystem, WeatherError, WeatherProvider, WeatherRequest, provider_from_config,
};
use tracing::debug;

use crate::display::format_weather_line;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Gets weather and temperature information for a city"
)]
pub struct Cli {
    /// City name; several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub city: Vec<String>,

    /// Display the temperature in imperial units.
    #[arg(short, long)]
    pub imperial: bool,

    /// Secrets file holding the OpenWeather API key.
    #[arg(short, long, env = "WEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Turn on verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn units(&self) -> UnitSystem {
        UnitSystem::from_imperial_flag(self.imperial)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?;
        debug!(source = ?config.source, "configuration loaded");

        let provider = provider_from_config(&config)?;
        let units = self.units();
        let request = WeatherRequest::new(self.city, units);

        let line = show(provider.as_ref(), &request).await?;
        println!("{line}");

        Ok(())
    }
}

/// Fetch the weather for `request` and render the summary line.
pub async fn show(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
) -> Result<String, WeatherError> {
    let record = provider.get_weather(request).await?;
    Ok(format_weather_line(&record, request.units))
}
