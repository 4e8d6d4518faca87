use crate::{Config, WeatherError, WeatherRecord, WeatherRequest};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key()?;
    let base_url = config.base_url()?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned(), base_url)))
}
