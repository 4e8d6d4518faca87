//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Secrets file handling (the OpenWeather API key)
//! - The query builder for OpenWeather's city name endpoint
//! - The provider abstraction and its OpenWeather implementation
//! - Shared domain models and the error taxonomy
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;

pub use config::{Config, OpenWeatherConfig};
pub use error::WeatherError;
pub use model::{UnitSystem, WeatherRecord, WeatherRequest};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use query::build_weather_query;
