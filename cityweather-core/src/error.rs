use std::{io, path::PathBuf};

use thiserror::Error;

/// Every way a weather lookup can fail.
///
/// All of them are terminal: the binary prints the message and exits with
/// [`WeatherError::exit_code`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No city name was supplied.
    #[error("A city name is required.")]
    MissingCity,

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The `[openweather]` section or its `api_key` entry is absent.
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: add `api_key = \"...\"` under `[openweather]` in {location}."
    )]
    MissingApiKey { location: String },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP 401.
    #[error("Access denied. Check your API key.")]
    Unauthorized,

    /// HTTP 404.
    #[error("City not found. Can't find weather data for this city.")]
    CityNotFound,

    /// Any other non-success HTTP status.
    #[error("Something went wrong... ({0})")]
    UnexpectedStatus(u16),

    /// The body was not the JSON document we expected.
    #[error("Couldn't read the server response.")]
    MalformedResponse(#[source] serde_json::Error),

    /// Connection or read failure. The wrapped error carries no URL, so the
    /// API key in the query string never reaches the message.
    #[error("Couldn't reach the weather service: {0}")]
    Transport(#[source] reqwest::Error),
}

impl WeatherError {
    /// Process exit code for this error class. Code 2 covers usage errors: clap's and a
    /// missing city.
    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::MissingCity => 2,
            WeatherError::ConfigRead { .. }
            | WeatherError::ConfigParse { .. }
            | WeatherError::MissingApiKey { .. }
            | WeatherError::InvalidBaseUrl { .. } => 3,
            WeatherError::Unauthorized => 4,
            WeatherError::CityNotFound => 5,
            WeatherError::UnexpectedStatus(_) => 6,
            WeatherError::Transport(_) => 7,
            WeatherError::MalformedResponse(_) => 8,
        }
    }
}
