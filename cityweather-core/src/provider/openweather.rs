use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{WeatherRecord, WeatherRequest},
    query::build_weather_query,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: Url) -> Self {
        Self::with_client(api_key, base_url, Client::new())
    }

    pub fn with_client(api_key: String, base_url: Url, http: Client) -> Self {
        Self { api_key, base_url, http }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, WeatherError> {
        let url = build_weather_query(&self.base_url, &request.city, request.units, &self.api_key)?;

        debug!(city = %request.city_name(), units = %request.units, "requesting current weather");
        get_weather_data(&self.http, url).await
    }
}

/// GET `query_url` and decode the current-conditions body.
pub async fn get_weather_data(http: &Client, query_url: Url) -> Result<WeatherRecord, WeatherError> {
    let res = http.get(query_url).send().await.map_err(transport_error)?;

    let status = res.status();
    let body = res.text().await.map_err(transport_error)?;
    debug!(%status, bytes = body.len(), "received response");

    check_status(status).inspect_err(|_| {
        warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
    })?;

    WeatherRecord::from_json(&body).map_err(WeatherError::MalformedResponse)
}

/// Map a non-success status to its error.
pub fn check_status(status: StatusCode) -> Result<(), WeatherError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
        StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound),
        s => Err(WeatherError::UnexpectedStatus(s.as_u16())),
    }
}

/// reqwest errors embed the request URL, which ends in `appid=<key>`.
fn transport_error(err: reqwest::Error) -> WeatherError {
    WeatherError::Transport(err.without_url())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
