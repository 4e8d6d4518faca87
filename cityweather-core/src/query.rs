use reqwest::Url;

use crate::{error::WeatherError, model::UnitSystem};

pub const BASE_WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Build the URL for OpenWeather's city name endpoint.
///
/// The city tokens are joined with single spaces and form-encoded into `q`
/// (spaces become `+`). The API key is passed in rather than looked up here.
pub fn build_weather_query(
    base_url: &Url,
    city: &[String],
    units: UnitSystem,
    api_key: &str,
) -> Result<Url, WeatherError> {
    let city_name = city.join(" ");
    if city_name.trim().is_empty() {
        return Err(WeatherError::MissingCity);
    }

    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("q", &city_name)
        .append_pair("units", units.as_str())
        .append_pair("appid", api_key);

    Ok(url)
}

/// Parse a base URL, reporting failures as configuration errors.
pub fn parse_base_url(raw: &str) -> Result<Url, WeatherError> {
    Url::parse(raw).map_err(|e| WeatherError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
