use serde::Deserialize;
use serde_json::Number;

/// Measurement system requested from the API and shown in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial { UnitSystem::Imperial } else { UnitSystem::Metric }
    }

    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Temperature suffix, degree sign included.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    /// City name tokens as typed on the command line.
    pub city: Vec<String>,
    pub units: UnitSystem,
}

impl WeatherRequest {
    pub fn new(city: Vec<String>, units: UnitSystem) -> Self {
        Self { city, units }
    }

    /// Tokens joined with single spaces.
    pub fn city_name(&self) -> String {
        self.city.join(" ")
    }
}

/// The three fields of a current-conditions response that get displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub description: String,
    /// Kept as sent, so `18.0` prints as `18.0` and `9` as `9`.
    pub temperature: Number,
}

impl WeatherRecord {
    /// Decode an OpenWeather current-conditions body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let parsed: OwCurrentResponse = serde_json::from_str(body)?;
        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(parsed: OwCurrentResponse) -> Self {
        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherRecord { city: parsed.name, description, temperature: parsed.main.temp }
    }
}
