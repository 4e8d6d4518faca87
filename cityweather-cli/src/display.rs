use cityweather_core::{UnitSystem, WeatherRecord};

/// Width each text column is centred in.
pub const PADDING: usize = 20;

/// Render one summary line, e.g. `       Paris        \t     Clear sky       (18.5°C)`.
pub fn format_weather_line(record: &WeatherRecord, units: UnitSystem) -> String {
    format!(
        "{:^width$}\t{:^width$} ({}{})",
        record.city,
        capitalize(&record.description),
        record.temperature,
        units.temperature_suffix(),
        width = PADDING,
    )
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
