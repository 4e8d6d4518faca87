use directories::ProjectDirs;
use reqwest::Url;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    error::WeatherError,
    query::{BASE_WEATHER_API_URL, parse_base_url},
};

/// File looked up in the working directory when no path is given.
pub const LOCAL_SECRETS_FILE: &str = "secrets.toml";

/// The `[openweather]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    /// Overrides the public endpoint, e.g. for a proxy.
    pub base_url: Option<String>,
}

/// Secrets file contents.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub openweather: Option<OpenWeatherConfig>,

    /// Where this config was read from, if anywhere.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load the secrets file.
    ///
    /// An explicit path must exist. Otherwise `secrets.toml` in the working
    /// directory is tried, then the platform config file. Finding neither
    /// yields an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self, WeatherError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::discover_in(Path::new("."), Self::config_file_path()) {
                Some(path) => path,
                None => {
                    debug!("no secrets file found, using empty configuration");
                    return Ok(Self::default());
                }
            },
        };

        Self::load_from(&path)
    }

    /// Read and parse a specific file.
    pub fn load_from(path: &Path) -> Result<Self, WeatherError> {
        debug!(path = %path.display(), "reading secrets file");

        let contents = fs::read_to_string(path).map_err(|source| WeatherError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut cfg = Self::from_toml_str(&contents).map_err(|source| {
            WeatherError::ConfigParse { path: path.to_path_buf(), source }
        })?;
        cfg.source = Some(path.to_path_buf());

        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// `secrets.toml` in `dir` wins over the per-user file; missing files are skipped.
    fn discover_in(dir: &Path, user_file: Option<PathBuf>) -> Option<PathBuf> {
        let local = dir.join(LOCAL_SECRETS_FILE);
        if local.is_file() {
            return Some(local);
        }

        user_file.filter(|p| p.is_file())
    }

    /// Path to the per-user config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "cityweather", "cityweather")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The OpenWeather API key, if the section and entry are present.
    pub fn api_key(&self) -> Result<&str, WeatherError> {
        self.openweather
            .as_ref()
            .and_then(|ow| ow.api_key.as_deref())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WeatherError::MissingApiKey { location: self.describe_location() })
    }

    /// Endpoint to query; the public OpenWeather URL unless overridden.
    pub fn base_url(&self) -> Result<Url, WeatherError> {
        let raw = self
            .openweather
            .as_ref()
            .and_then(|ow| ow.base_url.as_deref())
            .unwrap_or(BASE_WEATHER_API_URL);

        parse_base_url(raw)
    }

    fn describe_location(&self) -> String {
        match (&self.source, Self::config_file_path()) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(user)) => format!("./{LOCAL_SECRETS_FILE} or {}", user.display()),
            (None, None) => format!("./{LOCAL_SECRETS_FILE}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_api_key_from_openweather_section() {
        let cfg = Config::from_toml_str("[openweather]\napi_key = \"OPEN_KEY\"\n").unwrap();
        assert_eq!(cfg.api_key().unwrap(), "OPEN_KEY");
    }

    #[test]
    fn missing_section_is_a_config_error() {
        let cfg = Config::from_toml_str("[other]\napi_key = \"X\"\n").unwrap();
        let err = cfg.api_key().unwrap_err();

        assert!(matches!(err, WeatherError::MissingApiKey { .. }));
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn missing_or_blank_key_is_a_config_error() {
        let cfg = Config::from_toml_str("[openweather]\n").unwrap();
        assert!(matches!(cfg.api_key(), Err(WeatherError::MissingApiKey { .. })));

        let cfg = Config::from_toml_str("[openweather]\napi_key = \"  \"\n").unwrap();
        assert!(matches!(cfg.api_key(), Err(WeatherError::MissingApiKey { .. })));
    }

    #[test]
    fn empty_config_errors_with_hint() {
        let err = Config::default().api_key().unwrap_err();
        assert!(err.to_string().contains("Hint: add `api_key"));
    }

    #[test]
    fn base_url_defaults_to_openweather() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url().unwrap().as_str(), BASE_WEATHER_API_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let cfg = Config::from_toml_str(
            "[openweather]\napi_key = \"K\"\nbase_url = \"http://localhost:8080/weather\"\n",
        )
        .unwrap();
        assert_eq!(cfg.base_url().unwrap().as_str(), "http://localhost:8080/weather");
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let path = Path::new("/definitely/not/here/secrets.toml");
        let err = Config::load(Some(path)).unwrap_err();

        assert!(matches!(err, WeatherError::ConfigRead { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn discovery_prefers_local_secrets_over_user_config() {
        let root =
            std::env::temp_dir().join(format!("cityweather-discover-{}", std::process::id()));
        let workdir = root.join("work");
        let user_dir = root.join("user");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&workdir).unwrap();
        fs::create_dir_all(&user_dir).unwrap();

        let user_file = user_dir.join("config.toml");
        let local_file = workdir.join(LOCAL_SECRETS_FILE);

        assert_eq!(Config::discover_in(&workdir, Some(user_file.clone())), None);

        fs::write(&user_file, "[openweather]\napi_key = \"USER_KEY\"\n").unwrap();
        assert_eq!(
            Config::discover_in(&workdir, Some(user_file.clone())),
            Some(user_file.clone())
        );

        fs::write(&local_file, "[openweather]\napi_key = \"LOCAL_KEY\"\n").unwrap();
        let found = Config::discover_in(&workdir, Some(user_file.clone())).unwrap();
        assert_eq!(found, local_file);
        assert_eq!(Config::load_from(&found).unwrap().api_key().unwrap(), "LOCAL_KEY");

        assert_eq!(Config::discover_in(&workdir, None), Some(local_file));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn load_from_records_source_and_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("cityweather-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        fs::write(&good, "[openweather]\napi_key = \"FILE_KEY\"\n").unwrap();
        let cfg = Config::load_from(&good).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "FILE_KEY");
        assert_eq!(cfg.source.as_deref(), Some(good.as_path()));

        let bad = dir.join("bad.toml");
        fs::write(&bad, "[openweather\napi_key=").unwrap();
        let err = Config::load_from(&bad).unwrap_err();
        assert!(matches!(err, WeatherError::ConfigParse { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
