use chrono::Duration;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub passes: PassesConfig,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub observation: ObservationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8001".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub tle_folder: PathBuf,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub refresh_interval: Option<Duration>,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_list_limit() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassesConfig {
    #[serde(default = "default_min_elevation")]
    pub default_min_elevation: f64,
    #[serde(
        default = "default_pass_step",
        deserialize_with = "deserialize_duration"
    )]
    pub default_step: Duration,
    #[serde(default = "default_days")]
    pub default_days: u32,
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Upper bound on `horizon / step + 1` for a single request.
    #[serde(default = "default_max_samples")]
    pub max_samples: u64,
}

impl Default for PassesConfig {
    fn default() -> Self {
        Self {
            default_min_elevation: default_min_elevation(),
            default_step: default_pass_step(),
            default_days: default_days(),
            max_days: default_max_days(),
            max_samples: default_max_samples(),
        }
    }
}

fn default_min_elevation() -> f64 {
    crate::track::DEFAULT_MIN_ELEVATION_DEG
}

fn default_pass_step() -> Duration {
    crate::track::DEFAULT_STEP
}

fn default_days() -> u32 {
    7
}

fn default_max_days() -> u32 {
    30
}

// 30 days at a 30 s step
fn default_max_samples() -> u64 {
    86_401
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    #[serde(
        default = "default_track_span",
        deserialize_with = "deserialize_duration"
    )]
    pub default_span: Duration,
    #[serde(default = "default_points")]
    pub default_points: usize,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            default_span: default_track_span(),
            default_points: default_points(),
            max_points: default_max_points(),
        }
    }
}

fn default_track_span() -> Duration {
    Duration::minutes(90)
}

fn default_points() -> usize {
    91
}

fn default_max_points() -> usize {
    5000
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationConfig {
    #[serde(default)]
    pub imagery_api_key: Option<String>,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_str("catalog:\n  tle_folder: ./tle\n").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8001");
        assert_eq!(config.catalog.tle_folder, PathBuf::from("./tle"));
        assert_eq!(config.catalog.refresh_interval, None);
        assert_eq!(config.catalog.list_limit, 50);
        assert_eq!(config.passes.default_min_elevation, 10.0);
        assert_eq!(config.passes.default_step, Duration::hours(2));
        assert_eq!(config.passes.default_days, 7);
        assert_eq!(config.passes.max_samples, 86_401);
        assert_eq!(config.track.default_span, Duration::minutes(90));
        assert!(config.observation.imagery_api_key.is_none());
    }

    #[test]
    fn full_config() {
        let yaml = r#"
web:
  bind: "127.0.0.1:9000"
catalog:
  tle_folder: /var/lib/orbita/tle
  refresh_interval: 6h
  list_limit: 10
passes:
  default_min_elevation: 5.0
  default_step: 30s
  default_days: 2
  max_days: 5
  max_samples: 1000
track:
  default_span: 3h
  default_points: 10
  max_points: 100
observation:
  imagery_api_key: secret
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.catalog.refresh_interval, Some(Duration::hours(6)));
        assert_eq!(config.catalog.list_limit, 10);
        assert_eq!(config.passes.default_step, Duration::seconds(30));
        assert_eq!(config.passes.max_days, 5);
        assert_eq!(config.passes.max_samples, 1000);
        assert_eq!(config.track.default_span, Duration::hours(3));
        assert_eq!(config.track.max_points, 100);
        assert_eq!(config.observation.imagery_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let yaml = "catalog:\n  tle_folder: ./tle\n  refresh_interval: soon\n";
        assert!(matches!(Config::from_str(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn missing_catalog_is_rejected() {
        assert!(Config::from_str("web:\n  bind: x\n").is_err());
    }
}
