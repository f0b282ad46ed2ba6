//! Server Configuration
//!
//! Defaults are overlaid by an optional `grade-predictor.toml` and then by
//! `GRADE_PREDICTOR__*` environment variables
//! (e.g. `GRADE_PREDICTOR__MODEL__PATH=/srv/model.onnx`).

use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "grade-predictor";

const ENV_PREFIX: &str = "GRADE_PREDICTOR";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub validation: ValidationSettings,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Classifier artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX export of the trained classifier
    pub path: String,
    /// Output index holding the class probabilities
    pub probability_output: usize,
    /// Refuse to start when the model cannot be loaded
    pub required: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "grade_classification_model.onnx".to_string(),
            probability_output: 1,
            required: false,
        }
    }
}

/// Boundary range checking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub enabled: bool,
    pub ranges: ValidationConfig,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ranges: ValidationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load configuration from defaults, an optional file and the environment
///
/// When `path` is given the file must exist; otherwise
/// [`DEFAULT_CONFIG_FILE`] is read if present.
pub fn load_config(path: Option<&str>) -> Result<ApiConfig, ConfigError> {
    let file = File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some());

    Config::builder()
        .add_source(Config::try_from(&ApiConfig::default())?)
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.model.probability_output, 1);
        assert!(config.validation.enabled);
        assert_eq!(config.validation.ranges.grade_range, (0.0, 20.0));
    }

    #[test]
    fn test_required_file_missing() {
        assert!(load_config(Some("/nonexistent/grade-predictor.toml")).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("grade-predictor-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("override.toml");
        std::fs::write(
            &path,
            "[model]\npath = \"/srv/models/pass.onnx\"\nrequired = true\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.model.path, "/srv/models/pass.onnx");
        assert!(config.model.required);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
