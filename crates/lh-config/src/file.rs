//! Config file types and loading.
//!
//! Every field is optional; anything missing falls through to the
//! environment or built-in defaults during resolution.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::CONFIG_SCHEMA_VERSION;

/// Config file name looked up under the user config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported config schema version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Top-level config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LakehouseConfig {
    #[serde(default)]
    pub schema_version: Option<String>,

    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub inspector: InspectorSection,
}

/// `generator` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    /// Number of users to fabricate.
    #[serde(default)]
    pub users: Option<usize>,

    /// Number of events to fabricate.
    #[serde(default)]
    pub events: Option<usize>,

    /// Root directory of the bronze layer.
    #[serde(default)]
    pub bronze_path: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Probability that a subscription has churned.
    #[serde(default)]
    pub churn_probability: Option<f64>,

    /// Largest account id assigned to users.
    #[serde(default)]
    pub max_account_id: Option<i64>,
}

/// `inspector` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectorSection {
    #[serde(default)]
    pub duckdb_path: Option<PathBuf>,

    /// Whether to run a count query per object.
    #[serde(default)]
    pub count_rows: Option<bool>,
}

impl LakehouseConfig {
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: LakehouseConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(version) = &self.schema_version {
            let major = |v: &str| v.split('.').next().map(str::to_string);
            if major(version) != major(CONFIG_SCHEMA_VERSION) {
                return Err(ConfigError::UnsupportedVersion(version.clone()));
            }
        }
        if let Some(p) = self.generator.churn_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid {
                    field: "generator.churn_probability",
                    message: format!("must be in [0.0, 1.0], got {}", p),
                });
            }
        }
        if let Some(max) = self.generator.max_account_id {
            if max < 1 {
                return Err(ConfigError::Invalid {
                    field: "generator.max_account_id",
                    message: format!("must be at least 1, got {}", max),
                });
            }
        }
        Ok(())
    }
}

/// A config together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: LakehouseConfig,
    /// `None` when no file was found and defaults are in effect.
    pub source: Option<PathBuf>,
}

/// Load the config file.
///
/// An explicit path must exist. Without one, `<config_dir>/lakehouse/config.json`
/// is used when present; otherwise an empty config is returned.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(LoadedConfig::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = LakehouseConfig::from_json(&content, &path)?;
    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lakehouse").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_valid() {
        let config = LakehouseConfig::from_json("{}", Path::new("c.json")).unwrap();
        assert!(config.generator.users.is_none());
        assert!(config.inspector.duckdb_path.is_none());
    }

    #[test]
    fn test_parses_sections() {
        let json = r#"{
            "schema_version": "1.2.0",
            "generator": { "users": 10, "events": 50, "seed": 7 },
            "inspector": { "duckdb_path": "/tmp/x.duckdb", "count_rows": false }
        }"#;
        let config = LakehouseConfig::from_json(json, Path::new("c.json")).unwrap();
        assert_eq!(config.generator.users, Some(10));
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.inspector.count_rows, Some(false));
    }

    #[test]
    fn test_rejects_bad_churn() {
        let json = r#"{ "generator": { "churn_probability": 1.5 } }"#;
        let err = LakehouseConfig::from_json(json, Path::new("c.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "generator.churn_probability", .. }));
    }

    #[test]
    fn test_rejects_major_version_mismatch() {
        let json = r#"{ "schema_version": "2.0.0" }"#;
        let err = LakehouseConfig::from_json(json, Path::new("c.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let json = r#"{ "generator": { "userz": 3 } }"#;
        assert!(matches!(
            LakehouseConfig::from_json(json, Path::new("c.json")),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{ "generator": {{ "users": 3 }} }}"#).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.generator.users, Some(3));
    }
}
