//! Layered resolution: CLI → env → config file → defaults.

use std::path::PathBuf;

use crate::file::LakehouseConfig;
use crate::{DEFAULT_BRONZE_PATH, DEFAULT_DUCKDB_PATH, ENV_BRONZE_PATH, ENV_DUCKDB_PATH};

/// Default number of users per run.
pub const DEFAULT_USERS: usize = 100;

/// Default number of events per run.
pub const DEFAULT_EVENTS: usize = 1000;

/// Default subscription churn probability.
pub const DEFAULT_CHURN_PROBABILITY: f64 = 0.2;

/// Default largest account id.
pub const DEFAULT_MAX_ACCOUNT_ID: i64 = 20;

/// Generator values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOverrides {
    pub users: Option<usize>,
    pub events: Option<usize>,
    pub bronze_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Fully resolved generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub users: usize,
    pub events: usize,
    pub bronze_path: PathBuf,
    pub seed: Option<u64>,
    pub churn_probability: f64,
    pub max_account_id: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            events: DEFAULT_EVENTS,
            bronze_path: PathBuf::from(DEFAULT_BRONZE_PATH),
            seed: None,
            churn_probability: DEFAULT_CHURN_PROBABILITY,
            max_account_id: DEFAULT_MAX_ACCOUNT_ID,
        }
    }
}

impl GeneratorConfig {
    /// Resolve against the process environment.
    pub fn resolve(cli: &GeneratorOverrides, file: &LakehouseConfig) -> Self {
        Self::resolve_with_env(cli, file, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(cli: &GeneratorOverrides, file: &LakehouseConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let section = &file.generator;

        let bronze_path = cli
            .bronze_path
            .clone()
            .or_else(|| non_empty(env(ENV_BRONZE_PATH)).map(PathBuf::from))
            .or_else(|| section.bronze_path.clone())
            .unwrap_or(defaults.bronze_path);

        Self {
            users: cli.users.or(section.users).unwrap_or(defaults.users),
            events: cli.events.or(section.events).unwrap_or(defaults.events),
            bronze_path,
            seed: cli.seed.or(section.seed),
            churn_probability: section
                .churn_probability
                .unwrap_or(defaults.churn_probability),
            max_account_id: section.max_account_id.unwrap_or(defaults.max_account_id),
        }
    }
}

/// Inspector values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct InspectorOverrides {
    pub duckdb_path: Option<PathBuf>,
    /// `Some(false)` when counting was disabled with a flag.
    pub count_rows: Option<bool>,
}

/// Fully resolved inspector settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorConfig {
    pub duckdb_path: PathBuf,
    pub count_rows: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            duckdb_path: PathBuf::from(DEFAULT_DUCKDB_PATH),
            count_rows: true,
        }
    }
}

impl InspectorConfig {
    /// Resolve against the process environment.
    pub fn resolve(cli: &InspectorOverrides, file: &LakehouseConfig) -> Self {
        Self::resolve_with_env(cli, file, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(cli: &InspectorOverrides, file: &LakehouseConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let section = &file.inspector;

        let duckdb_path = cli
            .duckdb_path
            .clone()
            .or_else(|| non_empty(env(ENV_DUCKDB_PATH)).map(PathBuf::from))
            .or_else(|| section.duckdb_path.clone())
            .unwrap_or(defaults.duckdb_path);

        Self {
            duckdb_path,
            count_rows: cli
                .count_rows
                .or(section.count_rows)
                .unwrap_or(defaults.count_rows),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{GeneratorSection, InspectorSection};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let resolved = GeneratorConfig::resolve_with_env(
            &GeneratorOverrides::default(),
            &LakehouseConfig::default(),
            no_env,
        );
        assert_eq!(resolved, GeneratorConfig::default());

        let insp = InspectorConfig::resolve_with_env(
            &InspectorOverrides::default(),
            &LakehouseConfig::default(),
            no_env,
        );
        assert_eq!(insp.duckdb_path, PathBuf::from("/app/lakehouse/lakehouse.duckdb"));
        assert!(insp.count_rows);
    }

    #[test]
    fn test_duckdb_path_precedence() {
        let file = LakehouseConfig {
            inspector: InspectorSection {
                duckdb_path: Some(PathBuf::from("/from/file.duckdb")),
                count_rows: Some(false),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == ENV_DUCKDB_PATH).then(|| "/from/env.duckdb".to_string());

        let from_file =
            InspectorConfig::resolve_with_env(&InspectorOverrides::default(), &file, no_env);
        assert_eq!(from_file.duckdb_path, PathBuf::from("/from/file.duckdb"));
        assert!(!from_file.count_rows);

        let from_env = InspectorConfig::resolve_with_env(&InspectorOverrides::default(), &file, env);
        assert_eq!(from_env.duckdb_path, PathBuf::from("/from/env.duckdb"));

        let cli = InspectorOverrides {
            duckdb_path: Some(PathBuf::from("/from/cli.duckdb")),
            count_rows: Some(true),
        };
        let from_cli = InspectorConfig::resolve_with_env(&cli, &file, env);
        assert_eq!(from_cli.duckdb_path, PathBuf::from("/from/cli.duckdb"));
        assert!(from_cli.count_rows);
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let env = |_: &str| Some(String::new());
        let insp = InspectorConfig::resolve_with_env(
            &InspectorOverrides::default(),
            &LakehouseConfig::default(),
            env,
        );
        assert_eq!(insp.duckdb_path, PathBuf::from(DEFAULT_DUCKDB_PATH));
    }

    #[test]
    fn test_generator_precedence() {
        let file = LakehouseConfig {
            generator: GeneratorSection {
                users: Some(5),
                events: Some(6),
                bronze_path: Some(PathBuf::from("file/bronze")),
                seed: Some(1),
                churn_probability: Some(0.5),
                max_account_id: Some(3),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == ENV_BRONZE_PATH).then(|| "env/bronze".to_string());
        let cli = GeneratorOverrides {
            users: Some(50),
            seed: Some(99),
            ..Default::default()
        };

        let resolved = GeneratorConfig::resolve_with_env(&cli, &file, env);
        assert_eq!(resolved.users, 50);
        assert_eq!(resolved.events, 6);
        assert_eq!(resolved.bronze_path, PathBuf::from("env/bronze"));
        assert_eq!(resolved.seed, Some(99));
        assert_eq!(resolved.churn_probability, 0.5);
        assert_eq!(resolved.max_account_id, 3);
    }
}
