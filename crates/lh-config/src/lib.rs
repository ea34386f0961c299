//! Lakehouse configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the optional `config.json` file
//! - Config resolution (CLI → env → config file → defaults)
//! - Semantic validation of file-provided values

pub mod file;
pub mod resolve;

pub use file::{
    load_config, ConfigError, GeneratorSection, InspectorSection, LakehouseConfig, LoadedConfig,
};
pub use resolve::{
    GeneratorConfig, GeneratorOverrides, InspectorConfig, InspectorOverrides,
    DEFAULT_CHURN_PROBABILITY, DEFAULT_EVENTS, DEFAULT_MAX_ACCOUNT_ID, DEFAULT_USERS,
};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Default DuckDB database inspected when nothing else is configured.
pub const DEFAULT_DUCKDB_PATH: &str = "/app/lakehouse/lakehouse.duckdb";

/// Default root of the bronze layer, relative to the working directory.
pub const DEFAULT_BRONZE_PATH: &str = "lakehouse/bronze";

/// Environment variable overriding the inspected database path.
pub const ENV_DUCKDB_PATH: &str = "DUCKDB_PATH";

/// Environment variable overriding the bronze root.
pub const ENV_BRONZE_PATH: &str = "LAKEHOUSE_BRONZE_PATH";

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "LAKEHOUSE_CONFIG";
