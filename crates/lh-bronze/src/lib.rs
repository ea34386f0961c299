//! Lakehouse bronze-layer storage.
//!
//! This crate provides:
//! - Arrow schema definitions for the bronze tables
//! - Hive-style partition layout (`<table>/ingestion_date=YYYY-MM-DD/`)
//! - A Parquet writer that replaces a day's partition file in place

pub mod layout;
pub mod schema;
pub mod writer;

pub use layout::{BronzeLayout, DATA_FILE_NAME, PARTITION_KEY};
pub use schema::{
    events_schema, invoices_schema, subscriptions_schema, users_schema, BronzeRecord, TableName,
};
pub use writer::{BronzeWriter, WriteError, WriterConfig, WrittenPartition};

/// Schema version stamped into every Parquet file's key/value metadata.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Metadata key carrying [`SCHEMA_VERSION`].
pub const SCHEMA_VERSION_KEY: &str = "lakehouse.schema_version";

/// Metadata key carrying the table name.
pub const TABLE_NAME_KEY: &str = "lakehouse.table";
