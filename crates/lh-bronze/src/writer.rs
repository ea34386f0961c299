//! Parquet writer for bronze partitions.
//!
//! Each call writes one complete file. An existing file for the same
//! dataset and ingestion day is replaced; there is no merge or upsert.

use std::fs::{self, File};
use std::path::PathBuf;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::{is_valid_dataset_name, BronzeLayout};
use crate::schema::BronzeRecord;
use crate::{SCHEMA_VERSION, SCHEMA_VERSION_KEY, TABLE_NAME_KEY};

/// Errors from bronze writes.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("invalid dataset name: {0:?}")]
    InvalidDataset(String),
}

/// Writer configuration.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub compression: Compression,

    /// Rows per Parquet row group.
    pub max_row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            max_row_group_size: 1024 * 1024,
        }
    }
}

/// Result of one partition write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    pub dataset: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes bronze datasets for a single ingestion day.
#[derive(Debug, Clone)]
pub struct BronzeWriter {
    layout: BronzeLayout,
    ingestion_date: NaiveDate,
    config: WriterConfig,
}

impl BronzeWriter {
    pub fn new(layout: BronzeLayout, ingestion_date: NaiveDate) -> Self {
        Self::with_config(layout, ingestion_date, WriterConfig::default())
    }

    pub fn with_config(layout: BronzeLayout, ingestion_date: NaiveDate, config: WriterConfig) -> Self {
        Self {
            layout,
            ingestion_date,
            config,
        }
    }

    pub fn layout(&self) -> &BronzeLayout {
        &self.layout
    }

    pub fn ingestion_date(&self) -> NaiveDate {
        self.ingestion_date
    }

    /// Convert `rows` to a batch and write it under the record's table name.
    pub fn write_records<R: BronzeRecord>(&self, rows: &[R]) -> Result<WrittenPartition, WriteError> {
        let batch = R::to_record_batch(rows)?;
        self.write_parquet(&batch, R::TABLE.as_str())
    }

    /// Write `batch` to `<root>/<dataset_name>/ingestion_date=<day>/data.parquet`,
    /// creating directories as needed.
    pub fn write_parquet(
        &self,
        batch: &RecordBatch,
        dataset_name: &str,
    ) -> Result<WrittenPartition, WriteError> {
        if !is_valid_dataset_name(dataset_name) {
            return Err(WriteError::InvalidDataset(dataset_name.to_string()));
        }

        let dir = self.layout.partition_dir(dataset_name, self.ingestion_date);
        fs::create_dir_all(&dir)?;
        let path = self.layout.data_file(dataset_name, self.ingestion_date);
        if path.exists() {
            debug!(path = %path.display(), "replacing existing partition file");
        }

        let props = WriterProperties::builder()
            .set_compression(self.config.compression)
            .set_max_row_group_size(self.config.max_row_group_size)
            .set_key_value_metadata(Some(vec![
                KeyValue::new(SCHEMA_VERSION_KEY.to_string(), SCHEMA_VERSION.to_string()),
                KeyValue::new(TABLE_NAME_KEY.to_string(), dataset_name.to_string()),
            ]))
            .build();

        let file = File::create(&path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(batch)?;
        writer.close()?;

        let rows = batch.num_rows();
        info!(dataset = dataset_name, rows, path = %path.display(), "wrote bronze partition");

        Ok(WrittenPartition {
            dataset: dataset_name.to_string(),
            path,
            rows,
        })
    }
}
