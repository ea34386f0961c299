//! Path layout and partitioning helpers.
//!
//! ```text
//! <root>/<dataset>/ingestion_date=YYYY-MM-DD/data.parquet
//! ```

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Hive partition column for the ingestion day.
pub const PARTITION_KEY: &str = "ingestion_date";

/// File name of the single data file in each partition.
pub const DATA_FILE_NAME: &str = "data.parquet";

/// Bronze root directory and the paths derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BronzeLayout {
    root: PathBuf,
}

impl BronzeLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dataset_dir(&self, dataset: &str) -> PathBuf {
        self.root.join(dataset)
    }

    pub fn partition_dir(&self, dataset: &str, ingestion_date: NaiveDate) -> PathBuf {
        self.dataset_dir(dataset)
            .join(partition_dir_name(ingestion_date))
    }

    pub fn data_file(&self, dataset: &str, ingestion_date: NaiveDate) -> PathBuf {
        self.partition_dir(dataset, ingestion_date)
            .join(DATA_FILE_NAME)
    }
}

/// `ingestion_date=YYYY-MM-DD`
pub fn partition_dir_name(ingestion_date: NaiveDate) -> String {
    format!("{}={}", PARTITION_KEY, ingestion_date.format("%Y-%m-%d"))
}

/// Dataset names become a single directory component.
pub(crate) fn is_valid_dataset_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('=')
}
