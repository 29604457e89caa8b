//! Data directory configuration.
//!
//! # Invariants
//! - Each table lives at `data_dir/<FILE_NAME>`; file names are fixed.

use crate::store::{CsvRecordStore, TableRecord};
use std::path::{Path, PathBuf};

/// Environment variable consulted by front ends for the data directory.
pub const DATA_DIR_ENV: &str = "OPSDESK_DATA_DIR";

/// Location of the three backing tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the file backing `R`, as opened by `CsvRecordStore::in_dir`.
    pub fn table_path<R: TableRecord>(&self) -> PathBuf {
        CsvRecordStore::<R>::in_dir(&self.data_dir).path().to_path_buf()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
