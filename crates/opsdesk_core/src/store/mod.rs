//! Record store contract and tabular persistence.
//!
//! # Responsibility
//! - Define the load/save contract shared by every table.
//! - Hold the in-memory `Dataset` and its per-table mutators.
//! - Separate semantic errors (`NotFound`, `Validation`) from storage errors.
//!
//! # Invariants
//! - `load` never fails for a missing file; it returns an empty dataset.
//! - `save` replaces the whole file; a failed save leaves the old file intact.

use crate::form::ValidationError;
use crate::model::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod csv_store;
mod dataset;
mod memory;
pub mod schema;

pub use csv_store::CsvRecordStore;
pub use dataset::Dataset;
pub use memory::MemoryRecordStore;
pub use schema::{Column, TableRecord};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to read or write a backing file.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    InvalidData {
        path: PathBuf,
        position: usize,
        message: String,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidData {
                path,
                position,
                message,
            } => write!(
                f,
                "{}: invalid row at position {position}: {message}",
                path.display()
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::InvalidData { .. } => None,
        }
    }
}

/// How a missing row was referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Position { position: usize, len: usize },
    Id(RecordId),
    Title(String),
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position { position, len } => {
                write!(f, "position {position} (dataset has {len} rows)")
            }
            Self::Id(id) => write!(f, "id {id}"),
            Self::Title(title) => write!(f, "title `{title}`"),
        }
    }
}

/// Error returned by record store and service operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(Locator),
    Storage(StorageError),
}

impl StoreError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(locator) => write!(f, "record not found at {locator}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Whole-dataset persistence for one table.
///
/// Implementations hold no cached state between calls.
pub trait RecordStore<R: TableRecord> {
    /// Reads the full dataset, or an empty one when nothing is stored yet.
    fn load(&self) -> StoreResult<Dataset<R>>;

    /// Overwrites the stored dataset with `dataset`.
    fn save(&self, dataset: &Dataset<R>) -> StoreResult<()>;
}
