//! CSV-file record store.
//!
//! # Responsibility
//! - Read a whole table from one CSV file with a header row.
//! - Overwrite the whole file on save via temp file + rename.
//!
//! # Invariants
//! - A missing file loads as an empty dataset.
//! - Readers never observe a partially written file.
//! - Unparseable content is returned as `StorageError`, never masked.

use super::dataset::Dataset;
use super::schema::{HeaderLayout, TableRecord};
use super::{RecordStore, StorageError, StoreResult};
use log::{debug, error, info, warn};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Record store backed by one CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecordStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: TableRecord> CsvRecordStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Store for `R::FILE_NAME` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(R::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: TableRecord> RecordStore<R> for CsvRecordStore<R> {
    fn load(&self) -> StoreResult<Dataset<R>> {
        let started_at = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=table_load module=store status=ok table={} rows=0 missing=true",
                    R::TABLE
                );
                return Ok(Dataset::new());
            }
            Err(source) => {
                error!(
                    "event=table_load module=store status=error table={} error_code=open_failed error={}",
                    R::TABLE,
                    source
                );
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        match read_dataset::<R>(&self.path, file) {
            Ok(dataset) => {
                info!(
                    "event=table_load module=store status=ok table={} rows={} extra_columns={} duration_ms={}",
                    R::TABLE,
                    dataset.len(),
                    dataset.extra_columns().len(),
                    started_at.elapsed().as_millis()
                );
                Ok(dataset)
            }
            Err(err) => {
                error!(
                    "event=table_load module=store status=error table={} error_code=parse_failed error={}",
                    R::TABLE,
                    err
                );
                Err(err.into())
            }
        }
    }

    fn save(&self, dataset: &Dataset<R>) -> StoreResult<()> {
        let started_at = Instant::now();
        match write_dataset(&self.path, dataset) {
            Ok(()) => {
                info!(
                    "event=table_save module=store status=ok table={} rows={} duration_ms={}",
                    R::TABLE,
                    dataset.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=table_save module=store status=error table={} error_code=write_failed error={}",
                    R::TABLE,
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn read_dataset<R: TableRecord>(path: &Path, reader: impl Read) -> Result<Dataset<R>, StorageError> {
    let csv_error = |source| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let layout = HeaderLayout::resolve(R::columns(), headers.iter());

    let missing = layout.missing_columns(R::columns());
    if !headers.is_empty() && !missing.is_empty() {
        warn!(
            "event=schema_backfill module=store status=ok table={} columns={}",
            R::TABLE,
            missing.join("|")
        );
    }

    let mut rows = Vec::new();
    for (position, result) in reader.records().enumerate() {
        let row = result.map_err(csv_error)?;
        let cells = layout.cells(R::columns(), position, &row);
        let record = R::from_cells(&cells).map_err(|message| StorageError::InvalidData {
            path: path.to_path_buf(),
            position,
            message,
        })?;
        rows.push((record, layout.extra_cells(&row)));
    }

    Ok(Dataset::from_parts(layout.extra_names(), rows))
}

fn write_dataset<R: TableRecord>(path: &Path, dataset: &Dataset<R>) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_error = |source| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error)?;

    // Temp file must share the target directory for `persist` to rename.
    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    {
        let mut writer = csv::Writer::from_writer(temp.as_file_mut());
        writer.write_record(dataset.columns()).map_err(csv_error)?;
        for cells in dataset.write_rows() {
            writer.write_record(&cells).map_err(csv_error)?;
        }
        writer.flush().map_err(io_error)?;
    }
    temp.as_file_mut().flush().map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
