//! In-process record store for tests and embedding.

use super::dataset::Dataset;
use super::schema::TableRecord;
use super::{RecordStore, StoreResult};
use std::cell::{Cell, RefCell};

/// Record store that keeps the last saved dataset in memory.
///
/// `load` returns a copy, so callers mutate it the same way they mutate a
/// dataset read from disk; nothing changes until `save`.
#[derive(Debug)]
pub struct MemoryRecordStore<R> {
    saved: RefCell<Dataset<R>>,
    saves: Cell<usize>,
}

impl<R: TableRecord + Clone> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::with_dataset(Dataset::new())
    }

    pub fn with_dataset(dataset: Dataset<R>) -> Self {
        Self {
            saved: RefCell::new(dataset),
            saves: Cell::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl<R: TableRecord + Clone> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TableRecord + Clone> RecordStore<R> for MemoryRecordStore<R> {
    fn load(&self) -> StoreResult<Dataset<R>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, dataset: &Dataset<R>) -> StoreResult<()> {
        *self.saved.borrow_mut() = dataset.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
