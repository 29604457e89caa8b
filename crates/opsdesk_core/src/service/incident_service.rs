//! Incident use-case service.
//!
//! # Responsibility
//! - Add, list, modify and delete incidents against a `RecordStore`.
//! - Provide the incident status summary.
//!
//! # Invariants
//! - Positions are resolved against a freshly loaded dataset on every call.
//! - Out-of-range positions fail with `NotFound` and write nothing.

use super::run_action;
use crate::form::IncidentForm;
use crate::model::incident::Incident;
use crate::model::RecordId;
use crate::store::{Dataset, Locator, RecordStore, StoreError, StoreResult, TableRecord};
use crate::summary::IncidentSummary;

const TABLE: &str = Incident::TABLE;

/// Use-case service wrapper for the incidents table.
pub struct IncidentService<S: RecordStore<Incident>> {
    store: S,
}

impl<S: RecordStore<Incident>> IncidentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new incident from `form` and returns its id.
    ///
    /// # Contract
    /// - Requires name and description; otherwise `Validation`.
    /// - Resets `form` only after the dataset is saved.
    pub fn add(&self, form: &mut IncidentForm) -> StoreResult<RecordId> {
        let result = run_action("incident_add", TABLE, || {
            let incident = Incident::new(form.validate()?);
            let id = incident.id;
            let mut dataset = self.store.load()?;
            dataset.append(incident);
            self.store.save(&dataset)?;
            Ok(id)
        });
        if result.is_ok() {
            form.reset();
        }
        result
    }

    pub fn list(&self) -> StoreResult<Dataset<Incident>> {
        self.store.load()
    }

    pub fn get(&self, position: usize) -> StoreResult<Incident> {
        let dataset = self.store.load()?;
        dataset
            .get(position)
            .cloned()
            .ok_or(StoreError::NotFound(Locator::Position {
                position,
                len: dataset.len(),
            }))
    }

    /// Replaces every field of the incident at `position` with `form`.
    pub fn modify(&self, position: usize, form: &IncidentForm) -> StoreResult<()> {
        run_action("incident_modify", TABLE, || {
            let fields = form.validate()?;
            let mut dataset = self.store.load()?;
            dataset.update_at(position, fields)?;
            self.store.save(&dataset)
        })
    }

    /// Same as `modify`, addressing the row by stable id.
    pub fn modify_by_id(&self, id: RecordId, form: &IncidentForm) -> StoreResult<()> {
        run_action("incident_modify", TABLE, || {
            let fields = form.validate()?;
            let mut dataset = self.store.load()?;
            dataset.update_by_id(id, fields)?;
            self.store.save(&dataset)
        })
    }

    /// Deletes the incident at `position` and returns it.
    ///
    /// Later incidents shift down one position.
    pub fn delete(&self, position: usize) -> StoreResult<Incident> {
        run_action("incident_delete", TABLE, || {
            let mut dataset = self.store.load()?;
            let removed = dataset.delete_at(position)?;
            self.store.save(&dataset)?;
            Ok(removed)
        })
    }

    pub fn delete_by_id(&self, id: RecordId) -> StoreResult<Incident> {
        run_action("incident_delete", TABLE, || {
            let mut dataset = self.store.load()?;
            let removed = dataset.delete_by_id(id)?;
            self.store.save(&dataset)?;
            Ok(removed)
        })
    }

    pub fn summary(&self) -> StoreResult<IncidentSummary> {
        Ok(self.store.load()?.summarize())
    }
}
