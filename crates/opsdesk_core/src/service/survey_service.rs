//! Satisfaction survey use-case service.
//!
//! Responses are append-only: there is no modify or delete entry point.

use super::run_action;
use crate::form::SurveyForm;
use crate::model::survey::SatisfactionResponse;
use crate::store::{Dataset, RecordStore, StoreResult, TableRecord};
use crate::summary::SatisfactionSummary;

const TABLE: &str = SatisfactionResponse::TABLE;

/// Use-case service wrapper for the satisfaction table.
pub struct SurveyService<S: RecordStore<SatisfactionResponse>> {
    store: S,
}

impl<S: RecordStore<SatisfactionResponse>> SurveyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records one survey response and clears `form` on success.
    ///
    /// # Contract
    /// - Requires first name, last name and email; otherwise `Validation`.
    pub fn add(&self, form: &mut SurveyForm) -> StoreResult<()> {
        let result = run_action("survey_add", TABLE, || {
            let response = form.validate()?;
            let mut dataset = self.store.load()?;
            dataset.append(response);
            self.store.save(&dataset)
        });
        if result.is_ok() {
            form.reset();
        }
        result
    }

    pub fn list(&self) -> StoreResult<Dataset<SatisfactionResponse>> {
        self.store.load()
    }

    /// Response count and score means; `means` is `None` with no responses.
    pub fn summary(&self) -> StoreResult<SatisfactionSummary> {
        Ok(self.store.load()?.summarize())
    }
}
