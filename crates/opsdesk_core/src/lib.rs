//! Core record stores for OpsDesk.
//! Incidents, satisfaction surveys and tasks, each kept as one CSV table.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod summary;

pub use config::{StoreConfig, DATA_DIR_ENV};
pub use form::{IncidentForm, SurveyForm, TaskForm, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::incident::{Incident, IncidentFields, IncidentStatus};
pub use model::survey::{SatisfactionResponse, Score};
pub use model::task::{Task, TaskStatus};
pub use model::RecordId;
pub use service::desk::{dashboard, Desk};
pub use service::incident_service::IncidentService;
pub use service::survey_service::SurveyService;
pub use service::task_service::TaskService;
pub use store::{
    CsvRecordStore, Dataset, Locator, MemoryRecordStore, RecordStore, StorageError, StoreError,
    StoreResult, TableRecord,
};
pub use summary::{Dashboard, IncidentSummary, SatisfactionSummary, ScoreMeans, TaskSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
