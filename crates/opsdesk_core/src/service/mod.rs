//! Use-case services, one per table.
//!
//! # Responsibility
//! - Run each user action as one load -> mutate -> save cycle.
//! - Emit one structured log event per action.
//! - Reset form state only after a successful save.
//!
//! # Invariants
//! - No dataset is cached between calls.
//! - A failed action writes nothing.

use crate::store::{StoreError, StoreResult};
use log::{error, info, warn};
use std::time::Instant;

pub mod desk;
pub mod incident_service;
pub mod survey_service;
pub mod task_service;

/// Runs `action` and logs its outcome as `event` on `table`.
pub(crate) fn run_action<T>(
    event: &'static str,
    table: &'static str,
    action: impl FnOnce() -> StoreResult<T>,
) -> StoreResult<T> {
    let started_at = Instant::now();
    let result = action();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => info!(
            "event={event} module=service status=ok table={table} duration_ms={duration_ms}"
        ),
        Err(err @ StoreError::Storage(_)) => error!(
            "event={event} module=service status=error table={table} duration_ms={duration_ms} error_code={} error={}",
            err.code(),
            err
        ),
        Err(err) => warn!(
            "event={event} module=service status=error table={table} duration_ms={duration_ms} error_code={} error={}",
            err.code(),
            err
        ),
    }

    result
}
