//! Domain records for the three OpsDesk tables.
//!
//! # Responsibility
//! - Define canonical incident, satisfaction and task records.
//! - Map each record to its localized tabular column schema.
//!
//! # Invariants
//! - Status values are always one of the fixed enum variants.
//! - Incidents and tasks carry a stable `RecordId` that survives reordering.

use crate::store::schema::RowCells;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub mod incident;
pub mod survey;
pub mod task;

/// Stable identifier for incidents and tasks.
///
/// Persisted in the trailing `Id` column of each table.
pub type RecordId = Uuid;

static LEGACY_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:[ T]00:00:00(?:\.0+)?)?$").expect("date pattern is valid")
});

/// Normalizes a stored date cell to `YYYY-MM-DD`.
///
/// Spreadsheet exports write midnight timestamps (`2024-01-01 00:00:00`);
/// those collapse to the date part. Anything else is returned trimmed.
pub(crate) fn normalize_date_cell(value: &str) -> String {
    let trimmed = value.trim();
    match LEGACY_DATE.captures(trimmed) {
        Some(captures) => captures[1].to_string(),
        None => trimmed.to_string(),
    }
}

/// Parses the id cell at `index`.
///
/// A blank cell gets a UUID v5 derived from the table name, the row position
/// and the row's cells, so reloading an unchanged legacy file yields the same
/// ids.
pub(crate) fn parse_record_id(
    cells: &RowCells<'_>,
    index: usize,
    table: &str,
) -> Result<RecordId, String> {
    let trimmed = cells.get(index).trim();
    if trimmed.is_empty() {
        return Ok(legacy_record_id(cells, table));
    }
    Uuid::parse_str(trimmed).map_err(|_| format!("invalid id value `{trimmed}`"))
}

fn legacy_record_id(cells: &RowCells<'_>, table: &str) -> RecordId {
    let mut name = format!("opsdesk:{table}:{}", cells.position());
    for value in cells.values() {
        name.push('\u{1f}');
        name.push_str(value);
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}
