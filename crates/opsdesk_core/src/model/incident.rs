//! Incident record.
//!
//! # Responsibility
//! - Define the incident row and its lifecycle status.
//! - Map incidents to the `Name, Date, Incidencia, Estado, Id` table.
//!
//! # Invariants
//! - `status` defaults to `Pending` when absent from legacy rows.
//! - `id` is generated on creation and never changes on update.

use super::{normalize_date_cell, parse_record_id, RecordId};
use crate::store::schema::{Column, RowCells, TableRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const NAME: usize = 0;
const DATE: usize = 1;
const DESCRIPTION: usize = 2;
const STATUS: usize = 3;
const ID: usize = 4;

static INCIDENT_COLUMNS: [Column; 5] = [
    Column::new("Name").aliased(&["Nombre"]),
    Column::new("Date").aliased(&["Fecha"]),
    Column::new("Incidencia"),
    Column::new("Estado").defaulted(IncidentStatus::Pending.label()),
    Column::new("Id"),
];

/// Incident handling state.
///
/// Transitions are unconstrained; `Done` stays editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl IncidentStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Localized label stored in the `Estado` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En proceso",
            Self::Done => "Terminado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl Display for IncidentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IncidentStatus {
    type Err = String;

    /// Accepts the stored label or a snake_case key (`pending|in_progress|done`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(status) = Self::from_label(value) {
            return Ok(status);
        }
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!(
                "unknown incident status `{other}`; expected pending|in_progress|done"
            )),
        }
    }
}

/// Mutable incident fields, used for creation and full-row replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentFields {
    pub name: String,
    pub date: String,
    pub description: String,
    pub status: IncidentStatus,
}

/// One row of the incidents table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: RecordId,
    pub name: String,
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    pub description: String,
    pub status: IncidentStatus,
}

impl Incident {
    /// Creates an incident with a freshly generated id.
    pub fn new(fields: IncidentFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: RecordId, fields: IncidentFields) -> Self {
        Self {
            id,
            name: fields.name,
            date: fields.date,
            description: fields.description,
            status: fields.status,
        }
    }

    /// Replaces every mutable field, keeping `id`.
    pub fn apply(&mut self, fields: IncidentFields) {
        self.name = fields.name;
        self.date = fields.date;
        self.description = fields.description;
        self.status = fields.status;
    }

    pub fn fields(&self) -> IncidentFields {
        IncidentFields {
            name: self.name.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}

impl TableRecord for Incident {
    const TABLE: &'static str = "incidents";
    const FILE_NAME: &'static str = "incidencia.csv";

    fn columns() -> &'static [Column] {
        &INCIDENT_COLUMNS
    }

    fn from_cells(cells: &RowCells<'_>) -> Result<Self, String> {
        let status_label = cells.get(STATUS);
        let status = IncidentStatus::from_label(status_label)
            .ok_or_else(|| format!("invalid incident status `{status_label}` in Estado"))?;

        Ok(Self {
            id: parse_record_id(cells, ID, Self::TABLE)?,
            name: cells.text(NAME),
            date: normalize_date_cell(cells.get(DATE)),
            description: cells.text(DESCRIPTION),
            status,
        })
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.date.clone(),
            self.description.clone(),
            self.status.label().to_string(),
            self.id.to_string(),
        ]
    }

    fn record_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
}
