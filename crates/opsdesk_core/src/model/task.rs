//! Task record.
//!
//! # Responsibility
//! - Define the task row and its lifecycle status.
//! - Map tasks to the `Tarea, Descripción, Fecha Creación, Fecha Límite,
//!   Estado, Id` table.
//!
//! # Invariants
//! - `title` is the status-update key but is not unique.
//! - `status` defaults to `Pending` when absent from legacy rows.

use super::{normalize_date_cell, parse_record_id, RecordId};
use crate::store::schema::{Column, RowCells, TableRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const CREATED_DATE: usize = 2;
const DUE_DATE: usize = 3;
const STATUS: usize = 4;
const ID: usize = 5;

static TASK_COLUMNS: [Column; 6] = [
    Column::new("Tarea"),
    Column::new("Descripción"),
    Column::new("Fecha Creación"),
    Column::new("Fecha Límite"),
    Column::new("Estado").defaulted(TaskStatus::Pending.label()),
    Column::new("Id"),
];

/// Task progress state. `Finished` can still be re-opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Finished,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Finished];

    /// Localized label stored in the `Estado` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En proceso",
            Self::Finished => "Finalizada",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(status) = Self::from_label(value) {
            return Ok(status);
        }
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            other => Err(format!(
                "unknown task status `{other}`; expected pending|in_progress|finished"
            )),
        }
    }
}

/// One row of the tasks table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub created_date: String,
    pub due_date: String,
    pub status: TaskStatus,
}

impl Task {
    /// Creates a task with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        created_date: impl Into<String>,
        due_date: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            created_date: created_date.into(),
            due_date: due_date.into(),
            status,
        }
    }
}

impl TableRecord for Task {
    const TABLE: &'static str = "tasks";
    const FILE_NAME: &'static str = "tareas.csv";

    fn columns() -> &'static [Column] {
        &TASK_COLUMNS
    }

    fn from_cells(cells: &RowCells<'_>) -> Result<Self, String> {
        let status_label = cells.get(STATUS);
        let status = TaskStatus::from_label(status_label)
            .ok_or_else(|| format!("invalid task status `{status_label}` in Estado"))?;

        Ok(Self {
            id: parse_record_id(cells, ID, Self::TABLE)?,
            title: cells.text(TITLE),
            description: cells.text(DESCRIPTION),
            created_date: normalize_date_cell(cells.get(CREATED_DATE)),
            due_date: normalize_date_cell(cells.get(DUE_DATE)),
            status,
        })
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.created_date.clone(),
            self.due_date.clone(),
            self.status.label().to_string(),
            self.id.to_string(),
        ]
    }

    fn record_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
}
