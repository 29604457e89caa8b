//! In-memory dataset and its per-table mutators.
//!
//! # Invariants
//! - Row order is insertion order; positions are zero-based and contiguous.
//! - Every row carries one extra cell per extra column.
//! - Position mutators exist for incidents only; title mutators for tasks only.

use super::schema::TableRecord;
use super::{Locator, StoreError, StoreResult};
use crate::model::incident::{Incident, IncidentFields};
use crate::model::survey::SatisfactionResponse;
use crate::model::task::{Task, TaskStatus};
use crate::model::RecordId;
use crate::summary::{IncidentSummary, SatisfactionSummary, TaskSummary};

/// Full ordered contents of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset<R> {
    extra_columns: Vec<String>,
    rows: Vec<Row<R>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row<R> {
    record: R,
    extras: Vec<String>,
}

impl<R: TableRecord> Default for Dataset<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TableRecord> Dataset<R> {
    /// Empty dataset with only the canonical columns.
    pub fn new() -> Self {
        Self {
            extra_columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_parts(extra_columns: Vec<String>, rows: Vec<(R, Vec<String>)>) -> Self {
        let rows = rows
            .into_iter()
            .map(|(record, extras)| Row { record, extras })
            .collect();
        Self {
            extra_columns,
            rows,
        }
    }

    /// Canonical column names followed by any extra columns from the file.
    pub fn columns(&self) -> Vec<&str> {
        R::columns()
            .iter()
            .map(|column| column.name)
            .chain(self.extra_columns.iter().map(String::as_str))
            .collect()
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&R> {
        self.rows.get(position).map(|row| &row.record)
    }

    pub fn records(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.iter().map(|row| &row.record)
    }

    /// Value of a preserved non-canonical column.
    pub fn extra_value(&self, position: usize, column: &str) -> Option<&str> {
        let index = self.extra_columns.iter().position(|name| name == column)?;
        self.rows
            .get(position)
            .and_then(|row| row.extras.get(index))
            .map(String::as_str)
    }

    /// Adds `record` as the last row. Extra columns are left blank.
    pub fn append(&mut self, record: R) {
        self.rows.push(Row {
            record,
            extras: vec![String::new(); self.extra_columns.len()],
        });
    }

    /// Current position of the row with the given stable id.
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.record.record_id() == Some(id))
    }

    pub(crate) fn write_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|row| {
            let mut cells = row.record.to_cells();
            cells.extend(row.extras.iter().cloned());
            cells
        })
    }

    fn checked_position(&self, position: usize) -> StoreResult<usize> {
        if position < self.rows.len() {
            Ok(position)
        } else {
            Err(StoreError::NotFound(Locator::Position {
                position,
                len: self.rows.len(),
            }))
        }
    }

    fn id_position(&self, id: RecordId) -> StoreResult<usize> {
        self.position_of(id)
            .ok_or(StoreError::NotFound(Locator::Id(id)))
    }
}

impl Dataset<Incident> {
    /// Replaces every mutable field of the row at `position`.
    pub fn update_at(&mut self, position: usize, fields: IncidentFields) -> StoreResult<()> {
        let position = self.checked_position(position)?;
        self.rows[position].record.apply(fields);
        Ok(())
    }

    /// Removes the row at `position`; later rows shift down by one.
    pub fn delete_at(&mut self, position: usize) -> StoreResult<Incident> {
        let position = self.checked_position(position)?;
        Ok(self.rows.remove(position).record)
    }

    /// Replaces the incident with `id`, returning its current position.
    pub fn update_by_id(&mut self, id: RecordId, fields: IncidentFields) -> StoreResult<usize> {
        let position = self.id_position(id)?;
        self.update_at(position, fields)?;
        Ok(position)
    }

    pub fn delete_by_id(&mut self, id: RecordId) -> StoreResult<Incident> {
        let position = self.id_position(id)?;
        self.delete_at(position)
    }

    pub fn summarize(&self) -> IncidentSummary {
        IncidentSummary::from_incidents(self.records())
    }
}

impl Dataset<Task> {
    /// Sets `status` on every task titled `title`.
    ///
    /// Titles are not unique, so several rows may change. Returns the number
    /// of rows updated.
    pub fn update_status_by_title(&mut self, title: &str, status: TaskStatus) -> StoreResult<usize> {
        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|row| row.record.title == title) {
            row.record.status = status;
            updated += 1;
        }
        if updated == 0 {
            return Err(StoreError::NotFound(Locator::Title(title.to_string())));
        }
        Ok(updated)
    }

    /// Tasks ordered by due date ascending; ties keep table order.
    pub fn sorted_by_due_date(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.records().collect();
        tasks.sort_by(|left, right| left.due_date.cmp(&right.due_date));
        tasks
    }

    /// Unique titles of tasks not yet finished, in first-appearance order.
    pub fn editable_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for task in self
            .records()
            .filter(|task| task.status != TaskStatus::Finished)
        {
            if !titles.contains(&task.title.as_str()) {
                titles.push(task.title.as_str());
            }
        }
        titles
    }

    pub fn summarize(&self) -> TaskSummary {
        TaskSummary::from_tasks(self.records())
    }
}

impl Dataset<SatisfactionResponse> {
    pub fn summarize(&self) -> SatisfactionSummary {
        SatisfactionSummary::from_responses(self.records())
    }
}
