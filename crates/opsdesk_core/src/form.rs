//! Transient form state owned by the presentation layer.
//!
//! # Responsibility
//! - Hold user input for one add/modify action.
//! - Check required-field presence and build the record to store.
//! - Reset to defaults after a successful submission.
//!
//! # Invariants
//! - `validate` never mutates the form.
//! - Only required-field presence is checked; content is stored as typed.

use crate::model::incident::{Incident, IncidentFields, IncidentStatus};
use crate::model::survey::{SatisfactionResponse, Score};
use crate::model::task::{Task, TaskStatus};
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A required form field was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "required field `{}` must not be blank", self.field)
    }
}

impl Error for ValidationError {}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError { field });
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Input for adding or modifying an incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentForm {
    pub name: String,
    /// Date text as stored. New forms start at today's ISO date; prefilled
    /// forms keep the stored cell verbatim, legacy formats included.
    pub date: String,
    pub description: String,
    pub status: IncidentStatus,
}

impl Default for IncidentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: format_date(today()),
            description: String::new(),
            status: IncidentStatus::Pending,
        }
    }
}

impl IncidentForm {
    /// Prefills the form from a stored incident for editing.
    pub fn from_incident(incident: &Incident) -> Self {
        Self {
            name: incident.name.clone(),
            date: incident.date.clone(),
            description: incident.description.clone(),
            status: incident.status,
        }
    }

    /// Requires `name` and `description`.
    pub fn validate(&self) -> Result<IncidentFields, ValidationError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        Ok(IncidentFields {
            name: self.name.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            status: self.status,
        })
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = format_date(date);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Input for one customer-satisfaction survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyForm {
    pub date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub email: String,
    pub design_score: Score,
    pub speed_score: Score,
    pub clarity_score: Score,
    pub overall_score: Score,
    pub comments: String,
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self {
            date: today(),
            first_name: String::new(),
            last_name: String::new(),
            second_last_name: String::new(),
            email: String::new(),
            design_score: Score::max(),
            speed_score: Score::max(),
            clarity_score: Score::max(),
            overall_score: Score::max(),
            comments: String::new(),
        }
    }
}

impl SurveyForm {
    /// Requires first name, last name and email.
    pub fn validate(&self) -> Result<SatisfactionResponse, ValidationError> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        Ok(SatisfactionResponse {
            date: format_date(self.date),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            second_last_name: self.second_last_name.clone(),
            email: self.email.clone(),
            design_score: Some(self.design_score),
            speed_score: Some(self.speed_score),
            clarity_score: Some(self.clarity_score),
            overall_score: Some(self.overall_score),
            comments: self.comments.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Input for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub created_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            created_date: today(),
            due_date: today(),
            status: TaskStatus::Pending,
        }
    }
}

impl TaskForm {
    /// Requires `title`. Each call builds a task with a new id.
    pub fn validate(&self) -> Result<Task, ValidationError> {
        require("title", &self.title)?;
        Ok(Task::new(
            self.title.clone(),
            self.description.clone(),
            format_date(self.created_date),
            format_date(self.due_date),
            self.status,
        ))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
