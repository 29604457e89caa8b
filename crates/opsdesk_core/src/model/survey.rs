//! Customer-satisfaction survey response.
//!
//! # Responsibility
//! - Define the survey row and the bounded `Score` value.
//! - Map responses to the localized satisfaction table.
//!
//! # Invariants
//! - A present score is always within `1..=10`.
//! - Responses are append-only; they carry no stable id.

use super::normalize_date_cell;
use crate::store::schema::{Column, RowCells, TableRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE: usize = 0;
const FIRST_NAME: usize = 1;
const LAST_NAME: usize = 2;
const SECOND_LAST_NAME: usize = 3;
const EMAIL: usize = 4;
const DESIGN: usize = 5;
const SPEED: usize = 6;
const CLARITY: usize = 7;
const OVERALL: usize = 8;
const COMMENTS: usize = 9;

static SURVEY_COLUMNS: [Column; 10] = [
    Column::new("Fecha"),
    Column::new("Nombre"),
    Column::new("Apellido"),
    Column::new("Apellido2"),
    Column::new("Correo Electronico"),
    Column::new("Diseño web"),
    Column::new("Velocidad de carga"),
    Column::new("Claridad a la navegación"),
    Column::new("Puntuación"),
    Column::new("Opiniones"),
];

/// Survey score in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Highest score; the default selection on a fresh survey form.
    pub const fn max() -> Self {
        Self(Self::MAX)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "score {value} out of range {}..={}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Score {
    type Err = String;

    /// Parses `8` as well as float exports such as `8.0`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(integer) = trimmed.parse::<u8>() {
            return Self::try_from(integer);
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.fract() == 0.0 && (0.0..=255.0).contains(&float) => {
                Self::try_from(float as u8)
            }
            _ => Err(format!("invalid score `{trimmed}`")),
        }
    }
}

/// One row of the satisfaction table.
///
/// Scores are optional only for legacy rows with blank cells; new responses
/// always carry all four.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionResponse {
    pub date: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub email: String,
    pub design_score: Option<Score>,
    pub speed_score: Option<Score>,
    pub clarity_score: Option<Score>,
    pub overall_score: Option<Score>,
    pub comments: String,
}

fn parse_score_cell(cells: &RowCells<'_>, index: usize) -> Result<Option<Score>, String> {
    let value = cells.get(index).trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<Score>()
        .map(Some)
        .map_err(|err| format!("{err} in {}", SURVEY_COLUMNS[index].name))
}

fn score_cell(score: Option<Score>) -> String {
    score.map(|score| score.to_string()).unwrap_or_default()
}

impl TableRecord for SatisfactionResponse {
    const TABLE: &'static str = "satisfaction";
    const FILE_NAME: &'static str = "satisfaccion.csv";

    fn columns() -> &'static [Column] {
        &SURVEY_COLUMNS
    }

    fn from_cells(cells: &RowCells<'_>) -> Result<Self, String> {
        Ok(Self {
            date: normalize_date_cell(cells.get(DATE)),
            first_name: cells.text(FIRST_NAME),
            last_name: cells.text(LAST_NAME),
            second_last_name: cells.text(SECOND_LAST_NAME),
            email: cells.text(EMAIL),
            design_score: parse_score_cell(cells, DESIGN)?,
            speed_score: parse_score_cell(cells, SPEED)?,
            clarity_score: parse_score_cell(cells, CLARITY)?,
            overall_score: parse_score_cell(cells, OVERALL)?,
            comments: cells.text(COMMENTS),
        })
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.second_last_name.clone(),
            self.email.clone(),
            score_cell(self.design_score),
            score_cell(self.speed_score),
            score_cell(self.clarity_score),
            score_cell(self.overall_score),
            self.comments.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn score_rejects_out_of_range_values() {
        assert!(Score::new(0).is_none());
        assert!(Score::new(11).is_none());
        assert_eq!(Score::new(7).map(Score::get), Some(7));
    }

    #[test]
    fn score_parses_float_exports() {
        assert_eq!("8.0".parse::<Score>().map(Score::get), Ok(8));
        assert_eq!(" 10 ".parse::<Score>().map(Score::get), Ok(10));
        assert!("7.5".parse::<Score>().is_err());
        assert!("12".parse::<Score>().is_err());
        assert!("great".parse::<Score>().is_err());
    }
}
