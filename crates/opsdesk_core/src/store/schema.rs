//! Column schema and header resolution for tabular records.
//!
//! # Responsibility
//! - Describe each table's canonical columns, legacy aliases and defaults.
//! - Resolve a file header row against the canonical schema.
//!
//! # Invariants
//! - A canonical column absent from the file reads as its default value.
//! - Header cells matching no canonical column are kept as extra columns.

use crate::model::RecordId;

/// One canonical column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// Legacy header names accepted on load. Saves always use `name`.
    pub aliases: &'static [&'static str],
    /// Backfill value for a missing column or a blank cell.
    pub default: &'static str,
}

impl Column {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            default: "",
        }
    }

    pub const fn aliased(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn defaulted(self, default: &'static str) -> Self {
        Self { default, ..self }
    }

    fn matches(&self, header: &str) -> bool {
        self.name == header || self.aliases.contains(&header)
    }
}

/// A record type that lives in one tabular file.
pub trait TableRecord: Sized {
    /// Short table name used in log events.
    const TABLE: &'static str;
    /// File name inside the configured data directory.
    const FILE_NAME: &'static str;

    /// Canonical columns in persisted order.
    fn columns() -> &'static [Column];

    /// Builds a record from cells already aligned to `columns()`.
    fn from_cells(cells: &RowCells<'_>) -> Result<Self, String>;

    /// Serializes the record in `columns()` order.
    fn to_cells(&self) -> Vec<String>;

    /// Stable id for tables that carry one.
    fn record_id(&self) -> Option<RecordId> {
        None
    }
}

/// Cells of one row, aligned to the canonical columns with defaults applied.
#[derive(Debug)]
pub struct RowCells<'a> {
    position: usize,
    values: Vec<&'a str>,
}

impl<'a> RowCells<'a> {
    pub(crate) fn new(position: usize, values: Vec<&'a str>) -> Self {
        Self { position, values }
    }

    /// Zero-based data row position in the source file.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn values(&self) -> &[&'a str] {
        &self.values
    }

    pub fn get(&self, index: usize) -> &'a str {
        self.values.get(index).copied().unwrap_or("")
    }

    pub fn text(&self, index: usize) -> String {
        self.get(index).to_string()
    }
}

/// Mapping from a file's header row to canonical and extra columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderLayout {
    canonical: Vec<Option<usize>>,
    extras: Vec<(String, usize)>,
}

impl HeaderLayout {
    pub(crate) fn resolve<'h>(
        columns: &[Column],
        headers: impl IntoIterator<Item = &'h str>,
    ) -> Self {
        let mut canonical = vec![None; columns.len()];
        let mut extras = Vec::new();

        for (file_index, raw_header) in headers.into_iter().enumerate() {
            // Spreadsheet exports prepend a BOM to the first header.
            let header = raw_header.trim_start_matches('\u{feff}').trim();
            let slot = columns
                .iter()
                .enumerate()
                .position(|(index, column)| canonical[index].is_none() && column.matches(header));
            match slot {
                Some(index) => canonical[index] = Some(file_index),
                None => extras.push((header.to_string(), file_index)),
            }
        }

        Self { canonical, extras }
    }

    pub(crate) fn missing_columns<'c>(&self, columns: &'c [Column]) -> Vec<&'c str> {
        columns
            .iter()
            .zip(&self.canonical)
            .filter(|(_, slot)| slot.is_none())
            .map(|(column, _)| column.name)
            .collect()
    }

    pub(crate) fn extra_names(&self) -> Vec<String> {
        self.extras.iter().map(|(name, _)| name.clone()).collect()
    }

    pub(crate) fn cells<'a>(
        &self,
        columns: &[Column],
        position: usize,
        row: &'a csv::StringRecord,
    ) -> RowCells<'a> {
        let values = columns
            .iter()
            .zip(&self.canonical)
            .map(|(column, slot)| {
                let value = slot.and_then(|index| row.get(index)).unwrap_or("");
                if value.trim().is_empty() {
                    column.default
                } else {
                    value
                }
            })
            .collect();
        RowCells::new(position, values)
    }

    pub(crate) fn extra_cells(&self, row: &csv::StringRecord) -> Vec<String> {
        self.extras
            .iter()
            .map(|(_, index)| row.get(*index).unwrap_or("").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, HeaderLayout};

    static COLUMNS: [Column; 3] = [
        Column::new("Name").aliased(&["Nombre"]),
        Column::new("Date"),
        Column::new("Estado").defaulted("Pendiente"),
    ];

    #[test]
    fn resolve_matches_aliases_and_collects_extras() {
        let layout = HeaderLayout::resolve(&COLUMNS, ["\u{feff}Nombre", "Notas", "Date"]);
        assert_eq!(layout.missing_columns(&COLUMNS), vec!["Estado"]);
        assert_eq!(layout.extra_names(), vec!["Notas".to_string()]);

        let row = csv::StringRecord::from(vec!["Ana", "call back", "2024-01-01"]);
        let cells = layout.cells(&COLUMNS, 0, &row);
        assert_eq!(cells.get(0), "Ana");
        assert_eq!(cells.get(1), "2024-01-01");
        assert_eq!(cells.get(2), "Pendiente");
        assert_eq!(cells.position(), 0);
        assert_eq!(layout.extra_cells(&row), vec!["call back".to_string()]);
    }

    #[test]
    fn blank_cells_fall_back_to_column_default() {
        let layout = HeaderLayout::resolve(&COLUMNS, ["Name", "Date", "Estado"]);
        let row = csv::StringRecord::from(vec!["Ana", "2024-01-01", "  "]);
        assert_eq!(layout.cells(&COLUMNS, 0, &row).get(2), "Pendiente");
    }

    #[test]
    fn duplicate_canonical_header_is_kept_as_extra() {
        let layout = HeaderLayout::resolve(&COLUMNS, ["Name", "Nombre", "Date", "Estado"]);
        assert!(layout.missing_columns(&COLUMNS).is_empty());
        assert_eq!(layout.extra_names(), vec!["Nombre".to_string()]);
    }
}
