//! Grid view data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::DepartmentId;
use crate::models::entry::Entry;

/// Day filter applied before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    All,
    Day(u8),
}

impl DayFilter {
    pub fn matches(self, day: u8) -> bool {
        match self {
            Self::All => true,
            Self::Day(d) => d == day,
        }
    }
}

/// Department filter applied before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentFilter {
    All,
    Department(DepartmentId),
}

impl DepartmentFilter {
    pub fn matches(self, department: DepartmentId) -> bool {
        match self {
            Self::All => true,
            Self::Department(d) => d == department,
        }
    }
}

/// One legend item per distinct subject in the filtered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendItem {
    pub subject_code: String,
    pub subject_name: String,
    /// Stable palette color class derived from the subject code.
    pub color: String,
    pub palette_index: usize,
}

/// A flagged entry that could not be placed on the grid.
///
/// Raised when an entry carries neither explicit times nor a slot code.
/// These degrade the grid, they never abort its construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataShapeIssue {
    pub day: u8,
    pub subject_code: String,
    pub reason: String,
}

/// Distinguishes an empty variant from filters that matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridOutcome {
    /// The variant has no entries at all ("nothing generated").
    NoEntries,
    /// Entries exist but none survived the active filters.
    NoMatches,
    /// At least one entry was placed on the grid.
    Populated,
}

/// The day × time-slot matrix used to render a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridData {
    /// Cells keyed `"{day}-{slot_label}"`. Multiplicity is preserved: a cell
    /// holding more than one entry is a conflict signal, never deduplicated.
    pub cells: BTreeMap<String, Vec<Entry>>,
    /// Distinct time-slot labels present, sorted ascending.
    pub time_slots: Vec<String>,
    /// Days to render, in order.
    pub days: Vec<u8>,
    /// One item per distinct subject, first-seen order.
    pub legend: Vec<LegendItem>,
    pub outcome: GridOutcome,
    /// Entries dropped for lacking any usable time label.
    pub dropped: Vec<DataShapeIssue>,
}

impl GridData {
    /// Cell key for a day and time-slot label.
    pub fn cell_key(day: u8, slot_label: &str) -> String {
        format!("{}-{}", day, slot_label)
    }

    /// Entries at a given day/slot, empty when the cell is unpopulated.
    pub fn cell(&self, day: u8, slot_label: &str) -> &[Entry] {
        self.cells
            .get(&Self::cell_key(day, slot_label))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of populated cells.
    pub fn populated_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Route function name constant
pub const BUILD_GRID: &str = "build_grid";
