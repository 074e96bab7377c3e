//! Grid construction service.
//!
//! Turns a variant's flat entry list into the day × time-slot matrix the
//! review page renders: filter by department, then by day, group by
//! `(day, slot_label)` preserving multiplicity, derive the sorted time-slot
//! axis and a legend with stable palette colors.

use std::collections::BTreeMap;

use crate::api::{DataShapeIssue, DayFilter, DepartmentFilter, GridData, GridOutcome, LegendItem};
use crate::models::entry::{Entry, WEEK_DAYS};
use crate::services::palette;

/// Build the renderable grid for one variant's entries.
///
/// Pure transformation: same inputs always produce the same grid. Entries
/// lacking both explicit times and a slot code are dropped and flagged in
/// `dropped`; they never abort construction. An empty input yields
/// `GridOutcome::NoEntries`, while a non-empty input whose entries all fail
/// the filters yields `GridOutcome::NoMatches` — callers render the two
/// differently.
pub fn build_grid(
    entries: &[Entry],
    day_filter: DayFilter,
    department_filter: DepartmentFilter,
) -> GridData {
    let days: Vec<u8> = match day_filter {
        DayFilter::All => WEEK_DAYS.to_vec(),
        DayFilter::Day(d) => vec![d],
    };

    if entries.is_empty() {
        return GridData {
            cells: BTreeMap::new(),
            time_slots: vec![],
            days,
            legend: vec![],
            outcome: GridOutcome::NoEntries,
            dropped: vec![],
        };
    }

    // Department first, then day; "all" skips the pass entirely.
    let filtered: Vec<&Entry> = entries
        .iter()
        .filter(|e| department_filter.matches(e.department_id))
        .filter(|e| day_filter.matches(e.day))
        .collect();

    if filtered.is_empty() {
        return GridData {
            cells: BTreeMap::new(),
            time_slots: vec![],
            days,
            legend: vec![],
            outcome: GridOutcome::NoMatches,
            dropped: vec![],
        };
    }

    let mut cells: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    let mut time_slots: Vec<String> = Vec::new();
    let mut legend: Vec<LegendItem> = Vec::new();
    let mut dropped: Vec<DataShapeIssue> = Vec::new();

    for entry in filtered {
        let label = match entry.slot_label() {
            Some(label) => label,
            None => {
                log::warn!(
                    "dropping entry (day {}, subject {}): no explicit times and no slot code",
                    entry.day,
                    entry.subject_code
                );
                dropped.push(DataShapeIssue {
                    day: entry.day,
                    subject_code: entry.subject_code.clone(),
                    reason: "missing both explicit times and slot code".to_string(),
                });
                continue;
            }
        };

        if !time_slots.contains(&label) {
            time_slots.push(label.clone());
        }
        if !legend.iter().any(|item| item.subject_code == entry.subject_code) {
            legend.push(LegendItem {
                subject_code: entry.subject_code.clone(),
                subject_name: entry.subject_display().to_string(),
                color: palette::palette_color(&entry.subject_code).to_string(),
                palette_index: palette::palette_index(&entry.subject_code),
            });
        }

        cells
            .entry(GridData::cell_key(entry.day, &label))
            .or_default()
            .push(entry.clone());
    }

    time_slots.sort();

    let outcome = if cells.is_empty() {
        // Everything that passed the filters was malformed.
        GridOutcome::NoMatches
    } else {
        GridOutcome::Populated
    };

    GridData {
        cells,
        time_slots,
        days,
        legend,
        outcome,
        dropped,
    }
}
