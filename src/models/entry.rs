//! Schedule entry model and tolerant JSON parsing.
//!
//! Entries arrive from the generation pipeline in slightly heterogeneous
//! shapes: some carry explicit start/end times, older producers only emit a
//! pre-defined slot code, and the day index shows up both as a number and as
//! a numeric string. Parsing normalizes all of that; an entry that carries
//! neither explicit times nor a slot code is still accepted here and dealt
//! with by the grid builder, which drops it with a flagged issue.

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::DepartmentId;

/// Working days covered by a timetable, Monday (0) through Friday (4).
pub const WEEK_DAYS: [u8; 5] = [0, 1, 2, 3, 4];

/// Fallback duration when the producer omits one.
const DEFAULT_DURATION_MINUTES: u32 = 60;

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// A single scheduled class occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Day index, 0–4 (Monday–Friday).
    #[serde(deserialize_with = "de_day")]
    pub day: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Pre-supplied slot code used when explicit times are absent.
    #[serde(default, alias = "time_slot", skip_serializing_if = "Option::is_none")]
    pub slot_code: Option<String>,
    pub subject_code: String,
    #[serde(default)]
    pub subject_name: String,
    pub faculty_id: String,
    #[serde(default)]
    pub faculty_name: String,
    pub batch_id: String,
    #[serde(default)]
    pub batch_name: String,
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
    pub department_id: DepartmentId,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

impl Entry {
    /// Time-slot label used as the grid column key.
    ///
    /// Prefers `"{start}-{end}"` when both explicit times are present, falls
    /// back to the slot code, and returns `None` when neither is available
    /// (the data-shape failure the grid builder flags).
    pub fn slot_label(&self) -> Option<String> {
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Some(format!("{}-{}", start, end)),
            _ => self.slot_code.clone(),
        }
    }

    /// Display name helpers: fall back to the raw code/id when the producer
    /// omitted the pretty name.
    pub fn subject_display(&self) -> &str {
        if self.subject_name.is_empty() {
            &self.subject_code
        } else {
            &self.subject_name
        }
    }

    pub fn faculty_display(&self) -> &str {
        if self.faculty_name.is_empty() {
            &self.faculty_id
        } else {
            &self.faculty_name
        }
    }

    pub fn room_display(&self) -> &str {
        if self.room_name.is_empty() {
            &self.room_id
        } else {
            &self.room_name
        }
    }
}

/// Accept the day index as a JSON number or a numeric string.
fn de_day<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let day = match &value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid day index: {}", n)))?,
        serde_json::Value::String(s) => s
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid day index: {:?}", s)))?,
        other => return Err(D::Error::custom(format!("invalid day value: {}", other))),
    };

    if day > 4 {
        return Err(D::Error::custom(format!(
            "day index {} out of range (expected 0-4)",
            day
        )));
    }
    Ok(day as u8)
}

/// Parse a JSON array of schedule entries.
pub fn parse_entries_json_str(json: &str) -> Result<Vec<Entry>, EntryParseError> {
    let entries: Vec<Entry> =
        serde_json::from_str(json).map_err(|e| EntryParseError::Json(e.to_string()))?;
    Ok(entries)
}

/// Error raised when an upstream entry payload cannot be parsed at all.
#[derive(Debug, thiserror::Error)]
pub enum EntryParseError {
    #[error("failed to parse entries JSON: {0}")]
    Json(String),
}
