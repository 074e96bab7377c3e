//! Timetable variant metadata.
//!
//! Variants arrive from the external generation job with their statistics
//! and quality metrics already computed; this core consumes the numbers, it
//! never derives them. Entries are deliberately absent from the variant —
//! they are fetched on demand and live only in the session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::{JobId, VariantId};

/// Aggregate counts over a variant's schedule entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantStatistics {
    pub total_classes: u32,
    pub total_hours: f64,
    pub unique_subjects: u32,
    pub unique_faculty: u32,
    pub unique_rooms: u32,
}

/// Externally computed quality scores, all on a 0–100 scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Per-metric sub-scores keyed by metric name (e.g. "room_utilization").
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    pub overall_score: f64,
}

/// One candidate full timetable among several generated for a job.
///
/// Invariant: at most one variant per `job_id` has `is_selected = true`.
/// The flag is authored by the backend; this core only mirrors it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub job_id: JobId,
    /// Unique per job, assigned by the producer in generation order.
    pub variant_number: u32,
    /// Free-form optimization focus reported by the producer
    /// (e.g. "balanced", "faculty_preference").
    pub optimization_priority: String,
    #[serde(default)]
    pub statistics: VariantStatistics,
    #[serde(default)]
    pub quality_metrics: QualityMetrics,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_by: Option<String>,
}

impl Variant {
    /// Overall quality score, clamped to the documented 0–100 range.
    pub fn overall_score(&self) -> f64 {
        self.quality_metrics.overall_score.clamp(0.0, 100.0)
    }
}
