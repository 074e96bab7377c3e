//! Domain model for the review core.
//!
//! The model mirrors what the backend stores: a [`workflow::Workflow`] wraps
//! one generation job's outcome, each job carries several
//! [`variant::Variant`] candidates, and every variant expands into flat
//! schedule [`entry::Entry`] rows fetched on demand. Review records are an
//! append-only audit trail.

pub mod entry;
pub mod job;
pub mod review;
pub mod variant;
pub mod workflow;

pub use entry::{parse_entries_json_str, Entry};
pub use job::JobState;
pub use review::{Review, ReviewAction};
pub use variant::{QualityMetrics, Variant, VariantStatistics};
pub use workflow::{Workflow, WorkflowStatus};
