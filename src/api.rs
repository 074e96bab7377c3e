//! Public API surface for the review core.
//!
//! This file consolidates the identifier newtypes and re-exports the DTO
//! types used by consumers. All types derive Serialize/Deserialize for JSON
//! serialization.

pub use crate::models::entry::Entry;
pub use crate::models::job::JobState;
pub use crate::models::review::Review;
pub use crate::models::review::ReviewAction;
pub use crate::models::variant::QualityMetrics;
pub use crate::models::variant::Variant;
pub use crate::models::variant::VariantStatistics;
pub use crate::models::workflow::Workflow;
pub use crate::models::workflow::WorkflowStatus;
pub use crate::routes::grid::DataShapeIssue;
pub use crate::routes::grid::DayFilter;
pub use crate::routes::grid::DepartmentFilter;
pub use crate::routes::grid::GridData;
pub use crate::routes::grid::GridOutcome;
pub use crate::routes::grid::LegendItem;
pub use crate::routes::session::SessionSnapshot;

use serde::{Deserialize, Serialize};

/// Workflow identifier (backend primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WorkflowId(pub i64);

/// Variant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantId(pub i64);

/// Generation job identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub i64);

/// Department identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub i64);

/// Organization identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub i64);

impl WorkflowId {
    pub fn new(value: i64) -> Self {
        WorkflowId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl VariantId {
    pub fn new(value: i64) -> Self {
        VariantId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl JobId {
    pub fn new(value: i64) -> Self {
        JobId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl DepartmentId {
    pub fn new(value: i64) -> Self {
        DepartmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl OrganizationId {
    pub fn new(value: i64) -> Self {
        OrganizationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<WorkflowId> for i64 {
    fn from(id: WorkflowId) -> Self {
        id.0
    }
}

impl From<VariantId> for i64 {
    fn from(id: VariantId) -> Self {
        id.0
    }
}
