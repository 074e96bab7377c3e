//! Workflow lifecycle model and transition rules.
//!
//! A workflow wraps the outcome of one generation job for a department and
//! semester. Its status moves through a closed set of states; every edge is
//! encoded in [`WorkflowStatus::can_transition`] so guard logic cannot
//! silently drift from the lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{DepartmentId, JobId, OrganizationId, VariantId, WorkflowId};

/// Workflow status enumeration.
///
/// This core only executes `Draft → Approved` and `Draft → Rejected`.
/// `PendingReview` and `Published` are reachable through the submission and
/// publishing components outside this crate, but are modeled here so status
/// handling stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Generated and awaiting reviewer action.
    Draft,
    /// Submitted for a second-stage review.
    PendingReview,
    /// Accepted by a reviewer — terminal for this core.
    Approved,
    /// Declined by a reviewer; regeneration happens externally.
    Rejected,
    /// Approved and visible to end users.
    Published,
}

impl WorkflowStatus {
    /// Whether a reviewer may still act on the workflow.
    pub fn is_reviewable(self) -> bool {
        self == Self::Draft
    }

    /// Whether this is a terminal state (no further transitions allowed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Published)
    }

    /// Legal transitions between workflow states.
    ///
    /// The transition table encodes the valid edges in the state graph:
    /// ```text
    /// Draft → PendingReview | Approved | Rejected
    /// PendingReview → Approved | Rejected
    /// Approved → Published
    /// Rejected → (none; regeneration is an external workflow)
    /// Published → (none)
    /// ```
    pub fn can_transition(self, to: WorkflowStatus) -> bool {
        use WorkflowStatus::*;

        matches!(
            (self, to),
            (Draft, PendingReview)
                | (Draft, Approved)
                | (Draft, Rejected)
                | (PendingReview, Approved)
                | (PendingReview, Rejected)
                | (Approved, Published)
        )
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Published => "published",
        };
        write!(f, "{}", name)
    }
}

/// The reviewable unit wrapping one generation job's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub job_id: JobId,
    pub organization_id: OrganizationId,
    pub department_id: DepartmentId,
    pub semester: u8,
    pub academic_year: String,
    pub status: WorkflowStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Stamped when the workflow leaves Draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Invariant: when set, references a variant with the same `job_id`.
    #[serde(default)]
    pub selected_variant_id: Option<VariantId>,
}

impl Workflow {
    /// Whether a variant has been chosen for this workflow.
    pub fn has_selection(&self) -> bool {
        self.selected_variant_id.is_some()
    }
}
