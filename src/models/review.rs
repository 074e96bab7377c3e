//! Review audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::WorkflowId;

/// Action recorded by a review entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approved,
    Rejected,
    RevisionRequested,
}

/// Append-only audit record created by approve/reject.
///
/// Reviews are never mutated after creation; the backend only ever appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub workflow_id: WorkflowId,
    pub reviewer: String,
    pub action: ReviewAction,
    #[serde(default)]
    pub comments: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new audit record stamped with the current time.
    pub fn new(
        workflow_id: WorkflowId,
        reviewer: impl Into<String>,
        action: ReviewAction,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            reviewer: reviewer.into(),
            action,
            comments: comments.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_action_serialization() {
        let json = serde_json::to_string(&ReviewAction::RevisionRequested).unwrap();
        assert_eq!(json, "\"revision_requested\"");
    }

    #[test]
    fn test_new_review_gets_unique_id() {
        let a = Review::new(WorkflowId::new(1), "alex", ReviewAction::Approved, "");
        let b = Review::new(WorkflowId::new(1), "alex", ReviewAction::Approved, "");
        assert_ne!(a.id, b.id);
        assert_eq!(a.workflow_id, b.workflow_id);
    }
}
