//! Review session view data types.

use serde::{Deserialize, Serialize};

use crate::api::VariantId;
use crate::models::entry::Entry;
use crate::models::variant::Variant;
use crate::models::workflow::Workflow;

/// Everything a cold review-session load produces.
///
/// `entries` belongs to the active variant only; a `None` means the entry
/// fetch was skipped (no variants) or degraded (fetch failed), in which case
/// the variant cards still render from the metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub workflow: Workflow,
    pub variants: Vec<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_variant_id: Option<VariantId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Entry>>,
}

impl SessionSnapshot {
    /// The variant currently shown, when one is active.
    pub fn active_variant(&self) -> Option<&Variant> {
        let id = self.active_variant_id?;
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Route function name constants
pub const LOAD_REVIEW_SESSION: &str = "load_review_session";
pub const SELECT_VARIANT: &str = "select_variant";
pub const APPROVE_WORKFLOW: &str = "approve_workflow";
pub const REJECT_WORKFLOW: &str = "reject_workflow";
