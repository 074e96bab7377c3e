//! Review session store and approval actions.
//!
//! `ReviewSession` holds the authoritative-mirrored state for one active
//! review: the workflow, its variant list and the active variant's entries.
//! Every mutation (select/approve/reject) is validated locally, delegated to
//! the backend, and followed by a re-fetch of workflow + variants — local
//! flags are never patched from the mutation response, so two racing
//! reviewers can never render two selected variants.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::{
    DayFilter, DepartmentFilter, Entry, GridData, JobId, Review, SessionSnapshot, Variant,
    VariantId, Workflow, WorkflowStatus,
};
use crate::backend::{BackendError, FetchConfig, FullBackend};
use crate::services::grid::build_grid;
use crate::services::loader::{load_review_session, timed, LoadError};

/// Error raised by a review action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A precondition failed locally; nothing was sent to the backend.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend refused or could not be reached; committed local state
    /// is unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ActionError {
    /// Whether retrying the action may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_retryable(),
            Self::Validation(_) => false,
        }
    }
}

#[derive(Default)]
struct SessionState {
    workflow: Option<Workflow>,
    variants: Vec<Variant>,
    active_variant_id: Option<VariantId>,
    /// Entries of the active variant; `None` while loading or degraded.
    entries: Option<Vec<Entry>>,
    /// Monotonic token guarding entry fetches: a response commits only if
    /// no newer request started in the meantime (latest-request-wins).
    entries_generation: u64,
}

/// Store for one active review session.
#[derive(Clone)]
pub struct ReviewSession {
    backend: Arc<dyn FullBackend>,
    config: FetchConfig,
    state: Arc<RwLock<SessionState>>,
}

impl ReviewSession {
    /// Create an empty session bound to a backend.
    pub fn new(backend: Arc<dyn FullBackend>, config: FetchConfig) -> Self {
        Self {
            backend,
            config,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Cold-load the session for a generation job (two round trips).
    pub async fn load(&self, job_id: JobId) -> Result<(), LoadError> {
        let snapshot = load_review_session(&self.backend, job_id, &self.config).await?;

        let mut state = self.state.write();
        state.workflow = Some(snapshot.workflow);
        state.variants = snapshot.variants;
        state.active_variant_id = snapshot.active_variant_id;
        state.entries = snapshot.entries;
        // Invalidate any entry fetch still in flight from a previous load.
        state.entries_generation += 1;
        Ok(())
    }

    // ==================== Read accessors ====================

    /// Current workflow, when a session is loaded.
    pub fn workflow(&self) -> Option<Workflow> {
        self.state.read().workflow.clone()
    }

    /// Current variant list, in producer order.
    pub fn variants(&self) -> Vec<Variant> {
        self.state.read().variants.clone()
    }

    /// The variant whose entries the grid renders.
    pub fn active_variant(&self) -> Option<Variant> {
        let state = self.state.read();
        let id = state.active_variant_id?;
        state.variants.iter().find(|v| v.id == id).cloned()
    }

    /// Full snapshot of the mirrored state, when a session is loaded.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let state = self.state.read();
        Some(SessionSnapshot {
            workflow: state.workflow.clone()?,
            variants: state.variants.clone(),
            active_variant_id: state.active_variant_id,
            entries: state.entries.clone(),
        })
    }

    /// Build the grid view from the resident entries.
    pub fn grid(&self, day_filter: DayFilter, department_filter: DepartmentFilter) -> GridData {
        let state = self.state.read();
        match &state.entries {
            Some(entries) => build_grid(entries, day_filter, department_filter),
            None => build_grid(&[], day_filter, department_filter),
        }
    }

    // ==================== View actions ====================

    /// Switch the grid to another variant and fetch its entries.
    ///
    /// Concurrent activations race safely: each call bumps the generation
    /// token before fetching and commits only if the token is still current,
    /// so a stale, slower response can never overwrite the active variant's
    /// entries.
    pub async fn activate_variant(&self, variant_id: VariantId) -> Result<(), ActionError> {
        let generation = {
            let mut state = self.state.write();
            if !state.variants.iter().any(|v| v.id == variant_id) {
                return Err(ActionError::Validation(format!(
                    "unknown variant {}",
                    variant_id
                )));
            }
            state.active_variant_id = Some(variant_id);
            state.entries = None;
            state.entries_generation += 1;
            state.entries_generation
        };

        let fetched = timed(
            self.config.entries_timeout,
            "fetch_variant_entries",
            self.backend.fetch_variant_entries(variant_id, None),
        )
        .await;

        match fetched {
            Ok(entries) => {
                let mut state = self.state.write();
                if state.entries_generation == generation
                    && state.active_variant_id == Some(variant_id)
                {
                    state.entries = Some(entries);
                } else {
                    log::debug!(
                        "discarding stale entries response for variant {}",
                        variant_id
                    );
                }
                Ok(())
            }
            Err(e) => {
                // The variant card stays visible without its grid.
                log::warn!("entries fetch failed for variant {}: {}", variant_id, e);
                Err(ActionError::Backend(e))
            }
        }
    }

    // ==================== Review mutations ====================

    /// Select a variant as the one to approve.
    ///
    /// Legal only while the workflow is draft. The backend commits the
    /// exclusive selection atomically; afterwards the workflow and variant
    /// list are re-fetched so the mirrored `is_selected` flags come from
    /// authoritative state.
    pub async fn select_variant(
        &self,
        variant_id: VariantId,
        selected_by: &str,
    ) -> Result<(), ActionError> {
        {
            let state = self.state.read();
            let workflow = loaded_workflow(&state)?;
            if !workflow.status.is_reviewable() {
                return Err(ActionError::Validation(format!(
                    "variants can only be selected while the workflow is draft (current: '{}')",
                    workflow.status
                )));
            }
            if !state.variants.iter().any(|v| v.id == variant_id) {
                return Err(ActionError::Validation(format!(
                    "unknown variant {}",
                    variant_id
                )));
            }
        }

        timed(
            self.config.request_timeout,
            "select_variant",
            self.backend.select_variant(variant_id, selected_by),
        )
        .await?;

        log::info!("variant {} selected by {}", variant_id, selected_by);
        self.refresh().await
    }

    /// Approve the workflow (draft → approved).
    ///
    /// Requires a selected variant; fails with a validation error before any
    /// network call otherwise.
    pub async fn approve(&self, reviewer: &str, comments: &str) -> Result<(), ActionError> {
        let workflow_id = {
            let state = self.state.read();
            let workflow = loaded_workflow(&state)?;
            guard_transition(workflow, WorkflowStatus::Approved)?;
            if !workflow.has_selection() {
                return Err(ActionError::Validation("no variant selected".to_string()));
            }
            workflow.id
        };

        timed(
            self.config.request_timeout,
            "approve_workflow",
            self.backend.approve_workflow(workflow_id, reviewer, comments),
        )
        .await?;

        log::info!("workflow {} approved by {}", workflow_id, reviewer);
        self.refresh().await
    }

    /// Reject the workflow (draft → rejected) with a mandatory reason.
    pub async fn reject(&self, reviewer: &str, reason: &str) -> Result<(), ActionError> {
        if reason.trim().is_empty() {
            return Err(ActionError::Validation(
                "a rejection reason is required".to_string(),
            ));
        }
        let workflow_id = {
            let state = self.state.read();
            let workflow = loaded_workflow(&state)?;
            guard_transition(workflow, WorkflowStatus::Rejected)?;
            workflow.id
        };

        timed(
            self.config.request_timeout,
            "reject_workflow",
            self.backend.reject_workflow(workflow_id, reviewer, reason),
        )
        .await?;

        log::info!("workflow {} rejected by {}", workflow_id, reviewer);
        self.refresh().await
    }

    /// Fetch the append-only review audit log for the loaded workflow.
    pub async fn reviews(&self) -> Result<Vec<Review>, ActionError> {
        let workflow_id = {
            let state = self.state.read();
            loaded_workflow(&state)?.id
        };
        let reviews = timed(
            self.config.request_timeout,
            "fetch_reviews",
            self.backend.fetch_reviews(workflow_id),
        )
        .await?;
        Ok(reviews)
    }

    /// Re-fetch workflow + variant list and commit them as the new mirror.
    ///
    /// This is the only path by which mutation results reach local state.
    async fn refresh(&self) -> Result<(), ActionError> {
        let job_id = {
            let state = self.state.read();
            loaded_workflow(&state)?.job_id
        };

        let limit = self.config.request_timeout;
        let (workflow, variants) = tokio::join!(
            timed(limit, "fetch_workflow_by_job", self.backend.fetch_workflow_by_job(job_id)),
            timed(limit, "list_variants", self.backend.list_variants(job_id)),
        );
        let workflow = workflow?;
        let variants = variants?;

        let mut state = self.state.write();
        state.workflow = Some(workflow);
        state.variants = variants;
        Ok(())
    }
}

fn loaded_workflow(state: &SessionState) -> Result<&Workflow, ActionError> {
    state
        .workflow
        .as_ref()
        .ok_or_else(|| ActionError::Validation("no review session loaded".to_string()))
}

/// Reviewer actions run from the draft state only; pending_review edges are
/// driven by the submission component outside this crate.
fn guard_transition(workflow: &Workflow, to: WorkflowStatus) -> Result<(), ActionError> {
    if !workflow.status.is_reviewable() || !workflow.status.can_transition(to) {
        return Err(ActionError::Validation(format!(
            "illegal transition '{}' -> '{}'",
            workflow.status, to
        )));
    }
    Ok(())
}

/// Re-export so callers matching on load failures need one import.
pub use crate::services::loader::LoadError as SessionLoadError;
