//! In-memory backend for local development and testing.
//!
//! `LocalBackend` stands in for the real review service. It enforces the
//! same server-side semantics the gateways document: exclusive variant
//! selection is a single atomic operation, approve/reject re-validate their
//! preconditions, reviews are append-only, and a failed mutation leaves
//! every record untouched.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::error::{BackendError, BackendResult, ErrorContext};
use super::gateway::{JobGateway, VariantGateway, WorkflowGateway};
use crate::api::{
    DepartmentId, Entry, JobId, JobState, Review, ReviewAction, Variant, VariantId, Workflow,
    WorkflowId, WorkflowStatus,
};

#[derive(Default)]
struct LocalState {
    jobs: HashMap<JobId, JobState>,
    workflows: HashMap<WorkflowId, Workflow>,
    workflow_by_job: HashMap<JobId, WorkflowId>,
    /// Variant lists keyed by job, in producer order.
    variants_by_job: HashMap<JobId, Vec<Variant>>,
    entries: HashMap<VariantId, Vec<Entry>>,
    reviews: Vec<Review>,
}

impl LocalState {
    fn job_for_variant(&self, variant_id: VariantId) -> Option<JobId> {
        self.variants_by_job.iter().find_map(|(job_id, variants)| {
            variants.iter().any(|v| v.id == variant_id).then_some(*job_id)
        })
    }
}

/// In-memory backend implementation.
#[derive(Clone, Default)]
pub struct LocalBackend {
    state: Arc<RwLock<LocalState>>,
}

impl LocalBackend {
    /// Create an empty local backend.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seeding helpers ====================

    /// Register a generation job with an initial state.
    pub fn seed_job(&self, job_id: JobId, state: JobState) {
        self.state.write().jobs.insert(job_id, state);
    }

    /// Update the reported state of a job.
    pub fn set_job_state(&self, job_id: JobId, state: JobState) {
        self.state.write().jobs.insert(job_id, state);
    }

    /// Store a workflow and index it by job.
    pub fn seed_workflow(&self, workflow: Workflow) {
        let mut state = self.state.write();
        state.workflow_by_job.insert(workflow.job_id, workflow.id);
        state.workflows.insert(workflow.id, workflow);
    }

    /// Append a variant to its job's list, preserving producer order.
    pub fn seed_variant(&self, variant: Variant) {
        self.state
            .write()
            .variants_by_job
            .entry(variant.job_id)
            .or_default()
            .push(variant);
    }

    /// Store the schedule entries of a variant.
    pub fn seed_entries(&self, variant_id: VariantId, entries: Vec<Entry>) {
        self.state.write().entries.insert(variant_id, entries);
    }

    /// Snapshot of the review audit log (test inspection).
    pub fn reviews(&self) -> Vec<Review> {
        self.state.read().reviews.clone()
    }

    fn append_review(
        state: &mut LocalState,
        workflow_id: WorkflowId,
        reviewer: &str,
        action: ReviewAction,
        comments: &str,
    ) {
        state
            .reviews
            .push(Review::new(workflow_id, reviewer, action, comments));
    }
}

#[async_trait]
impl JobGateway for LocalBackend {
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState> {
        self.state.read().jobs.get(&job_id).copied().ok_or_else(|| {
            BackendError::not_found_with_context(
                format!("Job {} not found", job_id),
                ErrorContext::new("fetch_job_state")
                    .with_entity("job")
                    .with_entity_id(job_id),
            )
        })
    }
}

#[async_trait]
impl WorkflowGateway for LocalBackend {
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow> {
        let state = self.state.read();
        state
            .workflow_by_job
            .get(&job_id)
            .and_then(|id| state.workflows.get(id))
            .cloned()
            .ok_or_else(|| {
                BackendError::not_found_with_context(
                    format!("No workflow for job {}", job_id),
                    ErrorContext::new("fetch_workflow_by_job")
                        .with_entity("workflow")
                        .with_entity_id(job_id),
                )
            })
    }

    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()> {
        let mut state = self.state.write();
        let workflow = state.workflows.get(&workflow_id).ok_or_else(|| {
            BackendError::not_found(format!("Workflow {} not found", workflow_id))
        })?;

        if !workflow.status.can_transition(WorkflowStatus::Approved) {
            return Err(BackendError::validation_with_context(
                format!("cannot approve a workflow in status '{}'", workflow.status),
                ErrorContext::new("approve_workflow").with_entity_id(workflow_id),
            ));
        }
        if workflow.selected_variant_id.is_none() {
            return Err(BackendError::validation_with_context(
                "no variant selected".to_string(),
                ErrorContext::new("approve_workflow").with_entity_id(workflow_id),
            ));
        }

        let workflow = state.workflows.get_mut(&workflow_id).unwrap();
        workflow.status = WorkflowStatus::Approved;
        workflow.submitted_at = Some(Utc::now());
        Self::append_review(&mut state, workflow_id, reviewer, ReviewAction::Approved, comments);
        Ok(())
    }

    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()> {
        let mut state = self.state.write();
        let workflow = state.workflows.get(&workflow_id).ok_or_else(|| {
            BackendError::not_found(format!("Workflow {} not found", workflow_id))
        })?;

        if !workflow.status.can_transition(WorkflowStatus::Rejected) {
            return Err(BackendError::validation_with_context(
                format!("cannot reject a workflow in status '{}'", workflow.status),
                ErrorContext::new("reject_workflow").with_entity_id(workflow_id),
            ));
        }
        if reason.trim().is_empty() {
            return Err(BackendError::validation_with_context(
                "a rejection reason is required".to_string(),
                ErrorContext::new("reject_workflow").with_entity_id(workflow_id),
            ));
        }

        let workflow = state.workflows.get_mut(&workflow_id).unwrap();
        workflow.status = WorkflowStatus::Rejected;
        workflow.submitted_at = Some(Utc::now());
        Self::append_review(&mut state, workflow_id, reviewer, ReviewAction::Rejected, reason);
        Ok(())
    }

    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>> {
        Ok(self
            .state
            .read()
            .reviews
            .iter()
            .filter(|r| r.workflow_id == workflow_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VariantGateway for LocalBackend {
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>> {
        Ok(self
            .state
            .read()
            .variants_by_job
            .get(&job_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>> {
        let state = self.state.read();
        let entries = state.entries.get(&variant_id).ok_or_else(|| {
            BackendError::not_found_with_context(
                format!("No entries for variant {}", variant_id),
                ErrorContext::new("fetch_variant_entries")
                    .with_entity("variant")
                    .with_entity_id(variant_id),
            )
        })?;

        let entries = match department {
            Some(dept) => entries
                .iter()
                .filter(|e| e.department_id == dept)
                .cloned()
                .collect(),
            None => entries.clone(),
        };
        Ok(entries)
    }

    async fn select_variant(
        &self,
        variant_id: VariantId,
        selected_by: &str,
    ) -> BackendResult<()> {
        let mut state = self.state.write();

        let job_id = state.job_for_variant(variant_id).ok_or_else(|| {
            BackendError::not_found_with_context(
                format!("Variant {} not found", variant_id),
                ErrorContext::new("select_variant")
                    .with_entity("variant")
                    .with_entity_id(variant_id),
            )
        })?;

        let workflow_id = state.workflow_by_job.get(&job_id).copied().ok_or_else(|| {
            BackendError::not_found(format!("No workflow for job {}", job_id))
        })?;
        let workflow = state.workflows.get(&workflow_id).unwrap();
        if !workflow.status.is_reviewable() {
            return Err(BackendError::validation_with_context(
                format!(
                    "variants can only be selected while the workflow is draft (current: '{}')",
                    workflow.status
                ),
                ErrorContext::new("select_variant").with_entity_id(variant_id),
            ));
        }

        // Exclusive selection: setting the target and clearing every sibling
        // happens under one write lock, so no reader ever observes two
        // selected variants for the same job.
        let now = Utc::now();
        for variant in state.variants_by_job.get_mut(&job_id).unwrap() {
            if variant.id == variant_id {
                variant.is_selected = true;
                variant.selected_at = Some(now);
                variant.selected_by = Some(selected_by.to_string());
            } else {
                variant.is_selected = false;
                variant.selected_at = None;
                variant.selected_by = None;
            }
        }
        let workflow = state.workflows.get_mut(&workflow_id).unwrap();
        workflow.selected_variant_id = Some(variant_id);

        Ok(())
    }
}
