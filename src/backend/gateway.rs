//! Gateway traits for the consumed backend interfaces.
//!
//! These traits are the crate's only view of the outside world: job status,
//! workflow metadata, variant listings and entries, and the three mutations
//! (select/approve/reject). Mutations are committed server-side as atomic
//! operations; callers are expected to re-fetch after a successful call
//! rather than patch mirrored state from the response.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

use async_trait::async_trait;

use super::error::BackendResult;
use crate::api::{DepartmentId, Entry, JobId, JobState, Review, Variant, VariantId, Workflow, WorkflowId};

/// Gateway for generation-job status lookups.
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Fetch the current state of a generation job.
    ///
    /// # Returns
    /// * `Ok(JobState)` - Current producer-reported state
    /// * `Err(BackendError)` - NotFound if the job is unknown
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState>;
}

/// Gateway for workflow metadata and review mutations.
#[async_trait]
pub trait WorkflowGateway: Send + Sync {
    /// Fetch the workflow wrapping a generation job's outcome.
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow>;

    /// Approve a workflow, appending a review record.
    ///
    /// Legal only while the workflow is draft and a variant has been
    /// selected; the backend enforces both preconditions again.
    ///
    /// # Arguments
    /// * `workflow_id` - The workflow to approve
    /// * `reviewer` - Identity of the acting reviewer
    /// * `comments` - Free-form approval comments (may be empty)
    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()>;

    /// Reject a workflow, appending a review record.
    ///
    /// Legal only while the workflow is draft; `reason` must be non-empty.
    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()>;

    /// Fetch the append-only review audit log for a workflow.
    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>>;
}

/// Gateway for variant listings, entries and selection.
#[async_trait]
pub trait VariantGateway: Send + Sync {
    /// List the variants generated for a job, metadata only — entries are
    /// never included in the listing.
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>>;

    /// Fetch the schedule entries of one variant, optionally scoped to a
    /// department.
    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>>;

    /// Commit exclusive selection of a variant.
    ///
    /// The backend performs this as a single atomic operation: the target
    /// variant's `is_selected` is set, every sibling sharing the job is
    /// cleared, and the owning workflow's `selected_variant_id` is updated.
    async fn select_variant(&self, variant_id: VariantId, selected_by: &str)
        -> BackendResult<()>;
}

/// Combined gateway over every consumed interface.
pub trait FullBackend: JobGateway + WorkflowGateway + VariantGateway {}

impl<T: JobGateway + WorkflowGateway + VariantGateway> FullBackend for T {}
