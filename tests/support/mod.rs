//! Shared fixtures and instrumented backend wrappers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use ttr_rust::api::{
    DepartmentId, Entry, JobId, JobState, OrganizationId, Review, Variant, VariantId, Workflow,
    WorkflowId, WorkflowStatus,
};
use ttr_rust::backend::{
    BackendError, BackendResult, FullBackend, JobGateway, LocalBackend, VariantGateway,
    WorkflowGateway,
};
use ttr_rust::models::variant::{QualityMetrics, VariantStatistics};

pub const JOB: JobId = JobId(10);
pub const WORKFLOW: WorkflowId = WorkflowId(1);
pub const DEPT: DepartmentId = DepartmentId(3);

pub fn make_workflow(status: WorkflowStatus, selected: Option<VariantId>) -> Workflow {
    Workflow {
        id: WORKFLOW,
        job_id: JOB,
        organization_id: OrganizationId(1),
        department_id: DEPT,
        semester: 5,
        academic_year: "2025-26".to_string(),
        status,
        created_by: "scheduler-bot".to_string(),
        created_at: Utc::now(),
        submitted_at: None,
        published_at: None,
        selected_variant_id: selected,
    }
}

pub fn make_variant(id: i64, number: u32) -> Variant {
    Variant {
        id: VariantId(id),
        job_id: JOB,
        variant_number: number,
        optimization_priority: "balanced".to_string(),
        statistics: VariantStatistics {
            total_classes: 24,
            total_hours: 30.0,
            unique_subjects: 6,
            unique_faculty: 5,
            unique_rooms: 4,
        },
        quality_metrics: QualityMetrics {
            scores: Default::default(),
            overall_score: 80.0 + number as f64,
        },
        is_selected: false,
        selected_at: None,
        selected_by: None,
    }
}

pub fn make_entry(day: u8, start: &str, end: &str, subject: &str) -> Entry {
    Entry {
        day,
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        slot_code: None,
        subject_code: subject.to_string(),
        subject_name: String::new(),
        faculty_id: "F-1".to_string(),
        faculty_name: String::new(),
        batch_id: "B-1".to_string(),
        batch_name: String::new(),
        room_id: "R-101".to_string(),
        room_name: String::new(),
        department_id: DEPT,
        duration_minutes: 60,
    }
}

/// A completed job with a draft workflow and three variants, none selected.
/// Each variant carries one entry tagged with its own subject so tests can
/// tell whose entries are resident.
pub fn seeded_backend() -> LocalBackend {
    let backend = LocalBackend::new();
    backend.seed_job(JOB, JobState::Completed);
    backend.seed_workflow(make_workflow(WorkflowStatus::Draft, None));
    for (id, number) in [(101, 1), (102, 2), (103, 3)] {
        backend.seed_variant(make_variant(id, number));
        backend.seed_entries(
            VariantId(id),
            vec![make_entry(0, "09:00", "10:00", &format!("SUBJ-V{}", number))],
        );
    }
    backend
}

// =============================================================================
// Instrumented wrappers
// =============================================================================

/// Counts every gateway call, delegating to the wrapped backend.
pub struct CountingBackend {
    pub inner: Arc<dyn FullBackend>,
    pub job_state_calls: AtomicUsize,
    pub workflow_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub entries_calls: AtomicUsize,
}

impl CountingBackend {
    pub fn new(inner: Arc<dyn FullBackend>) -> Self {
        Self {
            inner,
            job_state_calls: AtomicUsize::new(0),
            workflow_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            entries_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl JobGateway for CountingBackend {
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState> {
        self.job_state_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_job_state(job_id).await
    }
}

#[async_trait]
impl WorkflowGateway for CountingBackend {
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow> {
        self.workflow_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_workflow_by_job(job_id).await
    }

    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()> {
        self.inner.approve_workflow(workflow_id, reviewer, comments).await
    }

    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()> {
        self.inner.reject_workflow(workflow_id, reviewer, reason).await
    }

    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>> {
        self.inner.fetch_reviews(workflow_id).await
    }
}

#[async_trait]
impl VariantGateway for CountingBackend {
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_variants(job_id).await
    }

    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>> {
        self.entries_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_variant_entries(variant_id, department).await
    }

    async fn select_variant(&self, variant_id: VariantId, selected_by: &str) -> BackendResult<()> {
        self.inner.select_variant(variant_id, selected_by).await
    }
}

/// Delays entry fetches per variant, delegating everything else unchanged.
/// Used to force the slow-A / fast-B race.
pub struct DelayedEntriesBackend {
    pub inner: Arc<dyn FullBackend>,
    pub delays: HashMap<VariantId, Duration>,
}

impl DelayedEntriesBackend {
    pub fn new(inner: Arc<dyn FullBackend>, delays: HashMap<VariantId, Duration>) -> Self {
        Self { inner, delays }
    }
}

#[async_trait]
impl JobGateway for DelayedEntriesBackend {
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState> {
        self.inner.fetch_job_state(job_id).await
    }
}

#[async_trait]
impl WorkflowGateway for DelayedEntriesBackend {
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow> {
        self.inner.fetch_workflow_by_job(job_id).await
    }

    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()> {
        self.inner.approve_workflow(workflow_id, reviewer, comments).await
    }

    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()> {
        self.inner.reject_workflow(workflow_id, reviewer, reason).await
    }

    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>> {
        self.inner.fetch_reviews(workflow_id).await
    }
}

#[async_trait]
impl VariantGateway for DelayedEntriesBackend {
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>> {
        self.inner.list_variants(job_id).await
    }

    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>> {
        if let Some(delay) = self.delays.get(&variant_id) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.fetch_variant_entries(variant_id, department).await
    }

    async fn select_variant(&self, variant_id: VariantId, selected_by: &str) -> BackendResult<()> {
        self.inner.select_variant(variant_id, selected_by).await
    }
}

/// Fails a chosen operation with a chosen error, delegating the rest.
pub enum Failure {
    WorkflowFetch(fn() -> BackendError),
    Entries(fn() -> BackendError),
    Select(fn() -> BackendError),
}

pub struct FailingBackend {
    pub inner: Arc<dyn FullBackend>,
    pub failure: Failure,
}

impl FailingBackend {
    pub fn new(inner: Arc<dyn FullBackend>, failure: Failure) -> Self {
        Self { inner, failure }
    }
}

#[async_trait]
impl JobGateway for FailingBackend {
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState> {
        self.inner.fetch_job_state(job_id).await
    }
}

#[async_trait]
impl WorkflowGateway for FailingBackend {
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow> {
        if let Failure::WorkflowFetch(make) = &self.failure {
            return Err(make());
        }
        self.inner.fetch_workflow_by_job(job_id).await
    }

    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()> {
        self.inner.approve_workflow(workflow_id, reviewer, comments).await
    }

    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()> {
        self.inner.reject_workflow(workflow_id, reviewer, reason).await
    }

    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>> {
        self.inner.fetch_reviews(workflow_id).await
    }
}

#[async_trait]
impl VariantGateway for FailingBackend {
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>> {
        self.inner.list_variants(job_id).await
    }

    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>> {
        if let Failure::Entries(make) = &self.failure {
            return Err(make());
        }
        self.inner.fetch_variant_entries(variant_id, department).await
    }

    async fn select_variant(&self, variant_id: VariantId, selected_by: &str) -> BackendResult<()> {
        if let Failure::Select(make) = &self.failure {
            return Err(make());
        }
        self.inner.select_variant(variant_id, selected_by).await
    }
}

/// Sleeps before every call to simulate a cold backend.
pub struct SlowBackend {
    pub inner: Arc<dyn FullBackend>,
    pub delay: Duration,
}

impl SlowBackend {
    pub fn new(inner: Arc<dyn FullBackend>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl JobGateway for SlowBackend {
    async fn fetch_job_state(&self, job_id: JobId) -> BackendResult<JobState> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_job_state(job_id).await
    }
}

#[async_trait]
impl WorkflowGateway for SlowBackend {
    async fn fetch_workflow_by_job(&self, job_id: JobId) -> BackendResult<Workflow> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_workflow_by_job(job_id).await
    }

    async fn approve_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        comments: &str,
    ) -> BackendResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.approve_workflow(workflow_id, reviewer, comments).await
    }

    async fn reject_workflow(
        &self,
        workflow_id: WorkflowId,
        reviewer: &str,
        reason: &str,
    ) -> BackendResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.reject_workflow(workflow_id, reviewer, reason).await
    }

    async fn fetch_reviews(&self, workflow_id: WorkflowId) -> BackendResult<Vec<Review>> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_reviews(workflow_id).await
    }
}

#[async_trait]
impl VariantGateway for SlowBackend {
    async fn list_variants(&self, job_id: JobId) -> BackendResult<Vec<Variant>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_variants(job_id).await
    }

    async fn fetch_variant_entries(
        &self,
        variant_id: VariantId,
        department: Option<DepartmentId>,
    ) -> BackendResult<Vec<Entry>> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_variant_entries(variant_id, department).await
    }

    async fn select_variant(&self, variant_id: VariantId, selected_by: &str) -> BackendResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_variant(variant_id, selected_by).await
    }
}
