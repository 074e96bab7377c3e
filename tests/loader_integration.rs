//! Integration tests for the two-round session fetch coordinator.

mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use ttr_rust::api::{JobId, JobState, VariantId, WorkflowStatus};
use ttr_rust::backend::{BackendError, FetchConfig, FullBackend, LocalBackend};
use ttr_rust::services::{load_review_session, LoadError};

use support::{
    make_variant, make_workflow, seeded_backend, CountingBackend, Failure, FailingBackend,
    SlowBackend, JOB,
};

fn as_backend(local: &LocalBackend) -> Arc<dyn FullBackend> {
    Arc::new(local.clone())
}

#[tokio::test]
async fn cold_load_takes_exactly_two_rounds() {
    let counting = Arc::new(CountingBackend::new(as_backend(&seeded_backend())));
    let backend: Arc<dyn FullBackend> = counting.clone();

    let snapshot = load_review_session(&backend, JOB, &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(counting.job_state_calls.load(Ordering::SeqCst), 1);
    assert_eq!(counting.workflow_calls.load(Ordering::SeqCst), 1);
    assert_eq!(counting.list_calls.load(Ordering::SeqCst), 1);
    // Round 2 fetches entries for exactly one variant.
    assert_eq!(counting.entries_calls.load(Ordering::SeqCst), 1);

    assert_eq!(snapshot.workflow.status, WorkflowStatus::Draft);
    assert_eq!(snapshot.variants.len(), 3);
    assert_eq!(snapshot.active_variant_id, Some(VariantId(101)));
    assert_eq!(snapshot.entries.unwrap()[0].subject_code, "SUBJ-V1");
}

#[tokio::test]
async fn previously_selected_variant_wins_over_list_order() {
    let local = seeded_backend();
    local.seed_workflow(make_workflow(WorkflowStatus::Draft, Some(VariantId(102))));

    let snapshot = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(snapshot.active_variant_id, Some(VariantId(102)));
    assert_eq!(snapshot.entries.unwrap()[0].subject_code, "SUBJ-V2");
}

#[tokio::test]
async fn stale_selection_falls_back_to_first_variant() {
    let local = seeded_backend();
    // Points at a variant the listing no longer contains.
    local.seed_workflow(make_workflow(WorkflowStatus::Draft, Some(VariantId(999))));

    let snapshot = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(snapshot.active_variant_id, Some(VariantId(101)));
}

#[tokio::test]
async fn unfinished_job_redirects_to_progress() {
    for state in [JobState::Queued, JobState::Running] {
        let local = seeded_backend();
        local.set_job_state(JOB, state);

        let err = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::StillGenerating(s) if s == state));
        assert!(!err.is_retryable());
    }
}

#[tokio::test]
async fn failed_job_still_loads_the_session() {
    // A failed job is finished; whatever workflow exists is still shown.
    let local = seeded_backend();
    local.set_job_state(JOB, JobState::Failed);

    let snapshot = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
        .await
        .unwrap();
    assert_eq!(snapshot.variants.len(), 3);
}

#[tokio::test]
async fn auth_failure_maps_to_auth_required() {
    let failing = FailingBackend::new(
        as_backend(&seeded_backend()),
        Failure::WorkflowFetch(|| BackendError::auth("token expired")),
    );
    let backend: Arc<dyn FullBackend> = Arc::new(failing);

    let err = load_review_session(&backend, JOB, &FetchConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::AuthRequired));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unknown_job_maps_to_not_found() {
    let local = seeded_backend();

    let err = load_review_session(&as_backend(&local), JobId(999), &FetchConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[tokio::test]
async fn entries_failure_degrades_instead_of_failing() {
    let failing = FailingBackend::new(
        as_backend(&seeded_backend()),
        Failure::Entries(|| BackendError::connection("connection reset")),
    );
    let backend: Arc<dyn FullBackend> = Arc::new(failing);

    let snapshot = load_review_session(&backend, JOB, &FetchConfig::default())
        .await
        .unwrap();

    // Variant cards render; the grid is simply absent.
    assert_eq!(snapshot.variants.len(), 3);
    assert_eq!(snapshot.active_variant_id, Some(VariantId(101)));
    assert!(snapshot.entries.is_none());
}

#[tokio::test]
async fn job_without_variants_loads_empty() {
    let local = LocalBackend::new();
    local.seed_job(JOB, JobState::Completed);
    local.seed_workflow(make_workflow(WorkflowStatus::Draft, None));

    let snapshot = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
        .await
        .unwrap();

    assert!(snapshot.variants.is_empty());
    assert_eq!(snapshot.active_variant_id, None);
    assert!(snapshot.entries.is_none());
}

#[tokio::test]
async fn cold_backend_reads_as_a_retryable_timeout() {
    let slow = SlowBackend::new(as_backend(&seeded_backend()), Duration::from_millis(200));
    let backend: Arc<dyn FullBackend> = Arc::new(slow);
    let config = FetchConfig {
        request_timeout: Duration::from_millis(20),
        entries_timeout: Duration::from_millis(20),
    };

    let err = load_review_session(&backend, JOB, &config).await.unwrap_err();
    match &err {
        LoadError::Failed { retryable, message } => {
            assert!(*retryable);
            assert!(message.contains("respond"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn variant_list_keeps_producer_order() {
    let local = LocalBackend::new();
    local.seed_job(JOB, JobState::Completed);
    local.seed_workflow(make_workflow(WorkflowStatus::Draft, None));
    for id in [303, 301, 302] {
        local.seed_variant(make_variant(id, (id - 300) as u32));
        local.seed_entries(VariantId(id), vec![]);
    }

    let snapshot = load_review_session(&as_backend(&local), JOB, &FetchConfig::default())
        .await
        .unwrap();

    let ids: Vec<i64> = snapshot.variants.iter().map(|v| v.id.value()).collect();
    assert_eq!(ids, vec![303, 301, 302]);
    assert_eq!(snapshot.active_variant_id, Some(VariantId(303)));
}
