//! Review session fetch coordinator.
//!
//! Loading a review session against a slow backend is bounded to two round
//! trips: the first fires the job-status check, the workflow fetch and the
//! variant listing concurrently; the second fetches entries for exactly one
//! variant (the previously selected one, else the first in list order).
//! A still-running job or an auth failure aborts with a page-level signal
//! before the second round fires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{JobId, JobState, SessionSnapshot};
use crate::backend::{BackendError, BackendResult, ErrorContext, FetchConfig, FullBackend};

/// Page-level outcome of a failed session load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The generation job has not finished; show the progress view instead.
    #[error("timetable generation is still in progress (job is {0})")]
    StillGenerating(JobState),

    /// The backend rejected the credentials; redirect to login.
    #[error("authentication required")]
    AuthRequired,

    /// Workflow or job does not exist; navigate back.
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything else: a recoverable "failed to load" state.
    #[error("failed to load review session: {message}")]
    Failed { message: String, retryable: bool },
}

impl LoadError {
    fn from_backend(err: BackendError) -> Self {
        match err {
            BackendError::AuthError { .. } => Self::AuthRequired,
            BackendError::NotFound { message, .. } => Self::NotFound(message),
            other => Self::Failed {
                retryable: other.is_retryable(),
                message: other.to_string(),
            },
        }
    }

    /// Whether retrying the load may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed { retryable: true, .. })
    }
}

/// Bound a backend call so a cold backend reads as a timeout error rather
/// than an indefinite hang.
pub(crate) async fn timed<T, F>(limit: Duration, operation: &str, fut: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::timeout_with_context(
            format!("backend did not respond within {}ms", limit.as_millis()),
            ErrorContext::new(operation),
        )),
    }
}

/// Load a review session in at most two backend round trips.
///
/// Round 1 runs the job-status check, the workflow fetch and the variant
/// listing concurrently. Round 2 fetches entries for the active variant. An
/// entry-fetch failure degrades the snapshot (entries absent, variant cards
/// intact) instead of failing the load.
pub async fn load_review_session(
    backend: &Arc<dyn FullBackend>,
    job_id: JobId,
    config: &FetchConfig,
) -> Result<SessionSnapshot, LoadError> {
    let limit = config.request_timeout;
    let (job_state, workflow, variants) = tokio::join!(
        timed(limit, "fetch_job_state", backend.fetch_job_state(job_id)),
        timed(limit, "fetch_workflow_by_job", backend.fetch_workflow_by_job(job_id)),
        timed(limit, "list_variants", backend.list_variants(job_id)),
    );

    // The redirect rule comes first: a running or queued job means there is
    // nothing to review yet, whatever the other fetches returned.
    let job_state = job_state.map_err(LoadError::from_backend)?;
    if !job_state.is_finished() {
        return Err(LoadError::StillGenerating(job_state));
    }

    let workflow = workflow.map_err(LoadError::from_backend)?;
    let variants = variants.map_err(LoadError::from_backend)?;

    // Round 2: the previously selected variant wins; otherwise fall back to
    // producer list order.
    let active_variant_id = workflow
        .selected_variant_id
        .filter(|id| variants.iter().any(|v| v.id == *id))
        .or_else(|| variants.first().map(|v| v.id));

    let entries = match active_variant_id {
        Some(variant_id) => {
            match timed(
                config.entries_timeout,
                "fetch_variant_entries",
                backend.fetch_variant_entries(variant_id, None),
            )
            .await
            {
                Ok(entries) => {
                    log::info!(
                        "loaded review session for job {}: {} variants, {} entries",
                        job_id,
                        variants.len(),
                        entries.len()
                    );
                    Some(entries)
                }
                Err(e) => {
                    // Degrade: variant cards render without the grid.
                    log::warn!("entries fetch failed for variant {}: {}", variant_id, e);
                    None
                }
            }
        }
        None => {
            log::info!("job {} produced no variants", job_id);
            None
        }
    };

    Ok(SessionSnapshot {
        workflow,
        variants,
        active_variant_id,
        entries,
    })
}
