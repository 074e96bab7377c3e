//! Backend factory for dependency injection.
//!
//! This module provides utilities for creating backend instances based on
//! runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::error::{BackendError, BackendResult};
use super::gateway::FullBackend;
#[cfg(feature = "local-backend")]
use super::local::LocalBackend;

/// Backend type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// In-memory backend for local development and testing
    Local,
}

impl FromStr for BackendType {
    type Err = String;

    /// Parse backend type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown backend type: {}", s)),
        }
    }
}

impl BackendType {
    /// Get backend type from the `TTR_BACKEND_TYPE` environment variable,
    /// defaulting to Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("TTR_BACKEND_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }
        Self::Local
    }
}

/// Factory for creating backend gateway instances.
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend instance based on type.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullBackend>)` - Boxed backend instance
    /// * `Err(BackendError)` - If the requested backend is unavailable
    pub fn create(backend_type: BackendType) -> BackendResult<Arc<dyn FullBackend>> {
        match backend_type {
            BackendType::Local => {
                #[cfg(feature = "local-backend")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-backend"))]
                {
                    Err(BackendError::configuration(
                        "Local backend feature not enabled".to_string(),
                    ))
                }
            }
        }
    }

    /// Create an in-memory local backend.
    #[cfg(feature = "local-backend")]
    pub fn create_local() -> Arc<dyn FullBackend> {
        Arc::new(LocalBackend::new())
    }
}
