//! Backend gateway module.
//!
//! This module abstracts the slow review service behind gateway traits so
//! different transports can be swapped without touching the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (loader, session) - Business Logic        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Gateway Traits (gateway.rs) - Abstract Interface        │
//! │  JobGateway / WorkflowGateway / VariantGateway           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │              Local Backend                    │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The real HTTP transport lives in the surrounding application; this crate
//! only defines the contract it must satisfy. `LocalBackend` implements the
//! same server-side semantics in memory for tests and local development.

pub mod config;
pub mod error;
pub mod factory;
pub mod gateway;
#[cfg(feature = "local-backend")]
pub mod local;

pub use config::{FetchConfig, ReviewConfig};
pub use error::{BackendError, BackendResult, ErrorContext};
pub use factory::{BackendFactory, BackendType};
pub use gateway::{FullBackend, JobGateway, VariantGateway, WorkflowGateway};
#[cfg(feature = "local-backend")]
pub use local::LocalBackend;
