//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the backend
//! gateways and the consuming application. Services orchestrate backend
//! calls and implement the pure transformations behind the review page.

pub mod grid;

pub mod loader;

pub mod palette;

pub mod session;

pub use grid::build_grid;
pub use loader::{load_review_session, LoadError};
pub use palette::{palette_color, palette_index, PALETTE};
pub use session::{ActionError, ReviewSession};
