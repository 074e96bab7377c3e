//! # TTR Rust Backend Core
//!
//! Review and approval engine for generated timetable variants.
//!
//! This crate implements the client-side core of the Timetable Review (TTR)
//! system: once an external generation job has produced candidate timetable
//! variants with pre-computed quality metrics, this crate loads them,
//! renders them as a filterable day × time grid, and drives the review
//! workflow (variant selection, approval, rejection) against a backend that
//! serializes all writes.
//!
//! ## Features
//!
//! - **Session Loading**: coordinated parallel fetches that bound a cold
//!   review-session load to two backend round trips
//! - **Grid Construction**: deterministic flat-to-grid transformation with
//!   day/department filtering, a sorted time-slot axis and a subject legend
//! - **Stable Coloring**: pure hash-based palette assignment so a subject
//!   keeps its color across variants and sessions
//! - **Workflow Lifecycle**: closed status enum with an exhaustive
//!   transition table; select/approve/reject guarded locally and committed
//!   only via confirmed backend responses
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the consolidated DTO surface
//! - [`models`]: domain model (workflow, variant, entry, review) and
//!   tolerant JSON parsing for upstream entry payloads
//! - [`backend`]: gateway traits for the consumed external interfaces,
//!   error taxonomy, configuration and the in-memory local backend
//! - [`routes`]: per-view data types (grid view, session view)
//! - [`services`]: business logic (palette, grid builder, fetch
//!   coordinator, review session store)
//!
//! ## Consistency
//!
//! Mutations are never applied optimistically. The session store delegates
//! every select/approve/reject to the backend and re-fetches the workflow
//! and variant list afterwards; mirrored `is_selected` flags are treated as
//! a cache that only the backend may author.

pub mod api;

pub mod backend;
pub mod models;

pub mod routes;

pub mod services;
