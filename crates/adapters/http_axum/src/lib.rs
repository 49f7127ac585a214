//! # biztime-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/companies` and `/invoices`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses, and every failure into the
//!   `{"error": {"message", "status"}}` envelope
//!
//! ## Dependency rule
//! Depends on `biztime-app` (for port traits and services) and `biztime-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
