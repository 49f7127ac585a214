//! # biztime-domain
//!
//! Pure domain model for the biztime invoicing API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, dates
//! - Define **Companies** (keyed by a slug of their name)
//! - Define **Invoices** (amounts billed to a company, with payment state)
//! - Define **Industries** and their many-to-many link to companies
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod slug;
pub mod time;

pub mod company;
pub mod industry;
pub mod invoice;
