//! # biztime-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CompanyRepository`: CRUD for companies
//!   - `InvoiceRepository`: CRUD for invoices
//!   - `IndustryRepository`: industries and company links
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CompanyService`, `InvoiceService`, `IndustryService`
//! - Turn missing rows into typed not-found errors
//!
//! ## Dependency rule
//! Depends on `biztime-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
