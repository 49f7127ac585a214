//! # biztime-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `biztime-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Each repository method issues exactly one SQL statement.
//!
//! ## Dependency rule
//! Depends on `biztime-app` (for port traits) and `biztime-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod company_repo;
pub mod error;
pub mod industry_repo;
pub mod invoice_repo;
pub mod pool;

pub use company_repo::SqliteCompanyRepository;
pub use error::StorageError;
pub use industry_repo::SqliteIndustryRepository;
pub use invoice_repo::SqliteInvoiceRepository;
pub use pool::{Config, Database};
