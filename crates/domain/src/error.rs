//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BizTimeError`] via `#[from]`. Adapters map the variants to their own
//! transport (HTTP status codes, log lines, …).

/// Top-level error returned by every service and repository.
#[derive(Debug, thiserror::Error)]
pub enum BizTimeError {
    /// Input rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A lookup by key matched no row.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The store failed, including unique and foreign-key violations.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name {0:?} does not produce a usable code")]
    UnsluggableName(String),

    #[error("code must not be empty")]
    EmptyCode,

    #[error("code {0:?} is reserved")]
    ReservedCode(String),

    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error("invalid invoice id {0:?}")]
    InvalidInvoiceId(String),
}

/// A keyed lookup returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("can't find {entity} with {key} of {value}")]
pub struct NotFoundError {
    /// Human name of the missing thing (`"company"`, `"invoice"`).
    pub entity: &'static str,
    /// Name of the key that was looked up (`"code"`, `"id"`).
    pub key: &'static str,
    /// The value that was looked up.
    pub value: String,
}
