//! Company: a business identified by a slug derived from its name.

use serde::{Deserialize, Serialize};

use crate::error::{BizTimeError, ValidationError};
use crate::id::{CompanyCode, InvoiceId};
use crate::slug::slugify;

/// Codes that collide with static routes under `/companies`.
pub const RESERVED_CODES: &[&str] = &["industries"];

/// A company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub code: CompanyCode,
    pub name: String,
    pub description: Option<String>,
}

impl Company {
    /// Build a new company whose `code` is the slug of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] when `name` is blank, slugifies
    /// to nothing, or slugifies to one of [`RESERVED_CODES`].
    pub fn from_name(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, BizTimeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let code = CompanyCode::new(slugify(&name))
            .map_err(|_| ValidationError::UnsluggableName(name.clone()))?;
        if RESERVED_CODES.contains(&code.as_str()) {
            return Err(ValidationError::ReservedCode(code.to_string()).into());
        }
        Ok(Self {
            code,
            name,
            description,
        })
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), BizTimeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// The `{code, name}` projection used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub code: CompanyCode,
    pub name: String,
}

/// A company together with the ids of its invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    /// Invoice ids in ascending order.
    pub invoices: Vec<InvoiceId>,
}
