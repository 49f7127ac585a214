//! Industry: a sector that companies can be associated with.

use serde::{Deserialize, Serialize};

use crate::error::{BizTimeError, ValidationError};
use crate::id::{CompanyCode, IndustryCode};

/// An industry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub code: IndustryCode,
    /// Display name.
    pub industry: String,
}

impl Industry {
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] when the display name is blank.
    pub fn new(code: IndustryCode, industry: impl Into<String>) -> Result<Self, BizTimeError> {
        let industry = industry.into();
        if industry.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self { code, industry })
    }
}

/// An industry and the codes of every company associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryWithCompanies {
    #[serde(flatten)]
    pub industry: Industry,
    /// Company codes in ascending order; empty when nothing is associated.
    pub company_codes: Vec<CompanyCode>,
}

/// A link between a company and an industry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyIndustry {
    pub comp_code: CompanyCode,
    pub ind_code: IndustryCode,
}
