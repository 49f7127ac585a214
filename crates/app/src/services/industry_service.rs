//! Industry service: industries and their links to companies.

use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, IndustryCode};
use biztime_domain::industry::{CompanyIndustry, Industry, IndustryWithCompanies};

use crate::ports::IndustryRepository;

/// Application service for industries.
pub struct IndustryService<R> {
    repo: R,
}

impl<R: IndustryRepository> IndustryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every industry with the codes of its companies.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_industries(&self) -> Result<Vec<IndustryWithCompanies>, BizTimeError> {
        self.repo.get_all().await
    }

    /// Create an industry.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] if the display name is blank, or a
    /// storage error (including a duplicate code) from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn create_industry(
        &self,
        code: IndustryCode,
        industry: String,
    ) -> Result<Industry, BizTimeError> {
        let industry = Industry::new(code, industry)?;
        self.repo.create(industry).await
    }

    /// Associate a company with an industry.
    ///
    /// # Errors
    ///
    /// Returns a storage error when either code is unknown or the pair
    /// already exists.
    #[tracing::instrument(skip(self))]
    pub async fn associate(
        &self,
        comp_code: CompanyCode,
        ind_code: IndustryCode,
    ) -> Result<(), BizTimeError> {
        self.repo
            .associate(CompanyIndustry {
                comp_code,
                ind_code,
            })
            .await
    }
}
