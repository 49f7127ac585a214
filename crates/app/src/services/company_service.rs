//! Company service: use-cases for managing companies.

use biztime_domain::company::{Company, CompanyDetail, CompanySummary};
use biztime_domain::error::{BizTimeError, NotFoundError};
use biztime_domain::id::CompanyCode;

use crate::ports::CompanyRepository;

fn not_found(code: &CompanyCode) -> BizTimeError {
    NotFoundError {
        entity: "company",
        key: "code",
        value: code.to_string(),
    }
    .into()
}

/// Application service for company CRUD operations.
pub struct CompanyService<R> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every company as `{code, name}`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, BizTimeError> {
        self.repo.get_all().await
    }

    /// Look up a company and its invoice ids.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::NotFound`] when no company has `code`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_company(&self, code: CompanyCode) -> Result<CompanyDetail, BizTimeError> {
        let detail = self.repo.get_by_code(code.clone()).await?;
        detail.ok_or_else(|| not_found(&code))
    }

    /// Create a company whose code is the slug of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] if the name is unusable, or a
    /// storage error (including a code collision) from the repository.
    #[tracing::instrument(skip(self, description))]
    pub async fn create_company(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Company, BizTimeError> {
        let company = Company::from_name(name, description)?;
        tracing::debug!(code = %company.code, "derived company code");
        self.repo.create(company).await
    }

    /// Replace the name and description of an existing company.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] if the name is blank,
    /// [`BizTimeError::NotFound`] when no company has `code`, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, description))]
    pub async fn update_company(
        &self,
        code: CompanyCode,
        name: String,
        description: Option<String>,
    ) -> Result<Company, BizTimeError> {
        let company = Company {
            code: code.clone(),
            name,
            description,
        };
        company.validate()?;
        let updated = self.repo.update(company).await?;
        updated.ok_or_else(|| not_found(&code))
    }

    /// Delete a company.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::NotFound`] when no company has `code`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_company(&self, code: CompanyCode) -> Result<(), BizTimeError> {
        if self.repo.delete(code.clone()).await? {
            Ok(())
        } else {
            Err(not_found(&code))
        }
    }
}
