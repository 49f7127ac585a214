//! Storage port: repository traits for persistence.
//!
//! Every method maps to exactly one statement against the store. Lookups
//! report absence as `None` (or `false` for deletes); turning absence into
//! [`NotFoundError`](biztime_domain::error::NotFoundError) is the services' job.

use std::future::Future;

use biztime_domain::company::{Company, CompanyDetail, CompanySummary};
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, InvoiceId};
use biztime_domain::industry::{CompanyIndustry, Industry, IndustryWithCompanies};
use biztime_domain::invoice::{Invoice, InvoiceSummary, InvoiceUpdate, NewInvoice};

/// Persistence for companies.
pub trait CompanyRepository {
    /// All companies, ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<CompanySummary>, BizTimeError>> + Send;

    /// One company with its invoice ids.
    fn get_by_code(
        &self,
        code: CompanyCode,
    ) -> impl Future<Output = Result<Option<CompanyDetail>, BizTimeError>> + Send;

    fn create(
        &self,
        company: Company,
    ) -> impl Future<Output = Result<Company, BizTimeError>> + Send;

    /// Overwrite name and description; `None` when the code is unknown.
    fn update(
        &self,
        company: Company,
    ) -> impl Future<Output = Result<Option<Company>, BizTimeError>> + Send;

    /// Returns whether a row was removed.
    fn delete(&self, code: CompanyCode) -> impl Future<Output = Result<bool, BizTimeError>> + Send;
}

/// Persistence for invoices.
pub trait InvoiceRepository {
    /// All invoices, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<InvoiceSummary>, BizTimeError>> + Send;

    fn get_by_id(
        &self,
        id: InvoiceId,
    ) -> impl Future<Output = Result<Option<Invoice>, BizTimeError>> + Send;

    /// Insert and return the stored row, including its assigned id.
    fn create(
        &self,
        invoice: NewInvoice,
    ) -> impl Future<Output = Result<Invoice, BizTimeError>> + Send;

    /// Apply `update`; `None` when the id is unknown.
    fn update(
        &self,
        id: InvoiceId,
        update: InvoiceUpdate,
    ) -> impl Future<Output = Result<Option<Invoice>, BizTimeError>> + Send;

    /// Returns whether a row was removed.
    fn delete(&self, id: InvoiceId) -> impl Future<Output = Result<bool, BizTimeError>> + Send;
}

/// Persistence for industries and their company links.
pub trait IndustryRepository {
    /// All industries with their associated company codes, ordered by code.
    fn get_all(
        &self,
    ) -> impl Future<Output = Result<Vec<IndustryWithCompanies>, BizTimeError>> + Send;

    fn create(
        &self,
        industry: Industry,
    ) -> impl Future<Output = Result<Industry, BizTimeError>> + Send;

    /// Link a company to an industry. Unknown codes and duplicate links are
    /// rejected by the store.
    fn associate(
        &self,
        link: CompanyIndustry,
    ) -> impl Future<Output = Result<(), BizTimeError>> + Send;
}
