//! Shared application state for axum handlers.

use std::sync::Arc;

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};
use biztime_app::services::company_service::CompanyService;
use biztime_app::services::industry_service::IndustryService;
use biztime_app::services::invoice_service::InvoiceService;

/// Application state shared across all axum handlers.
///
/// Generic over the company, invoice, and industry repositories to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<CR, IR, NR> {
    /// Company CRUD service.
    pub company_service: Arc<CompanyService<CR>>,
    /// Invoice CRUD service.
    pub invoice_service: Arc<InvoiceService<IR>>,
    /// Industry listing, creation, and company links.
    pub industry_service: Arc<IndustryService<NR>>,
}

impl<CR, IR, NR> Clone for AppState<CR, IR, NR> {
    fn clone(&self) -> Self {
        Self {
            company_service: Arc::clone(&self.company_service),
            invoice_service: Arc::clone(&self.invoice_service),
            industry_service: Arc::clone(&self.industry_service),
        }
    }
}

impl<CR, IR, NR> AppState<CR, IR, NR>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        company_service: CompanyService<CR>,
        invoice_service: InvoiceService<IR>,
        industry_service: IndustryService<NR>,
    ) -> Self {
        Self {
            company_service: Arc::new(company_service),
            invoice_service: Arc::new(invoice_service),
            industry_service: Arc::new(industry_service),
        }
    }
}
