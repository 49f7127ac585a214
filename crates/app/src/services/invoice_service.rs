//! Invoice service: use-cases for billing companies.

use biztime_domain::error::{BizTimeError, NotFoundError};
use biztime_domain::id::{CompanyCode, InvoiceId};
use biztime_domain::invoice::{Invoice, InvoiceSummary, InvoiceUpdate, NewInvoice};
use biztime_domain::time;

use crate::ports::InvoiceRepository;

fn not_found(id: InvoiceId) -> BizTimeError {
    NotFoundError {
        entity: "invoice",
        key: "id",
        value: id.to_string(),
    }
    .into()
}

/// Application service for invoice CRUD operations.
pub struct InvoiceService<R> {
    repo: R,
}

impl<R: InvoiceRepository> InvoiceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every invoice as `{id, comp_code}`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, BizTimeError> {
        self.repo.get_all().await
    }

    /// Look up an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::NotFound`] when no invoice has `id`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, BizTimeError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Bill `comp_code` for `amt`, dated today and unpaid.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] if `amt` is not positive, or a
    /// storage error (including an unknown company) from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn create_invoice(
        &self,
        comp_code: CompanyCode,
        amt: f64,
    ) -> Result<Invoice, BizTimeError> {
        let invoice = NewInvoice::new(comp_code, amt, time::today())?;
        self.repo.create(invoice).await
    }

    /// Change the amount and, when `paid` is given, the payment state.
    ///
    /// Marking paid stamps today's date; marking unpaid clears it.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] if `amt` is not positive,
    /// [`BizTimeError::NotFound`] when no invoice has `id`, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_invoice(
        &self,
        id: InvoiceId,
        amt: f64,
        paid: Option<bool>,
    ) -> Result<Invoice, BizTimeError> {
        let update = InvoiceUpdate::new(amt, paid, time::today())?;
        self.repo
            .update(id, update)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Delete an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::NotFound`] when no invoice has `id`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_invoice(&self, id: InvoiceId) -> Result<(), BizTimeError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
