//! Invoice: an amount billed to a company, optionally marked as paid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BizTimeError, ValidationError};
use crate::id::{CompanyCode, InvoiceId};

/// A full invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub comp_code: CompanyCode,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// The `{id, comp_code}` projection used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub comp_code: CompanyCode,
}

fn validate_amount(amt: f64) -> Result<(), BizTimeError> {
    if amt.is_finite() && amt > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount.into())
    }
}

/// An invoice that has not been stored yet.
///
/// New invoices always start unpaid; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: CompanyCode,
    pub amt: f64,
    pub add_date: NaiveDate,
}

impl NewInvoice {
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] when `amt` is not a positive number.
    pub fn new(comp_code: CompanyCode, amt: f64, add_date: NaiveDate) -> Result<Self, BizTimeError> {
        validate_amount(amt)?;
        Ok(Self {
            comp_code,
            amt,
            add_date,
        })
    }
}

/// How an update touches the payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    /// Leave `paid` and `paid_date` as stored.
    Unchanged,
    /// Mark paid on the given date.
    Paid(NaiveDate),
    /// Mark unpaid and clear `paid_date`.
    Unpaid,
}

impl Payment {
    /// `paid` column value to write, `None` meaning "keep".
    #[must_use]
    pub fn paid(self) -> Option<bool> {
        match self {
            Self::Unchanged => None,
            Self::Paid(_) => Some(true),
            Self::Unpaid => Some(false),
        }
    }

    /// `paid_date` column value to write when [`Self::paid`] is `Some`.
    #[must_use]
    pub fn paid_date(self) -> Option<NaiveDate> {
        match self {
            Self::Paid(date) => Some(date),
            Self::Unchanged | Self::Unpaid => None,
        }
    }
}

/// Changes applied by `PUT /invoices/{id}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub payment: Payment,
}

impl InvoiceUpdate {
    /// Build an update from the request's `amt` and optional `paid` flag.
    ///
    /// `paid: Some(true)` stamps `today` as the payment date, `Some(false)`
    /// clears it, `None` leaves the payment state alone.
    ///
    /// # Errors
    ///
    /// Returns [`BizTimeError::Validation`] when `amt` is not a positive number.
    pub fn new(amt: f64, paid: Option<bool>, today: NaiveDate) -> Result<Self, BizTimeError> {
        validate_amount(amt)?;
        let payment = match paid {
            None => Payment::Unchanged,
            Some(true) => Payment::Paid(today),
            Some(false) => Payment::Unpaid,
        };
        Ok(Self { amt, payment })
    }
}
