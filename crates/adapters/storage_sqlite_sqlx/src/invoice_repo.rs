//! `SQLite` implementation of [`InvoiceRepository`].

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use biztime_app::ports::InvoiceRepository;
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, InvoiceId};
use biztime_domain::invoice::{Invoice, InvoiceSummary, InvoiceUpdate, NewInvoice};
use biztime_domain::time::DATE_FORMAT;

use crate::error::{StorageError, decode_error};

fn parse_date(value: &str) -> Result<NaiveDate, sqlx::Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(decode_error)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Wrapper for converting database rows into domain [`Invoice`].
struct Wrapper(Invoice);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let comp_code: String = row.try_get("comp_code")?;
        let add_date: String = row.try_get("add_date")?;
        let paid_date: Option<String> = row.try_get("paid_date")?;

        Ok(Self(Invoice {
            id: InvoiceId::new(id),
            comp_code: CompanyCode::new(comp_code).map_err(decode_error)?,
            amt: row.try_get("amt")?,
            paid: row.try_get("paid")?,
            add_date: parse_date(&add_date)?,
            paid_date: paid_date.as_deref().map(parse_date).transpose()?,
        }))
    }
}

struct SummaryWrapper(InvoiceSummary);

impl<'r> FromRow<'r, SqliteRow> for SummaryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let comp_code: String = row.try_get("comp_code")?;

        Ok(Self(InvoiceSummary {
            id: InvoiceId::new(id),
            comp_code: CompanyCode::new(comp_code).map_err(decode_error)?,
        }))
    }
}

const SELECT_ALL: &str = "SELECT id, comp_code FROM invoices ORDER BY id";
const SELECT_BY_ID: &str = r"
    SELECT id, comp_code, amt, paid, add_date, paid_date FROM invoices WHERE id = ?
";
const INSERT: &str = r"
    INSERT INTO invoices (comp_code, amt, paid, add_date, paid_date) VALUES (?, ?, 0, ?, NULL)
    RETURNING id, comp_code, amt, paid, add_date, paid_date
";
// A NULL `paid` keeps both payment columns as stored.
const UPDATE: &str = r"
    UPDATE invoices
    SET amt = ?,
        paid = COALESCE(?, paid),
        paid_date = CASE WHEN ? IS NULL THEN paid_date ELSE ? END
    WHERE id = ?
    RETURNING id, comp_code, amt, paid, add_date, paid_date
";
const DELETE_BY_ID: &str = "DELETE FROM invoices WHERE id = ?";

/// `SQLite`-backed invoice repository.
pub struct SqliteInvoiceRepository {
    pool: SqlitePool,
}

impl SqliteInvoiceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl InvoiceRepository for SqliteInvoiceRepository {
    async fn get_all(&self) -> Result<Vec<InvoiceSummary>, BizTimeError> {
        let rows: Vec<SummaryWrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, BizTimeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, BizTimeError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(invoice.comp_code.as_str())
            .bind(invoice.amt)
            .bind(format_date(invoice.add_date))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn update(
        &self,
        id: InvoiceId,
        update: InvoiceUpdate,
    ) -> Result<Option<Invoice>, BizTimeError> {
        let paid = update.payment.paid();
        let row: Option<Wrapper> = sqlx::query_as(UPDATE)
            .bind(update.amt)
            .bind(paid)
            .bind(paid)
            .bind(update.payment.paid_date().map(format_date))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn delete(&self, id: InvoiceId) -> Result<bool, BizTimeError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
