//! `SQLite` implementation of [`IndustryRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use biztime_app::ports::IndustryRepository;
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, IndustryCode};
use biztime_domain::industry::{CompanyIndustry, Industry, IndustryWithCompanies};

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`Industry`].
struct Wrapper(Industry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let code: String = row.try_get("code")?;

        Ok(Self(Industry {
            code: IndustryCode::new(code).map_err(decode_error)?,
            industry: row.try_get("industry")?,
        }))
    }
}

struct WithCompaniesWrapper(IndustryWithCompanies);

impl<'r> FromRow<'r, SqliteRow> for WithCompaniesWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(industry) = Wrapper::from_row(row)?;
        let codes_json: String = row.try_get("company_codes")?;

        let mut company_codes: Vec<CompanyCode> =
            serde_json::from_str(&codes_json).map_err(decode_error)?;
        company_codes.sort_unstable();

        Ok(Self(IndustryWithCompanies {
            industry,
            company_codes,
        }))
    }
}

// The correlated aggregate yields `[]` for industries without companies.
const SELECT_ALL: &str = r"
    SELECT code, industry,
           (SELECT json_group_array(comp_code) FROM company_industry
            WHERE company_industry.ind_code = industries.code) AS company_codes
    FROM industries
    ORDER BY code
";
const INSERT: &str = r"
    INSERT INTO industries (code, industry) VALUES (?, ?)
    RETURNING code, industry
";
const INSERT_LINK: &str = "INSERT INTO company_industry (comp_code, ind_code) VALUES (?, ?)";

/// `SQLite`-backed industry repository.
pub struct SqliteIndustryRepository {
    pool: SqlitePool,
}

impl SqliteIndustryRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl IndustryRepository for SqliteIndustryRepository {
    async fn get_all(&self) -> Result<Vec<IndustryWithCompanies>, BizTimeError> {
        let rows: Vec<WithCompaniesWrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn create(&self, industry: Industry) -> Result<Industry, BizTimeError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(industry.code.as_str())
            .bind(&industry.industry)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn associate(&self, link: CompanyIndustry) -> Result<(), BizTimeError> {
        sqlx::query(INSERT_LINK)
            .bind(link.comp_code.as_str())
            .bind(link.ind_code.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
