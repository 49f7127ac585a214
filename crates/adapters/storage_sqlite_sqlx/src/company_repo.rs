//! `SQLite` implementation of [`CompanyRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use biztime_app::ports::CompanyRepository;
use biztime_domain::company::{Company, CompanyDetail, CompanySummary};
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, InvoiceId};

use crate::error::{StorageError, decode_error};

fn code_column(row: &SqliteRow) -> Result<CompanyCode, sqlx::Error> {
    let code: String = row.try_get("code")?;
    CompanyCode::new(code).map_err(decode_error)
}

/// Wrapper for converting database rows into domain [`Company`].
struct Wrapper(Company);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Company {
            code: code_column(row)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        }))
    }
}

struct SummaryWrapper(CompanySummary);

impl<'r> FromRow<'r, SqliteRow> for SummaryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(CompanySummary {
            code: code_column(row)?,
            name: row.try_get("name")?,
        }))
    }
}

struct DetailWrapper(CompanyDetail);

impl<'r> FromRow<'r, SqliteRow> for DetailWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(company) = Wrapper::from_row(row)?;
        let invoices_json: String = row.try_get("invoices")?;

        let mut invoices: Vec<InvoiceId> =
            serde_json::from_str(&invoices_json).map_err(decode_error)?;
        invoices.sort_unstable();

        Ok(Self(CompanyDetail { company, invoices }))
    }
}

const SELECT_ALL: &str = "SELECT code, name FROM companies ORDER BY name";
const SELECT_BY_CODE: &str = r"
    SELECT code, name, description,
           (SELECT json_group_array(id) FROM invoices WHERE invoices.comp_code = companies.code)
               AS invoices
    FROM companies
    WHERE code = ?
";
const INSERT: &str = r"
    INSERT INTO companies (code, name, description) VALUES (?, ?, ?)
    RETURNING code, name, description
";
const UPDATE: &str = r"
    UPDATE companies SET name = ?, description = ? WHERE code = ?
    RETURNING code, name, description
";
const DELETE_BY_CODE: &str = "DELETE FROM companies WHERE code = ?";

/// `SQLite`-backed company repository.
pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CompanyRepository for SqliteCompanyRepository {
    async fn get_all(&self) -> Result<Vec<CompanySummary>, BizTimeError> {
        let rows: Vec<SummaryWrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_by_code(&self, code: CompanyCode) -> Result<Option<CompanyDetail>, BizTimeError> {
        let row: Option<DetailWrapper> = sqlx::query_as(SELECT_BY_CODE)
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn create(&self, company: Company) -> Result<Company, BizTimeError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(company.code.as_str())
            .bind(&company.name)
            .bind(company.description.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn update(&self, company: Company) -> Result<Option<Company>, BizTimeError> {
        let row: Option<Wrapper> = sqlx::query_as(UPDATE)
            .bind(&company.name)
            .bind(company.description.as_deref())
            .bind(company.code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn delete(&self, code: CompanyCode) -> Result<bool, BizTimeError> {
        let result = sqlx::query(DELETE_BY_CODE)
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> (SqliteCompanyRepository, SqlitePool) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();
        (SqliteCompanyRepository::new(pool.clone()), pool)
    }

    fn apple() -> Company {
        Company::from_name("Apple Computer", Some("Maker of OSX.".to_string())).unwrap()
    }

    fn code(value: &str) -> CompanyCode {
        CompanyCode::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_company_with_no_invoices() {
        let (repo, _) = setup().await;
        let created = repo.create(apple()).await.unwrap();
        assert_eq!(created, apple());

        let fetched = repo.get_by_code(code("apple-computer")).await.unwrap().unwrap();
        assert_eq!(fetched.company, apple());
        assert!(fetched.invoices.is_empty());
    }

    #[tokio::test]
    async fn should_return_none_when_company_not_found() {
        let (repo, _) = setup().await;
        let result = repo.get_by_code(code("ghost")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_include_invoice_ids_in_ascending_order() {
        let (repo, pool) = setup().await;
        repo.create(apple()).await.unwrap();
        for amt in [10.0, 20.0, 30.0] {
            sqlx::query("INSERT INTO invoices (comp_code, amt) VALUES (?, ?)")
                .bind("apple-computer")
                .bind(amt)
                .execute(&pool)
                .await
                .unwrap();
        }

        let fetched = repo.get_by_code(code("apple-computer")).await.unwrap().unwrap();
        assert_eq!(
            fetched.invoices,
            vec![InvoiceId::new(1), InvoiceId::new(2), InvoiceId::new(3)]
        );
    }

    #[tokio::test]
    async fn should_list_companies_ordered_by_name() {
        let (repo, _) = setup().await;
        repo.create(Company::from_name("Zeta", None).unwrap())
            .await
            .unwrap();
        repo.create(Company::from_name("Alpha", None).unwrap())
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn should_fail_when_code_collides() {
        let (repo, _) = setup().await;
        repo.create(apple()).await.unwrap();

        let result = repo.create(apple()).await;
        assert!(matches!(result, Err(BizTimeError::Storage(_))));
    }

    #[tokio::test]
    async fn should_update_company_when_exists() {
        let (repo, _) = setup().await;
        repo.create(apple()).await.unwrap();

        let updated = repo
            .update(Company {
                code: code("apple-computer"),
                name: "Apple Inc.".to_string(),
                description: None,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Apple Inc.");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_company() {
        let (repo, _) = setup().await;
        let result = repo
            .update(Company::from_name("Ghost", None).unwrap())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_report_whether_delete_removed_a_row() {
        let (repo, _) = setup().await;
        repo.create(apple()).await.unwrap();

        assert!(repo.delete(code("apple-computer")).await.unwrap());
        assert!(!repo.delete(code("apple-computer")).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_cascade_delete_to_invoices() {
        let (repo, pool) = setup().await;
        repo.create(apple()).await.unwrap();
        sqlx::query("INSERT INTO invoices (comp_code, amt) VALUES ('apple-computer', 10)")
            .execute(&pool)
            .await
            .unwrap();

        repo.delete(code("apple-computer")).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
