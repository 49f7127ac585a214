//! JSON REST API handler modules.
//!
//! Every success body wraps its payload in a named key (`{"company": ...}`,
//! `{"invoices": [...]}`); mutations without a payload answer with
//! [`StatusBody`].

#[allow(clippy::missing_errors_doc)]
pub mod companies;
#[allow(clippy::missing_errors_doc)]
pub mod industries;
#[allow(clippy::missing_errors_doc)]
pub mod invoices;

use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};

use crate::state::AppState;

/// `{"status": "..."}` confirmation body.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub const DELETED: Self = Self { status: "deleted" };
    pub const SUCCESS: Self = Self { status: "success" };
}

/// Build the API router for companies, industries, and invoices.
pub fn routes<CR, IR, NR>() -> Router<AppState<CR, IR, NR>>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    Router::new()
        // Invoices
        .route(
            "/invoices",
            get(invoices::list::<CR, IR, NR>).post(invoices::create::<CR, IR, NR>),
        )
        .route(
            "/invoices/{id}",
            get(invoices::get::<CR, IR, NR>)
                .put(invoices::update::<CR, IR, NR>)
                .delete(invoices::delete::<CR, IR, NR>),
        )
        // Companies
        .route(
            "/companies",
            get(companies::list::<CR, IR, NR>).post(companies::create::<CR, IR, NR>),
        )
        .route(
            "/companies/{code}",
            get(companies::get::<CR, IR, NR>)
                .put(companies::update::<CR, IR, NR>)
                .delete(companies::delete::<CR, IR, NR>),
        )
        // Industries (static segment wins over `{code}`)
        .route(
            "/companies/industries",
            get(industries::list::<CR, IR, NR>).post(industries::create::<CR, IR, NR>),
        )
        .route(
            "/companies/{code}/industries/{ind_code}",
            post(industries::associate::<CR, IR, NR>),
        )
}
