//! JSON REST handlers for invoices.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, InvoiceId};
use biztime_domain::invoice::{Invoice, InvoiceSummary};

use super::StatusBody;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Request body for creating an invoice.
#[derive(Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: String,
    pub amt: f64,
}

/// Request body for updating an invoice. Omitting `paid` leaves the
/// payment state as it is.
#[derive(Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: f64,
    pub paid: Option<bool>,
}

/// `{"invoices": [...]}`
#[derive(Serialize)]
pub struct InvoiceList {
    pub invoices: Vec<InvoiceSummary>,
}

/// `{"invoice": {...}}`
#[derive(Serialize)]
pub struct InvoiceEnvelope {
    pub invoice: Invoice,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<InvoiceList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, create, and update endpoints.
pub enum InvoiceResponse {
    Ok(Json<InvoiceEnvelope>),
    Created(Json<InvoiceEnvelope>),
}

impl IntoResponse for InvoiceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(StatusBody::DELETED).into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<InvoiceId, ApiError> {
    InvoiceId::from_str(id).map_err(|err| BizTimeError::from(err).into())
}

/// `GET /invoices`
pub async fn list<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
) -> Result<ListResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let invoices = state.invoice_service.list_invoices().await?;
    Ok(ListResponse::Ok(Json(InvoiceList { invoices })))
}

/// `GET /invoices/:id`
pub async fn get<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(id): ApiPath<String>,
) -> Result<InvoiceResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let invoice = state.invoice_service.get_invoice(parse_id(&id)?).await?;
    Ok(InvoiceResponse::Ok(Json(InvoiceEnvelope { invoice })))
}

/// `POST /invoices`
pub async fn create<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiJson(req): ApiJson<CreateInvoiceRequest>,
) -> Result<InvoiceResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let comp_code = CompanyCode::new(req.comp_code).map_err(BizTimeError::from)?;
    let invoice = state
        .invoice_service
        .create_invoice(comp_code, req.amt)
        .await?;
    Ok(InvoiceResponse::Created(Json(InvoiceEnvelope { invoice })))
}

/// `PUT /invoices/:id`
pub async fn update<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateInvoiceRequest>,
) -> Result<InvoiceResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let invoice = state
        .invoice_service
        .update_invoice(parse_id(&id)?, req.amt, req.paid)
        .await?;
    Ok(InvoiceResponse::Ok(Json(InvoiceEnvelope { invoice })))
}

/// `DELETE /invoices/:id`
pub async fn delete<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(id): ApiPath<String>,
) -> Result<DeleteResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    state.invoice_service.delete_invoice(parse_id(&id)?).await?;
    Ok(DeleteResponse::Deleted)
}
