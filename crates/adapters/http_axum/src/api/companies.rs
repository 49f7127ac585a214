//! JSON REST handlers for companies.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};
use biztime_domain::company::{Company, CompanyDetail, CompanySummary};
use biztime_domain::error::BizTimeError;
use biztime_domain::id::CompanyCode;

use super::StatusBody;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Request body for creating or updating a company.
#[derive(Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub description: Option<String>,
}

/// `{"companies": [...]}`
#[derive(Serialize)]
pub struct CompanyList {
    pub companies: Vec<CompanySummary>,
}

/// `{"company": {...}}`
#[derive(Serialize)]
pub struct CompanyEnvelope<T> {
    pub company: T,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<CompanyList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<CompanyEnvelope<CompanyDetail>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create and update endpoints.
pub enum SaveResponse {
    Created(Json<CompanyEnvelope<Company>>),
    Updated(Json<CompanyEnvelope<Company>>),
}

impl IntoResponse for SaveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Updated(json) => json.into_response(),
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

fn parse_code(code: String) -> Result<CompanyCode, ApiError> {
    CompanyCode::new(code).map_err(|err| BizTimeError::from(err).into())
}

/// `GET /companies`
pub async fn list<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
) -> Result<ListResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let companies = state.company_service.list_companies().await?;
    Ok(ListResponse::Ok(Json(CompanyList { companies })))
}

/// `GET /companies/:code`
pub async fn get<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(code): ApiPath<String>,
) -> Result<GetResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let company = state.company_service.get_company(parse_code(code)?).await?;
    Ok(GetResponse::Ok(Json(CompanyEnvelope { company })))
}

/// `POST /companies`
pub async fn create<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiJson(req): ApiJson<CompanyRequest>,
) -> Result<SaveResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let company = state
        .company_service
        .create_company(req.name, req.description)
        .await?;
    Ok(SaveResponse::Created(Json(CompanyEnvelope { company })))
}

/// `PUT /companies/:code`
pub async fn update<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(code): ApiPath<String>,
    ApiJson(req): ApiJson<CompanyRequest>,
) -> Result<SaveResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let company = state
        .company_service
        .update_company(parse_code(code)?, req.name, req.description)
        .await?;
    Ok(SaveResponse::Updated(Json(CompanyEnvelope { company })))
}

/// `DELETE /companies/:code`
pub async fn delete<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath(code): ApiPath<String>,
) -> Result<DeleteResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    state
        .company_service
        .delete_company(parse_code(code)?)
        .await?;
    Ok(DeleteResponse::Deleted)
}
