//! JSON REST handlers for industries, mounted under `/companies`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};
use biztime_domain::error::BizTimeError;
use biztime_domain::id::{CompanyCode, IndustryCode};
use biztime_domain::industry::{Industry, IndustryWithCompanies};

use super::StatusBody;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Request body for creating an industry.
#[derive(Deserialize)]
pub struct CreateIndustryRequest {
    pub code: String,
    pub industry: String,
}

/// `{"industries": [...]}`
#[derive(Serialize)]
pub struct IndustryList {
    pub industries: Vec<IndustryWithCompanies>,
}

/// `{"industry": {...}}`
#[derive(Serialize)]
pub struct IndustryEnvelope {
    pub industry: Industry,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<IndustryList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<IndustryEnvelope>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the associate endpoint.
pub enum AssociateResponse {
    Success,
}

impl IntoResponse for AssociateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Success => Json(StatusBody::SUCCESS).into_response(),
        }
    }
}

/// `GET /companies/industries`
pub async fn list<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
) -> Result<ListResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let industries = state.industry_service.list_industries().await?;
    Ok(ListResponse::Ok(Json(IndustryList { industries })))
}

/// `POST /companies/industries`
pub async fn create<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiJson(req): ApiJson<CreateIndustryRequest>,
) -> Result<CreateResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let code = IndustryCode::new(req.code).map_err(BizTimeError::from)?;
    let industry = state
        .industry_service
        .create_industry(code, req.industry)
        .await?;
    Ok(CreateResponse::Created(Json(IndustryEnvelope { industry })))
}

/// `POST /companies/:comp_code/industries/:ind_code`
pub async fn associate<CR, IR, NR>(
    State(state): State<AppState<CR, IR, NR>>,
    ApiPath((comp_code, ind_code)): ApiPath<(String, String)>,
) -> Result<AssociateResponse, ApiError>
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    let comp_code = CompanyCode::new(comp_code).map_err(BizTimeError::from)?;
    let ind_code = IndustryCode::new(ind_code).map_err(BizTimeError::from)?;
    state.industry_service.associate(comp_code, ind_code).await?;
    Ok(AssociateResponse::Success)
}
