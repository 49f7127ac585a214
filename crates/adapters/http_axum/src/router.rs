//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use biztime_app::ports::{CompanyRepository, IndustryRepository, InvoiceRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the JSON API at the root, answers unknown paths and unsupported
/// methods with the JSON error envelope, and includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<CR, IR, NR>(state: AppState<CR, IR, NR>) -> Router
where
    CR: CompanyRepository + Send + Sync + 'static,
    IR: InvoiceRepository + Send + Sync + 'static,
    NR: IndustryRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use biztime_app::services::company_service::CompanyService;
    use biztime_app::services::industry_service::IndustryService;
    use biztime_app::services::invoice_service::InvoiceService;
    use biztime_domain::company::{Company, CompanyDetail, CompanySummary};
    use biztime_domain::error::BizTimeError;
    use biztime_domain::id::{CompanyCode, InvoiceId};
    use biztime_domain::industry::{CompanyIndustry, Industry, IndustryWithCompanies};
    use biztime_domain::invoice::{Invoice, InvoiceSummary, InvoiceUpdate, NewInvoice};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct StubCompanyRepo;
    struct StubInvoiceRepo;
    struct StubIndustryRepo;

    fn storage_failure() -> BizTimeError {
        BizTimeError::Storage(Box::new(std::io::Error::other("constraint failed")))
    }

    impl CompanyRepository for StubCompanyRepo {
        async fn get_all(&self) -> Result<Vec<CompanySummary>, BizTimeError> {
            Ok(vec![])
        }
        async fn get_by_code(
            &self,
            _code: CompanyCode,
        ) -> Result<Option<CompanyDetail>, BizTimeError> {
            Ok(None)
        }
        async fn create(&self, _company: Company) -> Result<Company, BizTimeError> {
            Err(storage_failure())
        }
        async fn update(&self, _company: Company) -> Result<Option<Company>, BizTimeError> {
            Ok(None)
        }
        async fn delete(&self, _code: CompanyCode) -> Result<bool, BizTimeError> {
            Ok(false)
        }
    }

    impl InvoiceRepository for StubInvoiceRepo {
        async fn get_all(&self) -> Result<Vec<InvoiceSummary>, BizTimeError> {
            Ok(vec![])
        }
        async fn get_by_id(&self, _id: InvoiceId) -> Result<Option<Invoice>, BizTimeError> {
            Ok(None)
        }
        async fn create(&self, _invoice: NewInvoice) -> Result<Invoice, BizTimeError> {
            Err(storage_failure())
        }
        async fn update(
            &self,
            _id: InvoiceId,
            _update: InvoiceUpdate,
        ) -> Result<Option<Invoice>, BizTimeError> {
            Ok(None)
        }
        async fn delete(&self, _id: InvoiceId) -> Result<bool, BizTimeError> {
            Ok(false)
        }
    }

    impl IndustryRepository for StubIndustryRepo {
        async fn get_all(&self) -> Result<Vec<IndustryWithCompanies>, BizTimeError> {
            Ok(vec![])
        }
        async fn create(&self, industry: Industry) -> Result<Industry, BizTimeError> {
            Ok(industry)
        }
        async fn associate(&self, _link: CompanyIndustry) -> Result<(), BizTimeError> {
            Ok(())
        }
    }

    fn app() -> Router {
        build(AppState::new(
            CompanyService::new(StubCompanyRepo),
            InvoiceService::new(StubInvoiceRepo),
            IndustryService::new(StubIndustryRepo),
        ))
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_render_not_found_envelope_for_missing_invoice() {
        let (status, body) = send(empty_request("GET", "/invoices/999")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(
            body["error"]["message"],
            "can't find invoice with id of 999"
        );
    }

    #[tokio::test]
    async fn should_reject_non_numeric_invoice_id() {
        let (status, body) = send(empty_request("GET", "/invoices/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn should_render_storage_failure_as_generic_500() {
        let (status, body) = send(json_request(
            "POST",
            "/invoices",
            r#"{"comp_code": "ghost", "amt": 10}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], 500);
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[tokio::test]
    async fn should_wrap_malformed_json_in_error_envelope() {
        let (status, body) = send(json_request("POST", "/companies", "{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_blank_company_name_before_storage() {
        let (status, body) =
            send(json_request("POST", "/companies", r#"{"name": "  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "name must not be empty");
    }

    #[tokio::test]
    async fn should_route_static_industries_path_before_company_code() {
        let (status, body) = send(empty_request("GET", "/companies/industries")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "industries": [] }));
    }

    #[tokio::test]
    async fn should_answer_association_with_success_status() {
        let (status, body) = send(empty_request("POST", "/companies/apple/industries/tech")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "success" }));
    }

    #[tokio::test]
    async fn should_render_json_not_found_for_unknown_route() {
        let (status, body) = send(empty_request("GET", "/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "not found");
    }

    #[tokio::test]
    async fn should_wrap_unsupported_method_in_error_envelope() {
        let (status, body) = send(json_request("PATCH", "/invoices/1", r#"{"amt": 1}"#)).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"]["status"], 405);
        assert_eq!(body["error"]["message"], "method not allowed");
    }

    #[tokio::test]
    async fn should_wrap_unsupported_method_on_static_route_in_error_envelope() {
        let (status, body) = send(empty_request("DELETE", "/companies/industries")).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"]["status"], 405);
    }

    #[tokio::test]
    async fn should_wrap_undecodable_path_segment_in_error_envelope() {
        let (status, body) = send(empty_request("GET", "/companies/%FF")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
    }
}
