use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use uuid::Uuid;

use common::types::Health;
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod maintenance;
pub mod vehicles;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Path ids that are not UUIDs cannot name a stored record, so they read as "not found".
pub(crate) fn path_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(entity).into())
}

/// Build the full application router: `/health`, the OpenAPI document and the
/// JSON API under `/api`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/maintenance", get(maintenance::list).post(maintenance::create))
        .route("/maintenance/vehicle/:vehicle_id", get(maintenance::by_vehicle))
        .route(
            "/maintenance/:id",
            get(maintenance::get).put(maintenance::update).delete(maintenance::delete),
        )
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/vehicles/:id", get(vehicles::get));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use service::maintenance::repository::mock::MockMaintenanceRepository;
    use service::vehicle::repository::mock::MockVehicleRepository;

    use super::*;

    fn app() -> Router {
        let state = ServerState::new(
            Arc::new(MockVehicleRepository::default()),
            Arc::new(MockMaintenanceRepository::default()),
        );
        build_router(state, CorsLayer::very_permissive())
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn openapi_lists_maintenance_paths() {
        let (status, body) = send(get_req("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/maintenance"].is_object());
        assert!(body["paths"]["/api/maintenance/{id}"].is_object());
    }

    #[tokio::test]
    async fn empty_listing() {
        let (status, body) = send(get_req("/api/maintenance")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["maintenance"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn non_uuid_path_ids_are_not_found() {
        for uri in ["/api/maintenance/abc", "/api/maintenance/vehicle/abc", "/api/vehicles/abc"] {
            let (status, body) = send(get_req(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body["error"].is_string());
        }
        let res = app()
            .oneshot(Request::builder().method("DELETE").uri("/api/maintenance/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request_with_error() {
        let (status, body) = send(json_req("POST", "/api/maintenance", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = send(json_req("POST", "/api/maintenance", r#"{"vehicleId": "x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_checks_entry_before_body() {
        let uri = format!("/api/maintenance/{}", Uuid::new_v4());
        let (status, body) = send(json_req("PUT", &uri, "{not json")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "maintenance entry not found");
    }
}
