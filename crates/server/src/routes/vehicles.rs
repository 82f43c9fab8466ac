use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use service::vehicle::domain::NewVehicle;

use super::path_id;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/vehicles", tag = "vehicles",
    responses((status = 200, description = "List OK"), (status = 500, description = "List Failed", body = crate::openapi::ErrorResponse))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let vehicles = state.vehicles.list().await?;
    info!(count = vehicles.len(), "list vehicles");
    Ok(Json(json!({ "vehicles": vehicles })))
}

#[utoipa::path(
    get, path = "/api/vehicles/{id}", tag = "vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = path_id(&id, "vehicle")?;
    let vehicle = state.vehicles.get(id).await?;
    Ok(Json(json!({ "vehicle": vehicle })))
}

#[utoipa::path(
    post, path = "/api/vehicles", tag = "vehicles",
    request_body = crate::openapi::NewVehicleDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewVehicle>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let vehicle = state.vehicles.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "vehicle": vehicle }))))
}
