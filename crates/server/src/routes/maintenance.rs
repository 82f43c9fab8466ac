use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use service::maintenance::domain::MaintenanceInput;

use super::path_id;
use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/maintenance", tag = "maintenance",
    responses(
        (status = 200, description = "All entries, each with vehicleName"),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    let rows = state.maintenance.list().await?;
    info!(count = rows.len(), "list maintenance");
    Ok(Json(json!({ "maintenance": rows })))
}

#[utoipa::path(
    get, path = "/api/maintenance/vehicle/{vehicle_id}", tag = "maintenance",
    params(("vehicle_id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle and its entries"),
        (status = 404, description = "Vehicle Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn by_vehicle(State(state): State<ServerState>, Path(vehicle_id): Path<String>) -> Result<Json<Value>, ApiError> {
    let vehicle_id = path_id(&vehicle_id, "vehicle")?;
    let history = state.maintenance.list_by_vehicle(vehicle_id).await?;
    Ok(Json(json!({ "vehicle": history.vehicle, "maintenance": history.maintenance })))
}

#[utoipa::path(
    get, path = "/api/maintenance/{id}", tag = "maintenance",
    params(("id" = String, Path, description = "Maintenance entry ID")),
    responses(
        (status = 200, description = "Entry and its vehicle"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Vehicle reference broken", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = path_id(&id, "maintenance entry")?;
    let detail = state.maintenance.get(id).await?;
    Ok(Json(json!({ "maintenance": detail.maintenance, "vehicle": detail.vehicle })))
}

#[utoipa::path(
    post, path = "/api/maintenance", tag = "maintenance",
    request_body = crate::openapi::MaintenanceInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Vehicle Not Found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<MaintenanceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let entry = state.maintenance.create(input).await?;
    info!(id = %entry.id, vehicle_id = %entry.vehicle_id, "created maintenance entry");
    Ok((StatusCode::CREATED, Json(json!({ "maintenance": entry }))))
}

#[utoipa::path(
    put, path = "/api/maintenance/{id}", tag = "maintenance",
    params(("id" = String, Path, description = "Maintenance entry ID")),
    request_body = crate::openapi::MaintenanceInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Entry or Vehicle Not Found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<MaintenanceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = path_id(&id, "maintenance entry")?;
    // an unknown entry wins over an unreadable body
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            state.maintenance.ensure_exists(id).await?;
            return Err(rejection.into());
        }
    };
    let entry = state.maintenance.update(id, input).await?;
    info!(id = %entry.id, "updated maintenance entry");
    Ok(Json(json!({ "maintenance": entry })))
}

#[utoipa::path(
    delete, path = "/api/maintenance/{id}", tag = "maintenance",
    params(("id" = String, Path, description = "Maintenance entry ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = path_id(&id, "maintenance entry")?;
    state.maintenance.delete(id).await?;
    Ok(Json(json!({ "message": "maintenance entry deleted" })))
}
