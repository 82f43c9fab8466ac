use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

/// Body of `POST /api/maintenance` and `PUT /api/maintenance/{id}`.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInputDoc {
    #[schema(example = "7f1c2c9e-3f55-4d4e-9a52-0f0f5a1c2b3d")]
    pub vehicle_id: String,
    /// `YYYY-MM-DD`; empty on update keeps the stored date.
    #[schema(example = "2024-06-01")]
    pub date: String,
    /// inspection | oil-change | tire-change | repair | other
    #[serde(rename = "type")]
    #[schema(example = "oil-change")]
    pub kind: String,
    pub mileage: i32,
    pub cost: f64,
    pub workshop: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicleDoc {
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub mileage: Option<i32>,
    /// available | in-use | maintenance
    pub status: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::maintenance::list,
        crate::routes::maintenance::by_vehicle,
        crate::routes::maintenance::get,
        crate::routes::maintenance::create,
        crate::routes::maintenance::update,
        crate::routes::maintenance::delete,
        crate::routes::vehicles::list,
        crate::routes::vehicles::get,
        crate::routes::vehicles::create,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            MaintenanceInputDoc,
            NewVehicleDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "maintenance"),
        (name = "vehicles")
    )
)]
pub struct ApiDoc;
