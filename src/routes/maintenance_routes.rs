use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{MaintenanceScheduleResponse, SetMaintenanceRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/:vehicle_id", put(set_schedule))
        .route("/:vehicle_id", get(get_schedule))
}

async fn set_schedule(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<SetMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceScheduleResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.set_schedule(vehicle_id, request).await?;
    Ok(Json(response))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<MaintenanceScheduleResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.get_schedule(vehicle_id).await?;
    Ok(Json(response))
}
