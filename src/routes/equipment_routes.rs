use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::equipment_controller::EquipmentController;
use crate::dto::common::ApiResponse;
use crate::dto::equipment_dto::{
    CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_equipment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_equipment))
        .route("/", get(list_equipment))
        .route("/:id", get(get_equipment))
        .route("/:id", put(update_equipment))
        .route("/:id", delete(delete_equipment))
}

async fn create_equipment(
    State(state): State<AppState>,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_equipment(
    State(state): State<AppState>,
) -> Result<Json<Vec<EquipmentResponse>>, AppError> {
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let controller = EquipmentController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = EquipmentController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Equipamiento eliminado exitosamente"
    })))
}
