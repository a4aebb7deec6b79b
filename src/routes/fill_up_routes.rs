use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fill_up_controller::FillUpController;
use crate::dto::common::ApiResponse;
use crate::dto::fill_up_dto::{CreateFillUpRequest, FillUpListQuery, FillUpResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fill_up_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fill_up))
        .route("/vehicle/:vehicle_id", get(list_fill_ups))
}

async fn create_fill_up(
    State(state): State<AppState>,
    Json(request): Json<CreateFillUpRequest>,
) -> Result<Json<ApiResponse<FillUpResponse>>, AppError> {
    let controller = FillUpController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_fill_ups(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<FillUpListQuery>,
) -> Result<Json<Vec<FillUpResponse>>, AppError> {
    let controller = FillUpController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.list_by_vehicle(vehicle_id, query.limit).await?;
    Ok(Json(response))
}
