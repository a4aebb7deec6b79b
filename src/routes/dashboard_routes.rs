use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::DashboardSummaryResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/:vehicle_id", get(dashboard_summary))
}

async fn dashboard_summary(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<DashboardSummaryResponse>, AppError> {
    let controller = DashboardController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.summary(vehicle_id).await?;
    Ok(Json(response))
}
