use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dashboard_dto::DashboardSummaryResponse;
use crate::repositories::fleet_store::PgFleetStore;
use crate::services::fuel_service::FuelService;
use crate::services::notification_service::AlertNotifier;
use crate::utils::errors::AppError;

pub struct DashboardController {
    engine: FuelService<PgFleetStore>,
}

impl DashboardController {
    pub fn new(pool: PgPool, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            engine: FuelService::new(PgFleetStore::new(pool), notifier),
        }
    }

    pub async fn summary(&self, vehicle_id: Uuid) -> Result<DashboardSummaryResponse, AppError> {
        let summary = self.engine.dashboard_summary(vehicle_id).await?;
        Ok(summary.into())
    }
}
