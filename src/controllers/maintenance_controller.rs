use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{MaintenanceScheduleResponse, SetMaintenanceRequest};
use crate::repositories::fleet_store::PgFleetStore;
use crate::services::maintenance_service::MaintenanceService;
use crate::utils::errors::AppError;

pub struct MaintenanceController {
    service: MaintenanceService<PgFleetStore>,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: MaintenanceService::new(PgFleetStore::new(pool)),
        }
    }

    pub async fn set_schedule(
        &self,
        vehicle_id: Uuid,
        request: SetMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceScheduleResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let schedule = self
            .service
            .set_schedule(
                vehicle_id,
                request.last_service_odometer,
                request.last_service_date,
                request.interval_km,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            schedule.into(),
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_schedule(
        &self,
        vehicle_id: Uuid,
    ) -> Result<MaintenanceScheduleResponse, AppError> {
        let schedule = self.service.get_schedule(vehicle_id).await?;
        Ok(schedule.into())
    }
}
