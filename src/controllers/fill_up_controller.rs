use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::fill_up_dto::{CreateFillUpRequest, FillUpResponse};
use crate::repositories::fill_up_repository::FillUpRepository;
use crate::repositories::fleet_store::PgFleetStore;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::fuel_service::FuelService;
use crate::services::notification_service::AlertNotifier;
use crate::utils::errors::AppError;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

pub struct FillUpController {
    engine: FuelService<PgFleetStore>,
    fill_ups: FillUpRepository,
    vehicles: VehicleRepository,
}

impl FillUpController {
    pub fn new(pool: PgPool, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            engine: FuelService::new(PgFleetStore::new(pool.clone()), notifier),
            fill_ups: FillUpRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateFillUpRequest,
    ) -> Result<ApiResponse<FillUpResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let fill_up = self.engine.record_fill_up(request.into()).await?;

        Ok(ApiResponse::success_with_message(
            fill_up.into(),
            "Repostaje registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<FillUpResponse>, AppError> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let fill_ups = self.fill_ups.list_recent(vehicle_id, limit).await?;
        Ok(fill_ups.into_iter().map(Into::into).collect())
    }
}
