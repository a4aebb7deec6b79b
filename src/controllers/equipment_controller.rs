use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::equipment_dto::{CreateEquipmentRequest, EquipmentResponse, UpdateEquipmentRequest};
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct EquipmentController {
    equipment: EquipmentRepository,
    vehicles: VehicleRepository,
}

impl EquipmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            equipment: EquipmentRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateEquipmentRequest,
    ) -> Result<ApiResponse<EquipmentResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(vehicle_id) = request.vehicle_id {
            self.vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        }

        let equipment = self
            .equipment
            .create(
                request.vehicle_id,
                request.name,
                request.serial_number,
                request.status.unwrap_or_else(|| "in_service".to_string()),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            equipment.into(),
            "Equipamiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EquipmentResponse, AppError> {
        let equipment = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipamiento no encontrado".to_string()))?;

        Ok(equipment.into())
    }

    pub async fn list(&self) -> Result<Vec<EquipmentResponse>, AppError> {
        let equipment = self.equipment.list().await?;
        Ok(equipment.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEquipmentRequest,
    ) -> Result<ApiResponse<EquipmentResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(vehicle_id) = request.vehicle_id {
            self.vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        }

        let equipment = self
            .equipment
            .update(
                id,
                request.vehicle_id,
                request.name,
                request.serial_number,
                request.status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            equipment.into(),
            "Equipamiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.equipment.delete(id).await
    }
}
