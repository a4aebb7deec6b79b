//! DTOs de Equipment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::equipment::Equipment;

/// Request para dar de alta equipamiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipmentRequest {
    pub vehicle_id: Option<Uuid>,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(max = 100))]
    pub serial_number: Option<String>,

    pub status: Option<String>,
}

/// Request para actualizar equipamiento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEquipmentRequest {
    /// Asignación a vehículo; None mantiene la actual
    pub vehicle_id: Option<Uuid>,

    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub serial_number: Option<String>,

    pub status: Option<String>,
}

/// Response de equipamiento
#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub name: String,
    pub serial_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            vehicle_id: equipment.vehicle_id,
            name: equipment.name,
            serial_number: equipment.serial_number,
            status: equipment.status,
            created_at: equipment.created_at,
        }
    }
}
