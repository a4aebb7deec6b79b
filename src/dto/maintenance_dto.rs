//! DTOs de MaintenanceSchedule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::MaintenanceSchedule;

/// Request para registrar un mantenimiento realizado.
/// Reemplaza por completo el programa anterior del vehículo.
#[derive(Debug, Deserialize, Validate)]
pub struct SetMaintenanceRequest {
    #[validate(range(min = 0.0))]
    pub last_service_odometer: f64,

    pub last_service_date: NaiveDate,

    /// Intervalo de servicio en km; por defecto 10000
    #[validate(range(min = 1.0))]
    pub interval_km: Option<f64>,
}

/// Response del programa de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceScheduleResponse {
    pub vehicle_id: Uuid,
    pub last_service_odometer: f64,
    pub last_service_date: NaiveDate,
    pub next_service_odometer: f64,
    pub interval_km: f64,
}

impl From<MaintenanceSchedule> for MaintenanceScheduleResponse {
    fn from(schedule: MaintenanceSchedule) -> Self {
        Self {
            vehicle_id: schedule.vehicle_id,
            last_service_odometer: schedule.last_service_odometer,
            last_service_date: schedule.last_service_date,
            next_service_odometer: schedule.next_service_odometer,
            interval_km: schedule.interval_km,
        }
    }
}
