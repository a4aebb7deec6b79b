//! Modelo de MaintenanceSchedule y señales de alerta

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Programa de mantenimiento - uno por vehículo (clave única vehicle_id).
/// Invariante: next_service_odometer = last_service_odometer + interval_km,
/// recalculado cada vez que se reescribe el programa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceSchedule {
    pub vehicle_id: Uuid,
    pub last_service_odometer: f64,
    pub last_service_date: NaiveDate,
    pub next_service_odometer: f64,
    pub interval_km: f64,
}

/// Señal de alerta de mantenimiento. Se entrega al canal de notificaciones
/// como aviso; su entrega nunca afecta a la persistencia del repostaje.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaintenanceAlert {
    ApproachingService {
        vehicle_id: Uuid,
        plate: String,
        remaining_km: f64,
    },
    OverdueService {
        vehicle_id: Uuid,
        plate: String,
        overdue_km: f64,
    },
}

impl MaintenanceAlert {
    /// Mensaje legible para el canal de notificaciones
    pub fn message(&self) -> String {
        match self {
            MaintenanceAlert::ApproachingService {
                plate, remaining_km, ..
            } => format!(
                "🔧 Vehículo {}: mantenimiento en {:.0} km",
                plate, remaining_km
            ),
            MaintenanceAlert::OverdueService {
                plate, overdue_km, ..
            } => format!(
                "⚠️ Vehículo {}: mantenimiento vencido hace {:.0} km",
                plate, overdue_km
            ),
        }
    }
}
