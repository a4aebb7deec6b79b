//! Resumen agregado por vehículo para el dashboard

use crate::models::fill_up::FillUp;
use crate::models::maintenance::MaintenanceSchedule;
use crate::models::vehicle::Vehicle;

/// Estado de mantenimiento derivado del programa y el último odómetro conocido
#[derive(Debug, Clone)]
pub struct MaintenanceStatus {
    pub schedule: MaintenanceSchedule,
    pub remaining_km: f64,
    /// Progreso dentro del intervalo de servicio, siempre dentro de [0, 100]
    pub percent_complete: f64,
}

/// Resumen combinado de consumo, costes y mantenimiento de un vehículo
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub vehicle: Vehicle,
    pub last_fill_up: Option<FillUp>,
    /// Media aritmética de avg_consumption de los últimos repostajes.
    /// None cuando no hay muestras (se reporta como "sin datos", nunca NaN).
    pub rolling_avg_consumption: Option<f64>,
    pub month_cost: f64,
    pub maintenance: Option<MaintenanceStatus>,
}
