//! DTOs del dashboard

use serde::Serialize;

use crate::dto::fill_up_dto::FillUpResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::dashboard::{DashboardSummary, MaintenanceStatus};

/// Estado de mantenimiento del dashboard
#[derive(Debug, Serialize)]
pub struct MaintenanceStatusResponse {
    pub last_service_odometer: f64,
    pub next_service_odometer: f64,
    pub interval_km: f64,
    pub remaining_km: f64,
    pub percent_complete: f64,
}

impl From<MaintenanceStatus> for MaintenanceStatusResponse {
    fn from(status: MaintenanceStatus) -> Self {
        Self {
            last_service_odometer: status.schedule.last_service_odometer,
            next_service_odometer: status.schedule.next_service_odometer,
            interval_km: status.schedule.interval_km,
            remaining_km: status.remaining_km,
            percent_complete: status.percent_complete,
        }
    }
}

/// Resumen del dashboard por vehículo
#[derive(Debug, Serialize)]
pub struct DashboardSummaryResponse {
    pub vehicle: VehicleResponse,
    pub last_fill_up: Option<FillUpResponse>,
    /// null cuando no hay repostajes de los que derivar consumo
    pub rolling_avg_consumption: Option<f64>,
    pub month_cost: f64,
    pub maintenance: Option<MaintenanceStatusResponse>,
}

impl From<DashboardSummary> for DashboardSummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            vehicle: summary.vehicle.into(),
            last_fill_up: summary.last_fill_up.map(Into::into),
            rolling_avg_consumption: summary.rolling_avg_consumption,
            month_cost: summary.month_cost,
            maintenance: summary.maintenance.map(Into::into),
        }
    }
}
