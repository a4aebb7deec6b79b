//! DTOs de FillUp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::fill_up::{FillUp, FillUpInput};

/// Request para registrar un repostaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFillUpRequest {
    pub vehicle_id: Uuid,

    #[validate(range(min = 0.0))]
    pub odometer: f64,

    #[validate(range(min = 0.0))]
    pub liters: f64,

    #[validate(range(min = 0.0))]
    pub cost: f64,

    #[validate(range(min = 0.0))]
    pub price_per_liter: Option<f64>,

    /// Momento del repostaje; por defecto, ahora
    pub timestamp: Option<DateTime<Utc>>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub fuel_type: Option<String>,

    #[validate(length(max = 100))]
    pub external_pump_ref: Option<String>,
}

impl From<CreateFillUpRequest> for FillUpInput {
    fn from(request: CreateFillUpRequest) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            odometer: request.odometer,
            liters: request.liters,
            cost: request.cost,
            price_per_liter: request.price_per_liter,
            timestamp: request.timestamp,
            location: request.location,
            fuel_type: request.fuel_type,
            external_pump_ref: request.external_pump_ref,
        }
    }
}

/// Response de repostaje con los campos derivados
#[derive(Debug, Serialize)]
pub struct FillUpResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub liters: f64,
    pub cost: f64,
    pub price_per_liter: f64,
    pub odometer: f64,
    pub distance: f64,
    pub avg_consumption: f64,
    pub location: Option<String>,
    pub fuel_type: Option<String>,
    pub external_pump_ref: Option<String>,
}

impl From<FillUp> for FillUpResponse {
    fn from(fill_up: FillUp) -> Self {
        Self {
            id: fill_up.id,
            vehicle_id: fill_up.vehicle_id,
            timestamp: fill_up.timestamp,
            liters: fill_up.liters,
            cost: fill_up.cost,
            price_per_liter: fill_up.price_per_liter,
            odometer: fill_up.odometer,
            distance: fill_up.distance,
            avg_consumption: fill_up.avg_consumption,
            location: fill_up.location,
            fuel_type: fill_up.fuel_type,
            external_pump_ref: fill_up.external_pump_ref,
        }
    }
}

/// Filtros para el listado de repostajes
#[derive(Debug, Deserialize)]
pub struct FillUpListQuery {
    pub limit: Option<i64>,
}
