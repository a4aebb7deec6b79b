//! Modelo de FillUp
//!
//! Un FillUp representa un repostaje. Los campos `distance` y
//! `avg_consumption` son derivados por el motor a partir del repostaje
//! anterior del vehículo; el resto son entradas crudas. Los registros
//! son inmutables una vez persistidos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Repostaje persistido - mapea a la tabla fill_ups
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FillUp {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub liters: f64,
    pub cost: f64,
    pub price_per_liter: f64,
    pub odometer: f64,
    /// Distancia desde el repostaje anterior. Se guarda el valor crudo,
    /// que puede ser cero o negativo si el odómetro no avanzó.
    pub distance: f64,
    /// Litros por cada 100 km. 0 cuando no hay muestra válida.
    pub avg_consumption: f64,
    pub location: Option<String>,
    pub fuel_type: Option<String>,
    pub external_pump_ref: Option<String>,
}

/// Entrada cruda de un repostaje, antes de la derivación
#[derive(Debug, Clone)]
pub struct FillUpInput {
    pub vehicle_id: Uuid,
    pub odometer: f64,
    pub liters: f64,
    pub cost: f64,
    pub price_per_liter: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub fuel_type: Option<String>,
    pub external_pump_ref: Option<String>,
}
