//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea a la tabla vehicles.
//! El motor de derivación nunca muta vehículos, solo los lee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: String,
    pub color: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
