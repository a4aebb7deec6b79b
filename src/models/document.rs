//! Modelo de Document
//!
//! Documentos de un vehículo con fecha de caducidad (seguro, ITV, etc).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Documento persistido - mapea a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub doc_type: String,
    pub number: Option<String>,
    pub issued_at: Option<NaiveDate>,
    pub expires_at: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
