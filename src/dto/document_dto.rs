//! DTOs de Document

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::document::Document;

/// Request para registrar un documento de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 2, max = 50))]
    pub doc_type: String,

    #[validate(length(max = 100))]
    pub number: Option<String>,

    pub issued_at: Option<NaiveDate>,

    pub expires_at: NaiveDate,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Request para actualizar un documento existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    #[validate(length(min = 2, max = 50))]
    pub doc_type: Option<String>,

    #[validate(length(max = 100))]
    pub number: Option<String>,

    pub issued_at: Option<NaiveDate>,

    pub expires_at: Option<NaiveDate>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Query para documentos próximos a caducar
#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    /// Días hacia adelante; por defecto 30
    pub days: Option<i64>,
}

/// Response de documento
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub doc_type: String,
    pub number: Option<String>,
    pub issued_at: Option<NaiveDate>,
    pub expires_at: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            vehicle_id: document.vehicle_id,
            doc_type: document.doc_type,
            number: document.number,
            issued_at: document.issued_at,
            expires_at: document.expires_at,
            notes: document.notes,
            created_at: document.created_at,
        }
    }
}
