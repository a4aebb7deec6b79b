use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest};
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

/// Ventana por defecto para "documentos próximos a caducar"
const DEFAULT_EXPIRING_DAYS: i64 = 30;

pub struct DocumentController {
    documents: DocumentRepository,
    vehicles: VehicleRepository,
}

impl DocumentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            documents: DocumentRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let document = self
            .documents
            .create(
                request.vehicle_id,
                request.doc_type.to_lowercase(),
                request.number,
                request.issued_at,
                request.expires_at,
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            document.into(),
            "Documento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let documents = self.documents.list_by_vehicle(vehicle_id).await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    /// Documentos que caducan dentro de la ventana indicada (en días)
    pub async fn list_expiring(
        &self,
        days: Option<i64>,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let days = days.unwrap_or(DEFAULT_EXPIRING_DAYS);
        if days < 0 {
            return Err(AppError::Validation(
                "days debe ser un número no negativo".to_string(),
            ));
        }

        let cutoff = Utc::now().date_naive() + Duration::days(days);
        let documents = self.documents.list_expiring(cutoff).await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let document = self
            .documents
            .update(
                id,
                request.doc_type.map(|t| t.to_lowercase()),
                request.number,
                request.issued_at,
                request.expires_at,
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            document.into(),
            "Documento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.documents.delete(id).await
    }
}
