use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::Document;
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        doc_type: String,
        number: Option<String>,
        issued_at: Option<NaiveDate>,
        expires_at: NaiveDate,
        notes: Option<String>,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (id, vehicle_id, doc_type, number, issued_at, expires_at, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(doc_type)
        .bind(number)
        .bind(issued_at)
        .bind(expires_at)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating document: {}", e)))?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding document: {}", e)))?;

        Ok(document)
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE vehicle_id = $1 ORDER BY expires_at ASC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing documents: {}", e)))?;

        Ok(documents)
    }

    /// Documentos que caducan en o antes de la fecha de corte
    pub async fn list_expiring(&self, cutoff: NaiveDate) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE expires_at <= $1 ORDER BY expires_at ASC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing expiring documents: {}", e)))?;

        Ok(documents)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        doc_type: Option<String>,
        number: Option<String>,
        issued_at: Option<NaiveDate>,
        expires_at: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Document, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))?;

        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET doc_type = $2, number = $3, issued_at = $4, expires_at = $5, notes = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(doc_type.unwrap_or(current.doc_type))
        .bind(number.or(current.number))
        .bind(issued_at.or(current.issued_at))
        .bind(expires_at.unwrap_or(current.expires_at))
        .bind(notes.or(current.notes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating document: {}", e)))?;

        Ok(document)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting document: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Documento no encontrado".to_string()));
        }

        Ok(())
    }
}
