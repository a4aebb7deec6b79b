use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::equipment::Equipment;
use crate::utils::errors::AppError;

pub struct EquipmentRepository {
    pool: PgPool,
}

impl EquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Option<Uuid>,
        name: String,
        serial_number: Option<String>,
        status: String,
    ) -> Result<Equipment, AppError> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (id, vehicle_id, name, serial_number, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(name)
        .bind(serial_number)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating equipment: {}", e)))?;

        Ok(equipment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Equipment>, AppError> {
        let equipment = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding equipment: {}", e)))?;

        Ok(equipment)
    }

    pub async fn list(&self) -> Result<Vec<Equipment>, AppError> {
        let equipment =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error listing equipment: {}", e)))?;

        Ok(equipment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        vehicle_id: Option<Uuid>,
        name: Option<String>,
        serial_number: Option<String>,
        status: Option<String>,
    ) -> Result<Equipment, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipamiento no encontrado".to_string()))?;

        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET vehicle_id = $2, name = $3, serial_number = $4, status = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id.or(current.vehicle_id))
        .bind(name.unwrap_or(current.name))
        .bind(serial_number.or(current.serial_number))
        .bind(status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating equipment: {}", e)))?;

        Ok(equipment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting equipment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Equipamiento no encontrado".to_string()));
        }

        Ok(())
    }
}
