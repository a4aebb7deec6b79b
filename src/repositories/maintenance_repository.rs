use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceSchedule;
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<MaintenanceSchedule>, AppError> {
        let schedule = sqlx::query_as::<_, MaintenanceSchedule>(
            "SELECT * FROM maintenance_schedules WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding maintenance schedule: {}", e)))?;

        Ok(schedule)
    }

    /// Insertar o reemplazar por completo el programa del vehículo
    pub async fn upsert(
        &self,
        record: &MaintenanceSchedule,
    ) -> Result<MaintenanceSchedule, AppError> {
        let schedule = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            INSERT INTO maintenance_schedules (
                vehicle_id, last_service_odometer, last_service_date,
                next_service_odometer, interval_km
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (vehicle_id) DO UPDATE SET
                last_service_odometer = EXCLUDED.last_service_odometer,
                last_service_date = EXCLUDED.last_service_date,
                next_service_odometer = EXCLUDED.next_service_odometer,
                interval_km = EXCLUDED.interval_km
            RETURNING *
            "#,
        )
        .bind(record.vehicle_id)
        .bind(record.last_service_odometer)
        .bind(record.last_service_date)
        .bind(record.next_service_odometer)
        .bind(record.interval_km)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error upserting maintenance schedule: {}", e)))?;

        Ok(schedule)
    }
}
