use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fill_up::FillUp;
use crate::utils::errors::AppError;

pub struct FillUpRepository {
    pool: PgPool,
}

impl FillUpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un repostaje ya derivado. Los repostajes son inmutables:
    /// no hay update ni delete.
    pub async fn insert(&self, record: &FillUp) -> Result<FillUp, AppError> {
        let fill_up = sqlx::query_as::<_, FillUp>(
            r#"
            INSERT INTO fill_ups (
                id, vehicle_id, timestamp, liters, cost, price_per_liter,
                odometer, distance, avg_consumption, location, fuel_type, external_pump_ref
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.timestamp)
        .bind(record.liters)
        .bind(record.cost)
        .bind(record.price_per_liter)
        .bind(record.odometer)
        .bind(record.distance)
        .bind(record.avg_consumption)
        .bind(&record.location)
        .bind(&record.fuel_type)
        .bind(&record.external_pump_ref)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error inserting fill-up: {}", e)))?;

        Ok(fill_up)
    }

    /// Último repostaje del vehículo con lectura de odómetro
    pub async fn find_latest_with_odometer(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<FillUp>, AppError> {
        let fill_up = sqlx::query_as::<_, FillUp>(
            r#"
            SELECT * FROM fill_ups
            WHERE vehicle_id = $1 AND odometer IS NOT NULL
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding latest fill-up: {}", e)))?;

        Ok(fill_up)
    }

    pub async fn list_recent(&self, vehicle_id: Uuid, limit: i64) -> Result<Vec<FillUp>, AppError> {
        let fill_ups = sqlx::query_as::<_, FillUp>(
            r#"
            SELECT * FROM fill_ups
            WHERE vehicle_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing fill-ups: {}", e)))?;

        Ok(fill_ups)
    }

    /// Suma de costes en [from, until); 0 si no hay repostajes en el periodo
    pub async fn sum_costs_between(
        &self,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<f64, AppError> {
        let (total,): (f64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(cost), 0)::DOUBLE PRECISION
            FROM fill_ups
            WHERE vehicle_id = $1 AND timestamp >= $2 AND timestamp < $3
            "#,
        )
        .bind(vehicle_id)
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error summing fill-up costs: {}", e)))?;

        Ok(total)
    }
}
