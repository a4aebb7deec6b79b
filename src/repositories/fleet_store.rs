//! Adaptador Postgres del trait `FleetStore`
//!
//! Delega en los repositorios concretos. Es la implementación que el motor
//! de derivación usa en producción.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fill_up::FillUp;
use crate::models::maintenance::MaintenanceSchedule;
use crate::models::vehicle::Vehicle;
use crate::repositories::fill_up_repository::FillUpRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::FleetStore;
use crate::utils::errors::AppError;

pub struct PgFleetStore {
    vehicles: VehicleRepository,
    fill_ups: FillUpRepository,
    maintenance: MaintenanceRepository,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            fill_ups: FillUpRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        self.vehicles.find_by_id(vehicle_id).await
    }

    async fn find_latest_fill_up_with_odometer(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<FillUp>, AppError> {
        self.fill_ups.find_latest_with_odometer(vehicle_id).await
    }

    async fn insert_fill_up(&self, record: FillUp) -> Result<FillUp, AppError> {
        self.fill_ups.insert(&record).await
    }

    async fn list_recent_fill_ups(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<FillUp>, AppError> {
        self.fill_ups.list_recent(vehicle_id, limit).await
    }

    async fn sum_costs_in_period(
        &self,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<f64, AppError> {
        self.fill_ups.sum_costs_between(vehicle_id, from, until).await
    }

    async fn find_maintenance_schedule(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<MaintenanceSchedule>, AppError> {
        self.maintenance.find_by_vehicle(vehicle_id).await
    }

    async fn upsert_maintenance_schedule(
        &self,
        record: MaintenanceSchedule,
    ) -> Result<MaintenanceSchedule, AppError> {
        self.maintenance.upsert(&record).await
    }
}
