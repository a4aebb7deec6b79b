//! Repositorios de acceso a datos
//!
//! Cada tabla tiene su repositorio con queries parametrizadas. El trait
//! `FleetStore` es la interfaz de persistencia que se inyecta en el motor
//! de derivación, de forma que el motor se puede probar sin base de datos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::fill_up::FillUp;
use crate::models::maintenance::MaintenanceSchedule;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub mod document_repository;
pub mod equipment_repository;
pub mod fill_up_repository;
pub mod fleet_store;
pub mod maintenance_repository;
pub mod user_repository;
pub mod vehicle_repository;

/// Operaciones de persistencia que necesita el motor de derivación
#[async_trait]
pub trait FleetStore: Send + Sync {
    async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError>;

    /// Repostaje más reciente del vehículo con lectura de odómetro,
    /// ordenado por timestamp descendente, límite uno
    async fn find_latest_fill_up_with_odometer(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<FillUp>, AppError>;

    async fn insert_fill_up(&self, record: FillUp) -> Result<FillUp, AppError>;

    async fn list_recent_fill_ups(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<FillUp>, AppError>;

    /// Suma de costes de repostaje en [from, until); 0 si no hay registros
    async fn sum_costs_in_period(
        &self,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<f64, AppError>;

    async fn find_maintenance_schedule(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<MaintenanceSchedule>, AppError>;

    async fn upsert_maintenance_schedule(
        &self,
        record: MaintenanceSchedule,
    ) -> Result<MaintenanceSchedule, AppError>;
}

#[cfg(test)]
pub(crate) mod memory {
    //! Implementación en memoria de `FleetStore` para tests del motor

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryFleetStore {
        pub vehicles: Mutex<Vec<Vehicle>>,
        pub fill_ups: Mutex<Vec<FillUp>>,
        pub schedules: Mutex<Vec<MaintenanceSchedule>>,
        /// Simula un fallo de almacenamiento al consultar el programa
        pub fail_schedule_lookup: AtomicBool,
    }

    impl MemoryFleetStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_vehicle(vehicle: Vehicle) -> Self {
            let store = Self::new();
            store.vehicles.lock().unwrap().push(vehicle);
            store
        }

        pub fn add_schedule(&self, schedule: MaintenanceSchedule) {
            self.schedules.lock().unwrap().push(schedule);
        }

        pub fn fail_schedule_lookups(&self) {
            self.fail_schedule_lookup.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl FleetStore for MemoryFleetStore {
        async fn find_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, AppError> {
            Ok(self
                .vehicles
                .lock()
                .unwrap()
                .iter()
                .find(|v| v.id == vehicle_id)
                .cloned())
        }

        async fn find_latest_fill_up_with_odometer(
            &self,
            vehicle_id: Uuid,
        ) -> Result<Option<FillUp>, AppError> {
            let fill_ups = self.fill_ups.lock().unwrap();
            Ok(fill_ups
                .iter()
                .filter(|f| f.vehicle_id == vehicle_id)
                .max_by_key(|f| f.timestamp)
                .cloned())
        }

        async fn insert_fill_up(&self, record: FillUp) -> Result<FillUp, AppError> {
            self.fill_ups.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn list_recent_fill_ups(
            &self,
            vehicle_id: Uuid,
            limit: i64,
        ) -> Result<Vec<FillUp>, AppError> {
            let mut rows: Vec<FillUp> = self
                .fill_ups
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.vehicle_id == vehicle_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn sum_costs_in_period(
            &self,
            vehicle_id: Uuid,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> Result<f64, AppError> {
            Ok(self
                .fill_ups
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.vehicle_id == vehicle_id && f.timestamp >= from && f.timestamp < until)
                .map(|f| f.cost)
                .sum())
        }

        async fn find_maintenance_schedule(
            &self,
            vehicle_id: Uuid,
        ) -> Result<Option<MaintenanceSchedule>, AppError> {
            if self.fail_schedule_lookup.load(Ordering::SeqCst) {
                return Err(AppError::Database("schedule lookup failed".to_string()));
            }
            Ok(self
                .schedules
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.vehicle_id == vehicle_id)
                .cloned())
        }

        async fn upsert_maintenance_schedule(
            &self,
            record: MaintenanceSchedule,
        ) -> Result<MaintenanceSchedule, AppError> {
            let mut schedules = self.schedules.lock().unwrap();
            schedules.retain(|s| s.vehicle_id != record.vehicle_id);
            schedules.push(record.clone());
            Ok(record)
        }
    }
}
