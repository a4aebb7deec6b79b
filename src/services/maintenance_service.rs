//! Programas de mantenimiento y evaluación de alertas
//!
//! La evaluación es de solo lectura sobre el programa: nunca lo muta.
//! Los umbrales son constantes con nombre, no literales sueltos.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::maintenance::{MaintenanceAlert, MaintenanceSchedule};
use crate::models::vehicle::Vehicle;
use crate::repositories::FleetStore;
use crate::utils::errors::AppError;

/// Distancia restante a partir de la cual se avisa de un servicio próximo
pub const SERVICE_ALERT_THRESHOLD_KM: f64 = 500.0;

/// Intervalo de servicio por defecto cuando el dueño no indica otro
pub const DEFAULT_SERVICE_INTERVAL_KM: f64 = 10000.0;

pub struct MaintenanceService<S: FleetStore> {
    store: S,
}

impl<S: FleetStore> MaintenanceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registrar un mantenimiento realizado. Reemplaza por completo el
    /// programa anterior del vehículo (upsert por vehicle_id) y recalcula
    /// next_service_odometer = last_service_odometer + interval_km.
    pub async fn set_schedule(
        &self,
        vehicle_id: Uuid,
        last_service_odometer: f64,
        last_service_date: NaiveDate,
        interval_km: Option<f64>,
    ) -> Result<MaintenanceSchedule, AppError> {
        if !last_service_odometer.is_finite() || last_service_odometer < 0.0 {
            return Err(AppError::Validation(
                "last_service_odometer debe ser un número no negativo".to_string(),
            ));
        }

        let interval_km = interval_km.unwrap_or(DEFAULT_SERVICE_INTERVAL_KM);
        if !interval_km.is_finite() || interval_km <= 0.0 {
            return Err(AppError::Validation(
                "interval_km debe ser un número positivo".to_string(),
            ));
        }

        self.store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let schedule = MaintenanceSchedule {
            vehicle_id,
            last_service_odometer,
            last_service_date,
            next_service_odometer: last_service_odometer + interval_km,
            interval_km,
        };

        self.store.upsert_maintenance_schedule(schedule).await
    }

    pub async fn get_schedule(&self, vehicle_id: Uuid) -> Result<MaintenanceSchedule, AppError> {
        self.store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        self.store
            .find_maintenance_schedule(vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("El vehículo no tiene programa de mantenimiento".to_string())
            })
    }
}

/// Evaluar si el odómetro actual cruza algún umbral del programa.
/// Sin programa no hay señal. Con `remaining = next_service_odometer -
/// odometer_now`:
/// - `0 < remaining <= SERVICE_ALERT_THRESHOLD_KM` → servicio próximo
/// - `remaining <= 0` → servicio vencido, con el exceso acumulado
/// - en otro caso → nada
pub fn evaluate_alert(
    vehicle: &Vehicle,
    schedule: Option<&MaintenanceSchedule>,
    odometer_now: f64,
) -> Option<MaintenanceAlert> {
    let schedule = schedule?;
    let remaining = schedule.next_service_odometer - odometer_now;

    if remaining <= 0.0 {
        Some(MaintenanceAlert::OverdueService {
            vehicle_id: vehicle.id,
            plate: vehicle.plate.clone(),
            overdue_km: odometer_now - schedule.next_service_odometer,
        })
    } else if remaining <= SERVICE_ALERT_THRESHOLD_KM {
        Some(MaintenanceAlert::ApproachingService {
            vehicle_id: vehicle.id,
            plate: vehicle.plate.clone(),
            remaining_km: remaining,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repositories::memory::MemoryFleetStore;

    fn test_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: "AB-123-CD".to_string(),
            make: Some("Renault".to_string()),
            model: Some("Kangoo".to_string()),
            year: Some(2019),
            fuel_type: "diesel".to_string(),
            color: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    fn schedule_with_next(vehicle_id: Uuid, next: f64) -> MaintenanceSchedule {
        MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: next - DEFAULT_SERVICE_INTERVAL_KM,
            last_service_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            next_service_odometer: next,
            interval_km: DEFAULT_SERVICE_INTERVAL_KM,
        }
    }

    #[test]
    fn test_no_schedule_no_alert() {
        let vehicle = test_vehicle();
        assert_eq!(evaluate_alert(&vehicle, None, 99999.0), None);
    }

    #[test]
    fn test_far_from_service_no_alert() {
        let vehicle = test_vehicle();
        let schedule = schedule_with_next(vehicle.id, 60000.0);
        // remaining = 501, justo fuera del umbral
        assert_eq!(evaluate_alert(&vehicle, Some(&schedule), 59499.0), None);
    }

    #[test]
    fn test_approaching_service_at_threshold() {
        let vehicle = test_vehicle();
        let schedule = schedule_with_next(vehicle.id, 60000.0);

        // remaining = 500 exacto: dentro del umbral
        match evaluate_alert(&vehicle, Some(&schedule), 59500.0) {
            Some(MaintenanceAlert::ApproachingService { remaining_km, .. }) => {
                assert_eq!(remaining_km, 500.0);
            }
            other => panic!("expected ApproachingService, got {:?}", other),
        }

        // remaining = 1
        match evaluate_alert(&vehicle, Some(&schedule), 59999.0) {
            Some(MaintenanceAlert::ApproachingService { remaining_km, .. }) => {
                assert_eq!(remaining_km, 1.0);
            }
            other => panic!("expected ApproachingService, got {:?}", other),
        }
    }

    #[test]
    fn test_overdue_at_and_past_threshold() {
        let vehicle = test_vehicle();
        let schedule = schedule_with_next(vehicle.id, 60000.0);

        // remaining = 0: ya vencido
        match evaluate_alert(&vehicle, Some(&schedule), 60000.0) {
            Some(MaintenanceAlert::OverdueService { overdue_km, .. }) => {
                assert_eq!(overdue_km, 0.0);
            }
            other => panic!("expected OverdueService, got {:?}", other),
        }

        match evaluate_alert(&vehicle, Some(&schedule), 61200.0) {
            Some(MaintenanceAlert::OverdueService { overdue_km, .. }) => {
                assert_eq!(overdue_km, 1200.0);
            }
            other => panic!("expected OverdueService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_schedule_computes_next_service() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let service = MaintenanceService::new(MemoryFleetStore::with_vehicle(vehicle));

        let schedule = service
            .set_schedule(
                vehicle_id,
                50000.0,
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                Some(10000.0),
            )
            .await
            .unwrap();

        assert_eq!(schedule.next_service_odometer, 60000.0);
        assert_eq!(schedule.interval_km, 10000.0);
    }

    #[tokio::test]
    async fn test_set_schedule_uses_default_interval() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let service = MaintenanceService::new(MemoryFleetStore::with_vehicle(vehicle));

        let schedule = service
            .set_schedule(
                vehicle_id,
                20000.0,
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(schedule.interval_km, DEFAULT_SERVICE_INTERVAL_KM);
        assert_eq!(schedule.next_service_odometer, 30000.0);
    }

    #[tokio::test]
    async fn test_set_schedule_replaces_previous_one() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let service = MaintenanceService::new(MemoryFleetStore::with_vehicle(vehicle));
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        service
            .set_schedule(vehicle_id, 50000.0, date, None)
            .await
            .unwrap();
        let replaced = service
            .set_schedule(vehicle_id, 58000.0, date, Some(15000.0))
            .await
            .unwrap();

        assert_eq!(replaced.next_service_odometer, 73000.0);

        let current = service.get_schedule(vehicle_id).await.unwrap();
        assert_eq!(current.last_service_odometer, 58000.0);
        assert_eq!(current.next_service_odometer, 73000.0);
    }

    #[tokio::test]
    async fn test_set_schedule_rejects_invalid_odometer() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let service = MaintenanceService::new(MemoryFleetStore::with_vehicle(vehicle));
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let result = service.set_schedule(vehicle_id, bad, date, None).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_set_schedule_rejects_invalid_interval() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let service = MaintenanceService::new(MemoryFleetStore::with_vehicle(vehicle));
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        for bad in [0.0, -500.0, f64::NAN] {
            let result = service
                .set_schedule(vehicle_id, 1000.0, date, Some(bad))
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_set_schedule_unknown_vehicle() {
        let service = MaintenanceService::new(MemoryFleetStore::new());
        let result = service
            .set_schedule(
                Uuid::new_v4(),
                1000.0,
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
