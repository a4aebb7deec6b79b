//! Motor de derivación de combustible
//!
//! Convierte las lecturas crudas de odómetro y repostaje en estadísticas de
//! consumo, y dispara la evaluación de alertas de mantenimiento como efecto
//! secundario de cada repostaje.
//!
//! Reglas de derivación:
//! - Primer repostaje conocido del vehículo: distance = 0, avg = 0 (no hay
//!   línea base).
//! - Con repostaje anterior: distance = odometer_now - prior_odometer. Si
//!   distance <= 0 (odómetro sin avance, retroceso o corrección) el consumo
//!   es 0 y la distancia se guarda con su valor crudo, sin recortar, para
//!   auditoría. Nunca se produce un consumo negativo ni una división entre
//!   cero.
//! - Con distance > 0: avg = liters / distance * 100 (litros por 100 km).
//!
//! No hay deduplicación: dos envíos idénticos crean dos registros. Los
//! pasos consulta-previo → cálculo → insert → evaluación de alerta son
//! sentencias secuenciales independientes, sin transacción que las envuelva.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use uuid::Uuid;

use crate::models::dashboard::{DashboardSummary, MaintenanceStatus};
use crate::models::fill_up::{FillUp, FillUpInput};
use crate::models::maintenance::MaintenanceSchedule;
use crate::models::vehicle::Vehicle;
use crate::repositories::FleetStore;
use crate::services::maintenance_service;
use crate::services::notification_service::AlertNotifier;
use crate::utils::errors::AppError;

/// Número de repostajes de la media móvil del dashboard
pub const DASHBOARD_ROLLING_WINDOW: i64 = 10;

pub struct FuelService<S: FleetStore> {
    store: S,
    notifier: Arc<dyn AlertNotifier>,
}

impl<S: FleetStore> FuelService<S> {
    pub fn new(store: S, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Registrar un repostaje y derivar distancia y consumo medio respecto
    /// al repostaje anterior del vehículo.
    pub async fn record_fill_up(&self, input: FillUpInput) -> Result<FillUp, AppError> {
        // La capa de API ya valida tipos; aquí solo se defiende la
        // aritmética de números no finitos
        for value in [input.odometer, input.liters, input.cost] {
            if !value.is_finite() {
                return Err(AppError::Validation(
                    "odometer, liters y cost deben ser números finitos".to_string(),
                ));
            }
        }
        if let Some(price) = input.price_per_liter {
            if !price.is_finite() {
                return Err(AppError::Validation(
                    "price_per_liter debe ser un número finito".to_string(),
                ));
            }
        }

        let vehicle = self
            .store
            .find_vehicle(input.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let prior = self
            .store
            .find_latest_fill_up_with_odometer(input.vehicle_id)
            .await?;

        let (distance, avg_consumption) = derive_consumption(
            prior.as_ref().map(|p| p.odometer),
            input.odometer,
            input.liters,
        );

        let price_per_liter = input.price_per_liter.unwrap_or_else(|| {
            if input.liters > 0.0 {
                input.cost / input.liters
            } else {
                0.0
            }
        });

        let record = FillUp {
            id: Uuid::new_v4(),
            vehicle_id: input.vehicle_id,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            liters: input.liters,
            cost: input.cost,
            price_per_liter,
            odometer: input.odometer,
            distance,
            avg_consumption,
            location: input.location,
            fuel_type: input.fuel_type,
            external_pump_ref: input.external_pump_ref,
        };

        let persisted = self.store.insert_fill_up(record).await?;

        // Señal de mantenimiento: aviso fire-and-forget, nunca bloquea ni
        // altera el repostaje ya persistido
        self.check_maintenance(&vehicle, input.odometer).await;

        Ok(persisted)
    }

    async fn check_maintenance(&self, vehicle: &Vehicle, odometer_now: f64) {
        match self.store.find_maintenance_schedule(vehicle.id).await {
            Ok(schedule) => {
                if let Some(alert) =
                    maintenance_service::evaluate_alert(vehicle, schedule.as_ref(), odometer_now)
                {
                    if let Err(e) = self.notifier.notify(&alert).await {
                        log::warn!("⚠️ No se pudo entregar la alerta de mantenimiento: {}", e);
                    }
                }
            }
            Err(e) => {
                log::warn!("⚠️ Error consultando el programa de mantenimiento: {}", e);
            }
        }
    }

    /// Resumen agregado del vehículo: último repostaje, media móvil de
    /// consumo, coste del mes natural en curso y estado de mantenimiento.
    pub async fn dashboard_summary(&self, vehicle_id: Uuid) -> Result<DashboardSummary, AppError> {
        let vehicle = self
            .store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let recent = self
            .store
            .list_recent_fill_ups(vehicle_id, DASHBOARD_ROLLING_WINDOW)
            .await?;

        let last_fill_up = recent.first().cloned();

        // Sin muestras la media queda en None ("sin datos"); nunca NaN
        let rolling_avg_consumption = if recent.is_empty() {
            None
        } else {
            let total: f64 = recent.iter().map(|f| f.avg_consumption).sum();
            Some(total / recent.len() as f64)
        };

        let (from, until) = current_month_range()?;
        let month_cost = self
            .store
            .sum_costs_in_period(vehicle_id, from, until)
            .await?;

        let maintenance = self
            .store
            .find_maintenance_schedule(vehicle_id)
            .await?
            .map(|schedule| {
                let last_known_odometer = last_fill_up
                    .as_ref()
                    .map(|f| f.odometer)
                    .unwrap_or(schedule.last_service_odometer);
                maintenance_status(schedule, last_known_odometer)
            });

        Ok(DashboardSummary {
            vehicle,
            last_fill_up,
            rolling_avg_consumption,
            month_cost,
            maintenance,
        })
    }
}

/// Derivar (distance, avg_consumption) de un repostaje respecto al anterior
pub fn derive_consumption(
    prior_odometer: Option<f64>,
    odometer_now: f64,
    liters: f64,
) -> (f64, f64) {
    match prior_odometer {
        None => (0.0, 0.0),
        Some(prior) => {
            let distance = odometer_now - prior;
            if distance > 0.0 {
                (distance, liters / distance * 100.0)
            } else {
                // Valor crudo preservado; el caller debe tratar una
                // distancia no positiva como muestra inválida de consumo
                (distance, 0.0)
            }
        }
    }
}

/// Estado de mantenimiento con el porcentaje de intervalo recorrido,
/// siempre recortado a [0, 100]
pub fn maintenance_status(
    schedule: MaintenanceSchedule,
    last_known_odometer: f64,
) -> MaintenanceStatus {
    let remaining_km = schedule.next_service_odometer - last_known_odometer;
    let percent_complete =
        ((schedule.interval_km - remaining_km) / schedule.interval_km * 100.0).clamp(0.0, 100.0);

    MaintenanceStatus {
        schedule,
        remaining_km,
        percent_complete,
    }
}

/// Rango [inicio, fin) del mes natural en curso en UTC
pub fn current_month_range() -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let now = Utc::now();

    let from = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::Internal("invalid month start".to_string()))?;

    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    let until = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::Internal("invalid month end".to_string()))?;

    Ok((from, until))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::repositories::memory::MemoryFleetStore;
    use crate::services::maintenance_service::DEFAULT_SERVICE_INTERVAL_KM;
    use crate::services::notification_service::doubles::{FailingNotifier, RecordingNotifier};
    use crate::models::maintenance::MaintenanceAlert;

    fn test_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: "AB-123-CD".to_string(),
            make: Some("Citroën".to_string()),
            model: Some("Berlingo".to_string()),
            year: Some(2020),
            fuel_type: "diesel".to_string(),
            color: Some("blanco".to_string()),
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    fn input(vehicle_id: Uuid, odometer: f64, liters: f64, cost: f64) -> FillUpInput {
        FillUpInput {
            vehicle_id,
            odometer,
            liters,
            cost,
            price_per_liter: None,
            timestamp: None,
            location: None,
            fuel_type: None,
            external_pump_ref: None,
        }
    }

    fn input_at(
        vehicle_id: Uuid,
        odometer: f64,
        liters: f64,
        cost: f64,
        timestamp: DateTime<Utc>,
    ) -> FillUpInput {
        FillUpInput {
            timestamp: Some(timestamp),
            ..input(vehicle_id, odometer, liters, cost)
        }
    }

    fn service_for(
        vehicle: Vehicle,
    ) -> (FuelService<MemoryFleetStore>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = FuelService::new(
            MemoryFleetStore::with_vehicle(vehicle),
            notifier.clone() as Arc<dyn AlertNotifier>,
        );
        (service, notifier)
    }

    #[tokio::test]
    async fn test_first_fill_up_has_no_baseline() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let result = service
            .record_fill_up(input(vehicle_id, 1000.0, 40.0, 200.0))
            .await
            .unwrap();

        assert_eq!(result.odometer, 1000.0);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.avg_consumption, 0.0);
        assert_eq!(result.price_per_liter, 5.0); // 200 / 40
    }

    #[tokio::test]
    async fn test_second_fill_up_derives_distance_and_consumption() {
        // Escenario extremo a extremo: 1000 km → 1500 km con 40 litros
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let base = Utc::now();
        service
            .record_fill_up(input_at(vehicle_id, 1000.0, 40.0, 200.0, base))
            .await
            .unwrap();

        let second = service
            .record_fill_up(input_at(
                vehicle_id,
                1500.0,
                40.0,
                200.0,
                base + Duration::hours(1),
            ))
            .await
            .unwrap();

        assert_eq!(second.distance, 500.0);
        assert_eq!(second.avg_consumption, 8.0); // 40 / 500 * 100
    }

    #[tokio::test]
    async fn test_strictly_increasing_sequence() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let base = Utc::now();
        let readings = [
            (10000.0, 35.0),
            (10450.0, 30.0),
            (11050.0, 48.0),
            (11500.0, 36.0),
        ];

        let mut prior: Option<f64> = None;
        for (i, (odometer, liters)) in readings.iter().enumerate() {
            let result = service
                .record_fill_up(input_at(
                    vehicle_id,
                    *odometer,
                    *liters,
                    *liters * 1.6,
                    base + Duration::hours(i as i64),
                ))
                .await
                .unwrap();

            match prior {
                None => {
                    assert_eq!(result.distance, 0.0);
                    assert_eq!(result.avg_consumption, 0.0);
                }
                Some(prev) => {
                    let expected_distance = odometer - prev;
                    assert_eq!(result.distance, expected_distance);
                    assert!(
                        (result.avg_consumption - liters / expected_distance * 100.0).abs()
                            < 1e-9
                    );
                }
            }
            prior = Some(*odometer);
        }
    }

    #[tokio::test]
    async fn test_odometer_rollback_preserves_raw_distance() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let base = Utc::now();
        service
            .record_fill_up(input_at(vehicle_id, 5000.0, 40.0, 200.0, base))
            .await
            .unwrap();

        // El odómetro retrocede: distancia cruda negativa, consumo 0
        let rollback = service
            .record_fill_up(input_at(
                vehicle_id,
                4800.0,
                30.0,
                150.0,
                base + Duration::hours(1),
            ))
            .await
            .unwrap();

        assert_eq!(rollback.distance, -200.0);
        assert_eq!(rollback.avg_consumption, 0.0);

        // Sin avance: distancia 0, consumo 0
        let stalled = service
            .record_fill_up(input_at(
                vehicle_id,
                4800.0,
                25.0,
                120.0,
                base + Duration::hours(2),
            ))
            .await
            .unwrap();

        assert_eq!(stalled.distance, 0.0);
        assert_eq!(stalled.avg_consumption, 0.0);
    }

    #[tokio::test]
    async fn test_no_dedup_two_identical_submissions() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let first = service
            .record_fill_up(input(vehicle_id, 1000.0, 40.0, 200.0))
            .await
            .unwrap();
        let second = service
            .record_fill_up(input(vehicle_id, 1000.0, 40.0, 200.0))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_not_found() {
        let (service, _) = service_for(test_vehicle());
        let result = service
            .record_fill_up(input(Uuid::new_v4(), 1000.0, 40.0, 200.0))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_non_finite_inputs_rejected() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = service
                .record_fill_up(input(vehicle_id, bad, 40.0, 200.0))
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_approaching_service_alert_emitted() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, notifier) = service_for(vehicle);

        service
            .record_fill_up(input(vehicle_id, 59000.0, 40.0, 200.0))
            .await
            .unwrap();
        // Todavía sin programa: ninguna alerta
        assert!(notifier.alerts.lock().unwrap().is_empty());

        let schedule = MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: 50000.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            next_service_odometer: 60000.0,
            interval_km: DEFAULT_SERVICE_INTERVAL_KM,
        };
        service.store.add_schedule(schedule);

        service
            .record_fill_up(input(vehicle_id, 59700.0, 40.0, 200.0))
            .await
            .unwrap();

        let alerts = notifier.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            MaintenanceAlert::ApproachingService { remaining_km, plate, .. } => {
                assert_eq!(*remaining_km, 300.0);
                assert_eq!(plate, "AB-123-CD");
            }
            other => panic!("expected ApproachingService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overdue_service_alert_emitted() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, notifier) = service_for(vehicle);

        let schedule = MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: 50000.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            next_service_odometer: 60000.0,
            interval_km: DEFAULT_SERVICE_INTERVAL_KM,
        };
        service.store.add_schedule(schedule);

        service
            .record_fill_up(input(vehicle_id, 61500.0, 40.0, 200.0))
            .await
            .unwrap();

        let alerts = notifier.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            MaintenanceAlert::OverdueService { overdue_km, .. } => {
                assert_eq!(*overdue_km, 1500.0);
            }
            other => panic!("expected OverdueService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_fail_fill_up() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let store = MemoryFleetStore::with_vehicle(vehicle);
        store.add_schedule(MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: 0.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            next_service_odometer: 100.0,
            interval_km: 100.0,
        });
        let service = FuelService::new(store, Arc::new(FailingNotifier));

        // El odómetro ya pasó el umbral: la alerta se intenta y falla,
        // pero el repostaje se persiste igualmente
        let result = service
            .record_fill_up(input(vehicle_id, 500.0, 40.0, 200.0))
            .await
            .unwrap();

        assert_eq!(result.odometer, 500.0);
    }

    #[tokio::test]
    async fn test_schedule_lookup_failure_does_not_fail_fill_up() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let store = MemoryFleetStore::with_vehicle(vehicle);
        store.fail_schedule_lookups();
        let service = FuelService::new(store, Arc::new(RecordingNotifier::default()));

        let result = service
            .record_fill_up(input(vehicle_id, 1000.0, 40.0, 200.0))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_dashboard_without_data() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let summary = service.dashboard_summary(vehicle_id).await.unwrap();

        assert!(summary.last_fill_up.is_none());
        assert_eq!(summary.rolling_avg_consumption, None); // "sin datos", no NaN ni 0
        assert_eq!(summary.month_cost, 0.0);
        assert!(summary.maintenance.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_rolling_average_uses_last_window() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        // 12 repostajes de 450 km y 36 litros → avg 8.0 cada uno salvo el
        // primero (0.0). La ventana de 10 solo ve muestras de 8.0.
        let base = Utc::now() - Duration::days(2);
        for i in 0..12 {
            service
                .record_fill_up(input_at(
                    vehicle_id,
                    10000.0 + 450.0 * i as f64,
                    36.0,
                    60.0,
                    base + Duration::hours(i),
                ))
                .await
                .unwrap();
        }

        let summary = service.dashboard_summary(vehicle_id).await.unwrap();
        let rolling = summary.rolling_avg_consumption.unwrap();
        assert!((rolling - 8.0).abs() < 1e-9);

        let last = summary.last_fill_up.unwrap();
        assert_eq!(last.odometer, 10000.0 + 450.0 * 11.0);
    }

    #[tokio::test]
    async fn test_dashboard_month_cost_ignores_other_months() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        let (month_start, _) = current_month_range().unwrap();

        // Repostaje del mes pasado: fuera del total
        service
            .record_fill_up(input_at(
                vehicle_id,
                1000.0,
                40.0,
                200.0,
                month_start - Duration::days(3),
            ))
            .await
            .unwrap();
        // Dos del mes en curso
        service
            .record_fill_up(input_at(vehicle_id, 1400.0, 30.0, 150.0, month_start))
            .await
            .unwrap();
        service
            .record_fill_up(input_at(
                vehicle_id,
                1800.0,
                30.0,
                155.5,
                month_start + Duration::hours(5),
            ))
            .await
            .unwrap();

        let summary = service.dashboard_summary(vehicle_id).await.unwrap();
        assert!((summary.month_cost - 305.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_dashboard_maintenance_state() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        service.store.add_schedule(MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: 50000.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            next_service_odometer: 60000.0,
            interval_km: 10000.0,
        });

        service
            .record_fill_up(input(vehicle_id, 57500.0, 40.0, 200.0))
            .await
            .unwrap();

        let summary = service.dashboard_summary(vehicle_id).await.unwrap();
        let maintenance = summary.maintenance.unwrap();
        assert_eq!(maintenance.remaining_km, 2500.0);
        assert_eq!(maintenance.percent_complete, 75.0);
    }

    #[tokio::test]
    async fn test_dashboard_without_fill_ups_falls_back_to_service_odometer() {
        let vehicle = test_vehicle();
        let vehicle_id = vehicle.id;
        let (service, _) = service_for(vehicle);

        service.store.add_schedule(MaintenanceSchedule {
            vehicle_id,
            last_service_odometer: 50000.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            next_service_odometer: 60000.0,
            interval_km: 10000.0,
        });

        let summary = service.dashboard_summary(vehicle_id).await.unwrap();
        let maintenance = summary.maintenance.unwrap();
        // Recién salido del taller: intervalo completo por delante
        assert_eq!(maintenance.remaining_km, 10000.0);
        assert_eq!(maintenance.percent_complete, 0.0);
    }

    #[test]
    fn test_derive_consumption_rules() {
        assert_eq!(derive_consumption(None, 1000.0, 40.0), (0.0, 0.0));
        assert_eq!(derive_consumption(Some(1000.0), 1500.0, 40.0), (500.0, 8.0));
        assert_eq!(derive_consumption(Some(1500.0), 1500.0, 40.0), (0.0, 0.0));
        assert_eq!(
            derive_consumption(Some(1500.0), 1200.0, 40.0),
            (-300.0, 0.0)
        );
    }

    #[test]
    fn test_percent_complete_is_clamped() {
        let schedule = |next: f64| MaintenanceSchedule {
            vehicle_id: Uuid::new_v4(),
            last_service_odometer: next - 10000.0,
            last_service_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            next_service_odometer: next,
            interval_km: 10000.0,
        };

        // remaining = -5000: muy pasado del servicio → 100, no 150
        let overdue = maintenance_status(schedule(60000.0), 65000.0);
        assert_eq!(overdue.remaining_km, -5000.0);
        assert_eq!(overdue.percent_complete, 100.0);

        // remaining = 20000 con intervalo 10000 → 0, no -100
        let fresh = maintenance_status(schedule(60000.0), 40000.0);
        assert_eq!(fresh.remaining_km, 20000.0);
        assert_eq!(fresh.percent_complete, 0.0);
    }

    #[test]
    fn test_current_month_range_brackets_now() {
        let (from, until) = current_month_range().unwrap();
        let now = Utc::now();
        assert!(from <= now && now < until);
        assert_eq!(from.day(), 1);
        assert_eq!(until.day(), 1);
    }
}
