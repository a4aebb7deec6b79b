//! Canal de notificaciones para señales de mantenimiento
//!
//! Las alertas son fire-and-forget: un fallo de entrega se registra en el
//! log y nunca se propaga al caller. El sink por defecto es el log del
//! servidor; si hay configuración de Telegram se envían por el bot.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::environment::EnvironmentConfig;
use crate::models::maintenance::MaintenanceAlert;
use crate::utils::errors::AppError;

/// Colaborador externo de notificaciones
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &MaintenanceAlert) -> Result<(), AppError>;
}

/// Sink que escribe las alertas en el log del servidor
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn notify(&self, alert: &MaintenanceAlert) -> Result<(), AppError> {
        log::info!("🔔 {}", alert.message());
        Ok(())
    }
}

/// Sink que envía las alertas a un chat de Telegram
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            chat_id,
        }
    }
}

#[async_trait]
impl AlertNotifier for TelegramNotifier {
    async fn notify(&self, alert: &MaintenanceAlert) -> Result<(), AppError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": alert.message(),
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Telegram request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Telegram responded with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Construir el notificador según la configuración del entorno
pub fn build_notifier(config: &EnvironmentConfig) -> Arc<dyn AlertNotifier> {
    match (&config.telegram_bot_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            tracing::info!("📨 Alertas de mantenimiento via Telegram");
            Arc::new(TelegramNotifier::new(token.clone(), chat_id.clone()))
        }
        _ => {
            tracing::info!("📨 Alertas de mantenimiento via log del servidor");
            Arc::new(LogNotifier)
        }
    }
}

#[cfg(test)]
pub(crate) mod doubles {
    //! Dobles de notificador para tests del motor

    use std::sync::Mutex;

    use super::*;

    /// Guarda las alertas recibidas para poder hacer asserts sobre ellas
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub alerts: Mutex<Vec<MaintenanceAlert>>,
    }

    #[async_trait]
    impl AlertNotifier for RecordingNotifier {
        async fn notify(&self, alert: &MaintenanceAlert) -> Result<(), AppError> {
            self.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    /// Falla siempre, para comprobar que la entrega nunca bloquea nada
    pub struct FailingNotifier;

    #[async_trait]
    impl AlertNotifier for FailingNotifier {
        async fn notify(&self, _alert: &MaintenanceAlert) -> Result<(), AppError> {
            Err(AppError::ExternalApi("delivery channel down".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let alert = MaintenanceAlert::ApproachingService {
            vehicle_id: Uuid::new_v4(),
            plate: "AB-123-CD".to_string(),
            remaining_km: 250.0,
        };
        assert!(LogNotifier.notify(&alert).await.is_ok());
    }

    #[test]
    fn test_alert_messages_mention_plate_and_distance() {
        let approaching = MaintenanceAlert::ApproachingService {
            vehicle_id: Uuid::new_v4(),
            plate: "AB-123-CD".to_string(),
            remaining_km: 250.0,
        };
        assert!(approaching.message().contains("AB-123-CD"));
        assert!(approaching.message().contains("250"));

        let overdue = MaintenanceAlert::OverdueService {
            vehicle_id: Uuid::new_v4(),
            plate: "ZZ-999-ZZ".to_string(),
            overdue_km: 1200.0,
        };
        assert!(overdue.message().contains("ZZ-999-ZZ"));
        assert!(overdue.message().contains("1200"));
    }
}
