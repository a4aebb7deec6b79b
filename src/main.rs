mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::connection::mask_database_url;
use middleware::auth_middleware::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use services::notification_service::build_notifier;
use state::AppState;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Manager - Backend de gestión de flota");
    info!("==============================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::connection::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!(
        "✅ Base de datos conectada: {}",
        mask_database_url(&config.database_url)
    );

    database::schema::ensure_schema(&pool).await?;
    database::schema::seed_admin(&pool, &config.admin_username, &config.admin_password).await?;

    // Canal de alertas de mantenimiento
    let notifier = build_notifier(&config);

    let app_state = AppState::new(pool, config.clone(), notifier);

    // Rutas protegidas por el middleware de autenticación
    let protected = Router::new()
        .nest("/api/auth", routes::auth_routes::create_auth_me_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/fillup", routes::fill_up_routes::create_fill_up_router())
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest(
            "/api/document",
            routes::document_routes::create_document_router(),
        )
        .nest(
            "/api/equipment",
            routes::equipment_routes::create_equipment_router(),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // CORS abierto en desarrollo; restringido a los orígenes configurados
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("⛽ Fill-ups:");
    info!("   POST /api/fillup - Registrar repostaje (deriva consumo)");
    info!("   GET  /api/fillup/vehicle/:id - Historial de repostajes");
    info!("🔧 Maintenance:");
    info!("   PUT  /api/maintenance/:vehicle_id - Registrar mantenimiento");
    info!("   GET  /api/maintenance/:vehicle_id - Programa actual");
    info!("📄 Documents:");
    info!("   POST /api/document - Registrar documento");
    info!("   GET  /api/document/vehicle/:id - Documentos del vehículo");
    info!("   GET  /api/document/expiring - Próximos a caducar");
    info!("   PUT  /api/document/:id - Actualizar documento");
    info!("   DELETE /api/document/:id - Eliminar documento");
    info!("🧰 Equipment:");
    info!("   POST /api/equipment - Alta de equipamiento");
    info!("   GET  /api/equipment - Listar equipamiento");
    info!("   GET  /api/equipment/:id - Obtener equipamiento");
    info!("   PUT  /api/equipment/:id - Actualizar equipamiento");
    info!("   DELETE /api/equipment/:id - Eliminar equipamiento");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard/:vehicle_id - Resumen del vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-manager",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
