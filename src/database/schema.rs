//! Esquema de la base de datos
//!
//! Las tablas se crean al arrancar el servidor si no existen todavía,
//! igual que los datos de ejemplo (usuario admin inicial).

use anyhow::Result;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id UUID PRIMARY KEY,
        plate TEXT NOT NULL UNIQUE,
        make TEXT,
        model TEXT,
        year INTEGER,
        fuel_type TEXT NOT NULL DEFAULT 'diesel',
        color TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fill_ups (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        timestamp TIMESTAMPTZ NOT NULL,
        liters DOUBLE PRECISION NOT NULL,
        cost DOUBLE PRECISION NOT NULL,
        price_per_liter DOUBLE PRECISION NOT NULL,
        odometer DOUBLE PRECISION NOT NULL,
        distance DOUBLE PRECISION NOT NULL,
        avg_consumption DOUBLE PRECISION NOT NULL,
        location TEXT,
        fuel_type TEXT,
        external_pump_ref TEXT
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_fill_ups_vehicle_time
        ON fill_ups (vehicle_id, timestamp DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_schedules (
        vehicle_id UUID PRIMARY KEY REFERENCES vehicles(id) ON DELETE CASCADE,
        last_service_odometer DOUBLE PRECISION NOT NULL,
        last_service_date DATE NOT NULL,
        next_service_odometer DOUBLE PRECISION NOT NULL,
        interval_km DOUBLE PRECISION NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id UUID PRIMARY KEY,
        vehicle_id UUID NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        doc_type TEXT NOT NULL,
        number TEXT,
        issued_at DATE,
        expires_at DATE NOT NULL,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment (
        id UUID PRIMARY KEY,
        vehicle_id UUID REFERENCES vehicles(id) ON DELETE SET NULL,
        name TEXT NOT NULL,
        serial_number TEXT,
        status TEXT NOT NULL DEFAULT 'in_service',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Crear todas las tablas si no existen
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("✅ Esquema de base de datos verificado");
    Ok(())
}

/// Sembrar el usuario admin inicial si la tabla de usuarios está vacía
pub async fn seed_admin(pool: &PgPool, username: &str, password: &str) -> Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let password_hash = hash(password, DEFAULT_COST)?;

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, full_name)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .bind("Administrador")
    .execute(pool)
    .await?;

    info!("👤 Usuario admin inicial creado: {}", username);
    Ok(())
}
