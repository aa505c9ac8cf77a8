//! Esquema de la base de datos
//!
//! Crea las tablas si no existen. Las claves naturales (teléfono y número de
//! vehículo) son las primary keys; la unicidad la garantiza PostgreSQL.

use sqlx::PgPool;
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        phone         TEXT PRIMARY KEY,
        username      TEXT,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL DEFAULT 'user',
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
"#;

const CREATE_DRIVERS: &str = r#"
    CREATE TABLE IF NOT EXISTS drivers (
        phone          TEXT PRIMARY KEY,
        name           TEXT,
        email          TEXT,
        license_number TEXT NOT NULL,
        license_expiry DATE,
        status         TEXT NOT NULL DEFAULT 'available',
        created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT drivers_license_number_key UNIQUE (license_number)
    )
"#;

// driver_phone sin FOREIGN KEY: se acepta cualquier teléfono al escribir y al
// borrar un conductor sus vehículos se desasignan explícitamente
const CREATE_VEHICLES: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        vehicle_number   TEXT PRIMARY KEY,
        holding_capacity INTEGER CHECK (holding_capacity >= 0),
        mileage          INTEGER NOT NULL DEFAULT 0 CHECK (mileage >= 0),
        status           TEXT NOT NULL DEFAULT 'active',
        driver_phone     TEXT,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const CREATE_VEHICLES_DRIVER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS vehicles_driver_phone_idx ON vehicles (driver_phone)";

/// Crear las tablas que falten
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [
        CREATE_USERS,
        CREATE_DRIVERS,
        CREATE_VEHICLES,
        CREATE_VEHICLES_DRIVER_INDEX,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("📋 Esquema verificado: users, drivers, vehicles");
    Ok(())
}
