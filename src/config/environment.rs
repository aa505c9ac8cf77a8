//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Se carga una sola vez al
//! arrancar el proceso y después se comparte de forma inmutable.

use anyhow::{Context, Result};
use chrono::Duration;
use std::env;
use std::str::FromStr;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: std::time::Duration,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Cuenta maestra: no se puede modificar ni borrar y conserva privilegios
    /// de administración de usuarios sin importar su rol
    pub master_phone: String,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 5000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: std::time::Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl: Duration::seconds(parse_or("ACCESS_TOKEN_TTL_SECS", 3600)?),
            refresh_token_ttl: Duration::seconds(parse_or("REFRESH_TOKEN_TTL_SECS", 30 * 24 * 3600)?),
            master_phone: required("MASTER_PHONE")?,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            log_level: parse_or("LOG_LEVEL", tracing::Level::INFO)?,
        })
    }

    /// Configuración mínima con valores por defecto, útil para tests y herramientas
    pub fn new(jwt_secret: impl Into<String>, master_phone: impl Into<String>) -> Self {
        Self {
            environment: "development".to_string(),
            port: 5000,
            host: "127.0.0.1".to_string(),
            database_url: String::new(),
            db_max_connections: 10,
            db_acquire_timeout: std::time::Duration::from_secs(5),
            jwt_secret: jwt_secret.into(),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(30),
            master_phone: master_phone.into(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
        }
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("{} must be set", key))
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a valid value: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
