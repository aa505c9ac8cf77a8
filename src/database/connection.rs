//! Conexión a PostgreSQL
//!
//! Este módulo maneja el pool de conexiones a la base de datos.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Dueño del pool de conexiones de la aplicación
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Abrir el pool y verificar que la base responde
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔌 Conectando a la base de datos {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .context("Error conectando a la base de datos")?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("La base de datos no responde")?;

        info!("✅ Base de datos conectada (max {} conexiones)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };

    match url.find("://") {
        Some(scheme_end) if scheme_end < at_pos => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
