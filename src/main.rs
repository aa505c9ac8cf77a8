use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_management::config::{DatabaseConfig, EnvironmentConfig};
use fleet_management::database::{ensure_schema, DatabaseConnection};
use fleet_management::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Management API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::from(&config)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    let pool = db_connection.pool().clone();

    ensure_schema(&pool).await?;

    if config.cors_origins.is_empty() && config.is_production() {
        warn!("⚠️ CORS_ORIGINS vacío: se aceptan peticiones de cualquier origen");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Autenticación:");
    info!("   POST /api/auth/register - Registrar conductor");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/refresh - Renovar access token");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🧑‍✈️ Conductores:");
    info!("   GET|POST /api/drivers");
    info!("   GET|PUT|DELETE /api/drivers/:phone");
    info!("🚗 Vehículos:");
    info!("   GET|POST /api/vehicles");
    info!("   GET|PUT|DELETE /api/vehicles/:vehicle_number");
    info!("👥 Usuarios:");
    info!("   GET  /api/users");
    info!("   PUT  /api/users/:phone/role");
    info!("   DELETE /api/users/:phone");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
