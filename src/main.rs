use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use carpool_api::config::{DatabaseConfig, EnvironmentConfig};
use carpool_api::repositories::{InMemoryRideStore, PgRideStore, RideStore};
use carpool_api::routes::API_PREFIX;
use carpool_api::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Carpool API - Viajes compartidos");
    info!("===================================");

    let rides = ride_store(&config).await?;
    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.server_url()))?;

    let app = create_app(AppState::new(config, rides));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  {}/health - Health check", API_PREFIX);
    info!("🔐 Auth:");
    info!("   POST {}/auth/signup - Registrar usuario", API_PREFIX);
    info!("   POST {}/auth/login - Login", API_PREFIX);
    info!("🚙 Vehicles:");
    info!("   POST {}/vehicles - Registrar vehículo", API_PREFIX);
    info!("   GET  {}/vehicles - Listar mis vehículos", API_PREFIX);
    info!("🛣️ Rides:");
    info!("   POST {}/rides - Ofrecer viaje", API_PREFIX);
    info!("   GET  {}/rides - Listar viajes disponibles", API_PREFIX);
    info!("   GET  {}/rides/:ride_id - Obtener viaje", API_PREFIX);
    info!("   PUT  {}/rides/:ride_id - Marcar taken/cancelled", API_PREFIX);
    info!("   POST {}/rides/:ride_id/requests - Solicitar plaza", API_PREFIX);
    info!("   GET  {}/rides/:ride_id/requests - Ver solicitudes", API_PREFIX);
    info!("   PUT  {}/rides/:ride_id/requests/:request_id - Aceptar/rechazar", API_PREFIX);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// PostgreSQL si hay `DATABASE_URL`, memoria en caso contrario
async fn ride_store(config: &EnvironmentConfig) -> Result<Arc<dyn RideStore>> {
    let Some(url) = &config.database_url else {
        warn!("⚠️ DATABASE_URL no definido: los viajes se guardan en memoria");
        return Ok(Arc::new(InMemoryRideStore::new()));
    };

    let db_config = DatabaseConfig::new(url.clone());
    info!("🗄️ Conectando a {}", db_config.masked_url());
    let pool = db_config
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;

    let store = PgRideStore::new(pool);
    store
        .ensure_table()
        .await
        .map_err(|e| anyhow::anyhow!("Error preparando la tabla rides: {}", e))?;
    info!("✅ PostgreSQL conectado");
    Ok(Arc::new(store))
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
            Ok(mut stream) => {
                stream.recv().await;
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
