use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use delivery_dashboard::clients::{Geocoder, NominatimClient, SupabaseGateway};
use delivery_dashboard::config::{DataBackend, EnvironmentConfig};
use delivery_dashboard::repositories::{DataGateway, InMemoryGateway};
use delivery_dashboard::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    // Configurar logging
    let level = tracing::Level::from_str(&config.log_level).unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Delivery Dashboard - Panel de administración");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let gateway: Arc<dyn DataGateway> = match config.data_backend {
        DataBackend::Supabase => {
            let url = config.supabase_url.as_deref().unwrap_or_default();
            let key = config.supabase_anon_key.as_deref().unwrap_or_default();
            let gateway = SupabaseGateway::new(url, key, config.http_timeout)
                .map_err(|e| anyhow::anyhow!("Error creando el cliente de Supabase: {}", e))?;
            info!("✅ Supabase gateway listo en {}", url);
            Arc::new(gateway)
        }
        DataBackend::Memory => {
            warn!("⚠️ DATA_BACKEND=memory: los datos no se persisten");
            Arc::new(InMemoryGateway::new())
        }
    };

    let geocoder: Arc<dyn Geocoder> = Arc::new(
        NominatimClient::new(&config.geocoding_url, &config.geocoding_country, config.http_timeout)
            .map_err(|e| anyhow::anyhow!("Error creando el cliente de geocodificación: {}", e))?,
    );

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid HOST/PORT: {}", config.server_url()))?;

    let app = create_app(AppState::new(config, gateway, geocoder));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🗺️ Mapa:");
    info!("   GET  /api/map/scene");
    info!("   POST /api/map/active-orders");
    info!("   POST /api/map/refresh");
    info!("   POST /api/map/center");
    info!("   POST /api/geocoding/search");
    info!("   POST /api/geocoding/select");
    info!("📊 Pedidos:");
    info!("   GET  /api/orders/counts");
    info!("   GET  /api/dashboard");
    info!("📋 Anuncios:");
    info!("   GET/POST /api/listings");
    info!("   GET/PUT/DELETE /api/listings/:id");
    info!("👥 Capitanes:");
    info!("   GET  /api/captains");
    info!("   GET  /api/captains/filter");

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
