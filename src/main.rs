mod config;
mod controllers;
mod database;
mod dto;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use config::pricing::PriceConfig;
use services::GarageService;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🅿️  Parking Garage - Vehicle Lifecycle & Dynamic Pricing");
    info!("========================================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(e);
    }

    let env_config = EnvironmentConfig::default();
    let pricing_config = PriceConfig::default();

    // Importar el layout del garaje desde el simulador externo. Si el
    // simulador no responde, el servidor arranca con el directorio vacío.
    let garage_service = GarageService::new(pool.clone(), env_config.garage_api_url.clone());
    match garage_service.import_garage_data().await {
        Ok(()) => info!("✅ Layout del garaje importado"),
        Err(e) => error!("❌ Error importando el layout del garaje: {}", e),
    }

    // Crear router de la API
    let app_state = AppState::new(pool, env_config.clone(), pricing_config);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/webhook", routes::webhook_routes::create_webhook_router())
        .nest("/parking-status", routes::status_routes::create_status_router())
        .nest("/revenue", routes::revenue_routes::create_revenue_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = env_config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🚗 Webhook de eventos:");
    info!("   POST /webhook - Procesar evento ENTRY | PARKED | EXIT");
    info!("📊 Estado del parking:");
    info!("   GET  /parking-status/plate?license_plate= - Estado de una matrícula");
    info!("   GET  /parking-status/spot?lat=&lng= - Estado de una plaza");
    info!("   GET  /parking-status/plate-history?license_plate= - Histórico paginado");
    info!("💰 Facturación:");
    info!("   GET  /revenue?date=&sector= - Facturación de un sector en una fecha");
    info!("   GET  /revenue/revenue-history - Histórico de facturación");

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

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Parking Garage API funcionando correctamente",
        "status": "ok",
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
