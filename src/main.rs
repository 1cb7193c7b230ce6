use std::sync::Arc;

use cafe_api::{
    app::cafe::{handler::AppState, service::CafeService},
    build_router,
    core::auth::SharedSecretAuthorizer,
    infrastructure::{config::Config, database::DatabaseManager, logger::Logger},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    Logger::init(config.log_level);
    config.log_summary();

    info!("Starting cafe API server...");

    let db = DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| {
            error!("Failed to initialize database: {}", e);
            e
        })?;

    let state = AppState {
        cafe_service: CafeService::new(
            db.get_pool().clone(),
            Arc::new(SharedSecretAuthorizer::new(config.api_key.clone())),
        ),
    };

    let app = build_router(state, config.request_timeout);

    let listener = TcpListener::bind(config.addr).await?;
    let addr = listener.local_addr()?;

    info!("Cafe API server running on http://{}", addr);
    info!("   GET    /random                      - Random cafe");
    info!("   GET    /all                         - All cafes ordered by name");
    info!("   GET    /search?loc=<location>       - Cafes at a location");
    info!("   POST   /add                         - Add a cafe (form fields)");
    info!("   PATCH  /update-price/:id?new_price= - Update coffee price");
    info!("   DELETE /report-closed/:id?api-key=  - Delete a closed cafe");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.get_pool().close().await;
    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
