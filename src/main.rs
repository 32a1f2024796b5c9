//! Nestfile Server — per-user hierarchical file storage.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use nestfile_core::config::AppConfig;
use nestfile_core::error::AppError;
use nestfile_core::events::EventBus;

#[tokio::main]
async fn main() {
    let env = std::env::var("NESTFILE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Nestfile v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = nestfile_database::DatabasePool::connect(&config.database).await?;
    nestfile_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Event bus ────────────────────────────────────────────────
    let events = Arc::new(EventBus::default());

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(nestfile_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let folder_repo = Arc::new(
        nestfile_database::repositories::folder::FolderRepository::new(db_pool.clone()),
    );
    let file_repo = Arc::new(nestfile_database::repositories::file::FileRepository::new(
        db_pool.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let folder_service = Arc::new(nestfile_service::folder::FolderService::new(Arc::clone(
        &folder_repo,
    )));
    let file_service = Arc::new(nestfile_service::file::FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_service),
    ));
    let tree_service = Arc::new(nestfile_service::folder::TreeService::new(
        Arc::clone(&folder_service),
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
    ));
    let user_service = Arc::new(nestfile_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&events),
    ));

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Root provisioner ─────────────────────────────────────────
    let provisioner =
        nestfile_service::user::RootProvisioner::new(Arc::clone(&folder_repo));
    let provisioner_events = events.subscribe();
    let provisioner_shutdown = shutdown_rx.clone();
    let provisioner_handle = tokio::spawn(async move {
        provisioner.run(provisioner_events, provisioner_shutdown).await;
    });
    tracing::info!("Root provisioner started");

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = nestfile_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        user_service,
        folder_service,
        file_service,
        tree_service,
    };

    let app = nestfile_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Nestfile server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Wait for background tasks ────────────────────────────────
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), provisioner_handle).await;

    db.close().await;
    tracing::info!("Nestfile server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
