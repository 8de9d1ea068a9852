use std::net::SocketAddr;
use std::sync::Arc;

use folio_api::auth::identity::build_identity_provider;
use folio_api::auth::lockout::PinAttempts;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_db::store::{PgDocumentStore, UnconfiguredStore};
use folio_db::DocumentStore;
use folio_genai::DescriptionWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "folio_api=debug,folio_db=debug,folio_genai=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Document store ---
    let store = connect_store(config.database_url.as_deref()).await;

    // --- Identity + AI ---
    let identity = build_identity_provider(&config.identity);
    let writer = DescriptionWriter::from_config(&config.genai);

    // --- App state ---
    let state = AppState {
        store,
        identity,
        pin_attempts: Arc::new(PinAttempts::new()),
        writer,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to Postgres and apply migrations.
///
/// Any failure degrades to [`UnconfiguredStore`]: public reads then serve
/// seed data and admin writes fail with 503.
async fn connect_store(database_url: Option<&str>) -> Arc<dyn DocumentStore> {
    let Some(database_url) = database_url else {
        return Arc::new(UnconfiguredStore);
    };

    let pool = match folio_db::create_pool(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to database; serving seed data");
            return Arc::new(UnconfiguredStore);
        }
    };
    tracing::info!("Database connection pool created");

    if let Err(e) = folio_db::health_check(&pool).await {
        tracing::warn!(error = %e, "Database health check failed; serving seed data");
        return Arc::new(UnconfiguredStore);
    }

    if let Err(e) = folio_db::run_migrations(&pool).await {
        tracing::warn!(error = %e, "Failed to run database migrations; serving seed data");
        return Arc::new(UnconfiguredStore);
    }
    tracing::info!("Database migrations applied");

    Arc::new(PgDocumentStore::new(pool))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
