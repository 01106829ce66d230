//! Application startup and routing.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use service_core::error::AppError;

use crate::config::RentalConfig;
use crate::handlers;
use crate::services::{Database, PiiVault};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RentalConfig>,
    pub db: Arc<Database>,
    pub vault: Arc<PiiVault>,
}

/// The running application: a bound listener plus its router.
pub struct Application {
    listener: TcpListener,
    router: Router,
    port: u16,
}

impl Application {
    /// Connect to the database, run migrations, and bind the listener.
    pub async fn build(config: RentalConfig) -> Result<Self, AppError> {
        let db = Database::new(
            config.database.url.expose_secret(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;
        db.run_migrations().await?;

        Self::with_database(config, db).await
    }

    /// Build on an already-connected database. Migrations are the caller's
    /// responsibility.
    pub async fn with_database(config: RentalConfig, db: Database) -> Result<Self, AppError> {
        let vault = PiiVault::new(&config.encryption.key_bytes()?);

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to bind {}: {}", addr, e)))?;
        let port = listener
            .local_addr()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to read local addr: {}", e)))?
            .port();

        let state = AppState {
            config: Arc::new(config),
            db: Arc::new(db),
            vault: Arc::new(vault),
        };

        let router = build_router(state);

        info!(port = port, "rental-service listening");

        Ok(Self {
            listener,
            router,
            port,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until shutdown is signalled.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Server error: {}", e)))?;
        Ok(())
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/tenants", post(handlers::tenants::create_tenant))
        .route("/tenants", get(handlers::tenants::list_tenants))
        .route("/tenants/:tenant_id", get(handlers::tenants::get_tenant))
        .route("/tenants/:tenant_id", put(handlers::tenants::update_tenant))
        .route(
            "/tenants/:tenant_id/aadhaar",
            get(handlers::tenants::reveal_aadhaar),
        )
        .route("/readings", post(handlers::readings::record_reading))
        .route("/readings", get(handlers::readings::list_readings))
        .route("/bills", post(handlers::bills::generate_bill))
        .route("/bills", get(handlers::bills::list_bills))
        .route("/bills/:bill_id", get(handlers::bills::get_bill))
        .route("/bills/:bill_id/payment", post(handlers::bills::mark_bill_paid))
        .route("/my/bills", get(handlers::bills::my_bills))
        .route("/expenses", post(handlers::expenses::create_expense))
        .route("/expenses", get(handlers::expenses::list_expenses))
        .route(
            "/expenses/:expense_id",
            delete(handlers::expenses::delete_expense),
        )
        .route("/notes", post(handlers::notes::create_note))
        .route("/notes", get(handlers::notes::list_notes))
        .route("/notes/:note_id", delete(handlers::notes::delete_note))
        .route("/dashboard", get(handlers::dashboard::summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
