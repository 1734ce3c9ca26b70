//! Items API - REST server for the item catalog

use axum::Router;
use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use axum_helpers::cors_layer_from_origins;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{connect_with_retry, run_migrations};
use domain_items::InMemoryItemRepository;
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageConfig};
use state::{AppState, Storage};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let storage = match &config.storage {
        StorageConfig::Postgres(pg) => {
            info!("Connecting to PostgreSQL at {}", pg.redacted_url());
            let db = connect_with_retry(pg.clone(), RetryConfig::default()).await?;

            if config.run_migrations {
                run_migrations::<Migrator>(&db, config.app.name).await?;
            }
            Storage::Postgres(db)
        }
        StorageConfig::Memory => {
            warn!("Using in-memory item storage; data is lost on restart");
            Storage::Memory(InMemoryItemRepository::new())
        }
    };

    let state = AppState {
        config: config.clone(),
        storage,
    };

    let app = build_app(&state)?;

    info!(
        "Starting Items API on port {} ({} storage)",
        state.config.server.port,
        state.config.backend()
    );

    let storage = state.storage.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Storage::Postgres(db) = storage {
                info!("Shutting down: closing PostgreSQL connections");
                close_postgres(db, "items").await;
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}

/// Assemble API routes, docs, health and readiness endpoints
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let cors = state
        .config
        .cors_allowed_origin
        .as_deref()
        .map(cors_layer_from_origins)
        .transpose()?;

    let router = create_router::<openapi::ApiDoc>(api::routes(state), cors)
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    Ok(router)
}
