//! Items API routes

use axum::Router;
use domain_items::{ItemService, PgItemRepository, handlers};

use crate::state::{AppState, Storage};

/// Create items router over the configured store
pub fn router(state: &AppState) -> Router {
    match &state.storage {
        Storage::Postgres(db) => {
            handlers::router(ItemService::new(PgItemRepository::new(db.clone())))
        }
        Storage::Memory(repository) => handlers::router(ItemService::new(repository.clone())),
    }
}
