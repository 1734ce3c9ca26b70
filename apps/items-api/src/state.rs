//! Application state management

use domain_items::InMemoryItemRepository;
use sea_orm::DatabaseConnection;

/// The item store selected at startup
#[derive(Clone)]
pub enum Storage {
    Postgres(DatabaseConnection),
    Memory(InMemoryItemRepository),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub storage: Storage,
}
