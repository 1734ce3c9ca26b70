//! API routes module

pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/items", items::router(state))
}
