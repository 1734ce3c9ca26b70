//! Items Domain
//!
//! Catalog records with search, filtering, multi-key sorting, pagination and a
//! reversible soft-delete lifecycle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, partition selection
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │ ──► │ Query +     │  ← Filters, sort keys, lifecycle guards
//! └──────┬──────┘     │ Lifecycle   │
//!        │            └─────────────┘
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_items::{PgItemRepository, ItemService, handlers};
//!
//! let repository = PgItemRepository::new(db);
//! let service = ItemService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use lifecycle::{Transition, Visibility};
pub use models::{
    CreateItem, DeleteItemResponse, DeletedItemsParams, Item, ItemPage, ListItemsParams,
    UpdateItem,
};
pub use postgres::PgItemRepository;
pub use query::{ItemQuery, SortDirection, SortField, SortKey};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
