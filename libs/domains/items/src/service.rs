//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::lifecycle::{Transition, Visibility, ensure_active};
use crate::models::{CreateItem, DeletedItemsParams, Item, ItemPage, ListItemsParams, UpdateItem};
use crate::query::ItemQuery;
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// The service validates input, decides which visibility partition a request
/// targets, and delegates the atomic state changes to the repository.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get an active item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        let item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        ensure_active(&item)?;
        Ok(item)
    }

    /// List active items with search, filters, sorting and pagination
    #[instrument(skip(self))]
    pub async fn list_items(&self, params: ListItemsParams) -> ItemResult<ItemPage> {
        let query = ItemQuery::try_from(params)?;
        self.repository.list(Visibility::Active, &query).await
    }

    /// List soft-deleted items
    #[instrument(skip(self))]
    pub async fn list_deleted_items(&self, params: DeletedItemsParams) -> ItemResult<ItemPage> {
        let query = ItemQuery::try_from(params)?;
        self.repository.list(Visibility::Deleted, &query).await
    }

    /// Replace all fields of an active item
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// Soft-delete an active item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.transition(id, Transition::SoftDelete).await
    }

    /// Bring a soft-deleted item back into the active partition
    #[instrument(skip(self))]
    pub async fn restore_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.transition(id, Transition::Restore).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
