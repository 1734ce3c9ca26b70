use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::lifecycle::{Transition, Visibility, ensure_active};
use crate::models::{CreateItem, Item, ItemPage, UpdateItem};
use crate::query::ItemQuery;

/// Repository trait for Item persistence
///
/// Write operations that depend on the current state of a record
/// (`update`, `transition`) must check and write atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new active item with a freshly allocated id
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    /// Get an item by ID regardless of visibility
    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Evaluate a query over one visibility partition
    async fn list(&self, visibility: Visibility, query: &ItemQuery) -> ItemResult<ItemPage>;

    /// Replace the fields of an active item
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item>;

    /// Move an item between visibility states
    async fn transition(&self, id: i64, transition: Transition) -> ItemResult<Item>;
}

/// In-memory implementation of ItemRepository (for development/testing)
///
/// Single-process only. Every operation holds the lock for its whole
/// read-modify-write.
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<i64, Item>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let mut items = self.items.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let item = Item::new(id, input);
        items.insert(id, item.clone());

        tracing::info!(item_id = %id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn list(&self, visibility: Visibility, query: &ItemQuery) -> ItemResult<ItemPage> {
        let items = self.items.read().await;

        // BTreeMap iteration is ascending id, the default order
        Ok(query.apply(items.values().filter(|item| visibility.contains(item))))
    }

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        let mut items = self.items.write().await;

        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        ensure_active(item)?;
        item.apply_update(input);

        tracing::info!(item_id = %id, "Updated item");
        Ok(item.clone())
    }

    async fn transition(&self, id: i64, transition: Transition) -> ItemResult<Item> {
        let mut items = self.items.write().await;

        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        transition.apply(item)?;

        tracing::info!(item_id = %id, %transition, "Changed item visibility");
        Ok(item.clone())
    }
}
