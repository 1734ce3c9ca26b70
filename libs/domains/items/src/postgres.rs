use async_trait::async_trait;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    lifecycle::{Transition, Visibility, ensure_active},
    models::{CreateItem, Item, ItemPage, UpdateItem},
    query::{ItemQuery, SortDirection, SortField},
    repository::ItemRepository,
};

/// PostgreSQL-backed item store
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Name => entity::Column::Name,
        SortField::Description => entity::Column::Description,
        SortField::Price => entity::Column::Price,
        SortField::InStock => entity::Column::InStock,
        SortField::IsDeleted => entity::Column::IsDeleted,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Translate the query into a filtered, ordered SELECT (without OFFSET/LIMIT)
fn filtered_select(visibility: Visibility, query: &ItemQuery) -> Select<entity::Entity> {
    let mut select =
        entity::Entity::find().filter(entity::Column::IsDeleted.eq(visibility.is_deleted()));

    if let Some(pattern) = query.search_pattern() {
        select = select.filter(
            Condition::any()
                .add(Expr::col((entity::Entity, entity::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((entity::Entity, entity::Column::Description)).ilike(pattern)),
        );
    }

    if let Some(min_price) = query.min_price {
        select = select.filter(entity::Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        select = select.filter(entity::Column::Price.lte(max_price));
    }

    if let Some(in_stock) = query.in_stock {
        select = select.filter(entity::Column::InStock.eq(in_stock));
    }

    // ORDER BY lists the primary (last requested) key first
    for key in query.sort.iter().rev() {
        select = select.order_by(sort_column(key.field), sort_order(key.direction));
    }

    select.order_by_asc(entity::Column::Id)
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(item_id = %model.id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, visibility: Visibility, query: &ItemQuery) -> ItemResult<ItemPage> {
        let select = filtered_select(visibility, query);

        let total = select.clone().count(&self.db).await?;

        // past the end; also keeps offsets above BIGINT range out of the SQL
        if query.skip >= total {
            return Ok(ItemPage {
                items: Vec::new(),
                total,
                skip: query.skip,
                limit: query.limit,
            });
        }

        let models = select
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await?;

        Ok(ItemPage {
            items: models.into_iter().map(Into::into).collect(),
            total,
            skip: query.skip,
            limit: query.limit,
        })
    }

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        let mut item: Item = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ItemError::NotFound(id))?
            .into();

        ensure_active(&item)?;
        item.apply_update(input);

        let active_model: entity::ActiveModel = item.into();
        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(updated.into())
    }

    async fn transition(&self, id: i64, transition: Transition) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        let mut item: Item = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ItemError::NotFound(id))?
            .into();

        transition.apply(&mut item)?;

        let active_model: entity::ActiveModel = item.into();
        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(item_id = %id, %transition, "Changed item visibility");
        Ok(updated.into())
    }
}
