use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        InvalidStateResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    CreateItem, DeleteItemResponse, DeletedItemsParams, Item, ItemPage, ListItemsParams,
    UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        list_deleted_items,
        get_item,
        update_item,
        delete_item,
        restore_item,
    ),
    components(
        schemas(Item, CreateItem, UpdateItem, ItemPage, DeleteItemResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InvalidStateResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item catalog with soft-delete and restore")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/deleted", get(list_deleted_items))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/{id}/restore", put(restore_item))
        .with_state(shared_service)
}

/// List active items with search, filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ListItemsParams),
    responses(
        (status = 200, description = "Page of active items", body = ItemPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedQuery(params): ValidatedQuery<ListItemsParams>,
) -> ItemResult<Json<ItemPage>> {
    let page = service.list_items(params).await?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    // ValidatedJson checked the body already; the service re-checks for non-HTTP callers
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List soft-deleted items
#[utoipa::path(
    get,
    path = "/deleted",
    tag = "Items",
    params(DeletedItemsParams),
    responses(
        (status = 200, description = "Page of soft-deleted items", body = ItemPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_deleted_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedQuery(params): ValidatedQuery<DeletedItemsParams>,
) -> ItemResult<Json<ItemPage>> {
    let page = service.list_deleted_items(params).await?;
    Ok(Json(page))
}

/// Get an active item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Replace every field of an active item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    // Validated twice, see create_item
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Soft-delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item soft-deleted", body = DeleteItemResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<DeleteItemResponse>> {
    let item = service.delete_item(id).await?;
    Ok(Json(DeleteItemResponse {
        message: "Item soft-deleted".to_string(),
        id: item.id,
    }))
}

/// Restore a soft-deleted item
#[utoipa::path(
    put,
    path = "/{id}/restore",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item restored", body = Item),
        (status = 400, response = InvalidStateResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn restore_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.restore_item(id).await?;
    Ok(Json(item))
}
