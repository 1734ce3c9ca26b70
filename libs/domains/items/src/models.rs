use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::query::DEFAULT_LIMIT;

/// Rejects names that are empty once surrounding whitespace is removed
fn validate_item_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_item_name"));
    }
    Ok(())
}

/// Rejects NaN and infinite amounts, which range checks let through
fn validate_finite(value: f64) -> Result<(), validator::ValidationError> {
    if !value.is_finite() {
        return Err(validator::ValidationError::new("non_finite_number"));
    }
    Ok(())
}

fn default_in_stock() -> bool {
    true
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Item entity - a catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Item name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Unit price, never negative
    pub price: f64,
    /// Whether the item is currently in stock
    pub in_stock: bool,
    /// Visibility flag toggled by soft-delete and restore
    pub is_deleted: bool,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255), custom(function = "validate_item_name"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

/// DTO for a full-field update of an active item
///
/// Every field is replaced; an omitted description clears the stored one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 255), custom(function = "validate_item_name"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

/// Query parameters for listing active items
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListItemsParams {
    /// Case-insensitive substring matched against name and description
    pub search: Option<String>,
    /// Number of matching items to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of items to return; values above 100 are capped
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u64,
    /// Inclusive lower price bound
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[validate(range(min = 0.0), custom(function = "validate_finite"))]
    pub max_price: Option<f64>,
    /// Exact match on the stock flag
    pub in_stock: Option<bool>,
    /// Comma-separated sort fields, e.g. `price,name`; the last one is primary
    pub sort_by: Option<String>,
    /// Comma-separated directions (`asc`/`desc`) parallel to `sort_by`
    pub sort_order: Option<String>,
}

impl Default for ListItemsParams {
    fn default() -> Self {
        Self {
            search: None,
            skip: 0,
            limit: default_limit(),
            min_price: None,
            max_price: None,
            in_stock: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

/// Query parameters for listing soft-deleted items
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeletedItemsParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u64,
}

impl Default for DeletedItemsParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// One page of a listing plus the number of matches before pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Matches after search and filters, before skip/limit
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Response body for a successful soft-delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteItemResponse {
    pub message: String,
    pub id: i64,
}

impl Item {
    /// Build an active item from a CreateItem DTO with a store-assigned id
    pub fn new(id: i64, input: CreateItem) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            in_stock: input.in_stock,
            is_deleted: false,
        }
    }

    /// Replace every client-editable field; `id` and `is_deleted` are untouched
    pub fn apply_update(&mut self, update: UpdateItem) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.in_stock = update.in_stock;
    }
}
