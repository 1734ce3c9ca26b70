use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ItemError {
    /// Unknown id, or the item sits in the wrong visibility partition
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// Restore requested for an item that is still active
    #[error("Item {0} is not deleted")]
    NotDeleted(i64),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::NotDeleted(id) => {
                AppError::InvalidState(format!("Item {} is not deleted", id))
            }
            ItemError::Validation(errors) => AppError::ValidationError(errors),
            ItemError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
