//! Category endpoints.
//!
//! ```text
//! GET  /api/categories   list the caller's categories
//! POST /api/categories   create
//! ```

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use todocast_todos::{Category, CategoryAction};

/// Body of `POST /api/categories`
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name
    pub name: String,
    /// Hex color, `#` optional
    #[serde(default)]
    pub color: Option<String>,
}

/// `GET /api/categories`
pub async fn list<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResponse<Vec<Category>> {
    let categories = state.categories.state(|s| s.owned_by(&owner)).await;
    ApiResponse::list(categories)
}

/// `POST /api/categories`
///
/// # Errors
///
/// 422 for a blank name.
pub async fn create<W>(
    State(state): State<AppState<W>>,
    CurrentUser(owner): CurrentUser,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Category>), AppError> {
    let Json(CreateCategoryRequest { name, color }) = body?;

    let category = state
        .categories
        .send(CategoryAction::Create { owner, name, color })
        .await?;

    tracing::info!(id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, ApiResponse::new(category)))
}
