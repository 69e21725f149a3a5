use axum::{
    extract::{Path, State},
    response::Json,
};
use mdpress_shared::Category;

use super::{load_articles, load_categories, parse_id};
use crate::{
    error::{ApiError, ApiResult},
    models::ApiResponse,
    services::categories::{self as category_service, CategoryStats, CategoryTreeNode},
    state::AppState,
};

const CATEGORY_NOT_FOUND: &str = "Category not found";

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let index = load_categories(&state, "Failed to fetch categories").await?;
    Ok(Json(ApiResponse::ok("Fetched categories", index.categories.clone())))
}

pub async fn category_tree(State(state): State<AppState>) -> ApiResult<Vec<CategoryTreeNode>> {
    let index = load_categories(&state, "Failed to fetch category tree").await?;
    Ok(Json(ApiResponse::ok(
        "Fetched category tree",
        category_service::tree(&index.categories),
    )))
}

pub async fn category_stats(State(state): State<AppState>) -> ApiResult<Vec<CategoryStats>> {
    const FAILED: &str = "Failed to fetch category stats";
    let index = load_categories(&state, FAILED).await?;
    let articles = load_articles(&state, FAILED).await?;
    Ok(Json(ApiResponse::ok(
        "Fetched category stats",
        category_service::stats(&index.categories, &articles.articles),
    )))
}

pub async fn main_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let index = load_categories(&state, "Failed to fetch main categories").await?;
    Ok(Json(ApiResponse::ok(
        "Fetched main categories",
        category_service::main_categories(&index.categories),
    )))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Category> {
    let index = load_categories(&state, "Failed to fetch category").await?;
    let category = parse_id(&id)
        .and_then(|id| category_service::find_by_id(&index.categories, id))
        .cloned()
        .ok_or_else(|| ApiError::not_found(CATEGORY_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched category", category)))
}

pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Category> {
    let index = load_categories(&state, "Failed to fetch category").await?;
    let category = category_service::find_by_slug(&index.categories, &slug)
        .cloned()
        .ok_or_else(|| ApiError::not_found(CATEGORY_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched category", category)))
}

/// Unknown parents yield an empty list rather than a 404.
pub async fn category_children(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Category>> {
    let index = load_categories(&state, "Failed to fetch sub-categories").await?;
    let children = parse_id(&id)
        .map(|id| category_service::children(&index.categories, id))
        .unwrap_or_default();
    Ok(Json(ApiResponse::ok("Fetched sub-categories", children)))
}
