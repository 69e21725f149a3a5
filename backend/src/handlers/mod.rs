//! Axum handlers. Each one loads the snapshots it needs from the store,
//! delegates to `services`, and wraps the result in the response envelope.

pub mod articles;
pub mod categories;
pub mod tags;
pub mod users;

use std::sync::Arc;

use axum::response::Json;
use mdpress_shared::{ArticleIndex, CategoryIndex, TagIndex, UserIndex};
use serde::Deserialize;

use crate::{
    error::{internal_error, ApiError},
    models::HealthResponse,
    services::parse_number,
    state::AppState,
};

/// `?limit=` for the short ranked lists.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    pub fn limit_or(&self, default: usize) -> usize {
        parse_number(self.limit.as_deref()).unwrap_or(default)
    }
}

/// `?q=` for keyword searches.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl SearchQuery {
    /// The trimmed keyword, rejecting a missing or blank one.
    pub fn keyword(&self) -> Result<String, ApiError> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| ApiError::validation("Search keyword must not be empty"))
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn load_articles(
    state: &AppState,
    message: &str,
) -> Result<Arc<ArticleIndex>, ApiError> {
    state
        .store()
        .articles()
        .await
        .map_err(|e| internal_error(message, e))
}

pub(crate) async fn load_categories(
    state: &AppState,
    message: &str,
) -> Result<Arc<CategoryIndex>, ApiError> {
    state
        .store()
        .categories()
        .await
        .map_err(|e| internal_error(message, e))
}

pub(crate) async fn load_tags(state: &AppState, message: &str) -> Result<Arc<TagIndex>, ApiError> {
    state
        .store()
        .tags()
        .await
        .map_err(|e| internal_error(message, e))
}

pub(crate) async fn load_users(state: &AppState, message: &str) -> Result<Arc<UserIndex>, ApiError> {
    state
        .store()
        .users()
        .await
        .map_err(|e| internal_error(message, e))
}

/// Numeric path ids; anything else cannot match a record.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
