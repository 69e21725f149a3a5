use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use mdpress_shared::Tag;

use super::{load_articles, load_tags, parse_id, LimitQuery, SearchQuery};
use crate::{
    error::{ApiError, ApiResult},
    models::{ApiResponse, TagSearchResponse},
    services::tags::{
        self as tag_service, TagCloudEntry, TagStats, DEFAULT_POPULAR_LIMIT, DEFAULT_RELATED_LIMIT,
    },
    state::AppState,
};

const TAG_NOT_FOUND: &str = "Tag not found";

pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<Tag>> {
    let index = load_tags(&state, "Failed to fetch tags").await?;
    Ok(Json(ApiResponse::ok("Fetched tags", index.tags.clone())))
}

pub async fn get_tag(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Tag> {
    let index = load_tags(&state, "Failed to fetch tag").await?;
    let tag = parse_id(&id)
        .and_then(|id| tag_service::find_by_id(&index.tags, id))
        .cloned()
        .ok_or_else(|| ApiError::not_found(TAG_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched tag", tag)))
}

pub async fn get_tag_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Tag> {
    let index = load_tags(&state, "Failed to fetch tag").await?;
    let tag = tag_service::find_by_slug(&index.tags, &slug)
        .cloned()
        .ok_or_else(|| ApiError::not_found(TAG_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched tag", tag)))
}

pub async fn popular_tags(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<Tag>> {
    let index = load_tags(&state, "Failed to fetch popular tags").await?;
    let tags = tag_service::popular(&index.tags, query.limit_or(DEFAULT_POPULAR_LIMIT));
    Ok(Json(ApiResponse::ok("Fetched popular tags", tags)))
}

pub async fn tag_cloud(State(state): State<AppState>) -> ApiResult<Vec<TagCloudEntry>> {
    let index = load_tags(&state, "Failed to fetch tag cloud").await?;
    Ok(Json(ApiResponse::ok("Fetched tag cloud", tag_service::cloud(&index.tags))))
}

pub async fn search_tags(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<TagSearchResponse> {
    let keyword = query.keyword()?;
    let index = load_tags(&state, "Failed to search tags").await?;
    let tags = tag_service::search(&index.tags, &keyword);
    Ok(Json(ApiResponse::ok("Searched tags", TagSearchResponse { tags, keyword })))
}

/// Shares its route segment with `get_tag`, so the parameter here is a slug.
pub async fn related_tags(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<Tag>> {
    const FAILED: &str = "Failed to fetch related tags";
    let index = load_tags(&state, FAILED).await?;
    let articles = load_articles(&state, FAILED).await?;
    let related = tag_service::related(
        &index.tags,
        &articles.articles,
        &slug,
        query.limit_or(DEFAULT_RELATED_LIMIT),
    );
    Ok(Json(ApiResponse::ok("Fetched related tags", related)))
}

pub async fn tag_stats(State(state): State<AppState>) -> ApiResult<TagStats> {
    const FAILED: &str = "Failed to fetch tag stats";
    let index = load_tags(&state, FAILED).await?;
    let articles = load_articles(&state, FAILED).await?;
    Ok(Json(ApiResponse::ok(
        "Fetched tag stats",
        tag_service::stats(&index, &articles.articles),
    )))
}
