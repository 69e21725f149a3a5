use axum::{
    extract::{Path, State},
    response::Json,
};
use mdpress_shared::User;

use super::{load_articles, load_users, parse_id};
use crate::{
    error::{ApiError, ApiResult},
    models::ApiResponse,
    services::users::{self as user_service, AuthorProfile, UserStats},
    state::AppState,
};

const USER_NOT_FOUND: &str = "User not found";

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let index = load_users(&state, "Failed to fetch user").await?;
    let user = parse_id(&id)
        .and_then(|id| user_service::find_by_id(&index.users, id))
        .cloned()
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched user", user)))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<User> {
    let index = load_users(&state, "Failed to fetch user").await?;
    let user = user_service::find_by_username(&index.users, &username)
        .cloned()
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok("Fetched user", user)))
}

/// Always succeeds; unknown identifiers get a placeholder profile.
pub async fn get_author(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<AuthorProfile> {
    const FAILED: &str = "Failed to fetch author";
    let users = load_users(&state, FAILED).await?;
    let articles = load_articles(&state, FAILED).await?;
    Ok(Json(ApiResponse::ok(
        "Fetched author",
        user_service::author_info(&users.users, &articles.articles, &identifier),
    )))
}

pub async fn user_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserStats> {
    const FAILED: &str = "Failed to fetch user stats";
    let users = load_users(&state, FAILED).await?;
    let user = parse_id(&id)
        .and_then(|id| user_service::find_by_id(&users.users, id))
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    let articles = load_articles(&state, FAILED).await?;
    Ok(Json(ApiResponse::ok(
        "Fetched user stats",
        user_service::stats_for(&user.username, &articles.articles),
    )))
}

pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Vec<AuthorProfile>> {
    const FAILED: &str = "Failed to fetch authors";
    let users = load_users(&state, FAILED).await?;
    let articles = load_articles(&state, FAILED).await?;
    Ok(Json(ApiResponse::ok(
        "Fetched authors",
        user_service::authors(&users.users, &articles.articles),
    )))
}
