use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{handlers, request_context::request_context_middleware, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_prefix = state.config().static_prefix.clone();
    let static_files = ServeDir::new(&state.config().static_dir);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .merge(article_routes())
        .merge(category_routes())
        .merge(tag_routes())
        .merge(user_routes())
        .with_state(state);

    // Nesting at the root is rejected by axum.
    let app = if static_prefix == "/" {
        api.fallback_service(static_files)
    } else {
        api.nest_service(&static_prefix, static_files)
    };

    app.layer(middleware::from_fn(request_context_middleware))
        .layer(cors)
}

fn article_routes() -> Router<AppState> {
    use handlers::articles::*;

    // Static segments win over `:id`, so `/search` never reaches `get_article`.
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/search", get(search_articles))
        .route("/api/articles/popular", get(popular_articles))
        .route("/api/articles/featured", get(featured_articles))
        .route("/api/articles/latest", get(latest_articles))
        .route("/api/articles/slug/:slug", get(get_article_by_slug))
        .route("/api/articles/category/:slug", get(articles_by_category))
        .route("/api/articles/tag/:slug", get(articles_by_tag))
        .route("/api/articles/:id", get(get_article))
        .route("/api/articles/:id/content", get(get_article_content))
        .route("/api/articles/:id/info", get(get_article_info))
}

fn category_routes() -> Router<AppState> {
    use handlers::categories::*;

    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/tree", get(category_tree))
        .route("/api/categories/stats", get(category_stats))
        .route("/api/categories/main", get(main_categories))
        .route("/api/categories/slug/:slug", get(get_category_by_slug))
        .route("/api/categories/:id", get(get_category))
        .route("/api/categories/:id/children", get(category_children))
}

fn tag_routes() -> Router<AppState> {
    use handlers::tags::*;

    Router::new()
        .route("/api/tags", get(list_tags))
        .route("/api/tags/popular", get(popular_tags))
        .route("/api/tags/cloud", get(tag_cloud))
        .route("/api/tags/search", get(search_tags))
        .route("/api/tags/stats", get(tag_stats))
        .route("/api/tags/slug/:slug", get(get_tag_by_slug))
        .route("/api/tags/:id", get(get_tag))
        .route("/api/tags/:id/related", get(related_tags))
}

fn user_routes() -> Router<AppState> {
    use handlers::users::*;

    Router::new()
        .route("/api/users/authors", get(list_authors))
        .route("/api/users/username/:username", get(get_user_by_username))
        .route("/api/users/author/:identifier", get(get_author))
        .route("/api/users/:id", get(get_user))
        .route("/api/users/:id/stats", get(user_stats))
}
