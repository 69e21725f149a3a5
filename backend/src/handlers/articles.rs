use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use mdpress_shared::Article;
use serde::Deserialize;

use super::{load_articles, load_categories, load_tags, load_users, parse_id, LimitQuery, SearchQuery};
use crate::{
    content::{self, DeliveryOptions, IncludeContent},
    error::{internal_error, ApiError, ApiResult},
    models::{
        ApiResponse, ArticleContentResponse, ArticleDetail, ArticleInfoResponse,
        ArticleListResponse, ContentApis,
    },
    services::{
        articles::{self as article_service, ArticleFilter, DEFAULT_LIMIT},
        categories as category_service, parse_number, tags as tag_service,
        users as user_service, PageRequest,
    },
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
    pub include_content: Option<String>,
    pub check_base64: Option<String>,
    pub max_size: Option<String>,
}

impl DetailQuery {
    fn delivery_options(&self, defaults: DeliveryOptions) -> DeliveryOptions {
        DeliveryOptions {
            include: IncludeContent::parse(self.include_content.as_deref()),
            check_base64: match self.check_base64.as_deref().map(str::trim) {
                Some("false") | Some("0") => false,
                Some(_) | None => defaults.check_base64,
            },
            max_size_kb: parse_number(self.max_size.as_deref())
                .map(|kb| kb as u64)
                .unwrap_or(defaults.max_size_kb),
        }
    }
}

const ARTICLE_NOT_FOUND: &str = "Article not found";

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> ApiResult<ArticleListResponse> {
    let index = load_articles(&state, "Failed to fetch article list").await?;
    let filter = ArticleFilter::from_query(
        query.status.as_deref(),
        query.category.as_deref(),
        query.tag.as_deref(),
        query.search.as_deref(),
    );
    let page = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());
    let result = article_service::list(&index.articles, &filter, page);

    Ok(Json(ApiResponse::ok("Fetched article list", result.into())))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<ArticleDetail> {
    let index = load_articles(&state, "Failed to fetch article").await?;
    let article = parse_id(&id)
        .and_then(|id| article_service::find_by_id(&index.articles, id))
        .ok_or_else(|| ApiError::not_found(ARTICLE_NOT_FOUND))?;

    let detail = article_detail(&state, article, &index.articles, &query).await?;
    Ok(Json(ApiResponse::ok("Fetched article", detail)))
}

pub async fn get_article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<DetailQuery>,
) -> ApiResult<ArticleDetail> {
    let index = load_articles(&state, "Failed to fetch article").await?;
    let article = article_service::find_by_slug(&index.articles, &slug)
        .ok_or_else(|| ApiError::not_found(ARTICLE_NOT_FOUND))?;

    let detail = article_detail(&state, article, &index.articles, &query).await?;
    Ok(Json(ApiResponse::ok("Fetched article", detail)))
}

async fn article_detail(
    state: &AppState,
    article: &Article,
    articles: &[Article],
    query: &DetailQuery,
) -> Result<ArticleDetail, ApiError> {
    let options = query.delivery_options(state.default_delivery());
    let delivered =
        content::deliver(&state.store().content_path(article), article, &options).await;

    let users = load_users(state, "Failed to fetch article").await?;
    let author = user_service::author_info(&users.users, articles, &article.author);
    let categories = load_categories(state, "Failed to fetch article").await?;
    let category = category_service::find_by_id(&categories.categories, article.category_id).cloned();

    Ok(ArticleDetail::compose(
        article,
        delivered.content,
        author,
        category,
        delivered.warning,
    ))
}

pub async fn get_article_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ArticleContentResponse> {
    let index = load_articles(&state, "Failed to fetch article content").await?;
    let article = parse_id(&id)
        .and_then(|id| article_service::find_by_id(&index.articles, id))
        .ok_or_else(|| ApiError::not_found(ARTICLE_NOT_FOUND))?;

    let text = content::read_raw(&state.store().content_path(article))
        .await
        .map_err(|e| internal_error("Failed to fetch article content", e))?;

    Ok(Json(ApiResponse::ok("Fetched article content", ArticleContentResponse {
        id: article.id,
        title: article.title.clone(),
        slug: article.slug.clone(),
        content: text,
        content_type: "markdown",
    })))
}

pub async fn get_article_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ArticleInfoResponse> {
    let index = load_articles(&state, "Failed to fetch article info").await?;
    let article = parse_id(&id)
        .and_then(|id| article_service::find_by_id(&index.articles, id))
        .ok_or_else(|| ApiError::not_found(ARTICLE_NOT_FOUND))?;

    let info = content::inspect(&state.store().content_path(article))
        .await
        .map_err(|e| internal_error("Failed to fetch article info", e))?;
    let recommendations =
        content::recommendations(&info, article.id, state.config().content_max_size_kb);

    Ok(Json(ApiResponse::ok("Fetched article info", ArticleInfoResponse {
        article_id: article.id,
        title: article.title.clone(),
        slug: article.slug.clone(),
        content_info: info,
        recommendations,
        apis: ContentApis::for_article(article.id),
    })))
}

pub async fn search_articles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<ArticleListResponse> {
    let keyword = query.keyword()?;
    let index = load_articles(&state, "Failed to search articles").await?;
    let filter = ArticleFilter {
        search: Some(keyword.clone()),
        ..ArticleFilter::published()
    };
    let page = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());

    let mut response: ArticleListResponse =
        article_service::list(&index.articles, &filter, page).into();
    response.keyword = Some(keyword);
    Ok(Json(ApiResponse::ok("Searched articles", response)))
}

pub async fn popular_articles(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<Article>> {
    let index = load_articles(&state, "Failed to fetch popular articles").await?;
    let articles = article_service::popular(&index.articles, query.limit_or(DEFAULT_LIMIT));
    Ok(Json(ApiResponse::ok("Fetched popular articles", articles)))
}

pub async fn featured_articles(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<Article>> {
    let index = load_articles(&state, "Failed to fetch featured articles").await?;
    let articles = article_service::featured(&index.articles, query.limit_or(DEFAULT_LIMIT));
    Ok(Json(ApiResponse::ok("Fetched featured articles", articles)))
}

pub async fn latest_articles(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<Article>> {
    let index = load_articles(&state, "Failed to fetch latest articles").await?;
    let articles = article_service::latest(&index.articles, query.limit_or(DEFAULT_LIMIT));
    Ok(Json(ApiResponse::ok("Fetched latest articles", articles)))
}

pub async fn articles_by_category(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<ArticleListResponse> {
    const FAILED: &str = "Failed to fetch articles by category";
    let categories = load_categories(&state, FAILED).await?;
    let category = category_service::find_by_slug(&categories.categories, &category_slug)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    let index = load_articles(&state, FAILED).await?;
    let filter = ArticleFilter {
        category: Some(category.slug.clone()),
        ..ArticleFilter::published()
    };
    let page = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());

    let mut response: ArticleListResponse =
        article_service::list(&index.articles, &filter, page).into();
    response.category = Some(category);
    Ok(Json(ApiResponse::ok("Fetched articles by category", response)))
}

pub async fn articles_by_tag(
    State(state): State<AppState>,
    Path(tag_slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<ArticleListResponse> {
    const FAILED: &str = "Failed to fetch articles by tag";
    let tags = load_tags(&state, FAILED).await?;
    let tag = tag_service::find_by_slug(&tags.tags, &tag_slug)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;

    let index = load_articles(&state, FAILED).await?;
    // Articles carry tag names, not slugs.
    let filter = ArticleFilter {
        tag: Some(tag.name.clone()),
        ..ArticleFilter::published()
    };
    let page = PageRequest::from_query(query.page.as_deref(), query.page_size.as_deref());

    let mut response: ArticleListResponse =
        article_service::list(&index.articles, &filter, page).into();
    response.tag = Some(tag);
    Ok(Json(ApiResponse::ok("Fetched articles by tag", response)))
}
