//! Response payloads of the HTTP API.

use chrono::{DateTime, Utc};
use mdpress_shared::{Article, ArticleStatus, Category, Tag};
use serde::Serialize;

use crate::{
    content::{ContentInfo, ContentWarning, Recommendation},
    services::{users::AuthorProfile, Page, Pagination},
};

/// Uniform wrapper around every response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<Page<Article>> for ArticleListResponse {
    fn from(page: Page<Article>) -> Self {
        Self {
            articles: page.items,
            pagination: page.pagination,
            category: None,
            tag: None,
            keyword: None,
        }
    }
}

/// Article detail: index fields with the markdown path replaced by content
/// and the author name and category id resolved to records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category_id: u64,
    pub category_slugs: Vec<String>,
    pub tags: Vec<String>,
    pub author: AuthorProfile,
    pub category: Option<Category>,
    pub publish_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
    pub status: ArticleStatus,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_warning: Option<ContentWarning>,
}

impl ArticleDetail {
    pub fn compose(
        article: &Article,
        content: String,
        author: AuthorProfile,
        category: Option<Category>,
        content_warning: Option<ContentWarning>,
    ) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            slug: article.slug.clone(),
            excerpt: article.excerpt.clone(),
            content,
            category_id: article.category_id,
            category_slugs: article.category_slugs.clone(),
            tags: article.tags.clone(),
            author,
            category,
            publish_date: article.publish_date,
            update_date: article.update_date,
            status: article.status,
            views: article.views,
            likes: article.likes,
            comments: article.comments,
            featured: article.featured,
            cover_image: article.cover_image.clone(),
            content_warning,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleContentResponse {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub content_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentApis {
    pub optimized: String,
    pub content: String,
    pub no_content: String,
}

impl ContentApis {
    pub fn for_article(id: u64) -> Self {
        Self {
            optimized: format!("/api/articles/{id}?includeContent=auto"),
            content: format!("/api/articles/{id}/content"),
            no_content: format!("/api/articles/{id}?includeContent=false"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfoResponse {
    pub article_id: u64,
    pub title: String,
    pub slug: String,
    pub content_info: ContentInfo,
    pub recommendations: Vec<Recommendation>,
    pub apis: ContentApis,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TagSearchResponse {
    pub tags: Vec<Tag>,
    pub keyword: String,
}
