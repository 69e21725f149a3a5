//! Data model shared by the mdpress server and the offline CLI tools.
//!
//! Every type here mirrors one of the JSON index files that live under the
//! site's data directory (`articles.json`, `categories.json`, `tags.json`,
//! `users.json`). Field names are camelCase on the wire.

pub mod images;
pub mod slug;
pub mod taxonomy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Version stamp written into freshly generated article indices.
pub const INDEX_FORMAT_VERSION: &str = "1.0.0";

/// Publication state of an article.
///
/// Deserialization accepts any casing; an unknown value reads as
/// `Published`, the same fallback the indexer applies to front matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Visible in public listings.
    #[default]
    Published,
    /// Indexed but hidden from the default listings.
    Draft,
}

impl ArticleStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Published => "published",
            ArticleStatus::Draft => "draft",
        }
    }

    /// Parse a status name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("published") {
            Some(ArticleStatus::Published)
        } else if value.eq_ignore_ascii_case("draft") {
            Some(ArticleStatus::Draft)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for ArticleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ArticleStatus::parse(&raw).unwrap_or_default())
    }
}

// 文章索引条目（content 字段是 markdown 文件路径，而不是正文）
/// One entry of `articles.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    /// Markdown file path relative to the site root.
    pub content: String,
    /// Id of the deepest resolved category, 0 when unresolved.
    #[serde(default)]
    pub category_id: u64,
    /// Category slug path from the top-level category down.
    #[serde(default)]
    pub category_slugs: Vec<String>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author username.
    #[serde(default)]
    pub author: String,
    pub publish_date: DateTime<Utc>,
    #[serde(default)]
    pub update_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl Article {
    /// Whether the article is publicly visible.
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }
}

/// Aggregate block written next to the article list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    #[serde(default)]
    pub total_articles: usize,
    #[serde(default)]
    pub published_articles: usize,
    #[serde(default)]
    pub draft_articles: usize,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated_by: String,
}

impl IndexMetadata {
    /// Compute totals by status for a freshly built article list.
    pub fn summarize(articles: &[Article], generated_by: &str, now: DateTime<Utc>) -> Self {
        let published_articles = articles.iter().filter(|a| a.is_published()).count();
        let draft_articles = articles
            .iter()
            .filter(|a| a.status == ArticleStatus::Draft)
            .count();
        Self {
            total_articles: articles.len(),
            published_articles,
            draft_articles,
            last_updated: Some(now),
            version: INDEX_FORMAT_VERSION.to_string(),
            generated_by: generated_by.to_string(),
        }
    }
}

/// The `articles.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleIndex {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub metadata: IndexMetadata,
}

// 分类树（subCategories 递归嵌套）
/// A node of the hand-maintained category tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sub_menu: Option<bool>,
    #[serde(default)]
    pub sub_categories: Vec<Category>,
}

/// The `categories.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndex {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// An entry of `tags.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub description: String,
}

/// The `tags.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagIndex {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// An entry of `users.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// The `users.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserIndex {
    #[serde(default)]
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_deserializes_generated_index_entry() {
        let json = r#"{
            "id": 2864434397,
            "title": "Tuning Postgres",
            "slug": "tuning-postgres",
            "excerpt": "Notes...",
            "content": "content/articles/backend/tuning-postgres.md",
            "categoryId": 2,
            "categorySlugs": ["backend", "database"],
            "tags": ["postgres", "performance"],
            "author": "admin",
            "publishDate": "2024-03-01T00:00:00.000Z",
            "updateDate": "2024-03-02T10:00:00Z",
            "status": "draft",
            "views": 12,
            "featured": true
        }"#;
        let article: Article = serde_json::from_str(json).expect("parse article");
        assert_eq!(article.id, 2_864_434_397);
        assert_eq!(article.category_slugs, vec!["backend", "database"]);
        assert_eq!(article.status, ArticleStatus::Draft);
        assert_eq!(article.likes, 0);
        assert!(article.featured);
        assert!(article.has_tag("postgres"));
        assert!(!article.has_tag("Postgres"));
    }

    #[test]
    fn article_serializes_camel_case() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "t",
            "slug": "t",
            "content": "content/articles/t.md",
            "publishDate": "2024-01-01T00:00:00Z"
        }))
        .expect("parse article");
        let value = serde_json::to_value(&article).expect("serialize");
        assert!(value.get("categorySlugs").is_some());
        assert!(value.get("publishDate").is_some());
        assert_eq!(value["status"], "published");
    }

    #[test]
    fn status_parse_is_lenient_about_case() {
        assert_eq!(ArticleStatus::parse(" Draft "), Some(ArticleStatus::Draft));
        assert_eq!(ArticleStatus::parse("PUBLISHED"), Some(ArticleStatus::Published));
        assert_eq!(ArticleStatus::parse("archived"), None);
    }

    #[test]
    fn status_deserializes_any_case_and_falls_back_to_published() {
        let parse = |raw: &str| serde_json::from_value::<ArticleStatus>(serde_json::json!(raw));
        assert_eq!(parse("Draft").expect("Draft"), ArticleStatus::Draft);
        assert_eq!(parse("Published").expect("Published"), ArticleStatus::Published);
        assert_eq!(parse("archived").expect("archived"), ArticleStatus::Published);
        assert!(serde_json::from_value::<ArticleStatus>(serde_json::json!(3)).is_err());
    }
}
