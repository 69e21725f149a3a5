use mdpress_shared::Article;

use super::{paginate, Page, PageRequest};

pub const DEFAULT_STATUS: &str = "published";
pub const DEFAULT_LIMIT: usize = 5;

/// Listing filters, applied in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact status match; `None` disables the check.
    pub status: Option<String>,
    /// Must appear in `categorySlugs`.
    pub category: Option<String>,
    /// Case-insensitive substring of any tag name.
    pub tag: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

impl ArticleFilter {
    /// Filter for public listings: published articles only.
    pub fn published() -> Self {
        Self {
            status: Some(DEFAULT_STATUS.to_string()),
            ..Self::default()
        }
    }

    /// Build from raw query values. A missing status means `published`;
    /// an empty one or `all` disables status filtering.
    pub fn from_query(
        status: Option<&str>,
        category: Option<&str>,
        tag: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        let status = match status.map(str::trim) {
            None => Some(DEFAULT_STATUS.to_string()),
            Some("") | Some("all") => None,
            Some(value) => Some(value.to_string()),
        };
        Self {
            status,
            category: non_empty(category),
            tag: non_empty(tag),
            search: non_empty(search),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(status) = &self.status {
            if article.status.as_str() != status {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !article.category_slugs.iter().any(|slug| slug == category) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            let needle = tag.to_lowercase();
            if !article
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(search) = &self.search {
            return article.title.to_lowercase().contains(&search.to_lowercase());
        }

        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Filter then paginate, preserving index order.
pub fn list(articles: &[Article], filter: &ArticleFilter, page: PageRequest) -> Page<Article> {
    let filtered: Vec<Article> = articles
        .iter()
        .filter(|article| filter.matches(article))
        .cloned()
        .collect();
    paginate(&filtered, page)
}

pub fn find_by_id(articles: &[Article], id: u64) -> Option<&Article> {
    articles.iter().find(|article| article.id == id)
}

pub fn find_by_slug<'a>(articles: &'a [Article], slug: &str) -> Option<&'a Article> {
    articles.iter().find(|article| article.slug == slug)
}

/// Published articles with the most views.
pub fn popular(articles: &[Article], limit: usize) -> Vec<Article> {
    let mut published: Vec<Article> = articles.iter().filter(|a| a.is_published()).cloned().collect();
    published.sort_by(|a, b| b.views.cmp(&a.views));
    published.truncate(limit);
    published
}

/// Newest published articles marked as featured.
pub fn featured(articles: &[Article], limit: usize) -> Vec<Article> {
    newest(articles.iter().filter(|a| a.is_published() && a.featured), limit)
}

/// Newest published articles.
pub fn latest(articles: &[Article], limit: usize) -> Vec<Article> {
    newest(articles.iter().filter(|a| a.is_published()), limit)
}

fn newest<'a>(articles: impl Iterator<Item = &'a Article>, limit: usize) -> Vec<Article> {
    let mut selected: Vec<Article> = articles.cloned().collect();
    selected.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    selected.truncate(limit);
    selected
}
