//! Query logic over index snapshots.
//!
//! Everything in here is a pure function of the collections it is handed, so
//! handlers fetch snapshots from the store and call straight into these.

pub mod articles;
pub mod categories;
pub mod tags;
pub mod users;

use chrono::{DateTime, Utc};
use mdpress_shared::Article;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Lenient parsing of raw query values; anything unparseable falls back
    /// to the defaults.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let defaults = Self::default();
        Self::new(
            parse_number(page).unwrap_or(defaults.page),
            parse_number(page_size).unwrap_or(defaults.page_size),
        )
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total = items.len();
    let total_pages = total.div_ceil(request.page_size);
    let page_items = items
        .iter()
        .skip(request.offset())
        .take(request.page_size)
        .cloned()
        .collect();

    Page {
        items: page_items,
        pagination: Pagination {
            current: request.page,
            page_size: request.page_size,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        },
    }
}

/// Parse a positive integer query value such as `limit` or `page`.
pub fn parse_number(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Minimal article reference embedded in statistics payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBrief {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub publish_date: DateTime<Utc>,
}

impl From<&Article> for ArticleBrief {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            slug: article.slug.clone(),
            publish_date: article.publish_date,
        }
    }
}

/// Most recently published article; the first one wins on equal dates.
pub fn latest_of<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Option<ArticleBrief> {
    articles
        .into_iter()
        .reduce(|best, article| {
            if article.publish_date > best.publish_date {
                article
            } else {
                best
            }
        })
        .map(ArticleBrief::from)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_reports_page_bounds() {
        let items: Vec<u32> = (1..=12).collect();

        let first = paginate(&items, PageRequest::new(1, 5));
        assert_eq!(first.items, vec![1, 2, 3, 4, 5]);
        assert!(first.pagination.has_next);
        assert!(!first.pagination.has_prev);

        let last = paginate(&items, PageRequest::new(3, 5));
        assert_eq!(last.items, vec![11, 12]);
        assert_eq!(last.pagination.total_pages, 3);
        assert!(!last.pagination.has_next);
        assert!(last.pagination.has_prev);

        let beyond = paginate(&items, PageRequest::new(9, 5));
        assert!(beyond.items.is_empty());
        assert!(!beyond.pagination.has_next);
    }

    #[test]
    fn paginate_total_pages_is_ceiling() {
        for (n, p, expected) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (12, 5, 3)] {
            let items = vec![0u8; n];
            let page = paginate(&items, PageRequest::new(1, p));
            assert_eq!(page.pagination.total_pages, expected, "n={n} p={p}");
            assert_eq!(page.pagination.has_next, 1 < expected);
        }
    }

    #[test]
    fn page_request_from_query_is_lenient() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
        assert_eq!(PageRequest::from_query(Some("abc"), Some("5")), PageRequest::new(1, 5));
        assert_eq!(PageRequest::from_query(Some("0"), Some("0")), PageRequest::new(1, 1));
        assert_eq!(PageRequest::from_query(Some("2"), Some("1000")).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn latest_of_prefers_first_on_ties() {
        let a = fixtures::article(1, "A");
        let mut b = fixtures::article(2, "B");
        b.publish_date = a.publish_date;
        let c = fixtures::article(0, "C");
        assert_eq!(latest_of([&a, &b, &c]).map(|brief| brief.id), Some(1));
        assert!(latest_of(std::iter::empty()).is_none());
    }
}
