use std::collections::HashMap;

use mdpress_shared::{Article, Tag, TagIndex};
use serde::Serialize;

use super::{latest_of, ArticleBrief};

pub const DEFAULT_POPULAR_LIMIT: usize = 10;
pub const DEFAULT_RELATED_LIMIT: usize = 5;

const MIN_WEIGHT: f64 = 0.5;
const MAX_WEIGHT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCloudEntry {
    #[serde(flatten)]
    pub tag: Tag,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUsage {
    /// The tag with `count` recomputed from published articles.
    #[serde(flatten)]
    pub tag: Tag,
    pub latest_article: Option<ArticleBrief>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    pub tags: Vec<TagUsage>,
    pub total_tags: usize,
    pub total_usage: u64,
    pub most_popular: Option<TagUsage>,
    pub metadata: serde_json::Value,
}

pub fn find_by_id(tags: &[Tag], id: u64) -> Option<&Tag> {
    tags.iter().find(|tag| tag.id == id)
}

pub fn find_by_slug<'a>(tags: &'a [Tag], slug: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| tag.slug == slug)
}

pub fn find_by_name<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| tag.name == name)
}

/// Highest stored counts first; equal counts keep file order.
pub fn popular(tags: &[Tag], limit: usize) -> Vec<Tag> {
    let mut sorted = tags.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted.truncate(limit);
    sorted
}

/// Tags with a display weight mapped linearly onto `0.5..=2.0`.
pub fn cloud(tags: &[Tag]) -> Vec<TagCloudEntry> {
    let min = tags.iter().map(|t| t.count).min().unwrap_or(0);
    let max = tags.iter().map(|t| t.count).max().unwrap_or(0);

    tags.iter()
        .map(|tag| TagCloudEntry {
            tag: tag.clone(),
            weight: weight(tag.count, min, max),
        })
        .collect()
}

fn weight(count: u64, min: u64, max: u64) -> f64 {
    if max == min {
        return 1.0;
    }
    let ratio = (count - min) as f64 / (max - min) as f64;
    MIN_WEIGHT + (MAX_WEIGHT - MIN_WEIGHT) * ratio
}

/// Case-insensitive substring match on name or description.
pub fn search(tags: &[Tag], keyword: &str) -> Vec<Tag> {
    let needle = keyword.to_lowercase();
    tags.iter()
        .filter(|tag| {
            tag.name.to_lowercase().contains(&needle)
                || tag.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Tags that co-occur with `slug` across articles, most frequent first.
///
/// Ties keep the order in which tags were first seen while scanning the
/// article index. Co-occurring names without a tag record are skipped.
pub fn related(tags: &[Tag], articles: &[Article], slug: &str, limit: usize) -> Vec<Tag> {
    let Some(current) = find_by_slug(tags, slug) else {
        return Vec::new();
    };

    let mut frequency: Vec<(&str, usize)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for article in articles.iter().filter(|a| a.has_tag(&current.name)) {
        for name in article.tags.iter().filter(|name| **name != current.name) {
            match position.get(name.as_str()) {
                Some(&index) => frequency[index].1 += 1,
                None => {
                    position.insert(name.as_str(), frequency.len());
                    frequency.push((name.as_str(), 1));
                },
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    frequency
        .into_iter()
        .filter_map(|(name, _)| find_by_name(tags, name).cloned())
        .take(limit)
        .collect()
}

/// Per-tag usage recomputed from published articles.
pub fn stats(index: &TagIndex, articles: &[Article]) -> TagStats {
    let usages: Vec<TagUsage> = index
        .tags
        .iter()
        .map(|tag| {
            let members: Vec<&Article> = articles
                .iter()
                .filter(|a| a.is_published() && a.has_tag(&tag.name))
                .collect();
            TagUsage {
                tag: Tag {
                    count: members.len() as u64,
                    ..tag.clone()
                },
                latest_article: latest_of(members),
            }
        })
        .collect();

    let total_usage = usages.iter().map(|u| u.tag.count).sum();
    let most_popular = usages
        .iter()
        .reduce(|best, usage| if usage.tag.count > best.tag.count { usage } else { best })
        .cloned();

    TagStats {
        total_tags: usages.len(),
        total_usage,
        most_popular,
        tags: usages,
        metadata: index.metadata.clone(),
    }
}
