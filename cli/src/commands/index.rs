use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mdpress_shared::{Article, ArticleIndex, ArticleStatus, Category, CategoryIndex, IndexMetadata};

use crate::utils::{
    article_id, article_slug, collect_markdown_files, parse_markdown_meta, parse_publish_date,
    relative_filename, resolve_categories,
};

const GENERATED_BY: &str = "mdpress-cli index";

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub content_dir: PathBuf,
    pub categories: PathBuf,
    pub output: PathBuf,
    pub root: PathBuf,
    pub default_author: String,
}

/// Rebuild the article index and write it to `options.output`.
pub fn run(options: &IndexOptions) -> Result<ArticleIndex> {
    let files = collect_markdown_files(&options.content_dir)?;
    tracing::info!("Found {} markdown files in {}", files.len(), options.content_dir.display());

    let categories = load_categories(&options.categories);
    let previous = load_previous(&options.output);
    let root = canonical(&options.root);
    let now = Utc::now();

    let mut articles = Vec::with_capacity(files.len());
    for path in &files {
        match index_article(path, options, &root, &categories, &previous, now) {
            Ok(Some(article)) => articles.push(article),
            Ok(None) => {},
            Err(err) => tracing::error!("Failed to index {}: {:#}", path.display(), err),
        }
    }

    // Stable sort: equal dates keep file-name order.
    articles.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));

    let index = ArticleIndex {
        metadata: IndexMetadata::summarize(&articles, GENERATED_BY, now),
        articles,
    };
    write_index(&options.output, &index)?;

    tracing::info!(
        total = index.metadata.total_articles,
        published = index.metadata.published_articles,
        drafts = index.metadata.draft_articles,
        skipped = files.len() - index.articles.len(),
        "Article index written to {}",
        options.output.display()
    );
    Ok(index)
}

fn index_article(
    path: &Path,
    options: &IndexOptions,
    root: &Path,
    categories: &[Category],
    previous: &HashMap<u64, Article>,
    now: DateTime<Utc>,
) -> Result<Option<Article>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let meta = parse_markdown_meta(&text);

    let Some(title) = meta.title else {
        tracing::warn!("Skipping {}: no title heading", path.display());
        return Ok(None);
    };

    let relative = relative_filename(&options.content_dir, path);
    let id = article_id(&relative);
    let chain = resolve_categories(categories, meta.category.as_deref(), &relative);

    let publish_date = match meta.publish_date.as_deref() {
        Some(raw) => parse_publish_date(raw).unwrap_or_else(|| {
            tracing::warn!("{}: unrecognised date {:?}, using now", relative, raw);
            now
        }),
        None => now,
    };
    let status = match meta.status.as_deref() {
        Some(raw) => ArticleStatus::parse(raw).unwrap_or_else(|| {
            tracing::warn!("{}: unknown status {:?}, treating as published", relative, raw);
            ArticleStatus::Published
        }),
        None => ArticleStatus::Published,
    };

    let carried = previous.get(&id);
    tracing::debug!(id, path = %relative, "indexed article");

    Ok(Some(Article {
        id,
        title,
        slug: article_slug(path, id),
        excerpt: meta.excerpt,
        content: content_path(root, path),
        category_id: chain.last().map(|category| category.id).unwrap_or(0),
        category_slugs: chain.iter().map(|category| category.slug.clone()).collect(),
        tags: meta.tags,
        author: meta.author.unwrap_or_else(|| options.default_author.clone()),
        publish_date,
        update_date: now,
        status,
        views: carried.map(|a| a.views).unwrap_or(0),
        likes: carried.map(|a| a.likes).unwrap_or(0),
        comments: carried.map(|a| a.comments).unwrap_or(0),
        featured: carried.map(|a| a.featured).unwrap_or(false),
        cover_image: carried.and_then(|a| a.cover_image.clone()),
    }))
}

fn load_categories(path: &Path) -> Vec<Category> {
    let parsed = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .and_then(|raw| {
            serde_json::from_slice::<CategoryIndex>(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))
        });
    match parsed {
        Ok(index) => index.categories,
        Err(err) => {
            tracing::warn!("{:#}; category paths will not be resolved", err);
            Vec::new()
        },
    }
}

/// Previous index entries by id; counters are carried over from these.
fn load_previous(path: &Path) -> HashMap<u64, Article> {
    let Ok(raw) = fs::read(path) else {
        tracing::info!("No existing index at {}, creating a new one", path.display());
        return HashMap::new();
    };
    match serde_json::from_slice::<ArticleIndex>(&raw) {
        Ok(index) => index
            .articles
            .into_iter()
            .map(|article| (article.id, article))
            .collect(),
        Err(err) => {
            tracing::warn!("Ignoring unreadable index {}: {}", path.display(), err);
            HashMap::new()
        },
    }
}

fn write_index(path: &Path, index: &ArticleIndex) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(index).context("failed to encode article index")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Path of the markdown file as stored in the index.
///
/// Relative to the site root when the file lives under it; otherwise the
/// absolute path, which the backend's `root.join(..)` leaves intact.
fn content_path(root: &Path, path: &Path) -> String {
    let path = canonical(path);
    if path.starts_with(root) {
        return relative_filename(root, &path);
    }
    tracing::warn!(
        "{} is outside the site root {}; storing absolute path",
        path.display(),
        root.display()
    );
    path.to_string_lossy().replace('\\', "/")
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
