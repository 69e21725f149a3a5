//! File-backed snapshots of the JSON index files.
//!
//! Each file is parsed into an immutable `Arc<T>` that is handed out to
//! every request. Before handing it out the file is stat'ed; when its
//! modification time or length changed the snapshot is re-parsed and swapped,
//! so edits on disk show up on the next request without re-parsing unchanged
//! files.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};

use anyhow::{Context, Result};
use mdpress_shared::{Article, ArticleIndex, CategoryIndex, TagIndex, UserIndex};
use serde::de::DeserializeOwned;
use tokio::{fs, sync::RwLock};

pub const ARTICLES_FILE: &str = "articles.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const TAGS_FILE: &str = "tags.json";
pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

struct Cached<T> {
    stamp: FileStamp,
    value: Arc<T>,
}

/// One JSON file and its most recently parsed contents.
pub struct JsonSnapshot<T> {
    path: PathBuf,
    cached: RwLock<Option<Cached<T>>>,
}

impl<T: DeserializeOwned> JsonSnapshot<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents of the file, re-parsed only if it changed.
    pub async fn load(&self) -> Result<Arc<T>> {
        let metadata = fs::metadata(&self.path)
            .await
            .with_context(|| format!("failed to stat {}", self.path.display()))?;
        let stamp = FileStamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        };

        // Without an mtime there is nothing to compare against; always re-read.
        if stamp.modified.is_some() {
            if let Some(cached) = self.cached.read().await.as_ref() {
                if cached.stamp == stamp {
                    return Ok(Arc::clone(&cached.value));
                }
            }
        }

        let raw = fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let value: T = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        let value = Arc::new(value);

        *self.cached.write().await = Some(Cached {
            stamp,
            value: Arc::clone(&value),
        });
        tracing::debug!(path = %self.path.display(), bytes = stamp.len, "snapshot reloaded");

        Ok(value)
    }
}

/// All index files of a site.
pub struct DataStore {
    site_root: PathBuf,
    articles: JsonSnapshot<ArticleIndex>,
    categories: JsonSnapshot<CategoryIndex>,
    tags: JsonSnapshot<TagIndex>,
    users: JsonSnapshot<UserIndex>,
}

impl DataStore {
    pub fn new(site_root: impl Into<PathBuf>, data_dir: &Path) -> Self {
        Self {
            site_root: site_root.into(),
            articles: JsonSnapshot::new(data_dir.join(ARTICLES_FILE)),
            categories: JsonSnapshot::new(data_dir.join(CATEGORIES_FILE)),
            tags: JsonSnapshot::new(data_dir.join(TAGS_FILE)),
            users: JsonSnapshot::new(data_dir.join(USERS_FILE)),
        }
    }

    pub async fn articles(&self) -> Result<Arc<ArticleIndex>> {
        self.articles.load().await
    }

    pub async fn categories(&self) -> Result<Arc<CategoryIndex>> {
        self.categories.load().await
    }

    pub async fn tags(&self) -> Result<Arc<TagIndex>> {
        self.tags.load().await
    }

    pub async fn users(&self) -> Result<Arc<UserIndex>> {
        self.users.load().await
    }

    /// Absolute location of an article's markdown file.
    pub fn content_path(&self, article: &Article) -> PathBuf {
        self.site_root.join(&article.content)
    }

    /// Parse every index once so configuration mistakes show up at startup.
    pub async fn warm_up(&self) {
        report_warm_up(self.articles.path(), self.articles().await.map(|i| i.articles.len()));
        report_warm_up(
            self.categories.path(),
            self.categories().await.map(|i| i.categories.len()),
        );
        report_warm_up(self.tags.path(), self.tags().await.map(|i| i.tags.len()));
        report_warm_up(self.users.path(), self.users().await.map(|i| i.users.len()));
    }
}

fn report_warm_up(path: &Path, loaded: Result<usize>) {
    match loaded {
        Ok(count) => tracing::info!("Loaded {} entries from {}", count, path.display()),
        Err(err) => tracing::warn!("Failed to load {}: {:#}", path.display(), err),
    }
}
