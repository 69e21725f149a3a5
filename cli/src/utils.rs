use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mdpress_shared::{slug::slugify, taxonomy, Category};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Excerpts are cut to this many characters before the ellipsis.
pub const EXCERPT_CHARS: usize = 150;

#[allow(clippy::unwrap_used, reason = "the pattern is a compile-time constant")]
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

const DATE_KEYS: &[&str] = &["发布时间", "date", "published"];
const CATEGORY_KEYS: &[&str] = &["分类", "category"];
const TAG_KEYS: &[&str] = &["标签", "tags"];
const AUTHOR_KEYS: &[&str] = &["作者", "author"];
const STATUS_KEYS: &[&str] = &["状态", "status"];

/// Metadata read from an article's title and leading quote block:
///
/// ```text
/// # Title
///
/// > 发布时间：2024-03-01
/// > 分类：Backend > Database
/// > Tags: postgres, performance
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MarkdownMeta {
    pub title: Option<String>,
    pub publish_date: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub excerpt: String,
}

pub fn parse_markdown_meta(content: &str) -> MarkdownMeta {
    let lines: Vec<&str> = content.lines().collect();
    let title_at = lines.iter().position(|line| heading_text(line).is_some());

    let mut meta = MarkdownMeta {
        title: title_at
            .and_then(|i| heading_text(lines[i]))
            .map(ToOwned::to_owned),
        excerpt: excerpt(content),
        ..MarkdownMeta::default()
    };

    let start = title_at.map(|i| i + 1).unwrap_or(0);
    for line in metadata_block(&lines[start..]) {
        let Some((key, value)) = split_meta_line(line) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if key_in(key, DATE_KEYS) {
            meta.publish_date = Some(value.to_string());
        } else if key_in(key, CATEGORY_KEYS) {
            meta.category = Some(value.to_string());
        } else if key_in(key, TAG_KEYS) {
            meta.tags = parse_tags(value);
        } else if key_in(key, AUTHOR_KEYS) {
            meta.author = Some(value.to_string());
        } else if key_in(key, STATUS_KEYS) {
            meta.status = Some(value.to_string());
        }
    }

    meta
}

/// Text of a level-1 heading line.
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim()).filter(|title| !title.is_empty())
}

/// Consecutive `>` lines after optional blank lines.
fn metadata_block<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| line.starts_with('>'))
        .map(|line| line.trim_start_matches('>').trim())
        .collect()
}

fn split_meta_line(line: &str) -> Option<(&str, &str)> {
    let at = line.find([':', '：'])?;
    let separator_len = line[at..].chars().next().map(char::len_utf8).unwrap_or(1);
    Some((line[..at].trim(), &line[at + separator_len..]))
}

fn key_in(key: &str, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|candidate| key.eq_ignore_ascii_case(candidate))
}

/// First paragraph of prose, ignoring headings, quote lines and fenced code.
pub fn excerpt(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    let without_code = FENCED_CODE.replace_all(&normalized, "");
    let prose = without_code
        .lines()
        .map(|line| {
            if line.starts_with('#') || line.starts_with('>') {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let first = prose.trim().split("\n\n").next().unwrap_or_default();
    if first.is_empty() {
        return String::new();
    }
    let mut excerpt: String = first.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

/// Split a tag list on ASCII or full-width commas.
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split([',', '，'])
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

/// Parse a metadata date as UTC.
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// First 8 hex characters of the SHA-256 digest.
pub fn short_hash(bytes: &[u8]) -> String {
    hash_bytes(bytes)[..8].to_string()
}

/// Stable article id: the first 32 bits of SHA-256 over the path relative to
/// the content root.
pub fn article_id(relative_path: &str) -> u64 {
    let digest = Sha256::digest(relative_path.as_bytes());
    u64::from(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Slug from the file stem, or `article-{id}` when nothing usable remains.
pub fn article_slug(path: &Path, id: u64) -> String {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let slug = slugify(stem);
    if slug.is_empty() {
        format!("article-{id}")
    } else {
        slug
    }
}

pub fn relative_filename(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches('/')
        .to_string()
}

/// All `.md` files under `dir`, in a stable order.
pub fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("content directory {} does not exist", dir.display());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Category chain for an article, from the top-level category down.
///
/// A `Parent > Child` metadata path is matched by name first. Without a
/// usable one, the first two directories of `relative_path` are matched
/// against top-level and sub-category slugs.
pub fn resolve_categories<'a>(
    categories: &'a [Category],
    meta_category: Option<&str>,
    relative_path: &str,
) -> Vec<&'a Category> {
    if let Some(path) = meta_category {
        let names: Vec<&str> = path.split('>').map(str::trim).collect();
        let resolved = taxonomy::walk_names(categories, &names);
        if !resolved.is_empty() {
            return resolved;
        }
    }

    let mut dirs: Vec<&str> = relative_path.split('/').collect();
    dirs.pop();
    dirs.truncate(2);
    taxonomy::walk_slugs(categories, &dirs)
}
