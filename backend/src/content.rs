//! Article content delivery.
//!
//! Decides per request whether an article's markdown is inlined as-is,
//! inlined with a warning about embedded base64 images, or replaced by a
//! short stub pointing at the dedicated content endpoint.

use std::path::Path;

use anyhow::{Context, Result};
use mdpress_shared::{images::scan_base64_images, Article};
use serde::Serialize;
use tokio::fs;

/// CLI invocation that moves inlined images out of the markdown.
pub const EXTRACT_IMAGES_COMMAND: &str = "mdpress-cli extract-images";

/// `includeContent` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeContent {
    /// Inspect the file and pick the cheapest acceptable representation.
    Auto,
    /// Always return the full content.
    Always,
    /// Never touch the file.
    Never,
}

impl IncludeContent {
    /// Missing or `auto` selects `Auto`; any value other than `true` means `Never`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("auto") => IncludeContent::Auto,
            Some("true") => IncludeContent::Always,
            Some(_) => IncludeContent::Never,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeliveryOptions {
    pub include: IncludeContent,
    pub check_base64: bool,
    pub max_size_kb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentWarning {
    #[serde(rename_all = "camelCase")]
    LargeFile {
        message: String,
        /// Size in KB with two decimals.
        file_size: String,
        recommended_api: String,
    },
    #[serde(rename_all = "camelCase")]
    Base64Images {
        message: String,
        base64_image_count: usize,
        /// Estimated decoded size, e.g. `"12.50KB"`.
        estimated_size: String,
        recommended_action: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredContent {
    pub content: String,
    pub warning: Option<ContentWarning>,
}

impl DeliveredContent {
    fn plain(content: String) -> Self {
        Self {
            content,
            warning: None,
        }
    }

    fn empty() -> Self {
        Self::plain(String::new())
    }
}

/// Produce the content field for an article detail response.
///
/// Never fails: stat and read errors are logged and degrade to an empty
/// string so the rest of the article can still be served.
pub async fn deliver(path: &Path, article: &Article, options: &DeliveryOptions) -> DeliveredContent {
    match options.include {
        IncludeContent::Never => DeliveredContent::empty(),
        IncludeContent::Always => match fs::read_to_string(path).await {
            Ok(text) => DeliveredContent::plain(strip_leading_title(&text).to_string()),
            Err(err) => {
                tracing::warn!("Failed to read content {}: {}", path.display(), err);
                DeliveredContent::empty()
            },
        },
        IncludeContent::Auto => deliver_auto(path, article, options).await,
    }
}

async fn deliver_auto(path: &Path, article: &Article, options: &DeliveryOptions) -> DeliveredContent {
    let size = match fs::metadata(path).await {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            tracing::warn!("Failed to stat content {}: {}", path.display(), err);
            return DeliveredContent::empty();
        },
    };

    // Oversized files are never read here.
    if exceeds_threshold(size, options.max_size_kb) {
        let file_size = format_kb(size);
        let recommended_api = content_api_path(article.id);
        tracing::debug!(article_id = article.id, size, "content over inline threshold");
        return DeliveredContent {
            content: large_file_stub(&article.title, &recommended_api),
            warning: Some(ContentWarning::LargeFile {
                message: format!(
                    "Article content is large ({file_size}KB); fetch it from {recommended_api}"
                ),
                file_size,
                recommended_api,
            }),
        };
    }

    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("Failed to read content {}: {}", path.display(), err);
            return DeliveredContent::empty();
        },
    };

    let warning = if options.check_base64 {
        let scan = scan_base64_images(&text);
        scan.has_images().then(|| ContentWarning::Base64Images {
            message: format!(
                "Article embeds {} base64 image(s); extract them or use the raw content endpoint",
                scan.count
            ),
            base64_image_count: scan.count,
            estimated_size: format!("{}KB", format_kb(scan.estimated_decoded_bytes() as u64)),
            recommended_action: format!("Run `{EXTRACT_IMAGES_COMMAND}`"),
        })
    } else {
        None
    };

    DeliveredContent {
        content: strip_leading_title(&text).to_string(),
        warning,
    }
}

/// Size and embedded-image profile of a content file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    pub file_size: u64,
    pub file_size_kb: f64,
    pub line_count: usize,
    pub character_count: usize,
    pub has_base64_images: bool,
    pub base64_image_count: usize,
    pub estimated_base64_size: usize,
}

pub async fn inspect(path: &Path) -> Result<ContentInfo> {
    let text = read_raw(path).await?;
    let scan = scan_base64_images(&text);
    let file_size = text.len() as u64;
    Ok(ContentInfo {
        file_size,
        file_size_kb: round_kb(file_size),
        line_count: text.lines().count(),
        character_count: text.chars().count(),
        has_base64_images: scan.has_images(),
        base64_image_count: scan.count,
        estimated_base64_size: scan.estimated_decoded_bytes(),
    })
}

/// The file exactly as stored on disk.
pub async fn read_raw(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read content {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    #[serde(rename_all = "camelCase")]
    ExtractImages {
        message: String,
        action: String,
        estimated_saving: String,
    },
    #[serde(rename_all = "camelCase")]
    UseContentApi {
        message: String,
        action: String,
        current_size: String,
    },
}

pub fn recommendations(info: &ContentInfo, article_id: u64, max_size_kb: u64) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if info.has_base64_images {
        out.push(Recommendation::ExtractImages {
            message: format!(
                "Extract {} base64 image(s) to speed up delivery",
                info.base64_image_count
            ),
            action: EXTRACT_IMAGES_COMMAND.to_string(),
            estimated_saving: format!("~{}KB", format_kb(info.estimated_base64_size as u64)),
        });
    }
    if exceeds_threshold(info.file_size, max_size_kb) {
        out.push(Recommendation::UseContentApi {
            message: "File is large; use the dedicated content endpoint".to_string(),
            action: format!("GET {}", content_api_path(article_id)),
            current_size: format!("{}KB", format_kb(info.file_size)),
        });
    }
    out
}

pub fn content_api_path(article_id: u64) -> String {
    format!("/api/articles/{article_id}/content")
}

/// Drop a leading level-1 heading plus at most one blank line after it.
///
/// The title is already part of the structured response, so repeating it in
/// the body would render it twice.
pub fn strip_leading_title(content: &str) -> &str {
    let body = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
    if !is_level_one_heading(first.trim_end_matches('\r')) {
        return content;
    }
    match rest.split_once('\n') {
        Some((line, tail)) if line.trim().is_empty() => tail,
        None if rest.trim().is_empty() => "",
        _ => rest,
    }
}

fn is_level_one_heading(line: &str) -> bool {
    line.strip_prefix('#')
        .map(|rest| rest.starts_with(' ') || rest.starts_with('\t'))
        .unwrap_or(false)
}

fn large_file_stub(title: &str, recommended_api: &str) -> String {
    format!("# {title}\n\n> Content is too large to inline; fetch the full text from {recommended_api}")
}

fn exceeds_threshold(size_bytes: u64, max_size_kb: u64) -> bool {
    size_bytes > max_size_kb.saturating_mul(1024)
}

fn format_kb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

fn round_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
