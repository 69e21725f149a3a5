use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    Engine as _,
};
use mdpress_shared::images::base64_image_regex;
use regex::Captures;

use crate::utils::{article_id, article_slug, collect_markdown_files, relative_filename, short_hash};

/// Standard alphabet; trailing `=` padding may be present or missing.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub content_dir: PathBuf,
    pub images_dir: PathBuf,
    pub url_prefix: String,
    pub dry_run: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub images_extracted: usize,
    pub images_failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of rewriting one markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub content: String,
    pub images: Vec<ExtractedImage>,
    /// Matches whose payload could not be decoded; left untouched.
    pub failed: usize,
}

impl Extraction {
    pub fn changed(&self) -> bool {
        !self.images.is_empty()
    }
}

pub fn run(options: &ExtractOptions) -> Result<ExtractSummary> {
    let files = collect_markdown_files(&options.content_dir)?;
    let mut summary = ExtractSummary::default();

    for path in &files {
        summary.files_scanned += 1;
        match process_file(path, options) {
            Ok(Some(extraction)) => {
                summary.files_changed += 1;
                summary.images_extracted += extraction.images.len();
                summary.images_failed += extraction.failed;
            },
            Ok(None) => {},
            Err(err) => tracing::error!("Failed to process {}: {:#}", path.display(), err),
        }
    }

    tracing::info!(
        scanned = summary.files_scanned,
        changed = summary.files_changed,
        extracted = summary.images_extracted,
        failed = summary.images_failed,
        dry_run = options.dry_run,
        "Base64 image extraction finished"
    );
    if summary.files_changed > 0 && !options.dry_run {
        tracing::info!("Originals were kept as *.backup; re-run `mdpress-cli index` to refresh the index");
    }
    Ok(summary)
}

fn process_file(path: &Path, options: &ExtractOptions) -> Result<Option<Extraction>> {
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !original.contains("data:image/") {
        tracing::debug!("Skipping {}: no base64 images", path.display());
        return Ok(None);
    }

    let relative = relative_filename(&options.content_dir, path);
    let slug = article_slug(path, article_id(&relative));
    let extraction = extract_from_markdown(&original, &slug, &options.url_prefix);
    if !extraction.changed() {
        return Ok(None);
    }

    if options.dry_run {
        for image in &extraction.images {
            tracing::info!("[dry-run] {} -> {} ({} bytes)", relative, image.filename, image.bytes.len());
        }
        return Ok(Some(extraction));
    }

    fs::create_dir_all(&options.images_dir)
        .with_context(|| format!("failed to create {}", options.images_dir.display()))?;
    for image in &extraction.images {
        let target = options.images_dir.join(&image.filename);
        fs::write(&target, &image.bytes)
            .with_context(|| format!("failed to write {}", target.display()))?;
        tracing::info!("Extracted {} ({:.2} KB)", image.filename, image.bytes.len() as f64 / 1024.0);
    }

    let backup = backup_path(path);
    fs::write(&backup, &original)
        .with_context(|| format!("failed to write backup {}", backup.display()))?;
    fs::write(path, &extraction.content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Rewrote {}", relative);

    Ok(Some(extraction))
}

/// Replace every decodable inline image with a link to an extracted file.
///
/// Files are named `{slug}-{n}-{hash}.{ext}`, where `n` counts successful
/// extractions from 1.
pub fn extract_from_markdown(content: &str, slug: &str, url_prefix: &str) -> Extraction {
    let prefix = url_prefix.trim_end_matches('/');
    let mut images = Vec::new();
    let mut failed = 0;

    let rewritten = base64_image_regex().replace_all(content, |caps: &Captures<'_>| {
        let alt = &caps[1];
        let payload: String = caps[3].chars().filter(|c| !c.is_whitespace()).collect();

        match PAYLOAD_ENGINE.decode(payload.as_bytes()) {
            Ok(bytes) => {
                let filename = format!(
                    "{}-{}-{}.{}",
                    slug,
                    images.len() + 1,
                    short_hash(payload.as_bytes()),
                    extension_for(&caps[2])
                );
                let replacement = format!("![{alt}]({prefix}/{filename})");
                images.push(ExtractedImage { filename, bytes });
                replacement
            },
            Err(err) => {
                tracing::warn!("Leaving undecodable image in {}: {}", slug, err);
                failed += 1;
                caps[0].to_string()
            },
        }
    });

    Extraction {
        content: rewritten.into_owned(),
        images,
        failed,
    }
}

/// File extension for a MIME subtype such as `png` or `svg+xml`.
pub fn extension_for(subtype: &str) -> String {
    let subtype = subtype.trim().to_ascii_lowercase();
    if subtype == "svg+xml" {
        return "svg".to_string();
    }
    let ext: String = subtype.chars().filter(char::is_ascii_alphanumeric).collect();
    if ext.is_empty() {
        "bin".to_string()
    } else {
        ext
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}
