//! Detection of base64 images inlined into markdown.

use once_cell::sync::Lazy;
use regex::Regex;

/// `![alt](data:image/<subtype>;base64,<payload>)`
///
/// Capture groups: 1 = alt text, 2 = MIME subtype, 3 = payload.
pub const BASE64_IMAGE_PATTERN: &str = r"!\[([^\]]*)\]\(data:image/([^;]+);base64,([^)]+)\)";

#[allow(clippy::unwrap_used, reason = "the pattern is a compile-time constant")]
static BASE64_IMAGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(BASE64_IMAGE_PATTERN).unwrap());

/// Shared compiled form of [`BASE64_IMAGE_PATTERN`].
pub fn base64_image_regex() -> &'static Regex {
    &BASE64_IMAGE_REGEX
}

/// Summary of the inlined images found in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base64ImageScan {
    /// Number of inlined images.
    pub count: usize,
    /// Total length of the encoded payloads.
    pub payload_bytes: usize,
}

impl Base64ImageScan {
    /// Decoded size estimate: every 4 base64 characters carry 3 bytes.
    pub fn estimated_decoded_bytes(&self) -> usize {
        self.payload_bytes / 4 * 3
    }

    /// Whether any inlined image was found.
    pub fn has_images(&self) -> bool {
        self.count > 0
    }
}

/// Count inlined base64 images in `markdown`.
pub fn scan_base64_images(markdown: &str) -> Base64ImageScan {
    // Cheap substring check first; most articles have no inlined images.
    if !markdown.contains("data:image/") {
        return Base64ImageScan::default();
    }

    base64_image_regex()
        .captures_iter(markdown)
        .fold(Base64ImageScan::default(), |mut scan, caps| {
            scan.count += 1;
            scan.payload_bytes += caps.get(3).map(|m| m.as_str().len()).unwrap_or(0);
            scan
        })
}
