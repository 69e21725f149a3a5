use std::fs;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use mdpress_cli::commands::extract_images::{self, extract_from_markdown, ExtractOptions};
use mdpress_shared::images::scan_base64_images;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];
const SVG_BYTES: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>";

fn markdown() -> String {
    format!(
        "# Post\n\nIntro.\n\n![chart](data:image/png;base64,{})\n\ntext\n\n![logo](data:image/svg+xml;base64,{})\n",
        STANDARD.encode(PNG_BYTES),
        STANDARD.encode(SVG_BYTES)
    )
}

#[test]
fn extraction_rewrites_every_reference() {
    let extraction = extract_from_markdown(&markdown(), "post", "/content/assets/images/");

    assert_eq!(extraction.images.len(), 2);
    assert_eq!(extraction.images[0].bytes, PNG_BYTES);
    assert_eq!(extraction.images[1].bytes, SVG_BYTES);
    assert!(extraction.images[0].filename.starts_with("post-1-"));
    assert!(extraction.images[0].filename.ends_with(".png"));
    assert!(extraction.images[1].filename.starts_with("post-2-"));
    assert!(extraction.images[1].filename.ends_with(".svg"));

    let link = format!("![chart](/content/assets/images/{})", extraction.images[0].filename);
    assert!(extraction.content.contains(&link));
    assert_eq!(scan_base64_images(&extraction.content).count, 0);
}

#[test]
fn whitespace_inside_payload_is_ignored() {
    let encoded = STANDARD.encode(PNG_BYTES);
    let (head, tail) = encoded.split_at(4);
    let markdown = format!("![x](data:image/png;base64,{head}\n  {tail})");
    let extraction = extract_from_markdown(&markdown, "p", "/img");
    assert_eq!(extraction.images.len(), 1);
    assert_eq!(extraction.images[0].bytes, PNG_BYTES);
}

#[test]
fn run_writes_images_backup_and_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let articles = dir.path().join("articles");
    let images = dir.path().join("images");
    fs::create_dir_all(&articles).expect("mkdir");
    let article = articles.join("my-post.md");
    let original = markdown();
    fs::write(&article, &original).expect("write");
    fs::write(articles.join("plain.md"), "# Plain\n\nNo images.\n").expect("write");

    let options = ExtractOptions {
        content_dir: articles.clone(),
        images_dir: images.clone(),
        url_prefix: "/content/assets/images".to_string(),
        dry_run: false,
    };

    let summary = extract_images::run(&options).expect("extract");
    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_changed, 1);
    assert_eq!(summary.images_extracted, 2);

    let rewritten = fs::read_to_string(&article).expect("read");
    assert_eq!(scan_base64_images(&rewritten).count, 0);
    assert_eq!(
        fs::read_to_string(articles.join("my-post.md.backup")).expect("backup"),
        original
    );
    assert!(!articles.join("plain.md.backup").exists());

    let mut written: Vec<Vec<u8>> = fs::read_dir(&images)
        .expect("images dir")
        .map(|entry| fs::read(entry.expect("entry").path()).expect("read image"))
        .collect();
    written.sort();
    let mut expected = vec![PNG_BYTES.to_vec(), SVG_BYTES.to_vec()];
    expected.sort();
    assert_eq!(written, expected);

    let again = extract_images::run(&options).expect("second run");
    assert_eq!(again.files_changed, 0);
    assert_eq!(fs::read_to_string(&article).expect("read"), rewritten);
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let articles = dir.path().join("articles");
    fs::create_dir_all(&articles).expect("mkdir");
    let article = articles.join("post.md");
    fs::write(&article, markdown()).expect("write");

    let options = ExtractOptions {
        content_dir: articles.clone(),
        images_dir: dir.path().join("images"),
        url_prefix: "/img".to_string(),
        dry_run: true,
    };
    let summary = extract_images::run(&options).expect("dry run");

    assert_eq!(summary.images_extracted, 2);
    assert_eq!(fs::read_to_string(&article).expect("read"), markdown());
    assert!(!dir.path().join("images").exists());
    assert!(!articles.join("post.md.backup").exists());
}
