#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::{TimeZone, Utc};
    use mdpress_cli::utils;
    use mdpress_shared::Category;

    fn category(id: u64, name: &str, slug: &str, children: Vec<Category>) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            parent_id: None,
            has_sub_menu: None,
            sub_categories: children,
        }
    }

    fn tree() -> Vec<Category> {
        vec![
            category(1, "后端开发", "backend", vec![category(11, "数据库", "database", vec![])]),
            category(2, "Frontend", "frontend", vec![category(21, "Vue", "vue", vec![])]),
        ]
    }

    #[test]
    fn parse_markdown_meta_reads_title_and_quote_block() {
        let markdown = "# Tuning Postgres\n\n> 发布时间：2024-03-01 09:30\n> 分类：后端开发 > \
                        数据库\n> 标签：postgres，performance, ops\n> Author: ada\n> Status: \
                        draft\n\nFirst paragraph of the article.\nStill first.\n\nSecond \
                        paragraph.\n";
        let meta = utils::parse_markdown_meta(markdown);

        assert_eq!(meta.title.as_deref(), Some("Tuning Postgres"));
        assert_eq!(meta.publish_date.as_deref(), Some("2024-03-01 09:30"));
        assert_eq!(meta.category.as_deref(), Some("后端开发 > 数据库"));
        assert_eq!(meta.tags, vec!["postgres", "performance", "ops"]);
        assert_eq!(meta.author.as_deref(), Some("ada"));
        assert_eq!(meta.status.as_deref(), Some("draft"));
        assert_eq!(meta.excerpt, "First paragraph of the article.\nStill first....");
    }

    #[test]
    fn excerpt_skips_code_and_truncates() {
        let long = "x".repeat(200);
        let markdown = format!("# T\n\n```rust\nfn main() {{}}\n```\n\n{long}\n");
        let excerpt = utils::excerpt(&markdown);
        assert_eq!(excerpt.chars().count(), utils::EXCERPT_CHARS + 3);
        assert!(excerpt.ends_with("x..."));

        assert_eq!(utils::excerpt("# Only a title\n"), "");
    }

    #[test]
    fn parse_tags_trims_and_filters_empty() {
        let tags = utils::parse_tags(" rust, wasm, ,backend ,,");
        assert_eq!(tags, vec!["rust".to_string(), "wasm".to_string(), "backend".to_string()]);
    }

    #[test]
    fn publish_dates_accept_common_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single();
        assert_eq!(utils::parse_publish_date("2024-03-01"), midnight);
        assert_eq!(utils::parse_publish_date("2024/03/01"), midnight);
        assert_eq!(
            utils::parse_publish_date("2024-03-01 09:30"),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single()
        );
        assert_eq!(
            utils::parse_publish_date("2024-03-01T10:00:00+02:00"),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).single()
        );
        assert_eq!(utils::parse_publish_date("March first"), None);
    }

    #[test]
    fn hash_bytes_matches_sha256() {
        let hash = utils::hash_bytes(b"hello");
        assert_eq!(hash, "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");
        assert_eq!(utils::short_hash(b"hello"), "2cf24dba");
    }

    #[test]
    fn article_id_is_leading_digest_bits() {
        assert_eq!(utils::article_id("hello"), 0x2cf2_4dba);
        assert_eq!(utils::article_id("backend/a.md"), utils::article_id("backend/a.md"));
        assert_ne!(utils::article_id("backend/a.md"), utils::article_id("backend/b.md"));
    }

    #[test]
    fn article_slug_falls_back_to_id() {
        assert_eq!(utils::article_slug(Path::new("x/Hello World!.md"), 7), "hello-world");
        assert_eq!(utils::article_slug(Path::new("x/随笔.md"), 7), "article-7");
    }

    #[test]
    fn categories_resolve_from_metadata_then_directories() {
        let tree = tree();
        let slugs = |chain: Vec<&Category>| -> Vec<String> {
            chain.into_iter().map(|c| c.slug.clone()).collect()
        };

        let by_name = utils::resolve_categories(&tree, Some("后端开发 > 数据库"), "misc/a.md");
        assert_eq!(slugs(by_name), vec!["backend", "database"]);

        let unknown_name = utils::resolve_categories(&tree, Some("Nope"), "frontend/vue/a.md");
        assert_eq!(slugs(unknown_name), vec!["frontend", "vue"]);

        let top_only = utils::resolve_categories(&tree, None, "frontend/a.md");
        assert_eq!(slugs(top_only), vec!["frontend"]);

        assert!(utils::resolve_categories(&tree, None, "a.md").is_empty());
        assert!(utils::resolve_categories(&tree, None, "misc/a.md").is_empty());
    }

    #[test]
    fn collect_markdown_files_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("b")).expect("mkdir");
        std::fs::write(dir.path().join("b/z.md"), "# z").expect("write");
        std::fs::write(dir.path().join("a.MD"), "# a").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "skip").expect("write");
        std::fs::write(dir.path().join("c.md.backup"), "skip").expect("write");

        let files = utils::collect_markdown_files(dir.path()).expect("collect");
        let names: Vec<String> = files
            .iter()
            .map(|path| utils::relative_filename(dir.path(), path))
            .collect();
        assert_eq!(names, vec!["a.MD", "b/z.md"]);

        assert!(utils::collect_markdown_files(&dir.path().join("missing")).is_err());
    }
}
