use std::{fs, path::Path};

use mdpress_cli::commands::index::{self, IndexOptions};
use mdpress_shared::{ArticleIndex, ArticleStatus};
use serde_json::json;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

fn site() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    write(
        &root.join("data/categories.json"),
        &json!({ "categories": [
            { "id": 1, "name": "Backend", "slug": "backend", "subCategories": [
                { "id": 11, "name": "Database", "slug": "database", "parentId": 1 }
            ]},
            { "id": 2, "name": "Frontend", "slug": "frontend" }
        ]})
        .to_string(),
    );
    write(
        &root.join("content/articles/backend/database/tuning.md"),
        "# Tuning Postgres\n\n> Date: 2024-03-01\n> Tags: postgres, performance\n\nVacuum \
         often.\n",
    );
    write(
        &root.join("content/articles/frontend/intro.md"),
        "# Frontend Intro\n\n> 发布时间：2024-05-01\n> 分类：Backend\n> 作者：ada\n\nHello.\n",
    );
    write(
        &root.join("content/articles/drafts/wip.md"),
        "# Work In Progress\n\n> Date: 2024-04-01\n> Status: draft\n\nTBD.\n",
    );
    write(&root.join("content/articles/untitled.md"), "No heading here.\n");
    dir
}

fn options(root: &Path) -> IndexOptions {
    IndexOptions {
        content_dir: root.join("content/articles"),
        categories: root.join("data/categories.json"),
        output: root.join("data/articles.json"),
        root: root.to_path_buf(),
        default_author: "admin".to_string(),
    }
}

fn read_index(path: &Path) -> ArticleIndex {
    serde_json::from_slice(&fs::read(path).expect("read index")).expect("parse index")
}

#[test]
fn index_builds_sorted_entries_with_metadata() {
    let site = site();
    let index = index::run(&options(site.path())).expect("index");

    let titles: Vec<&str> = index.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Frontend Intro", "Work In Progress", "Tuning Postgres"]);

    let tuning = &index.articles[2];
    assert_eq!(tuning.slug, "tuning");
    assert_eq!(tuning.content, "content/articles/backend/database/tuning.md");
    assert_eq!(tuning.category_slugs, vec!["backend", "database"]);
    assert_eq!(tuning.category_id, 11);
    assert_eq!(tuning.tags, vec!["postgres", "performance"]);
    assert_eq!(tuning.author, "admin");
    assert_eq!(tuning.excerpt, "Vacuum often....");

    // Metadata category wins over the directory.
    let intro = &index.articles[0];
    assert_eq!(intro.category_slugs, vec!["backend"]);
    assert_eq!(intro.category_id, 1);
    assert_eq!(intro.author, "ada");

    let wip = &index.articles[1];
    assert_eq!(wip.status, ArticleStatus::Draft);
    assert!(wip.category_slugs.is_empty());
    assert_eq!(wip.category_id, 0);

    assert_eq!(index.metadata.total_articles, 3);
    assert_eq!(index.metadata.published_articles, 2);
    assert_eq!(index.metadata.draft_articles, 1);
    assert_eq!(index.metadata.version, mdpress_shared::INDEX_FORMAT_VERSION);

    let written = read_index(&site.path().join("data/articles.json"));
    assert_eq!(written.articles.len(), 3);
}

#[test]
fn reindexing_keeps_ids_and_counters() {
    let site = site();
    let opts = options(site.path());
    let first = index::run(&opts).expect("first run");

    let mut edited = read_index(&opts.output);
    for article in &mut edited.articles {
        article.views = 42;
        article.likes = 7;
        article.comments = 3;
        article.featured = true;
    }
    fs::write(&opts.output, serde_json::to_vec(&edited).expect("encode")).expect("write");

    let second = index::run(&opts).expect("second run");
    let first_ids: Vec<u64> = first.articles.iter().map(|a| a.id).collect();
    let second_ids: Vec<u64> = second.articles.iter().map(|a| a.id).collect();
    assert_eq!(first_ids, second_ids);
    assert!(second
        .articles
        .iter()
        .all(|a| a.views == 42 && a.likes == 7 && a.comments == 3 && a.featured));
}

#[test]
fn corrupt_previous_index_starts_fresh() {
    let site = site();
    let opts = options(site.path());
    fs::write(&opts.output, "{ not json").expect("write");

    let index = index::run(&opts).expect("index");
    assert_eq!(index.articles.len(), 3);
    assert!(index.articles.iter().all(|a| a.views == 0));
}

#[test]
fn missing_content_dir_is_an_error() {
    let site = site();
    let mut opts = options(site.path());
    opts.content_dir = site.path().join("nowhere");
    assert!(index::run(&opts).is_err());
}

#[test]
fn content_outside_root_keeps_a_resolvable_path() {
    let site = site();
    let elsewhere = tempfile::tempdir().expect("tempdir");
    write(&elsewhere.path().join("notes/outside.md"), "# Outside\n\nBody.\n");

    let mut opts = options(site.path());
    opts.content_dir = elsewhere.path().to_path_buf();
    let index = index::run(&opts).expect("index");

    assert_eq!(index.articles.len(), 1);
    let article = &index.articles[0];
    assert!(Path::new(&article.content).is_absolute());
    assert!(opts.root.join(&article.content).exists());
    assert_eq!(article.content.rsplit('/').next(), Some("outside.md"));
}
