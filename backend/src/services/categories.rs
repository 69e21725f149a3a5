use mdpress_shared::{taxonomy, Article, Category};
use serde::Serialize;

use super::{latest_of, ArticleBrief};

/// Navigation-menu view of a top-level category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub has_sub_menu: bool,
    pub sub_categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    #[serde(flatten)]
    pub category: Category,
    pub article_count: usize,
    pub latest_article: Option<ArticleBrief>,
}

pub fn find_by_id(categories: &[Category], id: u64) -> Option<&Category> {
    taxonomy::find_by_id(categories, id)
}

pub fn find_by_slug<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    taxonomy::find_by_slug(categories, slug)
}

pub fn tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    categories
        .iter()
        .map(|category| CategoryTreeNode {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            has_sub_menu: category
                .has_sub_menu
                .unwrap_or(!category.sub_categories.is_empty()),
            sub_categories: category.sub_categories.clone(),
        })
        .collect()
}

/// Top-level entries without a parent.
pub fn main_categories(categories: &[Category]) -> Vec<Category> {
    categories
        .iter()
        .filter(|category| category.parent_id.is_none())
        .cloned()
        .collect()
}

pub fn children(categories: &[Category], id: u64) -> Vec<Category> {
    find_by_id(categories, id)
        .map(|parent| parent.sub_categories.clone())
        .unwrap_or_default()
}

/// Published article counts per top-level category.
///
/// An article belongs to a category when the category's slug appears anywhere
/// in its `categorySlugs` path.
pub fn stats(categories: &[Category], articles: &[Article]) -> Vec<CategoryStats> {
    categories
        .iter()
        .map(|category| {
            let members: Vec<&Article> = articles
                .iter()
                .filter(|a| a.is_published() && a.category_slugs.contains(&category.slug))
                .collect();
            CategoryStats {
                category: category.clone(),
                article_count: members.len(),
                latest_article: latest_of(members),
            }
        })
        .collect()
}
