//! Traversals over the category tree.
//!
//! The tree is built top-down from JSON, so every node owns its children and
//! there are no cycles to guard against.

use crate::Category;

/// Depth-first search by slug across every level of the tree.
pub fn find_by_slug<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    find(categories, &|category| category.slug == slug)
}

/// Depth-first search by id across every level of the tree.
pub fn find_by_id(categories: &[Category], id: u64) -> Option<&Category> {
    find(categories, &|category| category.id == id)
}

fn find<'a>(
    categories: &'a [Category],
    predicate: &dyn Fn(&Category) -> bool,
) -> Option<&'a Category> {
    for category in categories {
        if predicate(category) {
            return Some(category);
        }
        if let Some(found) = find(&category.sub_categories, predicate) {
            return Some(found);
        }
    }
    None
}

/// Walk down the tree following `names` (e.g. `["Backend", "Database"]`).
///
/// Stops at the first name that has no match on the current level and
/// returns the categories matched so far.
pub fn walk_names<'a, S: AsRef<str>>(categories: &'a [Category], names: &[S]) -> Vec<&'a Category> {
    walk(categories, names, |category, name| category.name == name)
}

/// Same as [`walk_names`], matching slugs instead of display names.
pub fn walk_slugs<'a, S: AsRef<str>>(categories: &'a [Category], slugs: &[S]) -> Vec<&'a Category> {
    walk(categories, slugs, |category, slug| category.slug == slug)
}

fn walk<'a, S: AsRef<str>>(
    categories: &'a [Category],
    keys: &[S],
    matches: impl Fn(&Category, &str) -> bool,
) -> Vec<&'a Category> {
    let mut path = Vec::with_capacity(keys.len());
    let mut level = categories;
    for key in keys {
        let key = key.as_ref().trim();
        let Some(found) = level.iter().find(|category| matches(category, key)) else {
            break;
        };
        path.push(found);
        level = &found.sub_categories;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

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
            category(1, "Frontend", "frontend", vec![category(11, "Vue", "vue", vec![])]),
            category(
                2,
                "Backend",
                "backend",
                vec![category(21, "Database", "database", vec![category(
                    211, "Postgres", "postgres", vec![],
                )])],
            ),
        ]
    }

    #[test]
    fn find_by_slug_searches_nested_levels() {
        let tree = tree();
        assert_eq!(find_by_slug(&tree, "postgres").map(|c| c.id), Some(211));
        assert_eq!(find_by_slug(&tree, "frontend").map(|c| c.id), Some(1));
        assert!(find_by_slug(&tree, "missing").is_none());
    }

    #[test]
    fn find_by_id_searches_nested_levels() {
        let tree = tree();
        assert_eq!(find_by_id(&tree, 11).map(|c| c.slug.as_str()), Some("vue"));
        assert!(find_by_id(&tree, 99).is_none());
    }

    #[test]
    fn walk_names_stops_at_first_miss() {
        let tree = tree();
        let path: Vec<_> = walk_names(&tree, &["Backend", " Database ", "MySQL"])
            .into_iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(path, vec!["backend", "database"]);
        assert!(walk_names(&tree, &["Nope", "Vue"]).is_empty());
    }

    #[test]
    fn walk_slugs_follows_children() {
        let tree = tree();
        let path = walk_slugs(&tree, &["frontend", "vue"]);
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].id, 11);
    }
}
