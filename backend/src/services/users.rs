use mdpress_shared::{Article, ArticleStatus, User};
use serde::Serialize;

use super::{latest_of, ArticleBrief};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_articles: usize,
    pub published_articles: usize,
    pub draft_articles: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub latest_article: Option<ArticleBrief>,
}

/// A user together with their article statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfile {
    #[serde(flatten)]
    pub user: User,
    pub stats: UserStats,
}

pub fn find_by_id(users: &[User], id: u64) -> Option<&User> {
    users.iter().find(|user| user.id == id)
}

pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    users.iter().find(|user| user.username == username)
}

/// Statistics over every article written by `username`, drafts included.
pub fn stats_for(username: &str, articles: &[Article]) -> UserStats {
    let own: Vec<&Article> = articles.iter().filter(|a| a.author == username).collect();

    UserStats {
        total_articles: own.len(),
        published_articles: own.iter().filter(|a| a.is_published()).count(),
        draft_articles: own
            .iter()
            .filter(|a| a.status == ArticleStatus::Draft)
            .count(),
        total_views: own.iter().map(|a| a.views).sum(),
        total_likes: own.iter().map(|a| a.likes).sum(),
        latest_article: latest_of(own.iter().copied()),
    }
}

pub fn profile(user: &User, articles: &[Article]) -> AuthorProfile {
    AuthorProfile {
        user: user.clone(),
        stats: stats_for(&user.username, articles),
    }
}

/// Resolve an author by username, then by numeric id.
///
/// Unknown identifiers produce a placeholder profile so article detail pages
/// still render an author block.
pub fn author_info(users: &[User], articles: &[Article], identifier: &str) -> AuthorProfile {
    let found = find_by_username(users, identifier).or_else(|| {
        identifier
            .parse::<u64>()
            .ok()
            .and_then(|id| find_by_id(users, id))
    });

    match found {
        Some(user) => profile(user, articles),
        None => AuthorProfile {
            user: placeholder(identifier),
            stats: UserStats::default(),
        },
    }
}

fn placeholder(identifier: &str) -> User {
    User {
        id: 0,
        username: identifier.to_string(),
        display_name: identifier.to_string(),
        avatar: String::new(),
        bio: String::new(),
        email: None,
        website: None,
    }
}

/// Users with at least one article, most prolific first.
pub fn authors(users: &[User], articles: &[Article]) -> Vec<AuthorProfile> {
    let mut profiles: Vec<AuthorProfile> = users
        .iter()
        .map(|user| profile(user, articles))
        .filter(|p| p.stats.total_articles > 0)
        .collect();
    profiles.sort_by(|a, b| b.stats.total_articles.cmp(&a.stats.total_articles));
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{article, user};

    fn by(id: u64, author: &str, views: u64) -> Article {
        let mut a = article(id, &format!("Post {id}"));
        a.author = author.to_string();
        a.views = views;
        a.likes = 1;
        a
    }

    #[test]
    fn stats_count_drafts_and_totals() {
        let mut draft = by(3, "alice", 100);
        draft.status = ArticleStatus::Draft;
        let articles = vec![by(1, "alice", 10), by(2, "bob", 5), draft];

        let stats = stats_for("alice", &articles);
        assert_eq!(stats.total_articles, 2);
        assert_eq!(stats.published_articles, 1);
        assert_eq!(stats.draft_articles, 1);
        assert_eq!(stats.total_views, 110);
        assert_eq!(stats.total_likes, 2);
        assert_eq!(stats.latest_article.map(|a| a.id), Some(3));
    }

    #[test]
    fn author_info_resolves_username_then_id() {
        let users = vec![user(1, "alice"), user(7, "42")];
        let articles = vec![by(1, "alice", 0)];

        assert_eq!(author_info(&users, &articles, "alice").user.id, 1);
        // A username that looks numeric wins over the id lookup.
        assert_eq!(author_info(&users, &articles, "42").user.id, 7);
        assert_eq!(author_info(&users, &articles, "1").user.username, "alice");
        assert_eq!(author_info(&users, &articles, "1").stats.total_articles, 1);
    }

    #[test]
    fn author_info_falls_back_to_placeholder() {
        let profile = author_info(&[], &[], "ghost");
        assert_eq!(profile.user.id, 0);
        assert_eq!(profile.user.display_name, "ghost");
        assert_eq!(profile.stats, UserStats::default());

        let value = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(value["username"], "ghost");
        assert_eq!(value["stats"]["totalArticles"], 0);
    }

    #[test]
    fn authors_skip_users_without_articles() {
        let users = vec![user(1, "alice"), user(2, "bob"), user(3, "carol")];
        let articles = vec![by(1, "bob", 0), by(2, "bob", 0), by(3, "alice", 0)];

        let names: Vec<String> = authors(&users, &articles)
            .into_iter()
            .map(|p| p.user.username)
            .collect();
        assert_eq!(names, vec!["bob", "alice"]);
    }
}
