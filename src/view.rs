//! View models built from fetched records.
//!
//! Everything here is plain data: surfaces decide how to draw it and are
//! responsible for escaping the provider-supplied strings.

use crate::format::{format_count, language_color};
use crate::models::{RepositorySummary, UserProfile};

/// Card text used when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    Location,
    Company,
    Website,
    Social,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaItem {
    pub kind: MetaKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub repos: String,
    pub followers: String,
    pub following: String,
}

/// The profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub avatar_url: String,
    pub heading: String,
    pub handle: String,
    pub bio: String,
    pub stats: ProfileStats,
    pub profile_url: String,
    /// Location, company, website, social handle; only those present.
    pub meta: Vec<MetaItem>,
}

/// Treat `None` and `""` alike.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl ProfileView {
    pub fn from_user(user: &UserProfile) -> Self {
        let mut meta = Vec::new();
        let sources = [
            (MetaKind::Location, present(&user.location).map(str::to_owned)),
            (MetaKind::Company, present(&user.company).map(str::to_owned)),
            (MetaKind::Website, present(&user.blog).map(str::to_owned)),
            (
                MetaKind::Social,
                present(&user.twitter_username).map(|handle| format!("@{handle}")),
            ),
        ];
        for (kind, text) in sources {
            if let Some(text) = text {
                meta.push(MetaItem { kind, text });
            }
        }

        ProfileView {
            avatar_url: user.avatar_url.clone(),
            heading: present(&user.name).unwrap_or(user.login.as_str()).to_owned(),
            handle: format!("@{}", user.login),
            bio: present(&user.bio).unwrap_or_default().to_owned(),
            stats: ProfileStats {
                repos: format_count(user.public_repos),
                followers: format_count(user.followers),
                following: format_count(user.following),
            },
            profile_url: user.html_url.clone(),
            meta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBadge {
    pub name: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub name: String,
    pub url: String,
    pub owner_avatar_url: String,
    pub description: String,
    pub stars: String,
    pub forks: String,
    pub language: Option<LanguageBadge>,
}

impl RepoCard {
    pub fn from_summary(repo: &RepositorySummary, owner_avatar_url: &str) -> Self {
        RepoCard {
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            owner_avatar_url: owner_avatar_url.to_owned(),
            description: present(&repo.description)
                .unwrap_or(NO_DESCRIPTION)
                .to_owned(),
            stars: format_count(repo.stargazers_count),
            forks: format_count(repo.forks_count),
            language: present(&repo.language).map(|name| LanguageBadge {
                name: name.to_owned(),
                color: language_color(Some(name)),
            }),
        }
    }
}

/// The repository grid, in the order the server returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoGrid {
    pub cards: Vec<RepoCard>,
}

impl RepoGrid {
    pub fn from_repos(repos: &[RepositorySummary], owner_avatar_url: &str) -> Self {
        RepoGrid {
            cards: repos
                .iter()
                .map(|repo| RepoCard::from_summary(repo, owner_avatar_url))
                .collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
