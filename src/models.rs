use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Maximum number of repositories requested and rendered.
pub const REPO_PAGE_SIZE: usize = 6;

/// A GitHub user profile from the `/users/{login}` API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    /// Personal site. GitHub returns an empty string when unset.
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

/// One entry of `/users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

/// Decoded repository response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoPayload {
    /// The server's own star-sorted ordering, at most [`REPO_PAGE_SIZE`] long.
    List(Vec<RepositorySummary>),
    /// The body was missing or not a JSON array.
    Malformed,
}

impl RepoPayload {
    /// Decode a repository payload without trusting its shape.
    ///
    /// Anything other than an array is `Malformed`. Array entries that do
    /// not look like a repository are dropped; the rest keep their order.
    pub fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            return RepoPayload::Malformed;
        };

        let repos = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                match serde_json::from_value::<RepositorySummary>(item) {
                    Ok(repo) => Some(repo),
                    Err(e) => {
                        warn!("Skipping repository entry {}: {}", index, e);
                        None
                    }
                }
            })
            .take(REPO_PAGE_SIZE)
            .collect();

        RepoPayload::List(repos)
    }

    /// Repositories to render. A malformed payload renders as none.
    pub fn repos(&self) -> &[RepositorySummary] {
        match self {
            RepoPayload::List(repos) => repos,
            RepoPayload::Malformed => &[],
        }
    }
}
