use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::models::{RepoPayload, UserProfile, REPO_PAGE_SIZE};

/// GitHub REST API root.
pub const API_BASE: &str = "https://api.github.com";

/// Result of one successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedProfile {
    pub user: UserProfile,
    pub repos: RepoPayload,
}

/// Where profiles come from.
pub trait ProfileSource: Send + Sync {
    /// Fetch the user record and their top repositories for `login`.
    fn fetch(&self, login: &str) -> impl Future<Output = Result<FetchedProfile, LookupError>> + Send;
}

/// Anonymous client for the public GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: Client,
    base: Url,
}

impl GitHubFetcher {
    /// Create a fetcher for [`API_BASE`].
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(API_BASE)
    }

    pub(crate) fn with_base_url(base: &str) -> Result<Self, LookupError> {
        let base = Url::parse(base).map_err(LookupError::transport)?;
        if base.cannot_be_a_base() {
            return Err(LookupError::transport(format!("'{base}' cannot be an API base")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let client = Client::builder()
            .user_agent(concat!("github-profile-lookup/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(LookupError::transport)?;

        Ok(GitHubFetcher { client, base })
    }

    /// `{base}/users/{login}`, with the login percent-encoded as one segment.
    pub fn user_url(&self, login: &str) -> Url {
        self.endpoint(&["users", login])
    }

    /// `{base}/users/{login}/repos?sort=stars&per_page=6`
    pub fn repos_url(&self, login: &str) -> Url {
        let mut url = self.endpoint(&["users", login, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", "stars")
            .append_pair("per_page", &REPO_PAGE_SIZE.to_string());
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in the constructor: the base always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: Url) -> Result<Response, reqwest::Error> {
        debug!("Requesting URL: {}", url);
        self.client.get(url).send().await
    }

    async fn decode_repos(response: Response) -> RepoPayload {
        let status = response.status();
        if !status.is_success() {
            warn!("Repository request returned {}", status);
        }

        match response.json::<Value>().await {
            Ok(value) => {
                let payload = RepoPayload::from_value(value);
                if payload == RepoPayload::Malformed {
                    warn!("Repository payload is not a list; showing no repositories");
                }
                payload
            }
            Err(e) => {
                warn!("Could not read repository payload: {}", e);
                RepoPayload::Malformed
            }
        }
    }
}

impl ProfileSource for GitHubFetcher {
    async fn fetch(&self, login: &str) -> Result<FetchedProfile, LookupError> {
        // Fire both requests together and wait for both
        let (user_res, repos_res) = futures::join!(
            self.get(self.user_url(login)),
            self.get(self.repos_url(login)),
        );

        // A request that never got a response fails the whole lookup
        let user_res = user_res.map_err(LookupError::transport)?;
        let repos_res = repos_res.map_err(LookupError::transport)?;

        // Missing user: the repository response is dropped unread
        if !user_res.status().is_success() {
            return Err(LookupError::NotFound {
                login: login.to_owned(),
                status: user_res.status(),
            });
        }

        // Decode the user strictly, the repositories leniently
        let user = user_res
            .json::<UserProfile>()
            .await
            .map_err(LookupError::decode)?;
        let repos = Self::decode_repos(repos_res).await;

        Ok(FetchedProfile { user, repos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::{Barrier, Mutex};
    use tokio::time::{timeout, Duration};

    const REPOS_PATH: &str = "/users/octocat/repos?sort=stars&per_page=6";

    const USER_BODY: &str = r#"{
        "login": "octocat",
        "name": "The Octocat",
        "avatar_url": "https://avatars.example/octocat",
        "html_url": "https://github.com/octocat",
        "bio": null,
        "location": "San Francisco",
        "company": null,
        "blog": "",
        "twitter_username": null,
        "public_repos": 8,
        "followers": 12345,
        "following": 9
    }"#;

    const REPOS_BODY: &str = r#"[
        {"name": "Spoon-Knife", "html_url": "https://github.com/octocat/Spoon-Knife",
         "description": null, "language": "HTML", "stargazers_count": 12000, "forks_count": 140000},
        {"name": "Hello-World", "html_url": "https://github.com/octocat/Hello-World",
         "description": "My first repository", "language": null, "stargazers_count": 2500, "forks_count": 2000}
    ]"#;

    async fn serve(
        routes: Vec<(&'static str, u16, &'static str)>,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        serve_with(routes, None).await
    }

    /// Serve canned responses keyed by request target and record every
    /// target requested. Status 0 hangs up without answering. With a
    /// barrier, no request is answered until all its parties have arrived.
    async fn serve_with(
        routes: Vec<(&'static str, u16, &'static str)>,
        barrier: Option<Arc<Barrier>>,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let seen = seen_clone.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let target = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("")
                        .to_string();
                    seen.lock().await.push(target.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|(path, _, _)| *path == target)
                        .map(|(_, status, body)| (*status, *body))
                        .unwrap_or((404, r#"{"message":"Not Found"}"#));

                    if let Some(barrier) = barrier {
                        barrier.wait().await;
                    }
                    if status == 0 {
                        let _ = stream.shutdown().await;
                        return;
                    }
                    let response = format!(
                        "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), seen)
    }

    #[test]
    fn builds_documented_endpoints() {
        let fetcher = GitHubFetcher::new().unwrap();
        assert_eq!(
            fetcher.user_url("octocat").as_str(),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(
            fetcher.repos_url("octocat").as_str(),
            "https://api.github.com/users/octocat/repos?sort=stars&per_page=6"
        );
    }

    #[test]
    fn login_stays_one_path_segment() {
        let fetcher = GitHubFetcher::new().unwrap();
        assert_eq!(
            fetcher.user_url("a b/c").as_str(),
            "https://api.github.com/users/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn fetches_user_and_repos() {
        let (base, seen) = serve(vec![
            ("/users/octocat", 200, USER_BODY),
            (REPOS_PATH, 200, REPOS_BODY),
        ])
        .await;
        let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

        let fetched = fetcher.fetch("octocat").await.unwrap();

        assert_eq!(fetched.user.login, "octocat");
        let names: Vec<_> = fetched.repos.repos().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Spoon-Knife", "Hello-World"]);

        let mut seen = seen.lock().await.clone();
        seen.sort();
        assert_eq!(
            seen,
            ["/users/octocat", "/users/octocat/repos?sort=stars&per_page=6"]
        );
    }

    #[tokio::test]
    async fn requests_are_in_flight_together() {
        // Neither response is sent until both requests have arrived, so a
        // one-after-the-other fetch would stall here.
        let (base, _) = serve_with(
            vec![("/users/octocat", 200, USER_BODY), (REPOS_PATH, 200, REPOS_BODY)],
            Some(Arc::new(Barrier::new(2))),
        )
        .await;
        let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

        let fetched = timeout(Duration::from_secs(10), fetcher.fetch("octocat"))
            .await
            .expect("both requests should be pending at once")
            .unwrap();
        assert_eq!(fetched.repos.repos().len(), 2);
    }

    #[tokio::test]
    async fn missing_user_is_not_found_whatever_the_repos_say() {
        let repo_answers = [
            (200, REPOS_BODY),
            (500, r#"{"message":"boom"}"#),
            (200, r#"{"message":"not a list"}"#),
        ];

        for (status, body) in repo_answers {
            let (base, _) = serve(vec![(
                "/users/ghost/repos?sort=stars&per_page=6",
                status,
                body,
            )])
            .await;
            let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

            let err = fetcher.fetch("ghost").await.unwrap_err();
            assert!(
                matches!(
                    err,
                    LookupError::NotFound { ref login, status } if login == "ghost" && status.as_u16() == 404
                ),
                "repos answered {status}: got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn dropped_repo_request_is_transport_error_even_for_missing_user() {
        let (base, _) = serve(vec![("/users/ghost/repos?sort=stars&per_page=6", 0, "")]).await;
        let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

        let err = fetcher.fetch("ghost").await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn failed_repo_request_degrades_to_malformed() {
        let (base, _) = serve(vec![
            ("/users/octocat", 200, USER_BODY),
            ("/users/octocat/repos?sort=stars&per_page=6", 500, r#"{"message":"boom"}"#),
        ])
        .await;
        let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

        let fetched = fetcher.fetch("octocat").await.unwrap();
        assert_eq!(fetched.repos, RepoPayload::Malformed);
    }

    #[tokio::test]
    async fn undecodable_user_is_decode_error() {
        let (base, _) = serve(vec![
            ("/users/octocat", 200, r#"{"login": 5}"#),
            ("/users/octocat/repos?sort=stars&per_page=6", 200, "[]"),
        ])
        .await;
        let fetcher = GitHubFetcher::with_base_url(&base).unwrap();

        let err = fetcher.fetch("octocat").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = GitHubFetcher::with_base_url(&format!("http://{addr}")).unwrap();

        let err = fetcher.fetch("octocat").await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
