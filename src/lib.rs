//! # GitHub Profile Lookup
//!
//! A small client for GitHub's public REST API: give it a login and it
//! fetches the user's profile and their six most-starred repositories in
//! parallel, then renders both as a profile card and a repository grid.
//!
//! ## Main Components
//!
//! - [`read_query`]: turns raw search-box text into a lookup key
//! - [`GitHubFetcher`]: the HTTP [`ProfileSource`]
//! - [`ViewController`]: drives the loading / result / error states of a [`Page`]
//! - [`TerminalSurface`] and [`HtmlSurface`]: where pages are drawn
//! - [`Args`]: command line arguments for the bundled binary
//!
//! ## Example
//!
//! ```no_run
//! use github_profile_lookup_lib::{GitHubFetcher, TerminalSurface, ViewController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let controller = ViewController::new(GitHubFetcher::new()?, TerminalSurface::stdout(true));
//!
//!     controller.search("octocat").await?;
//!
//!     controller.shutdown();
//!     Ok(())
//! }
//! ```

mod args;
mod controller;
mod error;
mod fetcher;
mod format;
mod input;
mod models;
mod page;
mod surface;
mod view;

pub use crate::args::Args;
pub use crate::controller::{SearchOutcome, ViewController};
pub use crate::error::{LookupError, SurfaceError};
pub use crate::fetcher::{FetchedProfile, GitHubFetcher, ProfileSource, API_BASE};
pub use crate::format::{format_count, language_color, DEFAULT_LANGUAGE_COLOR, LANGUAGE_COLORS};
pub use crate::input::read_query;
pub use crate::models::{RepoPayload, RepositorySummary, UserProfile, REPO_PAGE_SIZE};
pub use crate::page::{Page, Panel, ERROR_MESSAGE, LOADING_LABEL, SEARCH_LABEL};
pub use crate::surface::{render_html, render_text, HtmlSurface, Surface, TerminalSurface};
pub use crate::view::{
    LanguageBadge, MetaItem, MetaKind, ProfileStats, ProfileView, RepoCard, RepoGrid,
    NO_DESCRIPTION,
};
