use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{LookupError, SurfaceError};
use crate::fetcher::ProfileSource;
use crate::input::read_query;
use crate::page::Page;
use crate::surface::Surface;
use crate::view::RepoGrid;

/// What one call to [`ViewController::search`] did.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Blank input; nothing was requested or shown.
    Ignored,
    /// Profile shown, along with `repos` repository cards.
    Rendered { login: String, repos: usize },
    /// The error panel is shown.
    Failed(LookupError),
    /// A newer search was issued while this one was in flight; its result
    /// was dropped without touching the page.
    Superseded,
}

struct ViewState<S> {
    page: Page,
    surface: S,
}

impl<S: Surface> ViewState<S> {
    fn refresh(&mut self) -> Result<(), SurfaceError> {
        self.surface.refresh(&self.page)
    }
}

/// Runs searches against a [`ProfileSource`] and keeps a [`Surface`] in
/// step with the resulting page.
///
/// Searches may overlap. Each one takes a generation number when it
/// starts, and only the latest generation is allowed to apply its result.
pub struct ViewController<F, S> {
    source: F,
    state: Mutex<ViewState<S>>,
    generation: AtomicU64,
}

impl<F: ProfileSource, S: Surface> ViewController<F, S> {
    pub fn new(source: F, surface: S) -> Self {
        ViewController {
            source,
            state: Mutex::new(ViewState {
                page: Page::default(),
                surface,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Look up whatever is in `raw` and render the outcome.
    ///
    /// The loading indicator is cleared whichever way the lookup goes.
    /// Only a failure of the surface to draw the settled page is returned
    /// as an error.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome, SurfaceError> {
        let Some(login) = read_query(raw) else {
            debug!("Ignoring blank query");
            return Ok(SearchOutcome::Ignored);
        };

        // Claim a generation and switch to the loading state
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.page.begin_loading();
            if let Err(e) = state.refresh() {
                error!("Failed to show loading state: {}", e);
            }
        }

        debug!("Looking up '{}' (generation {})", login, generation);
        let result = self.source.fetch(login).await;

        // Drop the result if a newer search has started since
        let mut state = self.state.lock().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            warn!(
                "Dropping result for '{}': generation {} superseded by {}",
                login, generation, latest
            );
            return Ok(SearchOutcome::Superseded);
        }

        // Show the profile and grid, or the error panel
        let outcome = match result {
            Ok(fetched) => {
                let grid = RepoGrid::from_repos(fetched.repos.repos(), &fetched.user.avatar_url);
                let repos = grid.count();
                state.page.show_result(&fetched.user, grid);
                info!("Rendered '{}' with {} repositories", fetched.user.login, repos);
                SearchOutcome::Rendered {
                    login: fetched.user.login,
                    repos,
                }
            }
            Err(e) => {
                warn!("Lookup for '{}' failed: {}", login, e);
                state.page.show_error();
                SearchOutcome::Failed(e)
            }
        };

        // Always clear the loader and restore the trigger label
        state.page.finish_loading();
        state.refresh()?;
        Ok(outcome)
    }

    /// Snapshot of the current page.
    pub async fn page(&self) -> Page {
        self.state.lock().await.page.clone()
    }

    /// Detach the surface and hand it back.
    pub fn shutdown(self) -> S {
        let mut state = self.state.into_inner();
        state.surface.detach();
        state.surface
    }
}
