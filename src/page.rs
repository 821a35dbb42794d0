use chrono::{DateTime, Utc};

use crate::models::UserProfile;
use crate::view::{ProfileView, RepoGrid};

/// Trigger label while idle.
pub const SEARCH_LABEL: &str = "Search →";
/// Trigger label while a lookup is in flight.
pub const LOADING_LABEL: &str = "Loading...";
/// The one message shown for every failed lookup.
pub const ERROR_MESSAGE: &str = "User not found. Check the username and try again.";

/// A panel's content and whether it is shown. Content is kept while the
/// panel is hidden and replaced wholesale on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel<T> {
    pub content: Option<T>,
    pub visible: bool,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel {
            content: None,
            visible: false,
        }
    }
}

impl<T> Panel<T> {
    /// Visible content, if any.
    pub fn shown(&self) -> Option<&T> {
        if self.visible {
            self.content.as_ref()
        } else {
            None
        }
    }
}

/// Everything a surface draws: the loading indicator, the trigger label
/// and three mutually exclusive result panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub loader_visible: bool,
    pub trigger_label: &'static str,
    pub profile: Panel<ProfileView>,
    pub repos: Panel<RepoGrid>,
    pub error_visible: bool,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            loader_visible: false,
            trigger_label: SEARCH_LABEL,
            profile: Panel::default(),
            repos: Panel::default(),
            error_visible: false,
            settled_at: None,
        }
    }
}

impl Page {
    /// Idle → Loading.
    pub fn begin_loading(&mut self) {
        self.profile.visible = false;
        self.repos.visible = false;
        self.error_visible = false;
        self.loader_visible = true;
        self.trigger_label = LOADING_LABEL;
    }

    /// Loading → Result. Profile first, then the grid; the grid panel
    /// stays hidden when there is nothing in it.
    pub fn show_result(&mut self, user: &UserProfile, grid: RepoGrid) {
        self.profile.content = Some(ProfileView::from_user(user));
        self.profile.visible = true;

        self.repos.visible = !grid.is_empty();
        self.repos.content = Some(grid);
    }

    /// Loading → Error.
    pub fn show_error(&mut self) {
        self.error_visible = true;
    }

    /// Runs after every lookup, whatever the outcome.
    pub fn finish_loading(&mut self) {
        self.loader_visible = false;
        self.trigger_label = SEARCH_LABEL;
        self.settled_at = Some(Utc::now());
    }

    pub fn is_loading(&self) -> bool {
        self.loader_visible
    }
}
