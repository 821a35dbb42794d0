use reqwest::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a lookup produced no profile. All variants reach the user as the
/// same generic error panel.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The user record came back with a non-success status. Rate limiting
    /// lands here too.
    #[error("user '{login}' not found ({status})")]
    NotFound { login: String, status: StatusCode },

    /// A request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),

    /// The user record could not be decoded.
    #[error("could not decode user record: {0}")]
    Decode(#[source] BoxError),
}

impl LookupError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        LookupError::Transport(err.into())
    }

    pub fn decode(err: impl Into<BoxError>) -> Self {
        LookupError::Decode(err.into())
    }
}

/// A surface failed to display a page.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("failed to write page to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to terminal: {0}")]
    Terminal(#[from] std::io::Error),
}
