use thiserror::Error;
use crate::searching::search_results::LOAD_ERROR_MESSAGE;

/// Failure to obtain the user collection.
///
/// Any of these leaves search disabled: no index is built and queries have no effect.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid source '{location}': {reason}")]
    InvalidSource { location: String, reason: String },

    #[error("Invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to fetch users from '{location}': {error}")]
    Fetch {
        location: String,
        #[source]
        error: object_store::Error,
    },

    #[error("Failed to parse users: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn invalid_source(location: &str, reason: impl Into<String>) -> Self {
        LoadError::InvalidSource {
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(location: &str, error: object_store::Error) -> Self {
        LoadError::Fetch {
            location: location.to_string(),
            error,
        }
    }

    /// Static message suitable for end users; details go to the log instead.
    pub fn user_message(&self) -> &'static str {
        LOAD_ERROR_MESSAGE
    }
}

/// The debounced search loop is no longer receiving input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search pipeline has shut down")]
pub struct PipelineClosed;
