//! Pure data structures for search outcomes.
//!
//! These types carry what the presentation layer needs to render a search: the
//! matching users in collection order, the term that produced them, and a generation
//! number used to discard results that arrive out of order.
//!
//! # Type Hierarchy
//!
//! ```text
//! SearchOutcome
//! ├── Results(SearchResults)
//! │   ├── generation: u64
//! │   ├── term: String
//! │   └── users: Vec<User>
//! ├── Loading
//! └── LoadFailed
//! ```

use crate::user::User;

/// Shown when a search completes with no matching users.
pub const NO_RESULTS_MESSAGE: &str = "No users found matching your search. Try a different term.";

/// Shown in place of results when the user collection could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading users. Please try again later.";

/// Users matching one settled search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Monotonically increasing per pipeline; later searches have larger values.
    pub generation: u64,

    /// The term after trimming. Empty means the full collection was returned.
    pub term: String,

    /// Matching users in the order of the original collection.
    pub users: Vec<User>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Whether a non-empty term narrowed the collection.
    pub fn is_filtered(&self) -> bool {
        !self.term.is_empty()
    }

    /// The "no results" message when nothing matched. Empty results are a normal
    /// outcome, not an error.
    pub fn message(&self) -> Option<&'static str> {
        if self.users.is_empty() {
            Some(NO_RESULTS_MESSAGE)
        } else {
            None
        }
    }
}

/// Result of handing a search term to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The directory is loaded and the term was evaluated.
    Results(SearchResults),

    /// The directory has not finished loading; the search had no effect.
    Loading,

    /// The directory failed to load; the search had no effect.
    LoadFailed,
}

impl SearchOutcome {
    pub fn results(&self) -> Option<&SearchResults> {
        match self {
            SearchOutcome::Results(results) => Some(results),
            SearchOutcome::Loading | SearchOutcome::LoadFailed => None,
        }
    }

    pub fn into_results(self) -> Option<SearchResults> {
        match self {
            SearchOutcome::Results(results) => Some(results),
            SearchOutcome::Loading | SearchOutcome::LoadFailed => None,
        }
    }

    /// User-readable status line, if the outcome needs one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::Results(results) => results.message(),
            SearchOutcome::Loading => None,
            SearchOutcome::LoadFailed => Some(LOAD_ERROR_MESSAGE),
        }
    }
}

/// Holds the newest results seen so far.
///
/// If searches ever complete out of order, an older generation arriving after a newer
/// one is rejected, so what is displayed always reflects the last settled term.
#[derive(Debug, Default)]
pub struct LatestResults {
    latest: Option<SearchResults>,
}

impl LatestResults {
    /// Offers results to the slot.
    ///
    /// # Returns
    ///
    /// `true` if `results` replaced the held value, `false` if it was stale and dropped.
    pub fn offer(&mut self, results: SearchResults) -> bool {
        match &self.latest {
            Some(current) if current.generation >= results.generation => false,
            _ => {
                self.latest = Some(results);
                true
            }
        }
    }

    pub fn current(&self) -> Option<&SearchResults> {
        self.latest.as_ref()
    }
}
