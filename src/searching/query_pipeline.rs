//! Debounced search over a loaded user directory.
//!
//! This is the boundary between a free-text search field and the prefix index. Raw
//! input changes go in through a [`SearchInputSender`]; a [`QueryPipeline`] waits for each
//! term to settle, filters the directory, and publishes [`SearchResults`].
//!
//! # Architecture
//!
//! ```text
//! SearchInput::Changed ─┐
//!                       ├─► Debouncer ──► QueryPipeline::search_now ──► SearchResults
//! SearchInput::Clear ───┘   (Clear skips the wait)
//! ```
//!
//! # Lifecycle
//!
//! [`SearchState`] tracks whether the directory is loading, failed, or ready. Searching
//! in any state other than ready has no effect and reports
//! [`SearchOutcome::Loading`] or [`SearchOutcome::LoadFailed`].

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error};
use crate::error::{LoadError, PipelineClosed};
use crate::searching::debounce::{DebounceEvent, Debouncer};
use crate::searching::search_results::{LOAD_ERROR_MESSAGE, SearchOutcome, SearchResults};
use crate::{UserDirectory, load_directory};

/// Capacity of the raw input channel; keystrokes beyond this apply backpressure.
const INPUT_BUFFER: usize = 64;

/// A change to the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// The field now holds this full value (not a diff).
    Changed(String),
    /// The field was explicitly cleared; results reset without waiting.
    Clear,
}

impl From<SearchInput> for DebounceEvent<String> {
    fn from(input: SearchInput) -> Self {
        match input {
            SearchInput::Changed(text) => DebounceEvent::Update(text),
            SearchInput::Clear => DebounceEvent::Immediate(String::new()),
        }
    }
}

/// Sending half of the search field, cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchInputSender {
    tx: mpsc::Sender<DebounceEvent<String>>,
}

impl SearchInputSender {
    pub async fn send(&self, input: SearchInput) -> Result<(), PipelineClosed> {
        self.tx.send(input.into()).await.map_err(|_| PipelineClosed)
    }

    /// Reports the field's current full value.
    pub async fn change(&self, text: impl Into<String>) -> Result<(), PipelineClosed> {
        self.send(SearchInput::Changed(text.into())).await
    }

    pub async fn clear(&self) -> Result<(), PipelineClosed> {
        self.send(SearchInput::Clear).await
    }
}

/// Creates the input side of a search field and the debouncer that drains it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use usersearch::UserDirectory;
/// use usersearch::searching::query_pipeline::{QueryPipeline, search_input};
/// use usersearch::user::User;
///
/// # tokio_test::block_on(async {
/// let directory = UserDirectory::new(vec![
///     User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
///     User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
/// ]);
/// let mut pipeline = QueryPipeline::new(directory);
///
/// let (input, mut debouncer) = search_input(Duration::from_millis(5));
/// input.change("e").await.unwrap();
/// input.change("er").await.unwrap();
/// drop(input);
///
/// let (results_tx, mut results_rx) = tokio::sync::mpsc::channel(8);
/// let searches = pipeline.run(&mut debouncer, results_tx).await;
/// assert_eq!(searches, 1);
/// assert_eq!(results_rx.recv().await.unwrap().users[0].id, 2);
/// # });
/// ```
pub fn search_input(settle_period: Duration) -> (SearchInputSender, Debouncer<String>) {
    let (tx, debouncer) = Debouncer::channel(settle_period, INPUT_BUFFER);
    (SearchInputSender { tx }, debouncer)
}

/// Runs settled search terms against one loaded directory.
///
/// The pipeline owns the directory for as long as it is searchable and never modifies
/// it. Each search is stamped with a generation one higher than the last, which lets a
/// consumer holding [`LatestResults`](crate::searching::search_results::LatestResults)
/// drop anything superseded.
#[derive(Debug)]
pub struct QueryPipeline {
    directory: UserDirectory,
    generation: u64,
}

impl QueryPipeline {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory, generation: 0 }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Generation of the most recent search, `0` before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Searches immediately, bypassing any debounce.
    ///
    /// # Arguments
    ///
    /// * `raw_term` - Field value as typed; an empty or whitespace-only term returns
    ///   the whole collection
    ///
    /// # Returns
    ///
    /// Owned results, in collection order, stamped with a fresh generation.
    pub fn search_now(&mut self, raw_term: &str) -> SearchResults {
        self.generation += 1;
        let term = raw_term.trim();
        let users: Vec<_> = self.directory.filter(term).into_iter().cloned().collect();
        debug!(generation = self.generation, term, matches = users.len(), "search settled");

        SearchResults {
            generation: self.generation,
            term: term.to_string(),
            users,
        }
    }

    /// Drives the pipeline until the input closes or the results receiver goes away.
    ///
    /// Each value the debouncer settles on triggers exactly one search, whose results
    /// are sent on `results`.
    ///
    /// # Returns
    ///
    /// The number of searches performed.
    pub async fn run(
        &mut self,
        debouncer: &mut Debouncer<String>,
        results: mpsc::Sender<SearchResults>,
    ) -> usize {
        let mut searches = 0;
        while let Some(term) = debouncer.next_settled().await {
            let settled = self.search_now(&term);
            searches += 1;
            if results.send(settled).await.is_err() {
                debug!("results receiver dropped, stopping search pipeline");
                break;
            }
        }
        searches
    }
}

/// Lifecycle of the searchable directory.
#[derive(Debug, Default)]
pub enum SearchState {
    /// The collection has not arrived yet.
    #[default]
    Loading,
    /// Fetching the collection failed; search stays inert.
    Failed(LoadError),
    Ready(QueryPipeline),
}

impl SearchState {
    /// Loads the collection from `location` and builds the index on success.
    pub async fn load(location: &str) -> SearchState {
        SearchState::from_load(load_directory(location).await)
    }

    /// Turns the result of a load into a state, logging failures.
    pub fn from_load(result: Result<UserDirectory, LoadError>) -> SearchState {
        match result {
            Ok(directory) => SearchState::Ready(QueryPipeline::new(directory)),
            Err(e) => {
                error!("Error fetching users: {e}");
                SearchState::Failed(e)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SearchState::Ready(_))
    }

    pub fn pipeline_mut(&mut self) -> Option<&mut QueryPipeline> {
        match self {
            SearchState::Ready(pipeline) => Some(pipeline),
            _ => None,
        }
    }

    /// Searches if the directory is ready; otherwise does nothing.
    pub fn handle_search(&mut self, raw_term: &str) -> SearchOutcome {
        match self {
            SearchState::Ready(pipeline) => SearchOutcome::Results(pipeline.search_now(raw_term)),
            SearchState::Loading => SearchOutcome::Loading,
            SearchState::Failed(_) => SearchOutcome::LoadFailed,
        }
    }

    /// User-readable status for the failed state.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchState::Failed(_) => Some(LOAD_ERROR_MESSAGE),
            _ => None,
        }
    }
}
