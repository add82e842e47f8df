//! Usersearch - Prefix Search over a User Directory
//!
//! A small library for loading a user directory once and answering "starts with"
//! searches over names, usernames and email addresses while the user is still typing.
//!
//! # Overview
//!
//! This library provides:
//! - **Prefix Index**: A trie built once per loaded collection whose nodes carry
//!   pre-aggregated user sets, so lookups cost O(prefix length)
//! - **Order-Preserving Filter**: Results always come back in the collection's own order
//! - **Debounced Queries**: Keystrokes are coalesced; only the value the user settles on
//!   is searched, and an explicit clear resets immediately
//! - **Any Source**: Collections load from HTTP endpoints, S3, local files or memory
//!
//! # Quick Start
//!
//! ```no_run
//! use usersearch::{load_directory, config::DEFAULT_SOURCE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let directory = load_directory(DEFAULT_SOURCE).await?;
//!
//!     for user in directory.filter("bre") {
//!         println!("{}", user);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Performance
//!
//! - **Index building**: one pass over every token of every user
//! - **Search time**: O(length of prefix) for the lookup, plus one pass over the
//!   collection to keep results in order
//! - **Memory**: one trie node per distinct token prefix
pub mod config;
pub mod error;
pub mod index_structure;
pub mod searching;
#[cfg(test)]
pub mod unit_tests;
pub mod user;
pub mod user_tokens;
pub mod utils;

use tracing::info;
use crate::error::LoadError;
use crate::index_structure::prefix_index::PrefixIndex;
use crate::searching::filter::filter_users;
use crate::user::User;
use crate::utils::directory_source::fetch_users;

// ============================================================================
// Public Types
// ============================================================================

/// A loaded user collection together with the index built over it.
///
/// The two are created together and never change independently: reloading the
/// collection means building a fresh `UserDirectory`.
///
/// # Examples
///
/// ```
/// use usersearch::UserDirectory;
/// use usersearch::user::User;
///
/// let directory = UserDirectory::new(vec![
///     User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
///     User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
/// ]);
///
/// let hits = directory.filter("gra");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Leanne Graham");
/// assert_eq!(directory.filter("").len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    index: PrefixIndex,
}

impl UserDirectory {
    /// Takes ownership of the collection and builds its index.
    pub fn new(users: Vec<User>) -> Self {
        let index = PrefixIndex::build(&users);
        Self { users, index }
    }

    /// The unfiltered collection, in original order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users matching `raw_term`; see [`filter_users`].
    pub fn filter(&self, raw_term: &str) -> Vec<&User> {
        filter_users(&self.users, &self.index, raw_term)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Fetches the user collection from `location` and builds its index.
///
/// The index is only built after the fetch succeeds; on failure nothing is built and
/// the error says why.
///
/// # Arguments
///
/// * `location` - HTTP(S) URL, `s3://` URI, `memory://` name or local path of a JSON
///   array of users
///
/// # Errors
///
/// Returns [`LoadError`] if the source is invalid, cannot be fetched (including
/// non-success HTTP statuses), or does not parse as a user array.
///
/// # Examples
///
/// ```no_run
/// # use usersearch::load_directory;
/// # async fn example() -> Result<(), usersearch::error::LoadError> {
/// let directory = load_directory("https://jsonplaceholder.typicode.com/users").await?;
/// println!("Loaded {} users", directory.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_directory(location: &str) -> Result<UserDirectory, LoadError> {
    let users = fetch_users(location).await?;
    let directory = UserDirectory::new(users);
    info!(location, users = directory.len(), stats = %directory.index().stats(), "user directory ready");
    Ok(directory)
}

/// Loads a directory and runs one search against it.
///
/// This is a convenience for single lookups. For repeated searches, keep the
/// [`UserDirectory`] from [`load_directory`] instead of reloading every time.
///
/// # Examples
///
/// ```no_run
/// # use usersearch::search;
/// # async fn example() -> Result<(), usersearch::error::LoadError> {
/// let users = search("./users.json", "bret").await?;
/// for user in &users {
///     println!("{}", user);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(location: &str, raw_term: &str) -> Result<Vec<User>, LoadError> {
    let directory = load_directory(location).await?;
    Ok(directory.filter(raw_term).into_iter().cloned().collect())
}
