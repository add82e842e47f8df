//! Immutable prefix index over a user collection.
//!
//! The index is a character trie where every node stores the set of users having a
//! token with that node's path as a prefix. Building walks each token once; looking up
//! a prefix walks only the prefix, so query cost is O(prefix length) no matter how many
//! users or tokens are indexed.
//!
//! # Architecture
//!
//! ```text
//! users ──► extract_tokens ──► canonicalize ──► TrieNode::insert
//!                                                   │
//!                                             PrefixIndex (read-only)
//!                                                   │
//!                          lookup(prefix) ──► Matches (borrowed id set)
//! ```
//!
//! # Basic Usage
//!
//! ```
//! use usersearch::index_structure::prefix_index::PrefixIndex;
//! use usersearch::user::User;
//!
//! let users = vec![
//!     User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
//!     User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
//! ];
//! let index = PrefixIndex::build(&users);
//!
//! assert!(index.lookup("lean").contains(1));
//! assert!(index.lookup("ANT").contains(2));
//! assert!(index.lookup("z").is_empty());
//! ```

use hashbrown::HashSet;
use tracing::debug;
use crate::index_structure::trie_node::TrieNode;
use crate::user::{User, UserId};
use crate::user_tokens::{canonicalize, extract_tokens};

/// Summary figures collected while building, for logging and `info` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Users consumed by the builder, including users that contributed no tokens.
    pub users_indexed: usize,
    /// Token insertions performed (duplicates counted).
    pub tokens_inserted: usize,
    /// Distinct canonical tokens in the trie.
    pub distinct_tokens: usize,
    /// Trie nodes, root included.
    pub node_count: usize,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndexStats {{ users: {}, insertions: {}, distinct_tokens: {}, nodes: {} }}",
            self.users_indexed,
            self.tokens_inserted,
            self.distinct_tokens,
            self.node_count
        )
    }
}

/// Handle to a built prefix index.
///
/// There is no way to add or remove entries after [`PrefixIndex::build`] returns, and
/// lookups never mutate, so a shared `&PrefixIndex` can be queried from any number of
/// threads. A reloaded collection gets a brand new index.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    stats: IndexStats,
}

/// Users matching a prefix, borrowed straight from the trie node the prefix ends on.
#[derive(Debug, Clone, Copy)]
pub struct Matches<'a> {
    ids: Option<&'a HashSet<UserId>>,
}

impl<'a> Matches<'a> {
    #[inline]
    pub fn contains(&self, id: UserId) -> bool {
        self.ids.is_some_and(|ids| ids.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.ids.map_or(0, |ids| ids.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates matching ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + use<'a> {
        let ids = self.ids;
        ids.into_iter().flat_map(|ids| ids.iter().copied())
    }

    /// Matching ids in ascending order, handy for assertions and display.
    pub fn to_sorted_vec(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl PrefixIndex {
    /// Builds the index from the full user collection.
    ///
    /// For each user, in collection order, inserts every whitespace token of the name,
    /// the username, and the email local-part (see
    /// [`extract_tokens`](crate::user_tokens::extract_tokens)). Malformed fields do not
    /// fail the build; empty tokens are simply not inserted.
    ///
    /// # Arguments
    ///
    /// * `users` - The complete, already-fetched collection. May be empty.
    ///
    /// # Returns
    ///
    /// A read-only index. An empty collection yields an index whose root has no
    /// children, which answers every non-empty prefix with no matches.
    pub fn build(users: &[User]) -> PrefixIndex {
        let mut root = TrieNode::default();
        let mut tokens_inserted = 0;

        for user in users {
            for token in extract_tokens(user) {
                root.insert(&canonicalize(token.text), user.id);
                tokens_inserted += 1;
            }
        }

        let stats = IndexStats {
            users_indexed: users.len(),
            tokens_inserted,
            distinct_tokens: root.count_tokens(),
            node_count: root.count_nodes(),
        };
        debug!(%stats, "built prefix index");

        PrefixIndex { root, stats }
    }

    /// Looks up every user having a token that starts with `prefix`.
    ///
    /// The prefix is trimmed and lower-cased, then walked from the root. The first
    /// character with no matching child ends the walk with no matches. Otherwise the
    /// set stored on the final node is returned as-is.
    ///
    /// An empty prefix (after trimming) walks nothing and yields the root's set, which
    /// is always empty; treating an empty term as "everything" is the caller's job.
    ///
    /// # Performance
    ///
    /// O(length of prefix), independent of collection size.
    pub fn lookup(&self, prefix: &str) -> Matches<'_> {
        let canonical = canonicalize(prefix.trim());
        match self.root.descend(&canonical) {
            Some(node) => Matches { ids: Some(&node.user_ids) },
            None => Matches { ids: None },
        }
    }

    /// Whether `token` was indexed as a complete token (not merely a prefix).
    ///
    /// Lookup does not need this; it exists to inspect what the builder produced.
    pub fn contains_token(&self, token: &str) -> bool {
        let canonical = canonicalize(token.trim());
        !canonical.is_empty()
            && self.root.descend(&canonical).is_some_and(TrieNode::is_end_of_token)
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Read-only access to the trie, for debugging and inspection.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "tests/prefix_index_tests.rs"]
mod tests;
