//! Trie node for the prefix index.
//!
//! Each node stands for one character position in one or more indexed tokens. Every
//! node carries the pre-aggregated set of users whose tokens pass through it, so a
//! prefix lookup never has to descend below the node the prefix ends on.

use hashbrown::{HashMap, HashSet};
use crate::user::UserId;

/// One character position in the prefix trie.
///
/// # Invariant
///
/// For a node reached by path `P`, `user_ids` holds exactly the users that inserted a
/// token `T` with `P` as a prefix of `T`. The root (empty path) never receives ids.
///
/// The tree is strict: every node has a single owner (its parent, or the index for the
/// root) and there are no back-references.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub(crate) children: HashMap<char, TrieNode>,
    pub(crate) is_end_of_token: bool,
    pub(crate) user_ids: HashSet<UserId>,
}

impl TrieNode {
    /// Inserts an already-canonicalized token for `user_id`.
    ///
    /// Walks (creating where needed) one child per character, adding `user_id` to
    /// every node visited below `self`, and marks the last node as end-of-token.
    /// Inserting the same pair twice leaves the tree unchanged. Empty tokens are
    /// ignored so the root is never marked.
    pub(crate) fn insert(&mut self, token: &str, user_id: UserId) {
        if token.is_empty() {
            return;
        }

        let mut current = self;
        for ch in token.chars() {
            current = current.children.entry(ch).or_default();
            current.user_ids.insert(user_id);
        }
        current.is_end_of_token = true;
    }

    /// Follows `path` one character at a time, stopping at the first missing child.
    #[inline]
    pub(crate) fn descend(&self, path: &str) -> Option<&TrieNode> {
        let mut current = self;
        for ch in path.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(ch, node)| (*ch, node))
    }

    /// Whether some indexed token ends exactly at this node.
    pub fn is_end_of_token(&self) -> bool {
        self.is_end_of_token
    }

    pub fn user_ids(&self) -> &HashSet<UserId> {
        &self.user_ids
    }

    /// Counts this node and all of its descendants.
    ///
    /// Uses an explicit stack rather than recursion; token depth is unbounded in
    /// principle.
    pub(crate) fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    /// Counts distinct tokens, i.e. nodes marked end-of-token.
    pub(crate) fn count_tokens(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode> = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_end_of_token {
                count += 1;
            }
            stack.extend(node.children.values());
        }
        count
    }
}
