//! Order-preserving filter of a user collection by search term.

use crate::index_structure::prefix_index::PrefixIndex;
use crate::user::User;

/// Filters `users` down to those matching `raw_term` through `index`.
///
/// A term that is empty after trimming means "no filter": every user is returned in
/// the original order. Otherwise the term is looked up as a prefix and the matching
/// users are returned as a subsequence of `users`, keeping their relative order. The
/// display order is always collection order, never relevance order.
///
/// # Arguments
///
/// * `users` - The original, unfiltered collection the index was built from
/// * `index` - Index built over `users`
/// * `raw_term` - Search text exactly as typed; surrounding whitespace is ignored
///
/// # Returns
///
/// References into `users`. Neither `users` nor `index` is modified.
///
/// # Examples
///
/// ```
/// # use usersearch::index_structure::prefix_index::PrefixIndex;
/// # use usersearch::searching::filter::filter_users;
/// # use usersearch::user::User;
/// let users = vec![
///     User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
///     User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
/// ];
/// let index = PrefixIndex::build(&users);
///
/// assert_eq!(filter_users(&users, &index, "").len(), 2);
/// let hits = filter_users(&users, &index, " ant ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 2);
/// ```
pub fn filter_users<'u>(users: &'u [User], index: &PrefixIndex, raw_term: &str) -> Vec<&'u User> {
    let term = raw_term.trim();
    if term.is_empty() {
        return users.iter().collect();
    }

    let matching_ids = index.lookup(term);
    if matching_ids.is_empty() {
        return Vec::new();
    }

    users
        .iter()
        .filter(|user| matching_ids.contains(user.id))
        .collect()
}
