use smallvec::SmallVec;
use std::borrow::Cow;
use crate::user::User;

/// Which user field a token was drawn from.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum TokenSource {
    Name,
    Username,
    EmailLocalPart,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TokenSource::Name => "name",
            TokenSource::Username => "username",
            TokenSource::EmailLocalPart => "email",
        };
        write!(f, "{}", label)
    }
}

/// A token borrowed from a user record, tagged with the field it came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UserToken<'a> {
    pub source: TokenSource,
    pub text: &'a str,
}

/// Returns the part of an email address before its first `@`.
///
/// An address without `@` is returned whole, so a malformed email still contributes
/// a searchable token rather than nothing.
///
/// # Examples
///
/// ```
/// # use usersearch::user_tokens::email_local_part;
/// assert_eq!(email_local_part("Sincere@april.biz"), "Sincere");
/// assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
/// assert_eq!(email_local_part("@leading"), "");
/// ```
#[inline]
pub fn email_local_part(email: &str) -> &str {
    match email.find('@') {
        Some(pos) => &email[..pos],
        None => email,
    }
}

/// Extracts every indexed token of a user in insertion order.
///
/// Order is: each whitespace-separated word of the name, then the username, then the
/// email local-part. Empty tokens are dropped. Duplicates are kept since the index
/// absorbs them with set semantics.
///
/// Most users have two name words, a username and an email, so the result stays on
/// the stack.
///
/// # Arguments
///
/// * `user` - The record to tokenize
///
/// # Returns
///
/// A `SmallVec` of tokens borrowing from `user`. Tokens are not lower-cased here;
/// canonicalization happens on insertion and lookup.
///
/// # Examples
///
/// ```
/// # use usersearch::user::User;
/// # use usersearch::user_tokens::extract_tokens;
/// let user = User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz");
/// let tokens: Vec<&str> = extract_tokens(&user).iter().map(|t| t.text).collect();
/// assert_eq!(tokens, vec!["Leanne", "Graham", "Bret", "Sincere"]);
/// ```
pub fn extract_tokens(user: &User) -> SmallVec<[UserToken<'_>; 4]> {
    let mut tokens: SmallVec<[UserToken<'_>; 4]> = SmallVec::new();

    for word in user.name.split_whitespace() {
        tokens.push(UserToken { source: TokenSource::Name, text: word });
    }

    if !user.username.is_empty() {
        tokens.push(UserToken { source: TokenSource::Username, text: &user.username });
    }

    let local_part = email_local_part(&user.email);
    if !local_part.is_empty() {
        tokens.push(UserToken { source: TokenSource::EmailLocalPart, text: local_part });
    }

    tokens
}

/// Case-folds text for indexing and lookup.
///
/// Each character is folded on its own: upper-cased, then lower-cased. Folding never
/// looks at neighbouring characters, so the fold of a prefix is always a prefix of the
/// fold of the whole token, and `ΚΟΣ` finds `ΚΟΣΜΟΣ` even though the final sigma has
/// its own lowercase form. The round trip through upper case also lets `STRASSE` find
/// `Straße`. ASCII text takes a fast path; text the fold leaves unchanged is borrowed.
///
/// # Examples
///
/// ```
/// # use usersearch::user_tokens::canonicalize;
/// assert_eq!(canonicalize("Bret"), "bret");
/// assert_eq!(canonicalize("ÉLODIE"), "élodie");
/// assert_eq!(canonicalize("ΚΟΣΜΟΣ"), "κοσμοσ");
/// assert_eq!(canonicalize("Straße"), canonicalize("STRASSE"));
/// ```
#[inline]
pub fn canonicalize(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return if text.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(text.to_ascii_lowercase())
        } else {
            Cow::Borrowed(text)
        };
    }

    if text.chars().all(|c| fold_char(c).eq([c])) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().flat_map(fold_char).collect())
    }
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_uppercase().flat_map(char::to_lowercase)
}

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "user_tokens/tests/mod.rs"]
mod tests;
