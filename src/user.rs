//! User records as delivered by the upstream directory endpoint.
//!
//! Only `id`, `name`, `username` and `email` take part in indexing. Everything else is
//! carried through untouched so the presentation layer can render a full card.
//!
//! # JSON Schema
//!
//! ```text
//! User
//! ├── id: u32
//! ├── name: String
//! ├── username: String
//! ├── email: String
//! ├── address: Address
//! │   └── geo: Geo
//! ├── phone: String
//! ├── website: String
//! └── company: Company
//! ```
use serde::Deserialize;

/// Identifier of a user, unique and stable for the lifetime of a loaded collection.
pub type UserId = u32;

/// A single directory entry.
///
/// Display-only fields default when absent so a partial record still loads and
/// indexes. The indexed fields default to empty strings, which the index builder
/// skips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

/// Coordinates are kept as the strings the endpoint sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

impl std::fmt::Display for User {
    /// Formats the user as a single card line: name, handle, email and company.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (@{}) <{}>", self.name, self.username, self.email)?;
        if !self.company.name.is_empty() {
            write!(f, " - {}", self.company.name)?;
        }
        Ok(())
    }
}

impl User {
    /// Convenience constructor for a record carrying only the indexed fields.
    ///
    /// # Examples
    ///
    /// ```
    /// # use usersearch::user::User;
    /// let user = User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz");
    /// assert_eq!(user.username, "Bret");
    /// assert!(user.company.name.is_empty());
    /// ```
    pub fn new(id: UserId, name: &str, username: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// First character of the name, used as an avatar initial.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Parses a JSON array of users as returned by the directory endpoint.
///
/// # Errors
///
/// Returns the `serde_json` error when the payload is not an array of user objects
/// or a record is missing its `id`.
pub fn parse_users(payload: &[u8]) -> Result<Vec<User>, serde_json::Error> {
    serde_json::from_slice(payload)
}
