//! Account profile.

use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::types::{Role, UserId};

/// Profile returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserDocument")]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email. Kept as a plain string; the backend is the authority.
    pub email: String,
    /// Account role.
    pub role: Role,
}

/// Wire shape: the display name arrives as `name`, `username`, or both.
#[derive(Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: UserId,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    username: String,
    #[serde(default, deserialize_with = "lenient::text")]
    email: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    role: Role,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        let name = if doc.name.trim().is_empty() {
            doc.username
        } else {
            doc.name
        };
        Self {
            id: doc.id,
            name,
            email: doc.email,
            role: doc.role,
        }
    }
}

impl User {
    /// Single uppercase initial for avatars and compact listings.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map_or('U', |c| c.to_uppercase().next().unwrap_or(c))
    }
}
