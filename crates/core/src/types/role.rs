//! Account roles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role attached to an account by the backend.
///
/// The backend owns the set of roles; anything this client does not know
/// about is preserved in [`Role::Other`] rather than failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular attendee account.
    #[default]
    User,
    /// Account that publishes events.
    Organizer,
    /// Backend administrator.
    Admin,
    /// A role string this client does not recognize.
    Other(String),
}

impl Role {
    /// Wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Organizer => "organizer",
            Self::Admin => "admin",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "organizer" => Self::Organizer,
            "admin" => Self::Admin,
            _ => Self::Other(s.trim().to_owned()),
        })
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(role) = s.parse::<Self>();
        Ok(role)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_roundtrip_through_str() {
        for role in [Role::User, Role::Organizer, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Other("moderator".to_owned()));
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"moderator\"");
    }
}
