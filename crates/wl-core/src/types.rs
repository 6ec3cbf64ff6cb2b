//! Identifier newtypes with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty or only whitespace.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The provided value had leading or trailing whitespace.
    #[error("{field} cannot have surrounding whitespace: {value:?}")]
    Untrimmed { field: &'static str, value: String },
}

/// Generates a validated string ID newtype.
///
/// IDs are non-empty, carry no surrounding whitespace, and order
/// lexicographically so they can key sorted maps.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if id.trim().len() != id.len() {
                    return Err(ValidationError::Untrimmed {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated work-time event identifier.
    ///
    /// Uniqueness is enforced by the event log, not here.
    EventId, "event ID"
);

define_string_id!(
    /// A validated team member identifier.
    UserId, "user ID"
);

define_string_id!(
    /// A validated project identifier.
    ProjectId, "project ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_empty_and_blank() {
        assert_eq!(
            UserId::new("").unwrap_err(),
            ValidationError::Empty { field: "user ID" }
        );
        assert!(ProjectId::new("   ").is_err());
        assert!(EventId::new("evt-1").is_ok());
    }

    #[test]
    fn ids_reject_surrounding_whitespace() {
        let err = UserId::new(" ana ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "user ID cannot have surrounding whitespace: \" ana \""
        );
    }

    #[test]
    fn user_id_serde_roundtrip() {
        let id = UserId::new("user-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"user-42\"");
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn project_id_serde_rejects_empty() {
        let result: Result<ProjectId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn ids_parse_from_str() {
        let id: ProjectId = "website-redesign".parse().unwrap();
        assert_eq!(id.as_str(), "website-redesign");
        let s: &str = id.as_ref();
        assert_eq!(s, "website-redesign");
    }

    #[test]
    fn user_ids_order_lexicographically() {
        let mut ids = vec![
            UserId::new("carol").unwrap(),
            UserId::new("alice").unwrap(),
            UserId::new("bob").unwrap(),
        ];
        ids.sort();
        let names: Vec<_> = ids.iter().map(UserId::as_str).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }
}
