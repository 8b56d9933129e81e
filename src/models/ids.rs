//! Strongly-typed ID wrappers
//!
//! Identifiers are assigned by the storage layer when a record is created and
//! are otherwise opaque.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short display form, also accepted by lookups
            pub fn short(&self) -> String {
                self.to_string()
            }

            /// Whether `s` names this ID, either in full or by its short form
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return uuid == self.0;
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                s.len() >= 4 && self.0.simple().to_string().starts_with(&s.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = TransactionId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, TransactionId::new());
    }

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TransactionId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert_eq!(id.to_string(), "txn-550e8400");
    }

    #[test]
    fn test_id_matches_short_form() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches("txn-550e8400"));
        assert!(id.matches("550e84"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("txn-12345678"));
        assert!(!id.matches("55"));
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
