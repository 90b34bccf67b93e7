//! Strongly-typed identifiers for domain entities.
//!
//! Generated identifiers follow the `<prefix>_<suffix>` shape, where the suffix is
//! eight lowercase base-36 characters.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet for generated identifier suffixes.
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix of a generated identifier.
pub const ID_SUFFIX_LEN: usize = 8;

/// Build a fresh `<prefix>_<8 base-36 chars>` identifier.
#[must_use]
pub fn prefixed_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{prefix}_{suffix}")
}

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
    ($name:ident, $prefix:literal, $doc:expr) => {
        define_id!($name, $doc);

        impl $name {
            /// Prefix used for generated identifiers of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh identifier carrying this kind's prefix.
            #[must_use]
            pub fn generate() -> Self {
                Self(prefixed_id(Self::PREFIX))
            }
        }
    };
}

define_id!(UserId, "Identifier of the human who owns an account.");
define_id!(
    AccountId,
    "acc_binance",
    "Identifier of a (mock) connected exchange account."
);
define_id!(SuggestionId, "sug", "Unique identifier for a trade suggestion.");
define_id!(
    TaskId,
    "task",
    "Unique identifier for a trade decision task or a delivery task."
);
define_id!(OrderId, "order", "Identifier of a mock exchange order.");
define_id!(
    OpportunityId,
    "opp",
    "Identifier of a trading opportunity queued for a human decision."
);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shape(id: &str, prefix: &str) {
        let suffix = id
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn prefixed_id_shape() {
        assert_shape(&prefixed_id("sug"), "sug");
    }

    #[test]
    fn generated_ids_carry_prefix() {
        assert_shape(AccountId::generate().as_str(), "acc_binance");
        assert_shape(SuggestionId::generate().as_str(), "sug");
        assert_shape(TaskId::generate().as_str(), "task");
        assert_shape(OrderId::generate().as_str(), "order");
        assert_shape(OpportunityId::generate().as_str(), "opp");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TaskId::generate(), TaskId::generate());
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn task_id_new_and_display() {
        let id = TaskId::new("task_abc12345");
        assert_eq!(id.as_str(), "task_abc12345");
        assert_eq!(format!("{id}"), "task_abc12345");
    }

    #[test]
    fn user_id_from_string() {
        let id: UserId = "alice".into();
        assert_eq!(id.as_str(), "alice");

        let id: UserId = String::from("bob").into();
        assert_eq!(id.into_inner(), "bob");
    }

    #[test]
    fn serde_is_transparent() {
        let id = SuggestionId::new("sug_00000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"sug_00000000\"");

        let parsed: SuggestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
