use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};
use uuid::Uuid;

/// Declares a string-backed identifier newtype.
///
/// Identifiers are opaque: any string the caller supplies is accepted, and
/// `generate` produces a fresh `<prefix>-<uuid>` value for new entities.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            const PREFIX: &'static str = $prefix;

            /// Wraps an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh, unique identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4()))
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Unique identifier for a task (e.g., `task-1`)
    TaskId,
    "task"
);

define_id!(
    /// Unique identifier for a column (e.g., `col-1`)
    ColumnId,
    "col"
);

define_id!(
    /// Unique identifier for a project (e.g., `project-1`)
    ProjectId,
    "project"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id = TaskId::from("task-1");
        assert_eq!(id.as_str(), "task-1");
        assert_eq!(id, "task-1");
        assert_eq!(id.to_string(), "task-1");
    }

    #[test]
    fn test_generated_ids_are_unique_and_prefixed() {
        let a = ColumnId::generate();
        let b = ColumnId::generate();

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("col-"));
        assert!(ProjectId::generate().as_str().starts_with("project-"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProjectId::new("project-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"project-1\"");

        let parsed: ProjectId = serde_json::from_str("\"project-9\"").unwrap();
        assert_eq!(parsed.as_str(), "project-9");
    }
}
