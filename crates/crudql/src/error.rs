//! Error types for document building.
//!
//! Building degrades softly by design: unresolvable field types and
//! undeclared variables are dropped, not raised. [`QueryBuildError`]
//! covers the two conditions that are fatal: runaway recursion through
//! the schema's type graph, and malformed introspection input.

use std::fmt;

/// Errors that can occur while building a GraphQL document.
#[derive(Debug)]
pub enum QueryBuildError {
    /// Field selection recursed past the configured depth limit.
    ///
    /// Raised instead of truncating silently or overflowing the stack
    /// when the schema nests object types deeper than
    /// `SelectionOptions::max_depth`.
    SchemaCycleExceeded { type_name: String, max_depth: usize },
    /// The introspection JSON could not be deserialized.
    Introspection(serde_json::Error),
}

impl fmt::Display for QueryBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaCycleExceeded {
                type_name,
                max_depth,
            } => write!(
                f,
                "Selection depth limit ({}) exceeded while expanding type '{}'",
                max_depth, type_name
            ),
            Self::Introspection(e) => write!(f, "Invalid introspection result: {}", e),
        }
    }
}

impl std::error::Error for QueryBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Introspection(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QueryBuildError {
    fn from(e: serde_json::Error) -> Self {
        Self::Introspection(e)
    }
}
