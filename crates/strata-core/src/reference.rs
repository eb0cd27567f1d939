//! Resolution modes for reference collections.

use std::fmt;

use serde::Deserialize;

/// How the elements of a reference collection identify their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Elements carry the identifier of the target instance.
    Identifier,
    /// Elements carry the qualified name of the target instance.
    QualifiedName,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Identifier => f.write_str("identifier"),
            ReferenceKind::QualifiedName => f.write_str("qualified-name"),
        }
    }
}
