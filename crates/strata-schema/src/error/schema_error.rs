//! The [`SchemaError`] type raised during metamodel assembly.

use std::fmt;

use thiserror::Error;

use strata_core::{identifier::Id, reference::ReferenceKind};

use crate::error::ErrorCode;

/// The role in which an owning type names another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeUsage {
    /// The element type of a child-element collection.
    ChildElement,
    /// The target type of a reference collection.
    ReferenceTarget,
    /// The base type named by `extends_type`.
    BaseType,
}

impl fmt::Display for TypeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeUsage::ChildElement => f.write_str("child element type"),
            TypeUsage::ReferenceTarget => f.write_str("reference target type"),
            TypeUsage::BaseType => f.write_str("base type"),
        }
    }
}

/// Errors raised while assembling a metamodel.
///
/// Every variant names the owning type, and the element or target type where
/// one is involved, so a failure can be diagnosed from the message alone. All
/// of them are fatal to the assembly in progress.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A second reference was attached to a collection.
    #[error(
        "collection of `{element}` in `{owner}` cannot have more than one reference \
         (already references by {existing})"
    )]
    DuplicateReference {
        owner: Id,
        element: Id,
        existing: ReferenceKind,
    },

    /// The same element type was declared twice.
    #[error("type `{id}` is declared more than once")]
    DuplicateType { id: Id },

    /// A deferred operation named a type missing from the registry.
    #[error("`{owner}` declares undefined {usage} `{missing}`")]
    UndeclaredType {
        owner: Id,
        missing: Id,
        usage: TypeUsage,
    },

    /// A collection's lower bound exceeds its upper bound.
    #[error(
        "collection of `{element}` in `{owner}` has min occurs greater than max occurs ({min} > {max})"
    )]
    BoundViolation {
        owner: Id,
        element: Id,
        min: usize,
        max: usize,
    },

    /// A mutation was requested on an immutable collection.
    #[error("collection of `{element}` in `{owner}` is immutable")]
    ImmutableCollection { owner: Id, element: Id },
}

impl SchemaError {
    /// Returns the [`ErrorCode`] of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaError::DuplicateReference { .. } => ErrorCode::E101,
            SchemaError::DuplicateType { .. } => ErrorCode::E102,
            SchemaError::UndeclaredType { .. } => ErrorCode::E201,
            SchemaError::BoundViolation { .. } => ErrorCode::E301,
            SchemaError::ImmutableCollection { .. } => ErrorCode::E302,
        }
    }

    /// Returns the type whose declaration caused the error.
    pub fn owner(&self) -> Id {
        match self {
            SchemaError::DuplicateType { id } => *id,
            SchemaError::DuplicateReference { owner, .. }
            | SchemaError::UndeclaredType { owner, .. }
            | SchemaError::BoundViolation { owner, .. }
            | SchemaError::ImmutableCollection { owner, .. } => *owner,
        }
    }

    /// Returns a suggestion for fixing the error.
    pub fn help(&self) -> String {
        match self {
            SchemaError::DuplicateReference { .. } => {
                "declare a single identifier or qualified-name reference per collection".to_string()
            }
            SchemaError::DuplicateType { .. } => {
                "remove the duplicate declaration or use a different type name".to_string()
            }
            SchemaError::UndeclaredType { missing, .. } => {
                format!("declare type `{missing}` in the same model")
            }
            SchemaError::BoundViolation { min, max, .. } => {
                format!("lower min occurs to at most {max} or raise max occurs to at least {min}")
            }
            SchemaError::ImmutableCollection { .. } => {
                "the collection was declared immutable; its contents cannot change".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_reference_message() {
        let err = SchemaError::DuplicateReference {
            owner: Id::new("Parent"),
            element: Id::new("Child"),
            existing: ReferenceKind::Identifier,
        };

        assert_eq!(err.code(), ErrorCode::E101);
        assert!(err.to_string().contains("cannot have more than one reference"));
        assert!(err.to_string().contains("`Parent`"));
        assert!(err.to_string().contains("`Child`"));
    }

    #[test]
    fn test_undeclared_type_message() {
        let err = SchemaError::UndeclaredType {
            owner: Id::new("Process"),
            missing: Id::new("Lane"),
            usage: TypeUsage::ReferenceTarget,
        };

        assert_eq!(
            err.to_string(),
            "`Process` declares undefined reference target type `Lane`"
        );
        assert_eq!(err.owner(), Id::new("Process"));
        assert!(err.help().contains("`Lane`"));
    }

    #[test]
    fn test_bound_violation_cites_both_bounds() {
        let err = SchemaError::BoundViolation {
            owner: Id::new("Parent"),
            element: Id::new("Child"),
            min: 5,
            max: 2,
        };

        assert_eq!(err.code(), ErrorCode::E301);
        assert!(err.to_string().contains("(5 > 2)"));
    }

    #[test]
    fn test_duplicate_type_owner() {
        let err = SchemaError::DuplicateType {
            id: Id::new("Task"),
        };
        assert_eq!(err.owner(), Id::new("Task"));
        assert_eq!(err.code(), ErrorCode::E102);
    }
}
