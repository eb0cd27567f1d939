//! Error codes for the Strata assembly errors.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Declaration errors
//! - `E2xx` - Resolution errors
//! - `E3xx` - Structural errors

use std::fmt;

/// Error codes for categorizing assembly errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Declaration Errors (E1xx)
    // =========================================================================
    /// Duplicate reference.
    ///
    /// A child-element collection already has a reference attached. A
    /// collection holds at most one reference, regardless of its kind.
    E101,

    /// Duplicate type declaration.
    ///
    /// An element type with this identifier has already been declared in the
    /// model.
    E102,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// Undeclared type.
    ///
    /// A child collection, reference or base type names an element type that
    /// was never declared in the model.
    E201,

    // =========================================================================
    // Structural Errors (E3xx)
    // =========================================================================
    /// Bound violation.
    ///
    /// A collection's `min_occurs` is greater than its bounded `max_occurs`.
    E301,

    /// Immutable collection.
    ///
    /// A mutation was requested on a collection declared immutable.
    E302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E201 => "E201",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E101 => "duplicate reference",
            ErrorCode::E102 => "duplicate type declaration",
            ErrorCode::E201 => "undeclared type",
            ErrorCode::E301 => "bound violation",
            ErrorCode::E302 => "immutable collection",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
