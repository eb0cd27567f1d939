//! Error system for metamodel assembly.
//!
//! Every failure during assembly is a [`SchemaError`]. The set of error kinds
//! is closed, and each kind carries an [`ErrorCode`] for documentation and
//! searchability:
//!
//! - `E1xx` - Declaration errors, raised while a type is being declared
//! - `E2xx` - Resolution errors, raised while deferred operations run
//! - `E3xx` - Structural errors, raised when a descriptor is first used
//!
//! # Example
//!
//! ```
//! # use strata_schema::error::{ErrorCode, SchemaError, TypeUsage};
//! # use strata_core::identifier::Id;
//! let err = SchemaError::UndeclaredType {
//!     owner: Id::new("Parent"),
//!     missing: Id::new("Ghost"),
//!     usage: TypeUsage::ChildElement,
//! };
//!
//! assert_eq!(err.code(), ErrorCode::E201);
//! assert_eq!(
//!     err.to_string(),
//!     "`Parent` declares undefined child element type `Ghost`"
//! );
//! ```

mod error_code;
mod schema_error;

pub use error_code::ErrorCode;
pub use schema_error::{SchemaError, TypeUsage};

/// A type alias for `Result<T, SchemaError>`.
pub type Result<T> = std::result::Result<T, SchemaError>;
