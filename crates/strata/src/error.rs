//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`] which wraps the
//! error conditions that can occur while loading declarations and assembling
//! a model.

use std::io;

use thiserror::Error;

use strata_schema::SchemaError;

/// The main error type for Strata operations.
///
/// # Diagnostic Variants
///
/// The `Declaration` variant keeps the declaration source alongside the
/// TOML error so the error location can be shown in context.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid declaration file: {}", .err.message())]
    Declaration { err: toml::de::Error, src: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl StrataError {
    /// Create a new `Declaration` error with the associated source.
    pub fn new_declaration_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Declaration {
            err,
            src: src.into(),
        }
    }

    /// Returns the wrapped [`SchemaError`], if this is an assembly failure.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}
