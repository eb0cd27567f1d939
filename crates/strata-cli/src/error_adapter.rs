//! Error adapter for converting StrataError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Declaration file
//! errors point into the offending source; assembly errors carry their error
//! code and a help line.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan,
    SourceSpan,
};

use strata::{StrataError, schema::SchemaError};

/// Adapter for a declaration file error with its source.
pub struct DeclarationAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> DeclarationAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DeclarationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DeclarationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid declaration file: {}", self.err.message())
    }
}

impl std::error::Error for DeclarationAdapter<'_> {}

impl MietteDiagnostic for DeclarationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("strata::declaration"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for assembly errors.
#[derive(Debug)]
pub struct SchemaAdapter<'a>(pub &'a SchemaError);

impl fmt::Display for SchemaAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for SchemaAdapter<'_> {}

impl MietteDiagnostic for SchemaAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.help()))
    }
}

/// Adapter for the remaining [`StrataError`] variants.
///
/// These errors have no source location or error code beyond their kind.
pub struct ErrorAdapter<'a>(pub &'a StrataError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StrataError::Io(_) => "strata::io",
            StrataError::Config(_) => "strata::config",
            StrataError::Declaration { .. } => "strata::declaration",
            StrataError::Schema(_) => "strata::schema",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A declaration file error with source location.
    Declaration(DeclarationAdapter<'a>),
    /// A coded assembly error.
    Schema(SchemaAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn as_diagnostic(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Declaration(d) => d,
            Reportable::Schema(s) => s,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_diagnostic(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.as_diagnostic().source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.as_diagnostic().code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.as_diagnostic().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.as_diagnostic().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.as_diagnostic().labels()
    }
}

/// Convert a [`StrataError`] into a reportable error.
pub fn to_reportable(err: &StrataError) -> Reportable<'_> {
    match err {
        StrataError::Declaration { err, src } => {
            Reportable::Declaration(DeclarationAdapter::new(err, src))
        }
        StrataError::Schema(schema_err) => Reportable::Schema(SchemaAdapter(schema_err)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Renders `err` as a miette report, falling back to its plain message.
pub fn format_error(err: &StrataError, theme: GraphicalTheme) -> String {
    let reportable = to_reportable(err);
    let mut out = String::new();
    match GraphicalReportHandler::new_themed(theme).render_report(&mut out, &reportable) {
        Ok(()) => out,
        Err(_) => err.to_string(),
    }
}
