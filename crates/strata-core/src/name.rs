//! Namespace-qualified element names.

use std::fmt;

/// The qualified name of an element type: an optional namespace URI and a
/// local name.
///
/// Displayed in Clark notation (`{namespace}local`), or as the bare local name
/// when no namespace is set.
///
/// # Examples
///
/// ```
/// use strata_core::name::QualifiedName;
///
/// let name = QualifiedName::new(Some("http://example.org/model"), "process");
/// assert_eq!(name.to_string(), "{http://example.org/model}process");
///
/// let local = QualifiedName::local("task");
/// assert_eq!(local.to_string(), "task");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace_uri: Option<String>,
    local_name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    pub fn new(namespace_uri: Option<&str>, local_name: impl Into<String>) -> Self {
        Self {
            namespace_uri: namespace_uri.map(str::to_owned),
            local_name: local_name.into(),
        }
    }

    /// Creates a name without a namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new(None, local_name)
    }

    /// Returns the namespace URI, if any.
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Returns the local part of the name.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns `true` if this name has the given namespace and local name.
    pub fn matches(&self, namespace_uri: Option<&str>, local_name: &str) -> bool {
        self.namespace_uri.as_deref() == namespace_uri && self.local_name == local_name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_uri {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        let name = QualifiedName::new(Some("urn:a"), "task");

        assert!(name.matches(Some("urn:a"), "task"));
        assert!(!name.matches(None, "task"));
        assert!(!name.matches(Some("urn:b"), "task"));
        assert!(!name.matches(Some("urn:a"), "event"));
    }

    #[test]
    fn test_accessors() {
        let name = QualifiedName::new(Some("urn:a"), "task");
        assert_eq!(name.namespace_uri(), Some("urn:a"));
        assert_eq!(name.local_name(), "task");
        assert_eq!(QualifiedName::local("x").namespace_uri(), None);
    }
}
