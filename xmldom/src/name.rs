//! Namespace-qualified names.
//!
//! A [`QName`] pairs an optional namespace URI with a local name. Names are
//! written in Clark notation (`{namespace}local`) when displayed or parsed,
//! so no prefixes are ever involved.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::DomError;

/// A local name with an optional namespace URI.
///
/// # Example
///
/// ```
/// use xmldom::QName;
///
/// let name: QName = "{urn:shapes}point".parse().unwrap();
/// assert_eq!(name.namespace(), Some("urn:shapes"));
/// assert_eq!(name.local(), "point");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// Creates a name in the given namespace.
    ///
    /// An empty namespace string means "no namespace".
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Result<Self, DomError> {
        let local = local.into();
        if !is_ncname(&local) {
            return Err(DomError::invalid_name(local));
        }
        Ok(Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            local,
        })
    }

    /// Creates a name without a namespace.
    pub fn local_name(local: impl Into<String>) -> Result<Self, DomError> {
        Self::new(None, local)
    }

    /// Creates a name that shares `parent`'s namespace.
    pub fn in_namespace_of(parent: &QName, local: impl Into<String>) -> Result<Self, DomError> {
        Self::new(parent.namespace(), local)
    }

    /// Returns the namespace URI, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the local part of the name.
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

impl FromStr for QName {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('{') {
            Some(rest) => match rest.split_once('}') {
                Some((ns, local)) => Self::new(Some(ns), local),
                None => Err(DomError::invalid_name(s)),
            },
            None => Self::local_name(s),
        }
    }
}

/// Checks that `name` is a non-colonized XML name.
///
/// Accepts the ASCII and Unicode letters XML allows as name characters; the
/// full production is approximated by `char::is_alphabetic`.
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}
