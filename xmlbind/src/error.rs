//! Error types

use xmldom::DomError;

use crate::filter::BoxError;

/// Result alias for binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a bind call.
///
/// Nodes attached before the failure stay attached; build into a scratch
/// element and attach it afterwards if all-or-nothing output is needed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A text-bound field had no value.
    #[error("Text field '{field}' of '{type_name}' is null")]
    NullTextValue {
        type_name: &'static str,
        field: &'static str,
    },

    /// The filter predicate itself failed.
    #[error("Filter predicate failed: {source}")]
    FilterPredicate {
        #[source]
        source: BoxError,
    },

    /// A declared name was rejected by the tree, or an attribute was bound twice.
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl Error {
    /// Creates a new null text value error.
    pub fn null_text(type_name: &'static str, field: &'static str) -> Self {
        Self::NullTextValue { type_name, field }
    }
}
