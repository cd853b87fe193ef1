//! Tree construction errors

/// Error type for building element trees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The name is not a valid XML local name.
    #[error("'{name}' is not a valid XML name")]
    InvalidName { name: String },

    /// The element already carries an attribute with this name.
    #[error("Duplicate attribute '{name}'")]
    DuplicateAttribute { name: String },
}

impl DomError {
    /// Creates a new invalid name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Creates a new duplicate attribute error.
    pub fn duplicate_attribute(name: impl Into<String>) -> Self {
        Self::DuplicateAttribute { name: name.into() }
    }
}
