//! Filter predicates

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::Value;

/// Boxed error returned by fallible predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Predicate = dyn Fn(&Value<'_>) -> std::result::Result<bool, BoxError> + Send + Sync;

/// Decides which values are left out of the tree.
///
/// The predicate returns `true` for values that should be suppressed. It is
/// consulted for attribute values, element-bound values and collection
/// items, and must not depend on call order if the same binder is shared.
///
/// # Example
///
/// ```
/// use xmlbind::FilterPredicate;
///
/// // Drop empty strings wherever they appear.
/// let filter = FilterPredicate::new(|v| v.as_str() == Some(""));
/// ```
#[derive(Clone)]
pub struct FilterPredicate {
    predicate: Arc<Predicate>,
}

impl FilterPredicate {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |value: &Value<'_>| Ok::<_, BoxError>(predicate(value))),
        }
    }

    /// Creates a predicate that may fail.
    ///
    /// A failure aborts the bind call with [`Error::FilterPredicate`].
    pub fn fallible<F, E>(predicate: F) -> Self
    where
        F: Fn(&Value<'_>) -> std::result::Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            predicate: Arc::new(move |value: &Value<'_>| {
                predicate(value).map_err(Into::<BoxError>::into)
            }),
        }
    }

    /// Returns `true` if `value` should be suppressed.
    pub fn evaluate(&self, value: &Value<'_>) -> Result<bool> {
        (self.predicate)(value).map_err(|source| Error::FilterPredicate { source })
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterPredicate(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ToValue;

    #[test]
    fn test_infallible_predicate() {
        let filter = FilterPredicate::new(|v| v.as_i64() == Some(2));
        assert!(filter.evaluate(&2i32.to_value()).unwrap());
        assert!(!filter.evaluate(&3i32.to_value()).unwrap());
    }

    #[test]
    fn test_fallible_predicate_error() {
        let filter = FilterPredicate::fallible(|v| match v {
            Value::Null => Err("null not expected"),
            _ => Ok(false),
        });
        let err = filter.evaluate(&Value::Null).unwrap_err();
        assert!(matches!(err, Error::FilterPredicate { .. }));
        assert_eq!(err.to_string(), "Filter predicate failed: null not expected");
    }

    #[test]
    fn test_clone_shares_predicate() {
        let filter = FilterPredicate::new(|v| v.is_null());
        let copy = filter.clone();
        assert!(copy.evaluate(&Value::Null).unwrap());
    }
}
