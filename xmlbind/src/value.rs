//! Type-erased field values

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::describe::Bindable;

/// A borrowed view of a field value.
///
/// The binder only needs to know whether a value is null, a scalar with a
/// textual form, a nested object with its own structural description, or a
/// collection. Filters receive the same handle, so one predicate can inspect
/// scalars, objects and collection items alike.
///
/// # Example
///
/// ```
/// use xmlbind::{ToValue, Value};
///
/// assert!(None::<i32>.to_value().is_null());
/// assert_eq!(42u8.to_value().to_text().as_deref(), Some("42"));
/// assert!(vec!["a", "b"].to_value().is_iterable());
/// ```
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value (`None`).
    Null,
    Bool(bool),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    UInt(u64),
    Float(f64),
    Char(char),
    Text(Cow<'a, str>),
    /// Nested object, carrying its run-time structural description.
    Object(&'a dyn Bindable),
    /// Collection of values, in iteration order.
    Seq(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a collection.
    pub fn is_iterable(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Returns the type name of this value.
    ///
    /// For objects this is the name from the concrete type's descriptor.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "double",
            Value::Char(_) => "char",
            Value::Text(_) => "string",
            Value::Object(obj) => obj.descriptor().name,
            Value::Seq(_) => "sequence",
        }
    }

    /// Returns the textual representation of a scalar.
    ///
    /// Null values, objects and collections have none.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::UInt(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(f) => Some(format_float(*f)),
            Value::Char(c) => Some(Cow::Owned(c.to_string())),
            Value::Text(s) => Some(s.clone()),
            Value::Null | Value::Object(_) | Value::Seq(_) => None,
        }
    }

    /// Returns the items of a collection.
    pub fn as_seq(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&'a dyn Bindable> {
        match self {
            Value::Object(obj) => Some(*obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the nested object as `T` if that is its concrete type.
    ///
    /// ```
    /// use xmlbind::{Bindable, ToValue};
    ///
    /// #[derive(Bindable)]
    /// struct Tag {
    ///     #[xml(text)]
    ///     label: String,
    /// }
    ///
    /// let tag = Tag { label: "new".into() };
    /// let value = tag.to_value();
    /// assert_eq!(value.downcast_ref::<Tag>().map(|t| t.label.as_str()), Some("new"));
    /// ```
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.as_object().and_then(|obj| obj.as_any().downcast_ref::<T>())
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::UInt(n) => write!(f, "UInt({n})"),
            Self::Float(x) => write!(f, "Float({x})"),
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::Text(s) => write!(f, "Text({s:?})"),
            Self::Object(obj) => write!(f, "Object({})", obj.descriptor().name),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
        }
    }
}

/// Formats a float in XML Schema lexical form.
fn format_float(f: f64) -> Cow<'static, str> {
    if f.is_nan() {
        Cow::Borrowed("NaN")
    } else if f == f64::INFINITY {
        Cow::Borrowed("INF")
    } else if f == f64::NEG_INFINITY {
        Cow::Borrowed("-INF")
    } else {
        Cow::Owned(f.to_string())
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Conversion of a field's type into a [`Value`].
///
/// Implemented for the common scalar and collection types; `#[derive(Bindable)]`
/// implements it for the derived type as [`Value::Object`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl ToValue for dyn Bindable {
    fn to_value(&self) -> Value<'_> {
        Value::Object(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> ToValue for chrono::DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.to_rfc3339()))
    }
}

#[cfg(feature = "chrono")]
impl ToValue for chrono::NaiveDate {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.format("%Y-%m-%d").to_string()))
    }
}

#[cfg(feature = "uuid")]
impl ToValue for uuid::Uuid {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.hyphenated().to_string()))
    }
}

#[cfg(feature = "rust_decimal")]
impl ToValue for rust_decimal::Decimal {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.to_string()))
    }
}
