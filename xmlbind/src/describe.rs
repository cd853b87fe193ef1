//! Structural descriptions of bindable types
//!
//! A [`TypeDescriptor`] lists a type's fields in declaration order together
//! with the [`Directive`]s that say where each field goes in the tree. The
//! [`Bindable`] trait ties a value to the descriptor of its concrete run-time
//! type and gives uniform access to its field values.

use std::any::Any;

use serde::Serialize;

use crate::value::Value;

/// How one field maps into the tree.
///
/// A field may carry any number of directives; each is applied on its own,
/// in declaration order. [`Array`](Directive::Array) and
/// [`ArrayItem`](Directive::ArrayItem) only take effect as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Attribute on the current element, named after the field by default.
    Attribute { name: Option<&'static str> },
    /// One child element per value (or per item of a collection).
    Element { name: Option<&'static str> },
    /// Wrapper element for a collection, named after the field by default.
    Array { name: Option<&'static str> },
    /// Element name for each item inside the array wrapper.
    ArrayItem { name: Option<&'static str> },
    /// Text content of the current element.
    Text,
}

/// Resolved wrapper and item names of an array binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayBinding {
    pub wrapper: &'static str,
    /// `None` means "name each item after its type".
    pub item: Option<&'static str>,
}

/// A field of a bindable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub directives: &'static [Directive],
}

impl FieldDescriptor {
    /// Returns the array binding if both halves of the pair are declared.
    ///
    /// The first `Array` and the first `ArrayItem` directive are used.
    pub fn array_binding(&self) -> Option<ArrayBinding> {
        let wrapper = self.directives.iter().find_map(|d| match d {
            Directive::Array { name } => Some(name.unwrap_or(self.name)),
            _ => None,
        })?;
        let item = self.directives.iter().find_map(|d| match d {
            Directive::ArrayItem { name } => Some(*name),
            _ => None,
        })?;
        Some(ArrayBinding { wrapper, item })
    }
}

/// The ordered fields of a bindable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A value that can describe itself to the binder.
///
/// Usually derived with `#[derive(Bindable)]`. A manual implementation looks
/// like this:
///
/// ```
/// use std::any::Any;
/// use xmlbind::{Bindable, Directive, FieldDescriptor, ToValue, TypeDescriptor, Value};
///
/// struct Point {
///     x: i32,
/// }
///
/// static POINT: TypeDescriptor = TypeDescriptor {
///     name: "Point",
///     fields: &[FieldDescriptor {
///         name: "x",
///         directives: &[Directive::Attribute { name: None }],
///     }],
/// };
///
/// impl Bindable for Point {
///     fn descriptor(&self) -> &'static TypeDescriptor {
///         &POINT
///     }
///
///     fn field_value(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "x" => Some(self.x.to_value()),
///             _ => None,
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Bindable: Any {
    /// Returns the descriptor of this value's concrete type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Reads a field by name, or `None` if this type has no such field.
    fn field_value(&self, name: &str) -> Option<Value<'_>>;

    fn as_any(&self) -> &dyn Any;
}

/// Access to a type's descriptor without an instance.
///
/// Used to bind a value through another type's description.
pub trait Describe {
    fn type_descriptor() -> &'static TypeDescriptor;
}
