//! Filtered object-to-XML binding
//!
//! Walks a value's structural description and writes it into an
//! [`xmldom::Element`], placing each field as an attribute, child elements,
//! a wrapped array or text content according to its binding directives. A
//! [`FilterPredicate`] can suppress individual values, objects and
//! collection items.
//!
//! # Example
//!
//! ```
//! use xmlbind::{Binder, Bindable};
//! use xmldom::Element;
//!
//! #[derive(Bindable)]
//! struct Point {
//!     #[xml(attribute = "x")]
//!     x: i32,
//!     #[xml(attribute = "y")]
//!     y: i32,
//! }
//!
//! let mut root = Element::named("point").unwrap();
//! Binder::new().bind(&Point { x: 1, y: 2 }, &mut root).unwrap();
//! assert_eq!(xmldom::to_string(&root), r#"<point x="1" y="2"/>"#);
//! ```

pub mod binder;
pub mod describe;
pub mod error;
pub mod filter;
pub mod value;

pub use binder::{BindOptions, Binder};
pub use describe::{Bindable, Describe, Directive, FieldDescriptor, TypeDescriptor};
pub use error::{Error, Result};
pub use filter::{BoxError, FilterPredicate};
pub use value::{ToValue, Value};

#[cfg(feature = "derive")]
pub use xmlbind_derive::Bindable;
