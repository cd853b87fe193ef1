//! Owned XML element tree.
//!
//! A small mutable tree of namespace-qualified elements, attributes and text,
//! plus a renderer that writes it out as XML text.

pub mod element;
pub mod error;
pub mod name;
pub mod render;

pub use element::{Attribute, Element, Node};
pub use error::DomError;
pub use name::QName;
pub use render::{RenderOptions, to_string, to_string_with_options};
