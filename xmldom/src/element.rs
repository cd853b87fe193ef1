use serde::Deserialize;
use serde::Serialize;

use crate::error::DomError;
use crate::name::{QName, is_ncname};

/// An unqualified attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

/// A namespace-qualified element that owns its attributes and children.
///
/// Children keep insertion order. Elements are built by appending; nothing in
/// this type removes a child element once it has been added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parses `name` (Clark notation allowed) and creates an empty element.
    pub fn named(name: &str) -> Result<Self, DomError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    // Attributes

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Adds a new attribute.
    ///
    /// Fails if the name is not a valid XML name or if the element already
    /// has an attribute with the same name.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let name = name.into();
        if !is_ncname(&name) {
            return Err(DomError::invalid_name(name));
        }
        if self.attribute(&name).is_some() {
            return Err(DomError::duplicate_attribute(name));
        }
        self.attributes.push(Attribute {
            name,
            value: value.into(),
        });
        Ok(())
    }

    /// Sets an attribute, replacing the value of an existing one.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => {
                attr.value = value;
                Ok(())
            }
            None => self.add_attribute(name, value),
        }
    }

    // Children

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends `child` and returns a mutable reference to it in its new place.
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(Node::Element(child));
        match self.children.last_mut() {
            Some(Node::Element(element)) => element,
            _ => unreachable!("an element was just pushed"),
        }
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Replaces the element's direct text content.
    ///
    /// The new text takes the place of the first existing text node and any
    /// other text nodes are dropped. Child elements are left untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.children.iter().position(|node| matches!(node, Node::Text(_))) {
            Some(first) => {
                self.children[first] = Node::Text(text);
                let mut index = 0;
                self.children.retain(|node| {
                    let keep = index <= first || !matches!(node, Node::Text(_));
                    index += 1;
                    keep
                });
            }
            None => self.children.push(Node::Text(text)),
        }
    }

    /// Returns the first direct text node.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(Node::as_text)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.name.local() == local)
    }

    /// Finds the first child element with the given local name.
    pub fn element<'a>(&'a self, local: &'a str) -> Option<&'a Element> {
        self.elements_named(local).next()
    }

    /// Returns `true` if the element has no attributes and no children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_child_by_owned_name() {
        let mut root = Element::named("root").unwrap();
        root.append_child(Element::named("child").unwrap()).append_text("a");
        root.append_child(Element::named("other").unwrap());
        root.append_child(Element::named("child").unwrap());

        let wanted = String::from("child");
        let found = root.element(&wanted).and_then(Element::text);
        assert_eq!(found, Some("a"));
        assert_eq!(root.elements_named("child").count(), 2);
        assert!(root.element("missing").is_none());
    }

    #[test]
    fn test_duplicate_attribute() {
        let mut el = Element::named("point").unwrap();
        el.add_attribute("x", "1").unwrap();
        assert_eq!(
            el.add_attribute("x", "2"),
            Err(DomError::duplicate_attribute("x"))
        );
        assert_eq!(el.attribute("x"), Some("1"));
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut el = Element::named("point").unwrap();
        el.set_attribute("x", "1").unwrap();
        el.set_attribute("x", "2").unwrap();
        assert_eq!(el.attributes().len(), 1);
        assert_eq!(el.attribute("x"), Some("2"));
    }

    #[test]
    fn test_invalid_attribute_name() {
        let mut el = Element::named("point").unwrap();
        assert!(el.add_attribute("a b", "1").is_err());
        assert!(el.is_empty());
    }

    #[test]
    fn test_append_child_returns_attached() {
        let mut root = Element::named("root").unwrap();
        let child = root.append_child(Element::named("child").unwrap());
        child.set_text("hi");
        assert_eq!(root.element("child").and_then(Element::text), Some("hi"));
    }

    #[test]
    fn test_set_text_overwrites_and_keeps_elements() {
        let mut el = Element::named("doc").unwrap();
        el.append_text("a");
        el.append_child(Element::named("b").unwrap());
        el.append_text("c");
        el.set_text("z");

        assert_eq!(el.children().len(), 2);
        assert_eq!(el.children()[0].as_text(), Some("z"));
        assert!(el.children()[1].as_element().is_some());
    }

    #[test]
    fn test_set_text_appends_when_absent() {
        let mut el = Element::named("doc").unwrap();
        el.append_child(Element::named("b").unwrap());
        el.set_text("z");
        assert_eq!(el.children()[1].as_text(), Some("z"));
    }
}
