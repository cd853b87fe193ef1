//! The tree binder.
//!
//! [`Binder`] walks a value's [`TypeDescriptor`] field by field and appends
//! attributes, child elements, array wrappers and text to a destination
//! element. It only ever adds to the destination; nodes that already exist
//! are left alone.

use log::{debug, trace};
use xmldom::{Element, QName};

use crate::describe::{Bindable, Directive, FieldDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use crate::filter::FilterPredicate;
use crate::value::Value;

/// Per-call binding options.
///
/// # Example
///
/// ```
/// use xmlbind::BindOptions;
///
/// // Bind child content only, leaving attributes to the caller.
/// let options = BindOptions::default().with_attributes(false);
/// assert!(!options.include_attributes);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BindOptions {
    /// Descriptor to bind the top-level value through instead of its own.
    ///
    /// Nested values always use their own run-time descriptor.
    ///
    /// Default: `None`
    pub as_type: Option<&'static TypeDescriptor>,

    /// Whether attribute directives of the top-level value are applied.
    ///
    /// Nested values always get their attributes.
    ///
    /// Default: `true`
    pub include_attributes: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            as_type: None,
            include_attributes: true,
        }
    }
}

impl BindOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds through `descriptor` instead of the value's own.
    pub fn with_type(mut self, descriptor: &'static TypeDescriptor) -> Self {
        self.as_type = Some(descriptor);
        self
    }

    /// Sets whether attributes are bound on the top-level element.
    pub fn with_attributes(mut self, include: bool) -> Self {
        self.include_attributes = include;
        self
    }
}

/// Writes values into element trees.
///
/// The binder holds an optional [`FilterPredicate`]; without one nothing is
/// filtered. A binder can be cloned cheaply and shared between threads, each
/// call binding into its own destination tree.
///
/// # Example
///
/// ```
/// use xmlbind::{Binder, Bindable, FilterPredicate};
/// use xmldom::Element;
///
/// #[derive(Bindable)]
/// struct Line {
///     #[xml(array = "points", array_item = "point")]
///     points: Vec<i32>,
/// }
///
/// let binder = Binder::with_filter(FilterPredicate::new(|v| v.as_i64() == Some(0)));
/// let mut root = Element::named("line").unwrap();
/// binder.bind(&Line { points: vec![1, 0, 3] }, &mut root).unwrap();
/// assert_eq!(
///     xmldom::to_string(&root),
///     "<line><points><point>1</point><point>3</point></points></line>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    filter: Option<FilterPredicate>,
}

impl Binder {
    /// Creates a binder that filters nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterPredicate) -> Self {
        Self {
            filter: Some(filter),
        }
    }

    pub fn filter(&self) -> Option<&FilterPredicate> {
        self.filter.as_ref()
    }

    /// Replaces the filter; `None` disables filtering.
    pub fn set_filter(&mut self, filter: Option<FilterPredicate>) {
        self.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Binds `instance` into `node` using the instance's own descriptor.
    pub fn bind(&self, instance: &dyn Bindable, node: &mut Element) -> Result<()> {
        self.bind_with(instance, node, BindOptions::default())
    }

    /// Binds `instance` into `node` with explicit options.
    ///
    /// On error, whatever was appended before the failure stays in `node`.
    pub fn bind_with(
        &self,
        instance: &dyn Bindable,
        node: &mut Element,
        options: BindOptions,
    ) -> Result<()> {
        let descriptor = options.as_type.unwrap_or_else(|| instance.descriptor());
        self.bind_fields(instance, descriptor, node, options.include_attributes)
    }

    fn bind_fields(
        &self,
        instance: &dyn Bindable,
        descriptor: &TypeDescriptor,
        node: &mut Element,
        include_attributes: bool,
    ) -> Result<()> {
        trace!("Binding {} into <{}>", descriptor.name, node.name());

        for field in descriptor.fields {
            let mut array_bound = false;
            for directive in field.directives {
                trace!("{}.{}: {:?}", descriptor.name, field.name, directive);
                match *directive {
                    Directive::Attribute { name } => {
                        if include_attributes {
                            self.bind_attribute(instance, field, name, node)?;
                        }
                    }
                    Directive::Element { name } => {
                        self.bind_element(instance, field, name, node)?;
                    }
                    Directive::Array { .. } | Directive::ArrayItem { .. } => {
                        // Both halves describe one binding; apply it once.
                        if !array_bound {
                            array_bound = true;
                            self.bind_array(instance, field, node)?;
                        }
                    }
                    Directive::Text => {
                        self.bind_text(instance, descriptor, field, node)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn bind_attribute(
        &self,
        instance: &dyn Bindable,
        field: &FieldDescriptor,
        name: Option<&str>,
        node: &mut Element,
    ) -> Result<()> {
        let Some(value) = read_field(instance, field) else {
            return Ok(());
        };
        if value.is_null() || self.is_filtered(&value)? {
            return Ok(());
        }
        let Some(text) = value.to_text() else {
            debug!(
                "Skipping attribute for {}: {} has no text form",
                field.name,
                value.type_name()
            );
            return Ok(());
        };
        node.add_attribute(name.unwrap_or(field.name), text)?;
        Ok(())
    }

    fn bind_element(
        &self,
        instance: &dyn Bindable,
        field: &FieldDescriptor,
        name: Option<&str>,
        parent: &mut Element,
    ) -> Result<()> {
        let Some(value) = read_field(instance, field) else {
            return Ok(());
        };
        if value.is_null() {
            return Ok(());
        }
        let name = QName::in_namespace_of(parent.name(), name.unwrap_or(field.name))?;
        match value {
            Value::Seq(items) => {
                for item in &items {
                    self.bind_child(name.clone(), item, parent)?;
                }
                Ok(())
            }
            single => self.bind_child(name, &single, parent),
        }
    }

    /// Creates an element for `value`, attaches it unless filtered, and
    /// binds the value into it either way.
    fn bind_child(&self, name: QName, value: &Value<'_>, parent: &mut Element) -> Result<()> {
        let child = Element::new(name);
        if self.is_filtered(value)? {
            let mut detached = child;
            return self.bind_value(value, &mut detached);
        }
        let child = parent.append_child(child);
        self.bind_value(value, child)
    }

    fn bind_array(
        &self,
        instance: &dyn Bindable,
        field: &FieldDescriptor,
        parent: &mut Element,
    ) -> Result<()> {
        let Some(binding) = field.array_binding() else {
            debug!(
                "Skipping array {}: wrapper and item names must both be declared",
                field.name
            );
            return Ok(());
        };
        let Some(value) = read_field(instance, field) else {
            return Ok(());
        };
        let Some(items) = value.as_seq() else {
            debug!(
                "Skipping array {}: {} is not a collection",
                field.name,
                value.type_name()
            );
            return Ok(());
        };

        let wrapper = Element::new(QName::in_namespace_of(parent.name(), binding.wrapper)?);

        // The wrapper is attached on the first item that survives the filter,
        // so a fully filtered collection leaves no trace.
        let mut items = items.iter();
        let first = loop {
            match items.next() {
                Some(item) if self.is_filtered(item)? => continue,
                Some(item) => break item,
                None => return Ok(()),
            }
        };
        let wrapper = parent.append_child(wrapper);
        self.bind_array_item(binding.item, first, wrapper)?;

        for item in items {
            if self.is_filtered(item)? {
                continue;
            }
            self.bind_array_item(binding.item, item, wrapper)?;
        }
        Ok(())
    }

    fn bind_array_item(
        &self,
        name: Option<&str>,
        item: &Value<'_>,
        wrapper: &mut Element,
    ) -> Result<()> {
        let name = QName::in_namespace_of(wrapper.name(), name.unwrap_or(item.type_name()))?;
        let child = wrapper.append_child(Element::new(name));
        self.bind_value(item, child)
    }

    fn bind_text(
        &self,
        instance: &dyn Bindable,
        descriptor: &TypeDescriptor,
        field: &FieldDescriptor,
        node: &mut Element,
    ) -> Result<()> {
        let Some(value) = read_field(instance, field) else {
            return Ok(());
        };
        if value.is_null() {
            return Err(Error::null_text(descriptor.name, field.name));
        }
        match value.to_text() {
            Some(text) => node.set_text(text),
            None => debug!(
                "Skipping text for {}: {} has no text form",
                field.name,
                value.type_name()
            ),
        }
        Ok(())
    }

    /// Binds a nested value using its run-time type.
    ///
    /// Objects bind through their own descriptor; a scalar becomes the text
    /// of `node`. Null values and nested collections add nothing.
    fn bind_value(&self, value: &Value<'_>, node: &mut Element) -> Result<()> {
        match value {
            Value::Object(obj) => self.bind_fields(*obj, obj.descriptor(), node, true),
            Value::Null => Ok(()),
            Value::Seq(_) => {
                debug!("Skipping nested collection inside <{}>", node.name());
                Ok(())
            }
            scalar => {
                if let Some(text) = scalar.to_text() {
                    node.set_text(text);
                }
                Ok(())
            }
        }
    }

    fn is_filtered(&self, value: &Value<'_>) -> Result<bool> {
        match &self.filter {
            Some(filter) => filter.evaluate(value),
            None => Ok(false),
        }
    }
}

fn read_field<'a>(instance: &'a dyn Bindable, field: &FieldDescriptor) -> Option<Value<'a>> {
    let value = instance.field_value(field.name);
    if value.is_none() {
        debug!(
            "Skipping {}: not a field of {}",
            field.name,
            instance.descriptor().name
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::value::ToValue;

    struct Point {
        x: i32,
        y: Option<i32>,
    }

    static POINT: TypeDescriptor = TypeDescriptor {
        name: "Point",
        fields: &[
            FieldDescriptor {
                name: "x",
                directives: &[Directive::Attribute { name: None }],
            },
            FieldDescriptor {
                name: "y",
                directives: &[Directive::Attribute { name: Some("why") }],
            },
        ],
    };

    impl Bindable for Point {
        fn descriptor(&self) -> &'static TypeDescriptor {
            &POINT
        }

        fn field_value(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "x" => Some(self.x.to_value()),
                "y" => Some(self.y.to_value()),
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Shape {
        points: Vec<Point>,
    }

    static SHAPE: TypeDescriptor = TypeDescriptor {
        name: "Shape",
        fields: &[FieldDescriptor {
            name: "points",
            directives: &[Directive::Element { name: Some("pt") }],
        }],
    };

    impl Bindable for Shape {
        fn descriptor(&self) -> &'static TypeDescriptor {
            &SHAPE
        }

        fn field_value(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "points" => Some(Value::Seq(
                    self.points.iter().map(|p| Value::Object(p)).collect(),
                )),
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn root() -> Element {
        Element::named("root").unwrap()
    }

    #[test]
    fn test_manual_descriptor_attributes() {
        let mut node = root();
        Binder::new().bind(&Point { x: 1, y: Some(2) }, &mut node).unwrap();
        assert_eq!(node.attribute("x"), Some("1"));
        assert_eq!(node.attribute("why"), Some("2"));
    }

    #[test]
    fn test_null_attribute_omitted() {
        let mut node = root();
        Binder::new().bind(&Point { x: 1, y: None }, &mut node).unwrap();
        assert_eq!(node.attributes().len(), 1);
        assert_eq!(node.attribute("why"), None);
    }

    #[test]
    fn test_include_attributes_is_not_recursive() {
        let shape = Shape {
            points: vec![Point { x: 1, y: None }],
        };
        let mut node = root();
        node.set_attribute("keep", "me").unwrap();
        Binder::new()
            .bind_with(&shape, &mut node, BindOptions::new().with_attributes(false))
            .unwrap();
        assert_eq!(node.attributes().len(), 1);
        assert_eq!(node.element("pt").and_then(|pt| pt.attribute("x")), Some("1"));
    }

    #[test]
    fn test_filtered_element_items_still_recurse() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let binder = Binder::with_filter(FilterPredicate::new(move |v| {
            if v.as_i64() == Some(1) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            v.downcast_ref::<Point>().is_some()
        }));
        let shape = Shape {
            points: vec![Point { x: 1, y: None }, Point { x: 1, y: None }],
        };
        let mut node = root();
        binder.bind(&shape, &mut node).unwrap();

        assert!(node.children().is_empty());
        // The x attribute of each detached point was still evaluated.
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_filter_fault_propagates() {
        let binder = Binder::with_filter(FilterPredicate::fallible(|_| Err("boom")));
        let mut node = root();
        let err = binder.bind(&Point { x: 1, y: None }, &mut node).unwrap_err();
        assert!(matches!(err, Error::FilterPredicate { .. }));
    }

    #[test]
    fn test_filter_accessors() {
        let mut binder = Binder::new();
        assert!(binder.filter().is_none());
        binder.set_filter(Some(FilterPredicate::new(|_| true)));
        assert!(binder.filter().is_some());
        binder.clear_filter();
        assert!(binder.filter().is_none());
    }
}
