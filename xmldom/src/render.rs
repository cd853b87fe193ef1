//! XML text output.
//!
//! Writes an [`Element`] tree as XML. Namespaces are expressed with default
//! namespace declarations only: an element gets an `xmlns` attribute whenever
//! its namespace differs from the one in scope at its parent.

use crate::element::{Element, Node};

/// Options controlling how a tree is written out.
///
/// # Example
///
/// ```
/// use xmldom::{Element, RenderOptions, to_string_with_options};
///
/// let mut root = Element::named("root").unwrap();
/// root.append_child(Element::named("child").unwrap());
/// let xml = to_string_with_options(&root, &RenderOptions::default().indent(true));
/// assert_eq!(xml, "<root>\n  <child/>\n</root>\n");
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Whether to put each child element on its own indented line.
    ///
    /// Default: `false`
    pub indent: bool,

    /// Indentation used per nesting level when `indent` is set.
    ///
    /// Default: two spaces
    pub indent_str: String,

    /// Whether to start the output with `<?xml version="1.0"?>`.
    ///
    /// Default: `false`
    pub declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: false,
            indent_str: "  ".to_string(),
            declaration: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables indented output.
    ///
    /// Elements that hold text are written on one line so that no whitespace
    /// is added to their content.
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }

    #[must_use]
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Writes `root` as compact XML.
#[must_use]
pub fn to_string(root: &Element) -> String {
    to_string_with_options(root, &RenderOptions::default())
}

/// Writes `root` as XML with the given options.
#[must_use]
pub fn to_string_with_options(root: &Element, options: &RenderOptions) -> String {
    let mut out = String::new();
    if options.declaration {
        out.push_str("<?xml version=\"1.0\"?>");
        if options.indent {
            out.push('\n');
        }
    }
    write_element(root, None, &mut out, options, 0);
    if options.indent {
        out.push('\n');
    }
    out
}

fn write_element(
    element: &Element,
    scope: Option<&str>,
    out: &mut String,
    options: &RenderOptions,
    depth: usize,
) {
    let name = element.name();
    out.push('<');
    out.push_str(name.local());

    let namespace = name.namespace();
    if namespace != scope {
        out.push_str(" xmlns=\"");
        write_escaped_attr(out, namespace.unwrap_or(""));
        out.push('"');
    }

    for attr in element.attributes() {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        write_escaped_attr(out, &attr.value);
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let element_only = options.indent && element.text().is_none();
    for child in element.children() {
        if element_only {
            out.push('\n');
            push_indent(out, options, depth + 1);
        }
        match child {
            Node::Element(el) => write_element(el, namespace, out, options, depth + 1),
            Node::Text(text) => write_escaped_text(out, text),
        }
    }
    if element_only {
        out.push('\n');
        push_indent(out, options, depth);
    }

    out.push_str("</");
    out.push_str(name.local());
    out.push('>');
}

fn push_indent(out: &mut String, options: &RenderOptions, depth: usize) {
    for _ in 0..depth {
        out.push_str(&options.indent_str);
    }
}

fn write_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn write_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}
