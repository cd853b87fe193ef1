use xmldom::{Element, QName, RenderOptions, to_string, to_string_with_options};

fn el(name: &str) -> Element {
    Element::named(name).unwrap()
}

#[test]
fn test_empty_element_self_closes() {
    assert_eq!(to_string(&el("root")), "<root/>");
}

#[test]
fn test_attributes_in_insertion_order() {
    let mut root = el("point");
    root.add_attribute("y", "2").unwrap();
    root.add_attribute("x", "1").unwrap();
    assert_eq!(to_string(&root), r#"<point y="2" x="1"/>"#);
}

#[test]
fn test_text_content_is_escaped() {
    let mut root = el("doc");
    root.set_text("a < b & c");
    assert_eq!(to_string(&root), "<doc>a &lt; b &amp; c</doc>");
}

#[test]
fn test_namespace_declared_once() {
    let mut root = el("{urn:shapes}line");
    let points = root.append_child(Element::new(
        QName::new(Some("urn:shapes"), "points").unwrap(),
    ));
    points.append_child(Element::new(
        QName::new(Some("urn:shapes"), "point").unwrap(),
    ));

    assert_eq!(
        to_string(&root),
        r#"<line xmlns="urn:shapes"><points><point/></points></line>"#
    );
}

#[test]
fn test_namespace_undeclared_for_unqualified_child() {
    let mut root = el("{urn:a}root");
    root.append_child(el("plain"));
    assert_eq!(
        to_string(&root),
        r#"<root xmlns="urn:a"><plain xmlns=""/></root>"#
    );
}

#[test]
fn test_nested_namespace_switch() {
    let mut root = el("{urn:a}root");
    let inner = root.append_child(el("{urn:b}inner"));
    inner.append_child(el("{urn:b}leaf"));
    assert_eq!(
        to_string(&root),
        r#"<root xmlns="urn:a"><inner xmlns="urn:b"><leaf/></inner></root>"#
    );
}

#[test]
fn test_indented_output() {
    let mut root = el("line");
    let points = root.append_child(el("points"));
    points.append_child(el("point")).set_text("1");
    points.append_child(el("point")).set_text("2");

    let xml = to_string_with_options(&root, &RenderOptions::default().indent(true));
    assert_eq!(
        xml,
        "<line>\n  <points>\n    <point>1</point>\n    <point>2</point>\n  </points>\n</line>\n"
    );
}

#[test]
fn test_declaration() {
    let xml = to_string_with_options(&el("root"), &RenderOptions::new().declaration(true));
    assert_eq!(xml, r#"<?xml version="1.0"?><root/>"#);
}

#[test]
fn test_tree_serde_snapshot() {
    let mut root = el("{urn:a}root");
    root.add_attribute("id", "7").unwrap();
    root.append_child(el("{urn:a}child")).set_text("hi");

    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["name"]["namespace"], "urn:a");
    assert_eq!(json["attributes"][0]["name"], "id");
    assert_eq!(json["children"][0]["Element"]["children"][0]["Text"], "hi");

    let back: Element = serde_json::from_value(json).unwrap();
    assert_eq!(back, root);
}
