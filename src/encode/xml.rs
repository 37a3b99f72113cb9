//! XML tree encoder: depth-first, child order preserved exactly.
//!
//! Compiled attribute values go through the standalone-item path (no string
//! pool, so nothing is interned for XML-embedded values); their source is a
//! line-only position taken from the compiled value itself.

use crate::encode::value::encode_item;
use crate::schema;
use crate::xml::{Element, Node, SourcePos, Text, XmlResource};

/// Encodes an element and its whole subtree.
pub fn encode_xml(element: &Element) -> schema::XmlNode {
    schema::XmlNode {
        source: encode_pos(element.pos),
        node: schema::XmlNodeKind::Element(encode_element(element)),
    }
}

/// Encodes a whole XML resource from its root element.
pub fn encode_xml_resource(resource: &XmlResource) -> schema::XmlNode {
    encode_xml(&resource.root)
}

fn encode_element(element: &Element) -> schema::XmlElement {
    schema::XmlElement {
        name: element.name.clone(),
        namespace_uri: element.namespace_uri.clone(),
        namespace_declarations: element
            .namespaces
            .iter()
            .map(|ns| schema::XmlNamespace {
                prefix: ns.prefix.clone(),
                uri: ns.uri.clone(),
                source: encode_pos(ns.pos),
            })
            .collect(),
        attributes: element.attributes.iter().map(encode_attribute).collect(),
        children: element
            .children
            .iter()
            .map(|child| match child {
                Node::Element(child_element) => encode_xml(child_element),
                Node::Text(text) => encode_text(text),
            })
            .collect(),
    }
}

fn encode_attribute(attr: &crate::xml::Attribute) -> schema::XmlAttribute {
    let (compiled_item, source) = match &attr.compiled_value {
        Some(item) => (
            Some(encode_item(&item.kind)),
            Some(schema::SourcePosition {
                line_number: item.source.line.unwrap_or(0),
                column_number: 0,
            }),
        ),
        None => (None, None),
    };

    schema::XmlAttribute {
        name: attr.name.clone(),
        namespace_uri: attr.namespace_uri.clone(),
        value: attr.value.clone(),
        resource_id: attr.resource_id,
        compiled_item,
        source,
    }
}

fn encode_text(text: &Text) -> schema::XmlNode {
    schema::XmlNode {
        source: encode_pos(text.pos),
        node: schema::XmlNodeKind::Text(text.text.clone()),
    }
}

fn encode_pos(pos: SourcePos) -> schema::SourcePosition {
    schema::SourcePosition {
        line_number: pos.line,
        column_number: pos.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, ItemKind, Primitive, Source};
    use crate::xml::{Attribute, NamespaceDecl};

    fn leaf(name: &str, line: u32) -> Element {
        Element {
            name: name.to_string(),
            namespace_uri: String::new(),
            namespaces: vec![],
            attributes: vec![],
            children: vec![],
            pos: SourcePos { line, column: 5 },
        }
    }

    #[test]
    fn test_child_order_preserved() {
        let mut root = leaf("LinearLayout", 1);
        root.children.push(Node::Element(leaf("TextView", 2)));
        root.children.push(Node::Text(Text {
            text: "between".to_string(),
            pos: SourcePos { line: 3, column: 9 },
        }));
        root.children.push(Node::Element(leaf("Button", 4)));

        let out = encode_xml(&root);
        let schema::XmlNodeKind::Element(element) = out.node else {
            panic!("expected an element");
        };
        assert_eq!(element.children.len(), 3);
        assert!(matches!(&element.children[0].node, schema::XmlNodeKind::Element(e) if e.name == "TextView"));
        assert!(matches!(&element.children[1].node, schema::XmlNodeKind::Text(t) if t == "between"));
        assert!(matches!(&element.children[2].node, schema::XmlNodeKind::Element(e) if e.name == "Button"));
        assert_eq!(element.children[1].source.line_number, 3);
        assert_eq!(element.children[1].source.column_number, 9);
    }

    #[test]
    fn test_namespace_declarations_with_positions() {
        let mut root = leaf("resources", 1);
        root.namespaces.push(NamespaceDecl {
            prefix: "android".to_string(),
            uri: "http://schemas.android.com/apk/res/android".to_string(),
            pos: SourcePos { line: 1, column: 12 },
        });

        let out = encode_xml(&root);
        let schema::XmlNodeKind::Element(element) = out.node else {
            panic!("expected an element");
        };
        assert_eq!(element.namespace_declarations.len(), 1);
        let ns = &element.namespace_declarations[0];
        assert_eq!(ns.prefix, "android");
        assert_eq!(ns.source.column_number, 12);
    }

    #[test]
    fn test_compiled_attribute_value_line_only_source() {
        let mut root = leaf("TextView", 1);
        root.attributes.push(Attribute {
            name: "textColor".to_string(),
            namespace_uri: "http://schemas.android.com/apk/res/android".to_string(),
            value: "#ff0000".to_string(),
            resource_id: Some(0x01010098),
            compiled_value: Some(Item {
                kind: ItemKind::Primitive(Primitive {
                    data_type: 0x1c,
                    data: 0xffff0000,
                }),
                comment: String::new(),
                source: Source::with_line("res/layout/main.xml", 6),
            }),
        });

        let out = encode_xml(&root);
        let schema::XmlNodeKind::Element(element) = out.node else {
            panic!("expected an element");
        };
        let attr = &element.attributes[0];
        assert_eq!(attr.resource_id, Some(0x01010098));
        assert!(matches!(attr.compiled_item, Some(schema::Item::Prim(_))));
        let source = attr.source.unwrap();
        assert_eq!(source.line_number, 6);
        assert_eq!(source.column_number, 0);
    }

    #[test]
    fn test_plain_attribute_has_no_compiled_item_or_source() {
        let mut root = leaf("TextView", 1);
        root.attributes.push(Attribute {
            name: "text".to_string(),
            namespace_uri: String::new(),
            value: "hello".to_string(),
            resource_id: None,
            compiled_value: None,
        });

        let out = encode_xml(&root);
        let schema::XmlNodeKind::Element(element) = out.node else {
            panic!("expected an element");
        };
        let attr = &element.attributes[0];
        assert_eq!(attr.compiled_item, None);
        assert_eq!(attr.source, None);
        assert_eq!(attr.resource_id, None);
    }
}
