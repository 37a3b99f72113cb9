//! XML document tree model, plus a small parser that builds one from text.
//!
//! The encoder consumes a pre-built [`Element`] tree; compiled attribute
//! values and resolved resource IDs are attached by a compiler pass, not by
//! the parser here. [`parse_str`] exists so that tests and embedders can get
//! a position-annotated tree without carrying their own front end.

use quick_xml::{Reader, events::Event};

use crate::error::Error;
use crate::types::Item;

/// A line/column position in the source document, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

/// One `xmlns` declaration, with the position of the element that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Empty for the default namespace.
    pub prefix: String,
    pub uri: String,
    pub pos: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub namespace_uri: String,
    pub value: String,
    /// Resolved numeric resource ID, attached by a compiler pass.
    pub resource_id: Option<u32>,
    /// Pre-compiled value, attached by a compiler pass.
    pub compiled_value: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub pos: SourcePos,
}

/// An element node owning its children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub namespace_uri: String,
    pub namespaces: Vec<NamespaceDecl>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub pos: SourcePos,
}

/// The closed set of node kinds the tree can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

/// A whole XML document, rooted at one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlResource {
    pub root: Element,
}

/// Maps byte offsets to 1-based line/column positions.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(input: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in input.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineIndex { line_starts }
    }

    fn position(&self, offset: usize) -> SourcePos {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        SourcePos {
            line: (line + 1) as u32,
            column: (offset - self.line_starts[line] + 1) as u32,
        }
    }
}

/// Parses an XML document into a position-annotated element tree.
///
/// Namespace declarations become [`NamespaceDecl`]s on their element;
/// prefixed element and attribute names are resolved against the declarations
/// in scope. Whitespace-only text is dropped.
pub fn parse_str(input: &str) -> Result<XmlResource, Error> {
    // Text is trimmed by hand below: letting the reader swallow whitespace
    // events would desync the byte offsets used for positions.
    let mut reader = Reader::from_str(input);

    let index = LineIndex::new(input);
    // Parallel stacks: open elements and the namespace scopes they introduced.
    let mut stack: Vec<Element> = Vec::new();
    let mut scopes: Vec<Vec<(String, String)>> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = open_element(&e, index.position(offset), &mut scopes)?;
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e, index.position(offset), &mut scopes)?;
                scopes.pop();
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::invalid_resource("unbalanced closing tag"))?;
                scopes.pop();
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(Error::XmlParse)?.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(Text {
                        text,
                        pos: index.position(offset),
                    }));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(Text {
                        text,
                        pos: index.position(offset),
                    }));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
    }

    if !stack.is_empty() {
        return Err(Error::invalid_resource("unexpected EOF inside element"));
    }
    root.map(|root| XmlResource { root })
        .ok_or_else(|| Error::invalid_resource("document has no root element"))
}

fn open_element(
    e: &quick_xml::events::BytesStart<'_>,
    pos: SourcePos,
    scopes: &mut Vec<Vec<(String, String)>>,
) -> Result<Element, Error> {
    let mut namespaces = Vec::new();
    let mut plain_attrs: Vec<(String, String)> = Vec::new();

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.to_string();

        if key == "xmlns" {
            namespaces.push(NamespaceDecl {
                prefix: String::new(),
                uri: value,
                pos,
            });
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push(NamespaceDecl {
                prefix: prefix.to_string(),
                uri: value,
                pos,
            });
        } else {
            plain_attrs.push((key, value));
        }
    }

    // This element's own declarations are in scope for its name and
    // attributes.
    scopes.push(
        namespaces
            .iter()
            .map(|ns| (ns.prefix.clone(), ns.uri.clone()))
            .collect(),
    );

    let raw_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let (name, namespace_uri) = resolve_name(&raw_name, scopes);

    let attributes = plain_attrs
        .into_iter()
        .map(|(key, value)| {
            let (name, namespace_uri) = resolve_name(&key, scopes);
            Attribute {
                name,
                namespace_uri,
                value,
                resource_id: None,
                compiled_value: None,
            }
        })
        .collect();

    Ok(Element {
        name,
        namespace_uri,
        namespaces,
        attributes,
        children: Vec::new(),
        pos,
    })
}

/// Splits a possibly-prefixed name and resolves the prefix against the
/// innermost matching scope. An undeclared prefix leaves the name intact
/// with no namespace.
fn resolve_name(raw: &str, scopes: &[Vec<(String, String)>]) -> (String, String) {
    let Some((prefix, local)) = raw.split_once(':') else {
        return (raw.to_string(), String::new());
    };
    for scope in scopes.iter().rev() {
        if let Some((_, uri)) = scope.iter().rev().find(|(p, _)| p == prefix) {
            return (local.to_string(), uri.clone());
        }
    }
    (raw.to_string(), String::new())
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(Error::invalid_resource("document has multiple root elements"))
    }
}
