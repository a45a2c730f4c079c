//! XML decoding for Pinboard responses.
//!
//! Every response body is decoded into a generic [`XmlNode`] tree first.
//! Operation-specific mapping into domain types lives in [`mapping`], and the
//! attribute coercions it relies on live in [`coerce`].

pub mod coerce;
pub mod mapping;

use crate::error::{PinboardError, ResponseError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// A decoded XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name.
    pub name: String,
    /// Attributes, unescaped.
    pub attributes: BTreeMap<String, String>,
    /// Concatenated text and CDATA content, if any.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an empty element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Get an attribute value or fail with a parse error.
    pub fn required_attr(&self, name: &str) -> Result<&str, ResponseError> {
        self.attr(name).ok_or_else(|| ResponseError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child with the given name; empty elements yield `""`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_deref().unwrap_or(""))
    }

    /// Text of a required child element.
    pub fn required_child_text(&self, name: &str) -> Result<&str, ResponseError> {
        self.child_text(name).ok_or_else(|| ResponseError::MissingElement {
            element: self.name.clone(),
            child: name.to_string(),
        })
    }

    fn push_text(&mut self, text: &str) {
        match self.text.as_mut() {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// Parse a response body into its root element.
///
/// Empty input, a missing root, several roots, stray top-level text and
/// unbalanced tags are all parse errors.
pub fn parse_document(xml: &str) -> Result<XmlNode, PinboardError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                ensure_single_root(&root, &stack)?;
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                ensure_single_root(&root, &stack)?;
                let node = element_from_start(&e)?;
                attach(node, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| parse_error("unmatched closing tag"))?;
                attach(node, &mut stack, &mut root);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| parse_error(e.to_string()))?;
                // Indentation between elements; text with content stays verbatim.
                if text.trim().is_empty() {
                    continue;
                }
                match stack.last_mut() {
                    Some(node) => node.push_text(&text),
                    None => return Err(parse_error("text outside of the root element")),
                }
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = std::str::from_utf8(&raw).map_err(|e| parse_error(e.to_string()))?;
                match stack.last_mut() {
                    Some(node) => node.push_text(&text),
                    None => return Err(parse_error("CDATA outside of the root element")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(e.to_string())),
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(parse_error(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| parse_error("document has no root element"))
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlNode, PinboardError> {
    let mut node = XmlNode::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|e| parse_error(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(e.to_string()))?
            .to_string();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn ensure_single_root(root: &Option<XmlNode>, stack: &[XmlNode]) -> Result<(), PinboardError> {
    if root.is_some() && stack.is_empty() {
        return Err(parse_error("multiple root elements"));
    }
    Ok(())
}

fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn parse_error(message: impl Into<String>) -> PinboardError {
    PinboardError::Response(ResponseError::XmlParse {
        message: message.into(),
    })
}
