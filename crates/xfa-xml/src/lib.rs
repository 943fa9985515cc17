//! Generic XML node tree for XFA packet content, built with quick-xml.
//!
//! The packet builder in `xfa-core` consumes a fully parsed tree, never raw
//! bytes. This crate owns that tree: an ordered hierarchy of elements, text
//! runs, and processing instructions. Parsing is event driven with an
//! explicit open-element stack, so arbitrarily deep input cannot exhaust the
//! host stack at this layer.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

/// Error type produced when loading a generic XML tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Lexically broken input: garbage tokens, mismatched or unterminated tags.
    #[error("xml syntax: {0}")]
    Syntax(String),
    /// Well-formed tokens arranged in a shape the tree cannot represent.
    #[error("invalid document: {0}")]
    Invalid(String),
}

/// Handle assigned to every element in document order during parsing.
///
/// Typed nodes built from this tree keep the id of their source element so
/// diagnostics can resolve back into the tree while the caller keeps it
/// alive. The id is meaningless once the tree is dropped.
pub type NodeId = usize;

/// One node of the generic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// An element with attributes and ordered children.
    Element(XmlElement),
    /// A run of character data directly under an element.
    Text(String),
    /// A processing instruction (`<?target payload?>`).
    Instruction(XmlInstruction),
}

impl XmlNode {
    /// Returns `Some(&XmlElement)` if this node is an element.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An element node: qualified tag name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Document-order handle, see [`NodeId`].
    pub id: NodeId,
    /// Tag name as written, namespace prefix included.
    pub name: String,
    /// Attributes in document order. Values are unescaped but otherwise
    /// uninterpreted.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Tag name with any namespace prefix removed (`xfa:data` -> `data`).
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Look up an attribute value by its full name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over child elements, skipping text and instructions.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Concatenated text directly under this element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlNode::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }
}

/// A processing instruction with its target and raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlInstruction {
    /// Instruction target (`acrobat` in `<?acrobat ...?>`).
    pub target: String,
    /// Everything after the target, surrounding whitespace trimmed.
    pub data: String,
}

/// The parsed document: top-level nodes plus element bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDocument {
    /// Top-level nodes in document order. At most one element.
    pub children: Vec<XmlNode>,
    elements: usize,
}

impl XmlDocument {
    /// The document's root element, if the input had one.
    pub fn root_element(&self) -> Option<&XmlElement> {
        self.children.iter().find_map(XmlNode::as_element)
    }

    /// Number of elements in the document.
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Resolve an element handle back into the tree (preorder lookup).
    pub fn element_by_id(&self, id: NodeId) -> Option<&XmlElement> {
        if id >= self.elements {
            return None;
        }
        let mut stack: Vec<&XmlNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let XmlNode::Element(element) = node {
                if element.id == id {
                    return Some(element);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        None
    }
}

/// Parse an XML document into a generic node tree.
///
/// Empty input yields a document with no root element; callers decide
/// whether that is an error for their packet. Lexical garbage, mismatched
/// end tags, and input that ends with elements still open all fail with
/// [`XmlError::Syntax`].
pub fn parse(input: &str) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut doc = XmlDocument::default();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut next_id: NodeId = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(event)) => {
                let element = open_element(&event, &mut next_id)?;
                stack.push(element);
            }
            Ok(Event::Empty(event)) => {
                let element = open_element(&event, &mut next_id)?;
                attach(&mut doc, &mut stack, XmlNode::Element(element))?;
            }
            Ok(Event::End(_)) => {
                // quick-xml has already checked that the end tag matches.
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Syntax("end tag without open element".into()))?;
                attach(&mut doc, &mut stack, XmlNode::Element(element))?;
            }
            Ok(Event::Text(event)) => {
                let text = event
                    .unescape()
                    .map_err(|err| XmlError::Syntax(err.to_string()))?;
                if !text.is_empty() {
                    attach(&mut doc, &mut stack, XmlNode::Text(text.into_owned()))?;
                }
            }
            Ok(Event::CData(event)) => {
                let text = String::from_utf8_lossy(&event.into_inner()).into_owned();
                attach(&mut doc, &mut stack, XmlNode::Text(text))?;
            }
            Ok(Event::PI(event)) => {
                let target = String::from_utf8_lossy(event.target()).into_owned();
                let data = String::from_utf8_lossy(event.content())
                    .trim()
                    .to_string();
                attach(
                    &mut doc,
                    &mut stack,
                    XmlNode::Instruction(XmlInstruction { target, data }),
                )?;
            }
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(XmlError::Syntax(err.to_string())),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Syntax(format!(
            "document ended with <{}> still open",
            open.name
        )));
    }

    doc.elements = next_id;
    debug!(elements = doc.elements, "parsed xml document");
    Ok(doc)
}

fn open_element(event: &BytesStart<'_>, next_id: &mut NodeId) -> Result<XmlElement, XmlError> {
    let name = String::from_utf8_lossy(event.name().as_ref()).into_owned();
    if !is_valid_name(&name) {
        return Err(XmlError::Syntax(format!("invalid element name: {name:?}")));
    }
    let mut attributes = Vec::new();
    for attr in event.attributes() {
        let attr = attr.map_err(|err| XmlError::Syntax(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Syntax(err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    let id = *next_id;
    *next_id += 1;
    Ok(XmlElement {
        id,
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    doc: &mut XmlDocument,
    stack: &mut Vec<XmlElement>,
    node: XmlNode,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if matches!(node, XmlNode::Element(_)) && doc.root_element().is_some() {
                return Err(XmlError::Invalid("multiple root elements".into()));
            }
            doc.children.push(node);
        }
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elements_attributes_and_text() {
        let doc = parse(r#"<form><field name="a">hello</field><field name="b"/></form>"#)
            .expect("parse form");
        let root = doc.root_element().expect("root");
        assert_eq!(root.name, "form");
        assert_eq!(root.id, 0);
        let fields: Vec<_> = root.child_elements().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].attribute("name"), Some("a"));
        assert_eq!(fields[0].text(), "hello");
        assert_eq!(fields[1].attribute("name"), Some("b"));
        assert_eq!(doc.element_count(), 3);
    }

    #[test]
    fn node_ids_are_preorder_and_resolvable() {
        let doc = parse("<a><b><c/></b><d/></a>").expect("parse");
        assert_eq!(doc.element_by_id(0).map(|e| e.name.as_str()), Some("a"));
        assert_eq!(doc.element_by_id(1).map(|e| e.name.as_str()), Some("b"));
        assert_eq!(doc.element_by_id(2).map(|e| e.name.as_str()), Some("c"));
        assert_eq!(doc.element_by_id(3).map(|e| e.name.as_str()), Some("d"));
        assert!(doc.element_by_id(4).is_none());
    }

    #[test]
    fn empty_input_has_no_root() {
        let doc = parse("").expect("empty input is not a lexical error");
        assert!(doc.root_element().is_none());
    }

    #[test]
    fn garbage_input_is_a_syntax_error() {
        let err = parse("<<<>bar?>>>>>>>").unwrap_err();
        assert!(matches!(err, XmlError::Syntax(_)));
    }

    #[test]
    fn unterminated_and_mismatched_tags_fail() {
        assert!(matches!(parse("<a><b>"), Err(XmlError::Syntax(_))));
        assert!(matches!(parse("<a></b>"), Err(XmlError::Syntax(_))));
    }

    #[test]
    fn multiple_roots_are_rejected() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, XmlError::Invalid(_)));
    }

    #[test]
    fn processing_instructions_are_retained_in_order() {
        let doc = parse("<config><?acrobat JavaScript strictScoping ?><x/></config>")
            .expect("parse");
        let root = doc.root_element().expect("root");
        match &root.children[0] {
            XmlNode::Instruction(pi) => {
                assert_eq!(pi.target, "acrobat");
                assert_eq!(pi.data, "JavaScript strictScoping");
            }
            other => panic!("expected instruction, got {other:?}"),
        }
        assert!(matches!(root.children[1], XmlNode::Element(_)));
    }

    #[test]
    fn local_name_strips_namespace_prefix() {
        let doc = parse("<xdp:xdp><xfa:data/></xdp:xdp>").expect("parse");
        let root = doc.root_element().expect("root");
        assert_eq!(root.name, "xdp:xdp");
        assert_eq!(root.local_name(), "xdp");
        let child = root.child_elements().next().expect("child");
        assert_eq!(child.local_name(), "data");
    }
}
