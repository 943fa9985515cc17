#![cfg_attr(docsrs, feature(doc_cfg))]
//! High level XFA facade that re-exports the workspace crates and provides
//! string-in, tree-out entry points.
//!
//! ```rust
//! use xfa::{load_document, Document};
//!
//! let input = r#"
//!     <xdp:xdp>
//!       <config>
//!         <?acrobat JavaScript strictScoping ?>
//!       </config>
//!       <template><subform name="root"/></template>
//!     </xdp:xdp>"#;
//!
//! let mut doc = Document::new();
//! let root = load_document(&mut doc, input).expect("build form tree");
//! assert_eq!(root.children.len(), 2);
//! assert!(doc.is_strict_scoping());
//! doc.set_root(root);
//! ```

pub use xfa_core as core;
pub use xfa_xml as xml;

pub use xfa_core::{
    ContentShape, Document, DocumentBuilder, FormNode, PacketType, ParseError, XfaElement,
};
pub use xfa_xml::{XmlDocument, XmlError};

use thiserror::Error;
use tracing::debug;

/// Error type produced by the facade entry points.
#[derive(Debug, Error)]
pub enum XfaError {
    /// The input never became a generic XML tree.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// The tree was not a valid packet of the requested type.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parse `input` and build the whole document description (the XDP wrapper
/// and every packet it aggregates).
///
/// The returned root node is detached; attach it with
/// [`Document::set_root`] once the caller is done inspecting it.
pub fn load_document(doc: &mut Document, input: &str) -> Result<FormNode, XfaError> {
    load_packet(doc, input, PacketType::Xdp)
}

/// Parse `input` and build a single packet of the given type.
pub fn load_packet(
    doc: &mut Document,
    input: &str,
    packet: PacketType,
) -> Result<FormNode, XfaError> {
    let xml = xml::parse(input)?;
    debug!(?packet, elements = xml.element_count(), "loading packet");
    let node = DocumentBuilder::new(doc).build_packet(&xml, packet)?;
    Ok(node)
}

/// Like [`load_packet`], with the packet selected by name (`"config"`,
/// `"template"`, `"datasets"`, ...). Unknown names fail with
/// [`ParseError::UnsupportedPacketType`].
pub fn load_packet_named(
    doc: &mut Document,
    input: &str,
    packet_name: &str,
) -> Result<FormNode, XfaError> {
    let packet = PacketType::from_name(packet_name)
        .ok_or_else(|| ParseError::UnsupportedPacketType(packet_name.to_string()))?;
    load_packet(doc, input, packet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_node() {
        let mut doc = Document::new();
        let err = load_packet(&mut doc, "", PacketType::Config).unwrap_err();
        assert!(matches!(err, XfaError::Parse(ParseError::MalformedPacket(_))));
        assert!(doc.root().is_none());
    }

    #[test]
    fn lexically_broken_input_fails_upstream() {
        let mut doc = Document::new();
        let err = load_packet(&mut doc, "<<<>bar?>>>>>>>", PacketType::Config).unwrap_err();
        assert!(matches!(err, XfaError::Xml(XmlError::Syntax(_))));
        assert!(doc.root().is_none());
    }

    #[test]
    fn packet_by_name() {
        let mut doc = Document::new();
        let node = load_packet_named(&mut doc, "<config/>", "config").expect("build config");
        assert_eq!(node.element, XfaElement::Config);
    }

    #[test]
    fn unknown_packet_name_is_unsupported() {
        let mut doc = Document::new();
        let err = load_packet_named(&mut doc, "<config/>", "blueprints").unwrap_err();
        assert!(matches!(
            err,
            XfaError::Parse(ParseError::UnsupportedPacketType(name)) if name == "blueprints"
        ));
    }

    #[test]
    fn document_roundtrip() {
        let input = "<xdp>\
             <template><subform name=\"root\"><field name=\"f1\"/></subform></template>\
             <datasets><xfa:data><xfa:f1>42</xfa:f1></xfa:data></datasets>\
             </xdp>";
        let mut doc = Document::new();
        let root = load_document(&mut doc, input).expect("build document");
        assert_eq!(root.children.len(), 2);
        let data = root.child_named("data").expect("data packet");
        assert_eq!(data.children[0].value.as_deref(), Some("42"));
        doc.set_root(root);
        assert!(doc.root().is_some());
    }
}
