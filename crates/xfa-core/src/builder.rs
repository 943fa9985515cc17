use tracing::debug;
use xfa_xml::{XmlDocument, XmlElement, XmlInstruction, XmlNode};

use crate::document::Document;
use crate::element::XfaElement;
use crate::error::ParseError;
use crate::node::{ContentShape, FormNode};
use crate::packet::{PacketFlags, PacketType};

/// Hard ceiling on construction depth, counted in descents below the packet
/// root. Input must never be able to raise it.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Transcribes one packet of a generic XML tree into typed form nodes.
///
/// A builder is bound to one destination [`Document`] and borrows the source
/// tree only for the duration of a build call; the caller keeps the tree
/// alive for as long as any [`FormNode::source`] handle may still be
/// resolved. Config-packet flags are committed to the document atomically
/// with success, so a failed build leaves the document exactly as it was.
#[derive(Debug)]
pub struct DocumentBuilder<'a> {
    doc: &'a mut Document,
    depth: usize,
    pending_scripting: bool,
    pending_strict_scoping: bool,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(doc: &'a mut Document) -> DocumentBuilder<'a> {
        DocumentBuilder {
            doc,
            depth: 0,
            pending_scripting: false,
            pending_strict_scoping: false,
        }
    }

    /// Build a whole document description: the XDP wrapper and every packet
    /// it aggregates.
    pub fn build(&mut self, xml: &XmlDocument) -> Result<FormNode, ParseError> {
        self.build_packet(xml, PacketType::Xdp)
    }

    /// Build one packet from the tree's root element.
    ///
    /// Returns the detached root form node; attaching it to the document is
    /// the caller's move. On any failure no node is returned and the
    /// document, flags included, is untouched.
    pub fn build_packet(
        &mut self,
        xml: &XmlDocument,
        packet: PacketType,
    ) -> Result<FormNode, ParseError> {
        self.depth = 0;
        self.pending_scripting = false;
        self.pending_strict_scoping = false;

        let root = xml.root_element().ok_or_else(|| {
            ParseError::MalformedPacket("document has no root element".into())
        })?;
        let node = self.dispatch(root, packet)?;

        if self.pending_scripting {
            self.doc.set_scripting();
        }
        if self.pending_strict_scoping {
            self.doc.set_strict_scoping();
        }
        debug!(?packet, root = %node.name, "packet built");
        Ok(node)
    }

    fn dispatch(&mut self, root: &XmlElement, packet: PacketType) -> Result<FormNode, ParseError> {
        let info = packet.info();
        if info.flags.contains(PacketFlags::COMPLETE_MATCH) && root.local_name() != info.name {
            return Err(ParseError::MalformedPacket(format!(
                "expected <{}> root, found <{}>",
                info.name, root.name
            )));
        }
        debug!(?packet, root = %root.name, "dispatching packet");
        match packet {
            PacketType::Xdp => self.build_xdp(root),
            PacketType::Config => self.build_config(root),
            PacketType::Data => self.build_data(root),
            PacketType::Template
            | PacketType::Form
            | PacketType::LocaleSet
            | PacketType::ConnectionSet
            | PacketType::SourceSet
            | PacketType::Xdc
            | PacketType::User => {
                self.normal_loader(root, info.flags.contains(PacketFlags::ATTRIBUTES))
            }
        }
    }

    /// The XDP wrapper: re-dispatch each recognized sub-section to its own
    /// packet rule, route everything else through the user rule.
    fn build_xdp(&mut self, root: &XmlElement) -> Result<FormNode, ParseError> {
        let mut node = FormNode::new(XfaElement::Xdp, root.name.clone());
        node.source = Some(root.id);
        node.attributes = root.attributes.clone();

        // Config goes first regardless of position: its instruction flags
        // must be pending before any sibling packet is constructed.
        let config = root
            .child_elements()
            .find(|child| PacketType::for_element(child.local_name()) == Some(PacketType::Config));
        let config_id = config.map(|element| element.id);
        let mut seen = Vec::new();
        if let Some(config) = config {
            node.children.push(self.dispatch(config, PacketType::Config)?);
            seen.push(PacketType::Config);
        }

        for child in root.child_elements() {
            if Some(child.id) == config_id {
                continue;
            }
            match PacketType::for_element(child.local_name()) {
                Some(packet) => {
                    if seen.contains(&packet) {
                        return Err(ParseError::MalformedPacket(format!(
                            "duplicate {} packet",
                            packet.info().name
                        )));
                    }
                    seen.push(packet);
                    node.children.push(self.dispatch(child, packet)?);
                }
                None => node.children.push(self.dispatch(child, PacketType::User)?),
            }
        }

        if !seen.contains(&PacketType::Template) {
            return Err(ParseError::MalformedPacket(
                "missing mandatory template packet".into(),
            ));
        }
        Ok(node)
    }

    fn build_config(&mut self, root: &XmlElement) -> Result<FormNode, ParseError> {
        // Instructions anywhere in the packet, in document order, before
        // node construction.
        self.interpret_instructions(root);
        self.normal_loader(root, true)
    }

    /// Work-list walk of the packet subtree; instructions apply in document
    /// order and the walk itself cannot recurse on attacker-deep input.
    fn interpret_instructions(&mut self, root: &XmlElement) {
        let mut work: Vec<&XmlNode> = root.children.iter().rev().collect();
        while let Some(item) = work.pop() {
            match item {
                XmlNode::Instruction(pi) => self.apply_instruction(pi),
                XmlNode::Element(element) => work.extend(element.children.iter().rev()),
                XmlNode::Text(_) => {}
            }
        }
    }

    fn apply_instruction(&mut self, pi: &XmlInstruction) {
        match pi.target.as_str() {
            "originalXFAVersion" => {
                if version_token_enables_scripting(&pi.data) {
                    debug!("scripting enabled by originalXFAVersion instruction");
                    self.pending_scripting = true;
                }
            }
            "acrobat" => {
                let tokens: Vec<&str> = pi.data.split_whitespace().collect();
                if tokens == ["JavaScript", "strictScoping"] {
                    debug!("strict scoping enabled by acrobat instruction");
                    self.pending_strict_scoping = true;
                }
            }
            // Unknown targets and unmatched payloads are ignored, keeping
            // forward compatibility with newer instruction vocabularies.
            _ => {}
        }
    }

    /// General XML-to-form-node transcription used by every packet except
    /// the data packet: tag names always copied, attributes only under
    /// attribute-driven parsing, children in document order, direct text
    /// retained unparsed.
    fn normal_loader(
        &mut self,
        element: &XmlElement,
        use_attribute: bool,
    ) -> Result<FormNode, ParseError> {
        let mut node = FormNode::new(
            XfaElement::from_name(element.local_name()),
            element.name.clone(),
        );
        node.source = Some(element.id);
        if use_attribute {
            node.attributes = element.attributes.clone();
        }

        let mut text = String::new();
        for child in &element.children {
            match child {
                XmlNode::Element(child) => {
                    self.enter()?;
                    let built = self.normal_loader(child, use_attribute);
                    self.leave();
                    node.children.push(built?);
                }
                XmlNode::Text(run) => text.push_str(run),
                // Config instructions were consumed by the pre-pass; in any
                // other packet they carry no construction meaning.
                XmlNode::Instruction(_) => {}
            }
        }
        if !text.is_empty() {
            node.value = Some(text);
        }
        Ok(node)
    }

    /// The datasets packet: records usually live in a nested,
    /// namespace-qualified data section, in which case the loader runs with
    /// the name transform; a bare datasets tree is loaded as-is.
    fn build_data(&mut self, root: &XmlElement) -> Result<FormNode, ParseError> {
        match root
            .child_elements()
            .find(|child| child.local_name() == "data")
        {
            Some(data) => self.data_loader(data, true),
            None => self.data_loader(root, false),
        }
    }

    fn data_loader(
        &mut self,
        element: &XmlElement,
        do_transform: bool,
    ) -> Result<FormNode, ParseError> {
        // Transform strictly before attribute copying and classification.
        let name = if do_transform {
            canonical_name(&element.name)
        } else {
            element.name.clone()
        };
        let mut node = FormNode::new(XfaElement::Unknown, name);
        node.source = Some(element.id);
        // Data attributes are application-defined: copied as opaque strings,
        // never validated here.
        node.attributes = element
            .attributes
            .iter()
            .map(|(key, value)| {
                let key = if do_transform {
                    canonical_name(key)
                } else {
                    key.clone()
                };
                (key, value.clone())
            })
            .collect();

        let mut text = String::new();
        for child in &element.children {
            match child {
                XmlNode::Element(child) => {
                    self.enter()?;
                    let built = self.data_loader(child, do_transform);
                    self.leave();
                    node.children.push(built?);
                }
                XmlNode::Text(run) => {
                    // Whitespace between element children never forces a
                    // Value classification.
                    if !run.trim().is_empty() {
                        text.push_str(run);
                    }
                }
                XmlNode::Instruction(_) => {}
            }
        }

        if node.children.is_empty() {
            node.element = XfaElement::DataValue;
            node.shape = Some(ContentShape::Value);
            if !text.is_empty() {
                node.value = Some(text);
            }
        } else {
            node.element = XfaElement::DataGroup;
            node.shape = Some(ContentShape::Group);
        }
        Ok(node)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            return Err(ParseError::RecursionLimitExceeded);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// `originalXFAVersion` payload check: an XFA schema URI followed by a
/// `v<major>.<minor>-scripting:<0|1>` token, where only `:1` enables
/// scripting. Any other shape is ignored.
fn version_token_enables_scripting(data: &str) -> bool {
    let mut tokens = data.split_whitespace();
    let Some(uri) = tokens.next() else {
        return false;
    };
    if !uri.starts_with("http://www.xfa.org/schema/") {
        return false;
    }
    let Some(version) = tokens.next() else {
        return false;
    };
    let Some(version) = version.strip_prefix('v') else {
        return false;
    };
    let Some((number, scripting)) = version.split_once("-scripting:") else {
        return false;
    };
    let mut parts = number.split('.');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
    );
    well_formed && scripting == "1"
}

fn canonical_name(name: &str) -> String {
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.to_string(),
    }
}
