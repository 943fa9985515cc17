use xfa_xml::NodeId;

use crate::element::XfaElement;

/// Content classification of a data-packet node.
///
/// Stored at construction time rather than derived on demand: layout and
/// binding query it repeatedly. A node is `Value` if and only if it had no
/// element children in the source XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// Container of further data nodes.
    Group,
    /// Leaf scalar carrying an optional text value.
    Value,
}

/// One node of the typed output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNode {
    /// Element kind from the fixed vocabulary, `Unknown` for extensions.
    pub element: XfaElement,
    /// Raw tag name, namespace prefix stripped when the data transform ran.
    pub name: String,
    /// Attributes in source order, values uninterpreted at this stage.
    pub attributes: Vec<(String, String)>,
    /// Children in source sibling order. The order is semantically
    /// significant to layout and must never be rearranged.
    pub children: Vec<FormNode>,
    /// Data-packet classification; `None` for every other packet.
    pub shape: Option<ContentShape>,
    /// Retained text payload (scalar value for data `Value` nodes).
    pub value: Option<String>,
    /// Handle of the source XML element, valid while the caller keeps the
    /// source tree alive.
    pub source: Option<NodeId>,
}

impl FormNode {
    /// Create a detached node with no attributes or children.
    pub fn new(element: XfaElement, name: impl Into<String>) -> FormNode {
        FormNode {
            element,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            shape: None,
            value: None,
            source: None,
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child whose raw tag name matches.
    pub fn child_named(&self, name: &str) -> Option<&FormNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Whether this is a data-packet leaf scalar.
    pub fn is_data_value(&self) -> bool {
        self.shape == Some(ContentShape::Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_helpers() {
        let mut node = FormNode::new(XfaElement::Subform, "subform");
        node.attributes.push(("name".into(), "root".into()));
        node.children.push(FormNode::new(XfaElement::Field, "field"));
        assert_eq!(node.attribute("name"), Some("root"));
        assert_eq!(node.attribute("missing"), None);
        assert!(node.child_named("field").is_some());
        assert!(!node.is_data_value());
    }
}
