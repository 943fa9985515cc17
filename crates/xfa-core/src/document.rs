use crate::node::FormNode;

/// The destination document a builder is bound to.
///
/// Owns the two document-wide behavior flags and, once a build succeeds and
/// the caller attaches it, the root of the typed tree. The flags default to
/// false and are set-only: a later build whose config packet carries no
/// matching instruction leaves them as they are.
#[derive(Debug, Default)]
pub struct Document {
    scripting: bool,
    strict_scoping: bool,
    root: Option<FormNode>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Whether a config packet enabled scripting for this document.
    pub fn is_scripting(&self) -> bool {
        self.scripting
    }

    /// Whether a config packet requested strict name scoping.
    pub fn is_strict_scoping(&self) -> bool {
        self.strict_scoping
    }

    pub fn set_scripting(&mut self) {
        self.scripting = true;
    }

    pub fn set_strict_scoping(&mut self) {
        self.strict_scoping = true;
    }

    /// The attached root form node, if any build has been committed.
    pub fn root(&self) -> Option<&FormNode> {
        self.root.as_ref()
    }

    /// Attach a built tree to the document, replacing any previous one.
    pub fn set_root(&mut self, root: FormNode) {
        self.root = Some(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::XfaElement;

    #[test]
    fn flags_default_false_and_are_sticky() {
        let mut doc = Document::new();
        assert!(!doc.is_scripting());
        assert!(!doc.is_strict_scoping());
        doc.set_scripting();
        assert!(doc.is_scripting());
        assert!(!doc.is_strict_scoping());
    }

    #[test]
    fn root_attachment() {
        let mut doc = Document::new();
        assert!(doc.root().is_none());
        doc.set_root(FormNode::new(XfaElement::Xdp, "xdp"));
        assert_eq!(doc.root().map(|n| n.name.as_str()), Some("xdp"));
    }
}
