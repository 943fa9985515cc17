//! Build a small XDP document and print the resulting form-node tree.
//!
//! Run with `cargo run -p xfa --example dump_tree`.

use xfa::{load_document, Document, FormNode};

const INPUT: &str = r#"
<xdp:xdp>
  <config>
    <?originalXFAVersion http://www.xfa.org/schema/xfa-template/2.7 v2.7-scripting:1 ?>
    <?acrobat JavaScript strictScoping ?>
    <present><pdf><interactive>1</interactive></pdf></present>
  </config>
  <template>
    <subform name="purchaseOrder">
      <field name="item"/>
      <field name="qty"/>
    </subform>
  </template>
  <datasets>
    <xfa:data>
      <xfa:purchaseOrder>
        <xfa:item>widget</xfa:item>
        <xfa:qty>2</xfa:qty>
      </xfa:purchaseOrder>
    </xfa:data>
  </datasets>
</xdp:xdp>"#;

fn dump(node: &FormNode, indent: usize) {
    let pad = "  ".repeat(indent);
    let shape = node
        .shape
        .map(|shape| format!(" [{shape:?}]"))
        .unwrap_or_default();
    let value = node
        .value
        .as_deref()
        .map(|value| format!(" = {value:?}"))
        .unwrap_or_default();
    println!("{pad}<{}> ({:?}){shape}{value}", node.name, node.element);
    for child in &node.children {
        dump(child, indent + 1);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut doc = Document::new();
    let root = load_document(&mut doc, INPUT).expect("build document");
    println!(
        "scripting={} strict_scoping={}",
        doc.is_scripting(),
        doc.is_strict_scoping()
    );
    dump(&root, 0);
    doc.set_root(root);
}
