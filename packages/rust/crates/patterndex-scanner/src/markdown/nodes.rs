use comrak::nodes::{AstNode, NodeValue};

pub(super) fn node_line(node: &AstNode<'_>) -> usize {
    node.data.borrow().sourcepos.start.line.max(1)
}

fn push_text_from_node<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(value) => out.push_str(value),
        NodeValue::Code(value) => out.push_str(&value.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        NodeValue::Paragraph | NodeValue::Item(_) | NodeValue::TableCell => {
            for child in node.children() {
                push_text_from_node(child, out);
            }
            out.push(' ');
        }
        _ => {
            for child in node.children() {
                push_text_from_node(child, out);
            }
        }
    }
}

/// Plain text of a node's descendants, whitespace collapsed.
pub(super) fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        push_text_from_node(child, &mut out);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
