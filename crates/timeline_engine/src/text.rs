use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Node};

/// Flattens a subtree to plain text.
///
/// Text nodes contribute their content. An element with an `alt` attribute
/// contributes that value *instead of* its children, which is how image
/// emoji end up as their glyph. Other elements and document roots
/// concatenate their children without separators. Comments and the like
/// contribute nothing.
///
/// The walk is iterative, so nesting depth is bounded by memory, not stack.
pub fn text_of(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    // Set while inside an `alt` element whose children must not be read.
    let mut skipping: Option<NodeId> = None;
    for edge in node.traverse() {
        match edge {
            Edge::Open(current) => {
                if skipping.is_some() {
                    continue;
                }
                match current.value() {
                    Node::Text(text) => out.push_str(text),
                    Node::Element(element) => {
                        if let Some(alt) = element.attr("alt") {
                            out.push_str(alt);
                            skipping = Some(current.id());
                        }
                    }
                    _ => {}
                }
            }
            Edge::Close(current) => {
                if skipping == Some(current.id()) {
                    skipping = None;
                }
            }
        }
    }
    out
}

pub fn element_text(element: ElementRef<'_>) -> String {
    text_of(*element)
}
