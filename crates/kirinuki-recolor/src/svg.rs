//! SVG serialization of a recolored render tree.
//!
//! Converts a [`RenderTree`] into an SVG document string using the
//! [`svg`] crate for element construction and XML escaping. Layer names
//! are emitted as `data-layer` attributes so the tagging survives a
//! round trip through external tools.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::Element;
use svg::node::Node as _;

use crate::tree::{NodeId, RenderTree};

/// Serialize the tree into an SVG document string.
///
/// The tree's root node becomes the `<svg>` element; its attributes
/// (e.g. `viewBox`) are copied onto the document. The XML declaration
/// is prepended since the `svg` crate omits it.
#[must_use]
pub fn to_svg(tree: &RenderTree) -> String {
    let root = tree.node(tree.root());

    let mut doc = Document::new();
    for (name, value) in root.attributes() {
        doc = doc.set(name, value);
    }
    if let Some(layer) = root.layer() {
        doc = doc.set("data-layer", layer);
    }
    for &child in root.children() {
        doc = doc.add(build_element(tree, child));
    }

    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

fn build_element(tree: &RenderTree, id: NodeId) -> Element {
    let node = tree.node(id);
    let mut element = Element::new(node.element());
    for (name, value) in node.attributes() {
        element.assign(name, value);
    }
    if let Some(layer) = node.layer() {
        element.assign("data-layer", layer);
    }
    for &child in node.children() {
        element.append(build_element(tree, child));
    }
    element
}
