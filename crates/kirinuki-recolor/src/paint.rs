//! Paint operations over tagged layers: flat fills, linear gradients,
//! and soft-light overlays.
//!
//! Every operation resolves the layer through the tree's name index and
//! rewrites attributes only — geometry is never touched. Gradient
//! definitions live as ordinary nodes under a `defs` element so the
//! whole document stays one serializable tree.

use std::fmt;

use crate::RecolorError;
use crate::tree::{NodeId, RenderTree};

/// An opaque RGB color, formatted as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from RGB channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Direction of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientOrientation {
    /// Left-to-right.
    Horizontal,
    /// Top-to-bottom.
    Vertical,
}

/// One gradient stop: an offset in `[0, 1]` and a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0 at the start, 1.0 at the end.
    pub offset: f32,
    /// Stop color.
    pub color: Color,
}

/// Set a flat fill color on every node of a layer.
///
/// A previously-applied gradient reference is overwritten since `fill`
/// is a single attribute.
///
/// # Errors
///
/// Returns [`RecolorError::UnknownLayer`] if the layer does not exist.
pub fn set_fill(tree: &mut RenderTree, layer: &str, color: Color) -> Result<(), RecolorError> {
    let ids = tree.layer_nodes(layer)?.to_vec();
    for id in ids {
        tree.set_attribute(id, "fill", &color.to_string());
    }
    Ok(())
}

/// Set a linear gradient fill on every node of a layer.
///
/// The gradient is materialized as a `linearGradient` definition under
/// the document's `defs` element with a deterministic id derived from
/// the layer name; layer nodes reference it via `fill="url(#...)"`.
/// Calling again for the same layer rewrites the existing definition.
///
/// # Errors
///
/// Returns [`RecolorError::UnknownLayer`] if the layer does not exist
/// and [`RecolorError::EmptyGradient`] if `stops` is empty.
pub fn set_gradient(
    tree: &mut RenderTree,
    layer: &str,
    stops: &[GradientStop],
    orientation: GradientOrientation,
) -> Result<(), RecolorError> {
    if stops.is_empty() {
        return Err(RecolorError::EmptyGradient);
    }
    let ids = tree.layer_nodes(layer)?.to_vec();

    let gradient_id = format!("grad-{layer}");
    let gradient = upsert_gradient_def(tree, &gradient_id);

    let (x2, y2) = match orientation {
        GradientOrientation::Horizontal => ("100%", "0%"),
        GradientOrientation::Vertical => ("0%", "100%"),
    };
    tree.set_attribute(gradient, "x1", "0%");
    tree.set_attribute(gradient, "y1", "0%");
    tree.set_attribute(gradient, "x2", x2);
    tree.set_attribute(gradient, "y2", y2);

    for stop in stops {
        let node = tree.add_child(gradient, "stop");
        let offset = stop.offset.clamp(0.0, 1.0) * 100.0;
        tree.set_attribute(node, "offset", &format!("{offset}%"));
        tree.set_attribute(node, "stop-color", &stop.color.to_string());
    }

    for id in ids {
        tree.set_attribute(id, "fill", &format!("url(#{gradient_id})"));
    }
    Ok(())
}

/// Attach a soft-light blend overlay with the given color and opacity
/// to every node of a layer.
///
/// Each layer node gains (or updates) one overlay child tagged with a
/// `data-overlay` marker, carrying `mix-blend-mode: soft-light` plus
/// the fill and opacity. Repeat calls update the overlay in place.
///
/// # Errors
///
/// Returns [`RecolorError::UnknownLayer`] if the layer does not exist.
pub fn set_soft_light_overlay(
    tree: &mut RenderTree,
    layer: &str,
    color: Color,
    opacity: f32,
) -> Result<(), RecolorError> {
    let ids = tree.layer_nodes(layer)?.to_vec();
    let opacity = opacity.clamp(0.0, 1.0);

    for id in ids {
        let overlay = existing_overlay(tree, id).unwrap_or_else(|| {
            let node = tree.add_child(id, "g");
            tree.set_attribute(node, "data-overlay", "");
            node
        });
        tree.set_attribute(overlay, "style", "mix-blend-mode:soft-light");
        tree.set_attribute(overlay, "fill", &color.to_string());
        tree.set_attribute(overlay, "fill-opacity", &format!("{opacity}"));
    }
    Ok(())
}

/// Find or create the `linearGradient` definition with the given id
/// under the document's `defs` element. Reusing an existing definition
/// clears its stops.
fn upsert_gradient_def(tree: &mut RenderTree, gradient_id: &str) -> NodeId {
    let root = tree.root();
    let defs = tree
        .node(root)
        .children()
        .iter()
        .copied()
        .find(|&id| tree.node(id).element() == "defs")
        .unwrap_or_else(|| tree.add_child(root, "defs"));

    let existing = tree
        .node(defs)
        .children()
        .iter()
        .copied()
        .find(|&id| tree.node(id).attribute("id") == Some(gradient_id));

    match existing {
        Some(node) => {
            tree.clear_children(node);
            node
        }
        None => {
            let node = tree.add_child(defs, "linearGradient");
            tree.set_attribute(node, "id", gradient_id);
            node
        }
    }
}

fn existing_overlay(tree: &RenderTree, parent: NodeId) -> Option<NodeId> {
    tree.node(parent)
        .children()
        .iter()
        .copied()
        .find(|&id| tree.node(id).attribute("data-overlay").is_some())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tree_with_layer(layer: &str) -> (RenderTree, NodeId) {
        let mut tree = RenderTree::new("svg");
        let node = tree.add_child(tree.root(), "path");
        tree.tag_layer(node, layer);
        (tree, node)
    }

    #[test]
    fn color_formats_as_lowercase_hex() {
        assert_eq!(Color::new(255, 0, 171).to_string(), "#ff00ab");
        assert_eq!(Color::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn set_fill_rewrites_the_fill_attribute() {
        let (mut tree, node) = tree_with_layer("cap");
        set_fill(&mut tree, "cap", Color::new(18, 52, 86)).unwrap();
        assert_eq!(tree.node(node).attribute("fill"), Some("#123456"));
    }

    #[test]
    fn set_fill_covers_every_node_of_the_layer() {
        let mut tree = RenderTree::new("svg");
        let a = tree.add_child(tree.root(), "path");
        let b = tree.add_child(tree.root(), "path");
        tree.tag_layer(a, "hair");
        tree.tag_layer(b, "hair");
        set_fill(&mut tree, "hair", Color::new(1, 2, 3)).unwrap();
        assert_eq!(tree.node(a).attribute("fill"), Some("#010203"));
        assert_eq!(tree.node(b).attribute("fill"), Some("#010203"));
    }

    #[test]
    fn unknown_layer_is_rejected() {
        let (mut tree, _) = tree_with_layer("cap");
        let err = set_fill(&mut tree, "boots", Color::new(0, 0, 0)).unwrap_err();
        assert!(matches!(err, RecolorError::UnknownLayer(name) if name == "boots"));
    }

    #[test]
    fn gradient_creates_def_and_reference() {
        let (mut tree, node) = tree_with_layer("sky");
        let stops = [
            GradientStop {
                offset: 0.0,
                color: Color::new(0, 0, 255),
            },
            GradientStop {
                offset: 1.0,
                color: Color::new(255, 255, 255),
            },
        ];
        set_gradient(&mut tree, "sky", &stops, GradientOrientation::Vertical).unwrap();

        assert_eq!(tree.node(node).attribute("fill"), Some("url(#grad-sky)"));

        let root = tree.root();
        let defs = tree.node(root).children()[1];
        assert_eq!(tree.node(defs).element(), "defs");
        let gradient = tree.node(defs).children()[0];
        assert_eq!(tree.node(gradient).attribute("id"), Some("grad-sky"));
        assert_eq!(tree.node(gradient).attribute("x2"), Some("0%"));
        assert_eq!(tree.node(gradient).attribute("y2"), Some("100%"));
        assert_eq!(tree.node(gradient).children().len(), 2);

        let first_stop = tree.node(gradient).children()[0];
        assert_eq!(tree.node(first_stop).attribute("offset"), Some("0%"));
        assert_eq!(
            tree.node(first_stop).attribute("stop-color"),
            Some("#0000ff"),
        );
    }

    #[test]
    fn horizontal_gradient_points_along_x() {
        let (mut tree, _) = tree_with_layer("sea");
        let stops = [GradientStop {
            offset: 0.5,
            color: Color::new(9, 9, 9),
        }];
        set_gradient(&mut tree, "sea", &stops, GradientOrientation::Horizontal).unwrap();
        let defs = tree.node(tree.root()).children()[1];
        let gradient = tree.node(defs).children()[0];
        assert_eq!(tree.node(gradient).attribute("x2"), Some("100%"));
        assert_eq!(tree.node(gradient).attribute("y2"), Some("0%"));
    }

    #[test]
    fn empty_gradient_is_rejected() {
        let (mut tree, _) = tree_with_layer("sky");
        let err =
            set_gradient(&mut tree, "sky", &[], GradientOrientation::Horizontal).unwrap_err();
        assert!(matches!(err, RecolorError::EmptyGradient));
    }

    #[test]
    fn regradient_replaces_stops_instead_of_accumulating() {
        let (mut tree, _) = tree_with_layer("sky");
        let two = [
            GradientStop {
                offset: 0.0,
                color: Color::new(0, 0, 0),
            },
            GradientStop {
                offset: 1.0,
                color: Color::new(255, 255, 255),
            },
        ];
        set_gradient(&mut tree, "sky", &two, GradientOrientation::Vertical).unwrap();
        let one = [GradientStop {
            offset: 0.0,
            color: Color::new(128, 128, 128),
        }];
        set_gradient(&mut tree, "sky", &one, GradientOrientation::Horizontal).unwrap();

        let defs = tree.node(tree.root()).children()[1];
        assert_eq!(tree.node(defs).children().len(), 1, "one def per layer");
        let gradient = tree.node(defs).children()[0];
        assert_eq!(tree.node(gradient).children().len(), 1);
        assert_eq!(tree.node(gradient).attribute("x2"), Some("100%"));
    }

    #[test]
    fn overlay_is_added_once_and_updated_in_place() {
        let (mut tree, node) = tree_with_layer("figure");
        set_soft_light_overlay(&mut tree, "figure", Color::new(255, 0, 0), 0.4).unwrap();
        set_soft_light_overlay(&mut tree, "figure", Color::new(0, 255, 0), 0.9).unwrap();

        let overlays: Vec<_> = tree
            .node(node)
            .children()
            .iter()
            .copied()
            .filter(|&id| tree.node(id).attribute("data-overlay").is_some())
            .collect();
        assert_eq!(overlays.len(), 1);
        let overlay = tree.node(overlays[0]);
        assert_eq!(overlay.attribute("style"), Some("mix-blend-mode:soft-light"));
        assert_eq!(overlay.attribute("fill"), Some("#00ff00"));
        assert_eq!(overlay.attribute("fill-opacity"), Some("0.9"));
    }

    #[test]
    fn overlay_opacity_is_clamped() {
        let (mut tree, node) = tree_with_layer("figure");
        set_soft_light_overlay(&mut tree, "figure", Color::new(0, 0, 0), 7.0).unwrap();
        let overlay = tree.node(node).children()[0];
        assert_eq!(tree.node(overlay).attribute("fill-opacity"), Some("1"));
    }
}
