//! kirinuki-recolor: layer tagging and fill recoloring over a tree of
//! named nodes (sans-IO).
//!
//! The knockout pipeline and this crate are independent collaborators:
//! neither calls the other. This crate models the vector side of the
//! workflow — attach stable names to render-tree nodes, then rewrite
//! their paint attributes:
//!
//! - flat fill colors,
//! - linear gradient fills (N stops, horizontal or vertical),
//! - soft-light blend overlays with an opacity,
//!
//! and finally serialize the tree to an SVG document string. All
//! operations are attribute mutation over an arena-backed tree; no
//! geometry is interpreted.

pub mod paint;
pub mod svg;
pub mod tree;

pub use paint::{Color, GradientOrientation, GradientStop};
pub use svg::to_svg;
pub use tree::{Node, NodeId, RenderTree};

/// Errors from recoloring operations.
#[derive(Debug, thiserror::Error)]
pub enum RecolorError {
    /// The requested layer name is not attached to any node.
    #[error("no layer named {0:?}")]
    UnknownLayer(String),

    /// A gradient fill needs at least one stop.
    #[error("gradient requires at least one stop")]
    EmptyGradient,
}
