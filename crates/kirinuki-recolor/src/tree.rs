//! Arena-backed render tree with stable layer names.
//!
//! Nodes are addressed by [`NodeId`] into a flat arena; children are
//! index lists. Layer lookup goes through an explicit name-to-nodes
//! index built by one traversal, rather than live attribute scans, so
//! repeated recoloring operations never re-walk the tree.

use std::collections::BTreeMap;

use crate::RecolorError;

/// Handle to a node in a [`RenderTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// One element of the render tree: an element name (e.g. `g`, `path`),
/// a flat attribute map, an optional layer name, and child handles.
#[derive(Debug, Clone)]
pub struct Node {
    element: String,
    layer: Option<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(element: &str) -> Self {
        Self {
            element: element.to_owned(),
            layer: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Element name of this node.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// The layer name attached to this node, if any.
    #[must_use]
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in deterministic (sorted) order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child handles in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A tree of named nodes with a layer index.
///
/// The index maps each layer name to the set of nodes tagged with it;
/// it is kept in sync by [`tag_layer`](Self::tag_layer) so queries are
/// a single map lookup.
#[derive(Debug, Clone)]
pub struct RenderTree {
    nodes: Vec<Node>,
    root: NodeId,
    layers: BTreeMap<String, Vec<NodeId>>,
}

impl RenderTree {
    /// Create a tree with a lone root element.
    #[must_use]
    pub fn new(root_element: &str) -> Self {
        Self {
            nodes: vec![Node::new(root_element)],
            root: NodeId(0),
            layers: BTreeMap::new(),
        }
    }

    /// Handle of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new child element under `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeId, element: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(element));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Set an attribute on a node, replacing any previous value.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    /// Remove an attribute from a node.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].attributes.remove(name);
    }

    /// Detach all children of a node. The detached nodes stay in the
    /// arena but are no longer reachable (and are never serialized).
    pub fn clear_children(&mut self, id: NodeId) {
        self.nodes[id.0].children.clear();
    }

    /// Attach a stable layer name to a node and record it in the layer
    /// index. A node may carry only one name; re-tagging moves it.
    pub fn tag_layer(&mut self, id: NodeId, name: &str) {
        if let Some(previous) = self.nodes[id.0].layer.take()
            && let Some(ids) = self.layers.get_mut(&previous)
        {
            ids.retain(|&n| n != id);
        }
        self.nodes[id.0].layer = Some(name.to_owned());
        self.layers.entry(name.to_owned()).or_default().push(id);
    }

    /// Handles of all nodes tagged with `name`, in tagging order.
    ///
    /// # Errors
    ///
    /// Returns [`RecolorError::UnknownLayer`] if no node carries the name.
    pub fn layer_nodes(&self, name: &str) -> Result<&[NodeId], RecolorError> {
        self.layers
            .get(name)
            .filter(|ids| !ids.is_empty())
            .map(Vec::as_slice)
            .ok_or_else(|| RecolorError::UnknownLayer(name.to_owned()))
    }

    /// Names of all tagged layers, sorted.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Rebuild the layer index from the node arena.
    ///
    /// Only needed after bulk construction that bypassed
    /// [`tag_layer`](Self::tag_layer) (e.g. cloning subtrees); normal
    /// tagging keeps the index current incrementally.
    pub fn rebuild_layer_index(&mut self) {
        let mut layers: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(name) = &node.layer {
                layers.entry(name.clone()).or_default().push(NodeId(i));
            }
        }
        self.layers = layers;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_tree() -> (RenderTree, NodeId, NodeId) {
        let mut tree = RenderTree::new("svg");
        let body = tree.add_child(tree.root(), "g");
        let arm = tree.add_child(body, "path");
        tree.tag_layer(body, "body");
        tree.tag_layer(arm, "arm");
        (tree, body, arm)
    }

    #[test]
    fn tagged_layers_are_queryable() {
        let (tree, body, arm) = sample_tree();
        assert_eq!(tree.layer_nodes("body").unwrap(), &[body]);
        assert_eq!(tree.layer_nodes("arm").unwrap(), &[arm]);
    }

    #[test]
    fn unknown_layer_is_an_error() {
        let (tree, _, _) = sample_tree();
        let err = tree.layer_nodes("halo").unwrap_err();
        assert_eq!(err.to_string(), "no layer named \"halo\"");
    }

    #[test]
    fn multiple_nodes_can_share_a_layer_name() {
        let mut tree = RenderTree::new("svg");
        let a = tree.add_child(tree.root(), "path");
        let b = tree.add_child(tree.root(), "path");
        tree.tag_layer(a, "hair");
        tree.tag_layer(b, "hair");
        assert_eq!(tree.layer_nodes("hair").unwrap(), &[a, b]);
    }

    #[test]
    fn retagging_moves_a_node_between_layers() {
        let (mut tree, body, _) = sample_tree();
        tree.tag_layer(body, "torso");
        assert_eq!(tree.layer_nodes("torso").unwrap(), &[body]);
        assert!(tree.layer_nodes("body").is_err());
    }

    #[test]
    fn attributes_round_trip() {
        let (mut tree, body, _) = sample_tree();
        tree.set_attribute(body, "fill", "#ff0000");
        assert_eq!(tree.node(body).attribute("fill"), Some("#ff0000"));
        tree.remove_attribute(body, "fill");
        assert_eq!(tree.node(body).attribute("fill"), None);
    }

    #[test]
    fn rebuild_index_matches_incremental_tagging() {
        let (mut tree, _, _) = sample_tree();
        let incremental: Vec<_> = tree.layer_names().map(str::to_owned).collect();
        tree.rebuild_layer_index();
        let rebuilt: Vec<_> = tree.layer_names().map(str::to_owned).collect();
        assert_eq!(incremental, rebuilt);
    }

    #[test]
    fn children_keep_document_order() {
        let mut tree = RenderTree::new("svg");
        let first = tree.add_child(tree.root(), "path");
        let second = tree.add_child(tree.root(), "path");
        assert_eq!(tree.node(tree.root()).children(), &[first, second]);
    }
}
