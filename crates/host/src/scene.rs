//! Scene host interface and an in-memory scene graph.

use crate::HostError;
use arplace_core::{AnchorId, NodeId, NodeParent, SceneMutation, SceneNode};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Applies scene mutations on behalf of the router.
pub trait SceneHost {
    /// The session started tracking `anchor`; create its node.
    fn anchor_node_added(&mut self, anchor: AnchorId);

    /// The anchor went away; drop its node and everything under it.
    fn anchor_node_removed(&mut self, anchor: AnchorId);

    /// Apply one mutation.
    fn apply(&mut self, mutation: &SceneMutation) -> Result<(), HostError>;
}

/// A node as stored in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Where the node hangs.
    pub parent: NodeParent,
    /// The node.
    pub node: SceneNode,
}

/// Scene graph kept in memory, ordered by node id.
#[derive(Debug, Default)]
pub struct SceneGraph {
    anchor_nodes: BTreeSet<AnchorId>,
    nodes: BTreeMap<NodeId, PlacedNode>,
}

impl SceneGraph {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.get(&id)
    }

    /// All nodes, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values()
    }

    /// Nodes attached directly under `parent`.
    pub fn children_of(&self, parent: NodeParent) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values().filter(move |n| n.parent == parent)
    }

    /// Whether the scene holds a node for `anchor`.
    pub fn has_anchor_node(&self, anchor: AnchorId) -> bool {
        self.anchor_nodes.contains(&anchor)
    }

    /// Number of router-created nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no router-created nodes exist.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneHost for SceneGraph {
    fn anchor_node_added(&mut self, anchor: AnchorId) {
        self.anchor_nodes.insert(anchor);
    }

    fn anchor_node_removed(&mut self, anchor: AnchorId) {
        if !self.anchor_nodes.remove(&anchor) {
            return;
        }
        let parent = NodeParent::Anchor(anchor);
        let before = self.nodes.len();
        self.nodes.retain(|_, placed| placed.parent != parent);
        debug!(%anchor, dropped = before - self.nodes.len(), "Removed anchor node");
    }

    fn apply(&mut self, mutation: &SceneMutation) -> Result<(), HostError> {
        match mutation {
            SceneMutation::AddNode { parent, node } => {
                if let NodeParent::Anchor(anchor) = parent {
                    if !self.anchor_nodes.contains(anchor) {
                        return Err(HostError::UnknownParent(*anchor));
                    }
                }
                if self.nodes.contains_key(&node.id) {
                    return Err(HostError::DuplicateNode(node.id));
                }
                debug!(node = %node.id, ?parent, "Added node");
                self.nodes.insert(
                    node.id,
                    PlacedNode {
                        parent: *parent,
                        node: node.clone(),
                    },
                );
                Ok(())
            }
        }
    }
}
