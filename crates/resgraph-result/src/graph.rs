//! Arena storage for a resolved component graph.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use resgraph_core::coordinate::ComponentIdentifier;
use resgraph_util::errors::{ResGraphError, ResGraphResult};

use crate::component::{ComponentNode, ResolvedComponent};
use crate::edge::DependencyEdge;

/// Handle of a component inside one [`ComponentGraph`].
///
/// Two handles name the same node iff they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of an edge inside one [`ComponentGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Components and dependency edges of one resolution, stored in insertion
/// order.
///
/// The resolution engine fills the graph and then hands it out behind an
/// `Arc` (see [`ComponentGraph::into_root`]); from then on it is read-only.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    nodes: Vec<ComponentNode>,
    edges: Vec<DependencyEdge>,
    /// Lookup from identifier to node; one node per identifier.
    index: HashMap<ComponentIdentifier, NodeId>,
}

impl ComponentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. If a component with the same identifier already
    /// exists, returns the existing handle and drops `node`.
    pub fn add_component(&mut self, mut node: ComponentNode) -> NodeId {
        if let Some(&existing) = self.index.get(&node.id) {
            return existing;
        }
        node.dependencies.clear();
        node.dependents.clear();
        let id = NodeId(self.nodes.len());
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Append an edge to its requester's outgoing list.
    ///
    /// Edges are never deduplicated: adding the same request twice records
    /// two edges.
    pub fn add_dependency(&mut self, edge: impl Into<DependencyEdge>) -> ResGraphResult<EdgeId> {
        let edge = edge.into();
        let from = edge.requester();
        self.check_node(from)?;
        if let Some(selected) = edge.selected() {
            self.check_node(selected)?;
        }

        let id = EdgeId(self.edges.len());
        self.nodes[from.0].dependencies.push(id);
        if let Some(selected) = edge.selected() {
            self.nodes[selected.0].dependents.push(id);
        }
        self.edges.push(edge);
        Ok(id)
    }

    fn check_node(&self, id: NodeId) -> ResGraphResult<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ResGraphError::Graph {
                message: format!(
                    "node {id} is out of range for a graph of {} components",
                    self.nodes.len()
                ),
            }
            .into())
        }
    }

    /// Look up a node by identifier.
    pub fn find(&self, id: &ComponentIdentifier) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Get the node data for a handle.
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &ComponentNode {
        &self.nodes[id.0]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get(id.0)
    }

    /// Get the edge data for a handle.
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn edge(&self, id: EdgeId) -> &DependencyEdge {
        &self.edges[id.0]
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&DependencyEdge> {
        self.edges.get(id.0)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ComponentNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &DependencyEdge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Outgoing edges of a node, in discovery order.
    pub fn dependencies_of(&self, id: NodeId) -> impl Iterator<Item = (EdgeId, &DependencyEdge)> {
        self.node(id)
            .dependencies()
            .iter()
            .map(|&e| (e, self.edge(e)))
    }

    /// Resolved edges that selected a node (who depends on it).
    pub fn dependents_of(&self, id: NodeId) -> impl Iterator<Item = (EdgeId, &DependencyEdge)> {
        self.node(id)
            .dependents()
            .iter()
            .map(|&e| (e, self.edge(e)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze the graph and return a handle to its root component.
    pub fn into_root(self, root: NodeId) -> ResGraphResult<ResolvedComponent> {
        ResolvedComponent::new(Arc::new(self), root)
    }
}
