//! Resolved components: the arena record and the shareable handle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use resgraph_core::coordinate::{ComponentIdentifier, ModuleVersion};
use resgraph_core::reason::SelectionReason;
use resgraph_core::variant::ResolvedVariant;
use resgraph_util::errors::{ResGraphError, ResGraphResult};

use crate::edge::DependencyResult;
use crate::graph::{ComponentGraph, EdgeId, NodeId};

/// A component selected by the resolution engine, as stored in the arena.
///
/// Outgoing and incoming edges are kept as edge handles in the order the
/// graph received them.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub(crate) id: ComponentIdentifier,
    pub(crate) module_version: Option<ModuleVersion>,
    pub(crate) reason: SelectionReason,
    pub(crate) variants: Vec<ResolvedVariant>,
    pub(crate) dependencies: Vec<EdgeId>,
    pub(crate) dependents: Vec<EdgeId>,
}

impl ComponentNode {
    pub fn new(id: ComponentIdentifier) -> Self {
        Self {
            id,
            module_version: None,
            reason: SelectionReason::default(),
            variants: Vec::new(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: SelectionReason) -> Self {
        self.reason = reason;
        self
    }

    /// Module coordinates for components whose identifier does not carry
    /// them (project components).
    pub fn with_module_version(mut self, module_version: ModuleVersion) -> Self {
        self.module_version = Some(module_version);
        self
    }

    pub fn with_variant(mut self, variant: ResolvedVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn id(&self) -> &ComponentIdentifier {
        &self.id
    }

    /// Explicit module coordinates, falling back to the identifier's.
    pub fn module_version(&self) -> Option<&ModuleVersion> {
        self.module_version
            .as_ref()
            .or_else(|| self.id.module_version())
    }

    pub fn selection_reason(&self) -> &SelectionReason {
        &self.reason
    }

    pub fn variants(&self) -> &[ResolvedVariant] {
        &self.variants
    }

    /// Outgoing edges in discovery order.
    pub fn dependencies(&self) -> &[EdgeId] {
        &self.dependencies
    }

    /// Incoming resolved edges in the order they were added.
    pub fn dependents(&self) -> &[EdgeId] {
        &self.dependents
    }
}

/// Shareable handle to a component of a materialized graph.
///
/// Equality and hashing are by identity: two handles are equal only if they
/// point at the same node of the same graph instance. Structurally equal
/// components of two separately materialized graphs are different
/// components.
#[derive(Clone)]
pub struct ResolvedComponent {
    graph: Arc<ComponentGraph>,
    node: NodeId,
}

impl ResolvedComponent {
    /// Wrap `node` of `graph`, checking that the node exists.
    pub fn new(graph: Arc<ComponentGraph>, node: NodeId) -> ResGraphResult<Self> {
        if graph.get_node(node).is_none() {
            return Err(ResGraphError::Graph {
                message: format!(
                    "node {node} is out of range for a graph of {} components",
                    graph.node_count()
                ),
            }
            .into());
        }
        Ok(Self { graph, node })
    }

    pub(crate) fn from_parts(graph: Arc<ComponentGraph>, node: NodeId) -> Self {
        Self { graph, node }
    }

    pub fn graph(&self) -> &Arc<ComponentGraph> {
        &self.graph
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn node(&self) -> &ComponentNode {
        self.graph.node(self.node)
    }

    pub fn id(&self) -> &ComponentIdentifier {
        self.node().id()
    }

    pub fn module_version(&self) -> Option<&ModuleVersion> {
        self.node().module_version()
    }

    pub fn selection_reason(&self) -> &SelectionReason {
        self.node().selection_reason()
    }

    pub fn variants(&self) -> &[ResolvedVariant] {
        self.node().variants()
    }

    /// Outgoing dependencies in discovery order.
    pub fn dependencies(&self) -> impl Iterator<Item = DependencyResult> + '_ {
        self.node()
            .dependencies()
            .iter()
            .map(|&edge| DependencyResult::from_parts(Arc::clone(&self.graph), edge))
    }

    /// Resolved dependencies that selected this component.
    pub fn dependents(&self) -> impl Iterator<Item = DependencyResult> + '_ {
        self.node()
            .dependents()
            .iter()
            .map(|&edge| DependencyResult::from_parts(Arc::clone(&self.graph), edge))
    }
}

impl PartialEq for ResolvedComponent {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.node == other.node
    }
}

impl Eq for ResolvedComponent {}

impl Hash for ResolvedComponent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.graph).hash(state);
        self.node.hash(state);
    }
}

impl fmt::Debug for ResolvedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedComponent")
            .field("id", self.id())
            .field("node", &self.node)
            .finish()
    }
}

impl fmt::Display for ResolvedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
