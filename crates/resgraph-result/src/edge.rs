//! Dependency edges: a request plus its outcome.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use resgraph_core::coordinate::ComponentSelector;
use resgraph_core::failure::ResolveFailure;
use resgraph_core::reason::SelectionReason;

use crate::component::ResolvedComponent;
use crate::graph::{ComponentGraph, EdgeId, NodeId};

/// A requested dependency, either resolved to a component or failed.
///
/// The edge lives on its requester's outgoing list. Only the resolved
/// variant points at another node, so unresolved edges are always leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyEdge {
    Resolved(ResolvedDependency),
    Unresolved(UnresolvedDependency),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDependency {
    pub from: NodeId,
    pub requested: ComponentSelector,
    /// Declared as a constraint rather than a real dependency.
    pub constraint: bool,
    pub selected: NodeId,
    /// Name of the variant of `selected` this edge resolved to.
    pub resolved_variant: Option<String>,
}

impl ResolvedDependency {
    pub fn new(from: NodeId, requested: ComponentSelector, selected: NodeId) -> Self {
        Self {
            from,
            requested,
            constraint: false,
            selected,
            resolved_variant: None,
        }
    }

    pub fn with_variant(mut self, name: impl Into<String>) -> Self {
        self.resolved_variant = Some(name.into());
        self
    }

    pub fn as_constraint(mut self) -> Self {
        self.constraint = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedDependency {
    pub from: NodeId,
    pub requested: ComponentSelector,
    pub constraint: bool,
    /// What was actually tried; differs from `requested` after substitution.
    pub attempted: ComponentSelector,
    pub attempted_reason: Option<SelectionReason>,
    pub failure: ResolveFailure,
}

impl UnresolvedDependency {
    pub fn new(from: NodeId, requested: ComponentSelector, failure: ResolveFailure) -> Self {
        Self {
            from,
            attempted: requested.clone(),
            requested,
            constraint: false,
            attempted_reason: None,
            failure,
        }
    }

    pub fn with_attempted(mut self, attempted: ComponentSelector, reason: SelectionReason) -> Self {
        self.attempted = attempted;
        self.attempted_reason = Some(reason);
        self
    }

    pub fn as_constraint(mut self) -> Self {
        self.constraint = true;
        self
    }
}

impl From<ResolvedDependency> for DependencyEdge {
    fn from(dep: ResolvedDependency) -> Self {
        Self::Resolved(dep)
    }
}

impl From<UnresolvedDependency> for DependencyEdge {
    fn from(dep: UnresolvedDependency) -> Self {
        Self::Unresolved(dep)
    }
}

impl DependencyEdge {
    /// The component whose outgoing list holds this edge.
    pub fn requester(&self) -> NodeId {
        match self {
            Self::Resolved(d) => d.from,
            Self::Unresolved(d) => d.from,
        }
    }

    pub fn requested(&self) -> &ComponentSelector {
        match self {
            Self::Resolved(d) => &d.requested,
            Self::Unresolved(d) => &d.requested,
        }
    }

    pub fn is_constraint(&self) -> bool {
        match self {
            Self::Resolved(d) => d.constraint,
            Self::Unresolved(d) => d.constraint,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn selected(&self) -> Option<NodeId> {
        match self {
            Self::Resolved(d) => Some(d.selected),
            Self::Unresolved(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ResolveFailure> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved(d) => Some(&d.failure),
        }
    }
}

/// Shareable handle to an edge of a materialized graph.
///
/// Like [`ResolvedComponent`], compared by identity: the same edge of the
/// same graph instance.
#[derive(Clone)]
pub struct DependencyResult {
    graph: Arc<ComponentGraph>,
    edge: EdgeId,
}

impl DependencyResult {
    pub(crate) fn from_parts(graph: Arc<ComponentGraph>, edge: EdgeId) -> Self {
        Self { graph, edge }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge
    }

    pub fn edge(&self) -> &DependencyEdge {
        self.graph.edge(self.edge)
    }

    /// The requesting component.
    pub fn from(&self) -> ResolvedComponent {
        ResolvedComponent::from_parts(Arc::clone(&self.graph), self.edge().requester())
    }

    pub fn requested(&self) -> &ComponentSelector {
        self.edge().requested()
    }

    pub fn is_constraint(&self) -> bool {
        self.edge().is_constraint()
    }

    pub fn is_resolved(&self) -> bool {
        self.edge().is_resolved()
    }

    /// The selected component, for resolved edges.
    pub fn selected(&self) -> Option<ResolvedComponent> {
        self.edge()
            .selected()
            .map(|node| ResolvedComponent::from_parts(Arc::clone(&self.graph), node))
    }

    pub fn resolved_variant(&self) -> Option<&str> {
        match self.edge() {
            DependencyEdge::Resolved(d) => d.resolved_variant.as_deref(),
            DependencyEdge::Unresolved(_) => None,
        }
    }

    pub fn attempted(&self) -> Option<&ComponentSelector> {
        match self.edge() {
            DependencyEdge::Resolved(_) => None,
            DependencyEdge::Unresolved(d) => Some(&d.attempted),
        }
    }

    pub fn attempted_reason(&self) -> Option<&SelectionReason> {
        match self.edge() {
            DependencyEdge::Resolved(_) => None,
            DependencyEdge::Unresolved(d) => d.attempted_reason.as_ref(),
        }
    }

    pub fn failure(&self) -> Option<&ResolveFailure> {
        self.edge().failure()
    }
}

impl PartialEq for DependencyResult {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.edge == other.edge
    }
}

impl Eq for DependencyResult {}

impl Hash for DependencyResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.graph).hash(state);
        self.edge.hash(state);
    }
}

impl fmt::Debug for DependencyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResult")
            .field("edge", &self.edge)
            .field("value", self.edge())
            .finish()
    }
}

impl fmt::Display for DependencyResult {
    /// `requested -> selected` for resolved edges,
    /// `requested -> attempted - failure` for unresolved ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge() {
            DependencyEdge::Resolved(d) => {
                write!(f, "{} -> {}", d.requested, self.graph.node(d.selected).id())
            }
            DependencyEdge::Unresolved(d) => {
                write!(f, "{} -> {} - {}", d.requested, d.attempted, d.failure)
            }
        }
    }
}
