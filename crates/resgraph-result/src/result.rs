//! The resolution result facade.

use std::fmt;
use std::sync::Arc;

use resgraph_core::attributes::AttributeContainer;
use resgraph_core::snapshot::ResolutionSnapshot;
use resgraph_util::lazy::{Deferred, SingleFlight};

use crate::component::{ComponentNode, ResolvedComponent};
use crate::edge::{DependencyEdge, DependencyResult};
use crate::graph::{ComponentGraph, EdgeId, NodeId};
use crate::snapshot::materialize;
use crate::traverse::{self, VisitRecord};

/// Zero-argument producer of the root component.
pub type RootSource<E> = Arc<dyn Fn() -> Result<ResolvedComponent, E> + Send + Sync>;

/// The outcome of one resolution: a deferred root plus the attributes the
/// resolution was requested with.
///
/// The root is produced on demand by calling the root source; this type
/// never caches it, so every [`root`](Self::root) call and every
/// enumeration may materialize a fresh graph. Errors from the root source
/// are returned unchanged.
pub struct ResolutionResult<E> {
    root_source: RootSource<E>,
    requested_attributes: AttributeContainer,
}

impl<E> ResolutionResult<E> {
    /// Wrap a root producer. The producer is not called here.
    pub fn new<F>(root_source: F, requested_attributes: AttributeContainer) -> Self
    where
        F: Fn() -> Result<ResolvedComponent, E> + Send + Sync + 'static,
    {
        Self {
            root_source: Arc::new(root_source),
            requested_attributes,
        }
    }

    /// Produce the root component by invoking the root source.
    pub fn root(&self) -> Result<ResolvedComponent, E> {
        tracing::debug!("materializing resolution root");
        (self.root_source)()
    }

    /// A handle that produces the root when asked, and again on every ask.
    pub fn root_component(&self) -> Deferred<ResolvedComponent, E> {
        Deferred::from_shared(Arc::clone(&self.root_source))
    }

    pub fn requested_attributes(&self) -> &AttributeContainer {
        &self.requested_attributes
    }

    /// Every component reachable from the root, once each, in first
    /// discovery order.
    pub fn all_components(&self) -> Result<Vec<ResolvedComponent>, E> {
        let mut out = Vec::new();
        self.walk_root::<E, _, _>(
            |graph, node, _| {
                out.push(ResolvedComponent::from_parts(Arc::clone(graph), node));
                Ok(())
            },
            |_, _, _| Ok(()),
        )?;
        Ok(out)
    }

    /// Every edge passed during the walk, in walk order. An edge into a
    /// component reached before is still listed.
    pub fn all_dependencies(&self) -> Result<Vec<DependencyResult>, E> {
        let mut out = Vec::new();
        self.walk_root::<E, _, _>(
            |_, _, _| Ok(()),
            |graph, edge, _| {
                out.push(DependencyResult::from_parts(Arc::clone(graph), edge));
                Ok(())
            },
        )?;
        Ok(out)
    }

    /// The unresolved edges of [`all_dependencies`](Self::all_dependencies),
    /// in the same order.
    pub fn unresolved_dependencies(&self) -> Result<Vec<DependencyResult>, E> {
        let mut out = Vec::new();
        self.walk_root::<E, _, _>(
            |_, _, _| Ok(()),
            |graph, edge, value| {
                if !value.is_resolved() {
                    out.push(DependencyResult::from_parts(Arc::clone(graph), edge));
                }
                Ok(())
            },
        )?;
        Ok(out)
    }

    /// Call `visit` for each component, in the order of
    /// [`all_components`](Self::all_components).
    pub fn for_each_component<F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&ResolvedComponent),
    {
        self.try_for_each_component(|c| {
            visit(c);
            Ok::<(), E>(())
        })
    }

    /// Like [`for_each_component`](Self::for_each_component), but the first
    /// visitor error stops the walk and is returned.
    pub fn try_for_each_component<F, V>(&self, mut visit: F) -> Result<(), V>
    where
        F: FnMut(&ResolvedComponent) -> Result<(), V>,
        V: From<E>,
    {
        self.walk_root(
            |graph, node, _| visit(&ResolvedComponent::from_parts(Arc::clone(graph), node)),
            |_, _, _| Ok(()),
        )
    }

    /// Call `visit` for each edge, in the order of
    /// [`all_dependencies`](Self::all_dependencies).
    pub fn for_each_dependency<F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&DependencyResult),
    {
        self.try_for_each_dependency(|d| {
            visit(d);
            Ok::<(), E>(())
        })
    }

    /// Like [`for_each_dependency`](Self::for_each_dependency), but the first
    /// visitor error stops the walk and is returned.
    pub fn try_for_each_dependency<F, V>(&self, mut visit: F) -> Result<(), V>
    where
        F: FnMut(&DependencyResult) -> Result<(), V>,
        V: From<E>,
    {
        self.walk_root(
            |_, _, _| Ok(()),
            |graph, edge, _| visit(&DependencyResult::from_parts(Arc::clone(graph), edge)),
        )
    }

    /// Materialize the root and walk it with a fresh visitation record.
    fn walk_root<V, C, D>(&self, mut on_component: C, mut on_dependency: D) -> Result<(), V>
    where
        V: From<E>,
        C: FnMut(&Arc<ComponentGraph>, NodeId, &ComponentNode) -> Result<(), V>,
        D: FnMut(&Arc<ComponentGraph>, EdgeId, &DependencyEdge) -> Result<(), V>,
    {
        let root = self.root()?;
        let graph = root.graph();
        let mut visited = VisitRecord::new();
        let mut edges = 0usize;
        traverse::walk(
            graph,
            root.node_id(),
            &mut |node, value| on_component(graph, node, value),
            &mut |edge, value| {
                edges += 1;
                on_dependency(graph, edge, value)
            },
            &mut visited,
        )?;
        tracing::debug!(
            components = visited.len(),
            dependencies = edges,
            "walked resolution graph from {}",
            root
        );
        Ok(())
    }
}

impl<E: 'static> ResolutionResult<E> {
    /// Wrap `producer` in a [`SingleFlight`] so the graph is materialized at
    /// most once per result, even under concurrent first access. Failed
    /// materializations are retried on the next call.
    pub fn memoized<F>(producer: F, requested_attributes: AttributeContainer) -> Self
    where
        F: Fn() -> Result<ResolvedComponent, E> + Send + Sync + 'static,
    {
        let memo = SingleFlight::new(producer);
        Self::new(move || memo.get(), requested_attributes)
    }
}

impl ResolutionResult<miette::Report> {
    /// A result whose root is rebuilt from `snapshot` on every call.
    pub fn from_snapshot(snapshot: ResolutionSnapshot) -> Self {
        let attributes = snapshot.attributes.clone();
        let snapshot = Arc::new(snapshot);
        Self::new(move || materialize(&snapshot), attributes)
    }
}

impl<E> Clone for ResolutionResult<E> {
    fn clone(&self) -> Self {
        Self {
            root_source: Arc::clone(&self.root_source),
            requested_attributes: self.requested_attributes.clone(),
        }
    }
}

impl<E> fmt::Debug for ResolutionResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionResult")
            .field("requested_attributes", &self.requested_attributes)
            .finish_non_exhaustive()
    }
}
