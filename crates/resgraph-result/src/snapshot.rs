//! Conversion between [`ResolutionSnapshot`] and [`ComponentGraph`].

use resgraph_core::attributes::AttributeContainer;
use resgraph_core::snapshot::{ResolutionSnapshot, SnapshotComponent, SnapshotDependency};
use resgraph_util::errors::{ResGraphError, ResGraphResult};

use crate::component::{ComponentNode, ResolvedComponent};
use crate::edge::{DependencyEdge, ResolvedDependency, UnresolvedDependency};
use crate::graph::{ComponentGraph, NodeId};

impl ComponentGraph {
    /// Build a graph from a snapshot, returning it with the root's handle.
    ///
    /// Components and each component's dependencies keep snapshot order.
    pub fn from_snapshot(snapshot: &ResolutionSnapshot) -> ResGraphResult<(Self, NodeId)> {
        let mut graph = ComponentGraph::new();
        let mut handles = Vec::with_capacity(snapshot.components.len());

        for component in &snapshot.components {
            if graph.find(&component.id).is_some() {
                return Err(snapshot_error(format!(
                    "component {} is listed more than once",
                    component.id
                )));
            }
            let mut node = ComponentNode::new(component.id.clone())
                .with_reason(component.reasons.clone().into());
            if let Some(mv) = &component.module_version {
                node = node.with_module_version(mv.clone());
            }
            for variant in &component.variants {
                node = node.with_variant(variant.clone());
            }
            handles.push(graph.add_component(node));
        }

        for (component, &from) in snapshot.components.iter().zip(&handles) {
            for dependency in &component.dependencies {
                let edge = edge_from_snapshot(&graph, component, from, dependency)?;
                graph.add_dependency(edge)?;
            }
        }

        let root = graph.find(&snapshot.root).ok_or_else(|| {
            snapshot_error(format!(
                "root {} is not one of the listed components",
                snapshot.root
            ))
        })?;
        tracing::debug!(
            components = graph.node_count(),
            dependencies = graph.edge_count(),
            "loaded resolution snapshot rooted at {}",
            snapshot.root
        );
        Ok((graph, root))
    }

    /// Describe the whole graph as a snapshot rooted at `root`.
    ///
    /// Every component is listed, reachable from `root` or not.
    pub fn to_snapshot(&self, root: NodeId, attributes: &AttributeContainer) -> ResolutionSnapshot {
        let components = self
            .nodes()
            .map(|(id, node)| SnapshotComponent {
                id: node.id().clone(),
                module_version: node.module_version.clone(),
                reasons: node.selection_reason().descriptions().to_vec(),
                variants: node.variants().to_vec(),
                dependencies: self
                    .dependencies_of(id)
                    .map(|(_, edge)| self.edge_to_snapshot(edge))
                    .collect(),
            })
            .collect();

        ResolutionSnapshot {
            root: self.node(root).id().clone(),
            attributes: attributes.clone(),
            components,
        }
    }

    fn edge_to_snapshot(&self, edge: &DependencyEdge) -> SnapshotDependency {
        match edge {
            DependencyEdge::Resolved(d) => SnapshotDependency {
                constraint: d.constraint,
                variant: d.resolved_variant.clone(),
                ..SnapshotDependency::resolved(
                    d.requested.clone(),
                    self.node(d.selected).id().clone(),
                )
            },
            DependencyEdge::Unresolved(d) => SnapshotDependency {
                constraint: d.constraint,
                attempted: (d.attempted != d.requested).then(|| d.attempted.clone()),
                attempted_reasons: d
                    .attempted_reason
                    .as_ref()
                    .map(|r| r.descriptions().to_vec())
                    .unwrap_or_default(),
                ..SnapshotDependency::unresolved(d.requested.clone(), d.failure.clone())
            },
        }
    }
}

/// Build the graph described by `snapshot` and return its root.
pub fn materialize(snapshot: &ResolutionSnapshot) -> ResGraphResult<ResolvedComponent> {
    let (graph, root) = ComponentGraph::from_snapshot(snapshot)?;
    graph.into_root(root)
}

fn edge_from_snapshot(
    graph: &ComponentGraph,
    component: &SnapshotComponent,
    from: NodeId,
    dependency: &SnapshotDependency,
) -> ResGraphResult<DependencyEdge> {
    match (&dependency.selected, &dependency.failure) {
        (Some(selected), None) => {
            let Some(target) = graph.find(selected) else {
                tracing::warn!(
                    "{} depends on {selected}, which the snapshot does not list",
                    component.id
                );
                return Err(snapshot_error(format!(
                    "dependency {} of {} selects unknown component {selected}",
                    dependency.requested, component.id
                )));
            };
            let mut edge = ResolvedDependency::new(from, dependency.requested.clone(), target);
            edge.constraint = dependency.constraint;
            edge.resolved_variant = dependency.variant.clone();
            Ok(edge.into())
        }
        (None, Some(failure)) => {
            let mut edge =
                UnresolvedDependency::new(from, dependency.requested.clone(), failure.clone());
            edge.constraint = dependency.constraint;
            if let Some(attempted) = &dependency.attempted {
                edge.attempted = attempted.clone();
            }
            if !dependency.attempted_reasons.is_empty() {
                edge.attempted_reason = Some(dependency.attempted_reasons.clone().into());
            }
            Ok(edge.into())
        }
        _ => Err(snapshot_error(format!(
            "dependency {} of {} must set exactly one of `selected` and `failure`",
            dependency.requested, component.id
        ))),
    }
}

fn snapshot_error(message: String) -> miette::Report {
    ResGraphError::Snapshot { message }.into()
}
