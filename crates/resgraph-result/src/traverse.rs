//! Cycle-safe depth-first walk over a component graph.
//!
//! The walk is pre-order. A node is expanded the first time it is reached
//! and skipped afterwards; edges are reported every time they are passed,
//! including edges into nodes that were already expanded. Only resolved
//! edges are followed.
//!
//! Both visitors return `Result`; the first `Err` stops the walk and is
//! returned as is, leaving the rest of the graph unvisited and the
//! visitation record partially filled.

use std::collections::HashSet;

use crate::component::ComponentNode;
use crate::edge::DependencyEdge;
use crate::graph::{ComponentGraph, EdgeId, NodeId};

/// Nodes already expanded during one walk.
pub type VisitRecord = HashSet<NodeId>;

/// Walk the graph reachable from `node`.
///
/// `on_component` runs once per newly reached node, before its edges.
/// `on_dependency` runs for each outgoing edge in stored order, before the
/// walk descends into the edge's selected node.
///
/// Frames live on an explicit `(node, next edge)` stack, not the call stack.
pub fn walk<'g, C, D, E>(
    graph: &'g ComponentGraph,
    node: NodeId,
    on_component: &mut C,
    on_dependency: &mut D,
    visited: &mut VisitRecord,
) -> Result<(), E>
where
    C: FnMut(NodeId, &'g ComponentNode) -> Result<(), E>,
    D: FnMut(EdgeId, &'g DependencyEdge) -> Result<(), E>,
{
    let mut stack: Vec<(&'g ComponentNode, usize)> = Vec::new();
    if let Some(frame) = enter(graph, node, on_component, visited)? {
        stack.push(frame);
    }

    while let Some((component, next)) = stack.last_mut() {
        let Some(&edge_id) = component.dependencies().get(*next) else {
            stack.pop();
            continue;
        };
        *next += 1;
        let edge = graph.edge(edge_id);
        on_dependency(edge_id, edge)?;
        if let DependencyEdge::Resolved(dep) = edge {
            if let Some(frame) = enter(graph, dep.selected, on_component, visited)? {
                stack.push(frame);
            }
        }
    }
    Ok(())
}

/// Mark `node` visited and report it, returning a fresh frame for it, or
/// `None` when it was expanded before.
fn enter<'g, C, E>(
    graph: &'g ComponentGraph,
    node: NodeId,
    on_component: &mut C,
    visited: &mut VisitRecord,
) -> Result<Option<(&'g ComponentNode, usize)>, E>
where
    C: FnMut(NodeId, &'g ComponentNode) -> Result<(), E>,
{
    if !visited.insert(node) {
        return Ok(None);
    }
    let component = graph.node(node);
    tracing::trace!("expanding {}", component.id());
    on_component(node, component)?;
    Ok(Some((component, 0)))
}

/// Node-visitor that does nothing.
pub fn skip_component<E>(_: NodeId, _: &ComponentNode) -> Result<(), E> {
    Ok(())
}

/// Edge-visitor that does nothing.
pub fn skip_dependency<E>(_: EdgeId, _: &DependencyEdge) -> Result<(), E> {
    Ok(())
}
