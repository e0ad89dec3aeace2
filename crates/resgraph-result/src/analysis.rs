//! Read-only queries over a component graph: lookups, paths and cycles.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use resgraph_core::coordinate::ComponentIdentifier;

use crate::graph::{ComponentGraph, EdgeId, NodeId};

impl ComponentGraph {
    /// Resolve a user-provided key to a node.
    ///
    /// Tries a full identifier (`group:name:version`, `project :path`)
    /// first, then `group:name`, then just the module name. Partial matches
    /// return the first component in insertion order.
    pub fn find_by_module(&self, key: &str) -> Option<NodeId> {
        if let Some(idx) = key
            .parse::<ComponentIdentifier>()
            .ok()
            .and_then(|id| self.find(&id))
        {
            return Some(idx);
        }
        let module_versions = || {
            self.nodes()
                .filter_map(|(idx, node)| node.module_version().map(|mv| (idx, mv)))
        };
        module_versions()
            .find(|(_, mv)| mv.key() == key)
            .or_else(|| module_versions().find(|(_, mv)| mv.name == key))
            .map(|(idx, _)| idx)
    }

    /// First path from `from` to `to` along resolved edges, exploring edges
    /// in discovery order. Both ends are included.
    pub fn find_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if from == to {
            return Some(vec![from]);
        }
        let mut visited = HashSet::from([from]);
        // Parallel to `path`: the index of the next edge to try at each step.
        let mut path = vec![from];
        let mut cursor = vec![0usize];

        while let Some(&current) = path.last() {
            let depth = path.len() - 1;
            let Some(&edge_id) = self.node(current).dependencies().get(cursor[depth]) else {
                path.pop();
                cursor.pop();
                continue;
            };
            cursor[depth] += 1;
            let Some(next) = self.edge(edge_id).selected() else {
                continue;
            };
            if next == to {
                path.push(next);
                return Some(path);
            }
            if visited.insert(next) {
                path.push(next);
                cursor.push(0);
            }
        }
        None
    }

    /// Project the resolved edges onto a petgraph `DiGraph`.
    ///
    /// Node `i` of the result is `NodeId` index `i`; edge weights are the
    /// originating edge handles. Unresolved edges are left out.
    pub fn to_digraph(&self) -> DiGraph<NodeId, EdgeId> {
        let mut digraph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        for (idx, _) in self.nodes() {
            digraph.add_node(idx);
        }
        for (edge_id, edge) in self.edges() {
            if let Some(selected) = edge.selected() {
                digraph.add_edge(
                    NodeIndex::new(edge.requester().index()),
                    NodeIndex::new(selected.index()),
                    edge_id,
                );
            }
        }
        digraph
    }

    /// Groups of components that depend on each other, directly or
    /// transitively. A component that depends on itself forms a group of
    /// one. Members and groups are sorted by handle.
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let digraph = self.to_digraph();
        let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(&digraph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || digraph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<NodeId> = scc.into_iter().map(|i| digraph[i]).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub fn is_cyclic(&self) -> bool {
        !self.cycles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentNode;
    use crate::edge::{ResolvedDependency, UnresolvedDependency};
    use resgraph_core::coordinate::ComponentSelector;
    use resgraph_core::failure::ResolveFailure;

    fn add(g: &mut ComponentGraph, group: &str, name: &str) -> NodeId {
        g.add_component(ComponentNode::new(ComponentIdentifier::module(
            group, name, "1.0",
        )))
    }

    fn link(g: &mut ComponentGraph, from: NodeId, to: NodeId) {
        let requested = ComponentSelector::from(g.node(to).id());
        g.add_dependency(ResolvedDependency::new(from, requested, to))
            .unwrap();
    }

    #[test]
    fn find_path_exists() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        let b = add(&mut g, "org.b", "b");
        link(&mut g, root, a);
        link(&mut g, a, b);

        assert_eq!(g.find_path(root, b), Some(vec![root, a, b]));
    }

    #[test]
    fn find_path_not_found() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        link(&mut g, a, root);
        assert!(g.find_path(root, a).is_none());
    }

    #[test]
    fn find_path_ignores_unresolved_edges() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        g.add_dependency(UnresolvedDependency::new(
            root,
            ComponentSelector::module("org.a", "a", "1.0"),
            ResolveFailure::other("offline"),
        ))
        .unwrap();
        assert!(g.find_path(root, a).is_none());
    }

    #[test]
    fn find_path_through_cycle_terminates() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        let b = add(&mut g, "org.b", "b");
        let c = add(&mut g, "org.c", "c");
        link(&mut g, root, a);
        link(&mut g, a, b);
        link(&mut g, b, a);
        link(&mut g, root, c);
        assert_eq!(g.find_path(root, c), Some(vec![root, c]));
    }

    #[test]
    fn find_by_module_partial_keys() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let lib = add(&mut g, "org.a", "my-lib");
        assert_eq!(g.find_by_module("com.example:app:1.0"), Some(root));
        assert_eq!(g.find_by_module("org.a:my-lib"), Some(lib));
        assert_eq!(g.find_by_module("my-lib"), Some(lib));
        assert_eq!(g.find_by_module("missing"), None);
    }

    #[test]
    fn cycles_reports_strongly_connected_groups() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        let b = add(&mut g, "org.b", "b");
        let c = add(&mut g, "org.c", "c");
        link(&mut g, root, a);
        link(&mut g, a, b);
        link(&mut g, b, root);
        link(&mut g, root, c);
        link(&mut g, c, c);

        assert_eq!(g.cycles(), vec![vec![root, a, b], vec![c]]);
        assert!(g.is_cyclic());
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let mut g = ComponentGraph::new();
        let root = add(&mut g, "com.example", "app");
        let a = add(&mut g, "org.a", "a");
        let b = add(&mut g, "org.b", "b");
        link(&mut g, root, a);
        link(&mut g, root, b);
        link(&mut g, a, b);
        assert!(g.cycles().is_empty());
        assert_eq!(g.to_digraph().edge_count(), 3);
    }
    #[test]
    fn find_path_along_deep_chain() {
        let mut g = ComponentGraph::new();
        let first = add(&mut g, "org.chain", "n0");
        let mut prev = first;
        for i in 1..100_000 {
            let next = add(&mut g, "org.chain", &format!("n{i}"));
            link(&mut g, prev, next);
            prev = next;
        }
        let path = g.find_path(first, prev).unwrap();
        assert_eq!(path.len(), 100_000);
        assert_eq!(path[0], first);
        assert_eq!(path[99_999], prev);
    }
}
