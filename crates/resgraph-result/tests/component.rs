use std::collections::HashSet;
use std::sync::Arc;

use resgraph_core::attributes::AttributeContainer;
use resgraph_core::coordinate::{ComponentIdentifier, ComponentSelector, ModuleVersion};
use resgraph_core::reason::{SelectionCause, SelectionDescriptor, SelectionReason};
use resgraph_core::variant::ResolvedVariant;
use resgraph_result::component::{ComponentNode, ResolvedComponent};
use resgraph_result::edge::ResolvedDependency;
use resgraph_result::graph::{ComponentGraph, NodeId};

fn app_graph() -> (ComponentGraph, [NodeId; 3]) {
    let mut g = ComponentGraph::new();
    let app = g.add_component(
        ComponentNode::new(ComponentIdentifier::project(":app"))
            .with_module_version(ModuleVersion::new("com.example", "app", "1.0"))
            .with_reason(SelectionReason::root()),
    );
    let core = g.add_component(
        ComponentNode::new(ComponentIdentifier::project(":core"))
            .with_reason(SelectionReason::requested()),
    );
    let lib = g.add_component(
        ComponentNode::new(ComponentIdentifier::module("org.a", "a", "2.0"))
            .with_reason(SelectionReason::requested().with(SelectionDescriptor::new(
                SelectionCause::Forced,
            )))
            .with_variant(ResolvedVariant::new(
                "apiElements",
                AttributeContainer::new().with("org.gradle.usage", "java-api"),
            )),
    );
    g.add_dependency(ResolvedDependency::new(
        app,
        ComponentSelector::project(":core"),
        core,
    ))
    .unwrap();
    g.add_dependency(
        ResolvedDependency::new(app, ComponentSelector::module("org.a", "a", "1.0"), lib)
            .with_variant("apiElements"),
    )
    .unwrap();
    g.add_dependency(
        ResolvedDependency::new(core, ComponentSelector::module("org.a", "a", "2.0"), lib)
            .as_constraint(),
    )
    .unwrap();
    (g, [app, core, lib])
}

#[test]
fn module_version_prefers_explicit_then_identifier() {
    let (g, [app, core, lib]) = app_graph();
    assert_eq!(
        g.node(app).module_version().unwrap().to_string(),
        "com.example:app:1.0"
    );
    assert!(g.node(core).module_version().is_none());
    assert_eq!(g.node(lib).module_version().unwrap().to_string(), "org.a:a:2.0");
}

#[test]
fn dependents_list_incoming_resolved_edges() {
    let (g, [_, _, lib]) = app_graph();
    let root = g.into_root(lib).unwrap();
    let dependents: Vec<(String, bool)> = root
        .dependents()
        .map(|d| (d.from().to_string(), d.is_constraint()))
        .collect();
    assert_eq!(
        dependents,
        vec![
            ("project :app".to_string(), false),
            ("project :core".to_string(), true),
        ]
    );
    assert!(root.selection_reason().is_forced());
    assert_eq!(root.variants()[0].attributes.len(), 1);
}

#[test]
fn dependencies_keep_declaration_order_and_variant() {
    let (g, [app, _, _]) = app_graph();
    let root = g.into_root(app).unwrap();
    let deps: Vec<_> = root.dependencies().collect();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0].requested().to_string(), "project :core");
    assert_eq!(deps[0].resolved_variant(), None);
    assert_eq!(deps[1].requested().to_string(), "org.a:a:1.0");
    assert_eq!(deps[1].resolved_variant(), Some("apiElements"));
    assert_eq!(deps[1].to_string(), "org.a:a:1.0 -> org.a:a:2.0");
    assert!(deps[1].attempted().is_none());
}

#[test]
fn handles_compare_by_identity() {
    let (g, [app, core, _]) = app_graph();
    let graph = Arc::new(g);
    let a1 = ResolvedComponent::new(Arc::clone(&graph), app).unwrap();
    let a2 = ResolvedComponent::new(Arc::clone(&graph), app).unwrap();
    let c = ResolvedComponent::new(Arc::clone(&graph), core).unwrap();
    assert_eq!(a1, a2);
    assert_ne!(a1, c);

    // Same content, different graph instance.
    let (copy, [copy_app, _, _]) = app_graph();
    let other = copy.into_root(copy_app).unwrap();
    assert_eq!(other.id(), a1.id());
    assert_ne!(other, a1);

    let set: HashSet<ResolvedComponent> = [a1, a2, c, other].into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn handle_for_foreign_node_is_rejected() {
    let (g, _) = app_graph();
    let mut bigger = ComponentGraph::new();
    let mut last = None;
    for i in 0..5 {
        last = Some(bigger.add_component(ComponentNode::new(ComponentIdentifier::module(
            "x",
            format!("n{i}"),
            "1",
        ))));
    }
    let err = ResolvedComponent::new(Arc::new(g), last.unwrap()).unwrap_err();
    assert!(err.to_string().contains("out of range"), "got: {err}");
}
