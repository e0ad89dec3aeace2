use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use resgraph_core::coordinate::{ComponentIdentifier, ComponentSelector};
use resgraph_core::failure::ResolveFailure;
use resgraph_core::reason::SelectionCause;
use resgraph_core::snapshot::ResolutionSnapshot;
use resgraph_result::graph::ComponentGraph;
use resgraph_result::result::ResolutionResult;
use resgraph_result::snapshot::materialize;

const SCENARIO: &str = r#"
root = "project :app"

[attributes]
"org.gradle.usage" = "java-runtime"
"org.gradle.jvm.version" = 17

[[component]]
id = "project :app"
module-version = "com.example:app:1.0"
reasons = [{ cause = "root" }]

[[component.dependencies]]
requested = "org.a:a:1.0"
selected = "org.a:a:1.0"
variant = "runtimeElements"

[[component.dependencies]]
requested = "lib:missing:1.0"
attempted = "lib:missing:1.1"
attempted-reasons = [{ cause = "selected-by-rule", detail = "upgrade missing" }]
failure = { kind = "not-found", selector = "lib:missing:1.1", searched = ["https://repo.maven.apache.org/maven2"] }

[[component]]
id = "org.a:a:1.0"
reasons = [{ cause = "requested" }]
variants = [{ name = "runtimeElements", attributes = { "org.gradle.usage" = "java-runtime" } }]

[[component.dependencies]]
requested = "org.b:b"
selected = "org.b:b:2.0"

[[component]]
id = "org.b:b:2.0"
reasons = [{ cause = "requested" }, { cause = "conflict-resolution", detail = "between versions 2.0 and 1.5" }]

[[component.dependencies]]
requested = "project :app"
selected = "project :app"
"#;

#[test]
fn snapshot_result_walks_the_recorded_graph() {
    let snapshot = ResolutionSnapshot::parse_toml(SCENARIO).unwrap();
    let result = ResolutionResult::from_snapshot(snapshot);

    assert_eq!(result.requested_attributes().len(), 2);

    let components: Vec<String> = result
        .all_components()
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        components,
        vec!["project :app", "org.a:a:1.0", "org.b:b:2.0"]
    );

    let deps: Vec<String> = result
        .all_dependencies()
        .unwrap()
        .iter()
        .map(|d| d.to_string())
        .collect();
    assert_eq!(
        deps,
        vec![
            "org.a:a:1.0 -> org.a:a:1.0",
            "org.b:b -> org.b:b:2.0",
            "project :app -> project :app",
            "lib:missing:1.0 -> lib:missing:1.1 - Could not find lib:missing:1.1 (searched: https://repo.maven.apache.org/maven2)",
        ]
    );
}

#[test]
fn snapshot_preserves_component_metadata() {
    let snapshot = ResolutionSnapshot::parse_toml(SCENARIO).unwrap();
    let root = materialize(&snapshot).unwrap();

    assert_eq!(
        root.module_version().map(|mv| mv.to_string()),
        Some("com.example:app:1.0".to_string())
    );
    assert!(root.selection_reason().has(SelectionCause::Root));

    let deps: Vec<_> = root.dependencies().collect();
    assert_eq!(deps[0].resolved_variant(), Some("runtimeElements"));
    assert_eq!(
        deps[1].attempted(),
        Some(&ComponentSelector::module("lib", "missing", "1.1"))
    );
    assert!(deps[1].attempted_reason().unwrap().is_selected_by_rule());

    let a = deps[0].selected().unwrap();
    assert_eq!(a.variants().len(), 1);
    assert_eq!(a.variants()[0].name, "runtimeElements");

    let b = a.dependencies().next().unwrap().selected().unwrap();
    assert!(b.selection_reason().is_conflict_resolution());
    let dependents: Vec<String> = root.dependents().map(|d| d.from().to_string()).collect();
    assert_eq!(dependents, vec!["org.b:b:2.0"]);
}

#[test]
fn snapshot_result_is_rebuilt_on_every_call() {
    let snapshot = ResolutionSnapshot::parse_toml(SCENARIO).unwrap();
    let result = ResolutionResult::from_snapshot(snapshot);
    let first = result.root().unwrap();
    let second = result.root().unwrap();
    assert_eq!(first.id(), second.id());
    assert_ne!(first, second);
}

#[test]
fn graph_round_trips_through_snapshot() {
    let snapshot = ResolutionSnapshot::parse_toml(SCENARIO).unwrap();
    let (graph, root) = ComponentGraph::from_snapshot(&snapshot).unwrap();
    let back = graph.to_snapshot(root, &snapshot.attributes);
    assert_eq!(back, snapshot);
}

#[test]
fn unknown_selected_component_is_an_error() {
    let snapshot = ResolutionSnapshot::parse_toml(
        r#"
root = "org.a:a:1.0"

[[component]]
id = "org.a:a:1.0"
dependencies = [{ requested = "org.b:b:1.0", selected = "org.b:b:1.0" }]
"#,
    )
    .unwrap();
    let err = ComponentGraph::from_snapshot(&snapshot).unwrap_err();
    assert!(err.to_string().contains("unknown component org.b:b:1.0"), "got: {err}");
}

#[test]
fn dependency_needs_exactly_one_outcome() {
    let snapshot = ResolutionSnapshot::parse_toml(
        r#"
root = "org.a:a:1.0"

[[component]]
id = "org.a:a:1.0"
dependencies = [{ requested = "org.b:b:1.0" }]
"#,
    )
    .unwrap();
    let err = ComponentGraph::from_snapshot(&snapshot).unwrap_err();
    assert!(err.to_string().contains("exactly one"), "got: {err}");
}

#[test]
fn duplicate_component_is_an_error() {
    let snapshot = ResolutionSnapshot::parse_toml(
        r#"
root = "org.a:a:1.0"

[[component]]
id = "org.a:a:1.0"

[[component]]
id = "org.a:a:1.0"
"#,
    )
    .unwrap();
    let err = ComponentGraph::from_snapshot(&snapshot).unwrap_err();
    assert!(err.to_string().contains("more than once"), "got: {err}");
}

#[test]
fn missing_root_fails_every_enumeration() {
    let snapshot = ResolutionSnapshot::parse_toml(
        r#"
root = "project :app"

[[component]]
id = "org.a:a:1.0"
"#,
    )
    .unwrap();
    let result = ResolutionResult::from_snapshot(snapshot);
    let err = result.all_components().unwrap_err();
    assert!(err.to_string().contains("root project :app"), "got: {err}");
    assert!(result.all_dependencies().is_err());
}

#[test]
fn memoized_snapshot_result_loads_once() {
    let snapshot = Arc::new(ResolutionSnapshot::parse_toml(SCENARIO).unwrap());
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let source = Arc::clone(&snapshot);
    let result = ResolutionResult::memoized(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            materialize(&source)
        },
        snapshot.attributes.clone(),
    );

    let first = result.root().unwrap();
    let second = result.root().unwrap();
    assert_eq!(first, second);
    assert_eq!(result.all_components().unwrap().len(), 3);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn unresolved_summary_from_snapshot() {
    let snapshot = ResolutionSnapshot::parse_toml(SCENARIO).unwrap();
    let result = ResolutionResult::from_snapshot(snapshot);
    let unresolved = result.unresolved_dependencies().unwrap();
    assert_eq!(unresolved.len(), 1);
    assert!(matches!(
        unresolved[0].failure(),
        Some(ResolveFailure::NotFound { .. })
    ));
    assert_eq!(
        unresolved[0].from().id(),
        &ComponentIdentifier::project(":app")
    );
}
