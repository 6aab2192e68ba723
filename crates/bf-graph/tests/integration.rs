//! Integration tests for bf-graph.

use bf_graph::{
    Endpoint, GraphError, NodeState, PipeGeometry, TopologyBuilder, build_flow_paths, resolve_all,
};

fn node(pressure_pa: f64) -> NodeState {
    NodeState::new(35.0, pressure_pa, 10.0, 9_940.0, 146_800.0, 100.0)
}

#[test]
fn vessel_loop_resolves() {
    // Feedwater -> [FW] -> Vessel -> [R1] -> [R2] -> [R3] -> Dome
    let mut builder = TopologyBuilder::new();
    let feed = builder.add_node("Feedwater", node(101_325.0));
    let vessel = builder.add_node("Vessel", node(230_000.0));
    let dome = builder.add_node("Dome", node(200_000.0));
    let g = PipeGeometry::new(450.0, 10.0, 1.0);
    builder.add_pipe("FW", g, Endpoint::node("Feedwater"), Endpoint::node("Vessel"));
    builder.add_pipe("R1", g, Endpoint::node("Vessel"), Endpoint::junction("R2"));
    builder.add_pipe("R2", g, Endpoint::junction("R1"), Endpoint::junction("R3"));
    builder.add_pipe("R3", g, Endpoint::junction("R2"), Endpoint::node("Dome"));
    // Junction-rooted pipes are never path starts
    builder.add_pipe("Orphan", g, Endpoint::junction("R3"), Endpoint::node("Dome"));

    let topology = builder.build().unwrap();
    let paths = build_flow_paths(&topology);

    assert_eq!(paths.len(), 2);
    assert_eq!((paths[0].source, paths[0].destination), (feed, vessel));
    assert_eq!((paths[1].source, paths[1].destination), (vessel, dome));
    let names: Vec<&str> = paths[1]
        .pipes
        .iter()
        .map(|id| topology.pipe(*id).unwrap().name.as_str())
        .collect();
    assert_eq!(names, ["R1", "R2", "R3"]);
}

#[test]
fn resolution_is_deterministic() {
    let mut builder = TopologyBuilder::new();
    for i in 0..8 {
        builder.add_node(format!("N{i}"), node(200_000.0 + i as f64));
    }
    for i in 0..7 {
        builder.add_pipe(
            format!("P{i}"),
            PipeGeometry::new(100.0, 5.0, 0.5),
            Endpoint::node(format!("N{i}")),
            Endpoint::node(format!("N{}", i + 1)),
        );
    }
    let topology = builder.build().unwrap();

    let first = resolve_all(&topology);
    let second = resolve_all(&topology);
    assert_eq!(first, second);
    let order: Vec<u32> = first.paths.iter().map(|p| p.pipes[0].index()).collect();
    assert_eq!(order, (0..7).collect::<Vec<_>>());
}

#[test]
fn self_loop_reports_cycle() {
    let mut builder = TopologyBuilder::new();
    builder.add_node("X", node(200_000.0));
    builder.add_pipe(
        "A",
        PipeGeometry::new(100.0, 5.0, 0.5),
        Endpoint::node("X"),
        Endpoint::junction("A"),
    );
    let topology = builder.build().unwrap();

    let set = resolve_all(&topology);
    assert!(set.paths.is_empty());
    assert_eq!(
        set.skipped[0].error,
        GraphError::CyclicTopology { pipe: "A".into() }
    );
    assert!(!set.skipped[0].error.is_config_error());
}

#[test]
fn state_round_trips_through_store() {
    let mut builder = TopologyBuilder::new();
    let id = builder.add_node("Vessel", node(230_000.0));
    let mut topology = builder.build().unwrap();

    let mut s = topology.state(id).unwrap();
    s.mass_kg += 5.0;
    topology.set_state(id, s).unwrap();
    assert_eq!(topology.state(id).unwrap().mass_kg, 9_945.0);
    assert!((topology.total_mass_kg() - 9_945.0).abs() < 1e-9);
}
