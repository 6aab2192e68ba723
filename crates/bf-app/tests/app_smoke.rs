//! Smoke test for the service layer against the bundled sample network.

use std::path::PathBuf;

use bf_app::{
    RunOptions, compile_network, build_property_model, list_paths, load_network, records_to_csv,
    run_network, run_network_with_progress, summarize, vessel_water_level,
};

fn sample() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../projects/bwr_loop.yaml")
}

#[test]
fn sample_network_loads_and_summarizes() {
    let file = load_network(&sample()).expect("load sample");
    let summary = summarize(&file);
    assert_eq!(summary.node_count, 3);
    assert_eq!(summary.pipe_count, 4);
    assert_eq!(summary.node_rooted_pipes, 2);
    assert!(summary.has_reactor);
}

#[test]
fn sample_paths_resolve() {
    let file = load_network(&sample()).unwrap();
    let model = build_property_model(file.fluid).unwrap();
    let topology = compile_network(&file, model.as_ref()).unwrap();

    let listing = list_paths(&topology);
    assert!(listing.skipped.is_empty());
    assert_eq!(listing.paths.len(), 2);

    let riser = listing
        .paths
        .iter()
        .find(|p| p.source == "ReactorVessel")
        .expect("riser path");
    assert_eq!(riser.pipes, vec!["RISER-1", "RISER-2", "RISER-3"]);
    assert_eq!(riser.destination, "SteamDome");
}

#[test]
fn short_run_moves_mass_and_exports_csv() {
    let file = load_network(&sample()).unwrap();
    let options = RunOptions {
        ticks: Some(5),
        record_every: Some(1),
        ..RunOptions::default()
    };

    let mut seen = Vec::new();
    let mut on_tick = |p: bf_app::TickProgress| seen.push(p.tick);
    let response = run_network_with_progress(&file, &options, Some(&mut on_tick)).unwrap();
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);

    assert_eq!(response.summary.ticks, 5);
    assert!(response.summary.moved_mass_kg > 0.0);
    assert_eq!(response.summary.skipped_path_ticks, 0);
    // initial state plus one record per tick
    assert_eq!(response.records.len(), 6);

    let csv = records_to_csv(&response.records);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("tick,time_s,node,mass_kg,enthalpy_j_per_kg,volume_m3")
    );
    assert_eq!(lines.count(), 6 * 3);

    let level = vessel_water_level(&response.simulation, "ReactorVessel").unwrap();
    assert!(level > 0.0 && level <= 21.3);
    assert!(vessel_water_level(&response.simulation, "Nope").is_err());
}

#[test]
fn runs_are_repeatable() {
    let file = load_network(&sample()).unwrap();
    let options = RunOptions {
        ticks: Some(3),
        ..RunOptions::default()
    };
    let a = run_network(&file, &options).unwrap();
    let b = run_network(&file, &options).unwrap();
    assert_eq!(a.records, b.records);
}
