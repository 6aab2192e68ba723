//! Result querying: path listings, water level and CSV export.

use std::borrow::Cow;

use bf_graph::{GraphError, Topology, resolve_all};
use bf_sim::{SimRecord, Simulation, VESSEL_HEIGHT_M, water_level};

use crate::error::{AppError, AppResult};

/// A resolved flow path by name.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSummary {
    pub source: String,
    pub destination: String,
    pub pipes: Vec<String>,
}

/// Resolution outcome for every node-rooted pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PathListing {
    pub paths: Vec<PathSummary>,
    pub skipped: Vec<(String, GraphError)>,
}

fn node_name(topology: &Topology, id: bf_core::NodeId) -> String {
    topology
        .node(id)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| id.to_string())
}

pub fn list_paths(topology: &Topology) -> PathListing {
    let set = resolve_all(topology);
    let paths = set
        .paths
        .iter()
        .map(|path| PathSummary {
            source: node_name(topology, path.source),
            destination: node_name(topology, path.destination),
            pipes: path
                .pipes
                .iter()
                .filter_map(|id| topology.pipe(*id).map(|p| p.name.clone()))
                .collect(),
        })
        .collect();
    let skipped = set.skipped.into_iter().map(|s| (s.pipe, s.error)).collect();
    PathListing { paths, skipped }
}

/// Water level of a vessel node [m] for a vessel of the standard height.
pub fn vessel_water_level(sim: &Simulation, node: &str) -> AppResult<f64> {
    let state = sim
        .topology()
        .node_by_name(node)
        .map(|n| n.state)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown node: {}", node)))?;
    Ok(water_level(
        sim.transport().model(),
        &state,
        VESSEL_HEIGHT_M,
    )?)
}

/// Quote a field that contains a separator, quote or line break.
fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

/// One row per node per recorded tick.
pub fn records_to_csv(records: &[SimRecord]) -> String {
    let mut csv = String::from("tick,time_s,node,mass_kg,enthalpy_j_per_kg,volume_m3\n");
    for record in records {
        for node in &record.nodes {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                record.tick,
                record.time_s,
                csv_field(&node.name),
                node.mass_kg,
                node.h_j_per_kg,
                node.volume_m3
            ));
        }
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_sim::NodeSnapshot;

    #[test]
    fn csv_has_header_and_rows() {
        let records = vec![SimRecord {
            tick: 3,
            time_s: 0.3,
            nodes: vec![
                NodeSnapshot {
                    name: "A".to_string(),
                    mass_kg: 10.0,
                    h_j_per_kg: 146_000.0,
                    volume_m3: 0.01,
                },
                NodeSnapshot {
                    name: "B".to_string(),
                    mass_kg: 0.0,
                    h_j_per_kg: 0.0,
                    volume_m3: 0.0,
                },
            ],
            thermal_power: 0.0,
        }];
        let csv = records_to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "tick,time_s,node,mass_kg,enthalpy_j_per_kg,volume_m3");
        assert_eq!(lines[1], "3,0.3,A,10,146000,0.01");
        assert_eq!(lines[2], "3,0.3,B,0,0,0");
    }

    #[test]
    fn csv_quotes_awkward_node_names() {
        let records = vec![SimRecord {
            tick: 0,
            time_s: 0.0,
            nodes: vec![NodeSnapshot {
                name: "Dome, \"upper\"".to_string(),
                mass_kg: 1.0,
                h_j_per_kg: 2.0,
                volume_m3: 3.0,
            }],
            thermal_power: 0.0,
        }];
        let csv = records_to_csv(&records);
        assert_eq!(csv.lines().nth(1), Some("0,0,\"Dome, \"\"upper\"\"\",1,2,3"));
        assert_eq!(csv_field("ReactorVessel"), "ReactorVessel");
    }
}
