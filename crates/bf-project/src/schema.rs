//! Network file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub fluid: FluidDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub pipes: Vec<PipeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactor: Option<ReactorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationDef>,
}

/// Property backend used for the whole network.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FluidDef {
    /// In-tree compressed-liquid correlation.
    #[default]
    LiquidWater,
    /// CoolProp water (needs the `coolprop` feature at run time).
    CoolProp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub temperature_c: f64,
    pub pressure_pa: f64,
    pub max_volume_m3: f64,
    pub initial: InitialDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InitialDef {
    Volume { volume_m3: f64 },
    Mass { mass_kg: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub id: String,
    pub diameter_mm: f64,
    pub length_m: f64,
    #[serde(default)]
    pub minor_k: f64,
    pub from: EndpointDef,
    pub to: EndpointDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum EndpointDef {
    Node { id: String },
    Junction { id: String },
}

impl EndpointDef {
    pub fn id(&self) -> &str {
        match self {
            EndpointDef::Node { id } | EndpointDef::Junction { id } => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactorDef {
    #[serde(default = "default_initial_neutrons")]
    pub initial_neutrons: f64,
    #[serde(default)]
    pub rod_position: f64,
}

impl Default for ReactorDef {
    fn default() -> Self {
        Self {
            initial_neutrons: default_initial_neutrons(),
            rod_position: 0.0,
        }
    }
}

fn default_initial_neutrons() -> f64 {
    1_000.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            dt_s: default_dt_s(),
            ticks: default_ticks(),
            record_every: default_record_every(),
        }
    }
}

fn default_dt_s() -> f64 {
    0.1
}

fn default_ticks() -> usize {
    100
}

fn default_record_every() -> usize {
    1
}
