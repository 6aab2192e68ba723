//! Control-volume bookkeeping: node priming and the donor-cell transfer update.

use crate::error::{SimError, SimResult};
use bf_core::units::{degc, pa};
use bf_fluids::PropertyModel;
use bf_graph::NodeState;

/// Below this mass [kg] a node's specific enthalpy is left as it was.
pub const MIN_MIXING_MASS_KG: f64 = 1e-3;

/// Height the reactor vessel water column can reach [m].
pub const VESSEL_HEIGHT_M: f64 = 21.3;

/// How much fluid a node starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialInventory {
    /// Liquid volume [m³]; mass follows from density.
    Volume(f64),
    /// Liquid mass [kg]; volume follows from density.
    Mass(f64),
}

/// Build the starting state of a node from its fixed T/P and inventory.
///
/// Specific enthalpy is always `h(P, T)`.
pub fn prime_node(
    model: &dyn PropertyModel,
    temperature_c: f64,
    pressure_pa: f64,
    max_volume_m3: f64,
    inventory: InitialInventory,
) -> SimResult<NodeState> {
    let (p, t) = (pa(pressure_pa), degc(temperature_c));
    let rho = model.density(p, t)?.value;
    let h = model.specific_enthalpy(p, t)?;

    let (volume_m3, mass_kg) = match inventory {
        InitialInventory::Volume(v) => (v, v * rho),
        InitialInventory::Mass(m) => (m / rho, m),
    };
    if !volume_m3.is_finite() || volume_m3 < 0.0 || !mass_kg.is_finite() || mass_kg < 0.0 {
        return Err(SimError::InvalidArg {
            what: "initial inventory must be finite and non-negative",
        });
    }
    if volume_m3 > max_volume_m3 {
        return Err(SimError::InvalidArg {
            what: "initial inventory exceeds max volume",
        });
    }

    Ok(NodeState::new(
        temperature_c,
        pressure_pa,
        volume_m3,
        mass_kg,
        h,
        max_volume_m3,
    ))
}

/// Mixed specific enthalpy after `m_in` at `h_in` enters `m` at `h`.
///
/// `(m·h + m_in·h_in) / (m + m_in)`, or `h` unchanged when the result would be
/// less than [`MIN_MIXING_MASS_KG`].
pub fn donor_cell_enthalpy(m: f64, h: f64, m_in: f64, h_in: f64) -> f64 {
    let total = m + m_in;
    if total < MIN_MIXING_MASS_KG {
        h
    } else {
        (m * h + m_in * h_in) / total
    }
}

/// New states for one upstream/downstream pair after moving `mass_kg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub upstream: NodeState,
    pub downstream: NodeState,
    pub mass_kg: f64,
    pub energy_j: f64,
}

/// Move `mass_kg` from `upstream` to `downstream`, carrying the upstream enthalpy.
///
/// `rho_up` and `rho_down` are each node's density at its own T/P and convert
/// the new masses back to volumes. The downstream volume is held at or below its
/// capacity.
pub fn transfer(
    upstream: NodeState,
    downstream: NodeState,
    mass_kg: f64,
    rho_up: f64,
    rho_down: f64,
) -> Transfer {
    let energy_j = mass_kg * upstream.h_j_per_kg;

    let mut up = upstream;
    let up_mass = (upstream.mass_kg - mass_kg).max(0.0);
    if up_mass >= MIN_MIXING_MASS_KG {
        up.h_j_per_kg = (upstream.energy_j() - energy_j) / up_mass;
    }
    up.mass_kg = up_mass;
    up.volume_m3 = up_mass / rho_up;

    let mut down = downstream;
    down.h_j_per_kg = donor_cell_enthalpy(
        downstream.mass_kg,
        downstream.h_j_per_kg,
        mass_kg,
        upstream.h_j_per_kg,
    );
    down.mass_kg = downstream.mass_kg + mass_kg;
    down.volume_m3 = (down.mass_kg / rho_down).min(down.max_volume_m3);

    Transfer {
        upstream: up,
        downstream: down,
        mass_kg,
        energy_j,
    }
}

/// Water level of a vessel node [m]: liquid volume over capacity, times `height_m`.
pub fn water_level(model: &dyn PropertyModel, state: &NodeState, height_m: f64) -> SimResult<f64> {
    if state.max_volume_m3 <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "water level needs a positive max volume",
        });
    }
    let v = model.specific_volume(state.pressure(), state.temperature())?;
    Ok(state.mass_kg * v / state.max_volume_m3 * height_m)
}
