/// Progress of a running simulation, emitted after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickProgress {
    pub tick: usize,
    pub ticks: usize,
    pub sim_time_s: f64,
    pub fraction_complete: f64,
    /// Mass moved over all paths during this tick [kg].
    pub moved_mass_kg: f64,
    /// Paths skipped during this tick.
    pub skipped_paths: usize,
    pub thermal_power: f64,
}
