/// Per-tick record of requested versus allocated energy for one cell.
///
/// The budget is transient: it is zeroed at the end of every tick and is
/// never written into save data, which is why it carries no serde derives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyBudget {
    /// Energy needed for functions that cause damage when they do not run.
    pub mandatory_required: f32,
    /// Energy for functions that can be scaled down when short.
    pub discretionary_required: f32,
    /// Energy taken from storage (or produced) and set aside this tick.
    pub allocated: f32,
}
