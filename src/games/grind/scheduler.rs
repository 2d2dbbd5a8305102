//! Passive per-second update.

use super::state::EconomyState;

/// Real-time length of one game tick.
pub const TICK_MS: f64 = 1000.0;
/// Reputation earned per tick before the multiplier.
pub const PASSIVE_REP: f64 = 0.08;
/// Autosave fires on every tick that is a multiple of this.
pub const AUTOSAVE_INTERVAL: u64 = 30;

/// What happened during one tick that the caller has to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub autosave_due: bool,
}

/// Run one tick: count, regenerate energy, pay passive reputation.
pub fn tick(state: &mut EconomyState) -> TickReport {
    state.tick += 1;
    state.add_energy(state.energy_regen);
    state.gain_reputation(PASSIVE_REP);
    TickReport {
        autosave_due: state.tick % AUTOSAVE_INTERVAL == 0,
    }
}

/// Run `delta_ticks` ticks. The autosave flag is set if any of them asked for it.
pub fn run(state: &mut EconomyState, delta_ticks: u32) -> TickReport {
    let mut report = TickReport::default();
    for _ in 0..delta_ticks {
        report.autosave_due |= tick(state).autosave_due;
    }
    report
}
