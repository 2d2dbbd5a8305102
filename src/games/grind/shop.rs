//! Upgrade shop: coffee (energy regen) and streak (multipliers).
//!
//! Both tracks cost `base × growth^level` reputation.

use super::error::GrindError;
use super::logic::{format_multiplier, Outcome};
use super::state::EconomyState;

pub const COFFEE_BASE_COST: f64 = 10.0;
pub const COFFEE_GROWTH: f64 = 1.5;
/// Energy regen added per coffee level.
pub const COFFEE_REGEN_BOOST: f64 = 1.5;

pub const STREAK_BASE_COST: f64 = 50.0;
pub const STREAK_GROWTH: f64 = 1.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upgrade {
    Coffee,
    Streak,
}

impl Upgrade {
    pub fn name(&self) -> &'static str {
        match self {
            Upgrade::Coffee => "Coffee Habit",
            Upgrade::Streak => "GitHub Streak",
        }
    }

    pub fn level(&self, state: &EconomyState) -> u32 {
        match self {
            Upgrade::Coffee => state.coffee_level,
            Upgrade::Streak => state.streak_level,
        }
    }

    /// Cost of buying the given level.
    pub fn cost_at(&self, level: u32) -> f64 {
        match self {
            Upgrade::Coffee => COFFEE_BASE_COST * COFFEE_GROWTH.powi(level as i32),
            Upgrade::Streak => STREAK_BASE_COST * STREAK_GROWTH.powi(level as i32),
        }
    }

    /// Cost of the next level for this state.
    pub fn next_cost(&self, state: &EconomyState) -> f64 {
        self.cost_at(self.level(state))
    }
}

pub fn can_buy(state: &EconomyState, upgrade: Upgrade) -> bool {
    state.reputation >= upgrade.next_cost(state)
}

pub fn buy(state: &mut EconomyState, upgrade: Upgrade) -> Result<Outcome, GrindError> {
    let cost = upgrade.next_cost(state);
    if state.reputation < cost {
        return Err(GrindError::InsufficientReputation {
            upgrade: upgrade.name(),
            needed: cost,
            have: state.reputation,
        });
    }
    state.reputation -= cost;

    let message = match upgrade {
        Upgrade::Coffee => {
            state.coffee_level += 1;
            state.energy_regen += COFFEE_REGEN_BOOST;
            format!(
                "Caffeine loaded: regen now {:.1}/s (Lv.{}).",
                state.energy_regen, state.coffee_level
            )
        }
        Upgrade::Streak => {
            state.streak_level += 1;
            format!(
                "Streak maintained: reputation x{} (Lv.{}).",
                format_multiplier(state.rep_multiplier()),
                state.streak_level
            )
        }
    };
    Ok(Outcome::Completed(message))
}

pub fn buy_coffee(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    buy(state, Upgrade::Coffee)
}

pub fn buy_streak(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    buy(state, Upgrade::Streak)
}
