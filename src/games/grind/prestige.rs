//! Prestige: two nested reset loops.
//!
//! Tier prestige is the soft reset. It advances the academic tier and wipes
//! the per-run resources but keeps reputation, upgrades and regen.
//!
//! Career prestige is the hard reset. It is available at the last named tier
//! with enough offers. Everything returns to defaults except the career
//! index (advanced) and the tick counter (which is never reset).

use super::error::GrindError;
use super::logic::Outcome;
use super::state::{EconomyState, DEFAULT_ENERGY, DEFAULT_GPA};
use super::tables::LAST_TIER;

/// Offers required to move up one tier.
pub const TIER_OFFERS: u32 = 5;
/// Offers required (at the last tier) to move up one career.
pub const CAREER_OFFERS: u32 = 20;
/// Starting skill per tier after a tier prestige.
pub const SKILL_PER_TIER_BASELINE: f64 = 10.0;

pub fn can_advance_tier(state: &EconomyState) -> bool {
    state.offers >= TIER_OFFERS
}

pub fn can_advance_career(state: &EconomyState) -> bool {
    state.tier_index >= LAST_TIER && state.offers >= CAREER_OFFERS
}

pub fn advance_tier(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    if !can_advance_tier(state) {
        return Err(GrindError::TierLocked {
            needed: TIER_OFFERS,
            have: state.offers,
        });
    }

    state.tier_index += 1;
    state.semester += 1;

    state.energy = DEFAULT_ENERGY.min(state.max_energy);
    state.skill = SKILL_PER_TIER_BASELINE * state.tier_index as f64;
    state.stars = 0.0;
    state.offers = 0;
    state.gpa = DEFAULT_GPA;

    Ok(Outcome::Completed(format!(
        "You moved up to {} (semester {}), starting a new chapter.",
        state.tier_name(),
        state.semester
    )))
}

pub fn advance_career(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    if !can_advance_career(state) {
        return Err(GrindError::CareerLocked {
            tier: state.tier_index,
            needed_offers: CAREER_OFFERS,
            have_offers: state.offers,
        });
    }

    let career_index = state.career_index + 1;
    let tick = state.tick;
    *state = EconomyState {
        tick,
        career_index,
        ..EconomyState::default()
    };

    Ok(Outcome::Completed(format!(
        "Promoted to {}! Back to community college with a x{} career boost.",
        state.career_name(),
        super::logic::format_number(super::tables::career(career_index).multiplier)
    )))
}
