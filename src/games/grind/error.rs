//! Rejections reported back to the player.
//!
//! None of these are fatal. Whenever one is returned the state was left
//! exactly as it was; its `Display` text goes straight into the status log.

use super::tables::TIERS;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrindError {
    /// Not enough energy for a click action.
    #[error(
        "Too tired for that ({needed:.0} energy needed, {left} left). Wait a bit to recover.",
        left = .have.floor()
    )]
    Fatigued { needed: f64, have: f64 },

    /// Not enough reputation for an upgrade.
    #[error("Not enough reputation for {upgrade} ({needed:.1} needed, {have:.1} on hand).")]
    InsufficientReputation {
        upgrade: &'static str,
        needed: f64,
        have: f64,
    },

    /// Tier prestige gate not met.
    #[error("Need at least {needed} offers to move up a tier (you have {have}).")]
    TierLocked { needed: u32, have: u32 },

    /// Career prestige gate not met.
    #[error(
        "Career move needs {last_tier} and {needed_offers} offers (you are at tier {tier}, {have_offers} offers).",
        last_tier = TIERS[TIERS.len() - 1].name
    )]
    CareerLocked {
        tier: u32,
        needed_offers: u32,
        have_offers: u32,
    },
}
