//! GitHub Grind economy state.

use serde::{Deserialize, Serialize};

use super::tables::{self, LAST_TIER, TIERS};

pub const DEFAULT_ENERGY: f64 = 100.0;
pub const DEFAULT_MAX_ENERGY: f64 = 100.0;
pub const DEFAULT_ENERGY_REGEN: f64 = 5.0;
pub const DEFAULT_GPA: f64 = 3.0;

pub const GPA_MIN: f64 = 2.0;
pub const GPA_MAX: f64 = 4.0;

/// Reputation multiplier bonus per streak level.
pub const STREAK_REP_BONUS: f64 = 0.2;
/// Star multiplier bonus per streak level.
pub const STREAK_STAR_BONUS: f64 = 0.4;

/// The whole mutable economy. Everything else in the game reads from this.
///
/// `#[serde(default)]` makes loading a shallow merge over [`Default`]:
/// fields missing from a snapshot keep their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyState {
    pub tick: u64,

    pub tier_index: u32,
    pub career_index: u32,
    pub semester: u32,

    pub energy: f64,
    pub max_energy: f64,
    pub energy_regen: f64,

    pub skill: f64,
    pub reputation: f64,
    pub stars: f64,
    pub offers: u32,
    pub gpa: f64,

    pub coffee_level: u32,
    pub streak_level: u32,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            tick: 0,
            tier_index: 0,
            career_index: 0,
            semester: 1,
            energy: DEFAULT_ENERGY,
            max_energy: DEFAULT_MAX_ENERGY,
            energy_regen: DEFAULT_ENERGY_REGEN,
            skill: 0.0,
            reputation: 0.0,
            stars: 0.0,
            offers: 0,
            gpa: DEFAULT_GPA,
            coffee_level: 0,
            streak_level: 0,
        }
    }
}

impl EconomyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier_name(&self) -> &'static str {
        tables::tier(self.tier_index).name
    }

    pub fn career_name(&self) -> &'static str {
        tables::career(self.career_index).name
    }

    /// Tier × career × streak. Every reputation gain is scaled by this.
    pub fn rep_multiplier(&self) -> f64 {
        tables::tier(self.tier_index).multiplier
            * tables::career(self.career_index).multiplier
            * (1.0 + self.streak_level as f64 * STREAK_REP_BONUS)
    }

    /// Every star gain is scaled by this.
    pub fn star_multiplier(&self) -> f64 {
        1.0 + self.streak_level as f64 * STREAK_STAR_BONUS
    }

    /// Credit reputation through the total multiplier.
    pub fn gain_reputation(&mut self, base: f64) {
        self.reputation += base * self.rep_multiplier();
    }

    pub fn gain_stars(&mut self, base: f64) {
        self.stars += base * self.star_multiplier();
    }

    pub fn adjust_gpa(&mut self, delta: f64) {
        self.gpa = (self.gpa + delta).clamp(GPA_MIN, GPA_MAX);
    }

    /// Add energy, clamped to `[0, max_energy]`.
    pub fn add_energy(&mut self, amount: f64) {
        self.energy = (self.energy + amount).clamp(0.0, self.max_energy);
    }

    /// Energy as a 0..=100 percentage of the cap.
    pub fn energy_percent(&self) -> f64 {
        if self.max_energy <= 0.0 {
            return 0.0;
        }
        (self.energy / self.max_energy * 100.0).clamp(0.0, 100.0)
    }

    /// True once the stored tier has reached (or passed) the last named tier.
    pub fn at_last_tier(&self) -> bool {
        self.tier_index >= LAST_TIER
    }

    /// Pull every field back into its valid range.
    ///
    /// Snapshots come from an untrusted key-value store, so a restored state
    /// goes through here before the engine sees it.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.max_energy.is_finite() && self.max_energy > 0.0) {
            self.max_energy = defaults.max_energy;
        }
        self.energy = finite_or(self.energy, defaults.energy).clamp(0.0, self.max_energy);
        self.energy_regen = finite_or(self.energy_regen, defaults.energy_regen).max(0.0);
        self.skill = finite_or(self.skill, 0.0).max(0.0);
        self.reputation = finite_or(self.reputation, 0.0).max(0.0);
        self.stars = finite_or(self.stars, 0.0).max(0.0);
        self.gpa = finite_or(self.gpa, defaults.gpa).clamp(GPA_MIN, GPA_MAX);
        self.semester = self.semester.max(1);
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Where a tier sits relative to the player, for the progress list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TierStatus {
    Done,
    Current,
    Locked,
}

/// Status of every named tier, in rank order.
///
/// Past the last named tier the last entry stays `Current`.
pub fn tier_progress(state: &EconomyState) -> Vec<TierStatus> {
    let current = state.tier_index.min(LAST_TIER) as usize;
    (0..TIERS.len())
        .map(|i| {
            if i < current {
                TierStatus::Done
            } else if i == current {
                TierStatus::Current
            } else {
                TierStatus::Locked
            }
        })
        .collect()
}
