//! GitHub Grind click actions. Pure game logic, no rendering or IO.
//!
//! Every action first pays its energy cost through [`spend_energy`]. If that
//! fails nothing else happens. Probabilistic actions draw exactly one uniform
//! value in `[0, 1)` per press and succeed iff it is below the chance.

use rand::Rng;

use super::error::GrindError;
use super::state::EconomyState;

// ── Costs ─────────────────────────────────────────────────────────────

pub const JOIN_CLUB_COST: f64 = 10.0;
pub const STUDY_COST: f64 = 15.0;
pub const BUILD_PROJECT_COST: f64 = 25.0;
pub const RESEARCH_COST: f64 = 30.0;
pub const INTERNSHIP_COST: f64 = 40.0;

// ── Gains ─────────────────────────────────────────────────────────────

const CLUB_SKILL: f64 = 3.0;
const CLUB_SKILL_PER_TIER: f64 = 1.0;
const CLUB_REP: f64 = 0.8;

const STUDY_SKILL: f64 = 6.0;
const STUDY_SKILL_PER_TIER: f64 = 2.0;
const STUDY_GPA: f64 = 0.05;

const PROJECT_SKILL_PER_STAR: f64 = 20.0;
const PROJECT_SKILL: f64 = 4.0;
const PROJECT_REP: f64 = 2.0;

const RESEARCH_SKILL: f64 = 6.0;
const RESEARCH_REP: f64 = 4.5;
const RESEARCH_STARS: f64 = 3.0;

const INTERNSHIP_REP: f64 = 6.5;

/// The five energy-spending actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    JoinClub,
    Study,
    BuildProject,
    ApplyResearch,
    ApplyInternship,
}

pub const ALL_ACTIONS: [ClickAction; 5] = [
    ClickAction::JoinClub,
    ClickAction::Study,
    ClickAction::BuildProject,
    ClickAction::ApplyResearch,
    ClickAction::ApplyInternship,
];

impl ClickAction {
    pub fn name(&self) -> &'static str {
        match self {
            ClickAction::JoinClub => "Join Club",
            ClickAction::Study => "Study",
            ClickAction::BuildProject => "Build Project",
            ClickAction::ApplyResearch => "Apply Research",
            ClickAction::ApplyInternship => "Apply Internship",
        }
    }

    pub fn energy_cost(&self) -> f64 {
        match self {
            ClickAction::JoinClub => JOIN_CLUB_COST,
            ClickAction::Study => STUDY_COST,
            ClickAction::BuildProject => BUILD_PROJECT_COST,
            ClickAction::ApplyResearch => RESEARCH_COST,
            ClickAction::ApplyInternship => INTERNSHIP_COST,
        }
    }
}

/// What an accepted intent did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A deterministic action (or purchase / prestige) went through.
    Completed(String),
    /// A probabilistic action rolled under its chance.
    Accepted(String),
    /// A probabilistic action rolled over its chance. Energy is still spent.
    Rejected(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Completed(m) | Outcome::Accepted(m) | Outcome::Rejected(m) => m,
        }
    }

    /// Worth highlighting in the log.
    pub fn is_important(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

// ── Energy ────────────────────────────────────────────────────────────

/// Deduct `cost` energy, or fail without touching the state.
pub fn spend_energy(state: &mut EconomyState, cost: f64) -> Result<(), GrindError> {
    if state.energy < cost {
        return Err(GrindError::Fatigued {
            needed: cost,
            have: state.energy,
        });
    }
    state.energy -= cost;
    Ok(())
}

pub fn can_afford(state: &EconomyState, action: ClickAction) -> bool {
    state.energy >= action.energy_cost()
}

// ── Dispatch ──────────────────────────────────────────────────────────

pub fn perform<R: Rng>(
    state: &mut EconomyState,
    action: ClickAction,
    rng: &mut R,
) -> Result<Outcome, GrindError> {
    match action {
        ClickAction::JoinClub => join_club(state),
        ClickAction::Study => study(state),
        ClickAction::BuildProject => build_project(state),
        ClickAction::ApplyResearch => apply_research(state, rng),
        ClickAction::ApplyInternship => apply_internship(state, rng),
    }
}

// ── Deterministic actions ─────────────────────────────────────────────

pub fn join_club(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    spend_energy(state, JOIN_CLUB_COST)?;
    state.skill += CLUB_SKILL + state.tier_index as f64 * CLUB_SKILL_PER_TIER;
    state.gain_reputation(CLUB_REP);
    Ok(Outcome::Completed(
        "You attended a dev club meeting and met some people.".into(),
    ))
}

pub fn study(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    spend_energy(state, STUDY_COST)?;
    state.skill += STUDY_SKILL + state.tier_index as f64 * STUDY_SKILL_PER_TIER;
    state.adjust_gpa(STUDY_GPA);
    Ok(Outcome::Completed(
        "You studied algorithms; skill and GPA went up.".into(),
    ))
}

/// Stars scale with skill *before* this project's own skill gain.
pub fn build_project(state: &mut EconomyState) -> Result<Outcome, GrindError> {
    spend_energy(state, BUILD_PROJECT_COST)?;
    let base_stars = 1.0 + (state.skill / PROJECT_SKILL_PER_STAR).floor();
    state.gain_stars(base_stars);
    state.skill += PROJECT_SKILL;
    state.gain_reputation(PROJECT_REP);
    Ok(Outcome::Completed(format!(
        "You shipped a small GitHub project (+{} stars).",
        (base_stars * state.star_multiplier()) as u64
    )))
}

// ── Probabilistic actions ─────────────────────────────────────────────

/// Research acceptance chance. Rises with skill and with GPA above 3.0.
pub fn research_chance(state: &EconomyState) -> f64 {
    (0.15 + state.skill / 100.0 + (state.gpa - 3.0) * 0.25).clamp(0.08, 0.9)
}

/// Internship offer chance. Rises with skill, stars and tier.
pub fn internship_chance(state: &EconomyState) -> f64 {
    let base = 0.08 + state.skill / 160.0 + state.stars / 220.0;
    let tier_bonus = state.tier_index as f64 * 0.03;
    (base + tier_bonus).clamp(0.05, 0.85)
}

pub fn apply_research<R: Rng>(
    state: &mut EconomyState,
    rng: &mut R,
) -> Result<Outcome, GrindError> {
    spend_energy(state, RESEARCH_COST)?;
    Ok(settle_research(state, rng.random::<f64>()))
}

/// Resolve a research application whose energy is already paid.
pub fn settle_research(state: &mut EconomyState, roll: f64) -> Outcome {
    if roll >= research_chance(state) {
        return Outcome::Rejected("No response from professors this time.".into());
    }
    state.skill += RESEARCH_SKILL;
    state.gain_reputation(RESEARCH_REP);
    state.gain_stars(RESEARCH_STARS);
    Outcome::Accepted("You got into a research project!".into())
}

pub fn apply_internship<R: Rng>(
    state: &mut EconomyState,
    rng: &mut R,
) -> Result<Outcome, GrindError> {
    spend_energy(state, INTERNSHIP_COST)?;
    Ok(settle_internship(state, rng.random::<f64>()))
}

/// Resolve an internship application whose energy is already paid.
pub fn settle_internship(state: &mut EconomyState, roll: f64) -> Outcome {
    if roll >= internship_chance(state) {
        return Outcome::Rejected("That application didn't work out. LeetCode more.".into());
    }
    state.offers += 1;
    state.gain_reputation(INTERNSHIP_REP);
    Outcome::Accepted(format!(
        "You received an internship offer! ({} total)",
        state.offers
    ))
}

// ── Formatting ────────────────────────────────────────────────────────

/// Format a multiplier, keeping one decimal while it is small.
pub fn format_multiplier(m: f64) -> String {
    if m < 1_000.0 {
        format!("{:.1}", m)
    } else {
        format_number(m)
    }
}

/// Format a number with thousands separators (e.g. 1234567.8 → "1,234,567").
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "∞".to_string();
    }
    if n.abs() >= 1e15 {
        return format!("{:.2e}", n);
    }
    let whole = n.abs().floor() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0.0 && whole > 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
