//! Semantic action IDs for GitHub Grind click targets.

// ── Click actions ────────────────────────────────────────────
pub const JOIN_CLUB: u16 = 0;
pub const STUDY: u16 = 1;
pub const BUILD_PROJECT: u16 = 2;
pub const APPLY_RESEARCH: u16 = 3;
pub const APPLY_INTERNSHIP: u16 = 4;

// ── Shop ─────────────────────────────────────────────────────
pub const BUY_COFFEE: u16 = 10;
pub const BUY_STREAK: u16 = 11;

// ── Prestige ─────────────────────────────────────────────────
pub const PRESTIGE: u16 = 20;
pub const CAREER_PRESTIGE: u16 = 21;

// ── System ───────────────────────────────────────────────────
pub const SAVE: u16 = 30;
