//! Property tests: economy invariants hold under arbitrary play.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::logic::{self, ClickAction, ALL_ACTIONS};
use super::prestige;
use super::save::{self, MemoryStore};
use super::scheduler;
use super::shop::{self, Upgrade};
use super::state::{EconomyState, GPA_MAX, GPA_MIN};
use super::{GrindGame, Intent, ALL_INTENTS};

/// One step of play: an intent (by index) or a run of idle ticks.
#[derive(Clone, Debug)]
enum Step {
    Intent(usize),
    Idle(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..ALL_INTENTS.len()).prop_map(Step::Intent),
        1 => (1u32..40).prop_map(Step::Idle),
    ]
}

fn arb_state() -> impl Strategy<Value = EconomyState> {
    (
        (0u64..100_000, 0u32..8, 0u32..7, 1u32..20),
        (0.0f64..=100.0, 0.0f64..20.0, 0.0f64..500.0),
        (0.0f64..1e7, 0.0f64..500.0, 0u32..30, GPA_MIN..=GPA_MAX),
        (0u32..12, 0u32..12),
    )
        .prop_map(
            |(
                (tick, tier_index, career_index, semester),
                (energy, energy_regen, skill),
                (reputation, stars, offers, gpa),
                (coffee_level, streak_level),
            )| EconomyState {
                tick,
                tier_index,
                career_index,
                semester,
                energy,
                energy_regen,
                skill,
                reputation,
                stars,
                offers,
                gpa,
                coffee_level,
                streak_level,
                ..EconomyState::default()
            },
        )
}

fn assert_in_bounds(s: &EconomyState) {
    assert!(s.energy >= 0.0 && s.energy <= s.max_energy, "energy {}", s.energy);
    assert!(s.gpa >= GPA_MIN && s.gpa <= GPA_MAX, "gpa {}", s.gpa);
    assert!(s.skill >= 0.0 && s.reputation >= 0.0 && s.stars >= 0.0);
    assert!(s.semester >= 1);
}

proptest! {
    #[test]
    fn invariants_hold_under_random_play(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 0..200),
    ) {
        let mut game = GrindGame::with_store(Box::new(MemoryStore::new()), seed);
        for step in steps {
            let tick_before = game.state.tick;
            match step {
                Step::Intent(i) => {
                    game.dispatch(ALL_INTENTS[i]);
                    prop_assert_eq!(game.state.tick, tick_before);
                }
                Step::Idle(n) => {
                    scheduler::run(&mut game.state, n);
                    prop_assert_eq!(game.state.tick, tick_before + n as u64);
                }
            }
            assert_in_bounds(&game.state);
        }
    }

    #[test]
    fn fatigued_actions_change_nothing(
        mut state in arb_state(),
        action_idx in 0..ALL_ACTIONS.len(),
        seed in any::<u64>(),
    ) {
        let action = ALL_ACTIONS[action_idx];
        state.energy = (action.energy_cost() - 0.5).max(0.0);
        let before = state.clone();
        let mut rng = SmallRng::seed_from_u64(seed);
        prop_assert!(logic::perform(&mut state, action, &mut rng).is_err());
        prop_assert_eq!(state, before);
    }

    #[test]
    fn affordable_actions_spend_exact_cost(
        mut state in arb_state(),
        action_idx in 0..ALL_ACTIONS.len(),
        seed in any::<u64>(),
    ) {
        let action = ALL_ACTIONS[action_idx];
        state.energy = state.energy.max(action.energy_cost());
        let energy_before = state.energy;
        let mut rng = SmallRng::seed_from_u64(seed);
        prop_assert!(logic::perform(&mut state, action, &mut rng).is_ok());
        prop_assert!((state.energy - (energy_before - action.energy_cost())).abs() < 1e-9);
    }

    #[test]
    fn upgrade_costs_strictly_increase(level in 0u32..40) {
        for upgrade in [Upgrade::Coffee, Upgrade::Streak] {
            prop_assert!(upgrade.cost_at(level + 1) > upgrade.cost_at(level));
        }
    }

    #[test]
    fn purchase_is_all_or_nothing(mut state in arb_state(), coffee in any::<bool>()) {
        let upgrade = if coffee { Upgrade::Coffee } else { Upgrade::Streak };
        let before = state.clone();
        let cost = upgrade.next_cost(&state);
        match shop::buy(&mut state, upgrade) {
            Ok(_) => {
                prop_assert!((state.reputation - (before.reputation - cost)).abs() < 1e-6);
                prop_assert_eq!(upgrade.level(&state), upgrade.level(&before) + 1);
            }
            Err(_) => prop_assert_eq!(state, before),
        }
    }

    #[test]
    fn tier_prestige_keeps_long_term_progress(mut state in arb_state()) {
        state.offers = state.offers.max(prestige::TIER_OFFERS);
        let before = state.clone();
        prop_assert!(prestige::advance_tier(&mut state).is_ok());
        prop_assert_eq!(state.tier_index, before.tier_index + 1);
        prop_assert_eq!(state.reputation, before.reputation);
        prop_assert_eq!(state.coffee_level, before.coffee_level);
        prop_assert_eq!(state.streak_level, before.streak_level);
        prop_assert_eq!(state.energy_regen, before.energy_regen);
        prop_assert_eq!(state.career_index, before.career_index);
        prop_assert_eq!(state.offers, 0);
        prop_assert_eq!(state.stars, 0.0);
    }

    #[test]
    fn multipliers_never_shrink_on_prestige(mut state in arb_state()) {
        state.offers = prestige::CAREER_OFFERS;
        let tier_before = state.rep_multiplier();
        let mut tiered = state.clone();
        prestige::advance_tier(&mut tiered).unwrap();
        prop_assert!(tiered.rep_multiplier() >= tier_before);
    }

    #[test]
    fn snapshot_roundtrip(state in arb_state()) {
        let json = save::to_json(&state).unwrap();
        prop_assert_eq!(save::from_json(&json), Some(state));
    }

    #[test]
    fn study_never_pushes_gpa_out_of_range(gpa in GPA_MIN..=GPA_MAX, times in 0usize..60) {
        let mut state = EconomyState { gpa, ..EconomyState::default() };
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..times {
            state.energy = state.max_energy;
            logic::perform(&mut state, ClickAction::Study, &mut rng).unwrap();
        }
        prop_assert!(state.gpa >= GPA_MIN && state.gpa <= GPA_MAX);
    }
}

#[test]
fn intent_indices_cover_every_intent() {
    assert!(ALL_INTENTS.contains(&Intent::Save));
    assert!(ALL_INTENTS.contains(&Intent::CareerPrestige));
}
