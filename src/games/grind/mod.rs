//! GitHub Grind: click your way from community college to Tech CEO.

pub mod actions;
pub mod error;
pub mod logic;
pub mod prestige;
#[cfg(test)]
mod proptests;
pub mod render;
pub mod save;
pub mod scheduler;
pub mod shop;
pub mod state;
pub mod tables;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use error::GrindError;
use logic::{ClickAction, Outcome};
use save::SaveStore;
use shop::Upgrade;
use state::EconomyState;

/// Maximum number of status messages kept.
const LOG_CAPACITY: usize = 30;

/// Everything the player can ask for: one per button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Act(ClickAction),
    Buy(Upgrade),
    Prestige,
    CareerPrestige,
    Save,
}

pub const ALL_INTENTS: [Intent; 10] = [
    Intent::Act(ClickAction::JoinClub),
    Intent::Act(ClickAction::Study),
    Intent::Act(ClickAction::BuildProject),
    Intent::Act(ClickAction::ApplyResearch),
    Intent::Act(ClickAction::ApplyInternship),
    Intent::Buy(Upgrade::Coffee),
    Intent::Buy(Upgrade::Streak),
    Intent::Prestige,
    Intent::CareerPrestige,
    Intent::Save,
];

impl Intent {
    pub fn key(&self) -> char {
        match self {
            Intent::Act(ClickAction::JoinClub) => '1',
            Intent::Act(ClickAction::Study) => '2',
            Intent::Act(ClickAction::BuildProject) => '3',
            Intent::Act(ClickAction::ApplyResearch) => '4',
            Intent::Act(ClickAction::ApplyInternship) => '5',
            Intent::Buy(Upgrade::Coffee) => 'c',
            Intent::Buy(Upgrade::Streak) => 't',
            Intent::Prestige => 'p',
            Intent::CareerPrestige => 'r',
            Intent::Save => 's',
        }
    }

    pub fn action_id(&self) -> u16 {
        match self {
            Intent::Act(ClickAction::JoinClub) => JOIN_CLUB,
            Intent::Act(ClickAction::Study) => STUDY,
            Intent::Act(ClickAction::BuildProject) => BUILD_PROJECT,
            Intent::Act(ClickAction::ApplyResearch) => APPLY_RESEARCH,
            Intent::Act(ClickAction::ApplyInternship) => APPLY_INTERNSHIP,
            Intent::Buy(Upgrade::Coffee) => BUY_COFFEE,
            Intent::Buy(Upgrade::Streak) => BUY_STREAK,
            Intent::Prestige => PRESTIGE,
            Intent::CareerPrestige => CAREER_PRESTIGE,
            Intent::Save => SAVE,
        }
    }

    pub fn from_key(key: char) -> Option<Intent> {
        let key = key.to_ascii_lowercase();
        ALL_INTENTS.iter().copied().find(|i| i.key() == key)
    }

    pub fn from_action_id(id: u16) -> Option<Intent> {
        ALL_INTENTS.iter().copied().find(|i| i.action_id() == id)
    }
}

/// Whether the intent's precondition currently holds. The renderer dims
/// intents for which this is false.
pub fn is_available(state: &EconomyState, intent: Intent) -> bool {
    match intent {
        Intent::Act(action) => logic::can_afford(state, action),
        Intent::Buy(upgrade) => shop::can_buy(state, upgrade),
        Intent::Prestige => prestige::can_advance_tier(state),
        Intent::CareerPrestige => prestige::can_advance_career(state),
        Intent::Save => true,
    }
}

/// A line in the status log.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub struct GrindGame {
    pub state: EconomyState,
    pub log: Vec<LogEntry>,
    rng: SmallRng,
    store: Box<dyn SaveStore>,
}

impl GrindGame {
    pub fn new() -> Self {
        Self::with_store(save::default_store(), initial_seed())
    }

    /// Start from whatever `store` holds (defaults if nothing usable).
    pub fn with_store(mut store: Box<dyn SaveStore>, seed: u64) -> Self {
        let loaded = save::load_game(store.as_mut());
        let restored = loaded.is_some();
        let mut game = Self {
            state: loaded.unwrap_or_default(),
            log: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            store,
        };
        if restored {
            game.add_log("Save data loaded.", false);
        } else {
            game.add_log(
                "Join clubs, study, build projects, then chase research and internships.",
                false,
            );
        }
        game
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    /// Apply one intent and log what came of it. Returns true if the state
    /// changed (or a save was written).
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let result: Result<Outcome, GrindError> = match intent {
            Intent::Act(action) => logic::perform(&mut self.state, action, &mut self.rng),
            Intent::Buy(Upgrade::Coffee) => shop::buy_coffee(&mut self.state),
            Intent::Buy(Upgrade::Streak) => shop::buy_streak(&mut self.state),
            Intent::Prestige => prestige::advance_tier(&mut self.state),
            Intent::CareerPrestige => prestige::advance_career(&mut self.state),
            Intent::Save => return self.save("Game saved."),
        };
        match result {
            Ok(outcome) => {
                let important = outcome.is_important()
                    || matches!(intent, Intent::Prestige | Intent::CareerPrestige);
                self.add_log(outcome.message(), important);
                true
            }
            Err(e) => {
                self.add_log(&e.to_string(), false);
                false
            }
        }
    }

    fn save(&mut self, success_message: &str) -> bool {
        match save::save_game(self.store.as_mut(), &self.state) {
            Ok(()) => {
                self.add_log(success_message, false);
                true
            }
            Err(e) => {
                warn(&format!("GitHub Grind: {e}"));
                self.add_log("Could not save the game.", false);
                false
            }
        }
    }
}

impl Game for GrindGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let intent = match event {
            InputEvent::Key(c) => Intent::from_key(*c),
            InputEvent::Click(id) => Intent::from_action_id(*id),
        };
        match intent {
            Some(intent) => {
                self.dispatch(intent);
                true
            }
            None => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        let report = scheduler::run(&mut self.state, delta_ticks);
        if report.autosave_due {
            self.save("Autosaved.");
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

#[cfg(target_arch = "wasm32")]
fn initial_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_seed() -> u64 {
    0x5EED_CAFE
}

#[cfg(target_arch = "wasm32")]
fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_msg: &str) {}
