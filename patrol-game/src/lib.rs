//! Patrol campaign engine
//!
//! Platform-agnostic core logic for Patrol, a turn-based war campaign
//! adventure. This crate provides all game mechanics without UI or
//! platform-specific dependencies; front-ends supply a [`Presenter`] for
//! prompting and narration and a [`Dice`] source for probability, and get
//! survival results back.

pub mod campaign;
pub mod character;
pub mod combat;
pub mod constants;
pub mod dice;
pub mod encounters;
pub mod extraction;
pub mod io;
pub mod items;
pub mod result;
pub mod roles;

// Re-export commonly used types
pub use campaign::{CampaignConfig, CampaignOutcome, parse_mission_count, run_campaign};
pub use character::Character;
pub use combat::{CombatOutcome, Difficulty, run_combat};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use encounters::{Encounter, resolve_encounter};
pub use extraction::{ExtractionOutcome, resolve_extraction};
pub use io::{Presenter, ScriptedPresenter, SessionError};
pub use items::{Inventory, Item};
pub use result::{CampaignSummary, campaign_summary};
pub use roles::{Ability, Role};
