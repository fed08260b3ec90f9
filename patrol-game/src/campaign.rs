//! Mission sequencing: the campaign loop that drives a whole run.

use crate::character::Character;
use crate::constants::{
    DEBUG_ENV_VAR, DEFAULT_MISSIONS, MAX_MISSIONS, MEDIC_REST_HEAL_PCT, MIN_MISSIONS,
};
use crate::dice::Dice;
use crate::encounters::{Encounter, resolve_encounter};
use crate::extraction::{ExtractionOutcome, resolve_extraction};
use crate::io::{Presenter, SessionError};
use crate::roles::Role;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Campaign-level knobs. Mission count is clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub missions: u32,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            missions: DEFAULT_MISSIONS,
        }
    }
}

impl CampaignConfig {
    #[must_use]
    pub fn new(missions: u32) -> Self {
        Self {
            missions: missions.clamp(MIN_MISSIONS, MAX_MISSIONS),
        }
    }
}

/// Validates a free-text mission-count entry. Empty input selects the
/// default; anything else must parse to an integer in range, otherwise the
/// caller re-prompts.
#[must_use]
pub fn parse_mission_count(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(DEFAULT_MISSIONS);
    }
    match trimmed.parse::<u32>() {
        Ok(n) if (MIN_MISSIONS..=MAX_MISSIONS).contains(&n) => Some(n),
        _ => None,
    }
}

/// How the campaign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignOutcome {
    /// Killed in action during the numbered mission.
    Fell { mission: u32 },
    /// Survived every mission; the extraction draw decided the rest.
    Extracted { extraction: ExtractionOutcome },
}

impl CampaignOutcome {
    #[must_use]
    pub const fn survived(self) -> bool {
        matches!(
            self,
            Self::Extracted {
                extraction: ExtractionOutcome::SafeReturn
            }
        )
    }
}

/// Runs the full mission sequence and, when the character survives it, the
/// extraction draw. A failed mission is not a death: the campaign presses
/// on unless the character actually falls.
///
/// # Errors
///
/// Propagates [`SessionError`] from any prompt.
pub fn run_campaign<D: Dice, P: Presenter>(
    character: &mut Character,
    cfg: &CampaignConfig,
    dice: &mut D,
    out: &mut P,
) -> Result<CampaignOutcome, SessionError> {
    for mission in 1..=cfg.missions {
        out.narrate(&format!("=== Mission {mission} of {} ===", cfg.missions));
        let encounter = Encounter::ALL[dice.pick_index(Encounter::ALL.len())];
        if debug_log_enabled() {
            println!(
                "Mission {mission}: drew {} | HP {}",
                encounter.key(),
                character.display_hp()
            );
        }

        let success = resolve_encounter(character, encounter, dice, out)?;

        if !character.is_alive() {
            out.narrate("You have fallen during this mission.");
            return Ok(CampaignOutcome::Fell { mission });
        }

        if success {
            out.narrate("Mission accomplished.");
            character.missions_completed += 1;
        } else {
            out.narrate("The mission fell apart, but you push on.");
        }

        // Post-mission stabilization is independent of the field-heal charge.
        if matches!(character.role, Role::Medic) && dice.chance(MEDIC_REST_HEAL_PCT) {
            out.narrate("You stabilize your own wounds during the rest window.");
            character.recover(1, out);
        }
    }

    let extraction = resolve_extraction(character, dice, out);
    Ok(CampaignOutcome::Extracted { extraction })
}
