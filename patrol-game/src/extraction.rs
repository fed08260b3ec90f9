//! Final extraction resolution.

use crate::character::Character;
use crate::constants::{EXTRACTION_FATAL_MAX, EXTRACTION_SAFE_MAX};
use crate::dice::Dice;
use crate::io::Presenter;
use serde::{Deserialize, Serialize};

/// Outcome of the extraction draw at the end of a fully-survived campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// Draw 1-10: a stray shot on the way out.
    FatalShot,
    /// Draw 11-55: home, against the odds.
    SafeReturn,
    /// Draw 56-100: the accumulated wounds win in the end.
    Succumbed,
}

/// One uniform draw over `[1, 100]` decides the ride home. Both death
/// branches flip the character dead; there is no way back from here.
pub fn resolve_extraction<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> ExtractionOutcome {
    out.narrate("All missions complete. Extraction begins...");
    let draw = dice.roll_range(1, 100);
    if draw <= EXTRACTION_FATAL_MAX {
        out.narrate("A sudden, final shot finds you within sight of the helicopter.");
        character.kill();
        ExtractionOutcome::FatalShot
    } else if draw <= EXTRACTION_SAFE_MAX {
        out.narrate("Against the odds, you make it home.");
        ExtractionOutcome::SafeReturn
    } else {
        out.narrate("Your wounds take their toll on the flight out. You do not wake up.");
        character.kill();
        ExtractionOutcome::Succumbed
    }
}
