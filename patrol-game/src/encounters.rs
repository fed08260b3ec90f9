//! The five scripted mission encounters.
//!
//! Each resolver presents exactly one three-way choice, folds in role and
//! inventory advantages, and either resolves in-scene or hands off to the
//! combat engine. Role checks written before a roll short-circuit it, which
//! keeps the draw order stable for seeded replays.

use crate::character::Character;
use crate::combat::{Difficulty, run_combat};
use crate::constants::{
    BASE_CACHE_PCT, CHECKPOINT_AMBUSH_PCT, CHECKPOINT_TALK_PCT, CONVOY_FLANK_PCT,
    CONVOY_GRAZE_PCT, INTEL_HINT_PCT, PASS_DISARM_PCT, PASS_SNIPER_EYES_PCT, PASS_SNIPER_FIRE_PCT,
    PASS_TRAP_PCT, RAID_REINFORCEMENT_PCT, RAID_STEALTH_PCT,
};
use crate::dice::Dice;
use crate::io::{Presenter, SessionError};
use crate::items::Item;
use crate::roles::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mission encounter catalog. Closed set, drawn uniformly per mission with
/// replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encounter {
    Checkpoint,
    MountainPass,
    AbandonedBase,
    NightRaid,
    ConvoyAmbush,
}

impl Encounter {
    pub const ALL: &'static [Self] = &[
        Self::Checkpoint,
        Self::MountainPass,
        Self::AbandonedBase,
        Self::NightRaid,
        Self::ConvoyAmbush,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Checkpoint => "checkpoint",
            Self::MountainPass => "mountain_pass",
            Self::AbandonedBase => "abandoned_base",
            Self::NightRaid => "night_raid",
            Self::ConvoyAmbush => "convoy_ambush",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Checkpoint => "Village Checkpoint",
            Self::MountainPass => "Mountain Pass",
            Self::AbandonedBase => "Abandoned Base",
            Self::NightRaid => "Night Raid",
            Self::ConvoyAmbush => "Convoy Ambush",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.key() == key)
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// True when the character can raise friendly air or scouts over the net.
fn has_comms(character: &Character) -> bool {
    character.inventory.has(Item::EncryptedRadio) || matches!(character.role, Role::IntelOfficer)
}

/// Runs one encounter to completion. Returns true when the character is
/// still standing at the end of the scene; combat outcomes propagate.
///
/// # Errors
///
/// Propagates [`SessionError`] when the player abandons a prompt.
pub fn resolve_encounter<D: Dice, P: Presenter>(
    character: &mut Character,
    encounter: Encounter,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate(&format!("Mission: {}", encounter.title()));

    // The recon perk consumes its draw before the scene's own rolls.
    if matches!(character.role, Role::IntelOfficer) && dice.chance(INTEL_HINT_PCT) {
        out.narrate("[Intel] Recon suggests the first route may be less guarded.");
    }

    match encounter {
        Encounter::Checkpoint => checkpoint(character, dice, out),
        Encounter::MountainPass => mountain_pass(character, dice, out),
        Encounter::AbandonedBase => abandoned_base(character, dice, out),
        Encounter::NightRaid => night_raid(character, dice, out),
        Encounter::ConvoyAmbush => convoy_ambush(character, dice, out),
    }
}

fn checkpoint<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate("A small village checkpoint held by local militia blocks the road.");
    let choice = out.choose(
        "How do you proceed?",
        &[
            "Talk your way through.",
            "Cut through the fields around the checkpoint.",
            "Force entry with weapons.",
        ],
    )?;

    match choice {
        0 => {
            if matches!(character.role, Role::IntelOfficer) || dice.chance(CHECKPOINT_TALK_PCT) {
                out.narrate(
                    "The negotiation lands. They wave you through, and you spot a med pack by the gate.",
                );
                character.inventory.add(Item::MedPack);
                Ok(true)
            } else {
                out.narrate("The militia grows suspicious. Weapons come up.");
                Ok(run_combat(character, Difficulty::Skirmish, dice, out)?.survived())
            }
        }
        1 => {
            out.narrate("You move through the tall fields; the wind covers your noise.");
            if dice.chance(CHECKPOINT_AMBUSH_PCT) {
                out.narrate("Ambush! Hidden fighters open up from the brush.");
                Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived())
            } else {
                out.narrate("You slip past unnoticed and pocket some spare ammunition.");
                character.inventory.add(Item::Ammo);
                Ok(true)
            }
        }
        _ => {
            out.narrate("You open fire and storm the checkpoint!");
            Ok(run_combat(character, Difficulty::Assault, dice, out)?.survived())
        }
    }
}

fn mountain_pass<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate("A narrow mountain pass opens ahead. A perfect ambush site.");
    let choice = out.choose(
        "Your approach?",
        &[
            "Move fast and stay low.",
            "Scout ahead over the radio.",
            "Sweep the trail for traps.",
        ],
    )?;

    match choice {
        0 => {
            if matches!(character.role, Role::Sniper) && dice.chance(PASS_SNIPER_EYES_PCT) {
                out.narrate(
                    "Your scope picks out movement long before it becomes a threat. You cross clean.",
                );
                return Ok(true);
            }
            if dice.chance(PASS_SNIPER_FIRE_PCT) {
                out.narrate("A sniper opens fire. You scramble for cover!");
                return Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived());
            }
            out.narrate("You slip past quietly and find abandoned ration packs.");
            character.inventory.add(Item::Rations);
            Ok(true)
        }
        1 => {
            if has_comms(character) {
                out.narrate("Your scout relays firing positions. You route around the danger.");
                Ok(true)
            } else {
                out.narrate("No comms gear. The chatter gives you away.");
                Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived())
            }
        }
        _ => {
            if matches!(character.role, Role::Engineer) && dice.chance(PASS_DISARM_PCT) {
                out.narrate("You lift a buried IED without a spark and keep the components.");
                character.inventory.add(Item::IedComponents);
                Ok(true)
            } else if dice.chance(PASS_TRAP_PCT) {
                out.narrate("A tripwire snaps. The partial blast catches you.");
                character.harm(1, out);
                Ok(character.is_alive())
            } else {
                out.narrate("You pick the traps apart one by one and move on.");
                Ok(true)
            }
        }
    }
}

fn abandoned_base<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate("An abandoned base. The silence could be hiding anything.");
    let choice = out.choose(
        "Your action?",
        &[
            "Search the main building.",
            "Check the perimeter and move on.",
            "Camp overnight in the base.",
        ],
    )?;

    match choice {
        0 => {
            if dice.chance(BASE_CACHE_PCT) {
                out.narrate("You crack a weapons cache and come out with an upgraded rifle.");
                character.inventory.add(Item::AssaultRifle);
                Ok(true)
            } else {
                out.narrate("Hostile holdouts emerge from the shadows!");
                Ok(run_combat(character, Difficulty::Assault, dice, out)?.survived())
            }
        }
        1 => {
            out.narrate("The perimeter sweep turns up a few supplies.");
            character.inventory.add(Item::HandfulOfAmmo);
            Ok(true)
        }
        _ => {
            out.narrate("You settle in for the night... footsteps echo nearby.");
            Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived())
        }
    }
}

fn night_raid<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate("Night operation: an enemy compound is marked for destruction.");
    let choice = out.choose(
        "Your call?",
        &[
            "Lead a frontal assault.",
            "Send in a stealth team.",
            "Hold and wait for reinforcements.",
        ],
    )?;

    match choice {
        0 => Ok(run_combat(character, Difficulty::Assault, dice, out)?.survived()),
        1 => {
            if matches!(character.role, Role::Sniper | Role::IntelOfficer)
                || dice.chance(RAID_STEALTH_PCT)
            {
                out.narrate("The stealth team slips through. High-value documents secured.");
                character.inventory.add(Item::IntelDocuments);
                Ok(true)
            } else {
                out.narrate("Stealth fails; the compound lights up.");
                Ok(run_combat(character, Difficulty::Assault, dice, out)?.survived())
            }
        }
        _ => {
            out.narrate("You hold position under cover and wait.");
            if dice.chance(RAID_REINFORCEMENT_PCT) {
                out.narrate("Reinforcements arrive. The compound falls with barely a shot fired.");
                Ok(true)
            } else {
                out.narrate("Enemy patrols find your position before backup does!");
                Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived())
            }
        }
    }
}

fn convoy_ambush<D: Dice, P: Presenter>(
    character: &mut Character,
    dice: &mut D,
    out: &mut P,
) -> Result<bool, SessionError> {
    out.narrate("Your supply convoy is pinned down in a narrow valley.");
    let choice = out.choose(
        "Your decision?",
        &[
            "Rush to defend the convoy.",
            "Flank the attackers.",
            "Call in an airstrike.",
        ],
    )?;

    match choice {
        0 => Ok(run_combat(character, Difficulty::Assault, dice, out)?.survived()),
        1 => {
            if matches!(character.role, Role::Soldier) && dice.chance(CONVOY_FLANK_PCT) {
                out.narrate("A flawless flank. The attackers never see you coming.");
                character.inventory.add(Item::LootedSupplies);
                Ok(true)
            } else if dice.chance(CONVOY_GRAZE_PCT) {
                out.narrate("The flank collapses; enemy fire grazes you.");
                character.harm(1, out);
                Ok(character.is_alive())
            } else {
                out.narrate("The flank works, but you take a hit on the way in.");
                character.harm(1, out);
                Ok(character.is_alive())
            }
        }
        _ => {
            if has_comms(character) {
                out.narrate("The airstrike lands on target. The valley goes quiet.");
                Ok(true)
            } else {
                out.narrate("No comms gear. The failed call costs you precious time.");
                Ok(run_combat(character, Difficulty::Firefight, dice, out)?.survived())
            }
        }
    }
}
