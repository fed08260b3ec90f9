//! Role catalog: the five playable archetypes and their loadouts.

use crate::items::Item;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role-unique special ability, at most one per archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Small chance to shrug off incoming fire in combat.
    Dodge,
    /// One perfect shot per run; ends an engagement outright.
    GuaranteedShot,
    /// One self-heal charge per run, usable mid-fight.
    FieldHeal,
    /// Trained hands around traps and explosives.
    Disarm,
    /// Reads the ground before risky calls; comms never fail.
    Intel,
}

/// Playable archetype. A closed set: every mechanic that branches on role
/// identity matches on these variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Soldier,
    Sniper,
    Medic,
    Engineer,
    IntelOfficer,
}

impl Role {
    pub const ALL: &'static [Self] = &[
        Self::Soldier,
        Self::Sniper,
        Self::Medic,
        Self::Engineer,
        Self::IntelOfficer,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Soldier => "soldier",
            Self::Sniper => "sniper",
            Self::Medic => "medic",
            Self::Engineer => "engineer",
            Self::IntelOfficer => "intel_officer",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Soldier => "Soldier",
            Self::Sniper => "Sniper",
            Self::Medic => "Medic",
            Self::Engineer => "Engineer",
            Self::IntelOfficer => "Intelligence Officer",
        }
    }

    #[must_use]
    pub const fn desc(self) -> &'static str {
        match self {
            Self::Soldier => "All-rounder. Balanced in combat and survival.",
            Self::Sniper => "Long-range specialist. Very accurate at range.",
            Self::Medic => "Healer. Can patch themselves up once per run.",
            Self::Engineer => "Handles traps and gadgets. Can disable explosives.",
            Self::IntelOfficer => "Information and stealth expert. Reads the ground ahead.",
        }
    }

    /// Signed modifier added to every aimed-shot hit chance.
    #[must_use]
    pub const fn accuracy_bonus(self) -> i32 {
        match self {
            Self::Soldier => 0,
            Self::Sniper => 15,
            Self::Medic => -5,
            Self::Engineer => -2,
            Self::IntelOfficer => -1,
        }
    }

    #[must_use]
    pub const fn ability(self) -> Ability {
        match self {
            Self::Soldier => Ability::Dodge,
            Self::Sniper => Ability::GuaranteedShot,
            Self::Medic => Ability::FieldHeal,
            Self::Engineer => Ability::Disarm,
            Self::IntelOfficer => Ability::Intel,
        }
    }

    #[must_use]
    pub const fn ability_desc(self) -> &'static str {
        match self {
            Self::Soldier => "Steady: small chance to dodge incoming fire.",
            Self::Sniper => "Marksman: one guaranteed long-range kill per run.",
            Self::Medic => "Field Heal: restore 1 HP once per run.",
            Self::Engineer => "Disarm: chance to neutralize traps and IEDs.",
            Self::IntelOfficer => "Intel: occasional hints about the safest route.",
        }
    }

    /// Starting gear, in display order.
    #[must_use]
    pub const fn loadout(self) -> &'static [Item] {
        match self {
            Self::Soldier => &[Item::StandardRifle, Item::CombatKnife],
            Self::Sniper => &[Item::SniperRifle, Item::Camouflage],
            Self::Medic => &[Item::Pistol, Item::MedicalKit],
            Self::Engineer => &[Item::Pistol, Item::Toolkit],
            Self::IntelOfficer => &[Item::SilencedPistol, Item::EncryptedRadio],
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.key() == key)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or(())
    }
}
