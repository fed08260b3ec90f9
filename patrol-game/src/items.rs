//! Item catalog and the ordered inventory that carries it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a character can carry. Closed set: role loadouts, encounter
/// rewards and the combat scavenge table only ever reference these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    StandardRifle,
    CombatKnife,
    SniperRifle,
    Camouflage,
    Pistol,
    MedicalKit,
    Toolkit,
    SilencedPistol,
    EncryptedRadio,
    MedPack,
    Ammo,
    Rations,
    IedComponents,
    AssaultRifle,
    HandfulOfAmmo,
    IntelDocuments,
    LootedSupplies,
}

impl Item {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandardRifle => "Standard Rifle",
            Self::CombatKnife => "Combat Knife",
            Self::SniperRifle => "Sniper Rifle",
            Self::Camouflage => "Camouflage",
            Self::Pistol => "Pistol",
            Self::MedicalKit => "Medical Kit",
            Self::Toolkit => "Toolkit",
            Self::SilencedPistol => "Silenced Pistol",
            Self::EncryptedRadio => "Encrypted Radio",
            Self::MedPack => "Med Pack",
            Self::Ammo => "Ammo",
            Self::Rations => "Rations",
            Self::IedComponents => "IED Components",
            Self::AssaultRifle => "Assault Rifle",
            Self::HandfulOfAmmo => "Handful of Ammo",
            Self::IntelDocuments => "Intel Documents",
            Self::LootedSupplies => "Looted Supplies",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered multiset of carried items.
///
/// Order only matters for display; membership and count drive the logic.
/// Items are appended, never deduplicated; consumables are removed exactly
/// once on use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory(Vec<Item>);

impl Inventory {
    #[must_use]
    pub fn from_loadout(items: &[Item]) -> Self {
        Self(items.to_vec())
    }

    pub fn add(&mut self, item: Item) {
        self.0.push(item);
    }

    #[must_use]
    pub fn has(&self, item: Item) -> bool {
        self.0.contains(&item)
    }

    #[must_use]
    pub fn count(&self, item: Item) -> usize {
        self.0.iter().filter(|&&held| held == item).count()
    }

    /// Removes exactly one occurrence. Returns false when none was held.
    pub fn consume(&mut self, item: Item) -> bool {
        if let Some(pos) = self.0.iter().position(|&held| held == item) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    /// Comma-joined display names in carry order.
    #[must_use]
    pub fn display_list(&self) -> String {
        if self.0.is_empty() {
            return String::from("nothing");
        }
        self.0
            .iter()
            .map(|item| item.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
