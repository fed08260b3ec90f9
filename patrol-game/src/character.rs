//! Mutable character record threaded through every encounter and combat.

use crate::constants::{MAX_HP, MEDIC_HEAL_CHARGES};
use crate::io::Presenter;
use crate::items::Inventory;
use crate::roles::{Ability, Role};
use serde::{Deserialize, Serialize};

/// The one player character of a run. Built once from a role and a name,
/// mutated throughout the campaign, discarded after the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub role: Role,
    hp: i32,
    pub inventory: Inventory,
    /// Copied from the role at creation; immutable afterwards.
    pub accuracy_bonus: i32,
    heal_charges: u8,
    sniper_shot_used: bool,
    alive: bool,
    pub missions_completed: u32,
}

impl Character {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let heal_charges = match role.ability() {
            Ability::FieldHeal => MEDIC_HEAL_CHARGES,
            _ => 0,
        };
        Self {
            name: name.into(),
            role,
            hp: MAX_HP,
            inventory: Inventory::from_loadout(role.loadout()),
            accuracy_bonus: role.accuracy_bonus(),
            heal_charges,
            sniper_shot_used: false,
            alive: true,
            missions_completed: 0,
        }
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Health as reported to the player. The raw counter may sit below
    /// zero after overkill damage; it is never shown that way.
    #[must_use]
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    /// Subtracts hp and latches death once the counter reaches zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
        if self.hp <= 0 {
            self.alive = false;
        }
    }

    /// Restores hp up to the cap. Dead characters stay dead.
    pub fn heal(&mut self, amount: i32) {
        if !self.alive {
            return;
        }
        self.hp = (self.hp + amount).min(MAX_HP);
    }

    /// Instant-death path: bypasses the hp counter entirely.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Applies damage and reports the new total through the presenter.
    pub fn harm<P: Presenter>(&mut self, amount: i32, out: &mut P) {
        self.take_damage(amount);
        out.narrate(&format!(
            "You take {amount} damage. HP is now {}.",
            self.display_hp()
        ));
    }

    /// Heals and reports the new total through the presenter.
    pub fn recover<P: Presenter>(&mut self, amount: i32, out: &mut P) {
        self.heal(amount);
        out.narrate(&format!(
            "You recover {amount} HP. HP is now {}.",
            self.display_hp()
        ));
    }

    #[must_use]
    pub const fn heal_charges(&self) -> u8 {
        self.heal_charges
    }

    /// Spends the once-per-run heal charge. False once spent, and always
    /// false for roles that never had one.
    pub fn consume_heal_charge(&mut self) -> bool {
        if self.heal_charges == 0 {
            return false;
        }
        self.heal_charges -= 1;
        true
    }

    #[must_use]
    pub const fn sniper_shot_used(&self) -> bool {
        self.sniper_shot_used
    }

    /// Claims the Sniper's once-per-run guaranteed shot. False for other
    /// roles and once the latch is set.
    pub fn take_sniper_shot(&mut self) -> bool {
        if !matches!(self.role, Role::Sniper) || self.sniper_shot_used {
            return false;
        }
        self.sniper_shot_used = true;
        true
    }

    /// One-line status header shown at the top of every combat round.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "{} the {} | HP: {} | Carrying: {}",
            self.name,
            self.role.title(),
            self.display_hp(),
            self.inventory.display_list()
        )
    }
}
