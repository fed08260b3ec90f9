//! Round-based combat resolution.
//!
//! Modeled as an explicit phase machine so every transition can be audited
//! and tested in isolation from narration. The opening headshot check runs
//! before any enemy state exists; a hit there ends the fight without a
//! single round being fought.

use crate::character::Character;
use crate::constants::{
    COVER_EXPOSURE_BASE, COVER_EXPOSURE_PER_TIER, COVER_RETURN_FIRE_BASE,
    COVER_RETURN_FIRE_PER_TIER, ENEMY_ACCURACY_BASE, ENEMY_ACCURACY_PER_TIER,
    ENEMY_LETHAL_FOLLOWUP_PCT, FLEE_BASE_PCT, FLEE_PER_TIER, INSTANT_HEADSHOT_PCT,
    PARTING_SHOT_BASE, PARTING_SHOT_PER_TIER, RIFLE_BURST_PCT, RIFLE_UPGRADE_PCT, SCAVENGE_BASE,
    SCAVENGE_PER_TIER, SHOT_BASE_PCT, SHOT_CENTER_MOD, SHOT_CLAMP_MAX, SHOT_CLAMP_MIN,
    SHOT_DIFFICULTY_PENALTY, SHOT_LEFT_MOD, SHOT_RIGHT_MOD, SOLDIER_DODGE_PCT,
    SPECIAL_COUNTER_BASE, SPECIAL_COUNTER_PER_TIER,
};
use crate::dice::Dice;
use crate::io::{Presenter, SessionError};
use crate::items::Item;
use crate::roles::Role;
use serde::{Deserialize, Serialize};

/// Enemy strength tier. Drives enemy hit points and every odds skew in the
/// engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Skirmish,
    Firefight,
    Assault,
}

impl Difficulty {
    pub const ALL: &'static [Self] = &[Self::Skirmish, Self::Firefight, Self::Assault];

    #[must_use]
    pub const fn tier(self) -> i32 {
        match self {
            Self::Skirmish => 1,
            Self::Firefight => 2,
            Self::Assault => 3,
        }
    }

    #[must_use]
    pub const fn enemy_hp(self) -> i32 {
        self.tier()
    }

    #[must_use]
    pub const fn flee_pct(self) -> f32 {
        FLEE_BASE_PCT - FLEE_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn parting_shot_pct(self) -> f32 {
        PARTING_SHOT_BASE + PARTING_SHOT_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn cover_return_fire_pct(self) -> f32 {
        COVER_RETURN_FIRE_BASE + COVER_RETURN_FIRE_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn cover_exposure_pct(self) -> f32 {
        COVER_EXPOSURE_BASE + COVER_EXPOSURE_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn special_counter_pct(self) -> f32 {
        SPECIAL_COUNTER_BASE + SPECIAL_COUNTER_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn enemy_accuracy_pct(self) -> f32 {
        ENEMY_ACCURACY_BASE + ENEMY_ACCURACY_PER_TIER * self.tier() as f32
    }

    #[must_use]
    pub const fn scavenge_pct(self) -> f32 {
        SCAVENGE_BASE + SCAVENGE_PER_TIER * self.tier() as f32
    }
}

/// How an engagement ended, from the character's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Fled,
    Slain,
}

impl CombatOutcome {
    /// Encounters report survival, not victory; a successful flight counts.
    #[must_use]
    pub const fn survived(self) -> bool {
        !matches!(self, Self::Slain)
    }
}

/// Loot pool consulted after a won engagement.
const SCAVENGE_TABLE: [Item; 5] = [
    Item::Ammo,
    Item::MedPack,
    Item::IntelDocuments,
    Item::AssaultRifle,
    Item::Rations,
];

/// Player-facing round actions, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CombatAction {
    ShootLeft,
    ShootCenter,
    ShootRight,
    TakeCover,
    Flee,
    SpecialOrItem,
}

impl CombatAction {
    const MENU: [Self; 6] = [
        Self::ShootLeft,
        Self::ShootCenter,
        Self::ShootRight,
        Self::TakeCover,
        Self::Flee,
        Self::SpecialOrItem,
    ];

    const LABELS: [&'static str; 6] = [
        "Shoot left",
        "Shoot center",
        "Shoot right",
        "Take cover",
        "Attempt to flee",
        "Use special or item",
    ];

    const fn aim_modifier(self) -> f32 {
        match self {
            Self::ShootLeft => SHOT_LEFT_MOD,
            Self::ShootCenter => SHOT_CENTER_MOD,
            Self::ShootRight => SHOT_RIGHT_MOD,
            _ => 0.0,
        }
    }
}

/// Phase machine states; [`run_combat`] owns the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    RoundStart,
    EnemyCounter,
    Victory,
    Defeat,
    Fled,
}

struct Engagement {
    difficulty: Difficulty,
    enemy_hp: i32,
    round: u32,
}

/// Pre-clamp hit chance for an aimed shot.
fn shot_pct(aim_modifier: f32, accuracy_bonus: i32, difficulty: Difficulty) -> f32 {
    SHOT_BASE_PCT + accuracy_bonus as f32 - SHOT_DIFFICULTY_PENALTY * difficulty.tier() as f32
        + aim_modifier
}

/// Resolves one engagement to completion.
///
/// # Errors
///
/// Propagates [`SessionError`] when the player abandons a prompt.
pub fn run_combat<D: Dice, P: Presenter>(
    character: &mut Character,
    difficulty: Difficulty,
    dice: &mut D,
    out: &mut P,
) -> Result<CombatOutcome, SessionError> {
    out.narrate("Contact! Weapons free.");

    // Evaluated exactly once, before the enemy is even stood up.
    if dice.chance(INSTANT_HEADSHOT_PCT) {
        out.narrate("A single, well-placed shot ends everything.");
        character.kill();
        return Ok(CombatOutcome::Slain);
    }

    let mut fight = Engagement {
        difficulty,
        enemy_hp: difficulty.enemy_hp(),
        round: 0,
    };
    let mut phase = Phase::RoundStart;

    loop {
        phase = match phase {
            Phase::RoundStart => {
                fight.round += 1;
                out.narrate(&format!("--- Combat round {} ---", fight.round));
                out.narrate(&character.status_line());
                let picked = out.choose("Your move:", &CombatAction::LABELS)?;
                resolve_action(character, &mut fight, CombatAction::MENU[picked], dice, out)
            }
            Phase::EnemyCounter => enemy_counter(character, &fight, dice, out),
            Phase::Victory => {
                out.narrate("Enemy neutralized. You survived the firefight.");
                scavenge(character, fight.difficulty, dice, out);
                return Ok(CombatOutcome::Victory);
            }
            Phase::Fled => return Ok(CombatOutcome::Fled),
            Phase::Defeat => return Ok(CombatOutcome::Slain),
        };
    }
}

fn resolve_action<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &mut Engagement,
    action: CombatAction,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    match action {
        CombatAction::Flee => attempt_flee(character, fight, dice, out),
        CombatAction::SpecialOrItem => use_special_or_item(character, fight, dice, out),
        CombatAction::TakeCover => take_cover(character, fight, dice, out),
        shot => resolve_shot(character, fight, shot.aim_modifier(), dice, out),
    }
}

fn resolve_shot<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &mut Engagement,
    aim_modifier: f32,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    let pct = shot_pct(aim_modifier, character.accuracy_bonus, fight.difficulty)
        .clamp(SHOT_CLAMP_MIN, SHOT_CLAMP_MAX);
    if dice.chance(pct) {
        let mut damage = 1;
        if character.inventory.has(Item::AssaultRifle) && dice.chance(RIFLE_UPGRADE_PCT) {
            damage = 2;
        }
        fight.enemy_hp -= damage;
        out.narrate(&format!(
            "You hit your target for {damage} damage. Enemy strength: {}.",
            fight.enemy_hp.max(0)
        ));
        if fight.enemy_hp <= 0 {
            return Phase::Victory;
        }
    } else {
        out.narrate("You miss your shot.");
    }
    Phase::EnemyCounter
}

fn take_cover<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &mut Engagement,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    out.narrate("You dive behind cover.");
    if dice.chance(fight.difficulty.cover_return_fire_pct()) {
        fight.enemy_hp -= 1;
        out.narrate("Return fire from cover finds its mark.");
    }
    // The exposure roll runs even when the return fire already landed the
    // kill; a round can end with both sides down.
    if dice.chance(fight.difficulty.cover_exposure_pct()) {
        out.narrate("A glancing shot punches through your cover.");
        character.harm(1, out);
    }
    if !character.is_alive() {
        Phase::Defeat
    } else if fight.enemy_hp <= 0 {
        Phase::Victory
    } else {
        Phase::RoundStart
    }
}

fn attempt_flee<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &Engagement,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    if dice.chance(fight.difficulty.flee_pct()) {
        out.narrate("You break contact and slip away.");
        return Phase::Fled;
    }
    out.narrate("Failed to disengage! You are caught in the open.");
    if dice.chance(fight.difficulty.parting_shot_pct()) {
        out.narrate("A parting shot clips you as you scramble back.");
        character.harm(1, out);
    }
    if character.is_alive() {
        Phase::RoundStart
    } else {
        Phase::Defeat
    }
}

fn use_special_or_item<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &mut Engagement,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    if !apply_special(character, fight, dice, out) {
        // A wasted round hands the initiative over; the character gets no
        // shot of their own before the enemy fires.
        out.narrate("No useful action available. The enemy fires!");
        return Phase::EnemyCounter;
    }
    if fight.enemy_hp <= 0 {
        return Phase::Victory;
    }
    if dice.chance(fight.difficulty.special_counter_pct()) {
        out.narrate("The enemy retaliates before you recover.");
        character.harm(1, out);
    }
    if character.is_alive() {
        Phase::RoundStart
    } else {
        Phase::Defeat
    }
}

/// Tries the special-action ladder in priority order. Returns false when
/// nothing on the ladder could fire this round.
fn apply_special<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &mut Engagement,
    dice: &mut D,
    out: &mut P,
) -> bool {
    if character.consume_heal_charge() {
        out.narrate("You patch yourself up mid-fight.");
        character.recover(1, out);
        return true;
    }
    if character.take_sniper_shot() {
        out.narrate("You steady your breath and land a perfect shot.");
        fight.enemy_hp = 0;
        return true;
    }
    if character.inventory.consume(Item::MedPack) {
        out.narrate("You tear open a med pack.");
        character.recover(1, out);
        return true;
    }
    if character.inventory.has(Item::AssaultRifle) && dice.chance(RIFLE_BURST_PCT) {
        out.narrate("A controlled burst from your assault rifle drops the enemy!");
        fight.enemy_hp = 0;
        return true;
    }
    false
}

fn enemy_counter<D: Dice, P: Presenter>(
    character: &mut Character,
    fight: &Engagement,
    dice: &mut D,
    out: &mut P,
) -> Phase {
    if matches!(character.role, Role::Soldier) && dice.chance(SOLDIER_DODGE_PCT) {
        out.narrate("You duck just in time. No damage taken.");
        return Phase::RoundStart;
    }
    if dice.chance(fight.difficulty.enemy_accuracy_pct()) {
        if dice.chance(ENEMY_LETHAL_FOLLOWUP_PCT) {
            out.narrate("Critical hit! A lethal shot ends it instantly.");
            character.kill();
            return Phase::Defeat;
        }
        out.narrate("An enemy round hits you.");
        character.harm(1, out);
        if !character.is_alive() {
            return Phase::Defeat;
        }
    } else {
        out.narrate("The enemy misses their shot.");
    }
    Phase::RoundStart
}

fn scavenge<D: Dice, P: Presenter>(
    character: &mut Character,
    difficulty: Difficulty,
    dice: &mut D,
    out: &mut P,
) {
    if dice.chance(difficulty.scavenge_pct()) {
        let item = SCAVENGE_TABLE[dice.pick_index(SCAVENGE_TABLE.len())];
        out.narrate(&format!("You scavenge: {}", item.name()));
        character.inventory.add(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::io::ScriptedPresenter;

    fn soldier() -> Character {
        Character::new("Vik", Role::Soldier)
    }

    #[test]
    fn shot_formula_matches_design_for_every_tier() {
        for difficulty in Difficulty::ALL {
            for bonus in -10..=20 {
                let expected = 50.0 + bonus as f32 - 5.0 * difficulty.tier() as f32 + 5.0;
                let actual = shot_pct(SHOT_CENTER_MOD, bonus, *difficulty);
                assert!((actual - expected).abs() < f32::EPSILON);
                let clamped = actual.clamp(SHOT_CLAMP_MIN, SHOT_CLAMP_MAX);
                assert!((5.0..=95.0).contains(&clamped));
            }
        }
    }

    #[test]
    fn aim_modifiers_follow_the_menu() {
        assert!((CombatAction::ShootLeft.aim_modifier() - -5.0).abs() < f32::EPSILON);
        assert!((CombatAction::ShootCenter.aim_modifier() - 5.0).abs() < f32::EPSILON);
        assert!((CombatAction::ShootRight.aim_modifier() - -2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn difficulty_odds_scale_with_tier() {
        assert!((Difficulty::Skirmish.flee_pct() - 25.0).abs() < f32::EPSILON);
        assert!((Difficulty::Assault.flee_pct() - 15.0).abs() < f32::EPSILON);
        assert!((Difficulty::Firefight.enemy_accuracy_pct() - 70.0).abs() < f32::EPSILON);
        assert!((Difficulty::Assault.scavenge_pct() - 80.0).abs() < f32::EPSILON);
        assert_eq!(Difficulty::Assault.enemy_hp(), 3);
    }

    #[test]
    fn opening_headshot_bypasses_the_round_loop() {
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        dice.queue_chances([true]);
        let mut out = ScriptedPresenter::new();

        let outcome = run_combat(&mut character, Difficulty::Assault, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Slain);
        assert!(!character.is_alive());
        assert_eq!(character.display_hp(), 3, "death bypassed the hp counter");
        assert!(dice.is_drained(), "no enemy state was ever rolled for");
        assert!(!out.saw("Combat round"));
    }

    #[test]
    fn successful_flee_exits_early_with_survival() {
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        // headshot miss, flee success
        dice.queue_chances([false, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([4]);

        let outcome =
            run_combat(&mut character, Difficulty::Firefight, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert!(outcome.survived());
        assert!(character.is_alive());
        assert!(dice.is_drained());
    }

    #[test]
    fn failed_flee_can_cost_a_parting_wound() {
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        // headshot miss, flee fail, parting shot hit, then flee clean
        dice.queue_chances([false, false, true, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([4, 4]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(character.display_hp(), 2);
        assert!(dice.is_drained());
    }

    #[test]
    fn sniper_guaranteed_shot_wins_and_latches() {
        let mut character = Character::new("Lena", Role::Sniper);
        let mut dice = ScriptedDice::new();
        // headshot miss, then scavenge roll comes up empty
        dice.queue_chances([false, false]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5]);

        let outcome = run_combat(&mut character, Difficulty::Assault, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Victory);
        assert!(character.sniper_shot_used());
        assert!(dice.is_drained());
    }

    #[test]
    fn failed_special_becomes_an_enemy_favored_round() {
        // A soldier with no charges, shot, med pack or rifle has nothing on
        // the ladder; the round converts into an enemy counter only.
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        // headshot miss, soldier dodge, then flee success to end the test
        dice.queue_chances([false, true, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5, 4]);

        let outcome =
            run_combat(&mut character, Difficulty::Firefight, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert!(out.saw("No useful action"));
        assert_eq!(character.display_hp(), 3, "no player shot, no damage");
        assert!(dice.is_drained());
    }

    #[test]
    fn medic_heal_applies_before_any_item() {
        let mut character = Character::new("Ruiz", Role::Medic);
        character.inventory.add(Item::MedPack);
        character.take_damage(2);
        let mut dice = ScriptedDice::new();
        // headshot miss, special counter miss, then flee success
        dice.queue_chances([false, false, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5, 4]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(character.display_hp(), 2);
        assert_eq!(character.heal_charges(), 0, "charge spent first");
        assert!(character.inventory.has(Item::MedPack), "med pack untouched");
    }

    #[test]
    fn med_pack_is_consumed_exactly_once() {
        let mut character = soldier();
        character.inventory.add(Item::MedPack);
        character.take_damage(1);
        let mut dice = ScriptedDice::new();
        // headshot miss, special counter miss, then flee success
        dice.queue_chances([false, false, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5, 4]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(character.display_hp(), 3);
        assert!(!character.inventory.has(Item::MedPack));
    }

    #[test]
    fn assault_rifle_burst_can_end_the_fight() {
        let mut character = soldier();
        character.inventory.add(Item::AssaultRifle);
        let mut dice = ScriptedDice::new();
        // headshot miss, burst success, scavenge miss
        dice.queue_chances([false, true, false]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5]);

        let outcome = run_combat(&mut character, Difficulty::Assault, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Victory);
        assert!(dice.is_drained());
    }

    #[test]
    fn rifle_upgrade_doubles_shot_damage() {
        let mut character = soldier();
        character.inventory.add(Item::AssaultRifle);
        let mut dice = ScriptedDice::new();
        // headshot miss, shot hit, upgrade proc, scavenge miss
        dice.queue_chances([false, true, true, false]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([1]);

        let outcome =
            run_combat(&mut character, Difficulty::Firefight, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Victory, "2 damage fells a tier-2 enemy");
        assert!(dice.is_drained());
    }

    #[test]
    fn cover_exposure_rolls_even_after_the_kill() {
        let mut character = Character::new("Ruiz", Role::Medic);
        let mut dice = ScriptedDice::new();
        // headshot miss, return fire hit, exposure hit, scavenge miss
        dice.queue_chances([false, true, true, false]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([3]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Victory);
        assert_eq!(character.display_hp(), 2, "took the hit behind cover");
        assert!(dice.is_drained());
    }

    #[test]
    fn lethal_followup_kills_without_touching_hp() {
        let mut character = Character::new("Ruiz", Role::Medic);
        let mut dice = ScriptedDice::new();
        // headshot miss, shot miss, enemy hit, lethal followup
        dice.queue_chances([false, false, true, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([0]);

        let outcome =
            run_combat(&mut character, Difficulty::Firefight, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Slain);
        assert!(!character.is_alive());
        assert_eq!(character.display_hp(), 3);
        assert!(dice.is_drained());
    }

    #[test]
    fn wounded_character_dies_on_the_next_hit() {
        let mut character = Character::new("Ruiz", Role::Medic);
        character.take_damage(2);
        assert_eq!(character.display_hp(), 1);
        let mut dice = ScriptedDice::new();
        // headshot miss, shot miss, enemy hit, lethal followup miss
        dice.queue_chances([false, false, true, false]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([2]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Slain);
        assert_eq!(character.display_hp(), 0);
        assert!(dice.is_drained());
    }

    #[test]
    fn soldier_dodge_skips_the_enemy_roll_entirely() {
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        // headshot miss, shot miss, dodge, then flee success
        dice.queue_chances([false, false, true, true]);
        let mut out = ScriptedPresenter::new();
        out.queue_choices([0, 4]);

        let outcome =
            run_combat(&mut character, Difficulty::Assault, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(character.display_hp(), 3);
        assert!(dice.is_drained(), "dodge consumed no enemy accuracy roll");
    }

    #[test]
    fn victory_loot_draws_from_the_fixed_table() {
        let mut character = Character::new("Lena", Role::Sniper);
        let mut dice = ScriptedDice::new();
        // headshot miss, scavenge success
        dice.queue_chances([false, true]);
        dice.queue_rolls([3]); // Assault Rifle slot
        let mut out = ScriptedPresenter::new();
        out.queue_choices([5]);

        let outcome =
            run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out).unwrap();

        assert_eq!(outcome, CombatOutcome::Victory);
        assert!(character.inventory.has(Item::AssaultRifle));
        assert!(dice.is_drained());
    }

    #[test]
    fn abandoning_the_prompt_surfaces_an_interrupt() {
        let mut character = soldier();
        let mut dice = ScriptedDice::new();
        dice.queue_chances([false]);
        let mut out = ScriptedPresenter::new();

        let result = run_combat(&mut character, Difficulty::Skirmish, &mut dice, &mut out);

        assert_eq!(result, Err(SessionError::Interrupted));
    }
}
