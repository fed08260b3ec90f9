use patrol_game::{
    CampaignConfig, CampaignOutcome, Character, ExtractionOutcome, Role, ScriptedDice,
    ScriptedPresenter, SeededDice, campaign_summary, run_campaign,
};

#[test]
fn guaranteed_path_produces_a_clean_summary() {
    // One mission, forced to the abandoned base, perimeter sweep: the only
    // branch in the game with no risk roll at all.
    let mut character = Character::new("Vik", Role::Soldier);
    let mut dice = ScriptedDice::new();
    dice.queue_rolls([2]); // abandoned_base
    dice.queue_rolls([30]); // extraction: safe return
    let mut out = ScriptedPresenter::new();
    out.queue_choices([1]);

    let outcome = run_campaign(
        &mut character,
        &CampaignConfig::new(1),
        &mut dice,
        &mut out,
    )
    .unwrap();

    assert!(outcome.survived());
    let summary = campaign_summary(&character);
    assert_eq!(summary.missions_completed, 1);
    assert_eq!(summary.final_hp, 3);
    assert!(summary.survived);
    assert!(summary.inventory.contains(&"Handful of Ammo".to_string()));
    assert!(dice.is_drained());
    assert!(out.saw("Mission accomplished."));
}

#[test]
fn sniper_shot_fires_at_most_once_across_a_run() {
    let mut character = Character::new("Lena", Role::Sniper);
    let mut dice = ScriptedDice::new();
    dice.queue_rolls([3, 3, 30]); // night raid twice, then a safe extraction
    dice.queue_chances([
        false, // mission 1: opening headshot misses
        false, // mission 1: scavenge comes up empty
        false, // mission 2: opening headshot misses
        false, // mission 2: enemy counter misses after the wasted special
        true,  // mission 2: flee succeeds
    ]);
    let mut out = ScriptedPresenter::new();
    // Frontal assault both nights; special first, then special again, then run.
    out.queue_choices([0, 5, 0, 5, 4]);

    let outcome = run_campaign(
        &mut character,
        &CampaignConfig::new(2),
        &mut dice,
        &mut out,
    )
    .unwrap();

    assert_eq!(
        outcome,
        CampaignOutcome::Extracted {
            extraction: ExtractionOutcome::SafeReturn
        }
    );
    assert!(character.sniper_shot_used());
    assert_eq!(character.missions_completed, 2);
    let perfect_shots = out
        .transcript
        .iter()
        .filter(|line| line.contains("perfect shot"))
        .count();
    assert_eq!(perfect_shots, 1, "the guaranteed shot never fires twice");
    assert!(out.saw("No useful action"));
    assert!(dice.is_drained());
}

#[test]
fn medic_field_heal_spends_its_single_charge() {
    let mut character = Character::new("Ruiz", Role::Medic);
    let mut dice = ScriptedDice::new();
    dice.queue_rolls([3, 3, 40]); // night raid twice, then a safe extraction
    dice.queue_chances([
        false, // mission 1: opening headshot misses
        false, // mission 1: counterattack after the heal misses
        true,  // mission 1: flee succeeds
        false, // mission 1: post-mission rest roll fails
        false, // mission 2: opening headshot misses
        false, // mission 2: enemy counter misses after the wasted special
        true,  // mission 2: flee succeeds
        false, // mission 2: post-mission rest roll fails
    ]);
    let mut out = ScriptedPresenter::new();
    out.queue_choices([0, 5, 4, 0, 5, 4]);

    let outcome = run_campaign(
        &mut character,
        &CampaignConfig::new(2),
        &mut dice,
        &mut out,
    )
    .unwrap();

    assert!(outcome.survived());
    assert_eq!(character.heal_charges(), 0);
    let field_heals = out
        .transcript
        .iter()
        .filter(|line| line.contains("patch yourself up"))
        .count();
    assert_eq!(field_heals, 1, "the field heal never fires twice");
    assert!(dice.is_drained());
}

#[test]
fn outcome_always_agrees_with_the_character_state() {
    // A fixed shoot-left policy over a seeded stream: whatever happens, the
    // reported outcome and the character record must tell the same story.
    for seed in [7_u64, 1337, 0xDEAD_BEEF, 20_250_805] {
        let mut character = Character::new("Vik", Role::Soldier);
        let mut dice = SeededDice::new(seed);
        let mut out = ScriptedPresenter::new().with_fallback_choice(0);

        let outcome = run_campaign(
            &mut character,
            &CampaignConfig::new(3),
            &mut dice,
            &mut out,
        )
        .expect("fallback policy never abandons a prompt");

        let summary = campaign_summary(&character);
        assert!((0..=3).contains(&summary.final_hp), "seed {seed}");
        assert!(summary.missions_completed <= 3, "seed {seed}");
        assert_eq!(summary.survived, character.is_alive(), "seed {seed}");
        match outcome {
            CampaignOutcome::Fell { mission } => {
                assert!(!character.is_alive(), "seed {seed}");
                assert!((1..=3).contains(&mission), "seed {seed}");
            }
            CampaignOutcome::Extracted {
                extraction: ExtractionOutcome::SafeReturn,
            } => assert!(character.is_alive(), "seed {seed}"),
            CampaignOutcome::Extracted { .. } => {
                assert!(!character.is_alive(), "seed {seed}");
                assert!(out.saw("Extraction begins"), "seed {seed}");
            }
        }
    }
}

#[test]
fn same_seed_replays_the_same_campaign() {
    let run = |seed: u64| {
        let mut character = Character::new("Vik", Role::Soldier);
        let mut dice = SeededDice::new(seed);
        let mut out = ScriptedPresenter::new().with_fallback_choice(1);
        let outcome = run_campaign(
            &mut character,
            &CampaignConfig::new(3),
            &mut dice,
            &mut out,
        )
        .unwrap();
        (outcome, campaign_summary(&character), out.transcript)
    };

    let first = run(4242);
    let second = run(4242);
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
}
