//! Centralized balance and tuning constants for the Patrol engine.
//!
//! These values define the deterministic math for the campaign simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! assets.

pub(crate) const DEBUG_ENV_VAR: &str = "PATROL_DEBUG_LOGS";

// Character tuning ---------------------------------------------------------
pub(crate) const MAX_HP: i32 = 3;
pub(crate) const MEDIC_HEAL_CHARGES: u8 = 1;

// Combat tuning ------------------------------------------------------------
pub(crate) const INSTANT_HEADSHOT_PCT: f32 = 10.0;
pub(crate) const SHOT_BASE_PCT: f32 = 50.0;
pub(crate) const SHOT_DIFFICULTY_PENALTY: f32 = 5.0;
pub(crate) const SHOT_LEFT_MOD: f32 = -5.0;
pub(crate) const SHOT_CENTER_MOD: f32 = 5.0;
pub(crate) const SHOT_RIGHT_MOD: f32 = -2.0;
pub(crate) const SHOT_CLAMP_MIN: f32 = 5.0;
pub(crate) const SHOT_CLAMP_MAX: f32 = 95.0;
pub(crate) const RIFLE_UPGRADE_PCT: f32 = 40.0;
pub(crate) const RIFLE_BURST_PCT: f32 = 60.0;
pub(crate) const COVER_RETURN_FIRE_BASE: f32 = 20.0;
pub(crate) const COVER_RETURN_FIRE_PER_TIER: f32 = 10.0;
pub(crate) const COVER_EXPOSURE_BASE: f32 = 30.0;
pub(crate) const COVER_EXPOSURE_PER_TIER: f32 = 20.0;
pub(crate) const FLEE_BASE_PCT: f32 = 30.0;
pub(crate) const FLEE_PER_TIER: f32 = 5.0;
pub(crate) const PARTING_SHOT_BASE: f32 = 10.0;
pub(crate) const PARTING_SHOT_PER_TIER: f32 = 10.0;
pub(crate) const SPECIAL_COUNTER_BASE: f32 = 40.0;
pub(crate) const SPECIAL_COUNTER_PER_TIER: f32 = 10.0;
pub(crate) const ENEMY_ACCURACY_BASE: f32 = 40.0;
pub(crate) const ENEMY_ACCURACY_PER_TIER: f32 = 15.0;
pub(crate) const SOLDIER_DODGE_PCT: f32 = 20.0;
pub(crate) const ENEMY_LETHAL_FOLLOWUP_PCT: f32 = 3.0;
pub(crate) const SCAVENGE_BASE: f32 = 50.0;
pub(crate) const SCAVENGE_PER_TIER: f32 = 10.0;

// Encounter tuning ---------------------------------------------------------
pub(crate) const INTEL_HINT_PCT: f32 = 40.0;
pub(crate) const CHECKPOINT_TALK_PCT: f32 = 65.0;
pub(crate) const CHECKPOINT_AMBUSH_PCT: f32 = 40.0;
pub(crate) const PASS_SNIPER_EYES_PCT: f32 = 50.0;
pub(crate) const PASS_SNIPER_FIRE_PCT: f32 = 30.0;
pub(crate) const PASS_DISARM_PCT: f32 = 70.0;
pub(crate) const PASS_TRAP_PCT: f32 = 40.0;
pub(crate) const BASE_CACHE_PCT: f32 = 50.0;
pub(crate) const RAID_STEALTH_PCT: f32 = 55.0;
pub(crate) const RAID_REINFORCEMENT_PCT: f32 = 50.0;
pub(crate) const CONVOY_FLANK_PCT: f32 = 60.0;
pub(crate) const CONVOY_GRAZE_PCT: f32 = 40.0;

// Campaign tuning ----------------------------------------------------------
pub(crate) const MIN_MISSIONS: u32 = 1;
pub(crate) const MAX_MISSIONS: u32 = 10;
pub(crate) const DEFAULT_MISSIONS: u32 = 3;
pub(crate) const MEDIC_REST_HEAL_PCT: f32 = 30.0;

// Extraction thresholds on a single 1..=100 draw ---------------------------
pub(crate) const EXTRACTION_FATAL_MAX: i32 = 10;
pub(crate) const EXTRACTION_SAFE_MAX: i32 = 55;
