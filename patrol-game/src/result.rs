//! Post-run summary assembly.

use crate::character::Character;
use crate::roles::Role;
use serde::{Deserialize, Serialize};

/// Everything the result screen needs from a finished run. Front-ends
/// render it directly or serialize it as a machine-readable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub name: String,
    pub role: Role,
    pub missions_completed: u32,
    /// Display-clamped; never negative even after overkill damage.
    pub final_hp: i32,
    pub inventory: Vec<String>,
    pub survived: bool,
}

#[must_use]
pub fn campaign_summary(character: &Character) -> CampaignSummary {
    CampaignSummary {
        name: character.name.clone(),
        role: character.role,
        missions_completed: character.missions_completed,
        final_hp: character.display_hp(),
        inventory: character
            .inventory
            .iter()
            .map(|item| item.name().to_string())
            .collect(),
        survived: character.is_alive(),
    }
}
