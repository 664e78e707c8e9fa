//! Player record and insert payload.

use serde::{Deserialize, Serialize};

use crate::types::{Date, PlayerId, Salary, SkillLevel, TeamId};

/// Authoritative player record. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable player identifier.
    pub id: PlayerId,
    /// Owning team.
    pub team_id: TeamId,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub born_on: Date,
    /// Skill rating used for ranking.
    pub skill_level: SkillLevel,
    /// Salary.
    pub salary: Salary,
}

/// Insert payload used to create a new [`Player`].
///
/// The fields mirror [`Player`]; the registry checks `id` and `team_id`
/// before accepting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    /// Caller-chosen player identifier.
    pub id: PlayerId,
    /// Team the player joins. Must already be registered.
    pub team_id: TeamId,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub born_on: Date,
    /// Skill rating used for ranking.
    pub skill_level: SkillLevel,
    /// Salary.
    pub salary: Salary,
}

impl From<PlayerDraft> for Player {
    fn from(draft: PlayerDraft) -> Self {
        Self {
            id: draft.id,
            team_id: draft.team_id,
            name: draft.name,
            born_on: draft.born_on,
            skill_level: draft.skill_level,
            salary: draft.salary,
        }
    }
}
