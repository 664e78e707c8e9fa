//! Team record and insert payload.

use serde::{Deserialize, Serialize};

use crate::types::{Date, PlayerId, TeamId};

/// Authoritative team record held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Date the team was founded.
    pub created_on: Date,
    /// Home kit color.
    pub primary_color: String,
    /// Alternate kit color.
    pub secondary_color: String,
    /// Captain, once one has been assigned.
    pub captain: Option<PlayerId>,
}

/// Insert payload used to create a new [`Team`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    /// Caller-chosen team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Date the team was founded.
    pub created_on: Date,
    /// Home kit color.
    pub primary_color: String,
    /// Alternate kit color.
    pub secondary_color: String,
}

impl From<TeamDraft> for Team {
    fn from(draft: TeamDraft) -> Self {
        Self {
            id: draft.id,
            name: draft.name,
            created_on: draft.created_on,
            primary_color: draft.primary_color,
            secondary_color: draft.secondary_color,
            captain: None,
        }
    }
}

impl Team {
    /// Kit this team wears when visiting `home`.
    ///
    /// Colors are compared by exact string equality; a clash with the home
    /// primary falls back to the secondary kit.
    pub fn away_kit_against(&self, home: &Team) -> &str {
        if self.primary_color == home.primary_color {
            &self.secondary_color
        } else {
            &self.primary_color
        }
    }
}
