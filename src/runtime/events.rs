//! Runtime event stream payloads.

use crate::types::{PlayerId, TeamId};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A team was registered.
    TeamAdded {
        /// Registered team id.
        id: TeamId,
    },
    /// A player was registered.
    PlayerAdded {
        /// Registered player id.
        id: PlayerId,
        /// Team the player joined.
        team_id: TeamId,
    },
    /// A team's captain was (re)assigned.
    CaptainAssigned {
        /// Team whose captain changed.
        team_id: TeamId,
        /// New captain.
        player_id: PlayerId,
        /// Captain that was replaced, if any.
        previous: Option<PlayerId>,
    },
}
