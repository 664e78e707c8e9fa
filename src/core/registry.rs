use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    core::indices::VecIndex,
    player::{Player, PlayerDraft},
    team::{Team, TeamDraft},
    types::{PlayerId, Salary, TeamId},
};

/// Failures surfaced by [`Registry`] operations.
///
/// Every failing call returns before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A team or player with this identifier is already registered.
    #[error("identifier {0} is already in use")]
    DuplicateIdentifier(u64),
    /// No team is registered under this identifier.
    #[error("team {0} not found")]
    TeamNotFound(TeamId),
    /// No player is registered under this identifier.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    /// The team exists but no captain has been assigned.
    #[error("team {0} has no captain")]
    CaptainNotSet(TeamId),
    /// A per-team aggregate was requested for a team without players.
    #[error("team {0} has no players")]
    NoPlayersOnTeam(TeamId),
    /// A restored team names a captain who plays for another team.
    #[error("player {player_id} captains team {team_id} but is not on it")]
    CaptainNotOnTeam {
        /// Team naming the captain.
        team_id: TeamId,
        /// Captain named by the team.
        player_id: PlayerId,
    },
}

/// Value snapshot of a registry, teams and players in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshotV1 {
    /// Registered teams, captains included.
    pub teams: Vec<Team>,
    /// Registered players.
    pub players: Vec<Player>,
}

/// Authoritative store of teams and players.
///
/// Identifiers are caller-supplied and never reused. Iteration-order
/// sensitive queries follow insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    teams: HashMap<TeamId, Team>,
    team_order: Vec<TeamId>,
    players: HashMap<PlayerId, Player>,
    player_order: Vec<PlayerId>,
    by_team: VecIndex<TeamId>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from a snapshot, applying the same checks as
    /// [`Registry::add_team`] and [`Registry::add_player`]. Each captain must
    /// be a registered player on the team that names them.
    pub fn from_snapshot(snapshot: RegistrySnapshotV1) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for team in snapshot.teams {
            registry.insert_team(team)?;
        }
        for player in snapshot.players {
            registry.insert_player(player)?;
        }

        for team in registry.teams_in_order() {
            if let Some(captain) = team.captain {
                if registry.require_player(captain)?.team_id != team.id {
                    return Err(RegistryError::CaptainNotOnTeam {
                        team_id: team.id,
                        player_id: captain,
                    });
                }
            }
        }

        Ok(registry)
    }

    /// Exports every team and player in insertion order.
    pub fn export_snapshot(&self) -> RegistrySnapshotV1 {
        RegistrySnapshotV1 {
            teams: self.teams_in_order().cloned().collect(),
            players: self
                .player_order
                .iter()
                .filter_map(|id| self.players.get(id).cloned())
                .collect(),
        }
    }

    /// Registers a team with no captain.
    pub fn add_team(&mut self, draft: TeamDraft) -> Result<TeamId, RegistryError> {
        let id = draft.id;
        self.insert_team(Team::from(draft)).inspect_err(|err| {
            warn!(team_id = id, %err, "team rejected");
        })?;
        debug!(team_id = id, "team registered");
        Ok(id)
    }

    /// Registers a player on an existing team.
    ///
    /// The player id is checked for collisions before the team reference.
    pub fn add_player(&mut self, draft: PlayerDraft) -> Result<PlayerId, RegistryError> {
        let id = draft.id;
        let team_id = draft.team_id;
        self.insert_player(Player::from(draft)).inspect_err(|err| {
            warn!(player_id = id, team_id, %err, "player rejected");
        })?;
        debug!(player_id = id, team_id, "player registered");
        Ok(id)
    }

    /// Makes `player_id` the captain of the team it plays for, replacing any
    /// earlier captain. Returns the captain that was replaced.
    pub fn set_captain(&mut self, player_id: PlayerId) -> Result<Option<PlayerId>, RegistryError> {
        let team_id = self.require_player(player_id)?.team_id;
        let team = self
            .teams
            .get_mut(&team_id)
            .ok_or(RegistryError::TeamNotFound(team_id))?;

        let previous = team.captain.replace(player_id);
        debug!(team_id, player_id, ?previous, "captain assigned");
        Ok(previous)
    }

    /// Current captain of `team_id`.
    pub fn captain(&self, team_id: TeamId) -> Result<PlayerId, RegistryError> {
        self.require_team(team_id)?
            .captain
            .ok_or(RegistryError::CaptainNotSet(team_id))
    }

    /// Name of `player_id`.
    pub fn player_name(&self, player_id: PlayerId) -> Result<&str, RegistryError> {
        Ok(&self.require_player(player_id)?.name)
    }

    /// Salary of `player_id`.
    pub fn player_salary(&self, player_id: PlayerId) -> Result<&Salary, RegistryError> {
        Ok(&self.require_player(player_id)?.salary)
    }

    /// Name of `team_id`.
    pub fn team_name(&self, team_id: TeamId) -> Result<&str, RegistryError> {
        Ok(&self.require_team(team_id)?.name)
    }

    /// Player ids on `team_id`, in the order they were added.
    pub fn team_players(&self, team_id: TeamId) -> Result<&[PlayerId], RegistryError> {
        self.require_team(team_id)?;
        Ok(self.by_team.get(&team_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Highest skill level on the team. Ties go to the most recently added.
    pub fn best_player(&self, team_id: TeamId) -> Result<PlayerId, RegistryError> {
        self.roster(team_id)?
            .max_by_key(|p| p.skill_level)
            .map(|p| p.id)
            .ok_or(RegistryError::NoPlayersOnTeam(team_id))
    }

    /// Earliest birth date on the team. Ties go to the first added.
    pub fn oldest_player(&self, team_id: TeamId) -> Result<PlayerId, RegistryError> {
        self.roster(team_id)?
            .min_by_key(|p| p.born_on)
            .map(|p| p.id)
            .ok_or(RegistryError::NoPlayersOnTeam(team_id))
    }

    /// Largest salary on the team. Ties go to the most recently added.
    pub fn highest_paid_player(&self, team_id: TeamId) -> Result<PlayerId, RegistryError> {
        self.roster(team_id)?
            .max_by(|a, b| a.salary.cmp(&b.salary))
            .map(|p| p.id)
            .ok_or(RegistryError::NoPlayersOnTeam(team_id))
    }

    /// All team ids in registration order.
    pub fn team_ids(&self) -> &[TeamId] {
        &self.team_order
    }

    /// Up to `n` player ids across all teams by descending skill level.
    ///
    /// Equal skill levels keep insertion order.
    pub fn top_players(&self, n: usize) -> Vec<PlayerId> {
        let mut ranked: Vec<&Player> = self
            .player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .collect();
        ranked.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));
        ranked.into_iter().take(n).map(|p| p.id).collect()
    }

    /// Kit color `away_team_id` should wear at `home_team_id`.
    pub fn away_kit_color(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<&str, RegistryError> {
        let home = self.require_team(home_team_id)?;
        let away = self.require_team(away_team_id)?;
        Ok(away.away_kit_against(home))
    }

    /// Looks up a team record.
    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.get(&team_id)
    }

    /// Looks up a player record.
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    /// Number of registered teams.
    pub fn team_count(&self) -> usize {
        self.team_order.len()
    }

    /// Number of registered players.
    pub fn player_count(&self) -> usize {
        self.player_order.len()
    }

    /// True when neither teams nor players are registered.
    pub fn is_empty(&self) -> bool {
        self.team_order.is_empty() && self.player_order.is_empty()
    }

    fn insert_team(&mut self, team: Team) -> Result<(), RegistryError> {
        if self.teams.contains_key(&team.id) {
            return Err(RegistryError::DuplicateIdentifier(team.id));
        }

        self.team_order.push(team.id);
        self.teams.insert(team.id, team);
        Ok(())
    }

    fn insert_player(&mut self, player: Player) -> Result<(), RegistryError> {
        if self.players.contains_key(&player.id) {
            return Err(RegistryError::DuplicateIdentifier(player.id));
        }
        self.require_team(player.team_id)?;

        self.by_team.entry(player.team_id).or_default().push(player.id);
        self.player_order.push(player.id);
        self.players.insert(player.id, player);
        Ok(())
    }

    fn roster(&self, team_id: TeamId) -> Result<impl Iterator<Item = &Player>, RegistryError> {
        Ok(self
            .team_players(team_id)?
            .iter()
            .filter_map(move |id| self.players.get(id)))
    }

    fn teams_in_order(&self) -> impl Iterator<Item = &Team> {
        self.team_order.iter().filter_map(move |id| self.teams.get(id))
    }

    fn require_team(&self, team_id: TeamId) -> Result<&Team, RegistryError> {
        self.teams
            .get(&team_id)
            .ok_or(RegistryError::TeamNotFound(team_id))
    }

    fn require_player(&self, player_id: PlayerId) -> Result<&Player, RegistryError> {
        self.players
            .get(&player_id)
            .ok_or(RegistryError::PlayerNotFound(player_id))
    }
}
