use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::info;

use crate::{
    core::registry::{Registry, RegistryError, RegistrySnapshotV1},
    player::PlayerDraft,
    team::TeamDraft,
    types::{PlayerId, Salary, TeamId},
};

use super::events::RegistryEvent;

/// Failures returned through a [`RegistryHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The registry rejected the request.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The registry task has stopped.
    #[error("registry task is no longer running")]
    ChannelClosed,
}

/// Channel sizing for [`spawn_registry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Commands buffered before callers wait for the task.
    pub command_queue_bound: usize,
    /// Events retained for lagging subscribers.
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

/// Cloneable front end to a registry owned by a single tokio task.
///
/// Commands from every clone are applied one at a time in arrival order.
#[derive(Clone)]
pub struct RegistryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RegistryEvent>,
}

type Reply<T> = oneshot::Sender<Result<T, RegistryError>>;

enum Command {
    AddTeam {
        draft: TeamDraft,
        resp: Reply<TeamId>,
    },
    AddPlayer {
        draft: PlayerDraft,
        resp: Reply<PlayerId>,
    },
    SetCaptain {
        player_id: PlayerId,
        resp: Reply<Option<PlayerId>>,
    },
    Captain {
        team_id: TeamId,
        resp: Reply<PlayerId>,
    },
    PlayerName {
        player_id: PlayerId,
        resp: Reply<String>,
    },
    PlayerSalary {
        player_id: PlayerId,
        resp: Reply<Salary>,
    },
    TeamName {
        team_id: TeamId,
        resp: Reply<String>,
    },
    TeamPlayers {
        team_id: TeamId,
        resp: Reply<Vec<PlayerId>>,
    },
    BestPlayer {
        team_id: TeamId,
        resp: Reply<PlayerId>,
    },
    OldestPlayer {
        team_id: TeamId,
        resp: Reply<PlayerId>,
    },
    HighestPaidPlayer {
        team_id: TeamId,
        resp: Reply<PlayerId>,
    },
    AwayKitColor {
        home_team_id: TeamId,
        away_team_id: TeamId,
        resp: Reply<String>,
    },
    TeamIds {
        resp: oneshot::Sender<Vec<TeamId>>,
    },
    TopPlayers {
        n: usize,
        resp: oneshot::Sender<Vec<PlayerId>>,
    },
    Snapshot {
        resp: oneshot::Sender<RegistrySnapshotV1>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `registry` into a new task and returns a handle to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_registry(registry: Registry, config: RuntimeConfig) -> RegistryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<RegistryEvent>(config.event_queue_bound.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut registry = registry;
        info!(
            teams = registry.team_count(),
            players = registry.player_count(),
            "registry task started"
        );

        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut registry, &events_tx_loop) {
                break;
            }
        }

        info!("registry task stopped");
    });

    RegistryHandle { cmd_tx, events_tx }
}

impl RegistryHandle {
    /// Subscribes to events for mutations applied after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events_tx.subscribe()
    }

    /// See [`Registry::add_team`].
    pub async fn add_team(&self, draft: TeamDraft) -> Result<TeamId, RuntimeError> {
        Ok(self.request(|resp| Command::AddTeam { draft, resp }).await??)
    }

    /// See [`Registry::add_player`].
    pub async fn add_player(&self, draft: PlayerDraft) -> Result<PlayerId, RuntimeError> {
        Ok(self.request(|resp| Command::AddPlayer { draft, resp }).await??)
    }

    /// See [`Registry::set_captain`].
    pub async fn set_captain(&self, player_id: PlayerId) -> Result<Option<PlayerId>, RuntimeError> {
        Ok(self
            .request(|resp| Command::SetCaptain { player_id, resp })
            .await??)
    }

    /// See [`Registry::captain`].
    pub async fn captain(&self, team_id: TeamId) -> Result<PlayerId, RuntimeError> {
        Ok(self.request(|resp| Command::Captain { team_id, resp }).await??)
    }

    /// See [`Registry::player_name`].
    pub async fn player_name(&self, player_id: PlayerId) -> Result<String, RuntimeError> {
        Ok(self
            .request(|resp| Command::PlayerName { player_id, resp })
            .await??)
    }

    /// See [`Registry::player_salary`].
    pub async fn player_salary(&self, player_id: PlayerId) -> Result<Salary, RuntimeError> {
        Ok(self
            .request(|resp| Command::PlayerSalary { player_id, resp })
            .await??)
    }

    /// See [`Registry::team_name`].
    pub async fn team_name(&self, team_id: TeamId) -> Result<String, RuntimeError> {
        Ok(self.request(|resp| Command::TeamName { team_id, resp }).await??)
    }

    /// See [`Registry::team_players`].
    pub async fn team_players(&self, team_id: TeamId) -> Result<Vec<PlayerId>, RuntimeError> {
        Ok(self
            .request(|resp| Command::TeamPlayers { team_id, resp })
            .await??)
    }

    /// See [`Registry::best_player`].
    pub async fn best_player(&self, team_id: TeamId) -> Result<PlayerId, RuntimeError> {
        Ok(self
            .request(|resp| Command::BestPlayer { team_id, resp })
            .await??)
    }

    /// See [`Registry::oldest_player`].
    pub async fn oldest_player(&self, team_id: TeamId) -> Result<PlayerId, RuntimeError> {
        Ok(self
            .request(|resp| Command::OldestPlayer { team_id, resp })
            .await??)
    }

    /// See [`Registry::highest_paid_player`].
    pub async fn highest_paid_player(&self, team_id: TeamId) -> Result<PlayerId, RuntimeError> {
        Ok(self
            .request(|resp| Command::HighestPaidPlayer { team_id, resp })
            .await??)
    }

    /// See [`Registry::away_kit_color`].
    pub async fn away_kit_color(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<String, RuntimeError> {
        Ok(self
            .request(|resp| Command::AwayKitColor {
                home_team_id,
                away_team_id,
                resp,
            })
            .await??)
    }

    /// See [`Registry::team_ids`].
    pub async fn team_ids(&self) -> Result<Vec<TeamId>, RuntimeError> {
        self.request(|resp| Command::TeamIds { resp }).await
    }

    /// See [`Registry::top_players`].
    pub async fn top_players(&self, n: usize) -> Result<Vec<PlayerId>, RuntimeError> {
        self.request(|resp| Command::TopPlayers { n, resp }).await
    }

    /// See [`Registry::export_snapshot`].
    pub async fn snapshot(&self) -> Result<RegistrySnapshotV1, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Stops the task. Commands queued behind this one are dropped.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    registry: &mut Registry,
    events_tx: &broadcast::Sender<RegistryEvent>,
) -> bool {
    match cmd {
        Command::AddTeam { draft, resp } => {
            let res = registry.add_team(draft);
            if let Ok(id) = res {
                let _ = events_tx.send(RegistryEvent::TeamAdded { id });
            }
            let _ = resp.send(res);
        }
        Command::AddPlayer { draft, resp } => {
            let team_id = draft.team_id;
            let res = registry.add_player(draft);
            if let Ok(id) = res {
                let _ = events_tx.send(RegistryEvent::PlayerAdded { id, team_id });
            }
            let _ = resp.send(res);
        }
        Command::SetCaptain { player_id, resp } => {
            let res = registry.set_captain(player_id);
            if let Ok(previous) = res {
                if let Some(team_id) = registry.player(player_id).map(|p| p.team_id) {
                    let _ = events_tx.send(RegistryEvent::CaptainAssigned {
                        team_id,
                        player_id,
                        previous,
                    });
                }
            }
            let _ = resp.send(res);
        }
        Command::Captain { team_id, resp } => {
            let _ = resp.send(registry.captain(team_id));
        }
        Command::PlayerName { player_id, resp } => {
            let _ = resp.send(registry.player_name(player_id).map(str::to_owned));
        }
        Command::PlayerSalary { player_id, resp } => {
            let _ = resp.send(registry.player_salary(player_id).cloned());
        }
        Command::TeamName { team_id, resp } => {
            let _ = resp.send(registry.team_name(team_id).map(str::to_owned));
        }
        Command::TeamPlayers { team_id, resp } => {
            let _ = resp.send(registry.team_players(team_id).map(<[PlayerId]>::to_vec));
        }
        Command::BestPlayer { team_id, resp } => {
            let _ = resp.send(registry.best_player(team_id));
        }
        Command::OldestPlayer { team_id, resp } => {
            let _ = resp.send(registry.oldest_player(team_id));
        }
        Command::HighestPaidPlayer { team_id, resp } => {
            let _ = resp.send(registry.highest_paid_player(team_id));
        }
        Command::AwayKitColor {
            home_team_id,
            away_team_id,
            resp,
        } => {
            let _ = resp.send(
                registry
                    .away_kit_color(home_team_id, away_team_id)
                    .map(str::to_owned),
            );
        }
        Command::TeamIds { resp } => {
            let _ = resp.send(registry.team_ids().to_vec());
        }
        Command::TopPlayers { n, resp } => {
            let _ = resp.send(registry.top_players(n));
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(registry.export_snapshot());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
