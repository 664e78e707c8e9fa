use std::collections::{BTreeMap, BTreeSet};

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use proptest::prelude::*;

use roster::{
    core::registry::{Registry, RegistryError},
    player::PlayerDraft,
    team::TeamDraft,
    types::{PlayerId, TeamId},
};

#[derive(Debug, Clone)]
enum Action {
    AddTeam { id: u8 },
    AddPlayer { id: u8, team: u8, skill: i8 },
    SetCaptain { player: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..8).prop_map(|id| Action::AddTeam { id }),
        (0u8..48, 0u8..10, any::<i8>())
            .prop_map(|(id, team, skill)| Action::AddPlayer { id, team, skill }),
        (0u8..48).prop_map(|player| Action::SetCaptain { player }),
    ]
}

fn team_draft(id: u8) -> TeamDraft {
    TeamDraft {
        id: TeamId::from(id),
        name: format!("T{id}"),
        created_on: NaiveDate::from_ymd_opt(1980, 1, 1).expect("date"),
        primary_color: "red".to_string(),
        secondary_color: "white".to_string(),
    }
}

fn player_draft(id: u8, team: u8, skill: i8) -> PlayerDraft {
    PlayerDraft {
        id: PlayerId::from(id),
        team_id: TeamId::from(team),
        name: format!("P{id}"),
        born_on: NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"),
        skill_level: i32::from(skill),
        salary: BigDecimal::from(u32::from(id)),
    }
}

fn full_scan_team_players(registry: &Registry, team_id: TeamId) -> BTreeSet<PlayerId> {
    registry
        .top_players(usize::MAX)
        .into_iter()
        .filter(|id| registry.player(*id).is_some_and(|p| p.team_id == team_id))
        .collect()
}

proptest! {
    #[test]
    fn random_inserts_preserve_registry_invariants(actions in prop::collection::vec(action_strategy(), 1..200)) {
        let mut registry = Registry::new();
        let mut teams = BTreeSet::<TeamId>::new();
        let mut players = BTreeSet::<PlayerId>::new();
        let mut rosters = BTreeMap::<TeamId, BTreeSet<PlayerId>>::new();

        for action in actions {
            match action {
                Action::AddTeam { id } => {
                    let before = registry.team_ids().to_vec();
                    let res = registry.add_team(team_draft(id));
                    if teams.insert(TeamId::from(id)) {
                        prop_assert_eq!(res, Ok(TeamId::from(id)));
                    } else {
                        prop_assert_eq!(res, Err(RegistryError::DuplicateIdentifier(u64::from(id))));
                        prop_assert_eq!(registry.team_ids(), before.as_slice());
                    }
                }
                Action::AddPlayer { id, team, skill } => {
                    let count = registry.player_count();
                    let res = registry.add_player(player_draft(id, team, skill));
                    if players.contains(&PlayerId::from(id)) {
                        prop_assert_eq!(res, Err(RegistryError::DuplicateIdentifier(u64::from(id))));
                        prop_assert_eq!(registry.player_count(), count);
                    } else if !teams.contains(&TeamId::from(team)) {
                        prop_assert_eq!(res, Err(RegistryError::TeamNotFound(TeamId::from(team))));
                        prop_assert!(registry.player(PlayerId::from(id)).is_none());
                    } else {
                        prop_assert_eq!(res, Ok(PlayerId::from(id)));
                        players.insert(PlayerId::from(id));
                        rosters.entry(TeamId::from(team)).or_default().insert(PlayerId::from(id));
                    }
                }
                Action::SetCaptain { player } => {
                    let player_id = PlayerId::from(player);
                    match registry.set_captain(player_id) {
                        Ok(_) => {
                            let team_id = registry.player(player_id).map(|p| p.team_id);
                            prop_assert!(team_id.is_some());
                            prop_assert_eq!(registry.captain(team_id.unwrap_or_default()), Ok(player_id));
                        }
                        Err(err) => {
                            prop_assert!(!players.contains(&player_id));
                            prop_assert_eq!(err, RegistryError::PlayerNotFound(player_id));
                        }
                    }
                }
            }
        }

        prop_assert_eq!(registry.team_count(), teams.len());
        prop_assert_eq!(registry.player_count(), players.len());

        for team_id in &teams {
            let listed: BTreeSet<PlayerId> = registry.team_players(*team_id).unwrap().iter().copied().collect();
            prop_assert_eq!(&listed, &full_scan_team_players(&registry, *team_id));
            prop_assert_eq!(listed, rosters.get(team_id).cloned().unwrap_or_default());
        }

        for n in [0usize, 1, 5, players.len(), players.len() + 3] {
            let top = registry.top_players(n);
            prop_assert_eq!(top.len(), n.min(players.len()));
            let skills: Vec<i32> = top
                .iter()
                .filter_map(|id| registry.player(*id))
                .map(|p| p.skill_level)
                .collect();
            prop_assert!(skills.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
