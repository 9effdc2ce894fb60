//! Faction missions. Lists are regenerated only when a faction's rank moves
//! away from the rank they were generated for. Missions can be accepted;
//! nothing completes or fails them yet.

use crate::state::GameState;
use cartographer_logic::factions::FactionRank;
use cartographer_logic::tables::{eligible_templates, MissionKind, MissionTemplate};
use cartographer_logic::types::Faction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Available,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissionRewards {
    pub reputation: i32,
    pub credits: Option<u32>,
    pub blueprints: Option<u32>,
    pub technology: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub faction: Faction,
    pub name: String,
    pub description: String,
    pub kind: MissionKind,
    pub required_rank: FactionRank,
    pub rewards: MissionRewards,
    pub status: MissionStatus,
}

impl Mission {
    fn from_template(id: String, faction: Faction, template: &MissionTemplate) -> Self {
        Self {
            id,
            faction,
            name: template.name.to_string(),
            description: template.description.to_string(),
            kind: template.kind,
            required_rank: template.rank,
            rewards: MissionRewards {
                reputation: template.reputation,
                credits: template.credits,
                blueprints: template.blueprints,
                technology: template.technology.map(str::to_string),
            },
            status: MissionStatus::Available,
        }
    }
}

/// Regenerate mission lists for factions whose rank changed since their
/// list was built. Active missions survive; available ones are replaced.
pub fn refresh_missions(state: &GameState) -> GameState {
    let mut next = state.clone();
    refresh(&mut next);
    next
}

pub(crate) fn refresh(state: &mut GameState) {
    for faction in Faction::ALL {
        let status = state.factions.get(faction);
        let rank = status.rank;
        if rank == status.missions_rank {
            continue;
        }

        let fresh: Vec<Mission> = eligible_templates(faction, rank)
            .into_iter()
            .map(|template| {
                let id = format!(
                    "{}_{}_{}",
                    faction.name().to_lowercase(),
                    template.kind.id(),
                    state.allocate_mission_id()
                );
                Mission::from_template(id, faction, template)
            })
            .collect();

        let status = state.factions.get_mut(faction);
        status.missions.retain(|m| m.status == MissionStatus::Active);
        status.missions.extend(fresh);
        status.missions_rank = rank;
    }
}

/// Move mission `id` from available to active.
pub fn accept_mission(state: &GameState, faction: Faction, id: &str) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let status = state.factions.get(faction);
    let Some(index) = status
        .missions
        .iter()
        .position(|m| m.id == id && m.status == MissionStatus::Available)
    else {
        return state.rejected(format!("No available {} mission {}", faction, id));
    };

    let mut next = state.clone();
    let mission = &mut next.factions.get_mut(faction).missions[index];
    mission.status = MissionStatus::Active;
    let message = format!("Accepted mission: {}", mission.name);
    next.record(vec![message]);
    next
}
