//! Player actions and their dispatch to the resolvers.

use crate::combat::{self, CombatAction};
use crate::freighter;
use crate::missions;
use crate::movement;
use crate::sanctuary;
use crate::ship;
use crate::state::GameState;
use cartographer_logic::types::{Direction, Faction};
use cartographer_logic::upgrades::UpgradeKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One input from the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    Move { direction: Direction },
    EngagePirates,
    Combat { choice: CombatAction },
    TradeWithFreighter { freighter_id: u64, offer: usize },
    RaidFreighter { freighter_id: u64 },
    DefendFreighter { freighter_id: u64 },
    PurchaseUpgrade { kind: UpgradeKind },
    AcceptMission { faction: Faction, mission_id: String },
    SanctuaryRepair,
    SanctuaryTrade,
}

/// Run `action` against `state`. Never modifies the input.
pub fn apply_action<R: Rng + ?Sized>(
    state: &GameState,
    action: &PlayerAction,
    rng: &mut R,
) -> GameState {
    match action {
        PlayerAction::Move { direction } => movement::move_player(state, *direction, rng),
        PlayerAction::EngagePirates => combat::engage_pirates(state),
        PlayerAction::Combat { choice } => combat::resolve_combat(state, *choice, rng),
        PlayerAction::TradeWithFreighter { freighter_id, offer } => {
            freighter::trade(state, *freighter_id, *offer, rng)
        }
        PlayerAction::RaidFreighter { freighter_id } => freighter::raid(state, *freighter_id, rng),
        PlayerAction::DefendFreighter { freighter_id } => {
            freighter::defend(state, *freighter_id, rng)
        }
        PlayerAction::PurchaseUpgrade { kind } => ship::purchase_upgrade(state, *kind),
        PlayerAction::AcceptMission { faction, mission_id } => {
            missions::accept_mission(state, *faction, mission_id)
        }
        PlayerAction::SanctuaryRepair => sanctuary::repair(state),
        PlayerAction::SanctuaryTrade => sanctuary::trade(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::create_account;
    use crate::config::RunConfig;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_state() -> GameState {
        let mut rng = StdRng::seed_from_u64(42);
        GameState::new_run(create_account("Vega", 0), &RunConfig::default(), 0, &mut rng).unwrap()
    }

    #[test]
    fn test_actions_deserialize_from_json() {
        let action: PlayerAction =
            serde_json::from_str(r#"{"action":"move","direction":"up"}"#).unwrap();
        assert_eq!(action, PlayerAction::Move { direction: Direction::Up });

        let action: PlayerAction =
            serde_json::from_str(r#"{"action":"combat","choice":"flee"}"#).unwrap();
        assert_eq!(action, PlayerAction::Combat { choice: CombatAction::Flee });

        let action: PlayerAction =
            serde_json::from_str(r#"{"action":"sanctuary_repair"}"#).unwrap();
        assert_eq!(action, PlayerAction::SanctuaryRepair);
    }

    #[test]
    fn test_dispatch_reaches_resolvers() {
        let state = new_state();
        let mut rng = StepRng::new(0, 0);

        let engaged = apply_action(&state, &PlayerAction::EngagePirates, &mut rng);
        assert!(engaged.in_combat());

        let bribed = apply_action(
            &engaged,
            &PlayerAction::Combat { choice: CombatAction::Bribe },
            &mut rng,
        );
        assert!(!bribed.in_combat());

        let up = PlayerAction::Move { direction: Direction::Up };
        let moved = apply_action(&state, &up, &mut rng);
        assert_eq!(moved.stats.turns_played, 1);
    }

    #[test]
    fn test_actions_after_game_over_change_nothing() {
        let mut state = new_state();
        state.game_over = true;
        let mut rng = StepRng::new(0, 0);
        for action in [
            PlayerAction::Move { direction: Direction::Left },
            PlayerAction::EngagePirates,
            PlayerAction::SanctuaryRepair,
            PlayerAction::PurchaseUpgrade { kind: UpgradeKind::AdvancedScanner },
        ] {
            assert_eq!(apply_action(&state, &action, &mut rng), state);
        }
    }
}
