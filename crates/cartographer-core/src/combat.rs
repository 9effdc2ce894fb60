//! Pirate encounters: `Idle → InCombat → Idle`.
//!
//! The enemy never acts on its own; every hit it lands is a consequence of
//! the player's chosen action.

use crate::reputation;
use crate::rng::{chance, roll_between};
use crate::state::GameState;
use cartographer_logic::types::Faction;
use cartographer_logic::upgrades::UpgradeKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

const FLEE_FUEL_COST: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Idle,
    InCombat {
        enemy_health: i32,
        enemy_damage: i32,
        difficulty: u32,
        turn_count: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatAction {
    Fight,
    Bribe,
    Flee,
}

/// Difficulty at the ship's current sector: the run's base difficulty plus
/// one per ten sectors of distance.
pub fn current_difficulty(state: &GameState) -> u32 {
    state.base_difficulty + (state.current_sector.distance_from_origin() / 10.0).floor() as u32
}

pub fn pirate_strength(difficulty: u32) -> i32 {
    (difficulty as f64 * 1.5).floor() as i32
}

/// Damage one fight action deals to the pirate ship.
pub fn player_damage(state: &GameState) -> i32 {
    (10 + 5 * state.upgrade_level(UpgradeKind::ShieldGenerator) as i32).max(1)
}

pub fn bribe_cost(difficulty: u32) -> u32 {
    50 * difficulty
}

/// Start a pirate encounter at the current difficulty.
pub fn engage_pirates(state: &GameState) -> GameState {
    if state.game_over {
        return state.clone();
    }
    if state.in_combat() {
        return state.rejected("Already in combat!");
    }
    let difficulty = current_difficulty(state);
    let strength = pirate_strength(difficulty);

    let mut next = state.clone();
    next.combat = CombatState::InCombat {
        enemy_health: 10 * strength,
        enemy_damage: 5 * strength,
        difficulty,
        turn_count: 0,
    };
    next.record(vec![
        "A pirate ship approaches!".to_string(),
        "Prepare for combat!".to_string(),
    ]);
    next
}

/// Resolve one combat action.
pub fn resolve_combat<R: Rng + ?Sized>(
    state: &GameState,
    action: CombatAction,
    rng: &mut R,
) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let CombatState::InCombat {
        enemy_health,
        enemy_damage,
        difficulty,
        turn_count,
    } = state.combat
    else {
        return state.rejected("No active combat");
    };

    let ongoing = |enemy_health: i32| CombatState::InCombat {
        enemy_health,
        enemy_damage,
        difficulty,
        turn_count: turn_count + 1,
    };

    let mut next = state.clone();
    let messages = match action {
        CombatAction::Fight => {
            let damage = player_damage(state);
            let remaining = enemy_health - damage;
            if remaining <= 0 {
                let loot = roll_between(rng, 50, 100);
                next.combat = CombatState::Idle;
                next.credits += loot;
                next.stats.pirates_defeated += 1;
                let mut messages = vec![
                    "Victory! Pirate ship destroyed!".to_string(),
                    format!("Looted {} credits", loot),
                ];
                messages.extend(reputation::change(&mut next, Faction::Krynn, -10));
                messages
            } else {
                // Hits in this exchange drain fuel rather than hull.
                let taken = ((enemy_damage as f64 - state.damage_reduction).floor() as i32).max(1);
                next.combat = ongoing(remaining);
                next.spend_fuel(taken);
                vec![
                    format!("Dealt {} damage to pirate ship!", damage),
                    format!("Took {} damage", taken),
                ]
            }
        }
        CombatAction::Bribe => {
            let cost = bribe_cost(difficulty);
            if state.credits < cost {
                return state.rejected("Not enough credits to bribe!");
            }
            next.combat = CombatState::Idle;
            next.credits -= cost;
            let mut messages = vec![
                "Bribe accepted! Pirates let you pass.".to_string(),
                format!("Spent {} credits", cost),
            ];
            messages.extend(reputation::change(&mut next, Faction::Krynn, 5));
            messages
        }
        CombatAction::Flee => {
            let escape = if state.upgrade_level(UpgradeKind::AntiGravityThrusters) > 0 {
                0.7
            } else {
                0.4
            };
            if chance(rng, escape) {
                next.combat = CombatState::Idle;
                next.spend_fuel(FLEE_FUEL_COST);
                vec!["Successfully escaped! Used 20 fuel in the process.".to_string()]
            } else {
                next.combat = ongoing(enemy_health);
                next.spend_fuel(enemy_damage);
                vec![
                    "Failed to escape!".to_string(),
                    format!("Took {} damage", enemy_damage),
                ]
            }
        }
    };

    next.record(messages);
    next.settle();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::create_account;
    use crate::config::RunConfig;
    use cartographer_logic::types::SectorCoord;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_state() -> GameState {
        let mut rng = StdRng::seed_from_u64(42);
        GameState::new_run(create_account("Vega", 0), &RunConfig::default(), 0, &mut rng).unwrap()
    }

    fn enemy_health(state: &GameState) -> i32 {
        match state.combat {
            CombatState::InCombat { enemy_health, .. } => enemy_health,
            CombatState::Idle => 0,
        }
    }

    #[test]
    fn test_difficulty_grows_with_distance() {
        let mut state = new_state();
        assert_eq!(current_difficulty(&state), 1);
        state.current_sector = SectorCoord::new(12, 16);
        assert_eq!(current_difficulty(&state), 3);
        assert_eq!(pirate_strength(1), 1);
        assert_eq!(pirate_strength(3), 4);
    }

    #[test]
    fn test_engage_sets_enemy_from_strength() {
        let mut state = new_state();
        state.current_sector = SectorCoord::new(20, 0);
        let next = engage_pirates(&state);
        assert_eq!(
            next.combat,
            CombatState::InCombat {
                enemy_health: 40,
                enemy_damage: 20,
                difficulty: 3,
                turn_count: 0
            }
        );
        assert_eq!(next.log[0], "A pirate ship approaches!");
    }

    #[test]
    fn test_fighting_wins_after_expected_rounds() {
        let mut state = new_state();
        state.current_sector = SectorCoord::new(10, 0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut current = engage_pirates(&state);
        let strength = pirate_strength(current_difficulty(&state));
        let expected = (10 * strength + 9) / 10;

        let mut rounds = 0;
        while current.in_combat() {
            current = resolve_combat(&current, CombatAction::Fight, &mut rng);
            rounds += 1;
            assert!(rounds <= expected);
        }
        assert_eq!(rounds, expected);
        assert_eq!(current.factions.krynn.reputation, -10);
        assert_eq!(current.stats.pirates_defeated, 1);
        assert!(current.credits >= 150 && current.credits < 200);
    }

    #[test]
    fn test_fight_damages_fuel_not_hull() {
        let mut state = new_state();
        state.current_sector = SectorCoord::new(10, 0);
        let engaged = engage_pirates(&state);
        let next = resolve_combat(&engaged, CombatAction::Fight, &mut StepRng::new(0, 0));
        // difficulty 2, strength 3: 30 health, 15 damage
        assert_eq!(enemy_health(&next), 20);
        assert_eq!(next.fuel, 85);
        assert_eq!(next.hull, 100);
        assert_eq!(next.log[1], "Took 15 damage");
    }

    #[test]
    fn test_fight_damage_reduction_floors_at_one() {
        let mut state = new_state();
        state.damage_reduction = 0.25;
        state.current_sector = SectorCoord::new(10, 0);
        let engaged = engage_pirates(&state);
        let next = resolve_combat(&engaged, CombatAction::Fight, &mut StepRng::new(0, 0));
        assert_eq!(next.fuel, 86);
    }

    #[test]
    fn test_bribe() {
        let mut state = new_state();
        state.credits = 40;
        let engaged = engage_pirates(&state);
        let broke = resolve_combat(&engaged, CombatAction::Bribe, &mut StepRng::new(0, 0));
        assert!(broke.in_combat());
        assert_eq!(broke.log[0], "Not enough credits to bribe!");
        assert_eq!(broke.credits, 40);

        let engaged = engage_pirates(&new_state());
        let paid = resolve_combat(&engaged, CombatAction::Bribe, &mut StepRng::new(0, 0));
        assert!(!paid.in_combat());
        assert_eq!(paid.credits, 50);
        assert_eq!(paid.factions.krynn.reputation, 5);
    }

    #[test]
    fn test_flee() {
        let engaged = engage_pirates(&new_state());
        let escaped = resolve_combat(&engaged, CombatAction::Flee, &mut StepRng::new(0, 0));
        assert!(!escaped.in_combat());
        assert_eq!(escaped.fuel, 80);

        let caught = resolve_combat(&engaged, CombatAction::Flee, &mut StepRng::new(u64::MAX, 0));
        assert!(caught.in_combat());
        assert_eq!(caught.fuel, 95);
        assert_eq!(caught.log[0], "Failed to escape!");
    }

    #[test]
    fn test_fuel_loss_in_combat_can_end_the_run() {
        let mut state = new_state();
        state.fuel = 3;
        let engaged = engage_pirates(&state);
        let next = resolve_combat(&engaged, CombatAction::Flee, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(next.fuel, 0);
        assert!(next.game_over);
        assert!(!next.in_combat());
    }

    #[test]
    fn test_action_outside_combat_only_logs() {
        let state = new_state();
        let next = resolve_combat(&state, CombatAction::Fight, &mut StepRng::new(0, 0));
        assert_eq!(next.log[0], "No active combat");
        assert_eq!(next.fuel, state.fuel);
        assert_eq!(next.log.len(), state.log.len() + 1);
    }
}
