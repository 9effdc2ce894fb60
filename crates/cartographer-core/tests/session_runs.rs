//! Full runs through `GameSession`, persisted with the JSON file store.

use cartographer_core::account::{AccountStore, JsonFileAccountStore};
use cartographer_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_account_path(prefix: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("duration")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("cartographer-session-{}-{}", prefix, unique))
        .join("account.json")
}

/// Wander until the run ends or `limit` actions have been taken.
fn play(session: &mut GameSession<JsonFileAccountStore>, rng: &mut StdRng, limit: u64) {
    for turn in 1..=limit {
        let Some(state) = session.state() else {
            return;
        };
        if state.game_over {
            return;
        }
        let action = if state.in_combat() {
            PlayerAction::Combat {
                choice: CombatAction::Fight,
            }
        } else {
            PlayerAction::Move {
                direction: Direction::ALL[rng.gen_range(0..4)],
            }
        };
        session.act(&action, turn * 1_000, rng).expect("act");
    }
}

#[test]
fn account_progress_survives_reopening() {
    let path = temp_account_path("reopen");
    let mut rng = StdRng::seed_from_u64(42);

    let mut session = GameSession::new(JsonFileAccountStore::new(&path), RunConfig::default());
    session.create_account("Vega", 0).expect("create");
    session.start_run(0, &mut rng).expect("start");
    play(&mut session, &mut rng, 500);
    let summary = session.finish_run(600_000).expect("finish");

    let reopened = GameSession::new(JsonFileAccountStore::new(&path), RunConfig::default());
    let account = reopened.account().expect("saved account");
    assert_eq!(account.name, "Vega");
    assert_eq!(account.stats.total_games_played, 1);
    assert_eq!(account.stats.best_score, summary.score);
    assert_eq!(account.skill_points, summary.skill_points_earned);

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn run_ending_mid_session_is_closed_out() {
    let path = temp_account_path("wander");
    let mut rng = StdRng::seed_from_u64(8);
    let config = RunConfig {
        starting_fuel: 30,
        ..RunConfig::default()
    };

    let mut session = GameSession::new(JsonFileAccountStore::new(&path), config);
    session.create_account("Vega", 0).expect("create");
    session.start_run(0, &mut rng).expect("start");
    play(&mut session, &mut rng, 200);

    // Fleeing costs fuel on success and failure alike, so this terminates.
    let mut now = 300_000;
    while session.has_active_run() {
        now += 1_000;
        let action = if session.state().is_some_and(|s| s.in_combat()) {
            PlayerAction::Combat {
                choice: CombatAction::Flee,
            }
        } else {
            PlayerAction::EngagePirates
        };
        session.act(&action, now, &mut rng).expect("act");
    }

    let state = session.state().expect("run");
    assert!(state.game_over);
    let summary = session.last_summary().expect("closed out on game over");
    assert_eq!(summary.death_cause, state.death_cause);
    assert_eq!(summary.score, state.stats.total_score);
    assert!(state.stats.time_ended.is_some());

    let stored = session.store().load().expect("saved");
    assert_eq!(stored.stats.total_games_played, 1);

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn malformed_save_file_means_no_account() {
    let path = temp_account_path("malformed");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("dir");
    std::fs::write(&path, r#"{"name": "Vega", "skillPoints": "lots"}"#).expect("write");

    let session = GameSession::new(JsonFileAccountStore::new(&path), RunConfig::default());
    assert!(session.account().is_none());

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}
