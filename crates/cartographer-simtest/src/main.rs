//! Cosmic Cartographer Headless Run Harness
//!
//! Plays seeded random runs against the engine and checks its invariants
//! after every action. Runs entirely in-process with an in-memory account.
//!
//! Usage:
//!   cargo run -p cartographer-simtest
//!   cargo run -p cartographer-simtest -- --verbose --runs 50 --seed 7
//!   cargo run -p cartographer-simtest -- --config run.json

use cartographer_core::account::{AccountStore, MemoryAccountStore};
use cartographer_core::combat::CombatAction;
use cartographer_core::command::PlayerAction;
use cartographer_core::config::{validate_config, RunConfig};
use cartographer_core::engine::GameSession;
use cartographer_core::state::GameState;
use cartographer_logic::factions::{rank_for, REPUTATION_MAX, REPUTATION_MIN};
use cartographer_logic::tables::spawn_weights;
use cartographer_logic::tiles::{count_tiles, tile_at, Grid, Tile, Visibility};
use cartographer_logic::types::{Direction, SectorCoord};
use cartographer_logic::upgrades::UpgradeKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const MAX_ACTIONS_PER_RUN: u64 = 3_000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    runs: u64,
    seed: u64,
    config_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        runs: 20,
        seed: 42,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--runs" => options.runs = parse_number(args.next(), "--runs")?,
            "--seed" => options.seed = parse_number(args.next(), "--seed")?,
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            other => return Err(format!("unknown argument {}", other)),
        }
    }
    Ok(options)
}

fn parse_number(value: Option<String>, flag: &str) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|e| format!("{} {}: {}", flag, value, e))
}

fn main() {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    println!("=== Cosmic Cartographer Run Harness ===\n");

    let mut results = Vec::new();

    // 1. Run configuration
    let config = match load_config(&options, &mut results) {
        Some(c) => c,
        None => RunConfig::default(),
    };

    // 2. Rule tables
    results.extend(validate_rule_tables(options.verbose));

    // 3. Seeded runs with per-action invariants
    results.extend(validate_seeded_runs(&config, &options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Run Configuration ────────────────────────────────────────────────

fn load_config(options: &Options, results: &mut Vec<TestResult>) -> Option<RunConfig> {
    println!("--- Run Configuration ---");
    let config = match &options.config_path {
        None => RunConfig::default(),
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| RunConfig::from_json(&json).map_err(|e| e.to_string()));
            match parsed {
                Ok(c) => c,
                Err(e) => {
                    results.push(TestResult {
                        name: "config_parse".into(),
                        passed: false,
                        detail: format!("{}: {}", path, e),
                    });
                    return None;
                }
            }
        }
    };

    let errors = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!(
                "fuel {}/{}, hull {}, difficulty {}, {} origin freighters",
                config.starting_fuel,
                config.max_fuel,
                config.max_hull,
                config.base_difficulty,
                config.origin_freighters.len()
            )
        } else {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        },
    });
    errors.is_empty().then_some(config)
}

// ── 2. Rule Tables ──────────────────────────────────────────────────────

fn validate_rule_tables(_verbose: bool) -> Vec<TestResult> {
    println!("--- Rule Tables ---");
    let mut results = Vec::new();

    // Every reputation value maps to a rank, and ranks never go down as
    // reputation goes up.
    let monotonic = (REPUTATION_MIN..REPUTATION_MAX).all(|r| rank_for(r) <= rank_for(r + 1));
    results.push(TestResult {
        name: "ranks_monotonic".into(),
        passed: monotonic,
        detail: format!("{}..={} covered", REPUTATION_MIN, REPUTATION_MAX),
    });

    // Spawn weights leave room for empty space at every distance band
    let mut worst = 0.0_f64;
    for distance in [0.0, 10.5, 20.5, 100.0] {
        let total: f64 = spawn_weights(distance).iter().map(|(_, w)| w).sum();
        worst = worst.max(total);
    }
    results.push(TestResult {
        name: "spawn_weights_below_one".into(),
        passed: worst < 1.0,
        detail: format!("largest non-empty mass {:.3}", worst),
    });

    // Upgrade costs grow level over level
    let growing = UpgradeKind::ALL.iter().all(|k| {
        let base = k.base_cost();
        cartographer_logic::upgrades::next_cost(base) > base
    });
    results.push(TestResult {
        name: "upgrade_costs_grow".into(),
        passed: growing,
        detail: "next level always costs more".into(),
    });

    results
}

// ── 3. Seeded Runs ──────────────────────────────────────────────────────

/// Invariant bookkeeping for one run.
#[derive(Default)]
struct RunCheck {
    violations: Vec<String>,
    /// First stored copy of every sector seen.
    sectors: BTreeMap<SectorCoord, Grid>,
}

impl RunCheck {
    fn check(&mut self, step: u64, state: &GameState) {
        let mut fail = |msg: String| self.violations.push(format!("step {}: {}", step, msg));

        if !(0..=state.max_fuel).contains(&state.fuel) {
            fail(format!("fuel {} outside 0..={}", state.fuel, state.max_fuel));
        }
        if !(0..=state.max_hull).contains(&state.hull) {
            fail(format!("hull {} outside 0..={}", state.hull, state.max_hull));
        }
        let players = count_tiles(&state.grid, Tile::Player);
        if players != 1 {
            fail(format!("{} player markers on the grid", players));
        }
        if tile_at(&state.grid, state.player_position) != Tile::Player {
            fail("player marker not at player position".into());
        }
        let pos = state.player_position;
        if state.visibility[pos.y][pos.x] != Visibility::Visible {
            fail("player cell not visible".into());
        }
        if state.game_over && (state.death_cause.is_none() || state.in_combat()) {
            fail("game over without cause, or still in combat".into());
        }
        if !state.game_over && (state.fuel == 0 || state.hull == 0) {
            fail("resource exhausted but run continues".into());
        }
        if !state.sectors.contains(state.current_sector) {
            fail(format!("sector {} has no stored grid", state.current_sector));
        }
        if state.sectors.len() != state.explored_sectors.len() {
            fail(format!(
                "{} stored sectors for {} explored",
                state.sectors.len(),
                state.explored_sectors.len()
            ));
        }

        if let Some(stored) = state.sectors.get(state.current_sector) {
            let first = self.sectors.entry(state.current_sector).or_insert(stored);
            if *first != stored {
                self.violations.push(format!(
                    "step {}: sector {} changed after generation",
                    step, state.current_sector
                ));
            }
        }
    }
}

fn pick_action(state: &GameState, rng: &mut StdRng) -> PlayerAction {
    if state.in_combat() {
        let choice = match rng.gen_range(0..10) {
            0..=5 => CombatAction::Fight,
            6 | 7 => CombatAction::Flee,
            _ => CombatAction::Bribe,
        };
        return PlayerAction::Combat { choice };
    }
    match rng.gen_range(0..40) {
        0 => PlayerAction::EngagePirates,
        1 => PlayerAction::SanctuaryRepair,
        2 => PlayerAction::SanctuaryTrade,
        3 | 4 => PlayerAction::PurchaseUpgrade {
            kind: UpgradeKind::ALL[rng.gen_range(0..UpgradeKind::ALL.len())],
        },
        5 | 6 => match state.local_freighters().next() {
            Some(f) if rng.gen_bool(0.5) => PlayerAction::RaidFreighter { freighter_id: f.id },
            Some(f) => PlayerAction::DefendFreighter { freighter_id: f.id },
            None => PlayerAction::Move {
                direction: Direction::Right,
            },
        },
        _ => PlayerAction::Move {
            direction: Direction::ALL[rng.gen_range(0..Direction::ALL.len())],
        },
    }
}

fn validate_seeded_runs(config: &RunConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Seeded Runs ---");
    let mut results = Vec::new();

    let mut session = GameSession::new(MemoryAccountStore::default(), config.clone());
    if let Err(e) = session.create_account("Harness", 0) {
        results.push(TestResult {
            name: "account_create".into(),
            passed: false,
            detail: e.to_string(),
        });
        return results;
    }

    let mut violations = Vec::new();
    let mut session_errors = Vec::new();
    let mut ended = 0;
    let mut skill_points = 0;
    let mut furthest = 0.0_f64;
    let mut now = 0;

    for run in 0..options.runs {
        let seed = options.seed.wrapping_add(run);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut check = RunCheck::default();

        match session.start_run(now, &mut rng) {
            Ok(state) => check.check(0, state),
            Err(e) => {
                session_errors.push(format!("seed {}: {}", seed, e));
                continue;
            }
        }

        for step in 1..=MAX_ACTIONS_PER_RUN {
            now += 1_000;
            let Some(state) = session.state() else { break };
            let action = pick_action(state, &mut rng);
            match session.act(&action, now, &mut rng) {
                Ok(state) => check.check(step, state),
                Err(e) => {
                    session_errors.push(format!("seed {} step {}: {}", seed, step, e));
                    break;
                }
            }
            if !session.has_active_run() {
                break;
            }
        }

        if !session.has_active_run() {
            ended += 1;
        }
        match session.finish_run(now) {
            Ok(summary) => {
                skill_points += summary.skill_points_earned;
                furthest = furthest.max(summary.stats.max_distance_reached);
                if options.verbose {
                    println!(
                        "  seed {}: score {}, {} sectors, cause {:?}",
                        seed, summary.score, summary.stats.sectors_explored, summary.death_cause
                    );
                }
            }
            Err(e) => session_errors.push(format!("seed {} finish: {}", seed, e)),
        }
        violations.extend(check.violations.into_iter().map(|v| format!("seed {} {}", seed, v)));
    }

    results.push(TestResult {
        name: "runs_invariants_hold".into(),
        passed: violations.is_empty(),
        detail: match violations.first() {
            None => format!("{} runs, every action checked", options.runs),
            Some(first) => format!("{} violations, first: {}", violations.len(), first),
        },
    });

    results.push(TestResult {
        name: "runs_session_ok".into(),
        passed: session_errors.is_empty(),
        detail: match session_errors.first() {
            None => "no session errors".into(),
            Some(first) => first.clone(),
        },
    });

    results.push(TestResult {
        name: "runs_reach_game_over".into(),
        passed: true,
        detail: format!(
            "{}/{} ended within {} actions, furthest {:.1} sectors",
            ended, options.runs, MAX_ACTIONS_PER_RUN, furthest
        ),
    });

    let stored = session.store().load();
    let account_ok = stored.as_ref().is_some_and(|a| {
        a.stats.total_games_played as u64 == options.runs && a.skill_points == skill_points
    });
    results.push(TestResult {
        name: "account_progression".into(),
        passed: account_ok,
        detail: match &stored {
            Some(a) => format!(
                "{} games, {} skill points, best score {}",
                a.stats.total_games_played, a.skill_points, a.stats.best_score
            ),
            None => "no saved account".into(),
        },
    });

    if options.verbose {
        if let Some(raw) = session.store().raw() {
            let size = serde_json::from_str::<serde_json::Value>(raw)
                .map(|v| v.to_string().len())
                .unwrap_or(0);
            println!("  saved account record: {} bytes", size);
        }
    }

    results
}
