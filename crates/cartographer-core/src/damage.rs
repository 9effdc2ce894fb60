//! Hull damage with Shield Generator mitigation.

use crate::state::GameState;
use cartographer_logic::tables::DamageSource;
use cartographer_logic::upgrades::{shield_mitigation, UpgradeKind};

/// One resolved hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    /// Base damage times the multiplier, floored.
    pub amount: i32,
    pub source: DamageSource,
    /// Damage absorbed by shields.
    pub reduced: i32,
    /// Damage that reaches the hull.
    pub final_amount: i32,
}

/// Resolve a hit from `source` against the ship's current shields.
pub fn compute(state: &GameState, source: DamageSource, multiplier: f64) -> DamageEvent {
    let raw = source.base_damage() as f64 * multiplier;
    let mitigation = shield_mitigation(state.upgrade_level(UpgradeKind::ShieldGenerator));
    let amount = raw.floor() as i32;
    // Shields act on the unrounded hit; only the result is floored.
    let final_amount = ((raw * (1.0 - mitigation)).floor() as i32).max(0);
    DamageEvent {
        amount,
        source,
        reduced: amount - final_amount,
        final_amount,
    }
}

/// Apply `event` to the hull. The messages are also prepended to the log.
pub fn apply(state: &GameState, event: DamageEvent) -> (GameState, Vec<String>) {
    let mut next = state.clone();
    let messages = apply_event(&mut next, event);
    next.record(messages.clone());
    (next, messages)
}

/// Compute and apply a hit in place. Returns the messages unlogged.
pub(crate) fn inflict(
    state: &mut GameState,
    source: DamageSource,
    multiplier: f64,
) -> Vec<String> {
    let event = compute(state, source, multiplier);
    apply_event(state, event)
}

fn apply_event(state: &mut GameState, event: DamageEvent) -> Vec<String> {
    state.hull = (state.hull - event.final_amount).max(0);

    let mut messages = vec![format!(
        "🚨 HULL DAMAGE! (-{} HP from {})",
        event.final_amount, event.source
    )];
    if event.reduced > 0 {
        messages.push(format!("Shield absorbed {} damage!", event.reduced));
    }
    if state.hull as f64 <= state.max_hull as f64 * 0.25 {
        messages.push("⚠️ WARNING: Hull integrity critical!".to_string());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::create_account;
    use crate::config::RunConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with_shields(level: u8) -> GameState {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state =
            GameState::new_run(create_account("Vega", 0), &RunConfig::default(), 0, &mut rng)
                .unwrap();
        for u in state.upgrades.iter_mut() {
            if u.kind == UpgradeKind::ShieldGenerator {
                u.current_level = level;
            }
        }
        state
    }

    const SOURCES: [DamageSource; 6] = [
        DamageSource::BlackHole,
        DamageSource::Asteroid,
        DamageSource::Pirate,
        DamageSource::SolarFlare,
        DamageSource::Anomaly,
        DamageSource::Nebula,
    ];

    #[test]
    fn test_unshielded_black_hole() {
        let state = state_with_shields(0);
        let event = compute(&state, DamageSource::BlackHole, 1.0);
        assert_eq!(event.final_amount, 20);
        assert_eq!(event.reduced, 0);

        let (next, messages) = apply(&state, event);
        assert_eq!(next.hull, 80);
        assert_eq!(messages, vec!["🚨 HULL DAMAGE! (-20 HP from black hole)".to_string()]);
        assert_eq!(next.log[0], messages[0]);
        assert_eq!(state.hull, 100);
    }

    #[test]
    fn test_partial_shields() {
        let state = state_with_shields(1);
        let event = compute(&state, DamageSource::Pirate, 1.0);
        assert_eq!(event.amount, 15);
        assert_eq!(event.final_amount, 11);
        assert_eq!(event.reduced, 4);
        let (_, messages) = apply(&state, event);
        assert_eq!(messages[1], "Shield absorbed 4 damage!");
    }

    #[test]
    fn test_max_shields_are_immune() {
        let state = state_with_shields(3);
        for source in SOURCES {
            for multiplier in [0.5, 1.0, 2.0, 10.0] {
                let event = compute(&state, source, multiplier);
                assert_eq!(event.final_amount, 0, "{:?} x{}", source, multiplier);
                assert_eq!(event.reduced, event.amount);
            }
        }
    }

    #[test]
    fn test_critical_warning_and_floor_at_zero() {
        let mut state = state_with_shields(0);
        state.hull = 30;
        let (next, messages) = apply(&state, compute(&state, DamageSource::Nebula, 1.0));
        assert_eq!(next.hull, 25);
        assert_eq!(messages.last().unwrap(), "⚠️ WARNING: Hull integrity critical!");

        state.hull = 5;
        let (next, _) = apply(&state, compute(&state, DamageSource::Pirate, 2.0));
        assert_eq!(next.hull, 0);
    }

    #[test]
    fn test_multiplier_floors_amount() {
        let state = state_with_shields(0);
        let event = compute(&state, DamageSource::Pirate, 0.5);
        assert_eq!(event.amount, 7);
        assert_eq!(event.final_amount, 7);
    }

    #[test]
    fn test_shields_mitigate_the_unrounded_hit() {
        let state = state_with_shields(1);
        let event = compute(&state, DamageSource::Pirate, 0.9);
        assert_eq!(event.amount, 13);
        assert_eq!(event.final_amount, 10);
        assert_eq!(event.reduced, 3);
    }
}
