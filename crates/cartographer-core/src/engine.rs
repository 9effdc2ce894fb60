//! Run session - the main entry point for playing a game
//!
//! [`GameSession`] owns the account store, the loaded account and the run in
//! progress. It dispatches [`PlayerAction`]s, closes the run out when it ends
//! and saves the account whenever it changes.

use crate::account::{self, AccountStore, PlayerAccount, PurchaseError, StoreError};
use crate::command::{apply_action, PlayerAction};
use crate::config::{ConfigError, RunConfig};
use crate::state::GameState;
use cartographer_logic::scoring::calculate_score;
use cartographer_logic::stats::{DeathCause, GameStats};
use cartographer_logic::upgrades::PermanentUpgradeKind;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no player account is loaded")]
    NoAccount,
    #[error("no run is in progress")]
    NoActiveRun,
    #[error("run configuration is invalid: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub score: u64,
    pub skill_points_earned: u32,
    /// `None` when the player ended the run by choice.
    pub death_cause: Option<DeathCause>,
    pub stats: GameStats,
}

pub struct GameSession<S: AccountStore> {
    store: S,
    config: RunConfig,
    account: Option<PlayerAccount>,
    state: Option<GameState>,
    /// Set once the current run has been closed out.
    summary: Option<RunSummary>,
}

impl<S: AccountStore> GameSession<S> {
    /// Open a session, loading whatever account the store holds.
    pub fn new(store: S, config: RunConfig) -> Self {
        let account = store.load();
        if let Some(account) = &account {
            log::info!(
                "Loaded account {} with {} skill points",
                account.name,
                account.skill_points
            );
        }
        Self {
            store,
            config,
            account,
            state: None,
            summary: None,
        }
    }

    pub fn account(&self) -> Option<&PlayerAccount> {
        self.account.as_ref()
    }

    /// The current run, finished or not.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Summary of the last finished run.
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    pub fn has_active_run(&self) -> bool {
        self.state.is_some() && self.summary.is_none()
    }

    /// Replace the loaded account with a new one and save it.
    pub fn create_account(
        &mut self,
        name: &str,
        now: u64,
    ) -> Result<&PlayerAccount, SessionError> {
        let account = account::create_account(name, now);
        log::info!("Created account {}", account.name);
        self.save(&account)?;
        Ok(&*self.account.insert(account))
    }

    /// Begin a new run from the loaded account. Any unfinished run is
    /// discarded.
    pub fn start_run<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        rng: &mut R,
    ) -> Result<&GameState, SessionError> {
        let account = self.account.clone().ok_or(SessionError::NoAccount)?;
        let state = GameState::new_run(account, &self.config, now, rng)
            .map_err(SessionError::InvalidConfig)?;
        if self.has_active_run() {
            log::warn!("Discarding unfinished run for {}", state.account.name);
        }
        self.summary = None;
        Ok(&*self.state.insert(state))
    }

    /// Apply one action to the run. A run that ends here is closed out
    /// immediately.
    pub fn act<R: Rng + ?Sized>(
        &mut self,
        action: &PlayerAction,
        now: u64,
        rng: &mut R,
    ) -> Result<&GameState, SessionError> {
        if !self.has_active_run() {
            return Err(SessionError::NoActiveRun);
        }
        let current = self.state.as_ref().ok_or(SessionError::NoActiveRun)?;
        let next = apply_action(current, action, rng);
        let over = next.game_over;
        self.state = Some(next);
        if over {
            self.finish_run(now)?;
        }
        self.state.as_ref().ok_or(SessionError::NoActiveRun)
    }

    /// Score the run, award skill points and save the account. Calling it
    /// again for the same run returns the same summary without re-awarding.
    /// Nothing is committed unless the save succeeds.
    pub fn finish_run(&mut self, now: u64) -> Result<RunSummary, SessionError> {
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }
        let state = self.state.as_ref().ok_or(SessionError::NoActiveRun)?;
        let account = self.account.as_ref().ok_or(SessionError::NoAccount)?;

        let mut stats = state.stats.clone();
        stats.total_score = calculate_score(&stats);
        stats.time_ended = Some(now);
        let (updated, earned) = account::record_run(account, &stats, now);
        let summary = RunSummary {
            score: stats.total_score,
            skill_points_earned: earned,
            death_cause: state.death_cause,
            stats: stats.clone(),
        };

        self.save(&updated)?;
        log::info!(
            "Run finished for {}: score {}, {} skill points ({})",
            updated.name,
            summary.score,
            earned,
            summary.death_cause.map_or("ended by player", DeathCause::id)
        );
        if let Some(state) = self.state.as_mut() {
            state.stats = stats;
        }
        self.account = Some(updated);
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Spend skill points on a permanent upgrade and save the account.
    pub fn purchase_permanent_upgrade(
        &mut self,
        kind: PermanentUpgradeKind,
    ) -> Result<&PlayerAccount, SessionError> {
        let account = self.account.as_ref().ok_or(SessionError::NoAccount)?;
        let updated = account::purchase_permanent_upgrade(account, kind)?;
        self.save(&updated)?;
        Ok(&*self.account.insert(updated))
    }

    fn save(&mut self, account: &PlayerAccount) -> Result<(), SessionError> {
        self.store.save(account).map_err(|e| {
            log::warn!("Failed to save account {}: {}", account.name, e);
            SessionError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MemoryAccountStore;
    use crate::combat::CombatAction;
    use cartographer_logic::types::Direction;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Store whose saves always fail. It may still hold an account to load.
    #[derive(Default)]
    struct BrokenStore {
        account: Option<PlayerAccount>,
    }

    impl AccountStore for BrokenStore {
        fn load(&self) -> Option<PlayerAccount> {
            self.account.clone()
        }

        fn save(&mut self, _account: &PlayerAccount) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn session() -> GameSession<MemoryAccountStore> {
        let mut session = GameSession::new(MemoryAccountStore::default(), RunConfig::default());
        session.create_account("Vega", 0).unwrap();
        session
    }

    #[test]
    fn test_start_requires_account() {
        let mut session = GameSession::new(MemoryAccountStore::default(), RunConfig::default());
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(session.start_run(0, &mut rng), Err(SessionError::NoAccount)));
        assert!(matches!(
            session.act(&PlayerAction::EngagePirates, 0, &mut rng),
            Err(SessionError::NoActiveRun)
        ));
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = RunConfig {
            max_fuel: 0,
            ..RunConfig::default()
        };
        let mut session = GameSession::new(MemoryAccountStore::default(), config);
        session.create_account("Vega", 0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            session.start_run(0, &mut rng),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_session_loads_saved_account() {
        let first = session();
        let saved = first.store().clone();
        let second = GameSession::new(saved, RunConfig::default());
        assert_eq!(second.account().map(|a| a.name.as_str()), Some("Vega"));
    }

    #[test]
    fn test_run_ending_in_act_is_finished_once() {
        let mut session = GameSession::new(
            MemoryAccountStore::default(),
            RunConfig {
                starting_fuel: 3,
                ..RunConfig::default()
            },
        );
        session.create_account("Vega", 0).unwrap();
        let mut rng = StepRng::new(u64::MAX, 0);
        session.start_run(1_000, &mut rng).unwrap();
        session.act(&PlayerAction::EngagePirates, 2_000, &mut rng).unwrap();
        let state = session
            .act(&PlayerAction::Combat { choice: CombatAction::Flee }, 5_000, &mut rng)
            .unwrap();
        assert!(state.game_over);

        let summary = session.last_summary().cloned().unwrap();
        assert_eq!(summary.death_cause, Some(DeathCause::FuelDepletion));
        assert_eq!(summary.stats.time_ended, Some(5_000));
        assert_eq!(session.account().unwrap().stats.total_games_played, 1);

        let again = session.finish_run(9_000).unwrap();
        assert_eq!(again, summary);
        assert_eq!(session.account().unwrap().stats.total_games_played, 1);
        assert!(matches!(
            session.act(&PlayerAction::Move { direction: Direction::Up }, 9_000, &mut rng),
            Err(SessionError::NoActiveRun)
        ));

        let stored = session.store().load().unwrap();
        assert_eq!(stored.stats.total_play_time, 4_000);
    }

    #[test]
    fn test_player_can_end_run_early() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(42);
        session.start_run(0, &mut rng).unwrap();
        let summary = session.finish_run(10).unwrap();
        assert_eq!(summary.death_cause, None);
        assert_eq!(summary.score, 50);
        assert!(!session.has_active_run());
    }

    #[test]
    fn test_permanent_upgrade_purchase_is_saved() {
        let mut session = session();
        assert!(matches!(
            session.purchase_permanent_upgrade(PermanentUpgradeKind::FuelEfficiency),
            Err(SessionError::Purchase(_))
        ));

        let mut rich = session.account().cloned().unwrap();
        rich.skill_points = 120;
        let mut store = MemoryAccountStore::default();
        store.save(&rich).unwrap();
        let mut session = GameSession::new(store, RunConfig::default());
        let account = session
            .purchase_permanent_upgrade(PermanentUpgradeKind::FuelEfficiency)
            .unwrap();
        assert_eq!(account.skill_points, 20);
        assert_eq!(session.store().load().unwrap().skill_points, 20);
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut session = GameSession::new(BrokenStore::default(), RunConfig::default());
        assert!(matches!(
            session.create_account("Vega", 0),
            Err(SessionError::Store(_))
        ));
        assert!(session.account().is_none());
    }

    #[test]
    fn test_failed_save_leaves_run_open() {
        let store = BrokenStore {
            account: Some(account::create_account("Vega", 0)),
        };
        let mut session = GameSession::new(store, RunConfig::default());
        let mut rng = StdRng::seed_from_u64(42);
        session.start_run(0, &mut rng).unwrap();
        let before = session.state().cloned().unwrap();

        assert!(matches!(session.finish_run(10), Err(SessionError::Store(_))));
        assert!(session.has_active_run());
        assert!(session.last_summary().is_none());
        assert_eq!(session.account().unwrap().stats.total_games_played, 0);
        assert_eq!(session.state(), Some(&before));
    }
}
