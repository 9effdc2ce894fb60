//! Cosmic Cartographer Core - Game-State Engine
//!
//! The turn-based state machine behind a space-exploration run: it owns the
//! galaxy grid, the player ship, faction reputation, freighters, combat and
//! the bridge from a finished run into permanent account progression.
//!
//! # Architecture
//!
//! Everything hangs off one aggregate, [`state::GameState`]:
//! - **Resolvers** take `&GameState` and return a new `GameState`; the input
//!   is never modified. Internally they mutate a working copy.
//! - **Rules** that need neither state nor dice live in `cartographer-logic`.
//! - **Randomness** is injected at every call site as `&mut impl Rng`.
//! - **Persistence** of the account goes through the [`account::AccountStore`]
//!   port, owned by [`engine::GameSession`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Run configuration and validation |
//! | [`rng`] | Dice helpers over an injected `Rng` |
//! | [`state`] | The `GameState` aggregate and run setup |
//! | [`sector`] | Sector generation, the sector store, sector transitions |
//! | [`visibility`] | Fog of war |
//! | [`damage`] | Hull damage with shield mitigation |
//! | [`reputation`] | Faction reputation and ranks |
//! | [`missions`] | Faction mission generation and acceptance |
//! | [`freighter`] | Freighter spawning, patrols, trade, raids, defence |
//! | [`combat`] | Pirate encounters |
//! | [`movement`] | The per-move orchestrator and tile effects |
//! | [`ship`] | In-run ship upgrades |
//! | [`sanctuary`] | Repairs and trade at faction outposts |
//! | [`account`] | Player account, permanent upgrades, the store port |
//! | [`command`] | Player actions and their dispatch |
//! | [`engine`] | Run session tying state, actions and the account store together |
//!
//! # Example
//!
//! ```rust,no_run
//! use cartographer_core::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let mut session = GameSession::new(MemoryAccountStore::default(), RunConfig::default());
//! session.create_account("Vega", 0).unwrap();
//! session.start_run(0, &mut rng).unwrap();
//! session.act(&PlayerAction::Move { direction: Direction::Right }, 1, &mut rng).unwrap();
//! ```

pub mod account;
pub mod combat;
pub mod command;
pub mod config;
pub mod damage;
pub mod engine;
pub mod freighter;
pub mod missions;
pub mod movement;
pub mod reputation;
pub mod rng;
pub mod sanctuary;
pub mod sector;
pub mod ship;
pub mod state;
pub mod visibility;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::account::{AccountStore, JsonFileAccountStore, MemoryAccountStore, PlayerAccount};
    pub use crate::combat::{CombatAction, CombatState};
    pub use crate::command::PlayerAction;
    pub use crate::config::RunConfig;
    pub use crate::engine::GameSession;
    pub use crate::state::GameState;
    pub use cartographer_logic::types::{Direction, Faction, GridPos, SectorCoord};
    pub use cartographer_logic::upgrades::{PermanentUpgradeKind, UpgradeKind};
}
