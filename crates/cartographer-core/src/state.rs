//! The `GameState` aggregate and run setup.

use crate::account::PlayerAccount;
use crate::combat::CombatState;
use crate::config::{validate_config, ConfigError, RunConfig};
use crate::freighter::{self, Freighter};
use crate::missions::Mission;
use crate::sector::SectorStore;
use crate::ship::ShipUpgrade;
use crate::visibility;
use cartographer_logic::factions::{rank_for, FactionRank};
use cartographer_logic::stats::{DeathCause, GameStats};
use cartographer_logic::tiles::{
    empty_grid, hidden_visibility, set_tile, Grid, Tile, VisibilityGrid,
};
use cartographer_logic::types::{Faction, GridPos, SectorCoord};
use cartographer_logic::upgrades::UpgradeKind;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Standing with one faction.
#[derive(Debug, Clone, PartialEq)]
pub struct FactionStatus {
    pub reputation: i32,
    pub rank: FactionRank,
    pub missions: Vec<Mission>,
    pub unlocked_technologies: Vec<String>,
    /// Rank the current mission list was generated for.
    pub missions_rank: FactionRank,
}

impl FactionStatus {
    fn new() -> Self {
        Self {
            reputation: 0,
            rank: rank_for(0),
            missions: Vec::new(),
            unlocked_technologies: Vec::new(),
            missions_rank: rank_for(0),
        }
    }
}

/// Standing with all three factions.
#[derive(Debug, Clone, PartialEq)]
pub struct Factions {
    pub aserian: FactionStatus,
    pub krynn: FactionStatus,
    pub eldari: FactionStatus,
}

impl Factions {
    pub fn new() -> Self {
        Self {
            aserian: FactionStatus::new(),
            krynn: FactionStatus::new(),
            eldari: FactionStatus::new(),
        }
    }

    pub fn get(&self, faction: Faction) -> &FactionStatus {
        match faction {
            Faction::Aserian => &self.aserian,
            Faction::Krynn => &self.krynn,
            Faction::Eldari => &self.eldari,
        }
    }

    pub fn get_mut(&mut self, faction: Faction) -> &mut FactionStatus {
        match faction {
            Faction::Aserian => &mut self.aserian,
            Faction::Krynn => &mut self.krynn,
            Faction::Eldari => &mut self.eldari,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Faction, &FactionStatus)> {
        Faction::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

impl Default for Factions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything about one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// The current sector, with the player and freighter markers drawn in.
    pub grid: Grid,
    pub visibility: VisibilityGrid,
    pub player_position: GridPos,
    pub current_sector: SectorCoord,
    pub sectors: SectorStore,
    pub explored_sectors: BTreeSet<String>,

    pub fuel: i32,
    pub max_fuel: i32,
    pub hull: i32,
    pub max_hull: i32,
    pub blueprints: u32,
    pub credits: u32,

    pub factions: Factions,
    /// Sector key → faction that claims it.
    pub faction_territories: BTreeMap<String, Faction>,
    pub freighters: Vec<Freighter>,

    pub upgrades: Vec<ShipUpgrade>,
    /// Fraction of damage absorbed, from the Shield Generator.
    pub damage_reduction: f64,
    /// Fraction of black-hole pull resisted, from the Anti-Gravity Thrusters.
    pub black_hole_resistance: f64,

    pub combat: CombatState,
    /// Outpost the ship is stopped at, until the next move.
    pub docked_at: Option<Faction>,

    /// Game messages, newest first.
    pub log: Vec<String>,
    pub game_over: bool,
    pub death_cause: Option<DeathCause>,
    pub stats: GameStats,
    /// Account snapshot the run was started from.
    pub account: PlayerAccount,

    pub base_difficulty: u32,
    pub freighter_spawn_chance: f64,
    pub(crate) next_mission_id: u64,
    pub(crate) next_freighter_id: u64,
}

impl GameState {
    /// A fresh run at the centre of the origin sector. `now` is milliseconds
    /// since the Unix epoch. Fails with every problem `validate_config`
    /// finds in `config`.
    pub fn new_run<R: Rng + ?Sized>(
        account: PlayerAccount,
        config: &RunConfig,
        now: u64,
        rng: &mut R,
    ) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(config);
        if !errors.is_empty() {
            return Err(errors);
        }
        let player_position = GridPos::center();
        let origin = SectorCoord::ORIGIN;

        let mut state = Self {
            grid: empty_grid(),
            visibility: hidden_visibility(),
            player_position,
            current_sector: origin,
            sectors: SectorStore::with_origin(),
            explored_sectors: BTreeSet::from([origin.key()]),
            fuel: config.starting_fuel.min(config.max_fuel),
            max_fuel: config.max_fuel,
            hull: config.max_hull,
            max_hull: config.max_hull,
            blueprints: 0,
            credits: config.starting_credits,
            factions: Factions::new(),
            faction_territories: BTreeMap::new(),
            freighters: Vec::new(),
            upgrades: UpgradeKind::ALL.into_iter().map(ShipUpgrade::new).collect(),
            damage_reduction: 0.0,
            black_hole_resistance: 0.0,
            combat: CombatState::Idle,
            docked_at: None,
            log: vec!["Welcome to Cosmic Cartographer!".to_string()],
            game_over: false,
            death_cause: None,
            stats: GameStats::new(now),
            account,
            base_difficulty: config.base_difficulty.max(1),
            freighter_spawn_chance: config.freighter_spawn_chance,
            next_mission_id: 1,
            next_freighter_id: 1,
        };

        for placed in &config.origin_freighters {
            let id = state.allocate_freighter_id();
            state
                .freighters
                .push(Freighter::new(id, placed.faction, origin, placed.position, rng));
        }
        freighter::redraw(&mut state);
        visibility::refresh(&mut state);

        log::info!(
            "Run started for {} with {} freighters in the origin sector",
            state.account.name,
            state.freighters.len()
        );
        Ok(state)
    }

    pub fn upgrade(&self, kind: UpgradeKind) -> Option<&ShipUpgrade> {
        self.upgrades.iter().find(|u| u.kind == kind)
    }

    /// Owned level of an in-run upgrade (0 if not bought).
    pub fn upgrade_level(&self, kind: UpgradeKind) -> u8 {
        self.upgrade(kind).map_or(0, |u| u.current_level)
    }

    pub fn sector_key(&self) -> String {
        self.current_sector.key()
    }

    pub fn in_combat(&self) -> bool {
        matches!(self.combat, CombatState::InCombat { .. })
    }

    /// Freighters in the player's current sector.
    pub fn local_freighters(&self) -> impl Iterator<Item = &Freighter> {
        let sector = self.current_sector;
        self.freighters.iter().filter(move |f| f.sector == sector)
    }

    /// Prepend one batch of messages to the log, keeping the batch's order.
    pub(crate) fn record(&mut self, messages: Vec<String>) {
        self.log.splice(0..0, messages);
    }

    /// A copy of `self` with a single explanatory log line and nothing else
    /// changed.
    pub(crate) fn rejected(&self, message: impl Into<String>) -> GameState {
        let mut next = self.clone();
        next.log.insert(0, message.into());
        next
    }

    pub(crate) fn gain_blueprints(&mut self, amount: u32) {
        self.blueprints += amount;
        self.stats.blueprints_collected += amount;
    }

    pub(crate) fn spend_fuel(&mut self, amount: i32) {
        self.fuel = (self.fuel - amount).clamp(0, self.max_fuel);
    }

    pub(crate) fn allocate_freighter_id(&mut self) -> u64 {
        let id = self.next_freighter_id;
        self.next_freighter_id += 1;
        id
    }

    pub(crate) fn allocate_mission_id(&mut self) -> u64 {
        let id = self.next_mission_id;
        self.next_mission_id += 1;
        id
    }

    /// Draw the player marker at the current position.
    pub(crate) fn place_player(&mut self) {
        set_tile(&mut self.grid, self.player_position, Tile::Player);
    }

    /// Clamp resources, then end the run if a terminal condition holds.
    /// Fuel is checked before hull.
    pub(crate) fn settle(&mut self) {
        self.fuel = self.fuel.clamp(0, self.max_fuel);
        self.hull = self.hull.clamp(0, self.max_hull);

        if self.game_over {
            return;
        }
        let cause = if self.fuel <= 0 {
            DeathCause::FuelDepletion
        } else if self.hull <= 0 {
            DeathCause::PirateAttack
        } else {
            return;
        };
        self.game_over = true;
        self.death_cause = Some(cause);
        self.stats.death_cause = cause;
        self.combat = CombatState::Idle;
        log::info!(
            "Run over for {}: {} after {} turns",
            self.account.name,
            cause.id(),
            self.stats.turns_played
        );
    }
}
