//! Player account: cross-run progression, the permanent upgrade catalog,
//! and the storage port it is loaded from and saved to.
//!
//! The record serializes to a flat camelCase JSON object so existing saves
//! stay readable.

use cartographer_logic::scoring::calculate_skill_points;
use cartographer_logic::stats::GameStats;
use cartographer_logic::upgrades::PermanentUpgradeKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermanentUpgrade {
    pub name: String,
    pub description: String,
    pub cost: u32,
    pub max_level: u8,
    pub current_level: u8,
}

impl PermanentUpgrade {
    fn new(kind: PermanentUpgradeKind) -> Self {
        Self {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            cost: kind.cost(),
            max_level: kind.max_level(),
            current_level: 0,
        }
    }

    /// Catalog entry this record belongs to, matched by name.
    pub fn kind(&self) -> Option<PermanentUpgradeKind> {
        PermanentUpgradeKind::from_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub total_games_played: u32,
    pub best_score: u64,
    pub furthest_distance: f64,
    /// Milliseconds.
    pub total_play_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAccount {
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub created: u64,
    pub skill_points: u32,
    pub permanent_upgrades: Vec<PermanentUpgrade>,
    pub stats: AccountStats,
}

impl PlayerAccount {
    pub fn upgrade(&self, kind: PermanentUpgradeKind) -> Option<&PermanentUpgrade> {
        self.permanent_upgrades.iter().find(|u| u.kind() == Some(kind))
    }

    pub fn upgrade_level(&self, kind: PermanentUpgradeKind) -> u8 {
        self.upgrade(kind).map_or(0, |u| u.current_level)
    }
}

/// A new account with every permanent upgrade at level 0.
pub fn create_account(name: &str, now: u64) -> PlayerAccount {
    PlayerAccount {
        name: name.to_string(),
        created: now,
        skill_points: 0,
        permanent_upgrades: PermanentUpgradeKind::ALL
            .into_iter()
            .map(PermanentUpgrade::new)
            .collect(),
        stats: AccountStats::default(),
    }
}

/// Fold a finished run into the account. Returns the updated account and
/// the skill points awarded.
pub fn record_run(account: &PlayerAccount, stats: &GameStats, now: u64) -> (PlayerAccount, u32) {
    let earned = calculate_skill_points(stats);
    let mut next = account.clone();
    next.stats.total_games_played += 1;
    next.stats.best_score = next.stats.best_score.max(stats.total_score);
    next.stats.furthest_distance = next.stats.furthest_distance.max(stats.max_distance_reached);
    next.stats.total_play_time += stats.play_time(now);
    next.skill_points += earned;
    (next, earned)
}

/// Why a permanent upgrade purchase was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("{name} costs {cost} skill points, only {available} available")]
    InsufficientSkillPoints {
        name: &'static str,
        cost: u32,
        available: u32,
    },
    #[error("{0} is already at max level")]
    MaxLevel(&'static str),
    #[error("{0} is missing from this account")]
    NotOnAccount(&'static str),
}

/// Buy one level of `kind`. The input account is never modified.
pub fn purchase_permanent_upgrade(
    account: &PlayerAccount,
    kind: PermanentUpgradeKind,
) -> Result<PlayerAccount, PurchaseError> {
    let index = account
        .permanent_upgrades
        .iter()
        .position(|u| u.kind() == Some(kind))
        .ok_or(PurchaseError::NotOnAccount(kind.name()))?;
    let upgrade = &account.permanent_upgrades[index];

    if upgrade.current_level >= upgrade.max_level {
        return Err(PurchaseError::MaxLevel(kind.name()));
    }
    if account.skill_points < upgrade.cost {
        return Err(PurchaseError::InsufficientSkillPoints {
            name: kind.name(),
            cost: upgrade.cost,
            available: account.skill_points,
        });
    }

    let mut next = account.clone();
    next.skill_points -= upgrade.cost;
    next.permanent_upgrades[index].current_level += 1;
    log::info!(
        "{} bought {} level {}",
        next.name,
        kind.name(),
        next.permanent_upgrades[index].current_level
    );
    Ok(next)
}

// ============================================================================
// STORAGE
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("account could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the account lives between runs.
pub trait AccountStore {
    /// The saved account, or `None` if nothing usable is stored.
    fn load(&self) -> Option<PlayerAccount>;
    fn save(&mut self, account: &PlayerAccount) -> Result<(), StoreError>;
}

/// Keeps the serialized record in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    slot: Option<String>,
}

impl MemoryAccountStore {
    /// A store pre-loaded with raw JSON, valid or not.
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            slot: Some(json.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl AccountStore for MemoryAccountStore {
    fn load(&self) -> Option<PlayerAccount> {
        parse_account(self.slot.as_deref()?, "memory")
    }

    fn save(&mut self, account: &PlayerAccount) -> Result<(), StoreError> {
        self.slot = Some(serde_json::to_string(account)?);
        Ok(())
    }
}

/// Keeps the record in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileAccountStore {
    path: PathBuf,
}

impl JsonFileAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountStore for JsonFileAccountStore {
    fn load(&self) -> Option<PlayerAccount> {
        let json = fs::read_to_string(&self.path).ok()?;
        parse_account(&json, &self.path.display().to_string())
    }

    fn save(&mut self, account: &PlayerAccount) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(account)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn parse_account(json: &str, origin: &str) -> Option<PlayerAccount> {
    match serde_json::from_str(json) {
        Ok(account) => Some(account),
        Err(e) => {
            log::warn!("Ignoring malformed account from {}: {}", origin, e);
            None
        }
    }
}
