//! Pure game rules for Cosmic Cartographer.
//!
//! This crate holds every rule of the game that does not need a live
//! `GameState` or a random number generator: tile kinds, the static
//! probability and reward tables, reputation bands, the upgrade interpreter,
//! and the score / skill-point conversion. Functions take plain data and
//! return results, so they are unit-testable on their own and shared by the
//! engine (`cartographer-core`) and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Factions, directions, grid and sector coordinates |
//! | [`tiles`] | Tile kinds, visibility levels, the fixed 20×10 grid |
//! | [`tables`] | Spawn weights, base damage, trade offers, freighter stats, mission templates |
//! | [`factions`] | Rank bands, action point values, freighter unlock thresholds |
//! | [`upgrades`] | In-run ship upgrades and permanent upgrades (data + interpreter) |
//! | [`stats`] | Per-run statistics and death causes |
//! | [`scoring`] | Score and skill-point conversion for a finished run |

pub mod factions;
pub mod scoring;
pub mod stats;
pub mod tables;
pub mod tiles;
pub mod types;
pub mod upgrades;
