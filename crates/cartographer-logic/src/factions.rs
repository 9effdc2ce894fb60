//! Faction reputation rules: rank bands, point values per action, and the
//! reputation needed before a faction's freighters will trade.

use crate::types::Faction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest reputation a faction can hold.
pub const REPUTATION_MIN: i32 = -1000;
/// Highest reputation a faction can hold.
pub const REPUTATION_MAX: i32 = 1000;

/// Named standing with a faction, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactionRank {
    SwornEnemy,
    Outlaw,
    Untrustworthy,
    Suspicious,
    Neutral,
    Acquainted,
    Allied,
    Respected,
    Champion,
    LegendaryAlly,
}

/// Closed reputation interval for each rank. Bands are contiguous and cover
/// `REPUTATION_MIN..=REPUTATION_MAX` exactly once.
pub const RANK_BANDS: [(FactionRank, i32, i32); 10] = [
    (FactionRank::SwornEnemy, -1000, -700),
    (FactionRank::Outlaw, -699, -400),
    (FactionRank::Untrustworthy, -399, -200),
    (FactionRank::Suspicious, -199, -50),
    (FactionRank::Neutral, -49, 49),
    (FactionRank::Acquainted, 50, 199),
    (FactionRank::Allied, 200, 399),
    (FactionRank::Respected, 400, 699),
    (FactionRank::Champion, 700, 999),
    (FactionRank::LegendaryAlly, 1000, 1000),
];

impl FactionRank {
    pub fn name(self) -> &'static str {
        match self {
            Self::SwornEnemy => "Sworn Enemy",
            Self::Outlaw => "Outlaw",
            Self::Untrustworthy => "Untrustworthy",
            Self::Suspicious => "Suspicious",
            Self::Neutral => "Neutral",
            Self::Acquainted => "Acquainted",
            Self::Allied => "Allied",
            Self::Respected => "Respected",
            Self::Champion => "Champion",
            Self::LegendaryAlly => "Legendary Ally",
        }
    }

    /// Whether a faction offers missions at all to someone of this rank.
    pub fn offers_missions(self) -> bool {
        matches!(self, Self::Allied | Self::Champion | Self::LegendaryAlly)
    }
}

impl fmt::Display for FactionRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rank for a reputation value. Out-of-range input is clamped first.
pub fn rank_for(reputation: i32) -> FactionRank {
    let reputation = clamp_reputation(reputation);
    for (rank, min, max) in RANK_BANDS {
        if reputation >= min && reputation <= max {
            return rank;
        }
    }
    FactionRank::Neutral
}

pub fn clamp_reputation(reputation: i32) -> i32 {
    reputation.clamp(REPUTATION_MIN, REPUTATION_MAX)
}

/// Actions a faction rewards with reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionAction {
    ExploreTerritory,
    DefendFreighter,
    CompleteMission,
    TradeResources,
    DefeatEnemy,
    DiscoverArtifact,
}

impl FactionAction {
    /// Base reputation points before the multiplier.
    pub fn points(self) -> i32 {
        match self {
            Self::ExploreTerritory => 10,
            Self::DefendFreighter => 25,
            Self::CompleteMission => 50,
            Self::TradeResources => 15,
            Self::DefeatEnemy => 20,
            Self::DiscoverArtifact => 30,
        }
    }

    /// Points awarded with a multiplier, floored.
    pub fn scaled_points(self, multiplier: f64) -> i32 {
        (self.points() as f64 * multiplier).floor() as i32
    }
}

/// Reputation at which a faction's freighters open for trade.
pub fn freighter_unlock_threshold(faction: Faction) -> i32 {
    match faction {
        Faction::Aserian => 400,
        Faction::Krynn => 500,
        Faction::Eldari => 600,
    }
}

/// Reputation needed to trade at a faction sanctuary (Acquainted).
pub const SANCTUARY_TRADE_THRESHOLD: i32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_partition_range() {
        assert_eq!(RANK_BANDS[0].1, REPUTATION_MIN);
        assert_eq!(RANK_BANDS[RANK_BANDS.len() - 1].2, REPUTATION_MAX);
        for pair in RANK_BANDS.windows(2) {
            assert_eq!(pair[0].2 + 1, pair[1].1, "gap between {:?} and {:?}", pair[0].0, pair[1].0);
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_rank_for_is_total_and_exclusive() {
        for rep in REPUTATION_MIN..=REPUTATION_MAX {
            let matching = RANK_BANDS
                .iter()
                .filter(|(_, min, max)| rep >= *min && rep <= *max)
                .count();
            assert_eq!(matching, 1, "reputation {} matched {} bands", rep, matching);
            let rank = rank_for(rep);
            let (_, min, max) = RANK_BANDS.iter().find(|(r, _, _)| *r == rank).unwrap();
            assert!(rep >= *min && rep <= *max);
        }
    }

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(rank_for(-1000), FactionRank::SwornEnemy);
        assert_eq!(rank_for(-700), FactionRank::SwornEnemy);
        assert_eq!(rank_for(-699), FactionRank::Outlaw);
        assert_eq!(rank_for(0), FactionRank::Neutral);
        assert_eq!(rank_for(49), FactionRank::Neutral);
        assert_eq!(rank_for(50), FactionRank::Acquainted);
        assert_eq!(rank_for(200), FactionRank::Allied);
        assert_eq!(rank_for(999), FactionRank::Champion);
        assert_eq!(rank_for(1000), FactionRank::LegendaryAlly);
    }

    #[test]
    fn test_rank_for_clamps_out_of_range() {
        assert_eq!(rank_for(5000), FactionRank::LegendaryAlly);
        assert_eq!(rank_for(-5000), FactionRank::SwornEnemy);
    }

    #[test]
    fn test_scaled_points_floor() {
        assert_eq!(FactionAction::ExploreTerritory.scaled_points(1.0), 10);
        assert_eq!(FactionAction::ExploreTerritory.scaled_points(0.35), 3);
        assert_eq!(FactionAction::TradeResources.scaled_points(2.0), 30);
    }

    #[test]
    fn test_unlock_thresholds() {
        assert_eq!(freighter_unlock_threshold(Faction::Aserian), 400);
        assert_eq!(freighter_unlock_threshold(Faction::Krynn), 500);
        assert_eq!(freighter_unlock_threshold(Faction::Eldari), 600);
    }
}
