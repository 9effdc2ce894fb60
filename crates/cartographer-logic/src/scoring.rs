//! Score and skill-point conversion for a finished run.
//!
//! Pure functions over [`GameStats`]. Skill points are the bridge from a
//! single run to permanent account progression; they are computed once when
//! the run ends and never recomputed.

use crate::stats::GameStats;

const TILE_WEIGHT: u64 = 1;
const PLANET_WEIGHT: u64 = 10;
const DERELICT_WEIGHT: u64 = 15;
const NEBULA_WEIGHT: u64 = 5;
const PIRATE_WEIGHT: u64 = 20;
const DIPLOMACY_WEIGHT: u64 = 10;
const SECTOR_WEIGHT: u64 = 50;
const BLUEPRINT_WEIGHT: u64 = 30;
const BLACK_HOLE_WEIGHT: u64 = 25;
const DISTANCE_WEIGHT: u64 = 100;

/// Score points per skill point.
const SCORE_PER_SKILL_POINT: u64 = 1000;
/// Sectors of distance per bonus skill point.
const DISTANCE_PER_SKILL_POINT: f64 = 5.0;

/// Weighted sum of a run's counters.
pub fn calculate_score(stats: &GameStats) -> u64 {
    stats.tiles_explored as u64 * TILE_WEIGHT
        + stats.planets_discovered as u64 * PLANET_WEIGHT
        + stats.derelicts_explored as u64 * DERELICT_WEIGHT
        + stats.nebulae_traversed as u64 * NEBULA_WEIGHT
        + stats.pirates_defeated as u64 * PIRATE_WEIGHT
        + stats.diplomatic_missions as u64 * DIPLOMACY_WEIGHT
        + stats.sectors_explored as u64 * SECTOR_WEIGHT
        + stats.blueprints_collected as u64 * BLUEPRINT_WEIGHT
        + stats.black_holes_escaped as u64 * BLACK_HOLE_WEIGHT
        + stats.max_distance_reached.max(0.0).floor() as u64 * DISTANCE_WEIGHT
}

/// Flat bonuses for run milestones.
pub fn achievement_points(stats: &GameStats) -> u32 {
    let mut points = 0;
    if stats.black_holes_escaped > 0 {
        points += 5;
    }
    if stats.pirates_defeated >= 5 {
        points += 10;
    }
    if stats.sectors_explored >= 10 {
        points += 15;
    }
    if stats.diplomatic_missions >= 3 {
        points += 10;
    }
    points
}

/// Permanent skill points earned by a run.
pub fn calculate_skill_points(stats: &GameStats) -> u32 {
    let base = (calculate_score(stats) / SCORE_PER_SKILL_POINT) as u32;
    let distance_bonus =
        (stats.max_distance_reached.max(0.0) / DISTANCE_PER_SKILL_POINT).floor() as u32;
    base + distance_bonus + achievement_points(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_run_scores_origin_sector() {
        let stats = GameStats::new(0);
        assert_eq!(calculate_score(&stats), 50);
        assert_eq!(calculate_skill_points(&stats), 0);
    }

    #[test]
    fn test_score_weights() {
        let stats = GameStats {
            tiles_explored: 7,
            planets_discovered: 2,
            derelicts_explored: 1,
            nebulae_traversed: 3,
            pirates_defeated: 1,
            diplomatic_missions: 2,
            sectors_explored: 4,
            blueprints_collected: 5,
            black_holes_escaped: 1,
            max_distance_reached: 2.9,
            ..GameStats::default()
        };
        // 7 + 20 + 15 + 15 + 20 + 20 + 200 + 150 + 25 + 200
        assert_eq!(calculate_score(&stats), 672);
    }

    #[test]
    fn test_skill_points_with_achievements() {
        let stats = GameStats {
            tiles_explored: 500,
            pirates_defeated: 5,
            sectors_explored: 10,
            diplomatic_missions: 3,
            black_holes_escaped: 1,
            max_distance_reached: 12.2,
            ..GameStats::default()
        };
        // score = 500 + 100 + 30 + 500 + 25 + 1200 = 2355
        assert_eq!(calculate_score(&stats), 2355);
        // 2 (score) + 2 (distance) + 5 + 10 + 15 + 10
        assert_eq!(calculate_skill_points(&stats), 44);
    }

    #[test]
    fn test_achievement_thresholds() {
        let mut stats = GameStats::default();
        stats.pirates_defeated = 4;
        stats.sectors_explored = 9;
        stats.diplomatic_missions = 2;
        assert_eq!(achievement_points(&stats), 0);
        stats.pirates_defeated = 5;
        assert_eq!(achievement_points(&stats), 10);
    }
}
