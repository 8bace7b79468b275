//! Achievement and milestone evaluation over a user's running stats.

use glentrail_model::{
    StatMetric, Tier, UserStats, ACHIEVEMENTS, CORBETT_TOTAL, DISTANCE_MILESTONES_KM,
    DONALD_TOTAL, MUNRO_TOTAL, WALK_MILESTONES,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementStatus {
    pub id: String,
    pub title: String,
    pub tier: Tier,
    pub metric: StatMetric,
    pub threshold: f64,
    pub current: f64,
    pub earned: bool,
    /// Clamped to 100 so an over-achieved badge never reads past complete.
    pub progress_pct: u8,
}

/// Progress toward completing a hill classification round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeakRoundProgress {
    pub current: i64,
    pub total: i64,
    pub percentage: u8,
}

/// Progress toward the next distance or walk-count milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneProgress {
    pub current: i64,
    pub next_milestone: i64,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub munros: PeakRoundProgress,
    pub corbetts: PeakRoundProgress,
    pub donalds: PeakRoundProgress,
    pub distance: MilestoneProgress,
    pub walks: MilestoneProgress,
}

/// Evaluates every achievement in catalog order against the given stats.
#[must_use]
pub fn evaluate(stats: &UserStats) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|def| {
            let current = def.metric.value(stats);
            AchievementStatus {
                id: def.id.to_string(),
                title: def.title.to_string(),
                tier: def.tier,
                metric: def.metric,
                threshold: def.threshold,
                current,
                earned: current >= def.threshold,
                progress_pct: percentage(current, def.threshold),
            }
        })
        .collect()
}

#[must_use]
pub fn progress_summary(stats: &UserStats) -> ProgressSummary {
    ProgressSummary {
        munros: peak_round(stats.munros_climbed, MUNRO_TOTAL),
        corbetts: peak_round(stats.corbetts_climbed, CORBETT_TOTAL),
        donalds: peak_round(stats.donalds_climbed, DONALD_TOTAL),
        distance: milestone(
            stats.total_distance_km.round() as i64,
            &DISTANCE_MILESTONES_KM,
        ),
        walks: milestone(stats.total_walks, &WALK_MILESTONES),
    }
}

fn peak_round(current: i64, total: i64) -> PeakRoundProgress {
    PeakRoundProgress {
        current,
        total,
        percentage: percentage(current as f64, total as f64),
    }
}

fn milestone(current: i64, milestones: &[i64]) -> MilestoneProgress {
    let next_milestone = milestones
        .iter()
        .copied()
        .find(|m| *m > current)
        .or_else(|| milestones.last().copied())
        .unwrap_or(0);
    MilestoneProgress {
        current,
        next_milestone,
        percentage: percentage(current as f64, next_milestone as f64),
    }
}

fn percentage(current: f64, target: f64) -> u8 {
    if target <= 0.0 {
        return 100;
    }
    let pct = (current / target * 100.0).round();
    if pct >= 100.0 {
        100
    } else if pct <= 0.0 {
        0
    } else {
        pct as u8
    }
}
