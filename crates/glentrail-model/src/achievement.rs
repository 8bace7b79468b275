use crate::user::UserStats;
use serde::{Deserialize, Serialize};

/// Registered totals for Scotland's hill classifications, used as progress
/// denominators. The Munro figure is the post-2012 SMC tally.
pub const MUNRO_TOTAL: i64 = 282;
pub const CORBETT_TOTAL: i64 = 222;
pub const DONALD_TOTAL: i64 = 89;

pub const DISTANCE_MILESTONES_KM: [i64; 6] = [100, 250, 500, 1000, 2000, 5000];
pub const WALK_MILESTONES: [i64; 6] = [10, 25, 50, 100, 200, 500];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

/// Which stats field an achievement thresholds against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StatMetric {
    TotalDistance,
    TotalWalks,
    MunrosClimbed,
    TotalTime,
    ReportsWritten,
}

impl StatMetric {
    #[must_use]
    pub fn value(self, stats: &UserStats) -> f64 {
        match self {
            Self::TotalDistance => stats.total_distance_km,
            Self::TotalWalks => stats.total_walks as f64,
            Self::MunrosClimbed => stats.munros_climbed as f64,
            Self::TotalTime => stats.total_time_hours,
            Self::ReportsWritten => stats.reports_written as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub metric: StatMetric,
    pub threshold: f64,
    pub tier: Tier,
}

/// The fixed badge catalog. Order is display order; ids are stable and are
/// what `UserStats::achievement_badges` stores.
pub const ACHIEVEMENTS: [AchievementDef; 13] = [
    AchievementDef {
        id: "first-century",
        title: "First Century",
        metric: StatMetric::TotalDistance,
        threshold: 100.0,
        tier: Tier::Bronze,
    },
    AchievementDef {
        id: "distance-warrior",
        title: "Distance Warrior",
        metric: StatMetric::TotalDistance,
        threshold: 500.0,
        tier: Tier::Silver,
    },
    AchievementDef {
        id: "highland-wanderer",
        title: "Highland Wanderer",
        metric: StatMetric::TotalDistance,
        threshold: 1000.0,
        tier: Tier::Gold,
    },
    AchievementDef {
        id: "getting-started",
        title: "Getting Started",
        metric: StatMetric::TotalWalks,
        threshold: 10.0,
        tier: Tier::Bronze,
    },
    AchievementDef {
        id: "regular-walker",
        title: "Regular Walker",
        metric: StatMetric::TotalWalks,
        threshold: 50.0,
        tier: Tier::Silver,
    },
    AchievementDef {
        id: "walk-master",
        title: "Walk Master",
        metric: StatMetric::TotalWalks,
        threshold: 100.0,
        tier: Tier::Gold,
    },
    AchievementDef {
        id: "first-munro",
        title: "First Munro",
        metric: StatMetric::MunrosClimbed,
        threshold: 1.0,
        tier: Tier::Bronze,
    },
    AchievementDef {
        id: "munro-collector",
        title: "Munro Collector",
        metric: StatMetric::MunrosClimbed,
        threshold: 10.0,
        tier: Tier::Silver,
    },
    AchievementDef {
        id: "munro-enthusiast",
        title: "Munro Enthusiast",
        metric: StatMetric::MunrosClimbed,
        threshold: 50.0,
        tier: Tier::Gold,
    },
    AchievementDef {
        id: "munro-compleatist",
        title: "Munro Compleatist",
        metric: StatMetric::MunrosClimbed,
        threshold: 282.0,
        tier: Tier::Platinum,
    },
    AchievementDef {
        id: "time-keeper",
        title: "Time Keeper",
        metric: StatMetric::TotalTime,
        threshold: 100.0,
        tier: Tier::Bronze,
    },
    AchievementDef {
        id: "dedicated-walker",
        title: "Dedicated Walker",
        metric: StatMetric::TotalTime,
        threshold: 500.0,
        tier: Tier::Silver,
    },
    AchievementDef {
        id: "walk-reporter",
        title: "Walk Reporter",
        metric: StatMetric::ReportsWritten,
        threshold: 5.0,
        tier: Tier::Silver,
    },
];

/// Badge ids currently earned by these stats, in catalog order. An
/// achievement is earned once its metric meets the threshold; tiers are
/// independent, so earning gold never retracts bronze.
#[must_use]
pub fn earned_badge_ids(stats: &UserStats) -> Vec<String> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| def.metric.value(stats) >= def.threshold)
        .map(|def| def.id.to_string())
        .collect()
}
