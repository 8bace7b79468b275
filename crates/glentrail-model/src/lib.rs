#![forbid(unsafe_code)]
//! Glentrail domain model SSOT.
//!
//! ```compile_fail
//! use glentrail_model::Difficulty;
//!
//! fn exhaustive_match(d: Difficulty) -> &'static str {
//!     match d {
//!         Difficulty::Easy => "e",
//!         Difficulty::Moderate => "m",
//!         Difficulty::Hard => "h",
//!         Difficulty::Strenuous => "s",
//!     }
//! }
//! ```

mod achievement;
mod ids;
mod region;
mod report;
mod social;
mod user;
mod walk;

pub use achievement::{
    earned_badge_ids, AchievementDef, StatMetric, Tier, ACHIEVEMENTS, CORBETT_TOTAL,
    DISTANCE_MILESTONES_KM, DONALD_TOTAL, MUNRO_TOTAL, WALK_MILESTONES,
};
pub use ids::{
    ParseError, RegionId, ReportId, Slug, UserId, WalkId, EXTERNAL_ID_MAX_LEN, SLUG_MAX_LEN,
};
pub use region::{NewRegion, Region, REGION_NAME_MAX_LEN};
pub use report::{round_rating, NewReport, WalkReport, RATING_MAX, RATING_MIN};
pub use social::{Completion, CompletionInput, Like, LikeTargetType};
pub use user::{NewUser, SubscriptionTier, User, UserStats, USER_NAME_MAX_LEN};
pub use walk::{
    Difficulty, GpsCoordinate, NewWalk, PeakCategory, RouteType, Walk, WalkStage, BOG_FACTOR_MAX,
    BOG_FACTOR_MIN, SHORT_DESCRIPTION_MAX_LEN, TAG_MAX_LEN, TITLE_MAX_LEN,
};

pub const CRATE_NAME: &str = "glentrail-model";
