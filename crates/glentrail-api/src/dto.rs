// SPDX-License-Identifier: Apache-2.0

//! Response and request body shapes. Where the wire shape is the domain type
//! (stats, achievements, activity buckets) the model/query types serialize
//! directly; DTOs exist where responses join entities or redact fields.

use glentrail_model::{
    Difficulty, GpsCoordinate, LikeTargetType, NewWalk, RegionId, ReportId, RouteType, Slug,
    SubscriptionTier, UserId, UserStats, WalkId,
};
use glentrail_query::achievements::{AchievementStatus, ProgressSummary};
use glentrail_query::activity::{ActivityBucket, ActivityRange};
use serde::{Deserialize, Serialize};

/// Public profile fields. The identity subject never leaves the service
/// except through `/v1/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UserSummaryDto {
    pub id: UserId,
    pub name: String,
    pub image_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
    pub external_id: String,
    pub image_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub joined_at: i64,
    pub last_active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegionRefDto {
    pub id: RegionId,
    pub name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegionDto {
    pub id: RegionId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub image_url: Option<String>,
    pub walk_count: i64,
    pub popularity_score: i64,
}

/// One row of the catalog list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkSummaryDto {
    pub id: WalkId,
    pub title: String,
    pub slug: Slug,
    pub short_description: String,
    pub region: RegionRefDto,
    pub difficulty: Difficulty,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub estimated_time_hours: f64,
    pub route_type: RouteType,
    pub bog_factor: Option<u8>,
    pub featured_image_url: String,
    pub tags: Vec<String>,
    pub view_count: i64,
    pub like_count: i64,
    pub report_count: i64,
    pub average_rating: f64,
    pub published_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkPageDto {
    pub items: Vec<WalkSummaryDto>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WalkCountDto {
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StageDto {
    pub stage_number: u32,
    pub title: Option<String>,
    pub description: String,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub elevation_m: Option<i64>,
    pub image_url: Option<String>,
    pub gps: Option<GpsCoordinate>,
    pub terrain: Option<String>,
    pub landmarks: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkDetailDto {
    pub id: WalkId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub detailed_description: Option<String>,
    pub region: RegionRefDto,
    pub author: UserSummaryDto,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub difficulty: Difficulty,
    pub estimated_time_hours: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub max_elevation_m: i64,
    pub route_type: RouteType,
    pub featured_image_url: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub view_count: i64,
    pub like_count: i64,
    pub report_count: i64,
    pub average_rating: f64,
    pub terrain: Option<String>,
    pub start_grid_ref: Option<String>,
    pub parking_info: Option<String>,
    pub public_transport: Option<String>,
    pub bog_factor: Option<u8>,
    pub source_url: Option<String>,
    pub created_at: i64,
    pub stages: Vec<StageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportDto {
    pub id: ReportId,
    pub walk_id: WalkId,
    pub author: UserSummaryDto,
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub completed_at: i64,
    pub weather_conditions: Option<String>,
    pub trail_conditions: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub actual_time_hours: Option<f64>,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WalkRefDto {
    pub id: WalkId,
    pub title: String,
    pub slug: Slug,
}

/// A report in context: the community feed and the member's history both
/// serve this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportFeedEntryDto {
    pub report: ReportDto,
    pub walk: WalkRefDto,
    pub region: RegionRefDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LikeEntryDto {
    pub user: UserSummaryDto,
    pub liked_at: i64,
}

/// Likes for one target. `count` is computed from rows, not the cached
/// counter on the target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LikesDto {
    pub count: i64,
    pub likes: Vec<LikeEntryDto>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LikedDto {
    pub liked: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LikeToggleDto {
    pub liked: bool,
    pub like_count: i64,
}

/// View beacon acknowledgement; `view_count` is absent when the walk no
/// longer exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ViewDto {
    pub view_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AchievementsDto {
    pub badges: Vec<String>,
    pub achievements: Vec<AchievementStatus>,
    pub progress: ProgressSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ActivityDto {
    pub range: ActivityRange,
    pub buckets: Vec<ActivityBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompletionDto {
    pub walk_id: WalkId,
    pub completed_at: i64,
    pub completed_day: String,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub time_hours: f64,
    pub category: Option<glentrail_model::PeakCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompletionOutcomeDto {
    pub completion: CompletionDto,
    pub stats: UserStats,
    pub newly_earned: Vec<String>,
}

/// Body of `POST /v1/walks`. The region is referenced by slug; the server
/// resolves it before the store insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CreateWalkBody {
    pub region_slug: Slug,
    pub walk: NewWalk,
}

/// Body of `POST /v1/likes/toggle`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LikeToggleBody {
    pub target_type: LikeTargetType,
    pub target_id: i64,
}
