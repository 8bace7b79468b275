// SPDX-License-Identifier: Apache-2.0

//! Builders from domain entities to wire DTOs. Handlers fetch, these shape.

use crate::dto::{
    AchievementsDto, ActivityDto, CompletionDto, CompletionOutcomeDto, LikeEntryDto, LikesDto,
    RegionDto, RegionRefDto, ReportDto, ReportFeedEntryDto, StageDto, UserDto, UserSummaryDto,
    WalkDetailDto, WalkPageDto, WalkRefDto, WalkSummaryDto,
};
use crate::errors::ApiError;
use glentrail_model::{Like, Region, RegionId, User, UserStats, Walk, WalkReport, WalkStage};
use glentrail_query::achievements::{evaluate, progress_summary};
use glentrail_query::activity::{bucket_entries, ActivityEntry, ActivityRange};
use glentrail_query::WalkQueryResponse;
use glentrail_store::{ActivitySample, CompletionOutcome, HistoryItem, ReportFeedItem};
use std::collections::BTreeMap;

#[must_use]
pub fn user_summary_dto(user: &User) -> UserSummaryDto {
    UserSummaryDto {
        id: user.id,
        name: user.name.clone(),
        image_url: user.image_url.clone(),
        subscription_tier: user.subscription_tier,
    }
}

#[must_use]
pub fn user_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name.clone(),
        external_id: user.external_id.clone(),
        image_url: user.image_url.clone(),
        subscription_tier: user.subscription_tier,
        joined_at: user.joined_at,
        last_active: user.last_active,
    }
}

#[must_use]
pub fn region_ref_dto(region: &Region) -> RegionRefDto {
    RegionRefDto {
        id: region.id,
        name: region.name.clone(),
        slug: region.slug.clone(),
    }
}

#[must_use]
pub fn region_dto(region: &Region) -> RegionDto {
    RegionDto {
        id: region.id,
        name: region.name.clone(),
        slug: region.slug.clone(),
        description: region.description.clone(),
        image_url: region.image_url.clone(),
        walk_count: region.walk_count,
        popularity_score: region.popularity_score,
    }
}

#[must_use]
pub fn walk_ref_dto(walk: &Walk) -> WalkRefDto {
    WalkRefDto {
        id: walk.id,
        title: walk.title.clone(),
        slug: walk.slug.clone(),
    }
}

#[must_use]
pub fn walk_summary_dto(walk: &Walk, region: &Region) -> WalkSummaryDto {
    WalkSummaryDto {
        id: walk.id,
        title: walk.title.clone(),
        slug: walk.slug.clone(),
        short_description: walk.short_description.clone(),
        region: region_ref_dto(region),
        difficulty: walk.difficulty,
        distance_km: walk.distance_km,
        ascent_m: walk.ascent_m,
        estimated_time_hours: walk.estimated_time_hours,
        route_type: walk.route_type,
        bog_factor: walk.bog_factor,
        featured_image_url: walk.featured_image_url.clone(),
        tags: walk.tags.clone(),
        view_count: walk.view_count,
        like_count: walk.like_count,
        report_count: walk.report_count,
        average_rating: walk.average_rating,
        published_at: walk.published_at,
    }
}

#[must_use]
pub fn stage_dto(stage: &WalkStage) -> StageDto {
    StageDto {
        stage_number: stage.stage_number,
        title: stage.title.clone(),
        description: stage.description.clone(),
        distance_km: stage.distance_km,
        duration_minutes: stage.duration_minutes,
        elevation_m: stage.elevation_m,
        image_url: stage.image_url.clone(),
        gps: stage.gps,
        terrain: stage.terrain.clone(),
        landmarks: stage.landmarks.clone(),
        warnings: stage.warnings.clone(),
    }
}

#[must_use]
pub fn walk_detail_dto(
    walk: &Walk,
    region: &Region,
    author: &User,
    stages: &[WalkStage],
) -> WalkDetailDto {
    WalkDetailDto {
        id: walk.id,
        title: walk.title.clone(),
        slug: walk.slug.clone(),
        description: walk.description.clone(),
        short_description: walk.short_description.clone(),
        detailed_description: walk.detailed_description.clone(),
        region: region_ref_dto(region),
        author: user_summary_dto(author),
        distance_km: walk.distance_km,
        ascent_m: walk.ascent_m,
        difficulty: walk.difficulty,
        estimated_time_hours: walk.estimated_time_hours,
        latitude: walk.latitude,
        longitude: walk.longitude,
        max_elevation_m: walk.max_elevation_m,
        route_type: walk.route_type,
        featured_image_url: walk.featured_image_url.clone(),
        tags: walk.tags.clone(),
        is_published: walk.is_published,
        published_at: walk.published_at,
        view_count: walk.view_count,
        like_count: walk.like_count,
        report_count: walk.report_count,
        average_rating: walk.average_rating,
        terrain: walk.terrain.clone(),
        start_grid_ref: walk.start_grid_ref.clone(),
        parking_info: walk.parking_info.clone(),
        public_transport: walk.public_transport.clone(),
        bog_factor: walk.bog_factor,
        source_url: walk.source_url.clone(),
        created_at: walk.created_at,
        stages: stages.iter().map(stage_dto).collect(),
    }
}

/// Shapes one page of query results. Every item's region must be present in
/// `regions`; a dangling region id is a data fault, not a caller error.
pub fn walk_page_dto(
    response: &WalkQueryResponse,
    regions: &[Region],
) -> Result<WalkPageDto, ApiError> {
    let by_id: BTreeMap<RegionId, &Region> = regions.iter().map(|r| (r.id, r)).collect();
    let mut items = Vec::with_capacity(response.items.len());
    for walk in &response.items {
        let region = by_id
            .get(&walk.region_id)
            .ok_or_else(|| ApiError::internal("walk references an unknown region"))?;
        items.push(walk_summary_dto(walk, region));
    }
    Ok(WalkPageDto {
        items,
        total: response.total,
        limit: response.limit,
        offset: response.offset,
    })
}

#[must_use]
pub fn report_dto(report: &WalkReport, author: &User) -> ReportDto {
    ReportDto {
        id: report.id,
        walk_id: report.walk_id,
        author: user_summary_dto(author),
        title: report.title.clone(),
        content: report.content.clone(),
        rating: report.rating,
        completed_at: report.completed_at,
        weather_conditions: report.weather_conditions.clone(),
        trail_conditions: report.trail_conditions.clone(),
        difficulty: report.difficulty,
        actual_time_hours: report.actual_time_hours,
        is_published: report.is_published,
        published_at: report.published_at,
        like_count: report.like_count,
        comment_count: report.comment_count,
        created_at: report.created_at,
    }
}

#[must_use]
pub fn feed_entry_dto(item: &ReportFeedItem) -> ReportFeedEntryDto {
    ReportFeedEntryDto {
        report: report_dto(&item.report, &item.author),
        walk: walk_ref_dto(&item.walk),
        region: region_ref_dto(&item.region),
    }
}

/// History rows all belong to the caller, so the author comes in once.
#[must_use]
pub fn history_entry_dto(item: &HistoryItem, author: &User) -> ReportFeedEntryDto {
    ReportFeedEntryDto {
        report: report_dto(&item.report, author),
        walk: walk_ref_dto(&item.walk),
        region: region_ref_dto(&item.region),
    }
}

#[must_use]
pub fn likes_dto(count: i64, entries: &[(Like, User)]) -> LikesDto {
    LikesDto {
        count,
        likes: entries
            .iter()
            .map(|(like, user)| LikeEntryDto {
                user: user_summary_dto(user),
                liked_at: like.liked_at,
            })
            .collect(),
    }
}

#[must_use]
pub fn completion_outcome_dto(outcome: &CompletionOutcome) -> CompletionOutcomeDto {
    let completion = &outcome.completion;
    CompletionOutcomeDto {
        completion: CompletionDto {
            walk_id: completion.walk_id,
            completed_at: completion.completed_at,
            completed_day: completion.completed_day.clone(),
            distance_km: completion.distance_km,
            ascent_m: completion.ascent_m,
            time_hours: completion.time_hours,
            category: completion.category,
        },
        stats: outcome.stats.clone(),
        newly_earned: outcome.newly_earned.clone(),
    }
}

#[must_use]
pub fn achievements_dto(stats: &UserStats) -> AchievementsDto {
    AchievementsDto {
        badges: stats.achievement_badges.clone(),
        achievements: evaluate(stats),
        progress: progress_summary(stats),
    }
}

#[must_use]
pub fn activity_dto(range: ActivityRange, samples: &[ActivitySample], now_ms: i64) -> ActivityDto {
    let entries: Vec<ActivityEntry> = samples
        .iter()
        .map(|s| ActivityEntry {
            completed_at: s.completed_at,
            distance_km: s.distance_km,
            time_hours: s.time_hours,
        })
        .collect();
    ActivityDto {
        range,
        buckets: bucket_entries(&entries, range, now_ms),
    }
}
