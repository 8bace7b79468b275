//! Row decoding shared by the read and mutation paths. Column lists are kept
//! next to their decoder so positional `row.get` calls stay in sync.

use crate::error::StoreError;
use glentrail_model::{
    Difficulty, GpsCoordinate, Like, LikeTargetType, Region, RegionId, ReportId, RouteType, Slug,
    SubscriptionTier, User, UserId, UserStats, Walk, WalkId, WalkReport, WalkStage,
};
use rusqlite::types::Type;
use rusqlite::Row;

/// JSON-encodes list columns (`tags`, `landmarks`, `warnings`, badge lists)
/// on the write path.
pub(crate) fn json_text<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Internal(format!("json encode: {e}")))
}

pub(crate) const USER_COLUMNS: &str =
    "id, name, external_id, image_url, subscription_tier, joined_at, last_active";

pub(crate) const REGION_COLUMNS: &str =
    "id, name, slug, description, image_url, walk_count, popularity_score, created_at";

pub(crate) const WALK_COLUMNS: &str = "id, title, slug, description, short_description, \
     region_id, author_id, distance_km, ascent_m, difficulty, estimated_time_hours, \
     latitude, longitude, max_elevation_m, route_type, featured_image_url, tags, \
     is_published, published_at, view_count, like_count, report_count, average_rating, \
     terrain, start_grid_ref, parking_info, public_transport, bog_factor, \
     detailed_description, source_url, created_at";

pub(crate) const STAGE_COLUMNS: &str = "walk_id, stage_number, title, description, \
     distance_km, duration_minutes, elevation_m, image_url, gps_lat, gps_lng, terrain, \
     landmarks, warnings";

pub(crate) const REPORT_COLUMNS: &str = "id, walk_id, author_id, title, content, rating, \
     completed_at, weather_conditions, trail_conditions, difficulty, actual_time_hours, \
     is_published, published_at, like_count, comment_count, created_at";

pub(crate) const STATS_COLUMNS: &str = "user_id, total_walks, total_distance_km, \
     total_ascent_m, total_time_hours, munros_climbed, corbetts_climbed, donalds_climbed, \
     reports_written, photos_uploaded, last_walk_date, achievement_badges";

pub(crate) const LIKE_COLUMNS: &str = "user_id, target_type, target_id, liked_at";

fn bad_column(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let tier_raw: String = row.get(4)?;
    let subscription_tier = SubscriptionTier::parse(&tier_raw).map_err(|e| bad_column(4, e))?;
    Ok(User {
        id: UserId::new(row.get(0)?),
        name: row.get(1)?,
        external_id: row.get(2)?,
        image_url: row.get(3)?,
        subscription_tier,
        joined_at: row.get(5)?,
        last_active: row.get(6)?,
    })
}

pub(crate) fn region_from_row(row: &Row<'_>) -> rusqlite::Result<Region> {
    let slug_raw: String = row.get(2)?;
    let slug = Slug::parse(&slug_raw).map_err(|e| bad_column(2, e))?;
    Ok(Region {
        id: RegionId::new(row.get(0)?),
        name: row.get(1)?,
        slug,
        description: row.get(3)?,
        image_url: row.get(4)?,
        walk_count: row.get(5)?,
        popularity_score: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub(crate) fn walk_from_row(row: &Row<'_>) -> rusqlite::Result<Walk> {
    let slug_raw: String = row.get(2)?;
    let slug = Slug::parse(&slug_raw).map_err(|e| bad_column(2, e))?;
    let difficulty_raw: String = row.get(9)?;
    let difficulty = Difficulty::parse(&difficulty_raw).map_err(|e| bad_column(9, e))?;
    let route_type_raw: String = row.get(14)?;
    let route_type = RouteType::parse(&route_type_raw).map_err(|e| bad_column(14, e))?;
    let tags_raw: String = row.get(16)?;
    let tags: Vec<String> = serde_json::from_str(&tags_raw).map_err(|e| bad_column(16, e))?;
    Ok(Walk {
        id: WalkId::new(row.get(0)?),
        title: row.get(1)?,
        slug,
        description: row.get(3)?,
        short_description: row.get(4)?,
        region_id: RegionId::new(row.get(5)?),
        author_id: UserId::new(row.get(6)?),
        distance_km: row.get(7)?,
        ascent_m: row.get(8)?,
        difficulty,
        estimated_time_hours: row.get(10)?,
        latitude: row.get(11)?,
        longitude: row.get(12)?,
        max_elevation_m: row.get(13)?,
        route_type,
        featured_image_url: row.get(15)?,
        tags,
        is_published: row.get(17)?,
        published_at: row.get(18)?,
        view_count: row.get(19)?,
        like_count: row.get(20)?,
        report_count: row.get(21)?,
        average_rating: row.get(22)?,
        terrain: row.get(23)?,
        start_grid_ref: row.get(24)?,
        parking_info: row.get(25)?,
        public_transport: row.get(26)?,
        bog_factor: row.get::<_, Option<i64>>(27)?.map(|v| v as u8),
        detailed_description: row.get(28)?,
        source_url: row.get(29)?,
        created_at: row.get(30)?,
    })
}

pub(crate) fn stage_from_row(row: &Row<'_>) -> rusqlite::Result<WalkStage> {
    let landmarks_raw: String = row.get(11)?;
    let landmarks: Vec<String> =
        serde_json::from_str(&landmarks_raw).map_err(|e| bad_column(11, e))?;
    let warnings_raw: String = row.get(12)?;
    let warnings: Vec<String> =
        serde_json::from_str(&warnings_raw).map_err(|e| bad_column(12, e))?;
    let gps = match (
        row.get::<_, Option<f64>>(8)?,
        row.get::<_, Option<f64>>(9)?,
    ) {
        (Some(lat), Some(lng)) => Some(GpsCoordinate { lat, lng }),
        _ => None,
    };
    Ok(WalkStage {
        walk_id: WalkId::new(row.get(0)?),
        stage_number: row.get::<_, i64>(1)? as u32,
        title: row.get(2)?,
        description: row.get(3)?,
        distance_km: row.get(4)?,
        duration_minutes: row.get(5)?,
        elevation_m: row.get(6)?,
        image_url: row.get(7)?,
        gps,
        terrain: row.get(10)?,
        landmarks,
        warnings,
    })
}

pub(crate) fn report_from_row(row: &Row<'_>) -> rusqlite::Result<WalkReport> {
    let difficulty = match row.get::<_, Option<String>>(9)? {
        Some(raw) => Some(Difficulty::parse(&raw).map_err(|e| bad_column(9, e))?),
        None => None,
    };
    Ok(WalkReport {
        id: ReportId::new(row.get(0)?),
        walk_id: WalkId::new(row.get(1)?),
        author_id: UserId::new(row.get(2)?),
        title: row.get(3)?,
        content: row.get(4)?,
        rating: row.get::<_, i64>(5)? as u8,
        completed_at: row.get(6)?,
        weather_conditions: row.get(7)?,
        trail_conditions: row.get(8)?,
        difficulty,
        actual_time_hours: row.get(10)?,
        is_published: row.get(11)?,
        published_at: row.get(12)?,
        like_count: row.get(13)?,
        comment_count: row.get(14)?,
        created_at: row.get(15)?,
    })
}

pub(crate) fn stats_from_row(row: &Row<'_>) -> rusqlite::Result<UserStats> {
    let badges_raw: String = row.get(11)?;
    let achievement_badges: Vec<String> =
        serde_json::from_str(&badges_raw).map_err(|e| bad_column(11, e))?;
    Ok(UserStats {
        user_id: UserId::new(row.get(0)?),
        total_walks: row.get(1)?,
        total_distance_km: row.get(2)?,
        total_ascent_m: row.get(3)?,
        total_time_hours: row.get(4)?,
        munros_climbed: row.get(5)?,
        corbetts_climbed: row.get(6)?,
        donalds_climbed: row.get(7)?,
        reports_written: row.get(8)?,
        photos_uploaded: row.get(9)?,
        last_walk_date: row.get(10)?,
        achievement_badges,
    })
}

pub(crate) fn like_from_row(row: &Row<'_>) -> rusqlite::Result<Like> {
    let type_raw: String = row.get(1)?;
    let target_type = LikeTargetType::parse(&type_raw).map_err(|e| bad_column(1, e))?;
    Ok(Like {
        user_id: UserId::new(row.get(0)?),
        target_type,
        target_id: row.get(2)?,
        liked_at: row.get(3)?,
    })
}
