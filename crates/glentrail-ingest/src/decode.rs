// SPDX-License-Identifier: Apache-2.0

//! Strict JSON decoding of seed fixture documents. Unknown keys are rejected
//! so a typo in a fixture fails the document instead of silently dropping a
//! field.

use crate::IngestError;
use glentrail_model::{
    Difficulty, GpsCoordinate, NewRegion, NewUser, NewWalk, RouteType, Slug, SubscriptionTier,
};
use glentrail_store::{SeedBatch, SeedRegion, SeedStage, SeedWalk};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureDocument {
    #[serde(default)]
    pub regions: Vec<FixtureRegion>,
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub walks: Vec<FixtureWalk>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureRegion {
    pub name: String,
    pub slug: Slug,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub popularity_score: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureUser {
    pub name: String,
    pub external_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
}

/// One walk entry. `region` names the owning region by slug; `author` is an
/// external id from this document's `users` or an already-seeded identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureWalk {
    pub region: Slug,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub view_count: i64,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub difficulty: Difficulty,
    pub estimated_time_hours: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub max_elevation_m: i64,
    pub route_type: RouteType,
    #[serde(default)]
    pub featured_image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub start_grid_ref: Option<String>,
    #[serde(default)]
    pub parking_info: Option<String>,
    #[serde(default)]
    pub public_transport: Option<String>,
    #[serde(default)]
    pub bog_factor: Option<u8>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub stages: Vec<FixtureStage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureStage {
    pub stage_number: u32,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gps: Option<GpsCoordinate>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

pub fn decode_document(raw: &str) -> Result<FixtureDocument, IngestError> {
    serde_json::from_str(raw).map_err(|e| IngestError(format!("fixture decode failed: {e}")))
}

pub fn read_document(path: &Path) -> Result<FixtureDocument, IngestError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| IngestError(format!("read {}: {e}", path.display())))?;
    decode_document(&raw).map_err(|e| IngestError(format!("{}: {e}", path.display())))
}

/// Rearranges a decoded document into the store's seed shape. Validation
/// happens in the store, inside the document's transaction.
#[must_use]
pub fn seed_batch_for(document: &FixtureDocument) -> SeedBatch {
    SeedBatch {
        regions: document
            .regions
            .iter()
            .map(|r| SeedRegion {
                region: NewRegion {
                    name: r.name.clone(),
                    slug: r.slug.clone(),
                    description: r.description.clone(),
                    image_url: r.image_url.clone(),
                },
                popularity_score: r.popularity_score,
            })
            .collect(),
        users: document
            .users
            .iter()
            .map(|u| NewUser {
                name: u.name.clone(),
                external_id: u.external_id.clone(),
                image_url: u.image_url.clone(),
                subscription_tier: u.subscription_tier,
            })
            .collect(),
        walks: document.walks.iter().map(seed_walk_for).collect(),
    }
}

fn seed_walk_for(walk: &FixtureWalk) -> SeedWalk {
    SeedWalk {
        region_slug: walk.region.clone(),
        author_external_id: walk.author.clone(),
        published: walk.published,
        view_count: walk.view_count,
        walk: NewWalk {
            title: walk.title.clone(),
            slug: walk.slug.clone(),
            description: walk.description.clone(),
            short_description: walk.short_description.clone(),
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
            terrain: walk.terrain.clone(),
            start_grid_ref: walk.start_grid_ref.clone(),
            parking_info: walk.parking_info.clone(),
            public_transport: walk.public_transport.clone(),
            bog_factor: walk.bog_factor,
            detailed_description: walk.detailed_description.clone(),
            source_url: walk.source_url.clone(),
        },
        stages: walk
            .stages
            .iter()
            .map(|s| SeedStage {
                stage_number: s.stage_number,
                title: s.title.clone(),
                description: s.description.clone(),
                distance_km: s.distance_km,
                duration_minutes: s.duration_minutes,
                elevation_m: s.elevation_m,
                image_url: s.image_url.clone(),
                gps: s.gps,
                terrain: s.terrain.clone(),
                landmarks: s.landmarks.clone(),
                warnings: s.warnings.clone(),
            })
            .collect(),
    }
}
