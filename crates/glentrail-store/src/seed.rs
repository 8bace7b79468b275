//! Fixture seeding. A [`SeedBatch`] is applied in one transaction so a bad
//! document leaves the database untouched.

use crate::error::StoreError;
use crate::rows::json_text;
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{
    GpsCoordinate, NewRegion, NewUser, NewWalk, RegionId, Slug, UserId, WalkId, WalkStage,
};
use rusqlite::{params, OptionalExtension, Transaction};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct SeedRegion {
    pub region: NewRegion,
    pub popularity_score: i64,
}

#[derive(Debug, Clone)]
pub struct SeedStage {
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

#[derive(Debug, Clone)]
pub struct SeedWalk {
    pub region_slug: Slug,
    /// Attribution for the walk; `None` falls back to the batch's first user.
    pub author_external_id: Option<String>,
    pub published: bool,
    pub view_count: i64,
    pub walk: NewWalk,
    pub stages: Vec<SeedStage>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedBatch {
    pub regions: Vec<SeedRegion>,
    pub users: Vec<NewUser>,
    pub walks: Vec<SeedWalk>,
}

/// Row counts from one applied batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub regions_created: usize,
    pub users_created: usize,
    pub users_existing: usize,
    pub walks_created: usize,
    pub stages_created: usize,
    pub walks_published: usize,
}

impl Store {
    /// Applies a seed batch atomically. Regions and walks must not collide
    /// with existing slugs; users are matched by `external_id` and reused.
    /// Published seed walks credit their region's walk count exactly as
    /// `publish_walk` would.
    pub fn apply_seed(&mut self, batch: &SeedBatch) -> Result<SeedReport, StoreError> {
        let now = now_ms();
        let mut report = SeedReport::default();
        let tx = self.conn_mut().transaction()?;

        let mut region_ids: BTreeMap<String, RegionId> = BTreeMap::new();
        for seed in &batch.regions {
            seed.region.validate()?;
            let slug = seed.region.slug.as_str();
            let duplicate: Option<i64> = tx
                .query_row(
                    "SELECT id FROM regions WHERE slug = ?1",
                    params![slug],
                    |row| row.get(0),
                )
                .optional()?;
            if duplicate.is_some() {
                return Err(StoreError::Conflict(format!(
                    "region slug '{slug}' already exists"
                )));
            }
            tx.execute(
                "INSERT INTO regions(name, slug, description, image_url, walk_count, \
                 popularity_score, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)",
                params![
                    seed.region.name,
                    slug,
                    seed.region.description,
                    seed.region.image_url,
                    seed.popularity_score,
                    now,
                ],
            )?;
            region_ids.insert(slug.to_owned(), RegionId::new(tx.last_insert_rowid()));
            report.regions_created += 1;
        }

        let mut user_ids: BTreeMap<String, UserId> = BTreeMap::new();
        let mut default_author: Option<UserId> = None;
        for user in &batch.users {
            user.validate()?;
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM users WHERE external_id = ?1",
                    params![user.external_id],
                    |row| row.get(0),
                )
                .optional()?;
            let id = match existing {
                Some(id) => {
                    report.users_existing += 1;
                    UserId::new(id)
                }
                None => {
                    tx.execute(
                        "INSERT INTO users(name, external_id, image_url, subscription_tier, \
                         joined_at, last_active) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                        params![
                            user.name,
                            user.external_id,
                            user.image_url,
                            user.subscription_tier.as_str(),
                            now,
                        ],
                    )?;
                    report.users_created += 1;
                    UserId::new(tx.last_insert_rowid())
                }
            };
            user_ids.insert(user.external_id.clone(), id);
            default_author.get_or_insert(id);
        }

        for seed in &batch.walks {
            seed.walk.validate()?;
            let region_id = match region_ids.get(seed.region_slug.as_str()) {
                Some(id) => *id,
                None => {
                    let found: Option<i64> = tx
                        .query_row(
                            "SELECT id FROM regions WHERE slug = ?1",
                            params![seed.region_slug.as_str()],
                            |row| row.get(0),
                        )
                        .optional()?;
                    match found {
                        Some(id) => RegionId::new(id),
                        None => {
                            return Err(StoreError::NotFound {
                                entity: "region",
                                key: seed.region_slug.to_string(),
                            })
                        }
                    }
                }
            };
            let author_id = match &seed.author_external_id {
                Some(external_id) => match user_ids.get(external_id) {
                    Some(id) => *id,
                    None => {
                        let found: Option<i64> = tx
                            .query_row(
                                "SELECT id FROM users WHERE external_id = ?1",
                                params![external_id],
                                |row| row.get(0),
                            )
                            .optional()?;
                        match found {
                            Some(id) => UserId::new(id),
                            None => {
                                return Err(StoreError::NotFound {
                                    entity: "user",
                                    key: external_id.clone(),
                                })
                            }
                        }
                    }
                },
                None => match default_author {
                    Some(id) => id,
                    None => {
                        return Err(StoreError::Validation(
                            "seed walks need an author: add a user to the document".to_owned(),
                        ))
                    }
                },
            };
            let walk_id = insert_seed_walk(&tx, seed, region_id, author_id, now)?;
            report.walks_created += 1;
            for stage in &seed.stages {
                insert_seed_stage(&tx, walk_id, stage)?;
                report.stages_created += 1;
            }
            if seed.published {
                tx.execute(
                    "UPDATE regions SET walk_count = walk_count + 1 WHERE id = ?1",
                    params![region_id.get()],
                )?;
                report.walks_published += 1;
            }
        }

        tx.commit()?;
        Ok(report)
    }
}

fn insert_seed_walk(
    tx: &Transaction<'_>,
    seed: &SeedWalk,
    region: RegionId,
    author: UserId,
    now: i64,
) -> Result<i64, StoreError> {
    let duplicate: Option<i64> = tx
        .query_row(
            "SELECT id FROM walks WHERE slug = ?1",
            params![seed.walk.slug.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    if duplicate.is_some() {
        return Err(StoreError::Conflict(format!(
            "walk slug '{}' already exists",
            seed.walk.slug
        )));
    }
    let tags = json_text(&seed.walk.tags)?;
    let published_at = seed.published.then_some(now);
    tx.execute(
        "INSERT INTO walks(title, slug, description, short_description, region_id, author_id, \
         distance_km, ascent_m, difficulty, estimated_time_hours, latitude, longitude, \
         max_elevation_m, route_type, featured_image_url, tags, is_published, published_at, \
         view_count, like_count, report_count, average_rating, terrain, start_grid_ref, \
         parking_info, public_transport, bog_factor, detailed_description, source_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
         ?17, ?18, ?19, 0, 0, 0.0, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27)",
        params![
            seed.walk.title,
            seed.walk.slug.as_str(),
            seed.walk.description,
            seed.walk.short_description,
            region.get(),
            author.get(),
            seed.walk.distance_km,
            seed.walk.ascent_m,
            seed.walk.difficulty.as_str(),
            seed.walk.estimated_time_hours,
            seed.walk.latitude,
            seed.walk.longitude,
            seed.walk.max_elevation_m,
            seed.walk.route_type.as_str(),
            seed.walk.featured_image_url,
            tags,
            seed.published,
            published_at,
            seed.view_count,
            seed.walk.terrain,
            seed.walk.start_grid_ref,
            seed.walk.parking_info,
            seed.walk.public_transport,
            seed.walk.bog_factor,
            seed.walk.detailed_description,
            seed.walk.source_url,
            now,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn insert_seed_stage(
    tx: &Transaction<'_>,
    walk_id: i64,
    seed: &SeedStage,
) -> Result<(), StoreError> {
    let stage = WalkStage {
        walk_id: WalkId::new(walk_id),
        stage_number: seed.stage_number,
        title: seed.title.clone(),
        description: seed.description.clone(),
        distance_km: seed.distance_km,
        duration_minutes: seed.duration_minutes,
        elevation_m: seed.elevation_m,
        image_url: seed.image_url.clone(),
        gps: seed.gps,
        terrain: seed.terrain.clone(),
        landmarks: seed.landmarks.clone(),
        warnings: seed.warnings.clone(),
    };
    stage.validate()?;
    let landmarks = json_text(&stage.landmarks)?;
    let warnings = json_text(&stage.warnings)?;
    tx.execute(
        "INSERT INTO walk_stages(walk_id, stage_number, title, description, distance_km, \
         duration_minutes, elevation_m, image_url, gps_lat, gps_lng, terrain, landmarks, warnings)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            stage.walk_id.get(),
            stage.stage_number,
            stage.title,
            stage.description,
            stage.distance_km,
            stage.duration_minutes,
            stage.elevation_m,
            stage.image_url,
            stage.gps.map(|g| g.lat),
            stage.gps.map(|g| g.lng),
            stage.terrain,
            landmarks,
            warnings,
        ],
    )?;
    Ok(())
}
