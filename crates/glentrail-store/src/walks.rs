use crate::error::StoreError;
use crate::rows::{json_text, stage_from_row, walk_from_row, STAGE_COLUMNS, WALK_COLUMNS};
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{NewWalk, Region, RegionId, UserId, Walk, WalkId, WalkStage};
use rusqlite::{params, OptionalExtension};

impl Store {
    /// Inserts a draft walk. Publication state, counters and the rating
    /// aggregate all start at zero; `publish_walk` moves it into the catalog.
    pub fn create_walk(
        &mut self,
        author: UserId,
        region: RegionId,
        new: &NewWalk,
    ) -> Result<Walk, StoreError> {
        new.validate()?;
        let tags = json_text(&new.tags)?;
        let now = now_ms();
        let tx = self.conn_mut().transaction()?;
        let region_exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM regions WHERE id = ?1",
                params![region.get()],
                |row| row.get(0),
            )
            .optional()?;
        if region_exists.is_none() {
            return Err(StoreError::NotFound {
                entity: "region",
                key: region.to_string(),
            });
        }
        let duplicate: Option<i64> = tx
            .query_row(
                "SELECT id FROM walks WHERE slug = ?1",
                params![new.slug.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if duplicate.is_some() {
            return Err(StoreError::Conflict(format!(
                "walk slug '{}' already exists",
                new.slug
            )));
        }
        tx.execute(
            "INSERT INTO walks(title, slug, description, short_description, region_id, author_id, \
             distance_km, ascent_m, difficulty, estimated_time_hours, latitude, longitude, \
             max_elevation_m, route_type, featured_image_url, tags, is_published, published_at, \
             view_count, like_count, report_count, average_rating, terrain, start_grid_ref, \
             parking_info, public_transport, bog_factor, detailed_description, source_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
             0, NULL, 0, 0, 0, 0.0, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
            params![
                new.title,
                new.slug.as_str(),
                new.description,
                new.short_description,
                region.get(),
                author.get(),
                new.distance_km,
                new.ascent_m,
                new.difficulty.as_str(),
                new.estimated_time_hours,
                new.latitude,
                new.longitude,
                new.max_elevation_m,
                new.route_type.as_str(),
                new.featured_image_url,
                tags,
                new.terrain,
                new.start_grid_ref,
                new.parking_info,
                new.public_transport,
                new.bog_factor,
                new.detailed_description,
                new.source_url,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let walk = tx.query_row(
            &format!("SELECT {WALK_COLUMNS} FROM walks WHERE id = ?1"),
            params![id],
            walk_from_row,
        )?;
        tx.commit()?;
        Ok(walk)
    }

    /// Marks a walk published and credits its region's walk count. Publishing
    /// an already-published walk is a no-op returning the stored row, so the
    /// region counter is bumped at most once per walk.
    pub fn publish_walk(&mut self, id: WalkId) -> Result<Walk, StoreError> {
        let now = now_ms();
        let tx = self.conn_mut().transaction()?;
        let walk = tx
            .query_row(
                &format!("SELECT {WALK_COLUMNS} FROM walks WHERE id = ?1"),
                params![id.get()],
                walk_from_row,
            )
            .optional()?;
        let walk = match walk {
            Some(walk) => walk,
            None => {
                return Err(StoreError::NotFound {
                    entity: "walk",
                    key: id.to_string(),
                })
            }
        };
        if walk.is_published {
            return Ok(walk);
        }
        tx.execute(
            "UPDATE walks SET is_published = 1, published_at = ?1 WHERE id = ?2",
            params![now, id.get()],
        )?;
        tx.execute(
            "UPDATE regions SET walk_count = walk_count + 1 WHERE id = ?1",
            params![walk.region_id.get()],
        )?;
        let updated = tx.query_row(
            &format!("SELECT {WALK_COLUMNS} FROM walks WHERE id = ?1"),
            params![id.get()],
            walk_from_row,
        )?;
        tx.commit()?;
        Ok(updated)
    }

    /// Detail lookup for the public catalog. Drafts are invisible here.
    pub fn walk_by_slug_published(&self, slug: &str) -> Result<Option<Walk>, StoreError> {
        let walk = self
            .conn()
            .query_row(
                &format!("SELECT {WALK_COLUMNS} FROM walks WHERE slug = ?1 AND is_published = 1"),
                params![slug],
                walk_from_row,
            )
            .optional()?;
        Ok(walk)
    }

    pub fn walk_by_id(&self, id: WalkId) -> Result<Option<Walk>, StoreError> {
        let walk = self
            .conn()
            .query_row(
                &format!("SELECT {WALK_COLUMNS} FROM walks WHERE id = ?1"),
                params![id.get()],
                walk_from_row,
            )
            .optional()?;
        Ok(walk)
    }

    /// Full published catalog in insertion order, the input to the
    /// filter/sort pipeline.
    pub fn published_walks(&self) -> Result<Vec<Walk>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {WALK_COLUMNS} FROM walks WHERE is_published = 1 ORDER BY id ASC"
        ))?;
        let walks = stmt
            .query_map([], walk_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(walks)
    }

    /// Bumps the view counter, returning the new total. Unknown walks are a
    /// deliberate no-op: view beacons fire from cached pages and must not
    /// surface errors.
    pub fn increment_view_count(&mut self, id: WalkId) -> Result<Option<i64>, StoreError> {
        let tx = self.conn_mut().transaction()?;
        let changed = tx.execute(
            "UPDATE walks SET view_count = view_count + 1 WHERE id = ?1",
            params![id.get()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let count: i64 = tx.query_row(
            "SELECT view_count FROM walks WHERE id = ?1",
            params![id.get()],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(Some(count))
    }

    pub fn stages_for_walk(&self, id: WalkId) -> Result<Vec<WalkStage>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {STAGE_COLUMNS} FROM walk_stages WHERE walk_id = ?1 ORDER BY stage_number ASC"
        ))?;
        let stages = stmt
            .query_map(params![id.get()], stage_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stages)
    }

    pub(crate) fn region_for_walk(&self, walk: &Walk) -> Result<Region, StoreError> {
        self.region_by_id(walk.region_id)?
            .ok_or_else(|| StoreError::Internal(format!(
                "walk {} references missing region {}",
                walk.id, walk.region_id
            )))
    }
}
