use crate::error::StoreError;
use crate::rows::{region_from_row, REGION_COLUMNS};
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{NewRegion, Region, RegionId};
use rusqlite::{params, OptionalExtension};

impl Store {
    pub fn create_region(&mut self, new: &NewRegion) -> Result<Region, StoreError> {
        new.validate()?;
        let now = now_ms();
        let tx = self.conn_mut().transaction()?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM regions WHERE slug = ?1",
                params![new.slug.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "region slug '{}' already exists",
                new.slug
            )));
        }
        tx.execute(
            "INSERT INTO regions(name, slug, description, image_url, walk_count, popularity_score, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, 0, ?5)",
            params![new.name, new.slug.as_str(), new.description, new.image_url, now],
        )?;
        let id = tx.last_insert_rowid();
        let region = tx.query_row(
            &format!("SELECT {REGION_COLUMNS} FROM regions WHERE id = ?1"),
            params![id],
            region_from_row,
        )?;
        tx.commit()?;
        Ok(region)
    }

    pub fn region_by_slug(&self, slug: &str) -> Result<Option<Region>, StoreError> {
        let region = self
            .conn()
            .query_row(
                &format!("SELECT {REGION_COLUMNS} FROM regions WHERE slug = ?1"),
                params![slug],
                region_from_row,
            )
            .optional()?;
        Ok(region)
    }

    pub fn region_by_id(&self, id: RegionId) -> Result<Option<Region>, StoreError> {
        let region = self
            .conn()
            .query_row(
                &format!("SELECT {REGION_COLUMNS} FROM regions WHERE id = ?1"),
                params![id.get()],
                region_from_row,
            )
            .optional()?;
        Ok(region)
    }

    /// The region directory: positive popularity only, most popular first.
    pub fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {REGION_COLUMNS} FROM regions WHERE popularity_score > 0
             ORDER BY popularity_score DESC, id ASC"
        ))?;
        let regions = stmt
            .query_map([], region_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(regions)
    }

    /// Every region regardless of popularity, for pipeline joins and
    /// reconciliation.
    pub fn all_regions(&self) -> Result<Vec<Region>, StoreError> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {REGION_COLUMNS} FROM regions ORDER BY id ASC"))?;
        let regions = stmt
            .query_map([], region_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(regions)
    }
}
