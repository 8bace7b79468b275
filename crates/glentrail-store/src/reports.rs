use crate::error::StoreError;
use crate::rows::{report_from_row, user_from_row, REPORT_COLUMNS, USER_COLUMNS};
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{
    round_rating, NewReport, Region, RegionId, ReportId, User, UserId, Walk, WalkId, WalkReport,
};
use rusqlite::{params, OptionalExtension};

/// A published report joined with its author, as shown on walk pages.
#[derive(Debug, Clone)]
pub struct ReportWithAuthor {
    pub report: WalkReport,
    pub author: User,
}

/// A member's own published report with the walk it describes.
#[derive(Debug, Clone)]
pub struct HistoryItem {
    pub report: WalkReport,
    pub walk: Walk,
    pub region: Region,
}

/// One entry of the community feed.
#[derive(Debug, Clone)]
pub struct ReportFeedItem {
    pub report: WalkReport,
    pub author: User,
    pub walk: Walk,
    pub region: Region,
}

impl Store {
    /// Inserts a draft report. Walk aggregates and the author's stats stay
    /// untouched until the report is published.
    pub fn create_report(&mut self, author: UserId, new: &NewReport) -> Result<WalkReport, StoreError> {
        new.validate()?;
        let now = now_ms();
        let completed_at = new.completed_at.unwrap_or(now);
        let tx = self.conn_mut().transaction()?;
        let walk_exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM walks WHERE id = ?1",
                params![new.walk_id.get()],
                |row| row.get(0),
            )
            .optional()?;
        if walk_exists.is_none() {
            return Err(StoreError::NotFound {
                entity: "walk",
                key: new.walk_id.to_string(),
            });
        }
        tx.execute(
            "INSERT INTO walk_reports(walk_id, author_id, title, content, rating, completed_at, \
             weather_conditions, trail_conditions, difficulty, actual_time_hours, is_published, \
             published_at, like_count, comment_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, NULL, 0, 0, ?11)",
            params![
                new.walk_id.get(),
                author.get(),
                new.title,
                new.content,
                new.rating,
                completed_at,
                new.weather_conditions,
                new.trail_conditions,
                new.difficulty.map(|d| d.as_str()),
                new.actual_time_hours,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let report = tx.query_row(
            &format!("SELECT {REPORT_COLUMNS} FROM walk_reports WHERE id = ?1"),
            params![id],
            report_from_row,
        )?;
        tx.commit()?;
        Ok(report)
    }

    /// Publishes a report and recomputes the walk's report count and rating
    /// average from published rows. Only the author may publish, and
    /// republishing is a no-op so aggregates never double-count.
    pub fn publish_report(&mut self, acting: UserId, id: ReportId) -> Result<WalkReport, StoreError> {
        let now = now_ms();
        let tx = self.conn_mut().transaction()?;
        let report = tx
            .query_row(
                &format!("SELECT {REPORT_COLUMNS} FROM walk_reports WHERE id = ?1"),
                params![id.get()],
                report_from_row,
            )
            .optional()?;
        let report = match report {
            Some(report) => report,
            None => {
                return Err(StoreError::NotFound {
                    entity: "report",
                    key: id.to_string(),
                })
            }
        };
        if report.author_id != acting {
            return Err(StoreError::NotAuthorized(
                "only the report author may publish it",
            ));
        }
        if report.is_published {
            return Ok(report);
        }
        tx.execute(
            "UPDATE walk_reports SET is_published = 1, published_at = ?1 WHERE id = ?2",
            params![now, id.get()],
        )?;
        let (published, mean): (i64, Option<f64>) = tx.query_row(
            "SELECT COUNT(*), AVG(rating) FROM walk_reports WHERE walk_id = ?1 AND is_published = 1",
            params![report.walk_id.get()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let average = mean.map(round_rating).unwrap_or(0.0);
        tx.execute(
            "UPDATE walks SET report_count = ?1, average_rating = ?2 WHERE id = ?3",
            params![published, average, report.walk_id.get()],
        )?;
        let updated = tx.query_row(
            &format!("SELECT {REPORT_COLUMNS} FROM walk_reports WHERE id = ?1"),
            params![id.get()],
            report_from_row,
        )?;
        tx.commit()?;
        Ok(updated)
    }

    pub fn report_by_id(&self, id: ReportId) -> Result<Option<WalkReport>, StoreError> {
        let report = self
            .conn()
            .query_row(
                &format!("SELECT {REPORT_COLUMNS} FROM walk_reports WHERE id = ?1"),
                params![id.get()],
                report_from_row,
            )
            .optional()?;
        Ok(report)
    }

    /// Published reports for one walk, newest publication first.
    pub fn reports_for_walk(
        &self,
        walk: WalkId,
        limit: usize,
    ) -> Result<Vec<ReportWithAuthor>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {REPORT_COLUMNS} FROM walk_reports
             WHERE walk_id = ?1 AND is_published = 1
             ORDER BY published_at DESC, id DESC LIMIT ?2"
        ))?;
        let reports = stmt
            .query_map(params![walk.get(), limit as i64], report_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        let mut items = Vec::with_capacity(reports.len());
        for report in reports {
            let author = self.author_of(&report)?;
            items.push(ReportWithAuthor { report, author });
        }
        Ok(items)
    }

    /// The community feed: recently published reports across the catalog,
    /// optionally narrowed to one region.
    pub fn recent_reports(
        &self,
        region: Option<RegionId>,
        limit: usize,
    ) -> Result<Vec<ReportFeedItem>, StoreError> {
        let reports = match region {
            Some(region) => {
                let mut stmt = self.conn().prepare(&format!(
                    "SELECT {REPORT_COLUMNS} FROM walk_reports
                     WHERE is_published = 1
                       AND walk_id IN (SELECT id FROM walks WHERE region_id = ?1)
                     ORDER BY published_at DESC, id DESC LIMIT ?2"
                ))?;
                let rows = stmt
                    .query_map(params![region.get(), limit as i64], report_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn().prepare(&format!(
                    "SELECT {REPORT_COLUMNS} FROM walk_reports WHERE is_published = 1
                     ORDER BY published_at DESC, id DESC LIMIT ?1"
                ))?;
                let rows = stmt
                    .query_map(params![limit as i64], report_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        let mut items = Vec::with_capacity(reports.len());
        for report in reports {
            let author = self.author_of(&report)?;
            let walk = self.walk_of(&report)?;
            let region = self.region_for_walk(&walk)?;
            items.push(ReportFeedItem {
                report,
                author,
                walk,
                region,
            });
        }
        Ok(items)
    }

    /// A member's published reports, most recent outing first.
    pub fn history_for_user(
        &self,
        user: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<HistoryItem>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {REPORT_COLUMNS} FROM walk_reports
             WHERE author_id = ?1 AND is_published = 1
             ORDER BY completed_at DESC, id DESC LIMIT ?2 OFFSET ?3"
        ))?;
        let reports = stmt
            .query_map(
                params![user.get(), limit as i64, offset as i64],
                report_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        let mut items = Vec::with_capacity(reports.len());
        for report in reports {
            let walk = self.walk_of(&report)?;
            let region = self.region_for_walk(&walk)?;
            items.push(HistoryItem {
                report,
                walk,
                region,
            });
        }
        Ok(items)
    }

    fn author_of(&self, report: &WalkReport) -> Result<User, StoreError> {
        let author = self
            .conn()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![report.author_id.get()],
                user_from_row,
            )
            .optional()?;
        author.ok_or_else(|| {
            StoreError::Internal(format!(
                "report {} references missing author {}",
                report.id, report.author_id
            ))
        })
    }

    fn walk_of(&self, report: &WalkReport) -> Result<Walk, StoreError> {
        let walk = self.walk_by_id(report.walk_id)?;
        walk.ok_or_else(|| {
            StoreError::Internal(format!(
                "report {} references missing walk {}",
                report.id, report.walk_id
            ))
        })
    }
}
