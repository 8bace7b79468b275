//! Aggregate repair. The denormalized counters (`walk_count`,
//! `report_count`, `like_count`, `average_rating`) are recomputable from
//! rows; `reconcile` compares and optionally rewrites them.

use crate::error::StoreError;
use crate::Store;
use glentrail_model::{round_rating, LikeTargetType};
use rusqlite::params;

/// One counter that disagrees with its source rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Drift {
    pub entity: &'static str,
    pub key: String,
    pub field: &'static str,
    pub stored: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub drifts: Vec<Drift>,
    pub repaired: bool,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.drifts.is_empty()
    }
}

const RATING_EPSILON: f64 = 1e-9;

impl Store {
    /// Audits every denormalized counter against its backing rows. With
    /// `dry_run` the report only lists drift; otherwise each drifted counter
    /// is rewritten to the recomputed value in the same transaction.
    pub fn reconcile(&mut self, dry_run: bool) -> Result<ReconcileReport, StoreError> {
        let mut drifts = Vec::new();
        let tx = self.conn_mut().transaction()?;

        let regions: Vec<(i64, String, i64)> = {
            let mut stmt = tx.prepare("SELECT id, slug, walk_count FROM regions ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<Result<_, _>>()?;
            rows
        };
        for (id, slug, stored) in regions {
            let actual: i64 = tx.query_row(
                "SELECT COUNT(*) FROM walks WHERE region_id = ?1 AND is_published = 1",
                params![id],
                |row| row.get(0),
            )?;
            if stored != actual {
                drifts.push(Drift {
                    entity: "region",
                    key: slug,
                    field: "walk_count",
                    stored: stored as f64,
                    actual: actual as f64,
                });
                if !dry_run {
                    tx.execute(
                        "UPDATE regions SET walk_count = ?1 WHERE id = ?2",
                        params![actual, id],
                    )?;
                }
            }
        }

        let walks: Vec<(i64, String, i64, f64, i64)> = {
            let mut stmt = tx.prepare(
                "SELECT id, slug, report_count, average_rating, like_count FROM walks ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                })?
                .collect::<Result<_, _>>()?;
            rows
        };
        for (id, slug, report_count, average_rating, like_count) in walks {
            let (actual_reports, mean): (i64, Option<f64>) = tx.query_row(
                "SELECT COUNT(*), AVG(rating) FROM walk_reports \
                 WHERE walk_id = ?1 AND is_published = 1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            if report_count != actual_reports {
                drifts.push(Drift {
                    entity: "walk",
                    key: slug.clone(),
                    field: "report_count",
                    stored: report_count as f64,
                    actual: actual_reports as f64,
                });
                if !dry_run {
                    tx.execute(
                        "UPDATE walks SET report_count = ?1 WHERE id = ?2",
                        params![actual_reports, id],
                    )?;
                }
            }
            let actual_rating = mean.map(round_rating).unwrap_or(0.0);
            if (average_rating - actual_rating).abs() > RATING_EPSILON {
                drifts.push(Drift {
                    entity: "walk",
                    key: slug.clone(),
                    field: "average_rating",
                    stored: average_rating,
                    actual: actual_rating,
                });
                if !dry_run {
                    tx.execute(
                        "UPDATE walks SET average_rating = ?1 WHERE id = ?2",
                        params![actual_rating, id],
                    )?;
                }
            }
            let actual_likes: i64 = tx.query_row(
                "SELECT COUNT(*) FROM likes WHERE target_type = ?1 AND target_id = ?2",
                params![LikeTargetType::Walk.as_str(), id],
                |row| row.get(0),
            )?;
            if like_count != actual_likes {
                drifts.push(Drift {
                    entity: "walk",
                    key: slug,
                    field: "like_count",
                    stored: like_count as f64,
                    actual: actual_likes as f64,
                });
                if !dry_run {
                    tx.execute(
                        "UPDATE walks SET like_count = ?1 WHERE id = ?2",
                        params![actual_likes, id],
                    )?;
                }
            }
        }

        let reports: Vec<(i64, i64)> = {
            let mut stmt = tx.prepare("SELECT id, like_count FROM walk_reports ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<_, _>>()?;
            rows
        };
        for (id, like_count) in reports {
            let actual_likes: i64 = tx.query_row(
                "SELECT COUNT(*) FROM likes WHERE target_type = ?1 AND target_id = ?2",
                params![LikeTargetType::Report.as_str(), id],
                |row| row.get(0),
            )?;
            if like_count != actual_likes {
                drifts.push(Drift {
                    entity: "report",
                    key: id.to_string(),
                    field: "like_count",
                    stored: like_count as f64,
                    actual: actual_likes as f64,
                });
                if !dry_run {
                    tx.execute(
                        "UPDATE walk_reports SET like_count = ?1 WHERE id = ?2",
                        params![actual_likes, id],
                    )?;
                }
            }
        }

        tx.commit()?;
        let repaired = !dry_run && !drifts.is_empty();
        Ok(ReconcileReport { drifts, repaired })
    }
}
