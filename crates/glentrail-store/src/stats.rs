use crate::error::StoreError;
use crate::rows::{json_text, stats_from_row, walk_from_row, STATS_COLUMNS, WALK_COLUMNS};
use crate::Store;
use glentrail_core::time::{now_ms, utc_date_string};
use glentrail_model::{
    earned_badge_ids, Completion, CompletionInput, PeakCategory, UserId, UserStats,
};
use rusqlite::{params, OptionalExtension};

/// One credited outing, as consumed by the activity chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivitySample {
    pub completed_at: i64,
    pub distance_km: f64,
    pub time_hours: f64,
}

/// What a logged completion changed: the row written, the stats after the
/// credit, and any badges crossed by it.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub completion: Completion,
    pub stats: UserStats,
    pub newly_earned: Vec<String>,
}

impl Store {
    pub fn stats_for_user(&self, user: UserId) -> Result<Option<UserStats>, StoreError> {
        let stats = self
            .conn()
            .query_row(
                &format!("SELECT {STATS_COLUMNS} FROM user_stats WHERE user_id = ?1"),
                params![user.get()],
                stats_from_row,
            )
            .optional()?;
        Ok(stats)
    }

    /// Records a completed walk and credits the member's stats in one
    /// transaction. Distance, ascent and time fall back to the walk's own
    /// figures when not supplied; the peak category falls back to the walk's
    /// tags. Logging the same walk twice on one UTC day is a conflict.
    pub fn log_completion(
        &mut self,
        user: UserId,
        input: &CompletionInput,
    ) -> Result<CompletionOutcome, StoreError> {
        input.validate()?;
        let completed_at = input.completed_at.unwrap_or_else(now_ms);
        let completed_day = utc_date_string(completed_at);
        let tx = self.conn_mut().transaction()?;
        let walk = tx
            .query_row(
                &format!("SELECT {WALK_COLUMNS} FROM walks WHERE id = ?1"),
                params![input.walk_id.get()],
                walk_from_row,
            )
            .optional()?;
        let walk = match walk {
            Some(walk) => walk,
            None => {
                return Err(StoreError::NotFound {
                    entity: "walk",
                    key: input.walk_id.to_string(),
                })
            }
        };
        let duplicate: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM completions \
                 WHERE user_id = ?1 AND walk_id = ?2 AND completed_day = ?3",
                params![user.get(), walk.id.get(), completed_day],
                |row| row.get(0),
            )
            .optional()?;
        if duplicate.is_some() {
            return Err(StoreError::Conflict(format!(
                "walk '{}' already logged for {completed_day}",
                walk.slug
            )));
        }
        let category = input
            .category
            .or_else(|| PeakCategory::from_tags(&walk.tags));
        let completion = Completion {
            user_id: user,
            walk_id: walk.id,
            completed_at,
            completed_day,
            distance_km: input.distance_km.unwrap_or(walk.distance_km),
            ascent_m: input.ascent_m.unwrap_or(walk.ascent_m),
            time_hours: input.time_hours.unwrap_or(walk.estimated_time_hours),
            category,
        };
        tx.execute(
            "INSERT INTO completions(user_id, walk_id, completed_at, completed_day, \
             distance_km, ascent_m, time_hours, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                completion.user_id.get(),
                completion.walk_id.get(),
                completion.completed_at,
                completion.completed_day,
                completion.distance_km,
                completion.ascent_m,
                completion.time_hours,
                completion.category.map(|c| c.as_str()),
            ],
        )?;
        let before = tx
            .query_row(
                &format!("SELECT {STATS_COLUMNS} FROM user_stats WHERE user_id = ?1"),
                params![user.get()],
                stats_from_row,
            )
            .optional()?;
        let had_row = before.is_some();
        let mut stats = before.unwrap_or_else(|| UserStats::empty(user));
        stats.total_walks += 1;
        stats.total_distance_km += completion.distance_km;
        stats.total_ascent_m += completion.ascent_m;
        stats.total_time_hours += completion.time_hours;
        match completion.category {
            Some(PeakCategory::Munro) => stats.munros_climbed += 1,
            Some(PeakCategory::Corbett) => stats.corbetts_climbed += 1,
            Some(PeakCategory::Donald) => stats.donalds_climbed += 1,
            Some(_) => unreachable!("PeakCategory has no further variants"),
            None => {}
        }
        stats.last_walk_date = Some(completion.completed_at);
        let earned = earned_badge_ids(&stats);
        let newly_earned: Vec<String> = earned
            .iter()
            .filter(|id| !stats.achievement_badges.contains(*id))
            .cloned()
            .collect();
        stats.achievement_badges = earned;
        let badges = json_text(&stats.achievement_badges)?;
        if had_row {
            tx.execute(
                "UPDATE user_stats SET total_walks = ?2, total_distance_km = ?3, \
                 total_ascent_m = ?4, total_time_hours = ?5, munros_climbed = ?6, \
                 corbetts_climbed = ?7, donalds_climbed = ?8, last_walk_date = ?9, \
                 achievement_badges = ?10 WHERE user_id = ?1",
                params![
                    user.get(),
                    stats.total_walks,
                    stats.total_distance_km,
                    stats.total_ascent_m,
                    stats.total_time_hours,
                    stats.munros_climbed,
                    stats.corbetts_climbed,
                    stats.donalds_climbed,
                    stats.last_walk_date,
                    badges,
                ],
            )?;
        } else {
            tx.execute(
                "INSERT INTO user_stats(user_id, total_walks, total_distance_km, total_ascent_m, \
                 total_time_hours, munros_climbed, corbetts_climbed, donalds_climbed, \
                 reports_written, photos_uploaded, last_walk_date, achievement_badges)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, ?9, ?10)",
                params![
                    user.get(),
                    stats.total_walks,
                    stats.total_distance_km,
                    stats.total_ascent_m,
                    stats.total_time_hours,
                    stats.munros_climbed,
                    stats.corbetts_climbed,
                    stats.donalds_climbed,
                    stats.last_walk_date,
                    badges,
                ],
            )?;
        }
        tx.commit()?;
        Ok(CompletionOutcome {
            completion,
            stats,
            newly_earned,
        })
    }

    /// Credited outings since `since_ms`, oldest first: the member's published
    /// reports with distance from the walk and time from the report when the
    /// author recorded one.
    pub fn activity_samples(
        &self,
        user: UserId,
        since_ms: i64,
    ) -> Result<Vec<ActivitySample>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT r.completed_at, w.distance_km, \
             COALESCE(r.actual_time_hours, w.estimated_time_hours)
             FROM walk_reports r JOIN walks w ON w.id = r.walk_id
             WHERE r.author_id = ?1 AND r.is_published = 1 AND r.completed_at >= ?2
             ORDER BY r.completed_at ASC",
        )?;
        let samples = stmt
            .query_map(params![user.get(), since_ms], |row| {
                Ok(ActivitySample {
                    completed_at: row.get(0)?,
                    distance_km: row.get(1)?,
                    time_hours: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(samples)
    }
}
