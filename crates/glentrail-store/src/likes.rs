use crate::error::StoreError;
use crate::rows::{like_from_row, user_from_row, LIKE_COLUMNS, USER_COLUMNS};
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{Like, LikeTargetType, User, UserId};
use rusqlite::{params, OptionalExtension};

/// Outcome of a like toggle: the caller's state after the flip and the
/// target's denormalized counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i64,
}

fn counter_table(target_type: LikeTargetType) -> &'static str {
    match target_type {
        LikeTargetType::Walk => "walks",
        LikeTargetType::Report => "walk_reports",
        _ => unreachable!("LikeTargetType has no further variants"),
    }
}

impl Store {
    /// Flips a user's like on a walk or report. The counter never goes below
    /// zero even if it has drifted from the like rows.
    pub fn toggle_like(
        &mut self,
        user: UserId,
        target_type: LikeTargetType,
        target_id: i64,
    ) -> Result<LikeToggle, StoreError> {
        let now = now_ms();
        let table = counter_table(target_type);
        let tx = self.conn_mut().transaction()?;
        let target_exists: Option<i64> = tx
            .query_row(
                &format!("SELECT id FROM {table} WHERE id = ?1"),
                params![target_id],
                |row| row.get(0),
            )
            .optional()?;
        if target_exists.is_none() {
            return Err(StoreError::NotFound {
                entity: target_type.as_str(),
                key: target_id.to_string(),
            });
        }
        let existing: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM likes WHERE user_id = ?1 AND target_type = ?2 AND target_id = ?3",
                params![user.get(), target_type.as_str(), target_id],
                |row| row.get(0),
            )
            .optional()?;
        let liked = if existing.is_some() {
            tx.execute(
                "DELETE FROM likes WHERE user_id = ?1 AND target_type = ?2 AND target_id = ?3",
                params![user.get(), target_type.as_str(), target_id],
            )?;
            tx.execute(
                &format!("UPDATE {table} SET like_count = MAX(like_count - 1, 0) WHERE id = ?1"),
                params![target_id],
            )?;
            false
        } else {
            tx.execute(
                "INSERT INTO likes(user_id, target_type, target_id, liked_at) VALUES (?1, ?2, ?3, ?4)",
                params![user.get(), target_type.as_str(), target_id, now],
            )?;
            tx.execute(
                &format!("UPDATE {table} SET like_count = like_count + 1 WHERE id = ?1"),
                params![target_id],
            )?;
            true
        };
        let like_count: i64 = tx.query_row(
            &format!("SELECT like_count FROM {table} WHERE id = ?1"),
            params![target_id],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(LikeToggle { liked, like_count })
    }

    /// Who liked a target, newest first, with their profiles.
    pub fn likes_for_target(
        &self,
        target_type: LikeTargetType,
        target_id: i64,
        limit: usize,
    ) -> Result<Vec<(Like, User)>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE target_type = ?1 AND target_id = ?2
             ORDER BY liked_at DESC LIMIT ?3"
        ))?;
        let likes = stmt
            .query_map(
                params![target_type.as_str(), target_id, limit as i64],
                like_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        let mut entries = Vec::with_capacity(likes.len());
        for like in likes {
            let user = self
                .conn()
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![like.user_id.get()],
                    user_from_row,
                )
                .optional()?;
            let user = user.ok_or_else(|| {
                StoreError::Internal(format!("like references missing user {}", like.user_id))
            })?;
            entries.push((like, user));
        }
        Ok(entries)
    }

    /// Count of like rows, independent of the denormalized counter.
    pub fn like_count(&self, target_type: LikeTargetType, target_id: i64) -> Result<i64, StoreError> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM likes WHERE target_type = ?1 AND target_id = ?2",
            params![target_type.as_str(), target_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn user_likes_target(
        &self,
        user: UserId,
        target_type: LikeTargetType,
        target_id: i64,
    ) -> Result<Option<Like>, StoreError> {
        let like = self
            .conn()
            .query_row(
                &format!(
                    "SELECT {LIKE_COLUMNS} FROM likes \
                     WHERE user_id = ?1 AND target_type = ?2 AND target_id = ?3"
                ),
                params![user.get(), target_type.as_str(), target_id],
                like_from_row,
            )
            .optional()?;
        Ok(like)
    }
}
