use crate::error::StoreError;
use crate::rows::{user_from_row, USER_COLUMNS};
use crate::Store;
use glentrail_core::time::now_ms;
use glentrail_model::{NewUser, User, UserId};
use rusqlite::{params, OptionalExtension};

impl Store {
    pub fn create_user(&mut self, new: &NewUser) -> Result<User, StoreError> {
        new.validate()?;
        let now = now_ms();
        let tx = self.conn_mut().transaction()?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE external_id = ?1",
                params![new.external_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "user with external id '{}' already exists",
                new.external_id
            )));
        }
        tx.execute(
            "INSERT INTO users(name, external_id, image_url, subscription_tier, joined_at, last_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.name,
                new.external_id,
                new.image_url,
                new.subscription_tier.as_str(),
                now,
                now
            ],
        )?;
        let id = tx.last_insert_rowid();
        let user = tx.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )?;
        tx.commit()?;
        Ok(user)
    }

    pub fn user_by_external_id(&self, external_id: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE external_id = ?1"),
                params![external_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let user = self
            .conn()
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id.get()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }
}
