//! MySQL implementation of the RefreshTokenStore trait.
//!
//! The single-slot invariant rests on the `UNIQUE(user_id)` constraint of
//! `refresh_tokens`: every write is one statement keyed by `user_id`, so
//! concurrent writers for one user are serialized by the row lock.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use dm_core::domain::entities::token::RefreshRecord;
use dm_core::errors::DomainError;
use dm_core::repositories::RefreshTokenStore;

use super::storage_error;

/// MySQL implementation of RefreshTokenStore
#[derive(Clone)]
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<RefreshRecord, DomainError> {
        Ok(RefreshRecord {
            owner_key: row
                .try_get("user_id")
                .map_err(|e| storage_error("Failed to get user_id", e))?,
            token: row
                .try_get("refresh_token")
                .map_err(|e| storage_error("Failed to get refresh_token", e))?,
            ttl: row
                .try_get("ttl")
                .map_err(|e| storage_error("Failed to get ttl", e))?,
        })
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn find(&self, owner_key: i64) -> Result<Option<RefreshRecord>, DomainError> {
        let row = sqlx::query(
            "SELECT user_id, refresh_token, ttl FROM refresh_tokens WHERE user_id = ? LIMIT 1",
        )
        .bind(owner_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn upsert(&self, owner_key: i64, token: &str, ttl: i64) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (user_id, refresh_token, ttl)
            VALUES (?, ?, ?) AS incoming
            ON DUPLICATE KEY UPDATE
                refresh_token = incoming.refresh_token,
                ttl = incoming.ttl
        "#;

        sqlx::query(query)
            .bind(owner_key)
            .bind(token)
            .bind(ttl)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to save refresh token", e))?;

        tracing::debug!(owner_key, "Refresh slot written");
        Ok(())
    }

    async fn replace(
        &self,
        owner_key: i64,
        expected: &str,
        new_token: &str,
        ttl: i64,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET refresh_token = ?, ttl = ?
            WHERE user_id = ? AND BINARY refresh_token = ?
        "#;

        let result = sqlx::query(query)
            .bind(new_token)
            .bind(ttl)
            .bind(owner_key)
            .bind(expected)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to rotate refresh token", e))?;

        let swapped = result.rows_affected() == 1;
        tracing::debug!(owner_key, swapped, "Refresh slot rotation attempted");
        Ok(swapped)
    }

    async fn delete(&self, owner_key: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(owner_key)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_if(&self, owner_key: i64, expected: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM refresh_tokens WHERE user_id = ? AND BINARY refresh_token = ?",
        )
        .bind(owner_key)
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to delete refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }
}
