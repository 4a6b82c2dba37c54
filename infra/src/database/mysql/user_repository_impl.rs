//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use dm_core::domain::entities::user::{Identity, Roles};
use dm_core::errors::DomainError;
use dm_core::repositories::UserRepository;

use super::storage_error;

/// MySQL implementation of UserRepository over the `users` table
///
/// `roles` holds a comma-joined authority list; `NULL` means baseline.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_identity(row: &MySqlRow) -> Result<Identity, DomainError> {
        let roles: Option<String> = row
            .try_get("roles")
            .map_err(|e| storage_error("Failed to get roles", e))?;

        Ok(Identity {
            id: row
                .try_get("user_id")
                .map_err(|e| storage_error("Failed to get user_id", e))?,
            external_id: row
                .try_get("provider_id")
                .map_err(|e| storage_error("Failed to get provider_id", e))?,
            display_name: row
                .try_get("usernickname")
                .map_err(|e| storage_error("Failed to get usernickname", e))?,
            roles: Roles::from_authorities_claim(roles.as_deref()),
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Identity>, DomainError> {
        let query = r#"
            SELECT user_id, provider_id, usernickname, roles
            FROM users
            WHERE provider_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user", e))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE provider_id = ?")
            .bind(external_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check user existence", e))?;

        Ok(count > 0)
    }

    async fn save_profile(
        &self,
        external_id: &str,
        display_name: &str,
    ) -> Result<Identity, DomainError> {
        let query = r#"
            INSERT INTO users (provider_id, usernickname)
            VALUES (?, ?) AS incoming
            ON DUPLICATE KEY UPDATE usernickname = incoming.usernickname
        "#;

        sqlx::query(query)
            .bind(external_id)
            .bind(display_name)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to save user profile", e))?;

        self.find_by_external_id(external_id)
            .await?
            .ok_or_else(|| DomainError::Internal {
                message: "User missing after profile save".to_string(),
            })
    }
}
