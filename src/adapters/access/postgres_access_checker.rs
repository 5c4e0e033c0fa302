//! PostgreSQL implementation of AccessChecker.
//!
//! Reads the admin role from the profiles table maintained alongside the
//! identity provider's user records.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::AccessChecker;

/// Access checker backed by the profiles table.
#[derive(Clone)]
pub struct PostgresAccessChecker {
    pool: PgPool,
}

impl PostgresAccessChecker {
    /// Creates a new PostgresAccessChecker.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessChecker for PostgresAccessChecker {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let role: Option<String> =
            sqlx::query_scalar("SELECT role FROM profiles WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to fetch profile role: {}", e),
                    )
                })?;

        Ok(role.as_deref() == Some("admin"))
    }
}
