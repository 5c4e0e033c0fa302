//! Access checker port - admin-role verification.
//!
//! Review operations are admin-only and must be rejected before any other
//! processing. Role data lives with the identity profile store; this port
//! keeps the application layer ignorant of where.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use async_trait::async_trait;

/// Port for checking whether a user holds the admin role.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Returns true if the user is an admin.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the role lookup fails
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Validates that the user is an admin.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not an admin
    async fn ensure_admin(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_admin(user_id).await? {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Admin role required for this operation",
            ))
        }
    }
}
