//! Stub access checker.
//!
//! Grants the admin role to a fixed set of user ids. Used by tests and by
//! local development setups without a profile store.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::AccessChecker;

/// Access checker backed by a static allow-list of admin ids.
#[derive(Debug, Default)]
pub struct StubAccessChecker {
    admins: HashSet<String>,
}

impl StubAccessChecker {
    /// Creates a checker with no admins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checker that treats the given users as admins.
    pub fn with_admins<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AccessChecker for StubAccessChecker {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.admins.contains(user_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listed_user_is_admin() {
        let checker = StubAccessChecker::with_admins(["admin-1"]);
        let user = UserId::new("admin-1").unwrap();
        assert!(checker.is_admin(&user).await.unwrap());
    }

    #[tokio::test]
    async fn unlisted_user_is_not_admin() {
        let checker = StubAccessChecker::with_admins(["admin-1"]);
        let user = UserId::new("employee-1").unwrap();
        assert!(!checker.is_admin(&user).await.unwrap());
    }

    #[tokio::test]
    async fn empty_checker_denies_everyone() {
        let checker = StubAccessChecker::new();
        let user = UserId::new("admin-1").unwrap();
        assert!(!checker.is_admin(&user).await.unwrap());
    }
}
