//! Suggestion repository port.
//!
//! Contract for persisting and retrieving Suggestion aggregates.
//!
//! # Design
//!
//! - **Whole-record writes**: the conversation log is read in full,
//!   appended to, and written back in full; no field-level patching.
//!   This bounds the concurrent-decision race to the read-modify-write
//!   gap (last write wins, an accepted limitation).
//! - **Soft delete**: listings exclude archived suggestions; direct id
//!   lookup still returns them.

use crate::domain::foundation::{DomainError, StatusFilter, SuggestionId, UserId};
use crate::domain::suggestion::Suggestion;
use async_trait::async_trait;

/// Repository port for Suggestion aggregate persistence.
///
/// Implementations must persist messages in append order and return
/// listings newest-first.
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Save a new suggestion.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), DomainError>;

    /// Update an existing suggestion, writing the whole record including
    /// the full conversation log.
    ///
    /// # Errors
    ///
    /// - `SuggestionNotFound` if the suggestion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError>;

    /// Find a suggestion by its ID. Returns archived suggestions too.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError>;

    /// List non-archived suggestions matching the filter, newest first.
    async fn list(&self, filter: StatusFilter) -> Result<Vec<Suggestion>, DomainError>;

    /// List all suggestions by one submitter, newest first. Includes
    /// archived entries: submitters always see their own history.
    async fn list_by_submitter(&self, submitter: &UserId)
        -> Result<Vec<Suggestion>, DomainError>;
}
