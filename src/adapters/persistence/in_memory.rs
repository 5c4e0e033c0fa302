//! In-memory suggestion repository.
//!
//! Backs tests and local development; mirrors the Postgres adapter's
//! observable behavior (whole-record writes, newest-first listings,
//! archived rows excluded from listings but reachable by id).

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{
    DomainError, ErrorCode, StatusFilter, SuggestionId, UserId,
};
use crate::domain::suggestion::Suggestion;
use crate::ports::SuggestionRepository;

/// Mutex-guarded in-memory store of suggestion records.
#[derive(Debug, Default)]
pub struct InMemorySuggestionRepository {
    records: Mutex<Vec<Suggestion>>,
}

impl InMemorySuggestionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given suggestions.
    pub fn with_suggestions(suggestions: Vec<Suggestion>) -> Self {
        Self {
            records: Mutex::new(suggestions),
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn newest_first(mut matches: Vec<Suggestion>) -> Vec<Suggestion> {
        // Reverse insertion order first so created_at ties still come out
        // newest-first under the stable sort.
        matches.reverse();
        matches.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        matches
    }
}

#[async_trait]
impl SuggestionRepository for InMemorySuggestionRepository {
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|s| s.id() == suggestion.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Suggestion {} already exists", suggestion.id()),
            ));
        }
        records.push(suggestion.clone());
        Ok(())
    }

    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|s| s.id() == suggestion.id()) {
            Some(existing) => {
                *existing = suggestion.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SuggestionNotFound,
                format!("Suggestion {} not found", suggestion.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|s| s.id() == id).cloned())
    }

    async fn list(&self, filter: StatusFilter) -> Result<Vec<Suggestion>, DomainError> {
        let records = self.records.lock().unwrap();
        let matches: Vec<Suggestion> = records
            .iter()
            .filter(|s| !s.is_archived() && filter.matches(s.status()))
            .cloned()
            .collect();
        Ok(Self::newest_first(matches))
    }

    async fn list_by_submitter(
        &self,
        submitter: &UserId,
    ) -> Result<Vec<Suggestion>, DomainError> {
        let records = self.records.lock().unwrap();
        let matches: Vec<Suggestion> = records
            .iter()
            .filter(|s| s.submitted_by() == submitter)
            .cloned()
            .collect();
        Ok(Self::newest_first(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Department, SuggestionStatus};
    use crate::domain::suggestion::ReviewDecision;

    fn submitter() -> UserId {
        UserId::new("employee-1").unwrap()
    }

    fn suggestion(title: &str) -> Suggestion {
        Suggestion::new(
            SuggestionId::new(),
            submitter(),
            title.to_string(),
            "beskrivelse".to_string(),
            Department::Sales,
        )
        .unwrap()
    }

    fn decided(title: &str, target: SuggestionStatus) -> Suggestion {
        let mut s = suggestion(title);
        let decision =
            ReviewDecision::new(target, None, UserId::new("admin-1").unwrap()).unwrap();
        s.apply_decision(&decision).unwrap();
        s
    }

    #[tokio::test]
    async fn insert_and_find_roundtrip() {
        let repo = InMemorySuggestionRepository::new();
        let s = suggestion("idé");
        repo.insert(&s).await.unwrap();

        let found = repo.find_by_id(s.id()).await.unwrap().unwrap();
        assert_eq!(&found, &s);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let repo = InMemorySuggestionRepository::new();
        let s = suggestion("idé");
        repo.insert(&s).await.unwrap();
        assert!(repo.insert(&s).await.is_err());
    }

    #[tokio::test]
    async fn update_rejects_unknown_id() {
        let repo = InMemorySuggestionRepository::new();
        let err = repo.update(&suggestion("ukendt")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SuggestionNotFound);
    }

    #[tokio::test]
    async fn list_excludes_archived_but_find_by_id_returns_them() {
        let repo = InMemorySuggestionRepository::new();
        let mut s = decided("arkiveret", SuggestionStatus::Approved);
        s.archive().unwrap();
        repo.insert(&s).await.unwrap();

        assert!(repo.list(StatusFilter::All).await.unwrap().is_empty());
        assert!(repo.list(StatusFilter::Approved).await.unwrap().is_empty());
        assert!(repo.find_by_id(s.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let repo = InMemorySuggestionRepository::new();
        repo.insert(&suggestion("afventer")).await.unwrap();
        repo.insert(&decided("godkendt", SuggestionStatus::Approved))
            .await
            .unwrap();

        let pending = repo.list(StatusFilter::Pending).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title(), "afventer");

        let approved = repo.list(StatusFilter::Approved).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].title(), "godkendt");

        assert_eq!(repo.list(StatusFilter::All).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = InMemorySuggestionRepository::new();
        repo.insert(&suggestion("ældst")).await.unwrap();
        repo.insert(&suggestion("nyest")).await.unwrap();

        let all = repo.list(StatusFilter::All).await.unwrap();
        assert_eq!(all[0].title(), "nyest");
        assert_eq!(all[1].title(), "ældst");
    }

    #[tokio::test]
    async fn list_by_submitter_includes_archived() {
        let repo = InMemorySuggestionRepository::new();
        let mut archived = decided("min arkiverede", SuggestionStatus::Rejected);
        archived.archive().unwrap();
        repo.insert(&archived).await.unwrap();
        repo.insert(&suggestion("min aktive")).await.unwrap();

        let mine = repo.list_by_submitter(&submitter()).await.unwrap();
        assert_eq!(mine.len(), 2);

        let other = UserId::new("employee-2").unwrap();
        assert!(repo.list_by_submitter(&other).await.unwrap().is_empty());
    }
}
