//! PostgreSQL implementation of SuggestionRepository.
//!
//! One row per suggestion; the conversation log is a JSONB column written
//! whole on every update (read full log, append, write full log).

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::conversation::Transcript;
use crate::domain::foundation::{
    Department, DomainError, ErrorCode, StatusFilter, SuggestionId, SuggestionStatus, Timestamp,
    UserId,
};
use crate::domain::suggestion::Suggestion;
use crate::ports::SuggestionRepository;

/// PostgreSQL implementation of SuggestionRepository.
#[derive(Clone)]
pub struct PostgresSuggestionRepository {
    pool: PgPool,
}

impl PostgresSuggestionRepository {
    /// Creates a new PostgresSuggestionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, submitted_by, title, description, department, status, \
     conversation, admin_notes, prd, archived, reviewed_by, created_at, updated_at";

#[async_trait]
impl SuggestionRepository for PostgresSuggestionRepository {
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO suggestions (
                id, submitted_by, title, description, department, status,
                conversation, admin_notes, prd, archived, reviewed_by,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(suggestion.id().as_uuid())
        .bind(suggestion.submitted_by().as_str())
        .bind(suggestion.title())
        .bind(suggestion.description())
        .bind(suggestion.department().as_str())
        .bind(suggestion.status().as_str())
        .bind(conversation_to_json(suggestion.conversation())?)
        .bind(suggestion.admin_notes())
        .bind(suggestion.prd())
        .bind(suggestion.is_archived())
        .bind(suggestion.reviewed_by().map(|u| u.as_str()))
        .bind(suggestion.created_at().as_datetime())
        .bind(suggestion.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err(format!("Failed to insert suggestion: {}", e)))?;

        Ok(())
    }

    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE suggestions SET
                title = $2,
                description = $3,
                department = $4,
                status = $5,
                conversation = $6,
                admin_notes = $7,
                prd = $8,
                archived = $9,
                reviewed_by = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(suggestion.id().as_uuid())
        .bind(suggestion.title())
        .bind(suggestion.description())
        .bind(suggestion.department().as_str())
        .bind(suggestion.status().as_str())
        .bind(conversation_to_json(suggestion.conversation())?)
        .bind(suggestion.admin_notes())
        .bind(suggestion.prd())
        .bind(suggestion.is_archived())
        .bind(suggestion.reviewed_by().map(|u| u.as_str()))
        .bind(suggestion.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err(format!("Failed to update suggestion: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SuggestionNotFound,
                format!("Suggestion not found: {}", suggestion.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM suggestions WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err(format!("Failed to fetch suggestion: {}", e)))?;

        row.map(row_to_suggestion).transpose()
    }

    async fn list(&self, filter: StatusFilter) -> Result<Vec<Suggestion>, DomainError> {
        let rows = match status_for_filter(filter) {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM suggestions \
                     WHERE archived = FALSE AND status = $1 \
                     ORDER BY created_at DESC",
                    SELECT_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM suggestions \
                     WHERE archived = FALSE \
                     ORDER BY created_at DESC",
                    SELECT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_err(format!("Failed to list suggestions: {}", e)))?;

        rows.into_iter().map(row_to_suggestion).collect()
    }

    async fn list_by_submitter(
        &self,
        submitter: &UserId,
    ) -> Result<Vec<Suggestion>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM suggestions \
             WHERE submitted_by = $1 \
             ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(submitter.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err(format!("Failed to list submitter suggestions: {}", e)))?;

        rows.into_iter().map(row_to_suggestion).collect()
    }
}

fn status_for_filter(filter: StatusFilter) -> Option<SuggestionStatus> {
    match filter {
        StatusFilter::All => None,
        StatusFilter::Pending => Some(SuggestionStatus::Pending),
        StatusFilter::Approved => Some(SuggestionStatus::Approved),
        StatusFilter::Rejected => Some(SuggestionStatus::Rejected),
        StatusFilter::MoreInfoNeeded => Some(SuggestionStatus::MoreInfoNeeded),
    }
}

fn db_err(message: String) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, message)
}

fn conversation_to_json(conversation: &Transcript) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(conversation)
        .map_err(|e| db_err(format!("Failed to serialize conversation: {}", e)))
}

fn row_to_suggestion(row: PgRow) -> Result<Suggestion, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let submitted_by: String = get(&row, "submitted_by")?;
    let title: String = get(&row, "title")?;
    let description: String = get(&row, "description")?;
    let department_str: String = get(&row, "department")?;
    let status_str: String = get(&row, "status")?;
    let conversation_json: serde_json::Value = get(&row, "conversation")?;
    let admin_notes: Option<String> = get(&row, "admin_notes")?;
    let prd: Option<String> = get(&row, "prd")?;
    let archived: bool = get(&row, "archived")?;
    let reviewed_by: Option<String> = get(&row, "reviewed_by")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;

    let department: Department = department_str.parse().map_err(DomainError::from)?;
    let status: SuggestionStatus = status_str.parse().map_err(DomainError::from)?;
    let conversation: Transcript = serde_json::from_value(conversation_json)
        .map_err(|e| db_err(format!("Failed to deserialize conversation: {}", e)))?;
    let submitted_by = UserId::new(submitted_by).map_err(DomainError::from)?;
    let reviewed_by = reviewed_by
        .map(UserId::new)
        .transpose()
        .map_err(DomainError::from)?;

    Ok(Suggestion::reconstitute(
        SuggestionId::from_uuid(id),
        submitted_by,
        title,
        description,
        department,
        status,
        conversation,
        admin_notes,
        prd,
        archived,
        reviewed_by,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| db_err(format!("Failed to get {}: {}", column, e)))
}
