//! HTTP handlers for the suggestion and review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::application::handlers::conversation::{
    CompleteRefinementCommand, CompleteRefinementError, CompleteRefinementHandler,
    StartConversationCommand, StartConversationError, StartConversationHandler, SubmitTurnCommand,
    SubmitTurnError, SubmitTurnHandler,
};
use crate::application::handlers::prd::{
    ExportPrdCommand, ExportPrdError, ExportPrdHandler, GeneratePrdCommand, GeneratePrdError,
    GeneratePrdHandler,
};
use crate::application::handlers::review::{
    ArchiveSuggestionCommand, ArchiveSuggestionError, ArchiveSuggestionHandler,
    DecideSuggestionCommand, DecideSuggestionError, DecideSuggestionHandler,
    EditSuggestionCommand, EditSuggestionError, EditSuggestionHandler, ListSuggestionsCommand,
    ListSuggestionsError, ListSuggestionsHandler,
};
use crate::application::handlers::suggestion::{
    CreateSuggestionCommand, CreateSuggestionError, CreateSuggestionHandler, GetSuggestionCommand,
    GetSuggestionError, GetSuggestionHandler, ListOwnSuggestionsCommand, ListOwnSuggestionsError,
    ListOwnSuggestionsHandler,
};
use crate::domain::foundation::SuggestionId;
use crate::ports::{FileStorage, FileUpload, StorageError};

use super::auth::RequireUser;
use super::dto::{
    AttachmentDto, ConversationResponse, CreateSuggestionRequest, DecideRequest, DecisionResponse,
    EditSuggestionRequest, ErrorResponse, ListSuggestionsQuery, ReviewListResponse,
    SubmitTurnRequest, SuggestionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// All application handlers wired behind the HTTP surface.
#[derive(Clone)]
pub struct AppHandlers {
    pub create: Arc<CreateSuggestionHandler>,
    pub get: Arc<GetSuggestionHandler>,
    pub list_own: Arc<ListOwnSuggestionsHandler>,
    pub start_conversation: Arc<StartConversationHandler>,
    pub submit_turn: Arc<SubmitTurnHandler>,
    pub complete_refinement: Arc<CompleteRefinementHandler>,
    pub list_review: Arc<ListSuggestionsHandler>,
    pub decide: Arc<DecideSuggestionHandler>,
    pub archive: Arc<ArchiveSuggestionHandler>,
    pub edit: Arc<EditSuggestionHandler>,
    pub generate_prd: Arc<GeneratePrdHandler>,
    pub export_prd: Arc<ExportPrdHandler>,
    pub file_storage: Arc<dyn FileStorage>,
}

// ════════════════════════════════════════════════════════════════════════════
// Submitter endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/suggestions - Submit a new idea.
pub async fn create_suggestion(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateSuggestionRequest>,
) -> Response {
    let cmd = CreateSuggestionCommand {
        submitted_by: user,
        title: req.title,
        description: req.description,
        department: req.department,
    };

    match handlers.create.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SuggestionResponse::from_domain(&result.suggestion)),
        )
            .into_response(),
        Err(e) => create_error(e),
    }
}

/// GET /api/suggestions - List the caller's own suggestions.
pub async fn list_own_suggestions(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
) -> Response {
    let cmd = ListOwnSuggestionsCommand { submitted_by: user };

    match handlers.list_own.handle(cmd).await {
        Ok(result) => {
            let list: Vec<_> = result
                .suggestions
                .iter()
                .map(SuggestionResponse::from_domain)
                .collect();
            Json(list).into_response()
        }
        Err(ListOwnSuggestionsError::Repository(msg)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

/// GET /api/suggestions/:id - Fetch one suggestion (archived included).
pub async fn get_suggestion(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = GetSuggestionCommand {
        suggestion_id,
        requested_by: user,
    };

    match handlers.get.handle(cmd).await {
        Ok(result) => Json(SuggestionResponse::from_domain(&result.suggestion)).into_response(),
        Err(e) => get_error(e),
    }
}

/// POST /api/suggestions/:id/chat/start - Open the refinement dialogue.
pub async fn start_chat(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = StartConversationCommand {
        suggestion_id,
        requested_by: user,
    };

    match handlers.start_conversation.handle(cmd).await {
        Ok(result) => Json(ConversationResponse::from_transcript(&result.conversation))
            .into_response(),
        Err(e) => start_error(e),
    }
}

/// POST /api/suggestions/:id/chat/messages - Submit one refinement turn.
pub async fn submit_chat_turn(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(req): Json<SubmitTurnRequest>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };

    let mut attachments = Vec::with_capacity(req.attachments.len());
    for dto in req.attachments {
        match dto.into_domain() {
            Ok(attachment) => attachments.push(attachment),
            Err(e) => return error(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }

    let cmd = SubmitTurnCommand {
        suggestion_id,
        submitted_by: user,
        text: req.text,
        attachments,
    };

    match handlers.submit_turn.handle(cmd).await {
        Ok(result) => Json(ConversationResponse::from_transcript(&result.conversation))
            .into_response(),
        Err(e) => submit_error(e),
    }
}

/// POST /api/suggestions/:id/chat/complete - Hand off to review.
pub async fn complete_chat(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = CompleteRefinementCommand {
        suggestion_id,
        submitted_by: user,
    };

    match handlers.complete_refinement.handle(cmd).await {
        Ok(result) => Json(SuggestionResponse::from_domain(&result.suggestion)).into_response(),
        Err(e) => complete_error(e),
    }
}

/// POST /api/attachments - Upload a chat attachment.
pub async fn upload_attachment(
    State(handlers): State<AppHandlers>,
    RequireUser(_user): RequireUser,
    mut multipart: Multipart,
) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("fil").to_string();
        let mime_type = field.content_type().unwrap_or("").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return error(StatusCode::BAD_REQUEST, format!("Invalid upload: {}", e)),
        };

        let upload = FileUpload::new(name, mime_type, bytes);
        return match handlers.file_storage.store(upload).await {
            Ok(attachment) => (
                StatusCode::CREATED,
                Json(AttachmentDto {
                    url: attachment.url().to_string(),
                    name: attachment.name().to_string(),
                    mime_type: attachment.mime_type().to_string(),
                }),
            )
                .into_response(),
            Err(e) => storage_error(e),
        };
    }

    error(StatusCode::BAD_REQUEST, "Missing 'file' field in upload")
}

// ════════════════════════════════════════════════════════════════════════════
// Admin endpoints
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/suggestions - The review queue, partitioned.
pub async fn list_review_queue(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Query(query): Query<ListSuggestionsQuery>,
) -> Response {
    let cmd = ListSuggestionsCommand {
        requested_by: user,
        filter: query.filter,
    };

    match handlers.list_review.handle(cmd).await {
        Ok(result) => Json(ReviewListResponse {
            pending: result
                .pending
                .iter()
                .map(SuggestionResponse::from_domain)
                .collect(),
            reviewed: result
                .reviewed
                .iter()
                .map(SuggestionResponse::from_domain)
                .collect(),
        })
        .into_response(),
        Err(e) => list_review_error(e),
    }
}

/// POST /api/admin/suggestions/:id/decision - Approve / reject / request info.
pub async fn decide_suggestion(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(req): Json<DecideRequest>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = DecideSuggestionCommand {
        suggestion_id,
        decided_by: user,
        target: req.status,
        notes: req.notes,
    };

    match handlers.decide.handle(cmd).await {
        Ok(result) => Json(DecisionResponse {
            suggestion: SuggestionResponse::from_domain(&result.suggestion),
            prd_warning: result.prd_warning,
        })
        .into_response(),
        Err(e) => decide_error(e),
    }
}

/// POST /api/admin/suggestions/:id/archive - Soft-delete a decided suggestion.
pub async fn archive_suggestion(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = ArchiveSuggestionCommand {
        suggestion_id,
        archived_by: user,
    };

    match handlers.archive.handle(cmd).await {
        Ok(result) => Json(SuggestionResponse::from_domain(&result.suggestion)).into_response(),
        Err(e) => archive_error(e),
    }
}

/// PUT /api/admin/suggestions/:id - Correct suggestion metadata.
pub async fn edit_suggestion(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(req): Json<EditSuggestionRequest>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = EditSuggestionCommand {
        suggestion_id,
        edited_by: user,
        title: req.title,
        description: req.description,
        department: req.department,
    };

    match handlers.edit.handle(cmd).await {
        Ok(result) => Json(SuggestionResponse::from_domain(&result.suggestion)).into_response(),
        Err(e) => edit_error(e),
    }
}

/// POST /api/admin/suggestions/:id/prd - Regenerate the PRD manually.
pub async fn regenerate_prd(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = GeneratePrdCommand {
        suggestion_id,
        requested_by: user,
    };

    match handlers.generate_prd.handle(cmd).await {
        Ok(result) => Json(SuggestionResponse::from_domain(&result.suggestion)).into_response(),
        Err(e) => prd_error(e),
    }
}

/// GET /api/admin/suggestions/:id/prd/export - Export the PRD as HTML.
pub async fn export_prd(
    State(handlers): State<AppHandlers>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Response {
    let Some(suggestion_id) = parse_id(&id) else {
        return error(StatusCode::BAD_REQUEST, "Invalid suggestion id");
    };
    let cmd = ExportPrdCommand {
        suggestion_id,
        requested_by: user,
    };

    match handlers.export_prd.handle(cmd).await {
        Ok(result) => Html(result.html).into_response(),
        Err(e) => export_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn parse_id(raw: &str) -> Option<SuggestionId> {
    raw.parse().ok()
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn create_error(e: CreateSuggestionError) -> Response {
    match e {
        CreateSuggestionError::Validation(msg) => error(StatusCode::BAD_REQUEST, msg),
        CreateSuggestionError::Repository(msg) | CreateSuggestionError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn get_error(e: GetSuggestionError) -> Response {
    match e {
        GetSuggestionError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        GetSuggestionError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        GetSuggestionError::Repository(msg) | GetSuggestionError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn start_error(e: StartConversationError) -> Response {
    match e {
        StartConversationError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        StartConversationError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        StartConversationError::Archived => error(StatusCode::CONFLICT, e.to_string()),
        StartConversationError::Repository(msg) | StartConversationError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn submit_error(e: SubmitTurnError) -> Response {
    match e {
        SubmitTurnError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        SubmitTurnError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        SubmitTurnError::EmptyTurn => error(StatusCode::BAD_REQUEST, e.to_string()),
        SubmitTurnError::RoundCapReached | SubmitTurnError::Archived => {
            error(StatusCode::CONFLICT, e.to_string())
        }
        SubmitTurnError::Assistant(msg) => error(StatusCode::BAD_GATEWAY, msg),
        SubmitTurnError::Repository(msg) | SubmitTurnError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn complete_error(e: CompleteRefinementError) -> Response {
    match e {
        CompleteRefinementError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        CompleteRefinementError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        CompleteRefinementError::BelowMinimumRounds | CompleteRefinementError::Archived => {
            error(StatusCode::CONFLICT, e.to_string())
        }
        CompleteRefinementError::Repository(msg) | CompleteRefinementError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn storage_error(e: StorageError) -> Response {
    match e {
        StorageError::FileTooLarge { .. } => {
            error(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
        }
        StorageError::UnsupportedFileType { .. } => {
            error(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
        }
        StorageError::Io(msg) => error(StatusCode::INTERNAL_SERVER_ERROR, msg),
    }
}

fn list_review_error(e: ListSuggestionsError) -> Response {
    match e {
        ListSuggestionsError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        ListSuggestionsError::Repository(msg) | ListSuggestionsError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn decide_error(e: DecideSuggestionError) -> Response {
    match e {
        DecideSuggestionError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        DecideSuggestionError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        DecideSuggestionError::InvalidTransition(_) | DecideSuggestionError::Archived => {
            error(StatusCode::CONFLICT, e.to_string())
        }
        DecideSuggestionError::Repository(msg) | DecideSuggestionError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn archive_error(e: ArchiveSuggestionError) -> Response {
    match e {
        ArchiveSuggestionError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        ArchiveSuggestionError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        ArchiveSuggestionError::AlreadyArchived | ArchiveSuggestionError::StillPending => {
            error(StatusCode::CONFLICT, e.to_string())
        }
        ArchiveSuggestionError::Repository(msg) | ArchiveSuggestionError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn edit_error(e: EditSuggestionError) -> Response {
    match e {
        EditSuggestionError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        EditSuggestionError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        EditSuggestionError::Validation(msg) => error(StatusCode::BAD_REQUEST, msg),
        EditSuggestionError::Archived => error(StatusCode::CONFLICT, e.to_string()),
        EditSuggestionError::Repository(msg) | EditSuggestionError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn prd_error(e: GeneratePrdError) -> Response {
    match e {
        GeneratePrdError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        GeneratePrdError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        GeneratePrdError::NotApproved => error(StatusCode::CONFLICT, e.to_string()),
        GeneratePrdError::Generation(msg) => error(StatusCode::BAD_GATEWAY, msg),
        GeneratePrdError::Repository(msg) | GeneratePrdError::Domain(msg) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn export_error(e: ExportPrdError) -> Response {
    match e {
        ExportPrdError::NotFound(_) => error(StatusCode::NOT_FOUND, e.to_string()),
        ExportPrdError::Forbidden => error(StatusCode::FORBIDDEN, e.to_string()),
        ExportPrdError::NoPrd => error(StatusCode::CONFLICT, e.to_string()),
        ExportPrdError::Export(msg)
        | ExportPrdError::Repository(msg)
        | ExportPrdError::Domain(msg) => error(StatusCode::INTERNAL_SERVER_ERROR, msg),
    }
}
