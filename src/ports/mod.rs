//! Ports - trait contracts between the core and its collaborators.

mod access_checker;
mod ai_provider;
mod document_export;
mod file_storage;
mod suggestion_repository;

pub use access_checker::AccessChecker;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, WireMessage,
    WireRole,
};
pub use document_export::{DocumentExport, ExportError};
pub use file_storage::{
    FileStorage, FileUpload, StorageError, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES,
};
pub use suggestion_repository::SuggestionRepository;
