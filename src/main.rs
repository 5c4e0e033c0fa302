//! Idébanken service entry point.
//!
//! Loads configuration, wires adapters to handlers, and serves the HTTP
//! API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use idebanken::adapters::access::PostgresAccessChecker;
use idebanken::adapters::ai::{OpenAIConfig, OpenAIProvider};
use idebanken::adapters::export::MarkdownExporter;
use idebanken::adapters::http::{api_routes, AppHandlers};
use idebanken::adapters::persistence::PostgresSuggestionRepository;
use idebanken::adapters::storage::LocalFileStorage;
use idebanken::application::handlers::conversation::{
    CompleteRefinementHandler, StartConversationHandler, SubmitTurnHandler,
};
use idebanken::application::handlers::prd::{ExportPrdHandler, GeneratePrdHandler};
use idebanken::application::handlers::review::{
    ArchiveSuggestionHandler, DecideSuggestionHandler, EditSuggestionHandler,
    ListSuggestionsHandler,
};
use idebanken::application::handlers::suggestion::{
    CreateSuggestionHandler, GetSuggestionHandler, ListOwnSuggestionsHandler,
};
use idebanken::config::AppConfig;
use idebanken::ports::{AIProvider, AccessChecker, DocumentExport, FileStorage, SuggestionRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .unwrap_or_default();
    let ai_provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));

    let repository: Arc<dyn SuggestionRepository> =
        Arc::new(PostgresSuggestionRepository::new(pool.clone()));
    let access: Arc<dyn AccessChecker> = Arc::new(PostgresAccessChecker::new(pool));
    let file_storage: Arc<dyn FileStorage> = Arc::new(
        LocalFileStorage::new(&config.storage.root, &config.storage.public_base_url)
            .with_url_ttl(config.storage.url_ttl()),
    );
    let export: Arc<dyn DocumentExport> = Arc::new(MarkdownExporter::standalone());

    let generate_prd = Arc::new(GeneratePrdHandler::new(
        repository.clone(),
        access.clone(),
        ai_provider.clone(),
    ));

    let handlers = AppHandlers {
        create: Arc::new(CreateSuggestionHandler::new(repository.clone())),
        get: Arc::new(GetSuggestionHandler::new(repository.clone(), access.clone())),
        list_own: Arc::new(ListOwnSuggestionsHandler::new(repository.clone())),
        start_conversation: Arc::new(StartConversationHandler::new(
            repository.clone(),
            ai_provider.clone(),
        )),
        submit_turn: Arc::new(SubmitTurnHandler::new(
            repository.clone(),
            ai_provider.clone(),
        )),
        complete_refinement: Arc::new(CompleteRefinementHandler::new(repository.clone())),
        list_review: Arc::new(ListSuggestionsHandler::new(
            repository.clone(),
            access.clone(),
        )),
        decide: Arc::new(DecideSuggestionHandler::new(
            repository.clone(),
            access.clone(),
            generate_prd.clone(),
        )),
        archive: Arc::new(ArchiveSuggestionHandler::new(
            repository.clone(),
            access.clone(),
        )),
        edit: Arc::new(EditSuggestionHandler::new(repository.clone(), access.clone())),
        generate_prd: generate_prd.clone(),
        export_prd: Arc::new(ExportPrdHandler::new(repository, access, export)),
        file_storage,
    };

    let app = api_routes(handlers);
    let addr = config.server.socket_addr();
    info!(%addr, "idebanken listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
