//! End-to-end workflow tests over in-memory adapters.
//!
//! Drives the full path one suggestion takes through the system:
//! create -> refine in the bounded chat -> submit for review -> admin
//! decision -> PRD generation -> archive.

use std::sync::Arc;

use idebanken::adapters::access::StubAccessChecker;
use idebanken::adapters::ai::{MockAIProvider, MockError};
use idebanken::adapters::persistence::InMemorySuggestionRepository;
use idebanken::application::handlers::conversation::{
    CompleteRefinementCommand, CompleteRefinementHandler, StartConversationCommand,
    StartConversationHandler, SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler,
};
use idebanken::application::handlers::prd::GeneratePrdHandler;
use idebanken::application::handlers::review::{
    ArchiveSuggestionCommand, ArchiveSuggestionHandler, DecideSuggestionCommand,
    DecideSuggestionHandler, ListSuggestionsCommand, ListSuggestionsHandler,
};
use idebanken::application::handlers::suggestion::{
    CreateSuggestionCommand, CreateSuggestionHandler, GetSuggestionCommand, GetSuggestionHandler,
};
use idebanken::domain::foundation::{
    Department, StatusFilter, SuggestionId, SuggestionStatus, UserId,
};
use idebanken::ports::SuggestionRepository;

const ADMIN: &str = "admin-1";
const EMPLOYEE: &str = "employee-7";

struct World {
    repo: Arc<InMemorySuggestionRepository>,
    ai: Arc<MockAIProvider>,
    create: CreateSuggestionHandler,
    get: GetSuggestionHandler,
    start: StartConversationHandler,
    submit: SubmitTurnHandler,
    complete: CompleteRefinementHandler,
    list: ListSuggestionsHandler,
    decide: DecideSuggestionHandler,
    archive: ArchiveSuggestionHandler,
}

fn world(ai: MockAIProvider) -> World {
    let repo = Arc::new(InMemorySuggestionRepository::new());
    let ai = Arc::new(ai);
    let access = Arc::new(StubAccessChecker::with_admins([ADMIN]));
    let prd = Arc::new(GeneratePrdHandler::new(
        repo.clone(),
        access.clone(),
        ai.clone(),
    ));

    World {
        create: CreateSuggestionHandler::new(repo.clone()),
        get: GetSuggestionHandler::new(repo.clone(), access.clone()),
        start: StartConversationHandler::new(repo.clone(), ai.clone()),
        submit: SubmitTurnHandler::new(repo.clone(), ai.clone()),
        complete: CompleteRefinementHandler::new(repo.clone()),
        list: ListSuggestionsHandler::new(repo.clone(), access.clone()),
        decide: DecideSuggestionHandler::new(repo.clone(), access.clone(), prd),
        archive: ArchiveSuggestionHandler::new(repo.clone(), access),
        repo,
        ai,
    }
}

fn employee() -> UserId {
    UserId::new(EMPLOYEE).unwrap()
}

fn admin() -> UserId {
    UserId::new(ADMIN).unwrap()
}

async fn create_jacket_suggestion(w: &World) -> SuggestionId {
    let result = w
        .create
        .handle(CreateSuggestionCommand {
            submitted_by: employee(),
            title: "Reflective winter jacket".to_string(),
            description: "add reflective stripes for child safety".to_string(),
            department: Department::Design,
        })
        .await
        .unwrap();
    *result.suggestion.id()
}

async fn refine(w: &World, id: SuggestionId, rounds: usize) {
    w.start
        .handle(StartConversationCommand {
            suggestion_id: id,
            requested_by: employee(),
        })
        .await
        .unwrap();

    for i in 0..rounds {
        w.submit
            .handle(SubmitTurnCommand {
                suggestion_id: id,
                submitted_by: employee(),
                text: format!("uddybning {}", i + 1),
                attachments: Vec::new(),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn fresh_suggestion_is_pending_with_empty_conversation() {
    let w = world(MockAIProvider::new());
    let id = create_jacket_suggestion(&w).await;

    let stored = w.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), SuggestionStatus::Pending);
    assert!(stored.conversation().is_empty());
    assert_eq!(stored.rounds(), 0);
}

#[tokio::test]
async fn two_rounds_allow_completion_five_rounds_cap_the_chat() {
    let w = world(MockAIProvider::new());
    let id = create_jacket_suggestion(&w).await;

    refine(&w, id, 2).await;
    let stored = w.repo.find_by_id(&id).await.unwrap().unwrap();
    assert!(stored.can_complete());

    refine(&w, id, 3).await; // rounds 3..5 on the existing conversation
    let stored = w.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.rounds(), 5);
    assert!(stored.can_complete());

    // A sixth turn is refused without touching the AI collaborator.
    let before = w.ai.call_count();
    let result = w
        .submit
        .handle(SubmitTurnCommand {
            suggestion_id: id,
            submitted_by: employee(),
            text: "en runde til".to_string(),
            attachments: Vec::new(),
        })
        .await;
    assert!(matches!(result, Err(SubmitTurnError::RoundCapReached)));
    assert_eq!(w.ai.call_count(), before);
    assert_eq!(w.repo.find_by_id(&id).await.unwrap().unwrap().rounds(), 5);
}

#[tokio::test]
async fn approval_populates_prd_and_records_reviewer() {
    let ai = MockAIProvider::new()
        .with_reply("Hej! Hvad vil du løse?") // greeting
        .with_reply("Hvem får gavn af det?") // round 1
        .with_reply("Klar til indsendelse!") // round 2
        .with_reply("# PRD\n\nReflective winter jacket."); // PRD
    let w = world(ai);
    let id = create_jacket_suggestion(&w).await;
    refine(&w, id, 2).await;

    w.complete
        .handle(CompleteRefinementCommand {
            suggestion_id: id,
            submitted_by: employee(),
        })
        .await
        .unwrap();

    let result = w
        .decide
        .handle(DecideSuggestionCommand {
            suggestion_id: id,
            decided_by: admin(),
            target: SuggestionStatus::Approved,
            notes: Some("great idea".to_string()),
        })
        .await
        .unwrap();

    assert!(result.prd_warning.is_none());
    let stored = w.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), SuggestionStatus::Approved);
    assert_eq!(stored.admin_notes(), Some("great idea"));
    assert_eq!(stored.reviewed_by(), Some(&admin()));
    assert_eq!(stored.prd(), Some("# PRD\n\nReflective winter jacket."));
}

#[tokio::test]
async fn prd_failure_surfaces_warning_but_keeps_approval() {
    let ai = MockAIProvider::new()
        .with_reply("Hej!") // greeting
        .with_reply("Runde 1") // round 1
        .with_reply("Runde 2") // round 2
        .with_error(MockError::Unavailable {
            message: "provider nede".to_string(),
        }); // PRD attempt
    let w = world(ai);
    let id = create_jacket_suggestion(&w).await;
    refine(&w, id, 2).await;

    let result = w
        .decide
        .handle(DecideSuggestionCommand {
            suggestion_id: id,
            decided_by: admin(),
            target: SuggestionStatus::Approved,
            notes: None,
        })
        .await
        .unwrap();

    assert!(result.prd_warning.is_some());
    let stored = w.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), SuggestionStatus::Approved);
    assert!(stored.prd().is_none());
}

#[tokio::test]
async fn archived_suggestion_leaves_listings_but_not_id_lookup() {
    let w = world(MockAIProvider::new());
    let id = create_jacket_suggestion(&w).await;
    refine(&w, id, 2).await;

    w.decide
        .handle(DecideSuggestionCommand {
            suggestion_id: id,
            decided_by: admin(),
            target: SuggestionStatus::Approved,
            notes: None,
        })
        .await
        .unwrap();

    w.archive
        .handle(ArchiveSuggestionCommand {
            suggestion_id: id,
            archived_by: admin(),
        })
        .await
        .unwrap();

    // Gone from every listing partition...
    for filter in [StatusFilter::All, StatusFilter::Approved, StatusFilter::Pending] {
        let listing = w
            .list
            .handle(ListSuggestionsCommand {
                requested_by: admin(),
                filter,
            })
            .await
            .unwrap();
        assert!(listing.is_empty(), "filter {:?} still lists archived", filter);
    }

    // ...but still reachable directly, with status preserved.
    let fetched = w
        .get
        .handle(GetSuggestionCommand {
            suggestion_id: id,
            requested_by: admin(),
        })
        .await
        .unwrap();
    assert!(fetched.suggestion.is_archived());
    assert_eq!(fetched.suggestion.status(), SuggestionStatus::Approved);
}

#[tokio::test]
async fn more_info_round_trip_ends_in_approval() {
    let ai = MockAIProvider::new(); // generic replies throughout
    let w = world(ai);
    let id = create_jacket_suggestion(&w).await;
    refine(&w, id, 2).await;

    w.decide
        .handle(DecideSuggestionCommand {
            suggestion_id: id,
            decided_by: admin(),
            target: SuggestionStatus::MoreInfoNeeded,
            notes: Some("hvilke jakkestørrelser?".to_string()),
        })
        .await
        .unwrap();

    let listing = w
        .list
        .handle(ListSuggestionsCommand {
            requested_by: admin(),
            filter: StatusFilter::MoreInfoNeeded,
        })
        .await
        .unwrap();
    assert_eq!(listing.reviewed.len(), 1);

    let result = w
        .decide
        .handle(DecideSuggestionCommand {
            suggestion_id: id,
            decided_by: admin(),
            target: SuggestionStatus::Approved,
            notes: Some("alle størrelser, godkendt".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(result.suggestion.status(), SuggestionStatus::Approved);
    assert_eq!(
        result.suggestion.admin_notes(),
        Some("alle størrelser, godkendt")
    );
}
