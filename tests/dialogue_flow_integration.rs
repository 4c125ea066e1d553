//! End-to-end conversation flows through the application handlers.

use std::sync::Arc;
use std::time::Duration;

use healthsmart::adapters::ai::MockAIProvider;
use healthsmart::adapters::storage::InMemorySessionStore;
use healthsmart::application::handlers::{
    end_session, get_session, send_message, start_session, SessionSweeper, TurnReply,
};
use healthsmart::application::{AppContext, AppError};
use healthsmart::domain::dialogue::DialogueState;
use healthsmart::domain::eligibility::{Service, ServiceCatalog};
use healthsmart::domain::foundation::SessionId;
use healthsmart::domain::slots::SlotName;
use healthsmart::ports::{AIProvider, SessionStore};

fn template_ctx() -> AppContext {
    AppContext::new(
        Arc::new(InMemorySessionStore::new()),
        None,
        Arc::new(ServiceCatalog::builtin().clone()),
        Duration::from_millis(200),
    )
}

fn paraphrasing_ctx() -> AppContext {
    // Empty-queue mock echoes the template, a safe identity paraphraser.
    let provider: Arc<dyn AIProvider> = Arc::new(MockAIProvider::new());
    AppContext::new(
        Arc::new(InMemorySessionStore::new()),
        Some(provider),
        Arc::new(ServiceCatalog::builtin().clone()),
        Duration::from_millis(200),
    )
}

async fn say(ctx: &AppContext, id: SessionId, text: &str) -> TurnReply {
    send_message(ctx, id, text).await.unwrap()
}

#[tokio::test]
async fn rpm_screening_runs_from_greeting_to_eligible() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    assert!(opened.message.contains("Remote Patient Monitoring"));

    let reply = say(&ctx, opened.session_id, "I need RPM").await;
    assert_eq!(reply.state, DialogueState::SlotCollection);
    assert_eq!(reply.message, "Could you tell me your age?");

    let reply = say(&ctx, opened.session_id, "78").await;
    assert!(reply.message.contains("your age as 78"));
    assert!(reply.collected_slots.contains(&SlotName::Age));

    let reply = say(&ctx, opened.session_id, "I have diabetes").await;
    assert!(reply.message.contains('?'));

    let reply = say(&ctx, opened.session_id, "I have medicare").await;
    assert_eq!(reply.state, DialogueState::FollowUp);
    assert!(reply.message.contains("you qualify for Remote Patient Monitoring"));
    assert!(reply.message.contains("enrollment specialist"));

    let reply = say(&ctx, opened.session_id, "thanks").await;
    assert!(reply.message.contains("enrollment specialist"));
}

#[tokio::test]
async fn ineligible_outcome_offers_bounded_fallbacks() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();

    say(&ctx, opened.session_id, "I need RPM").await;
    say(&ctx, opened.session_id, "45").await;
    say(&ctx, opened.session_id, "no").await;
    let reply = say(&ctx, opened.session_id, "I have medicare").await;

    assert_eq!(reply.state, DialogueState::FocusSelection);
    assert_eq!(reply.focus, None);
    assert!(reply.message.contains("isn't a match right now"));
    let bullets = reply.message.lines().filter(|l| l.starts_with("- ")).count();
    assert!(bullets >= 1 && bullets <= 5, "bullets: {}", bullets);
}

#[tokio::test]
async fn off_topic_question_is_redirected_back_to_the_prompt() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    say(&ctx, opened.session_id, "I need RPM").await;

    let reply = say(&ctx, opened.session_id, "what restaurants do you recommend").await;
    assert!(reply.message.contains("I can't help with that one"));
    assert!(reply.message.contains("Could you tell me your age?"));
    assert_eq!(reply.state, DialogueState::SlotCollection);
    assert_eq!(reply.focus, Some(Service::Rpm));
}

#[tokio::test]
async fn repeated_failed_answers_get_the_simplified_question() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    say(&ctx, opened.session_id, "I need RPM").await;

    let first = say(&ctx, opened.session_id, "hmm let me think qwerty").await;
    assert!(first.message.contains("Could you tell me your age?"));

    let second = say(&ctx, opened.session_id, "qwerty again zxcv").await;
    assert!(second.message.contains("How old are you?"));
}

#[tokio::test]
async fn conflicting_answer_requires_confirmation_before_overwrite() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    say(&ctx, opened.session_id, "I need RPM").await;
    say(&ctx, opened.session_id, "78").await;

    let reply = say(&ctx, opened.session_id, "I'm 65 years old").await;
    assert!(reply.message.contains("78"));
    assert!(reply.message.contains("65"));
    assert!(reply.message.contains('?'));

    say(&ctx, opened.session_id, "yes").await;
    let view = get_session(&ctx, opened.session_id).await.unwrap();
    let age = view.slots.iter().find(|s| s.name == SlotName::Age).unwrap();
    assert_eq!(age.value.as_integer(), Some(65));
}

#[tokio::test]
async fn age_is_shared_across_services_within_a_session() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    say(&ctx, opened.session_id, "I need RPM").await;
    say(&ctx, opened.session_id, "78").await;
    say(&ctx, opened.session_id, "I have diabetes").await;
    say(&ctx, opened.session_id, "I have medicare").await;

    // Telehealth never asks for age again.
    let reply = say(&ctx, opened.session_id, "can I also get telehealth").await;
    assert_eq!(reply.focus, Some(Service::Telehealth));
    assert!(!reply.message.to_lowercase().contains("age"));
    assert!(reply.message.contains('?'));
}

#[tokio::test]
async fn emergency_mentions_short_circuit_to_escalation() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    say(&ctx, opened.session_id, "I need RPM").await;

    let reply = say(&ctx, opened.session_id, "I'm having chest pain right now").await;
    assert!(reply.message.contains("911"));
}

#[tokio::test]
async fn every_reply_stays_within_the_response_bounds() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();

    for text in [
        "I need RPM",
        "okie doke",
        "78",
        "what restaurants do you recommend",
        "I have diabetes",
        "I have medicare",
        "thanks",
        "what else do you have",
    ] {
        let reply = say(&ctx, opened.session_id, text).await;
        let bullets = reply.message.lines().filter(|l| l.starts_with("- ")).count();
        assert!(bullets <= 5, "too many bullets for {:?}", text);
        let words = reply.message.split_whitespace().count();
        assert!(words <= 150, "too many words for {:?}", text);
    }
}

#[tokio::test]
async fn paraphrasing_backend_does_not_change_flow_decisions() {
    let ctx = paraphrasing_ctx();
    let opened = start_session(&ctx).await.unwrap();

    let reply = say(&ctx, opened.session_id, "I need RPM").await;
    assert_eq!(reply.state, DialogueState::SlotCollection);
    assert_eq!(reply.message, "Could you tell me your age?");

    let reply = say(&ctx, opened.session_id, "78").await;
    assert!(reply.collected_slots.contains(&SlotName::Age));
}

#[tokio::test]
async fn ended_sessions_reject_further_messages() {
    let ctx = template_ctx();
    let opened = start_session(&ctx).await.unwrap();
    end_session(&ctx, opened.session_id).await.unwrap();

    let err = send_message(&ctx, opened.session_id, "hello").await.unwrap_err();
    assert!(matches!(err, AppError::Store(_)));
}

#[tokio::test]
async fn sweeper_discards_abandoned_sessions_only() {
    let store = Arc::new(InMemorySessionStore::new());
    let ctx = AppContext::new(
        store.clone(),
        None,
        Arc::new(ServiceCatalog::builtin().clone()),
        Duration::from_millis(200),
    );

    let abandoned = start_session(&ctx).await.unwrap();
    let active = start_session(&ctx).await.unwrap();

    // Age the abandoned session past the idle window.
    let mut record = store.load(abandoned.session_id).await.unwrap();
    record.last_activity = record.last_activity.minus_seconds(3600);
    store.save(record).await.unwrap();

    let sweeper =
        SessionSweeper::new(store.clone(), ctx.stats.clone(), 1800, Duration::from_secs(60));
    assert_eq!(sweeper.sweep_once().await, 1);

    assert!(store.load(abandoned.session_id).await.is_err());
    assert!(store.load(active.session_id).await.is_ok());
    assert_eq!(ctx.stats.snapshot(1).created, 2);
    assert_eq!(ctx.stats.snapshot(1).expired, 1);
}
