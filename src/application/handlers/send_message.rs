//! Processes one user message within a session.

use std::time::Duration;

use crate::application::context::AppContext;
use crate::application::error::AppError;
use crate::domain::dialogue::DialogueState;
use crate::domain::eligibility::Service;
use crate::domain::formatting::{validate, ResponseFormatter, ResponseShape};
use crate::domain::foundation::SessionId;
use crate::domain::slots::SlotName;
use crate::ports::{AIProvider, CompletionRequest, Message};

const PARAPHRASE_PROMPT: &str = "Reword the assistant message below in a warm, plain-spoken tone. \
Keep every fact, number, and bullet item unchanged, ask exactly the same question, \
and stay within three sentences.";

const PARAPHRASE_MAX_TOKENS: u32 = 220;
const PARAPHRASE_TEMPERATURE: f32 = 0.4;

#[derive(Debug)]
pub struct TurnReply {
    pub session_id: SessionId,
    pub message: String,
    pub state: DialogueState,
    pub focus: Option<Service>,
    pub collected_slots: Vec<SlotName>,
}

/// Runs one turn: extract, decide, render, optionally paraphrase,
/// persist.
pub async fn send_message(
    ctx: &AppContext,
    session_id: SessionId,
    text: &str,
) -> Result<TurnReply, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let mut record = ctx.sessions.load(session_id).await?;
    let action = record.controller.handle_utterance(text, &ctx.catalog)?;

    let formatter = ResponseFormatter::new();
    let template = formatter.render(&action);
    let shape = formatter.shape(&action);

    let message = match &ctx.ai {
        Some(provider) => {
            paraphrase(provider.as_ref(), ctx.ai_timeout, &template, shape)
                .await
                .unwrap_or_else(|| template.clone())
        }
        None => template.clone(),
    };

    record.controller.record_turn(text, &action, &message);
    record.touch();

    let state = record.controller.state();
    let focus = record.controller.focus();
    let collected_slots = record.controller.slots().iter().map(|s| s.name).collect();
    ctx.sessions.save(record).await?;

    tracing::debug!(%session_id, %state, "turn completed");
    Ok(TurnReply {
        session_id,
        message,
        state,
        focus,
        collected_slots,
    })
}

/// Asks the provider to reword template text.
///
/// Returns `None` on timeout, provider error, or any output that
/// breaks the response bounds or changes the number of questions; the
/// caller then uses the template as-is.
async fn paraphrase(
    provider: &dyn AIProvider,
    timeout: Duration,
    template: &str,
    shape: ResponseShape,
) -> Option<String> {
    let request = CompletionRequest::new(vec![
        Message::system(PARAPHRASE_PROMPT),
        Message::user(template),
    ])
    .with_max_tokens(PARAPHRASE_MAX_TOKENS)
    .with_temperature(PARAPHRASE_TEMPERATURE);

    let response = match tokio::time::timeout(timeout, provider.complete(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::warn!(provider = provider.name(), error = %err, "paraphrase failed, using template");
            return None;
        }
        Err(_) => {
            tracing::warn!(
                provider = provider.name(),
                timeout_secs = timeout.as_secs(),
                "paraphrase timed out, using template"
            );
            return None;
        }
    };

    let text = response.content.trim().to_string();
    if text.is_empty() {
        return None;
    }
    if validate(&text, shape).is_err() {
        tracing::warn!(provider = provider.name(), "paraphrase broke response bounds, using template");
        return None;
    }
    if text.matches('?').count() != template.matches('?').count() {
        tracing::warn!(provider = provider.name(), "paraphrase changed the question count, using template");
        return None;
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::start_session::start_session;
    use crate::domain::eligibility::ServiceCatalog;
    use crate::ports::AIError;
    use std::sync::Arc;

    fn ctx_with_ai(provider: Option<Arc<MockAIProvider>>) -> AppContext {
        AppContext::new(
            Arc::new(InMemorySessionStore::new()),
            provider.map(|p| p as Arc<dyn AIProvider>),
            Arc::new(ServiceCatalog::builtin().clone()),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let ctx = ctx_with_ai(None);
        let opened = start_session(&ctx).await.unwrap();
        let err = send_message(&ctx, opened.session_id, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyMessage));
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let ctx = ctx_with_ai(None);
        let err = send_message(&ctx, SessionId::new(), "hello").await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn template_only_turn_works_without_a_provider() {
        let ctx = ctx_with_ai(None);
        let opened = start_session(&ctx).await.unwrap();

        let reply = send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();
        assert_eq!(reply.state, DialogueState::SlotCollection);
        assert_eq!(reply.focus, Some(Service::Rpm));
        assert!(reply.message.contains('?'));
    }

    #[tokio::test]
    async fn provider_rewording_is_used_when_it_stays_in_bounds() {
        let provider = Arc::new(MockAIProvider::with_responses([
            "Happy to help! Could you tell me your age?",
        ]));
        let ctx = ctx_with_ai(Some(provider));
        let opened = start_session(&ctx).await.unwrap();

        let reply = send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();
        assert_eq!(reply.message, "Happy to help! Could you tell me your age?");
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_the_template() {
        let provider = Arc::new(MockAIProvider::new());
        provider.fail_next(AIError::RateLimited);
        let ctx = ctx_with_ai(Some(provider));
        let opened = start_session(&ctx).await.unwrap();

        let reply = send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();
        assert_eq!(reply.message, "Could you tell me your age?");
    }

    #[tokio::test]
    async fn slow_provider_falls_back_to_the_template() {
        let provider = Arc::new(MockAIProvider::with_responses(["too late"]));
        provider.set_delay(Duration::from_secs(2));
        let ctx = ctx_with_ai(Some(provider));
        let opened = start_session(&ctx).await.unwrap();

        let reply = send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();
        assert_eq!(reply.message, "Could you tell me your age?");
    }

    #[tokio::test]
    async fn rewording_that_drops_the_question_is_discarded() {
        let provider = Arc::new(MockAIProvider::with_responses([
            "Thanks for asking about remote monitoring.",
        ]));
        let ctx = ctx_with_ai(Some(provider));
        let opened = start_session(&ctx).await.unwrap();

        let reply = send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();
        assert_eq!(reply.message, "Could you tell me your age?");
    }

    #[tokio::test]
    async fn turn_is_persisted_with_the_final_text() {
        let ctx = ctx_with_ai(None);
        let opened = start_session(&ctx).await.unwrap();
        send_message(&ctx, opened.session_id, "I need RPM").await.unwrap();

        let record = ctx.sessions.load(opened.session_id).await.unwrap();
        let turns = record.controller.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].utterance, "I need RPM");
        assert_eq!(turns[0].response, "Could you tell me your age?");
    }
}
