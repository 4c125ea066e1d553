//! Opens a new dialogue session.

use crate::application::context::AppContext;
use crate::application::error::AppError;
use crate::domain::dialogue::{DialogueController, DialogueState, SessionRecord};
use crate::domain::formatting::ResponseFormatter;
use crate::domain::foundation::SessionId;

pub struct SessionOpened {
    pub session_id: SessionId,
    pub message: String,
    pub state: DialogueState,
}

/// Creates a session and returns the greeting.
///
/// The greeting is always template text; paraphrasing starts with the
/// first user turn.
pub async fn start_session(ctx: &AppContext) -> Result<SessionOpened, AppError> {
    let mut controller = DialogueController::new(SessionId::new());
    let action = controller.start(&ctx.catalog)?;
    let message = ResponseFormatter::new().render(&action);

    let session_id = controller.session_id();
    let state = controller.state();
    ctx.sessions.save(SessionRecord::new(controller)).await?;
    ctx.stats.record_created();

    tracing::info!(%session_id, "session started");
    Ok(SessionOpened {
        session_id,
        message,
        state,
    })
}
