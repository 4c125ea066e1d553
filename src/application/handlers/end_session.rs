//! Ends a session and discards its state.

use crate::application::context::AppContext;
use crate::application::error::AppError;
use crate::domain::foundation::SessionId;

/// Deletes the session. Nothing is archived; ending a session and
/// abandoning one converge on the same outcome.
pub async fn end_session(ctx: &AppContext, session_id: SessionId) -> Result<(), AppError> {
    ctx.sessions.delete(session_id).await?;
    ctx.stats.record_ended();
    tracing::info!(%session_id, "session ended");
    Ok(())
}
