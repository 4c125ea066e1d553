//! Reads the current state of a session.

use crate::application::context::AppContext;
use crate::application::error::AppError;
use crate::domain::dialogue::DialogueState;
use crate::domain::eligibility::Service;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::slots::{SlotName, SlotValue};

pub struct SlotView {
    pub name: SlotName,
    pub value: SlotValue,
    pub confirmed: bool,
}

pub struct SessionView {
    pub session_id: SessionId,
    pub state: DialogueState,
    pub focus: Option<Service>,
    pub slots: Vec<SlotView>,
    pub turn_count: usize,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

pub async fn get_session(ctx: &AppContext, session_id: SessionId) -> Result<SessionView, AppError> {
    let record = ctx.sessions.load(session_id).await?;
    let controller = &record.controller;

    let slots = controller
        .slots()
        .iter()
        .map(|slot| SlotView {
            name: slot.name,
            value: slot.value.clone(),
            confirmed: slot.confirmed,
        })
        .collect();

    Ok(SessionView {
        session_id,
        state: controller.state(),
        focus: controller.focus(),
        slots,
        turn_count: controller.turns().len(),
        created_at: record.created_at,
        last_activity: record.last_activity,
    })
}
