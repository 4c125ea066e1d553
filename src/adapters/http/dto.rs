//! Wire types for the session API.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{SessionOpened, SessionView, TurnReply};
use crate::application::SessionStatsSnapshot;
use crate::domain::dialogue::DialogueState;
use crate::domain::eligibility::Service;
use crate::domain::foundation::Timestamp;
use crate::domain::slots::{SlotName, SlotValue};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOpenedResponse {
    pub session_id: String,
    pub message: String,
    pub state: DialogueState,
}

impl From<SessionOpened> for SessionOpenedResponse {
    fn from(opened: SessionOpened) -> Self {
        Self {
            session_id: opened.session_id.to_string(),
            message: opened.message,
            state: opened.state,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub message: String,
    pub state: DialogueState,
    pub focus: Option<Service>,
    pub collected_slots: Vec<SlotName>,
}

impl From<TurnReply> for TurnResponse {
    fn from(reply: TurnReply) -> Self {
        Self {
            session_id: reply.session_id.to_string(),
            message: reply.message,
            state: reply.state,
            focus: reply.focus,
            collected_slots: reply.collected_slots,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotDto {
    pub name: SlotName,
    pub value: SlotValue,
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: DialogueState,
    pub focus: Option<Service>,
    pub slots: Vec<SlotDto>,
    pub turn_count: usize,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            state: view.state,
            focus: view.focus,
            slots: view
                .slots
                .into_iter()
                .map(|s| SlotDto {
                    name: s.name,
                    value: s.value,
                    confirmed: s.confirmed,
                })
                .collect(),
            turn_count: view.turn_count,
            created_at: view.created_at,
            last_activity: view.last_activity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_enabled: bool,
    pub sessions: SessionStatsSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
