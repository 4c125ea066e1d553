//! Dialogue control: session state machine, per-turn decisions, and
//! the transcript.

mod action;
mod controller;
mod session;
mod state;

pub use action::{ClarifyNote, ControllerAction};
pub use controller::{DialogueController, ServiceFocus, Turn, MAX_IDENTICAL_REASKS};
pub use session::SessionRecord;
pub use state::DialogueState;
