//! Use-case handlers, one per session operation.

pub mod end_session;
pub mod get_session;
pub mod send_message;
pub mod session_sweeper;
pub mod start_session;

pub use end_session::end_session;
pub use get_session::{get_session, SessionView, SlotView};
pub use send_message::{send_message, TurnReply};
pub use session_sweeper::SessionSweeper;
pub use start_session::{start_session, SessionOpened};
