//! Application layer: orchestrates domain logic over the ports.

pub mod context;
pub mod error;
pub mod handlers;
pub mod stats;

pub use context::AppContext;
pub use error::AppError;
pub use stats::{SessionStats, SessionStatsSnapshot};
