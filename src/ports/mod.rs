//! Ports: traits the application layer depends on, implemented by
//! adapters.

pub mod ai_provider;
pub mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
};
pub use session_store::{SessionStore, SessionStoreError};
