//! Application-level error, mapped to transport status codes by the
//! HTTP adapter.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::ports::SessionStoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),

    #[error("message must not be empty")]
    EmptyMessage,
}
