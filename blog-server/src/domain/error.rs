use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
