//! UseCase errors.

use thiserror::Error;

use crate::domain::{PlayerId, RepositoryError, ValueObjectError};

/// Errors returned by [`UpdatePlayerUseCase`](super::UpdatePlayerUseCase)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdatePlayerError {
    /// The player is unknown or has expired; the client should re-register
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}

impl From<RepositoryError> for UpdatePlayerError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::PlayerNotFound(id) => Self::PlayerNotFound(id),
        }
    }
}

/// Errors returned by [`PostChatUseCase`](super::PostChatUseCase)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostChatError {
    #[error("invalid chat text: {0}")]
    InvalidText(#[from] ValueObjectError),
}
