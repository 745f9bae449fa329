//! Domain errors.

use thiserror::Error;

use super::PlayerId;

/// Errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Chat text is longer than the configured cap
    #[error("message text is {actual} characters, limit is {limit}")]
    MessageTooLong { actual: usize, limit: usize },
}

/// Errors surfaced by a [`PresenceRepository`](super::PresenceRepository)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The id was never registered or has already expired
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}
