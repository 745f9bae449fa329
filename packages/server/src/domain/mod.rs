//! ドメイン層
//!
//! Entities, value objects and the repository interface of the relay.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{ChatLog, ChatMessage, DEFAULT_DIRECTION, Player, PlayerSnapshot, PlayerState};
pub use error::{RepositoryError, ValueObjectError};
pub use repository::PresenceRepository;
pub use value_object::{MessageText, PlayerId, Position};

#[cfg(test)]
pub use repository::MockPresenceRepository;
