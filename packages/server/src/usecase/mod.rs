//! UseCase 層
//!
//! One struct per operation; each depends only on the domain layer.

mod error;
mod get_chat;
mod list_players;
mod post_chat;
mod reap_inactive_players;
mod register_player;
mod update_player;

pub use error::{PostChatError, UpdatePlayerError};
pub use get_chat::GetChatUseCase;
pub use list_players::ListPlayersUseCase;
pub use post_chat::PostChatUseCase;
pub use reap_inactive_players::ReapInactivePlayersUseCase;
pub use register_player::RegisterPlayerUseCase;
pub use update_player::UpdatePlayerUseCase;
