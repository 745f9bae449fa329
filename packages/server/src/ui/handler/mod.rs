//! HTTP endpoint handlers.

mod error;
mod http;

pub use error::ApiError;
pub use http::{
    get_chat, health_check, list_players, not_found, post_chat, register_player, update_player,
};
