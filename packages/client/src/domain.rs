//! Domain logic for client-side operations.
//!
//! Pure functions over relay snapshots, kept free of I/O so the agent and
//! the CLI can share them.

use tilerelay_server::infrastructure::dto::http::{ChatMessageDto, PlayersResponse, PlayerViewDto};

/// Player id of an agent that has not registered yet
pub const UNREGISTERED: i64 = -1;

/// Every player in the listing except `own_id`, ordered by id.
pub fn peers_of(response: PlayersResponse, own_id: i64) -> Vec<PlayerViewDto> {
    response
        .players
        .into_values()
        .filter(|player| player.id != own_id)
        .collect()
}

/// The last `limit` messages of a history, oldest first.
pub fn last_messages(messages: &[ChatMessageDto], limit: usize) -> Vec<ChatMessageDto> {
    let start = messages.len().saturating_sub(limit);
    messages[start..].to_vec()
}

/// Messages strictly newer than `seen_until`.
///
/// # Arguments
///
/// * `messages` - Chat history, oldest first
/// * `seen_until` - Timestamp of the newest message already shown, if any
pub fn unseen_messages(messages: &[ChatMessageDto], seen_until: Option<f64>) -> Vec<ChatMessageDto> {
    match seen_until {
        Some(seen) => messages
            .iter()
            .filter(|message| message.timestamp > seen)
            .cloned()
            .collect(),
        None => messages.to_vec(),
    }
}
