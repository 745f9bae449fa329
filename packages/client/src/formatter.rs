//! Message formatting utilities for client display.

use tilerelay_server::infrastructure::dto::http::{ChatMessageDto, PlayerViewDto};
use tilerelay_shared::time::timestamp_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the banner shown after registration
    pub fn format_registered(player_id: i64) -> String {
        format!(
            "\nRegistered as Player {}. Type to chat, /move <x> <y> <map> [direction], /players, /quit\n",
            player_id
        )
    }

    /// Format one chat line
    ///
    /// # Arguments
    ///
    /// * `message` - Chat message as returned by the relay
    ///
    /// # Returns
    ///
    /// `[<rfc3339>] <from>: <text>`, with the raw timestamp if it cannot be rendered
    pub fn format_chat_message(message: &ChatMessageDto) -> String {
        let timestamp = timestamp_to_rfc3339(message.timestamp)
            .unwrap_or_else(|| message.timestamp.to_string());
        format!("[{}] {}: {}", timestamp, message.from, message.text)
    }

    /// Format the list of other players
    pub fn format_players(players: &[PlayerViewDto]) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Players:\n");

        if players.is_empty() {
            output.push_str("(No other players)\n");
        } else {
            for player in players {
                let moving = if player.moving { ", moving" } else { "" };
                output.push_str(&format!(
                    "Player {} @ ({}, {}) on {} facing {}{}\n",
                    player.id, player.x, player.y, player.map, player.direction, moving
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }
}
