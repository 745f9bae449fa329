//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after printing asynchronous output
pub fn redisplay_prompt(player_id: i64) {
    print!("Player {}> ", player_id);
    std::io::stdout().flush().ok();
}
