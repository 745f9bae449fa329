//! UseCase: チャット投稿
//!
//! The sender id is taken from the request as-is; it is not checked against
//! the live players, so any client can post under any id.

use std::sync::Arc;

use tilerelay_shared::time::Clock;

use crate::domain::{ChatMessage, MessageText, PlayerId, PresenceRepository};

use super::error::PostChatError;

/// チャット投稿のユースケース
pub struct PostChatUseCase {
    repository: Arc<dyn PresenceRepository>,
    clock: Arc<dyn Clock>,
    /// テキストの最大文字数
    max_chars: usize,
}

impl PostChatUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        clock: Arc<dyn Clock>,
        max_chars: usize,
    ) -> Self {
        Self {
            repository,
            clock,
            max_chars,
        }
    }

    /// Validate the text, stamp it with the wall-clock time and append it
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 追加されたメッセージ
    /// * `Err(PostChatError)` - テキストが長すぎる
    pub async fn execute(&self, from: PlayerId, text: String) -> Result<ChatMessage, PostChatError> {
        let text = MessageText::new(text, self.max_chars)?;
        let message = ChatMessage::from_player(from, text, self.clock.unix_seconds());
        self.repository.add_message(message.clone()).await;
        tracing::debug!(player_id = %from, "Chat message stored");
        Ok(message)
    }
}
