//! UseCase: チャット履歴取得

use std::sync::Arc;

use crate::domain::{ChatMessage, PresenceRepository};

/// チャット履歴取得のユースケース
pub struct GetChatUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetChatUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// Copy of the chat log, oldest first
    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.repository.get_messages().await
    }
}
