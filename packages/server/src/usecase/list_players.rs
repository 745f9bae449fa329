//! UseCase: プレイヤー一覧取得

use std::sync::Arc;

use crate::domain::{PlayerSnapshot, PresenceRepository};

/// プレイヤー一覧取得のユースケース
pub struct ListPlayersUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl ListPlayersUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// Snapshot of every live player, ordered by id
    pub async fn execute(&self) -> Vec<PlayerSnapshot> {
        self.repository.list_players().await
    }
}
