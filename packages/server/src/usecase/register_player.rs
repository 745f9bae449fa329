//! UseCase: プレイヤー登録

use std::sync::Arc;

use tilerelay_shared::time::Clock;

use crate::domain::{PlayerId, PresenceRepository};

/// プレイヤー登録のユースケース
pub struct RegisterPlayerUseCase {
    repository: Arc<dyn PresenceRepository>,
    clock: Arc<dyn Clock>,
}

impl RegisterPlayerUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Allocate the next id and insert a player in the default state
    pub async fn execute(&self) -> PlayerId {
        let id = self.repository.register(self.clock.now()).await;
        tracing::info!(player_id = %id, "Player registered");
        id
    }
}
