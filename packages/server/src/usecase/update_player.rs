//! UseCase: プレイヤー状態の更新
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みプレイヤーの位置更新
//! - 異常系：未登録・期限切れ ID の更新（クライアントは再登録が必要）

use std::sync::Arc;

use tilerelay_shared::time::Clock;

use crate::domain::{PlayerId, PlayerState, PresenceRepository};

use super::error::UpdatePlayerError;

/// プレイヤー状態更新のユースケース
pub struct UpdatePlayerUseCase {
    repository: Arc<dyn PresenceRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdatePlayerUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Overwrite the state of a live player
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 更新成功
    /// * `Err(UpdatePlayerError::PlayerNotFound)` - ID が存在しない
    pub async fn execute(&self, id: PlayerId, state: PlayerState) -> Result<(), UpdatePlayerError> {
        self.repository
            .update(id, state, self.clock.now())
            .await
            .map_err(|e| {
                tracing::debug!(player_id = %id, "Rejected update: {}", e);
                UpdatePlayerError::from(e)
            })
    }
}
