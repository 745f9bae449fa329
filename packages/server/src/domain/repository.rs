//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{ChatMessage, PlayerId, PlayerSnapshot, PlayerState, RepositoryError};

/// Presence Repository trait
///
/// Single source of truth for live players and chat history. Every method is
/// one critical section: implementations must not await anything other than
/// their own lock while holding it.
///
/// Time is always passed in by the caller so that expiry can be driven by a
/// manual clock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 次の ID を割り当ててデフォルト状態のプレイヤーを追加
    async fn register(&self, now: Instant) -> PlayerId;

    /// プレイヤーの状態を上書き
    ///
    /// Fails with [`RepositoryError::PlayerNotFound`] when `id` is not live.
    async fn update(
        &self,
        id: PlayerId,
        state: PlayerState,
        now: Instant,
    ) -> Result<(), RepositoryError>;

    /// 生存中の全プレイヤーのコピーを ID 順で取得
    async fn list_players(&self) -> Vec<PlayerSnapshot>;

    /// 生存中のプレイヤー数を取得
    async fn count_players(&self) -> usize;

    /// チャットログにメッセージを追加（容量超過時は最古を削除）
    async fn add_message(&self, message: ChatMessage);

    /// チャットログのコピーを古い順で取得
    async fn get_messages(&self) -> Vec<ChatMessage>;

    /// `ttl` 以上更新のないプレイヤーを削除し、削除した ID を返す
    async fn evict_inactive(&self, now: Instant, ttl: Duration) -> Vec<PlayerId>;
}
