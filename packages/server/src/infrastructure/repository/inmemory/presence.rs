//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! プレイヤー表とチャットログを 1 つの Mutex で保護します。

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatLog, ChatMessage, Player, PlayerId, PlayerSnapshot, PlayerState, PresenceRepository,
    RepositoryError,
};

/// Everything guarded by the store lock
#[derive(Debug, Default)]
struct PresenceState {
    players: BTreeMap<PlayerId, Player>,
    chat: ChatLog,
    next_id: i64,
}

/// インメモリ Presence Repository 実装
///
/// Players and chat live behind one coarse lock; all operations are
/// O(live players) or O(1) so contention stays negligible.
pub struct InMemoryPresenceRepository {
    state: Mutex<PresenceState>,
}

impl InMemoryPresenceRepository {
    /// Create an empty store with the default chat capacity
    pub fn new() -> Self {
        Self::with_chat_capacity(ChatLog::DEFAULT_CAPACITY)
    }

    /// Create an empty store keeping at most `chat_capacity` messages
    pub fn with_chat_capacity(chat_capacity: usize) -> Self {
        Self {
            state: Mutex::new(PresenceState {
                players: BTreeMap::new(),
                chat: ChatLog::with_capacity(chat_capacity),
                next_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn register(&self, now: Instant) -> PlayerId {
        let mut state = self.state.lock().await;
        let id = PlayerId::new(state.next_id);
        state.next_id += 1;
        state.players.insert(id, Player::new(id, now));
        id
    }

    async fn update(
        &self,
        id: PlayerId,
        next: PlayerState,
        now: Instant,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let player = state
            .players
            .get_mut(&id)
            .ok_or(RepositoryError::PlayerNotFound(id))?;
        player.apply(next, now);
        Ok(())
    }

    async fn list_players(&self) -> Vec<PlayerSnapshot> {
        let state = self.state.lock().await;
        state.players.values().map(Player::snapshot).collect()
    }

    async fn count_players(&self) -> usize {
        let state = self.state.lock().await;
        state.players.len()
    }

    async fn add_message(&self, message: ChatMessage) {
        let mut state = self.state.lock().await;
        state.chat.push(message);
    }

    async fn get_messages(&self) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.chat.to_vec()
    }

    async fn evict_inactive(&self, now: Instant, ttl: Duration) -> Vec<PlayerId> {
        let mut state = self.state.lock().await;
        let expired: Vec<PlayerId> = state
            .players
            .values()
            .filter(|player| player.is_inactive(now, ttl))
            .map(|player| player.id)
            .collect();
        for id in &expired {
            state.players.remove(id);
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{MessageText, Position};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryPresenceRepository の登録・更新・一覧・チャット・期限切れ削除
    //
    // 【なぜこのテストが必要か】
    // - Repository は全ユースケースが依存する唯一の状態保持者
    // - ID の単調増加、スナップショットのコピー、容量制限を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 連続登録で 0 から始まる増加 ID
    // 2. 更新の成功と存在しない ID の失敗
    // 3. チャットログの容量制限
    // 4. 期限切れプレイヤーの削除
    // 5. 複数タスクからの並行更新
    // ========================================

    fn state(x: f64, y: f64, map: &str, moving: bool, direction: &str) -> PlayerState {
        PlayerState {
            position: Position::new(x, y),
            map: map.to_string(),
            moving,
            direction: direction.to_string(),
        }
    }

    fn chat(id: i64, text: &str, timestamp: f64) -> ChatMessage {
        ChatMessage::from_player(
            PlayerId::new(id),
            MessageText::new(text.to_string(), MessageText::DEFAULT_MAX_CHARS).unwrap(),
            timestamp,
        )
    }

    #[tokio::test]
    async fn test_register_allocates_increasing_ids_from_zero() {
        // テスト項目: N 回登録すると 0 から始まる異なる増加 ID が得られる
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let now = Instant::now();

        // when (操作):
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(repo.register(now).await);
        }

        // then (期待する結果):
        let values: Vec<i64> = ids.iter().map(PlayerId::value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
        assert_eq!(repo.count_players().await, 5);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_eviction() {
        // テスト項目: 期限切れで削除された ID は再利用されない
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let start = Instant::now();
        let first = repo.register(start).await;
        repo.evict_inactive(start + Duration::from_secs(60), Duration::from_secs(60))
            .await;

        // when (操作):
        let second = repo.register(start).await;

        // then (期待する結果):
        assert_eq!(first.value(), 0);
        assert_eq!(second.value(), 1);
    }

    #[tokio::test]
    async fn test_update_then_list_reflects_values() {
        // テスト項目: 更新した値が一覧にそのまま反映される
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let now = Instant::now();
        let id = repo.register(now).await;

        // when (操作):
        let result = repo
            .update(id, state(1.0, 2.0, "town", true, "up"), now)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let players = repo.list_players().await;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, id);
        assert_eq!(players[0].state, state(1.0, 2.0, "town", true, "up"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails_without_creating() {
        // テスト項目: 未登録 ID の更新は失敗し、レコードも作られない
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();

        // when (操作):
        let result = repo
            .update(
                PlayerId::new(42),
                state(1.0, 2.0, "town", true, "up"),
                Instant::now(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::PlayerNotFound(PlayerId::new(42))));
        assert!(repo.list_players().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_players_is_a_copy() {
        // テスト項目: 一覧はコピーであり、後続の更新の影響を受けない
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let now = Instant::now();
        let id = repo.register(now).await;
        let before = repo.list_players().await;

        // when (操作):
        repo.update(id, state(5.0, 5.0, "cave", false, "left"), now)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(before[0].state, PlayerState::default());
    }

    #[tokio::test]
    async fn test_chat_log_is_capped() {
        // テスト項目: 60 件のメッセージのうち最新 50 件が古い順に残る
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();

        // when (操作):
        for i in 0..60 {
            repo.add_message(chat(0, &format!("m{}", i), f64::from(i)))
                .await;
        }

        // then (期待する結果):
        let messages = repo.get_messages().await;
        assert_eq!(messages.len(), 50);
        assert_eq!(messages.first().unwrap().text.as_str(), "m10");
        assert_eq!(messages.last().unwrap().text.as_str(), "m59");
    }

    #[tokio::test]
    async fn test_custom_chat_capacity() {
        // テスト項目: 指定した容量でチャットログが制限される
        // given (前提条件):
        let repo = InMemoryPresenceRepository::with_chat_capacity(2);

        // when (操作):
        repo.add_message(chat(0, "a", 1.0)).await;
        repo.add_message(chat(1, "b", 2.0)).await;
        repo.add_message(chat(2, "c", 3.0)).await;

        // then (期待する結果):
        let messages = repo.get_messages().await;
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_evict_inactive_removes_only_expired_players() {
        // テスト項目: TTL を超えたプレイヤーだけが削除される
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let start = Instant::now();
        let ttl = Duration::from_secs(60);
        let stale = repo.register(start).await;
        let fresh = repo.register(start).await;
        repo.update(
            fresh,
            state(1.0, 1.0, "town", true, "up"),
            start + Duration::from_secs(30),
        )
        .await
        .unwrap();

        // when (操作):
        let evicted = repo
            .evict_inactive(start + Duration::from_secs(61), ttl)
            .await;

        // then (期待する結果):
        assert_eq!(evicted, vec![stale]);
        let remaining: Vec<PlayerId> = repo.list_players().await.iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![fresh]);
    }

    #[tokio::test]
    async fn test_evict_inactive_is_idempotent() {
        // テスト項目: 2 回目の削除では何も起きない（冪等性）
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let start = Instant::now();
        let ttl = Duration::from_secs(60);
        repo.register(start).await;
        repo.evict_inactive(start + ttl, ttl).await;

        // when (操作):
        let evicted = repo.evict_inactive(start + ttl, ttl).await;

        // then (期待する結果):
        assert!(evicted.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_updates_on_distinct_ids() {
        // テスト項目: 別々の ID に対する並行更新が失われない
        // given (前提条件):
        let repo = Arc::new(InMemoryPresenceRepository::new());
        let now = Instant::now();
        let tasks = 16;
        let updates_per_task = 200;
        let mut ids = Vec::new();
        for _ in 0..tasks {
            ids.push(repo.register(now).await);
        }

        // when (操作):
        let mut handles = Vec::new();
        for id in ids.clone() {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                for step in 0..updates_per_task {
                    let value = f64::from(step);
                    repo.update(
                        id,
                        state(value, id.value() as f64, &format!("map-{}", id), true, "up"),
                        now,
                    )
                    .await
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): 各 ID の最終状態はそのタスクの最後の書き込み
        let players = repo.list_players().await;
        assert_eq!(players.len(), tasks);
        for player in players {
            assert_eq!(
                player.state,
                state(
                    f64::from(updates_per_task - 1),
                    player.id.value() as f64,
                    &format!("map-{}", player.id),
                    true,
                    "up"
                )
            );
        }
    }
}
