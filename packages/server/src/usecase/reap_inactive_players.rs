//! UseCase: 非アクティブなプレイヤーの削除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReapInactivePlayersUseCase::execute() のスイープ処理
//!
//! ### なぜこのテストが必要か
//! - TTL は位置・マップの変化でのみリセットされる。向きや移動フラグだけの
//!   更新ではリセットされないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：TTL 経過後の削除
//! - 境界：最後の位置変化から 59 秒 / 61 秒

use std::{sync::Arc, time::Duration};

use tilerelay_shared::time::Clock;

use crate::domain::{PlayerId, PresenceRepository};

/// 非アクティブプレイヤー削除のユースケース
pub struct ReapInactivePlayersUseCase {
    repository: Arc<dyn PresenceRepository>,
    clock: Arc<dyn Clock>,
    /// 最後の位置・マップ変化からこの時間が経過したプレイヤーを削除
    ttl: Duration,
}

impl ReapInactivePlayersUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Run one sweep and return the evicted ids
    pub async fn execute(&self) -> Vec<PlayerId> {
        let evicted = self
            .repository
            .evict_inactive(self.clock.now(), self.ttl)
            .await;
        for id in &evicted {
            tracing::info!(player_id = %id, "Player expired after {:?} of inactivity", self.ttl);
        }
        if !evicted.is_empty() {
            tracing::debug!(
                "Sweep evicted {} player(s), {} remain",
                evicted.len(),
                self.repository.count_players().await
            );
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockPresenceRepository, PlayerState, Position};
    use crate::infrastructure::repository::InMemoryPresenceRepository;
    use tilerelay_shared::time::ManualClock;

    const TTL: Duration = Duration::from_secs(60);

    fn setup() -> (
        ReapInactivePlayersUseCase,
        Arc<InMemoryPresenceRepository>,
        Arc<ManualClock>,
    ) {
        let repository = Arc::new(InMemoryPresenceRepository::new());
        let clock = Arc::new(ManualClock::default());
        let usecase = ReapInactivePlayersUseCase::new(repository.clone(), clock.clone(), TTL);
        (usecase, repository, clock)
    }

    fn state_at(x: f64, direction: &str) -> PlayerState {
        PlayerState {
            position: Position::new(x, 0.0),
            map: "town".to_string(),
            moving: false,
            direction: direction.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sweep_past_ttl_removes_player() {
        // テスト項目: TTL を過ぎたプレイヤーがスイープで削除される
        // given (前提条件):
        let (usecase, repository, clock) = setup();
        let id = repository.register(clock.now()).await;

        // when (操作):
        clock.set_elapsed(Duration::from_secs(61));
        let evicted = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(evicted, vec![id]);
        assert!(repository.list_players().await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_before_ttl_keeps_player() {
        // テスト項目: TTL 前のスイープではプレイヤーは残る
        // given (前提条件):
        let (usecase, repository, clock) = setup();
        repository.register(clock.now()).await;

        // when (操作):
        clock.set_elapsed(Duration::from_secs(59));
        let evicted = usecase.execute().await;

        // then (期待する結果):
        assert!(evicted.is_empty());
        assert_eq!(repository.count_players().await, 1);
    }

    #[tokio::test]
    async fn test_position_change_resets_ttl() {
        // テスト項目: t=30s の位置変化後、t=89s では残り、t=91s で削除される
        // given (前提条件):
        let (usecase, repository, clock) = setup();
        let id = repository.register(clock.now()).await;
        clock.set_elapsed(Duration::from_secs(30));
        repository
            .update(id, state_at(5.0, "down"), clock.now())
            .await
            .unwrap();

        // when (操作):
        clock.set_elapsed(Duration::from_secs(89));
        let at_89 = usecase.execute().await;
        clock.set_elapsed(Duration::from_secs(91));
        let at_91 = usecase.execute().await;

        // then (期待する結果):
        assert!(at_89.is_empty());
        assert_eq!(at_91, vec![id]);
    }

    #[tokio::test]
    async fn test_direction_only_change_does_not_reset_ttl() {
        // テスト項目: 向きだけの更新では TTL はリセットされない
        // given (前提条件):
        let (usecase, repository, clock) = setup();
        let id = repository.register(clock.now()).await;
        clock.set_elapsed(Duration::from_secs(10));
        repository
            .update(id, state_at(5.0, "down"), clock.now())
            .await
            .unwrap();

        // when (操作): t=50s に向きだけを変え、t=70s にスイープ
        clock.set_elapsed(Duration::from_secs(50));
        repository
            .update(id, state_at(5.0, "left"), clock.now())
            .await
            .unwrap();
        clock.set_elapsed(Duration::from_secs(70));
        let evicted = usecase.execute().await;

        // then (期待する結果): 最後の位置変化 (t=10s) から 60 秒経過しているので削除
        assert_eq!(evicted, vec![id]);
    }

    #[tokio::test]
    async fn test_empty_sweep_does_not_count_players() {
        // テスト項目: 何も削除しなかった場合は件数取得を行わない
        // given (前提条件):
        let mut repository = MockPresenceRepository::new();
        repository
            .expect_evict_inactive()
            .times(1)
            .returning(|_, _| Vec::new());
        repository.expect_count_players().never();
        let usecase = ReapInactivePlayersUseCase::new(
            Arc::new(repository),
            Arc::new(ManualClock::default()),
            TTL,
        );

        // when (操作):
        let evicted = usecase.execute().await;

        // then (期待する結果):
        assert!(evicted.is_empty());
    }
}
