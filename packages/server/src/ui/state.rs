//! Server state shared by the HTTP handlers.

use std::sync::Arc;

use tilerelay_shared::time::Clock;

use crate::{
    config::RelayConfig,
    domain::PresenceRepository,
    usecase::{
        GetChatUseCase, ListPlayersUseCase, PostChatUseCase, RegisterPlayerUseCase,
        UpdatePlayerUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// RegisterPlayerUseCase（プレイヤー登録のユースケース）
    pub register_player_usecase: Arc<RegisterPlayerUseCase>,
    /// UpdatePlayerUseCase（プレイヤー状態更新のユースケース）
    pub update_player_usecase: Arc<UpdatePlayerUseCase>,
    /// ListPlayersUseCase（プレイヤー一覧取得のユースケース）
    pub list_players_usecase: Arc<ListPlayersUseCase>,
    /// PostChatUseCase（チャット投稿のユースケース）
    pub post_chat_usecase: Arc<PostChatUseCase>,
    /// GetChatUseCase（チャット履歴取得のユースケース）
    pub get_chat_usecase: Arc<GetChatUseCase>,
}

impl AppState {
    /// Wire every request-facing use case to the same repository and clock
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        clock: Arc<dyn Clock>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            register_player_usecase: Arc::new(RegisterPlayerUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            update_player_usecase: Arc::new(UpdatePlayerUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            list_players_usecase: Arc::new(ListPlayersUseCase::new(repository.clone())),
            post_chat_usecase: Arc::new(PostChatUseCase::new(
                repository.clone(),
                clock,
                config.max_chat_chars,
            )),
            get_chat_usecase: Arc::new(GetChatUseCase::new(repository)),
        }
    }
}
