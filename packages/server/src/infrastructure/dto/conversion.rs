//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, PlayerId, PlayerSnapshot, PlayerState, Position};
use crate::infrastructure::dto::http as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl dto::UpdatePlayerRequest {
    /// Split into the target id and the new state
    pub fn into_domain(self) -> (PlayerId, PlayerState) {
        (
            PlayerId::new(self.id),
            PlayerState {
                position: Position::new(self.x, self.y),
                map: self.map,
                moving: self.moving,
                direction: self.direction,
            },
        )
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<PlayerSnapshot> for dto::PlayerViewDto {
    fn from(snapshot: PlayerSnapshot) -> Self {
        Self {
            id: snapshot.id.value(),
            x: snapshot.state.position.x,
            y: snapshot.state.position.y,
            map: snapshot.state.map,
            moving: snapshot.state.moving,
            direction: snapshot.state.direction,
        }
    }
}

impl From<Vec<PlayerSnapshot>> for dto::PlayersResponse {
    fn from(snapshots: Vec<PlayerSnapshot>) -> Self {
        Self {
            players: snapshots
                .into_iter()
                .map(|snapshot| (snapshot.id.value(), snapshot.into()))
                .collect(),
        }
    }
}

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            from: message.from,
            text: message.text.into_string(),
            timestamp: message.timestamp,
        }
    }
}

impl From<Vec<ChatMessage>> for dto::ChatResponse {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageText;

    #[test]
    fn test_update_request_to_domain() {
        // テスト項目: 更新リクエストが ID と PlayerState に分解される
        // given (前提条件):
        let request = dto::UpdatePlayerRequest {
            id: 2,
            x: 1.5,
            y: -3.0,
            map: "forest".to_string(),
            moving: true,
            direction: "left".to_string(),
        };

        // when (操作):
        let (id, state) = request.into_domain();

        // then (期待する結果):
        assert_eq!(id, PlayerId::new(2));
        assert_eq!(state.position, Position::new(1.5, -3.0));
        assert_eq!(state.map, "forest");
        assert!(state.moving);
        assert_eq!(state.direction, "left");
    }

    #[test]
    fn test_snapshots_to_players_response() {
        // テスト項目: スナップショット一覧が ID をキーとするマップに変換される
        // given (前提条件):
        let snapshots = vec![
            PlayerSnapshot {
                id: PlayerId::new(0),
                state: PlayerState::default(),
            },
            PlayerSnapshot {
                id: PlayerId::new(5),
                state: PlayerState {
                    position: Position::new(1.0, 2.0),
                    map: "town".to_string(),
                    moving: true,
                    direction: "up".to_string(),
                },
            },
        ];

        // when (操作):
        let response: dto::PlayersResponse = snapshots.into();

        // then (期待する結果):
        assert_eq!(response.players.len(), 2);
        assert_eq!(response.players[&0].direction, "down");
        assert_eq!(response.players[&5].map, "town");
        assert_eq!(response.players[&5].id, 5);
    }

    #[test]
    fn test_chat_message_to_dto() {
        // テスト項目: チャットメッセージが DTO に変換される
        // given (前提条件):
        let message = ChatMessage::from_player(
            PlayerId::new(0),
            MessageText::new("hi".to_string(), 10).unwrap(),
            100.25,
        );

        // when (操作):
        let dto: dto::ChatMessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto.from, "Player 0");
        assert_eq!(dto.text, "hi");
        assert_eq!(dto.timestamp, 100.25);
    }
}
