//! HTTP API request / response DTOs.
//!
//! The same types are used by the server to render responses and by the
//! client to decode them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::coercion::{CoercionError, to_flag, to_float, to_integer, to_text};

/// Health check response (`GET /`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Registration response (`GET /register`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i64,
}

impl RegisterResponse {
    pub fn successful(id: i64) -> Self {
        Self {
            message: "registration successful".to_string(),
            id,
        }
    }
}

/// Public view of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerViewDto {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub map: String,
    pub moving: bool,
    pub direction: String,
}

/// Player listing (`GET /players`), keyed by the stringified id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: BTreeMap<i64, PlayerViewDto>,
}

/// One chat line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub from: String,
    pub text: String,
    pub timestamp: f64,
}

/// Chat history (`GET /chat`), oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessageDto>,
}

/// Acknowledgement of a successful POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error payload: `{"error": "<code>"}` plus `missing` for absent fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

/// Why a request body could not be turned into a request DTO
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing fields: {0:?}")]
    Missing(Vec<&'static str>),

    #[error("field '{field}' is malformed: {source}")]
    Malformed {
        field: &'static str,
        source: CoercionError,
    },
}

fn missing_fields(body: &Map<String, Value>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !body.contains_key(*field))
        .collect()
}

fn field<'a>(body: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, FieldError> {
    body.get(name)
        .ok_or_else(|| FieldError::Missing(vec![name]))
}

fn coerce<T>(
    body: &Map<String, Value>,
    name: &'static str,
    convert: fn(&Value) -> Result<T, CoercionError>,
) -> Result<T, FieldError> {
    convert(field(body, name)?).map_err(|source| FieldError::Malformed {
        field: name,
        source,
    })
}

/// Position update (`POST /players`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub map: String,
    pub moving: bool,
    pub direction: String,
}

impl UpdatePlayerRequest {
    pub const FIELDS: [&'static str; 6] = ["id", "x", "y", "map", "moving", "direction"];

    /// Coerce a loosely typed JSON object into a request
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, FieldError> {
        let missing = missing_fields(body, &Self::FIELDS);
        if !missing.is_empty() {
            return Err(FieldError::Missing(missing));
        }

        Ok(Self {
            id: coerce(body, "id", to_integer)?,
            x: coerce(body, "x", to_float)?,
            y: coerce(body, "y", to_float)?,
            map: coerce(body, "map", to_text)?,
            moving: to_flag(field(body, "moving")?),
            direction: coerce(body, "direction", to_text)?,
        })
    }
}

/// Chat post (`POST /chat`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostChatRequest {
    pub id: i64,
    pub text: String,
}

impl PostChatRequest {
    pub const FIELDS: [&'static str; 2] = ["id", "text"];

    /// Coerce a loosely typed JSON object into a request
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, FieldError> {
        let missing = missing_fields(body, &Self::FIELDS);
        if !missing.is_empty() {
            return Err(FieldError::Missing(missing));
        }

        Ok(Self {
            id: coerce(body, "id", to_integer)?,
            text: coerce(body, "text", to_text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_update_request_from_strict_json() {
        // テスト項目: 型どおりの JSON から更新リクエストが作られる
        // given (前提条件):
        let body = object(json!({
            "id": 0, "x": 1.0, "y": 2.0, "map": "town", "moving": true, "direction": "up"
        }));

        // when (操作):
        let request = UpdatePlayerRequest::from_json(&body);

        // then (期待する結果):
        assert_eq!(
            request,
            Ok(UpdatePlayerRequest {
                id: 0,
                x: 1.0,
                y: 2.0,
                map: "town".to_string(),
                moving: true,
                direction: "up".to_string(),
            })
        );
    }

    #[test]
    fn test_update_request_coerces_loose_json() {
        // テスト項目: 文字列の ID や整数座標も変換される
        // given (前提条件):
        let body = object(json!({
            "id": "3", "x": 4, "y": "5.5", "map": 7, "moving": 1, "direction": "left"
        }));

        // when (操作):
        let request = UpdatePlayerRequest::from_json(&body).unwrap();

        // then (期待する結果):
        assert_eq!(request.id, 3);
        assert_eq!(request.x, 4.0);
        assert_eq!(request.y, 5.5);
        assert_eq!(request.map, "7");
        assert!(request.moving);
    }

    #[test]
    fn test_update_request_lists_missing_fields_in_order() {
        // テスト項目: 欠けているフィールドが定義順に列挙される
        // given (前提条件):
        let body = object(json!({"x": 1.0, "y": 2.0, "moving": false}));

        // when (操作):
        let result = UpdatePlayerRequest::from_json(&body);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(FieldError::Missing(vec!["id", "map", "direction"]))
        );
    }

    #[test]
    fn test_update_request_malformed_field() {
        // テスト項目: 変換できない値は Malformed になる
        // given (前提条件):
        let body = object(json!({
            "id": 0, "x": "left", "y": 2.0, "map": "town", "moving": true, "direction": "up"
        }));

        // when (操作):
        let result = UpdatePlayerRequest::from_json(&body);

        // then (期待する結果):
        assert!(matches!(result, Err(FieldError::Malformed { field: "x", .. })));
    }

    #[test]
    fn test_chat_request_missing_and_malformed() {
        // テスト項目: チャットリクエストの欠落と不正な ID を区別できる
        // given (前提条件):
        let missing = object(json!({"id": 0}));
        let malformed = object(json!({"id": "zero", "text": "hi"}));

        // when (操作):
        let missing_result = PostChatRequest::from_json(&missing);
        let malformed_result = PostChatRequest::from_json(&malformed);

        // then (期待する結果):
        assert_eq!(missing_result, Err(FieldError::Missing(vec!["text"])));
        assert!(matches!(
            malformed_result,
            Err(FieldError::Malformed { field: "id", .. })
        ));
    }

    #[test]
    fn test_players_response_keys_are_strings_on_the_wire() {
        // テスト項目: プレイヤー一覧のキーは JSON 上で文字列になる
        // given (前提条件):
        let mut players = BTreeMap::new();
        players.insert(
            4,
            PlayerViewDto {
                id: 4,
                x: 0.0,
                y: 0.0,
                map: String::new(),
                moving: false,
                direction: "down".to_string(),
            },
        );
        let response = PlayersResponse { players };

        // when (操作):
        let encoded = serde_json::to_value(&response).unwrap();

        // then (期待する結果):
        assert_eq!(encoded["players"]["4"]["direction"], json!("down"));
    }

    #[test]
    fn test_error_response_omits_missing_when_absent() {
        // テスト項目: missing がない場合はシリアライズされない
        // given (前提条件):
        let response = ErrorResponse {
            error: "not_found".to_string(),
            missing: None,
        };

        // when (操作):
        let encoded = serde_json::to_string(&response).unwrap();

        // then (期待する結果):
        assert_eq!(encoded, r#"{"error":"not_found"}"#);
    }
}
