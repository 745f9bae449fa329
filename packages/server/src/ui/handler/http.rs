//! HTTP API endpoint handlers.
//!
//! POST bodies are taken as raw bytes so that malformed JSON is answered with
//! `invalid_json` rather than an extractor rejection. A body the extractor
//! cannot buffer (e.g. over the body size limit) is answered with the
//! endpoint's own error code as well.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, Uri},
};
use serde_json::{Map, Value};

use crate::{
    domain::PlayerId,
    infrastructure::dto::http::{
        ChatResponse, HealthResponse, PlayersResponse, PostChatRequest, RegisterResponse,
        SuccessResponse, UpdatePlayerRequest,
    },
    ui::state::AppState,
};

use super::error::ApiError;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Register a new player
pub async fn register_player(State(state): State<Arc<AppState>>) -> Json<RegisterResponse> {
    let id = state.register_player_usecase.execute().await;
    Json(RegisterResponse::successful(id.value()))
}

/// List every live player
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<PlayersResponse> {
    let players = state.list_players_usecase.execute().await;
    Json(players.into())
}

/// Get the chat history, oldest first
pub async fn get_chat(State(state): State<Arc<AppState>>) -> Json<ChatResponse> {
    let messages = state.get_chat_usecase.execute().await;
    Json(messages.into())
}

/// Update the state of a live player
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!("Unreadable player update body: {}", rejection);
        ApiError::InvalidJson
    })?;
    let payload = parse_json_object(&body)?;
    let request = UpdatePlayerRequest::from_json(&payload).map_err(|e| {
        tracing::debug!("Rejected player update: {}", e);
        ApiError::from_player_fields(e)
    })?;

    let (id, player_state) = request.into_domain();
    state
        .update_player_usecase
        .execute(id, player_state)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Append a chat message
pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!("Unreadable chat body: {}", rejection);
        ApiError::BadFormat
    })?;
    let payload = parse_json_object(&body)?;
    let request = PostChatRequest::from_json(&payload).map_err(|e| {
        tracing::debug!("Rejected chat post: {}", e);
        ApiError::from_chat_fields(e)
    })?;

    state
        .post_chat_usecase
        .execute(PlayerId::new(request.id), request.text)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Fallback for unknown paths and methods
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    tracing::debug!("No route for {} {}", method, uri);
    ApiError::NotFound
}

fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::InvalidJson),
        Err(e) => {
            tracing::debug!("Invalid JSON body: {}", e);
            Err(ApiError::InvalidJson)
        }
    }
}
