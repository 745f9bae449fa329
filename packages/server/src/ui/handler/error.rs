//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    infrastructure::dto::http::{ErrorResponse, FieldError},
    usecase::{PostChatError, UpdatePlayerError},
};

/// Every error the HTTP API can answer with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("route not found")]
    NotFound,

    #[error("request body is not a JSON object")]
    InvalidJson,

    /// Position update with absent (`missing` is set) or malformed fields
    #[error("bad player fields")]
    BadFields { missing: Option<Vec<String>> },

    #[error("player not found")]
    PlayerNotFound,

    #[error("chat post is missing fields")]
    MissingFields,

    #[error("chat post is malformed")]
    BadFormat,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Machine-readable error code sent as `{"error": ...}`
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidJson => "invalid_json",
            Self::BadFields { .. } => "bad_fields",
            Self::PlayerNotFound => "player_not_found",
            Self::MissingFields => "missing_fields",
            Self::BadFormat => "bad_format",
            Self::Internal => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::PlayerNotFound => StatusCode::NOT_FOUND,
            Self::InvalidJson | Self::BadFields { .. } | Self::MissingFields | Self::BadFormat => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a position-update parsing failure
    pub fn from_player_fields(error: FieldError) -> Self {
        match error {
            FieldError::Missing(fields) => Self::BadFields {
                missing: Some(fields.into_iter().map(str::to_string).collect()),
            },
            FieldError::Malformed { .. } => Self::BadFields { missing: None },
        }
    }

    /// Map a chat-post parsing failure
    pub fn from_chat_fields(error: FieldError) -> Self {
        match error {
            FieldError::Missing(_) => Self::MissingFields,
            FieldError::Malformed { .. } => Self::BadFormat,
        }
    }
}

impl From<UpdatePlayerError> for ApiError {
    fn from(error: UpdatePlayerError) -> Self {
        match error {
            UpdatePlayerError::PlayerNotFound(_) => Self::PlayerNotFound,
        }
    }
}

impl From<PostChatError> for ApiError {
    fn from(error: PostChatError) -> Self {
        match error {
            PostChatError::InvalidText(_) => Self::BadFormat,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.code().to_string(),
            missing: match self {
                Self::BadFields { missing } => missing,
                _ => None,
            },
        };
        (status, Json(body)).into_response()
    }
}
