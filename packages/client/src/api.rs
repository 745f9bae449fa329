//! HTTP access to the relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tilerelay_server::infrastructure::dto::http::{
    ChatResponse, PlayersResponse, PostChatRequest, RegisterResponse, UpdatePlayerRequest,
};

use crate::error::ClientError;

/// Timeout of registration, polling and position updates
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout of a chat post
const CHAT_SEND_TIMEOUT: Duration = Duration::from_secs(3);

/// Relay operations used by the sync agent
#[async_trait]
pub trait RelayApi: Send + Sync {
    /// `GET /register`, returning the allocated player id
    async fn register(&self) -> Result<i64, ClientError>;

    /// `POST /players`
    async fn update_player(&self, request: &UpdatePlayerRequest) -> Result<(), ClientError>;

    /// `GET /players`
    async fn fetch_players(&self) -> Result<PlayersResponse, ClientError>;

    /// `POST /chat`
    async fn send_chat(&self, request: &PostChatRequest) -> Result<(), ClientError>;

    /// `GET /chat`
    async fn fetch_chat(&self) -> Result<ChatResponse, ClientError>;
}

/// [`RelayApi`] over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpRelayApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRelayApi {
    /// Create a client for the relay at `base_url` (e.g. "http://127.0.0.1:8989")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(request: RequestBuilder, timeout: Duration) -> Result<Response, ClientError> {
        let response = request.timeout(timeout).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = Self::send(self.http.get(self.url(path)), REQUEST_TIMEOUT).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RelayApi for HttpRelayApi {
    async fn register(&self) -> Result<i64, ClientError> {
        let response: RegisterResponse = self.get_json("/register").await?;
        Ok(response.id)
    }

    async fn update_player(&self, request: &UpdatePlayerRequest) -> Result<(), ClientError> {
        Self::send(
            self.http.post(self.url("/players")).json(request),
            REQUEST_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn fetch_players(&self) -> Result<PlayersResponse, ClientError> {
        self.get_json("/players").await
    }

    async fn send_chat(&self, request: &PostChatRequest) -> Result<(), ClientError> {
        Self::send(
            self.http.post(self.url("/chat")).json(request),
            CHAT_SEND_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn fetch_chat(&self) -> Result<ChatResponse, ClientError> {
        self.get_json("/chat").await
    }
}
