//! Server execution logic.

use std::{any::Any, future::Future, sync::Arc};

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::{
    handler::{
        ApiError, get_chat, health_check, list_players, not_found, post_chat, register_player,
        update_player,
    },
    reaper::ExpiryReaper,
    signal::shutdown_signal,
    state::AppState,
};

/// Build the HTTP router of the relay
///
/// | Method | Path        | Handler           |
/// |--------|-------------|-------------------|
/// | GET    | `/`         | health check      |
/// | GET    | `/register` | register player   |
/// | GET    | `/players`  | list players      |
/// | POST   | `/players`  | update player     |
/// | GET    | `/chat`     | chat history      |
/// | POST   | `/chat`     | post chat message |
///
/// Anything else answers 404 `not_found`.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/register", get(register_player))
        .route("/players", get(list_players).post(update_player))
        .route("/chat", get(get_chat).post(post_chat))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Turn a handler panic into a 500 response instead of dropping the connection
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

/// Presence and chat relay server
///
/// This struct owns the shared state and the expiry reaper, and provides
/// methods to run them together.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, reaper);
/// server.run("0.0.0.0:8989".to_string()).await?;
/// ```
pub struct Server {
    /// Handlers 共有状態
    app_state: Arc<AppState>,
    /// 期限切れプレイヤーのバックグラウンド削除
    reaper: ExpiryReaper,
}

impl Server {
    pub fn new(app_state: Arc<AppState>, reaper: ExpiryReaper) -> Self {
        Self { app_state, reaper }
    }

    /// Run the relay until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: String) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// The reaper runs for exactly as long as the listener does.
    pub async fn serve<F>(mut self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.reaper.start();

        let app = build_router(self.app_state.clone());
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        self.reaper.stop().await;
        tracing::info!("Server shutdown complete");

        result
    }
}
