//! Client sync agent.
//!
//! The agent runs two background loops on the Tokio runtime it was created in:
//!
//! - the sender loop drains a bounded queue of position updates and posts each
//!   one to the relay, dropping it on failure
//! - the fetch loop polls players and chat and publishes them into `watch`
//!   channels that always hold the latest snapshot
//!
//! None of the caller-facing methods except `register`, `enter`, `start`,
//! `stop` and `exit` await; a game loop can call `update`, `players` and
//! `chat_history` every frame.

use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use tilerelay_server::infrastructure::dto::http::{
    ChatMessageDto, PlayerViewDto, PostChatRequest, UpdatePlayerRequest,
};
use tokio::{
    runtime::Handle,
    sync::{
        Mutex,
        mpsc::{self, error::TrySendError},
        watch,
    },
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at, timeout},
};
use tracing::{debug, info, trace, warn};

use crate::{
    api::RelayApi,
    config::{MAX_QUEUE_CAPACITY, SyncConfig},
    domain::{UNREGISTERED, last_messages, peers_of},
    error::ClientError,
};

/// Number of messages shown when the caller has no preference
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 20;

/// A queued position update
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub x: f64,
    pub y: f64,
    pub map: String,
    pub moving: bool,
    pub direction: String,
}

/// State shared between the agent and its loops
struct SyncShared {
    api: Arc<dyn RelayApi>,
    player_id: AtomicI64,
    players: watch::Sender<Vec<PlayerViewDto>>,
    chat: watch::Sender<Vec<ChatMessageDto>>,
}

impl SyncShared {
    fn player_id(&self) -> i64 {
        self.player_id.load(Ordering::Acquire)
    }

    async fn push_update(&self, update: PositionUpdate) {
        let id = self.player_id();
        if id == UNREGISTERED {
            return;
        }

        let request = UpdatePlayerRequest {
            id,
            x: update.x,
            y: update.y,
            map: update.map,
            moving: update.moving,
            direction: update.direction,
        };
        match self.api.update_player(&request).await {
            Ok(()) => trace!("Position of player {} sent", id),
            Err(e) => warn!("Online update error: {}", e),
        }
    }

    async fn refresh_players(&self) {
        match self.api.fetch_players().await {
            Ok(response) => {
                self.players
                    .send_replace(peers_of(response, self.player_id()));
            }
            Err(e) => warn!("Player fetch error: {}", e),
        }
    }

    async fn refresh_chat(&self) {
        match self.api.fetch_chat().await {
            Ok(response) => {
                self.chat.send_replace(response.messages);
            }
            Err(e) if e.is_transient() => trace!("Chat fetch skipped: {}", e),
            Err(e) => warn!("Chat fetch error: {}", e),
        }
    }
}

/// Handles of the running loops
struct SyncLoops {
    stop_tx: watch::Sender<bool>,
    sender: JoinHandle<()>,
    fetcher: JoinHandle<()>,
}

impl SyncLoops {
    fn is_running(&self) -> bool {
        !self.sender.is_finished() && !self.fetcher.is_finished()
    }

    async fn shutdown(self, join_timeout: Duration) {
        // Loops that already exited dropped their receivers
        let _ = self.stop_tx.send(true);
        join_or_abort("Sender", self.sender, join_timeout).await;
        join_or_abort("Fetch", self.fetcher, join_timeout).await;
    }
}

async fn join_or_abort(name: &str, mut handle: JoinHandle<()>, limit: Duration) {
    match timeout(limit, &mut handle).await {
        Ok(Ok(())) => debug!("{} loop stopped", name),
        Ok(Err(e)) => warn!("{} loop ended abnormally: {}", name, e),
        Err(_) => {
            warn!("{} loop did not stop within {:?}, aborting", name, limit);
            handle.abort();
        }
    }
}

async fn run_sender(
    shared: Arc<SyncShared>,
    queue: Arc<Mutex<mpsc::Receiver<PositionUpdate>>>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut queue = queue.lock().await;
    loop {
        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            update = queue.recv() => match update {
                Some(update) => shared.push_update(update).await,
                None => break,
            },
        }
    }
}

async fn run_fetcher(
    shared: Arc<SyncShared>,
    poll_interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                shared.refresh_players().await;
                shared.refresh_chat().await;
            }
        }
    }
}

/// Per-client synchronization with the relay
pub struct ClientSyncAgent {
    shared: Arc<SyncShared>,
    config: SyncConfig,
    runtime: Handle,
    update_tx: mpsc::Sender<PositionUpdate>,
    // Outlives the loops so a restarted sender keeps draining the same queue
    update_rx: Arc<Mutex<mpsc::Receiver<PositionUpdate>>>,
    loops: Mutex<Option<SyncLoops>>,
}

impl ClientSyncAgent {
    /// Create an agent bound to the current Tokio runtime.
    ///
    /// The queue capacity is clamped to `1..=MAX_QUEUE_CAPACITY`.
    ///
    /// # Errors
    ///
    /// [`ClientError::RuntimeUnavailable`] when called outside of a runtime.
    pub fn new(api: Arc<dyn RelayApi>, config: SyncConfig) -> Result<Self, ClientError> {
        let runtime =
            Handle::try_current().map_err(|e| ClientError::RuntimeUnavailable(e.to_string()))?;

        let config = SyncConfig {
            poll_interval: config.poll_interval.max(Duration::from_millis(1)),
            queue_capacity: config.queue_capacity.clamp(1, MAX_QUEUE_CAPACITY),
            ..config
        };
        let (update_tx, update_rx) = mpsc::channel(config.queue_capacity);
        let (players, _) = watch::channel(Vec::new());
        let (chat, _) = watch::channel(Vec::new());

        Ok(Self {
            shared: Arc::new(SyncShared {
                api,
                player_id: AtomicI64::new(UNREGISTERED),
                players,
                chat,
            }),
            config,
            runtime,
            update_tx,
            update_rx: Arc::new(Mutex::new(update_rx)),
            loops: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Player id assigned by the relay, [`UNREGISTERED`] before registration
    pub fn player_id(&self) -> i64 {
        self.shared.player_id()
    }

    pub fn is_registered(&self) -> bool {
        self.player_id() != UNREGISTERED
    }

    /// Ask the relay for a player id and remember it.
    pub async fn register(&self) -> Result<i64, ClientError> {
        match self.shared.api.register().await {
            Ok(id) => {
                self.shared.player_id.store(id, Ordering::Release);
                info!("Registered as player {}", id);
                Ok(id)
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Register, then start the loops.
    ///
    /// The loops are started even when registration fails, so peers and chat
    /// are still visible; the registration result is returned.
    pub async fn enter(&self) -> Result<i64, ClientError> {
        let registered = self.register().await;
        self.start().await;
        registered
    }

    /// Stop the loops.
    pub async fn exit(&self) {
        self.stop().await;
    }

    /// Whether both loops are alive
    pub async fn is_running(&self) -> bool {
        self.loops
            .lock()
            .await
            .as_ref()
            .is_some_and(SyncLoops::is_running)
    }

    /// Start the sender and fetch loops. No-op when they are already running.
    pub async fn start(&self) {
        let mut loops = self.loops.lock().await;
        if loops.as_ref().is_some_and(SyncLoops::is_running) {
            debug!("Sync loops already running");
            return;
        }
        if let Some(stale) = loops.take() {
            stale.shutdown(self.config.join_timeout).await;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let sender = self.runtime.spawn(run_sender(
            Arc::clone(&self.shared),
            Arc::clone(&self.update_rx),
            stop_rx.clone(),
        ));
        let fetcher = self.runtime.spawn(run_fetcher(
            Arc::clone(&self.shared),
            self.config.poll_interval,
            stop_rx,
        ));
        *loops = Some(SyncLoops {
            stop_tx,
            sender,
            fetcher,
        });
        info!(
            "Sync loops started (poll every {:?})",
            self.config.poll_interval
        );
    }

    /// Stop both loops, waiting at most `join_timeout` for each before
    /// aborting it. No-op when nothing is running.
    pub async fn stop(&self) {
        let Some(loops) = self.loops.lock().await.take() else {
            return;
        };
        loops.shutdown(self.config.join_timeout).await;
        info!("Sync loops stopped");
    }

    /// Queue a position update without blocking.
    ///
    /// Returns `false` when the agent is not registered or the queue is full;
    /// the update is dropped in both cases.
    pub fn update(
        &self,
        x: f64,
        y: f64,
        map: impl Into<String>,
        moving: bool,
        direction: impl Into<String>,
    ) -> bool {
        if !self.is_registered() {
            return false;
        }

        let update = PositionUpdate {
            x,
            y,
            map: map.into(),
            moving,
            direction: direction.into(),
        };
        match self.update_tx.try_send(update) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("Update queue full, dropping position update");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Latest snapshot of the other players
    pub fn players(&self) -> Vec<PlayerViewDto> {
        self.shared.players.borrow().clone()
    }

    /// The last `limit` chat messages of the latest snapshot, oldest first
    pub fn chat_history(&self, limit: usize) -> Vec<ChatMessageDto> {
        last_messages(&self.shared.chat.borrow(), limit)
    }

    /// Receiver notified on every chat snapshot
    pub fn subscribe_chat(&self) -> watch::Receiver<Vec<ChatMessageDto>> {
        self.shared.chat.subscribe()
    }

    /// Post a chat message in the background.
    ///
    /// Returns `true` once the post is dispatched, not when it is delivered.
    /// Returns `false` when the agent is not registered.
    pub fn send_chat(&self, text: impl Into<String>) -> bool {
        let id = self.player_id();
        if id == UNREGISTERED {
            return false;
        }

        let request = PostChatRequest {
            id,
            text: text.into(),
        };
        let api = Arc::clone(&self.shared.api);
        self.runtime.spawn(async move {
            if let Err(e) = api.send_chat(&request).await {
                warn!("Chat send error: {}", e);
            }
        });
        true
    }
}
