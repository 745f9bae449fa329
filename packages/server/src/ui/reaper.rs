//! Background expiry of inactive players.
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! ```

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::usecase::ReapInactivePlayersUseCase;

/// How long `stop` waits for the sweep task before aborting it
const JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Shortest accepted sweep period
const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct RunningReaper {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodically runs [`ReapInactivePlayersUseCase`] on a fixed interval
///
/// The first sweep happens one interval after `start`. The interval is
/// independent of the TTL itself.
pub struct ExpiryReaper {
    usecase: Arc<ReapInactivePlayersUseCase>,
    interval: Duration,
    running: Option<RunningReaper>,
}

impl ExpiryReaper {
    pub fn new(usecase: Arc<ReapInactivePlayersUseCase>, interval: Duration) -> Self {
        Self {
            usecase,
            interval: interval.max(MIN_INTERVAL),
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Spawn the sweep loop on the current Tokio runtime. No-op when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            tracing::debug!("Expiry reaper already running");
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_sweeps(self.usecase.clone(), self.interval, stop_rx));
        self.running = Some(RunningReaper { stop_tx, handle });
        tracing::info!(
            "Expiry reaper started (interval {:?}, ttl {:?})",
            self.interval,
            self.usecase.ttl()
        );
    }

    /// Signal the loop to stop and wait for it, at most [`JOIN_TIMEOUT`].
    ///
    /// A sweep that does not finish in time is aborted.
    pub async fn stop(&mut self) {
        let Some(RunningReaper {
            stop_tx,
            mut handle,
        }) = self.running.take()
        else {
            return;
        };

        // 受信側が既に終了していても問題ない
        let _ = stop_tx.send(true);

        match tokio::time::timeout(JOIN_TIMEOUT, &mut handle).await {
            Ok(Ok(())) => tracing::info!("Expiry reaper stopped"),
            Ok(Err(e)) => tracing::warn!("Expiry reaper ended abnormally: {}", e),
            Err(_) => {
                tracing::warn!(
                    "Expiry reaper did not stop within {:?}, aborting",
                    JOIN_TIMEOUT
                );
                handle.abort();
            }
        }
    }
}

async fn run_sweeps(
    usecase: Arc<ReapInactivePlayersUseCase>,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
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
                usecase.execute().await;
            }
        }
    }
}
