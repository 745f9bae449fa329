//! Presence and chat relay server.
//!
//! Tracks live players and a shared chat feed for polling game clients, and
//! evicts players whose position has not changed within the TTL.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tilerelay-server
//! cargo run --bin tilerelay-server -- --host 127.0.0.1 --port 9000 --ttl-secs 120
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tilerelay_server::{
    config::{DEFAULT_PORT, RelayConfig},
    infrastructure::repository::InMemoryPresenceRepository,
    ui::{AppState, ExpiryReaper, Server},
    usecase::ReapInactivePlayersUseCase,
};
use tilerelay_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tilerelay-server")]
#[command(about = "Presence and chat relay for tile-based multiplayer games", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds without a position or map change before a player is evicted
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    ttl_secs: u64,

    /// Seconds between expiry sweeps
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    reap_interval_secs: u64,

    /// Number of chat messages kept
    #[arg(long, default_value_t = 50)]
    chat_capacity: usize,

    /// Maximum chat message length in characters
    #[arg(long, default_value_t = 500)]
    max_chat_chars: usize,
}

impl From<Args> for RelayConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            player_ttl: Duration::from_secs(args.ttl_secs),
            reap_interval: Duration::from_secs(args.reap_interval_secs),
            chat_capacity: args.chat_capacity,
            max_chat_chars: args.max_chat_chars,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = RelayConfig::from(Args::parse());
    tracing::debug!("Configuration: {:?}", config);

    // Initialize dependencies in order:
    // 1. Clock and Repository
    // 2. UseCases (AppState)
    // 3. Expiry reaper
    // 4. Server

    // 1. Create Repository (in-memory store)
    let clock = Arc::new(SystemClock);
    let repository = Arc::new(InMemoryPresenceRepository::with_chat_capacity(
        config.chat_capacity,
    ));

    // 2. Create UseCases
    let app_state = Arc::new(AppState::new(repository.clone(), clock.clone(), &config));

    // 3. Create the expiry reaper
    let reap_usecase = Arc::new(ReapInactivePlayersUseCase::new(
        repository,
        clock,
        config.player_ttl,
    ));
    let reaper = ExpiryReaper::new(reap_usecase, config.reap_interval);

    // 4. Create and run the server
    let server = Server::new(app_state, reaper);
    if let Err(e) = server.run(config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
