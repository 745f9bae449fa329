//! Interactive peer of the tilerelay relay.
//!
//! Registers, keeps the sync agent running and reads commands from stdin:
//! `/move <x> <y> <map> [direction]`, `/players`, `/quit`; any other line is
//! sent as chat.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tilerelay-client -- --url http://127.0.0.1:8989
//! ```

use std::time::Duration;

use clap::Parser;

use tilerelay_client::config::{DEFAULT_RELAY_URL, MAX_QUEUE_CAPACITY, SyncConfig};
use tilerelay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tilerelay-client")]
#[command(about = "Interactive peer for the tilerelay presence and chat relay", long_about = None)]
struct Args {
    /// Relay base URL
    #[arg(short = 'u', long, default_value = DEFAULT_RELAY_URL)]
    url: String,

    /// Player and chat polling interval in milliseconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_ms: u64,

    /// Capacity of the outbound position queue
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=MAX_QUEUE_CAPACITY as u64))]
    queue_capacity: u64,
}

impl From<&Args> for SyncConfig {
    fn from(args: &Args) -> Self {
        Self {
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            queue_capacity: usize::try_from(args.queue_capacity).unwrap_or(usize::MAX),
            ..SyncConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = SyncConfig::from(&args);

    if let Err(e) = tilerelay_client::session::run_client(args.url, config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
