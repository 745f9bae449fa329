//! Client side of the tilerelay presence and chat relay.
//!
//! [`agent::ClientSyncAgent`] decouples a game loop from network latency:
//! position updates go out through a bounded queue, and peers and chat are
//! polled into a cache that the renderer can read at any time.

pub mod agent;
pub mod api;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod session;
pub mod ui;
