//! Shared utilities for the tilerelay server and client.

pub mod logger;
pub mod time;
