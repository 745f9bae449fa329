//! Presence and chat relay server library.
//!
//! This library tracks ephemeral player state (position, map, facing
//! direction) and a bounded chat feed for many polling game clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
