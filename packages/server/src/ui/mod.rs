//! UI 層
//!
//! HTTP endpoints, the server runner and the background expiry reaper.

mod handler;
mod reaper;
mod server;
mod signal;
pub mod state;

pub use handler::ApiError;
pub use reaper::ExpiryReaper;
pub use server::{Server, build_router};
pub use state::AppState;
