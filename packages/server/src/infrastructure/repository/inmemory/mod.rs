//! InMemory repository implementations.

mod presence;

pub use presence::InMemoryPresenceRepository;
