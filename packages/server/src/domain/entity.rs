//! Entities: players and chat history.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use super::{MessageText, PlayerId, Position};

/// Facing direction assigned to freshly registered players
pub const DEFAULT_DIRECTION: &str = "down";

/// Mutable part of a player, as submitted by clients
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    pub map: String,
    pub moving: bool,
    pub direction: String,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Position::default(),
            map: String::new(),
            moving: false,
            direction: DEFAULT_DIRECTION.to_string(),
        }
    }
}

/// A live player tracked by the relay
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub state: PlayerState,
    /// 位置またはマップが最後に変化した時刻
    last_update: Instant,
}

impl Player {
    /// Create a player in the default state
    pub fn new(id: PlayerId, now: Instant) -> Self {
        Self {
            id,
            state: PlayerState::default(),
            last_update: now,
        }
    }

    /// Overwrite the state with `next`.
    ///
    /// The inactivity clock restarts only when the position or the map
    /// changes. Changes to `moving` or `direction` alone do not count as
    /// activity.
    pub fn apply(&mut self, next: PlayerState, now: Instant) {
        if next.position != self.state.position || next.map != self.state.map {
            self.last_update = now;
        }
        self.state = next;
    }

    pub fn last_update(&self) -> Instant {
        self.last_update
    }

    /// `true` once at least `ttl` has passed since the last position/map change
    pub fn is_inactive(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_update) >= ttl
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            state: self.state.clone(),
        }
    }
}

/// Public copy of a player, without bookkeeping fields
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub state: PlayerState,
}

/// A chat message as received by the relay
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub from: String,
    pub text: MessageText,
    /// Unix time of receipt, in seconds
    pub timestamp: f64,
}

impl ChatMessage {
    pub fn from_player(id: PlayerId, text: MessageText, timestamp: f64) -> Self {
        Self {
            from: id.display_label(),
            text,
            timestamp,
        }
    }
}

/// Bounded FIFO of chat messages; the oldest message is evicted first
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatLog {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, evicting from the front while over capacity
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// Copy of the log, oldest first
    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
