//! Value objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValueObjectError;

/// Player identifier, allocated by the relay starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(i64);

impl PlayerId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Label shown as the sender of chat messages
    pub fn display_label(&self) -> String {
        format!("Player {}", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World coordinates of a player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Chat text bounded by a character limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    /// Default upper bound on chat text length, in characters
    pub const DEFAULT_MAX_CHARS: usize = 500;

    /// Validate `value` against `max_chars`. Empty text is allowed.
    pub fn new(value: String, max_chars: usize) -> Result<Self, ValueObjectError> {
        let actual = value.chars().count();
        if actual > max_chars {
            return Err(ValueObjectError::MessageTooLong {
                actual,
                limit: max_chars,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
