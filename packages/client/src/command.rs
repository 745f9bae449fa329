//! Parsing of interactive input lines.

use thiserror::Error;
use tilerelay_server::domain::DEFAULT_DIRECTION;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/move <x> <y> <map> [direction]`
    Move {
        x: f64,
        y: f64,
        map: String,
        direction: String,
    },
    /// `/players`
    Players,
    /// `/quit`
    Quit,
    /// Anything else is sent as chat
    Chat(String),
    /// Blank line
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("usage: /move <x> <y> <map> [direction]")]
    MoveUsage,
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

fn parse_coordinate(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::NotANumber(raw.to_string()))
}

/// Parse one line typed by the user.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }

    let mut words = trimmed.split_whitespace();
    match words.next() {
        Some("/quit") => Ok(Command::Quit),
        Some("/players") => Ok(Command::Players),
        Some("/move") => {
            let args: Vec<&str> = words.collect();
            if !(3..=4).contains(&args.len()) {
                return Err(CommandError::MoveUsage);
            }
            Ok(Command::Move {
                x: parse_coordinate(args[0])?,
                y: parse_coordinate(args[1])?,
                map: args[2].to_string(),
                direction: args
                    .get(3)
                    .map_or(DEFAULT_DIRECTION, |direction| *direction)
                    .to_string(),
            })
        }
        _ => Ok(Command::Chat(trimmed.to_string())),
    }
}
