//! Data Transfer Objects (DTOs) for the relay.
//!
//! - `http`: request / response bodies of the HTTP API
//! - `coercion`: lenient conversion of loosely typed JSON fields
//! - `conversion`: DTO ⇔ domain entity mapping

pub mod coercion;
pub mod conversion;
pub mod http;
