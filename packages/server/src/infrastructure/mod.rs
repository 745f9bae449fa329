//! Infrastructure 層
//!
//! Concrete repository implementations and wire DTOs.

pub mod dto;
pub mod repository;
