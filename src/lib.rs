//! Library crate for wordle-race-back, exposing modules for binaries and integration tests.

pub mod config;
/// Wire types for the HTTP API.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Axum routers and handlers.
pub mod routes;
/// Use cases behind the handlers.
pub mod services;
/// Rooms, games, and the shared application state.
pub mod state;
