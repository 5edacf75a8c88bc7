/// OpenAPI documentation generation.
pub mod documentation;
/// Single-player games.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Multiplayer rooms: lobby, race, and long-poll progress.
pub mod room_service;
