use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Single-player game routes.
pub mod game;
/// Health check route.
pub mod health;
/// Multiplayer room routes.
pub mod room;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game::router())
        .merge(room::router())
        .merge(docs::router())
        .with_state(state)
}
