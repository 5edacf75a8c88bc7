use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness together with the size of the in-memory tables.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.rooms().len(), state.games().len())
}
