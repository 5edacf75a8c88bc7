use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests.
    pub status: String,
    /// Rooms created since startup.
    pub rooms: usize,
    /// Single-player games created since startup.
    pub games: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(rooms: usize, games: usize) -> Self {
        Self {
            status: "ok".to_string(),
            rooms,
            games,
        }
    }
}
