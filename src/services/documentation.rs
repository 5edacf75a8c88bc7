use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Wordle race backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::create_game,
        crate::routes::game::submit_guess,
        crate::routes::game::game_status,
        crate::routes::room::create_room,
        crate::routes::room::join_room,
        crate::routes::room::leave_room,
        crate::routes::room::start_room,
        crate::routes::room::submit_guess,
        crate::routes::room::room_progress,
        crate::routes::room::room_status,
        crate::routes::room::list_rooms,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::CreateGameResponse,
            crate::dto::game::GuessRequest,
            crate::dto::game::GuessResponse,
            crate::dto::game::GameStatusResponse,
            crate::dto::phase::VisibleGameStatus,
            crate::dto::phase::VisiblePlayerStatus,
            crate::dto::phase::VisibleRoomStatus,
            crate::dto::room::CreateRoomRequest,
            crate::dto::room::CreateRoomResponse,
            crate::dto::room::JoinRoomRequest,
            crate::dto::room::JoinRoomResponse,
            crate::dto::room::MessageResponse,
            crate::dto::room::RoomGuessRequest,
            crate::dto::room::PlayerProgressResponse,
            crate::dto::room::RoomProgressResponse,
            crate::dto::room::RoomStatusResponse,
            crate::dto::room::RoomListResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Single-player games"),
        (name = "room", description = "Multiplayer races with long-poll progress"),
    )
)]
/// OpenAPI document served at `/api-doc/openapi.json`.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/game/new",
            "/game/{id}/guess",
            "/room/create",
            "/room/{id}/progress",
            "/room/list",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
