use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        game::GuessResponse,
        room::{
            CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, JoinRoomResponse,
            MessageResponse, PlayerQuery, ProgressQuery, RoomGuessRequest, RoomListResponse,
            RoomProgressResponse, RoomStatusResponse,
        },
    },
    error::AppError,
    services::room_service,
    state::SharedState,
};

/// Routes serving multiplayer rooms.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/room/create", post(create_room))
        .route("/room/list", get(list_rooms))
        .route("/room/{id}/join", post(join_room))
        .route("/room/{id}/leave", post(leave_room))
        .route("/room/{id}/start", post(start_room))
        .route("/room/{id}/guess", post(submit_guess))
        .route("/room/{id}/progress", get(room_progress))
        .route("/room/{id}/status", get(room_status))
}

/// Open a room hosted by the caller.
#[utoipa::path(
    post,
    path = "/room/create",
    tag = "room",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = CreateRoomResponse),
        (status = 400, description = "Invalid nickname")
    )
)]
pub async fn create_room(
    State(state): State<SharedState>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), AppError> {
    payload.validate()?;
    let created = room_service::create_room(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Join a waiting room.
#[utoipa::path(
    post,
    path = "/room/{id}/join",
    tag = "room",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = JoinRoomRequest,
    responses(
        (status = 200, description = "Joined", body = JoinRoomResponse),
        (status = 400, description = "Invalid nickname"),
        (status = 404, description = "Unknown room"),
        (status = 409, description = "Room full or already started")
    )
)]
pub async fn join_room(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, AppError> {
    payload.validate()?;
    let joined = room_service::join_room(&state, &id, payload).await?;
    Ok(Json(joined))
}

/// Leave a room in any phase.
#[utoipa::path(
    post,
    path = "/room/{id}/leave",
    tag = "room",
    params(("id" = String, Path, description = "Room identifier"), PlayerQuery),
    responses(
        (status = 200, description = "Left", body = MessageResponse),
        (status = 404, description = "Unknown room or player")
    )
)]
pub async fn leave_room(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    query.validate()?;
    let response = room_service::leave_room(&state, &id, &query.player_id).await?;
    Ok(Json(response))
}

/// Start the race.
#[utoipa::path(
    post,
    path = "/room/{id}/start",
    tag = "room",
    params(("id" = String, Path, description = "Room identifier"), PlayerQuery),
    responses(
        (status = 200, description = "Race started", body = MessageResponse),
        (status = 403, description = "Caller is not the host"),
        (status = 404, description = "Unknown room"),
        (status = 409, description = "Already started or not enough players")
    )
)]
pub async fn start_room(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    query.validate()?;
    let response = room_service::start_room(&state, &id, &query.player_id).await?;
    Ok(Json(response))
}

/// Submit a guess during the race.
#[utoipa::path(
    post,
    path = "/room/{id}/guess",
    tag = "room",
    operation_id = "submit_room_guess",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = RoomGuessRequest,
    responses(
        (status = 200, description = "Guess scored", body = GuessResponse),
        (status = 400, description = "Not a five-letter word"),
        (status = 404, description = "Unknown room or player"),
        (status = 409, description = "Race not running or player already finished")
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomGuessRequest>,
) -> Result<Json<GuessResponse>, AppError> {
    payload.validate()?;
    let response = room_service::submit_guess(&state, &id, payload).await?;
    Ok(Json(response))
}

/// Race progress. Blocks for up to 30 seconds until the room moves past `version` (default 0).
#[utoipa::path(
    get,
    path = "/room/{id}/progress",
    tag = "room",
    params(("id" = String, Path, description = "Room identifier"), ProgressQuery),
    responses(
        (status = 200, description = "Progress snapshot", body = RoomProgressResponse),
        (status = 404, description = "Unknown room")
    )
)]
pub async fn room_progress(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<RoomProgressResponse>, AppError> {
    let progress = room_service::room_progress(&state, &id, query.last_version()).await?;
    Ok(Json(progress))
}

/// Lobby view of a room.
#[utoipa::path(
    get,
    path = "/room/{id}/status",
    tag = "room",
    params(("id" = String, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room status", body = RoomStatusResponse),
        (status = 404, description = "Unknown room")
    )
)]
pub async fn room_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<RoomStatusResponse>, AppError> {
    let status = room_service::room_status(&state, &id).await?;
    Ok(Json(status))
}

/// Rooms that can still be joined.
#[utoipa::path(
    get,
    path = "/room/list",
    tag = "room",
    responses((status = 200, description = "Joinable rooms", body = RoomListResponse))
)]
pub async fn list_rooms(State(state): State<SharedState>) -> Json<RoomListResponse> {
    Json(room_service::list_rooms(&state).await)
}
