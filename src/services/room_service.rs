use std::sync::Arc;

use tracing::info;

use crate::{
    dto::{
        game::GuessResponse,
        room::{
            CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, JoinRoomResponse,
            MessageResponse, RoomGuessRequest, RoomListResponse, RoomProgressResponse,
            RoomStatusResponse,
        },
    },
    error::ServiceError,
    state::{
        Room, RoomId, SharedState,
        long_poll::{LONG_POLL_TIMEOUT, wait_for_progress},
    },
};

/// Open a room; the caller becomes its host and only player.
pub async fn create_room(
    state: &SharedState,
    request: CreateRoomRequest,
) -> Result<CreateRoomResponse, ServiceError> {
    let config = state.config();
    let player_id = state.next_player_id();
    let room = state.rooms().create_room(
        player_id.clone(),
        request.nickname.trim().to_string(),
        request.max_players,
        config.max_rounds(),
        config.words(),
    )?;

    let summary = room.summary().await;
    Ok(CreateRoomResponse::new(&summary, player_id))
}

/// Add a new player to a waiting room.
pub async fn join_room(
    state: &SharedState,
    raw_id: &str,
    request: JoinRoomRequest,
) -> Result<JoinRoomResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    let player_id = state.next_player_id();
    let summary = room
        .join(player_id.clone(), request.nickname.trim().to_string())
        .await?;

    info!(room_id = room.id(), player_id = %player_id, "player joined");
    Ok(JoinRoomResponse::new(summary, player_id))
}

/// Remove a player, whatever the room's phase.
pub async fn leave_room(
    state: &SharedState,
    raw_id: &str,
    player_id: &str,
) -> Result<MessageResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    room.leave(player_id).await?;

    info!(room_id = room.id(), player_id, "player left");
    Ok(MessageResponse::new("Left room successfully"))
}

/// Start the race; only the host may do this.
pub async fn start_room(
    state: &SharedState,
    raw_id: &str,
    player_id: &str,
) -> Result<MessageResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    room.start(player_id).await?;
    Ok(MessageResponse::new("Game started!"))
}

/// Score a player's guess. The answer is never part of this response.
pub async fn submit_guess(
    state: &SharedState,
    raw_id: &str,
    request: RoomGuessRequest,
) -> Result<GuessResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    let round = room.guess(&request.player_id, &request.guess).await?;
    Ok(GuessResponse::from(&round))
}

/// Progress of the race once the room moves past `version`, or after the long-poll limit.
pub async fn room_progress(
    state: &SharedState,
    raw_id: &str,
    version: u64,
) -> Result<RoomProgressResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    let progress = wait_for_progress(&room, version, LONG_POLL_TIMEOUT).await;
    Ok(progress.into())
}

/// Lobby view of one room.
pub async fn room_status(
    state: &SharedState,
    raw_id: &str,
) -> Result<RoomStatusResponse, ServiceError> {
    let room = find_room(state, raw_id)?;
    Ok(room.summary().await.into())
}

/// Every room still accepting players.
pub async fn list_rooms(state: &SharedState) -> RoomListResponse {
    let rooms = state.rooms().list_waiting().await;
    RoomListResponse {
        rooms: rooms.into_iter().map(RoomStatusResponse::from).collect(),
    }
}

fn find_room(state: &SharedState, raw_id: &str) -> Result<Arc<Room>, ServiceError> {
    let id = raw_id
        .parse::<RoomId>()
        .map_err(|_| ServiceError::NotFound(format!("room `{raw_id}` not found")))?;
    Ok(state.rooms().get(id)?)
}
