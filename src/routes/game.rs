use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::game::{CreateGameResponse, GameStatusResponse, GuessRequest, GuessResponse},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes serving single-player games.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/new", post(create_game))
        .route("/game/{id}/guess", post(submit_guess))
        .route("/game/{id}/status", get(game_status))
}

/// Start a single-player game.
#[utoipa::path(
    post,
    path = "/game/new",
    tag = "game",
    responses(
        (status = 201, description = "Game created", body = CreateGameResponse),
        (status = 500, description = "No playable word configured")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<CreateGameResponse>), AppError> {
    let created = game_service::create_game(&state)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Submit a guess for a single-player game.
#[utoipa::path(
    post,
    path = "/game/{id}/guess",
    tag = "game",
    params(("id" = String, Path, description = "Game identifier")),
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess scored", body = GuessResponse),
        (status = 400, description = "Not a five-letter word"),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game already over")
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<GuessRequest>,
) -> Result<Json<GuessResponse>, AppError> {
    let response = game_service::submit_guess(&state, &id, payload).await?;
    Ok(Json(response))
}

/// Fetch the state of a single-player game.
#[utoipa::path(
    get,
    path = "/game/{id}/status",
    tag = "game",
    params(("id" = String, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game state", body = GameStatusResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn game_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameStatusResponse>, AppError> {
    let status = game_service::game_status(&state, &id).await?;
    Ok(Json(status))
}
