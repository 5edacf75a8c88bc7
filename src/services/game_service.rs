use tracing::{debug, info};

use crate::{
    dto::game::{CreateGameResponse, GameStatusResponse, GuessRequest, GuessResponse},
    error::ServiceError,
    state::{GameId, SharedState, registry::SharedGame},
};

/// Start a single-player game with a random answer from the configured word list.
pub fn create_game(state: &SharedState) -> Result<CreateGameResponse, ServiceError> {
    let config = state.config();
    let game_id = state
        .games()
        .create_game(config.max_rounds(), config.words())?;

    info!(game_id, max_rounds = config.max_rounds(), "game created");
    Ok(CreateGameResponse::new(game_id, config.max_rounds()))
}

/// Score a guess; the answer is revealed in the response once the game ends.
pub async fn submit_guess(
    state: &SharedState,
    raw_id: &str,
    request: GuessRequest,
) -> Result<GuessResponse, ServiceError> {
    let game_id = parse_game_id(raw_id)?;
    let game = find_game(state, game_id)?;
    let mut session = game.lock().await;

    let round = session.guess(&request.guess)?.clone();
    debug!(game_id, round = round.round, status = ?round.status, "guess scored");

    Ok(GuessResponse::from(&round).with_outcome(session.revealed_answer()))
}

/// Current state of a single-player game.
pub async fn game_status(
    state: &SharedState,
    raw_id: &str,
) -> Result<GameStatusResponse, ServiceError> {
    let game_id = parse_game_id(raw_id)?;
    let game = find_game(state, game_id)?;
    let session = game.lock().await;
    Ok(GameStatusResponse::from_session(game_id, &session))
}

fn parse_game_id(raw: &str) -> Result<GameId, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::NotFound(format!("game `{raw}` not found")))
}

fn find_game(state: &SharedState, game_id: GameId) -> Result<SharedGame, ServiceError> {
    state
        .games()
        .get(game_id)
        .ok_or_else(|| ServiceError::NotFound(format!("game `{game_id}` not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{AppConfig, WordList},
        dto::phase::VisibleGameStatus,
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::new(AppConfig::new(2, WordList::new(["APPLE"]).unwrap()).unwrap())
    }

    fn guess(word: &str) -> GuessRequest {
        GuessRequest { guess: word.into() }
    }

    #[tokio::test]
    async fn full_single_player_game() {
        let state = state();
        let created = create_game(&state).unwrap();
        assert_eq!(created.max_rounds, 2);

        let first = submit_guess(&state, &created.game_id, guess("crane"))
            .await
            .unwrap();
        assert_eq!(first.results, ["_", "_", "?", "_", "O"]);
        assert_eq!(first.answer, None);

        let second = submit_guess(&state, &created.game_id, guess("APPLE"))
            .await
            .unwrap();
        assert_eq!(second.game_status, VisibleGameStatus::Won);
        assert_eq!(second.answer.as_deref(), Some("APPLE"));
        assert_eq!(second.message.as_deref(), Some("Congratulations! You won!"));

        let over = submit_guess(&state, &created.game_id, guess("APPLE")).await;
        assert!(matches!(over, Err(ServiceError::InvalidState(_))));

        let status = game_status(&state, &created.game_id).await.unwrap();
        assert_eq!(status.current_round, 2);
        assert_eq!(status.history.len(), 2);
    }

    #[tokio::test]
    async fn invalid_guess_is_bad_input() {
        let state = state();
        let created = create_game(&state).unwrap();
        let result = submit_guess(&state, &created.game_id, guess("AB")).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn unknown_or_malformed_ids_are_not_found() {
        let state = state();
        assert!(matches!(
            game_status(&state, "42").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            game_status(&state, "abc").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
