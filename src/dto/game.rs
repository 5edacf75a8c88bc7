use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::phase::VisibleGameStatus,
    state::{
        registry::GameId,
        scoring::{Word, symbols},
        session::{GameSession, RoundResult},
    },
};

/// Payload carrying a single guess.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GuessRequest {
    /// Five letters, any case; surrounding whitespace is ignored.
    pub guess: String,
}

/// Returned when a single-player game is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateGameResponse {
    /// Id to use in later game requests.
    pub game_id: String,
    /// Guesses available.
    pub max_rounds: u32,
    /// Human-readable confirmation.
    pub message: String,
}

impl CreateGameResponse {
    /// Response for a freshly created game.
    pub fn new(game_id: GameId, max_rounds: u32) -> Self {
        Self {
            game_id: game_id.to_string(),
            max_rounds,
            message: "Game created successfully".into(),
        }
    }
}

/// Outcome of one accepted guess.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct GuessResponse {
    /// Normalised (upper-case) guess.
    pub guess: String,
    /// One symbol per letter: `O` hit, `?` present elsewhere, `_` miss.
    pub results: Vec<String>,
    /// Whether the session accepts no further guesses.
    pub game_over: bool,
    /// Session status after this guess.
    pub game_status: VisibleGameStatus,
    /// Round this guess consumed.
    pub current_round: u32,
    /// Round budget.
    pub max_rounds: u32,
    /// Only present once a single-player game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Closing message once a single-player game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&RoundResult> for GuessResponse {
    fn from(round: &RoundResult) -> Self {
        Self {
            guess: round.guess.to_string(),
            results: symbols(&round.outcomes),
            game_over: round.status.is_terminal(),
            game_status: round.status.into(),
            current_round: round.round,
            max_rounds: round.max_rounds,
            answer: None,
            message: None,
        }
    }
}

impl GuessResponse {
    /// Attach the answer and a closing message when the game just ended.
    pub fn with_outcome(mut self, answer: Option<Word>) -> Self {
        self.answer = answer.map(|word| word.to_string());
        self.message = match self.game_status {
            VisibleGameStatus::Won => Some("Congratulations! You won!".into()),
            VisibleGameStatus::Lost => Some("Game over! Better luck next time.".into()),
            VisibleGameStatus::InProgress => None,
        };
        self
    }
}

/// Full state of a single-player game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameStatusResponse {
    /// Game the status belongs to.
    pub game_id: String,
    /// Guesses accepted so far.
    pub current_round: u32,
    /// Round budget.
    pub max_rounds: u32,
    /// Current session status.
    pub game_status: VisibleGameStatus,
    /// Accepted guesses, oldest first.
    pub history: Vec<GuessResponse>,
    /// Only present once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl GameStatusResponse {
    /// Status view of `session`.
    pub fn from_session(game_id: GameId, session: &GameSession) -> Self {
        Self {
            game_id: game_id.to_string(),
            current_round: session.current_round(),
            max_rounds: session.max_rounds(),
            game_status: session.status().into(),
            history: session.history().iter().map(GuessResponse::from).collect(),
            answer: session.revealed_answer().map(|word| word.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(answer: &str, max_rounds: u32) -> GameSession {
        GameSession::new(Word::parse(answer).unwrap(), max_rounds)
    }

    #[test]
    fn guess_response_renders_symbols() {
        let mut game = session("APPLE", 6);
        let response = GuessResponse::from(game.guess("pleas").unwrap());
        assert_eq!(response.guess, "PLEAS");
        assert_eq!(response.results, ["?", "?", "?", "?", "_"]);
        assert!(!response.game_over);
        assert_eq!(response.game_status, VisibleGameStatus::InProgress);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["game_status"], "in_progress");
        assert!(json.get("answer").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn finished_game_reveals_answer_and_message() {
        let mut game = session("APPLE", 1);
        let round = game.guess("CRANE").unwrap().clone();
        let response = GuessResponse::from(&round).with_outcome(game.revealed_answer());
        assert!(response.game_over);
        assert_eq!(response.answer.as_deref(), Some("APPLE"));
        assert_eq!(
            response.message.as_deref(),
            Some("Game over! Better luck next time.")
        );

        let status = GameStatusResponse::from_session(3, &game);
        assert_eq!(status.game_id, "3");
        assert_eq!(status.history.len(), 1);
        assert_eq!(status.answer.as_deref(), Some("APPLE"));
    }

    #[test]
    fn status_hides_answer_while_playing() {
        let game = session("APPLE", 6);
        let json = serde_json::to_value(GameStatusResponse::from_session(1, &game)).unwrap();
        assert_eq!(json["current_round"], 0);
        assert!(json.get("answer").is_none());
    }
}
