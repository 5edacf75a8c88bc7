use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    config::ConfigError,
    state::{
        room::RoomError,
        session::GuessError,
    },
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Server-side configuration cannot satisfy the request.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<GuessError> for ServiceError {
    fn from(err: GuessError) -> Self {
        match err {
            GuessError::InvalidGuess(invalid) => ServiceError::InvalidInput(invalid.to_string()),
            GuessError::GameAlreadyOver => ServiceError::InvalidState(err.to_string()),
        }
    }
}

impl From<RoomError> for ServiceError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::RoomNotFound(_) | RoomError::PlayerNotInRoom(_) => {
                ServiceError::NotFound(err.to_string())
            }
            RoomError::NotHost => ServiceError::Forbidden(err.to_string()),
            RoomError::Guess(guess) => guess.into(),
            RoomError::RoomNotJoinable(_)
            | RoomError::DuplicatePlayer(_)
            | RoomError::AlreadyStarted
            | RoomError::NotEnoughPlayers
            | RoomError::GameNotInProgress
            | RoomError::AlreadyFinished => ServiceError::InvalidState(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Caller lacks the role the operation requires.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Forbidden(message) => AppError::Forbidden(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Config(source) => AppError::Internal(source.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{room::NotJoinable, scoring::InvalidWord};

    fn status_of(err: impl Into<ServiceError>) -> StatusCode {
        AppError::from(err.into()).into_response().status()
    }

    #[test]
    fn room_errors_map_to_http_statuses() {
        assert_eq!(status_of(RoomError::RoomNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(RoomError::PlayerNotInRoom("player-1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(RoomError::NotHost), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(RoomError::RoomNotJoinable(NotJoinable::Full)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(RoomError::GameNotInProgress), StatusCode::CONFLICT);
        assert_eq!(status_of(RoomError::AlreadyFinished), StatusCode::CONFLICT);
    }

    #[test]
    fn guess_errors_keep_their_meaning_through_rooms() {
        let invalid = GuessError::InvalidGuess(InvalidWord("AB".into()));
        assert_eq!(status_of(invalid.clone()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(RoomError::Guess(invalid)), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(GuessError::GameAlreadyOver), StatusCode::CONFLICT);
    }

    #[test]
    fn config_errors_are_internal() {
        assert_eq!(
            status_of(ConfigError::EmptyWordList),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
