use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{room::PlayerStatus, session::SessionStatus, state_machine::RoomPhase};

/// Room lifecycle as exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleRoomStatus {
    /// Lobby, accepting players.
    Waiting,
    /// Race in progress.
    Playing,
    /// Race over; answer and ranking are public.
    Finished,
}

impl From<RoomPhase> for VisibleRoomStatus {
    fn from(value: RoomPhase) -> Self {
        match value {
            RoomPhase::Waiting => VisibleRoomStatus::Waiting,
            RoomPhase::Playing => VisibleRoomStatus::Playing,
            RoomPhase::Finished => VisibleRoomStatus::Finished,
        }
    }
}

/// Player lifecycle inside a room.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisiblePlayerStatus {
    /// In the lobby.
    Waiting,
    /// Racing.
    Playing,
    /// Found the word.
    Won,
    /// Out of rounds.
    Lost,
}

impl From<PlayerStatus> for VisiblePlayerStatus {
    fn from(value: PlayerStatus) -> Self {
        match value {
            PlayerStatus::Waiting => VisiblePlayerStatus::Waiting,
            PlayerStatus::Playing => VisiblePlayerStatus::Playing,
            PlayerStatus::Won => VisiblePlayerStatus::Won,
            PlayerStatus::Lost => VisiblePlayerStatus::Lost,
        }
    }
}

/// Status of a single guessing session.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleGameStatus {
    /// Guesses still accepted.
    InProgress,
    /// Found the word.
    Won,
    /// Out of rounds.
    Lost,
}

impl From<SessionStatus> for VisibleGameStatus {
    fn from(value: SessionStatus) -> Self {
        match value {
            SessionStatus::InProgress => VisibleGameStatus::InProgress,
            SessionStatus::Won => VisibleGameStatus::Won,
            SessionStatus::Lost => VisibleGameStatus::Lost,
        }
    }
}
