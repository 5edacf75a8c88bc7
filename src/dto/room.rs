use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_timestamp,
        game::GuessResponse,
        phase::{VisiblePlayerStatus, VisibleRoomStatus},
        validation::{validate_nickname, validate_player_id},
    },
    state::{
        PlayerId,
        room::{PlayerProgress, RoomProgress, RoomSummary},
    },
};

fn collect(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Payload used to open a new room; the caller becomes its host.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    /// Display name of the host.
    pub nickname: String,
    /// Between 2 and 8; any other value (or none) falls back to 4.
    #[serde(default)]
    pub max_players: Option<usize>,
}

impl Validate for CreateRoomRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_nickname(&self.nickname) {
            errors.add("nickname", e);
        }
        collect(errors)
    }
}

/// Returned once a room exists.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRoomResponse {
    /// Id of the new room.
    pub room_id: String,
    /// Id the host must send with every later request.
    pub player_id: String,
    /// Guesses each player gets.
    pub max_rounds: u32,
    /// Capacity actually applied.
    pub max_players: usize,
    /// Human-readable confirmation.
    pub message: String,
}

impl CreateRoomResponse {
    /// Response for the host of a freshly created room.
    pub fn new(summary: &RoomSummary, player_id: PlayerId) -> Self {
        Self {
            room_id: summary.room_id.to_string(),
            message: format!("Room created! You are the host. Player ID: {player_id}"),
            player_id,
            max_rounds: summary.max_rounds,
            max_players: summary.max_players,
        }
    }
}

/// Payload used to join an existing room.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRoomRequest {
    /// Display name of the joining player.
    pub nickname: String,
}

impl Validate for JoinRoomRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_nickname(&self.nickname) {
            errors.add("nickname", e);
        }
        collect(errors)
    }
}

/// Returned after a successful join.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinRoomResponse {
    /// Room joined.
    pub room_id: String,
    /// Id the player must send with every later request.
    pub player_id: String,
    /// Guesses each player gets.
    pub max_rounds: u32,
    /// Nicknames in join order, the new player included.
    pub players: Vec<String>,
    /// Whether the joining player holds the host role.
    pub is_host: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl JoinRoomResponse {
    /// Response for `player_id` built from the lobby view right after the join.
    pub fn new(summary: RoomSummary, player_id: PlayerId) -> Self {
        Self {
            room_id: summary.room_id.to_string(),
            is_host: summary.host.as_deref() == Some(player_id.as_str()),
            message: format!("Joined room successfully! Player ID: {player_id}"),
            player_id,
            max_rounds: summary.max_rounds,
            players: summary.nicknames,
        }
    }
}

/// Identifies the acting player on leave and start.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlayerQuery {
    /// Acting player.
    pub player_id: String,
}

impl Validate for PlayerQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_player_id(&self.player_id) {
            errors.add("player_id", e);
        }
        collect(errors)
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Guess submitted inside a room.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomGuessRequest {
    /// Guessing player.
    pub player_id: String,
    /// Five letters, any case.
    pub guess: String,
}

impl Validate for RoomGuessRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_player_id(&self.player_id) {
            errors.add("player_id", e);
        }
        collect(errors)
    }
}

/// Long-poll cursor.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    /// Last version the client has seen. Missing or non-numeric values count as 0.
    #[serde(default)]
    #[param(value_type = Option<u64>)]
    pub version: Option<String>,
}

impl ProgressQuery {
    /// Version to wait past; anything that is not a decimal `u64` reads as 0.
    pub fn last_version(&self) -> u64 {
        self.version
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// Progress of one player.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerProgressResponse {
    /// Player the entry describes.
    pub player_id: String,
    /// Display name.
    pub nickname: String,
    /// Guesses accepted so far.
    pub current_round: u32,
    /// Round budget.
    pub max_rounds: u32,
    /// Player status.
    pub status: VisiblePlayerStatus,
    /// Most recent guess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_guess: Option<GuessResponse>,
    /// Every guess, oldest first.
    pub history: Vec<GuessResponse>,
    /// RFC 3339 instant the player won or lost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
}

impl From<PlayerProgress> for PlayerProgressResponse {
    fn from(player: PlayerProgress) -> Self {
        let history = player
            .history
            .iter()
            .map(GuessResponse::from)
            .collect::<Vec<_>>();

        Self {
            player_id: player.player_id,
            nickname: player.nickname,
            current_round: player.current_round,
            max_rounds: player.max_rounds,
            status: player.status.into(),
            last_guess: history.last().cloned(),
            history,
            finish_time: player.finish_time.map(format_timestamp),
        }
    }
}

/// Snapshot of a whole race.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomProgressResponse {
    /// Room the snapshot belongs to.
    pub room_id: String,
    /// Room status.
    pub status: VisibleRoomStatus,
    /// Players in join order.
    pub players: Vec<PlayerProgressResponse>,
    /// Id of the first-ranked player, once finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Player ids, best first. Only once the race is finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Vec<String>>,
    /// Revealed once finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Pass this back as `?version=` to wait for the next change.
    pub version: u64,
    /// RFC 3339 instant the response was built.
    pub timestamp: String,
}

impl From<RoomProgress> for RoomProgressResponse {
    fn from(progress: RoomProgress) -> Self {
        Self {
            room_id: progress.room_id.to_string(),
            status: progress.phase.into(),
            winner: progress.winner().cloned(),
            players: progress
                .players
                .into_iter()
                .map(PlayerProgressResponse::from)
                .collect(),
            ranking: progress.ranking,
            answer: progress.answer.map(|word| word.to_string()),
            version: progress.version,
            timestamp: format_timestamp(OffsetDateTime::now_utc()),
        }
    }
}

/// Lobby view of a room.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomStatusResponse {
    /// Room described.
    pub room_id: String,
    /// Room status.
    pub status: VisibleRoomStatus,
    /// Seated players.
    pub player_count: usize,
    /// Seats available.
    pub max_players: usize,
    /// Guesses each player gets.
    pub max_rounds: u32,
    /// Nicknames in join order.
    pub players: Vec<String>,
    /// Absent when the room has no host.
    pub host: Option<String>,
}

impl From<RoomSummary> for RoomStatusResponse {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room_id: summary.room_id.to_string(),
            status: summary.phase.into(),
            player_count: summary.player_count,
            max_players: summary.max_players,
            max_rounds: summary.max_rounds,
            players: summary.nicknames,
            host: summary.host,
        }
    }
}

/// Rooms still accepting players.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomListResponse {
    /// Waiting rooms ordered by id.
    pub rooms: Vec<RoomStatusResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_nickname_fails_validation() {
        let request = CreateRoomRequest {
            nickname: "  ".into(),
            max_players: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nickname"));

        let request = JoinRoomRequest {
            nickname: "Bob".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn guess_requires_player_id() {
        let request = RoomGuessRequest {
            player_id: String::new(),
            guess: "CRANE".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn progress_cursor_defaults_to_zero() {
        let query = |version: Option<&str>| ProgressQuery {
            version: version.map(str::to_string),
        };
        assert_eq!(query(None).last_version(), 0);
        assert_eq!(query(Some("abc")).last_version(), 0);
        assert_eq!(query(Some("-3")).last_version(), 0);
        assert_eq!(query(Some("7")).last_version(), 7);
    }

    #[test]
    fn join_response_flags_host() {
        let summary = RoomSummary {
            room_id: 4,
            phase: crate::state::state_machine::RoomPhase::Waiting,
            nicknames: vec!["Bob".into()],
            player_count: 1,
            max_players: 4,
            max_rounds: 6,
            host: Some("player-9".into()),
        };
        let response = JoinRoomResponse::new(summary, "player-9".into());
        assert!(response.is_host);
        assert_eq!(response.room_id, "4");
        assert_eq!(response.players, ["Bob"]);
        assert!(response.message.contains("player-9"));
    }

    #[test]
    fn waiting_progress_omits_race_results() {
        let progress = RoomProgress {
            room_id: 2,
            phase: crate::state::state_machine::RoomPhase::Waiting,
            version: 3,
            players: Vec::new(),
            answer: None,
            ranking: None,
        };
        let json = serde_json::to_value(RoomProgressResponse::from(progress)).unwrap();
        assert_eq!(json["status"], "waiting");
        assert_eq!(json["version"], 3);
        assert!(json.get("winner").is_none());
        assert!(json.get("ranking").is_none());
        assert!(json.get("answer").is_none());
        assert!(json["timestamp"].is_string());
    }
}
