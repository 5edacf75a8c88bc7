//! A single race: shared answer, per-player sessions, and the version counter long polls wait on.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

use crate::state::{
    ranking::{self, RankEntry},
    scoring::Word,
    session::{GameSession, GuessError, RoundResult, SessionStatus},
    state_machine::{RoomEvent, RoomPhase, RoomStateMachine},
};

/// Numeric room identifier, assigned monotonically by the registry.
pub type RoomId = u64;
/// Server-allocated player identifier, unique within a room.
pub type PlayerId = String;

/// Players needed before the host may start.
pub const MIN_PLAYERS: usize = 2;
/// Largest room capacity accepted.
pub const MAX_PLAYERS: usize = 8;
/// Capacity used when none (or an out-of-range one) is requested.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Per-player lifecycle inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Joined, race not started yet.
    Waiting,
    /// Racing with guesses left.
    Playing,
    /// Guessed the answer.
    Won,
    /// Used every round without finding it.
    Lost,
}

/// Why a join was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotJoinable {
    /// The race already started or finished.
    NotWaiting,
    /// Every seat is taken.
    Full,
}

impl fmt::Display for NotJoinable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotJoinable::NotWaiting => f.write_str("room is not accepting new players"),
            NotJoinable::Full => f.write_str("room is full"),
        }
    }
}

/// Errors returned by room and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// No room has this id.
    #[error("room `{0}` not found")]
    RoomNotFound(RoomId),
    /// Join refused; see [`NotJoinable`].
    #[error("{0}")]
    RoomNotJoinable(NotJoinable),
    /// The player id is already seated.
    #[error("player `{0}` already in room")]
    DuplicatePlayer(PlayerId),
    /// The player id is not seated in this room.
    #[error("player `{0}` not in room")]
    PlayerNotInRoom(PlayerId),
    /// Only the host may start.
    #[error("only the host can start the game")]
    NotHost,
    /// The room left the waiting phase.
    #[error("game already started")]
    AlreadyStarted,
    /// Fewer than [`MIN_PLAYERS`] seated.
    #[error("need at least 2 players to start")]
    NotEnoughPlayers,
    /// Guesses are only taken while the race runs.
    #[error("game not in progress")]
    GameNotInProgress,
    /// The player already won or lost.
    #[error("player already finished")]
    AlreadyFinished,
    /// Rejections from the player's own session, passed through untouched.
    #[error(transparent)]
    Guess(#[from] GuessError),
}

/// Participant of a room.
#[derive(Debug, Clone)]
pub struct Player {
    /// Server-allocated id.
    pub id: PlayerId,
    /// Display name chosen on create or join.
    pub nickname: String,
    /// Where the player is in the race.
    pub status: PlayerStatus,
    /// Created when the race starts.
    session: Option<GameSession>,
    /// Set once, when the player first wins or loses.
    pub finish_time: Option<OffsetDateTime>,
}

impl Player {
    fn new(id: PlayerId, nickname: String) -> Self {
        Self {
            id,
            nickname,
            status: PlayerStatus::Waiting,
            session: None,
            finish_time: None,
        }
    }

    fn current_round(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(0, GameSession::current_round)
    }

    fn finish(&mut self, status: PlayerStatus) {
        self.status = status;
        self.finish_time.get_or_insert_with(OffsetDateTime::now_utc);
    }

    fn progress(&self, max_rounds: u32) -> PlayerProgress {
        PlayerProgress {
            player_id: self.id.clone(),
            nickname: self.nickname.clone(),
            status: self.status,
            current_round: self.current_round(),
            max_rounds,
            history: self
                .session
                .as_ref()
                .map(|session| session.history().to_vec())
                .unwrap_or_default(),
            finish_time: self.finish_time,
        }
    }
}

/// Progress of one player inside a [`RoomProgress`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProgress {
    /// Player the entry describes.
    pub player_id: PlayerId,
    /// Display name.
    pub nickname: String,
    /// Lifecycle status at snapshot time.
    pub status: PlayerStatus,
    /// Guesses accepted so far.
    pub current_round: u32,
    /// Round budget shared by the room.
    pub max_rounds: u32,
    /// Every scored guess, oldest first.
    pub history: Vec<RoundResult>,
    /// When the player won or lost.
    pub finish_time: Option<OffsetDateTime>,
}

impl PlayerProgress {
    /// Most recent accepted guess, if any.
    pub fn last_guess(&self) -> Option<&RoundResult> {
        self.history.last()
    }
}

/// Consistent view of a room taken at a single version.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomProgress {
    /// Room the snapshot belongs to.
    pub room_id: RoomId,
    /// Room phase at snapshot time.
    pub phase: RoomPhase,
    /// Version the snapshot was read at.
    pub version: u64,
    /// Players in join order.
    pub players: Vec<PlayerProgress>,
    /// Revealed once the race is finished.
    pub answer: Option<Word>,
    /// Best first; present once the race is finished.
    pub ranking: Option<Vec<PlayerId>>,
}

impl RoomProgress {
    /// First entry of the ranking.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.ranking.as_ref().and_then(|ranking| ranking.first())
    }
}

/// Lightweight lobby view of a room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    /// Room the summary belongs to.
    pub room_id: RoomId,
    /// Current phase.
    pub phase: RoomPhase,
    /// Nicknames in join order.
    pub nicknames: Vec<String>,
    /// Seated players.
    pub player_count: usize,
    /// Seats available.
    pub max_players: usize,
    /// Round budget per player.
    pub max_rounds: u32,
    /// `None` once every player left.
    pub host: Option<PlayerId>,
}

struct RoomInner {
    host: Option<PlayerId>,
    /// Keyed by player id, iterated in join order.
    players: IndexMap<PlayerId, Player>,
    machine: RoomStateMachine,
}

impl RoomInner {
    /// Someone won, or nobody is still playing.
    fn race_over(&self) -> bool {
        let mut players = self.players.values();
        players.clone().any(|player| player.status == PlayerStatus::Won)
            || players.all(|player| matches!(player.status, PlayerStatus::Won | PlayerStatus::Lost))
    }

    fn ranking(&self) -> Vec<PlayerId> {
        let entries = self
            .players
            .values()
            .map(|player| RankEntry {
                player_id: &player.id,
                won: player.status == PlayerStatus::Won,
                rounds: player.current_round(),
                finish_time: player.finish_time,
            })
            .collect();
        ranking::rank(entries)
    }
}

/// One race instance.
///
/// All mutable state sits behind a single lock so every operation observes and produces a
/// consistent room. Each accepted mutation bumps the version while still holding the write lock
/// and publishes it on a watch channel, which wakes every long-poll waiter of this room.
pub struct Room {
    id: RoomId,
    answer: Word,
    max_rounds: u32,
    max_players: usize,
    inner: RwLock<RoomInner>,
    version: watch::Sender<u64>,
}

impl Room {
    /// Build a waiting room with the host as its only player, at version 0.
    ///
    /// `max_rounds` and `max_players` are expected to be validated by the registry.
    pub fn new(
        id: RoomId,
        host_id: PlayerId,
        nickname: String,
        answer: Word,
        max_rounds: u32,
        max_players: usize,
    ) -> Self {
        let mut players = IndexMap::new();
        players.insert(host_id.clone(), Player::new(host_id.clone(), nickname));

        let (version, _receiver) = watch::channel(0);

        Self {
            id,
            answer,
            max_rounds,
            max_players,
            inner: RwLock::new(RoomInner {
                host: Some(host_id),
                players,
                machine: RoomStateMachine::new(),
            }),
            version,
        }
    }

    /// Registry id of the room.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Round budget every player gets.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Latest published version.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Receiver notified after every accepted mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Add a waiting player. Returns the lobby view right after the join.
    pub async fn join(&self, player_id: PlayerId, nickname: String) -> Result<RoomSummary, RoomError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        if inner.machine.phase() != RoomPhase::Waiting {
            return Err(RoomError::RoomNotJoinable(NotJoinable::NotWaiting));
        }
        if inner.players.len() >= self.max_players {
            return Err(RoomError::RoomNotJoinable(NotJoinable::Full));
        }
        if inner.players.contains_key(&player_id) {
            return Err(RoomError::DuplicatePlayer(player_id));
        }

        inner
            .players
            .insert(player_id.clone(), Player::new(player_id, nickname));

        self.commit(inner);
        Ok(self.summarize(inner))
    }

    /// Remove a player in any phase, handing the host role to the earliest remaining player.
    pub async fn leave(&self, player_id: &str) -> Result<(), RoomError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        if inner.players.shift_remove(player_id).is_none() {
            return Err(RoomError::PlayerNotInRoom(player_id.to_string()));
        }

        if inner.host.as_deref() == Some(player_id) {
            inner.host = inner.players.keys().next().cloned();
            debug!(room_id = self.id, host = ?inner.host, "host reassigned");
        }

        if inner.machine.phase() == RoomPhase::Playing && inner.race_over() {
            self.finish(inner)?;
        }

        self.commit(inner);
        Ok(())
    }

    /// Start the race on behalf of the host.
    pub async fn start(&self, player_id: &str) -> Result<(), RoomError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        if inner.host.as_deref() != Some(player_id) {
            return Err(RoomError::NotHost);
        }
        if inner.machine.phase() != RoomPhase::Waiting {
            return Err(RoomError::AlreadyStarted);
        }
        if inner.players.len() < MIN_PLAYERS {
            return Err(RoomError::NotEnoughPlayers);
        }

        inner
            .machine
            .apply(RoomEvent::Start)
            .map_err(|_| RoomError::AlreadyStarted)?;

        for player in inner.players.values_mut() {
            player.session = Some(GameSession::new(self.answer, self.max_rounds));
            player.status = PlayerStatus::Playing;
        }

        info!(
            room_id = self.id,
            players = inner.players.len(),
            "race started"
        );
        self.commit(inner);
        Ok(())
    }

    /// Score a guess for `player_id`, finishing the race when it is decided.
    pub async fn guess(&self, player_id: &str, raw: &str) -> Result<RoundResult, RoomError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        if inner.machine.phase() != RoomPhase::Playing {
            return Err(RoomError::GameNotInProgress);
        }

        let player = inner
            .players
            .get_mut(player_id)
            .ok_or_else(|| RoomError::PlayerNotInRoom(player_id.to_string()))?;
        if player.status != PlayerStatus::Playing {
            return Err(RoomError::AlreadyFinished);
        }

        let session = player.session.as_mut().ok_or(RoomError::GameNotInProgress)?;
        let round = session.guess(raw)?.clone();

        match round.status {
            SessionStatus::Won => player.finish(PlayerStatus::Won),
            SessionStatus::Lost => player.finish(PlayerStatus::Lost),
            SessionStatus::InProgress => {}
        }
        if round.status.is_terminal() {
            info!(
                room_id = self.id,
                player_id,
                status = ?player.status,
                rounds = round.round,
                "player finished"
            );
        }

        if inner.race_over() {
            self.finish(inner)?;
        }

        self.commit(inner);
        Ok(round)
    }

    /// Full progress snapshot; answer and ranking are included once finished.
    pub async fn progress(&self) -> RoomProgress {
        let inner = self.inner.read().await;
        let finished = inner.machine.phase() == RoomPhase::Finished;

        RoomProgress {
            room_id: self.id,
            phase: inner.machine.phase(),
            version: inner.machine.version(),
            players: inner
                .players
                .values()
                .map(|player| player.progress(self.max_rounds))
                .collect(),
            answer: finished.then_some(self.answer),
            ranking: finished.then(|| inner.ranking()),
        }
    }

    /// Lobby view.
    pub async fn summary(&self) -> RoomSummary {
        let inner = self.inner.read().await;
        self.summarize(&inner)
    }

    fn summarize(&self, inner: &RoomInner) -> RoomSummary {
        RoomSummary {
            room_id: self.id,
            phase: inner.machine.phase(),
            nicknames: inner
                .players
                .values()
                .map(|player| player.nickname.clone())
                .collect(),
            player_count: inner.players.len(),
            max_players: self.max_players,
            max_rounds: self.max_rounds,
            host: inner.host.clone(),
        }
    }

    fn finish(&self, inner: &mut RoomInner) -> Result<(), RoomError> {
        inner
            .machine
            .apply(RoomEvent::Finish)
            .map_err(|_| RoomError::GameNotInProgress)?;
        info!(room_id = self.id, ranking = ?inner.ranking(), "race finished");
        Ok(())
    }

    /// Bump the version and wake every waiter. Must run under the write lock.
    fn commit(&self, inner: &mut RoomInner) {
        let version = inner.machine.commit();
        self.version.send_replace(version);
        debug!(room_id = self.id, version, "room updated");
    }
}
