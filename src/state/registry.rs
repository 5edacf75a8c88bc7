//! Id-keyed tables of live rooms and single-player games.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::{ConfigError, WordList},
    state::{
        room::{
            DEFAULT_MAX_PLAYERS, MAX_PLAYERS, MIN_PLAYERS, PlayerId, Room, RoomError, RoomId,
            RoomSummary,
        },
        session::GameSession,
        state_machine::RoomPhase,
    },
};

/// Capacity actually applied for a requested `max_players`.
///
/// Anything outside the supported range falls back to the default rather than being rejected.
pub fn effective_max_players(requested: Option<usize>) -> usize {
    requested
        .filter(|count| (MIN_PLAYERS..=MAX_PLAYERS).contains(count))
        .unwrap_or(DEFAULT_MAX_PLAYERS)
}

/// Owner of every room. Rooms are never removed.
///
/// The map lock is only held for insertion and lookup; callers get an [`Arc<Room>`] and operate
/// under the room's own lock.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<Room>>,
    next_id: AtomicU64,
}

impl RoomRegistry {
    /// Empty registry; ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a waiting room hosted by `host_id`, with a random answer drawn from `words`.
    pub fn create_room(
        &self,
        host_id: PlayerId,
        nickname: String,
        max_players: Option<usize>,
        max_rounds: u32,
        words: &WordList,
    ) -> Result<Arc<Room>, ConfigError> {
        if max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        let answer = words.pick()?;
        let max_players = effective_max_players(max_players);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let room = Arc::new(Room::new(
            id,
            host_id.clone(),
            nickname,
            answer,
            max_rounds,
            max_players,
        ));
        self.rooms.insert(id, room.clone());

        info!(room_id = id, host = %host_id, max_players, max_rounds, "room created");
        Ok(room)
    }

    /// Look a room up by id.
    pub fn get(&self, id: RoomId) -> Result<Arc<Room>, RoomError> {
        self.rooms
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(RoomError::RoomNotFound(id))
    }

    /// Lobby views of every room still accepting players, ordered by id.
    pub async fn list_waiting(&self) -> Vec<RoomSummary> {
        // Collect handles first so no map shard stays locked across an await.
        let rooms = self
            .rooms
            .iter()
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();

        let mut summaries = join_all(rooms.iter().map(|room| room.summary()))
            .await
            .into_iter()
            .filter(|summary| summary.phase == RoomPhase::Waiting)
            .collect::<Vec<_>>();
        summaries.sort_by_key(|summary| summary.room_id);
        summaries
    }

    /// Rooms created so far.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room was ever created.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Identifier of a single-player game.
pub type GameId = u64;
/// Handle to a single-player game.
pub type SharedGame = Arc<Mutex<GameSession>>;

/// Single-player games, each behind its own lock.
#[derive(Default)]
pub struct GameRegistry {
    games: DashMap<GameId, SharedGame>,
    next_id: AtomicU64,
}

impl GameRegistry {
    /// Empty registry; ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game with a random answer and return its id.
    pub fn create_game(&self, max_rounds: u32, words: &WordList) -> Result<GameId, ConfigError> {
        if max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        let answer = words.pick()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.games
            .insert(id, Arc::new(Mutex::new(GameSession::new(answer, max_rounds))));
        Ok(id)
    }

    /// Look a game up by id.
    pub fn get(&self, id: GameId) -> Option<SharedGame> {
        self.games.get(&id).map(|entry| entry.value().clone())
    }

    /// Games created so far.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no game was ever created.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> WordList {
        WordList::new(["APPLE"]).unwrap()
    }

    #[test]
    fn max_players_falls_back_to_default_outside_range() {
        assert_eq!(effective_max_players(None), DEFAULT_MAX_PLAYERS);
        assert_eq!(effective_max_players(Some(0)), DEFAULT_MAX_PLAYERS);
        assert_eq!(effective_max_players(Some(1)), DEFAULT_MAX_PLAYERS);
        assert_eq!(effective_max_players(Some(9)), DEFAULT_MAX_PLAYERS);
        assert_eq!(effective_max_players(Some(2)), 2);
        assert_eq!(effective_max_players(Some(8)), 8);
    }

    #[tokio::test]
    async fn rooms_get_increasing_ids_and_can_be_found() {
        let registry = RoomRegistry::new();
        let first = registry
            .create_room("player-1".into(), "Alice".into(), None, 6, &words())
            .unwrap();
        let second = registry
            .create_room("player-2".into(), "Bob".into(), Some(2), 6, &words())
            .unwrap();

        assert!(second.id() > first.id());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(first.id()).unwrap().id(), first.id());
        assert_eq!(second.summary().await.max_players, 2);
        assert_eq!(first.summary().await.max_players, DEFAULT_MAX_PLAYERS);
    }

    #[test]
    fn unknown_room_is_not_found() {
        let registry = RoomRegistry::new();
        assert!(matches!(registry.get(7), Err(RoomError::RoomNotFound(7))));
    }

    #[test]
    fn zero_rounds_are_refused() {
        let registry = RoomRegistry::new();
        assert!(matches!(
            registry.create_room("player-1".into(), "Alice".into(), None, 0, &words()),
            Err(ConfigError::InvalidMaxRounds)
        ));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn listing_only_shows_waiting_rooms_in_id_order() {
        let registry = RoomRegistry::new();
        let a = registry
            .create_room("player-1".into(), "Alice".into(), None, 6, &words())
            .unwrap();
        let b = registry
            .create_room("player-2".into(), "Bob".into(), None, 6, &words())
            .unwrap();
        let c = registry
            .create_room("player-3".into(), "Carol".into(), None, 6, &words())
            .unwrap();

        b.join("player-4".into(), "Dave".into()).await.unwrap();
        b.start("player-2").await.unwrap();

        let listed = registry
            .list_waiting()
            .await
            .into_iter()
            .map(|summary| summary.room_id)
            .collect::<Vec<_>>();
        assert_eq!(listed, [a.id(), c.id()]);
    }

    #[tokio::test]
    async fn games_are_independent_sessions() {
        let registry = GameRegistry::new();
        let first = registry.create_game(6, &words()).unwrap();
        let second = registry.create_game(6, &words()).unwrap();
        assert_ne!(first, second);

        let game = registry.get(first).unwrap();
        game.lock().await.guess("CRANE").unwrap();

        assert_eq!(game.lock().await.current_round(), 1);
        assert_eq!(registry.get(second).unwrap().lock().await.current_round(), 0);
        assert!(registry.get(99).is_none());
        assert_eq!(registry.len(), 2);
    }
}
