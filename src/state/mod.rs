pub mod long_poll;
pub mod ranking;
pub mod registry;
pub mod room;
pub mod scoring;
/// Single-player guessing sessions.
pub mod session;
/// Room phases and the version counter.
pub mod state_machine;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::config::AppConfig;

pub use self::registry::{GameId, GameRegistry, RoomRegistry};
pub use self::room::{PlayerId, Room, RoomError, RoomId};

/// Handle shared by every handler.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration plus every room and single-player game.
pub struct AppState {
    config: AppConfig,
    rooms: RoomRegistry,
    games: GameRegistry,
    player_ids: AtomicU64,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            rooms: RoomRegistry::new(),
            games: GameRegistry::new(),
            player_ids: AtomicU64::new(0),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Multiplayer rooms.
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Single-player games.
    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    /// Allocate a process-wide unique player id (`player-1`, `player-2`, ...).
    pub fn next_player_id(&self) -> PlayerId {
        let n = self.player_ids.fetch_add(1, Ordering::Relaxed) + 1;
        format!("player-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_ids_are_sequential_and_unique() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(state.next_player_id(), "player-1");
        assert_eq!(state.next_player_id(), "player-2");
    }
}
