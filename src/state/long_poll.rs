//! Version-based long polling over a room's update channel.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::state::room::{Room, RoomProgress};

/// How long a progress request may block before answering with the current state.
pub const LONG_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait until the room's version exceeds `last_version`, or until `limit` elapses, then return a
/// fresh snapshot.
///
/// When the room already moved past `last_version` the snapshot is returned immediately. A caller
/// ahead of the room (`last_version` greater than the current version) simply waits out the limit.
/// Dropping the returned future abandons the wait without side effects.
pub async fn wait_for_progress(room: &Room, last_version: u64, limit: Duration) -> RoomProgress {
    // Subscribing before the check closes the gap between reading the version and waiting.
    let mut updates = room.subscribe();
    let changed = timeout(limit, async {
        updates
            .wait_for(|version| *version > last_version)
            .await
            .map(|_| ())
    })
    .await;

    match changed {
        Ok(Ok(())) => {}
        // The sender lives as long as the room, which the caller holds.
        Ok(Err(_)) => {}
        Err(_) => debug!(room_id = room.id(), last_version, "long poll timed out"),
    }

    room.progress().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::{scoring::Word, state_machine::RoomPhase};

    fn room() -> Arc<Room> {
        Arc::new(Room::new(
            1,
            "alice".into(),
            "Alice".into(),
            Word::parse("APPLE").unwrap(),
            6,
            8,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_room_blocks_at_version_zero() {
        let room = room();

        let started = tokio::time::Instant::now();
        let progress = wait_for_progress(&room, 0, LONG_POLL_TIMEOUT).await;
        assert_eq!(progress.version, 0);
        assert_eq!(progress.phase, RoomPhase::Waiting);
        assert!(started.elapsed() >= LONG_POLL_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_immediately_when_room_is_ahead() {
        let room = room();
        room.join("bob".into(), "Bob".into()).await.unwrap();

        let started = tokio::time::Instant::now();
        let progress = wait_for_progress(&room, 0, LONG_POLL_TIMEOUT).await;
        assert_eq!(progress.version, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn wakes_on_next_mutation() {
        let room = room();

        let waiter = {
            let room = room.clone();
            tokio::spawn(async move { wait_for_progress(&room, 0, LONG_POLL_TIMEOUT).await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        room.join("bob".into(), "Bob".into()).await.unwrap();
        let progress = waiter.await.unwrap();
        assert_eq!(progress.version, 1);
        assert_eq!(progress.players.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn one_mutation_wakes_every_waiter() {
        let room = room();

        let waiters = (0..5)
            .map(|_| {
                let room = room.clone();
                tokio::spawn(
                    async move { wait_for_progress(&room, 0, LONG_POLL_TIMEOUT).await },
                )
            })
            .collect::<Vec<_>>();
        tokio::task::yield_now().await;

        room.join("bob".into(), "Bob".into()).await.unwrap();

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap().version, 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_with_current_snapshot() {
        let room = room();

        let started = tokio::time::Instant::now();
        let progress = wait_for_progress(&room, 0, Duration::from_secs(5)).await;
        assert_eq!(progress.version, 0);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn caller_ahead_of_room_waits_out_the_limit() {
        let room = room();

        let started = tokio::time::Instant::now();
        let progress = wait_for_progress(&room, 42, Duration::from_secs(3)).await;
        assert_eq!(progress.version, 0);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_waiter_leaves_room_untouched() {
        let room = room();
        let waiter = {
            let room = room.clone();
            tokio::spawn(async move { wait_for_progress(&room, 0, LONG_POLL_TIMEOUT).await })
        };
        tokio::task::yield_now().await;
        waiter.abort();
        let _ = waiter.await;

        room.join("bob".into(), "Bob".into()).await.unwrap();
        assert_eq!(room.version(), 1);
    }
}
