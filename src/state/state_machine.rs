use thiserror::Error;

/// High-level phases a room goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Lobby: players may join and leave, the host may start.
    Waiting,
    /// The race is on; guesses are accepted.
    Playing,
    /// Someone won or everybody ran out of rounds.
    Finished,
}

/// Events that move a room between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    /// Host starts the race.
    Start,
    /// The race ended.
    Finish,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the room was in when the invalid event was received.
    pub from: RoomPhase,
    /// The event that cannot be applied from this phase.
    pub event: RoomEvent,
}

/// Snapshot of the current state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase of the room.
    pub phase: RoomPhase,
    /// Version number of the room (increments on each committed mutation).
    pub version: u64,
}

/// Phase and version bookkeeping for a room.
///
/// The version counts committed mutations of the whole room, not only phase changes: callers
/// apply any phase transition first and then [`commit`](Self::commit) exactly once per accepted
/// operation.
#[derive(Debug, Clone)]
pub struct RoomStateMachine {
    phase: RoomPhase,
    version: u64,
}

impl Default for RoomStateMachine {
    fn default() -> Self {
        Self {
            phase: RoomPhase::Waiting,
            version: 0,
        }
    }
}

impl RoomStateMachine {
    /// Create a new state machine initialised in the waiting phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// Inspect the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Create a snapshot of the current state machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            version: self.version,
        }
    }

    /// Apply `event`, returning the phase reached.
    pub fn apply(&mut self, event: RoomEvent) -> Result<RoomPhase, InvalidTransition> {
        self.phase = self.compute_transition(event)?;
        Ok(self.phase)
    }

    /// Record one accepted mutation and return the new version.
    pub fn commit(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: RoomEvent) -> Result<RoomPhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (RoomPhase::Waiting, RoomEvent::Start) => RoomPhase::Playing,
            (RoomPhase::Playing, RoomEvent::Finish) => RoomPhase::Finished,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_waiting() {
        let sm = RoomStateMachine::new();
        assert_eq!(
            sm.snapshot(),
            Snapshot {
                phase: RoomPhase::Waiting,
                version: 0
            }
        );
    }

    #[test]
    fn full_happy_path_through_race() {
        let mut sm = RoomStateMachine::new();
        assert_eq!(sm.apply(RoomEvent::Start), Ok(RoomPhase::Playing));
        assert_eq!(sm.apply(RoomEvent::Finish), Ok(RoomPhase::Finished));
    }

    #[test]
    fn phases_never_go_backwards() {
        let mut sm = RoomStateMachine::new();
        sm.apply(RoomEvent::Start).unwrap();

        let err = sm.apply(RoomEvent::Start).unwrap_err();
        assert_eq!(
            err,
            InvalidTransition {
                from: RoomPhase::Playing,
                event: RoomEvent::Start
            }
        );

        sm.apply(RoomEvent::Finish).unwrap();
        for event in [RoomEvent::Start, RoomEvent::Finish] {
            assert!(sm.apply(event).is_err());
            assert_eq!(sm.phase(), RoomPhase::Finished);
        }
    }

    #[test]
    fn finishing_from_waiting_is_rejected() {
        let mut sm = RoomStateMachine::new();
        let err = sm.apply(RoomEvent::Finish).unwrap_err();
        assert_eq!(err.from, RoomPhase::Waiting);
        assert_eq!(sm.phase(), RoomPhase::Waiting);
    }

    #[test]
    fn transitions_do_not_bump_version_until_committed() {
        let mut sm = RoomStateMachine::new();
        sm.apply(RoomEvent::Start).unwrap();
        assert_eq!(sm.version(), 0);
        assert_eq!(sm.commit(), 1);
        assert_eq!(sm.commit(), 2);
        assert_eq!(sm.snapshot().version, 2);
    }
}
