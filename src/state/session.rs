use thiserror::Error;

use crate::state::scoring::{InvalidWord, LetterOutcome, WORD_LENGTH, Word, evaluate};

/// Lifecycle of a single guessing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Guesses are still accepted.
    InProgress,
    /// The answer was guessed.
    Won,
    /// Every round was used without finding the answer.
    Lost,
}

impl SessionStatus {
    /// Whether the session accepts no further guesses.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }
}

/// Errors raised when a guess is rejected by a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// The guess is not a five-letter alphabetic word.
    #[error(transparent)]
    InvalidGuess(#[from] InvalidWord),
    /// The session already reached a terminal status.
    #[error("game is already over")]
    GameAlreadyOver,
}

/// One accepted guess and the session state right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Normalised guess.
    pub guess: Word,
    /// Per-letter outcomes in guess order.
    pub outcomes: [LetterOutcome; WORD_LENGTH],
    /// One-based round number this guess consumed.
    pub round: u32,
    /// Round budget of the session.
    pub max_rounds: u32,
    /// Session status once this guess was applied.
    pub status: SessionStatus,
}

/// Bounded-round guessing state machine for one player.
#[derive(Debug, Clone)]
pub struct GameSession {
    answer: Word,
    max_rounds: u32,
    history: Vec<RoundResult>,
    status: SessionStatus,
}

impl GameSession {
    /// Start a fresh session. `max_rounds` is validated by the callers owning configuration.
    pub fn new(answer: Word, max_rounds: u32) -> Self {
        Self {
            answer,
            max_rounds,
            history: Vec::new(),
            status: SessionStatus::InProgress,
        }
    }

    /// Submit a raw guess.
    pub fn guess(&mut self, raw: &str) -> Result<&RoundResult, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::GameAlreadyOver);
        }

        let guess = Word::parse(raw)?;
        let round = self.current_round() + 1;
        let outcomes = evaluate(&guess, &self.answer);

        self.status = if guess == self.answer {
            SessionStatus::Won
        } else if round >= self.max_rounds {
            SessionStatus::Lost
        } else {
            SessionStatus::InProgress
        };

        self.history.push(RoundResult {
            guess,
            outcomes,
            round,
            max_rounds: self.max_rounds,
            status: self.status,
        });

        Ok(&self.history[self.history.len() - 1])
    }

    /// Rounds consumed so far; always equal to the history length.
    pub fn current_round(&self) -> u32 {
        self.history.len() as u32
    }

    /// Round budget of the session.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Accepted guesses, oldest first.
    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    /// Most recent accepted guess.
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.history.last()
    }

    /// The answer, only once the session is over.
    pub fn revealed_answer(&self) -> Option<Word> {
        self.status.is_terminal().then_some(self.answer)
    }
}
