//! Letter scoring for five-letter guesses, including duplicate-letter accounting.

use std::{
    fmt::{self, Write},
    str::FromStr,
};

use thiserror::Error;

/// Number of letters in every playable word.
pub const WORD_LENGTH: usize = 5;

const ALPHABET_SIZE: usize = 26;

/// Per-letter verdict for a scored guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterOutcome {
    /// Right letter in the right position.
    Hit,
    /// Letter occurs in the answer, but not at this position.
    Present,
    /// Letter is absent, or all of its occurrences were already consumed.
    Miss,
}

impl LetterOutcome {
    /// Display symbol used by clients (`O`, `?`, `_`).
    pub fn symbol(self) -> &'static str {
        match self {
            LetterOutcome::Hit => "O",
            LetterOutcome::Present => "?",
            LetterOutcome::Miss => "_",
        }
    }
}

/// Rejected word input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid word `{0}`: must be 5 letters, alphabetic only")]
pub struct InvalidWord(pub String);

/// A validated, upper-cased five-letter word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Validate and normalise raw input.
    ///
    /// Surrounding whitespace is ignored and letters are upper-cased. Anything other than exactly
    /// five ASCII letters is rejected.
    pub fn parse(raw: &str) -> Result<Self, InvalidWord> {
        let trimmed = raw.trim();
        let mut letters = [0u8; WORD_LENGTH];
        let mut count = 0;

        for ch in trimmed.chars() {
            if count == WORD_LENGTH || !ch.is_ascii_alphabetic() {
                return Err(InvalidWord(raw.to_string()));
            }
            letters[count] = ch.to_ascii_uppercase() as u8;
            count += 1;
        }

        if count != WORD_LENGTH {
            return Err(InvalidWord(raw.to_string()));
        }

        Ok(Self(letters))
    }

    fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }
}

impl FromStr for Word {
    type Err = InvalidWord;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|letter| f.write_char(char::from(*letter)))
    }
}

/// Score `guess` against `answer`.
///
/// Exact matches are resolved first and consume their letter from the answer's letter counts; the
/// remaining positions are then marked `Present` only while unconsumed copies of that letter are
/// left. A guessed letter repeated more often than it occurs in the answer therefore degrades to
/// `Miss` for the surplus copies.
pub fn evaluate(guess: &Word, answer: &Word) -> [LetterOutcome; WORD_LENGTH] {
    let mut remaining = [0u8; ALPHABET_SIZE];
    for letter in answer.letters() {
        remaining[slot(*letter)] += 1;
    }

    let mut outcomes = [LetterOutcome::Miss; WORD_LENGTH];

    for (index, (guessed, expected)) in guess.letters().iter().zip(answer.letters()).enumerate() {
        if guessed == expected {
            outcomes[index] = LetterOutcome::Hit;
            remaining[slot(*guessed)] -= 1;
        }
    }

    for (index, guessed) in guess.letters().iter().enumerate() {
        if outcomes[index] == LetterOutcome::Hit {
            continue;
        }

        let left = &mut remaining[slot(*guessed)];
        if *left > 0 {
            outcomes[index] = LetterOutcome::Present;
            *left -= 1;
        }
    }

    outcomes
}

/// Render outcomes as their display symbols.
pub fn symbols(outcomes: &[LetterOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .map(|outcome| outcome.symbol().to_string())
        .collect()
}

fn slot(letter: u8) -> usize {
    usize::from(letter - b'A')
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterOutcome::{Hit, Miss, Present};

    fn word(raw: &str) -> Word {
        Word::parse(raw).unwrap()
    }

    const SAMPLE: [&str; 10] = [
        "CRANE", "SLATE", "APPLE", "HOUSE", "SPEED", "ERASE", "GEESE", "LLAMA", "MUSIC", "PIANO",
    ];

    #[test]
    fn parse_normalises_case_and_whitespace() {
        assert_eq!(word("apple").to_string(), "APPLE");
        assert_eq!(word("  ApPlE\n").to_string(), "APPLE");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for raw in ["APP", "APPLES", "APP1E", "APP-E", "", "  ABC  ", "ÄPPLE", "AP PLE"] {
            assert_eq!(Word::parse(raw), Err(InvalidWord(raw.to_string())), "{raw:?}");
        }
    }

    #[test]
    fn identical_words_are_all_hits() {
        for raw in SAMPLE {
            assert_eq!(evaluate(&word(raw), &word(raw)), [Hit; WORD_LENGTH]);
        }
    }

    #[test]
    fn disjoint_words_are_all_misses() {
        assert_eq!(evaluate(&word("BRICK"), &word("MOUND")), [Miss; WORD_LENGTH]);
    }

    #[test]
    fn duplicate_letters_only_count_unconsumed_copies() {
        assert_eq!(
            evaluate(&word("SPEED"), &word("ERASE")),
            [Present, Miss, Present, Present, Miss]
        );
        assert_eq!(
            evaluate(&word("GEESE"), &word("ERASE")),
            [Miss, Present, Miss, Hit, Hit]
        );
    }

    #[test]
    fn mixed_outcomes_match_reference_vectors() {
        assert_eq!(
            evaluate(&word("BRAIN"), &word("APPLE")),
            [Miss, Miss, Present, Miss, Miss]
        );
        assert_eq!(
            evaluate(&word("PLEAS"), &word("APPLE")),
            [Present, Present, Present, Present, Miss]
        );
    }

    #[test]
    fn marks_never_exceed_answer_letter_counts() {
        for guess in SAMPLE {
            for answer in SAMPLE {
                let outcomes = evaluate(&word(guess), &word(answer));
                for letter in guess.bytes() {
                    let marked = guess
                        .bytes()
                        .zip(outcomes)
                        .filter(|(l, outcome)| *l == letter && *outcome != Miss)
                        .count();
                    let available = answer.bytes().filter(|l| *l == letter).count();
                    assert!(
                        marked <= available,
                        "{guess} vs {answer}: letter {} marked {marked} times",
                        char::from(letter)
                    );
                }
            }
        }
    }

    #[test]
    fn symbols_follow_display_convention() {
        assert_eq!(symbols(&[Hit, Present, Miss, Hit, Present]).concat(), "O?_O?");
    }
}
