//! Application-level configuration loading, including the playable word list.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use rand::seq::IndexedRandom;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::scoring::Word;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "WORDLE_RACE_CONFIG_PATH";
/// Environment variable naming a plain-text words file (one word per line).
const WORDS_PATH_ENV: &str = "WORDLE_RACE_WORDS_PATH";
/// Round budget used when the configuration does not provide one.
pub const DEFAULT_MAX_ROUNDS: u32 = 6;

const DEFAULT_WORDS: [&str; 20] = [
    "CRANE", "SLATE", "ABOUT", "APPLE", "HOUSE", "WORLD", "THINK", "GREAT", "PLACE", "BRAIN",
    "PHONE", "SMILE", "LIGHT", "PEACE", "DREAM", "OCEAN", "PIANO", "BREAD", "MUSIC", "TABLE",
];

/// Problems found while building the runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The word list has no valid entries.
    #[error("word list has no valid five-letter word")]
    EmptyWordList,
    /// `max_rounds` must be at least one.
    #[error("max_rounds must be positive")]
    InvalidMaxRounds,
}

/// Validated, non-empty list of candidate answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList(Vec<Word>);

impl WordList {
    /// Validate raw entries, keeping the valid ones. Blank entries are skipped silently and other
    /// malformed entries with a warning. Fails only when nothing valid is left.
    pub fn new<I, S>(raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = raw
            .into_iter()
            .filter(|entry| !entry.as_ref().trim().is_empty())
            .filter_map(|entry| match Word::parse(entry.as_ref()) {
                Ok(word) => Some(word),
                Err(err) => {
                    warn!(error = %err, "skipping word list entry");
                    None
                }
            })
            .collect::<Vec<_>>();

        if words.is_empty() {
            return Err(ConfigError::EmptyWordList);
        }

        Ok(Self(words))
    }

    /// Parse a words file: one word per line.
    pub fn from_lines(contents: &str) -> Result<Self, ConfigError> {
        Self::new(contents.lines())
    }

    /// Uniformly random word from the list.
    pub fn pick(&self) -> Result<Word, ConfigError> {
        self.0
            .choose(&mut rand::rng())
            .copied()
            .ok_or(ConfigError::EmptyWordList)
    }

    /// Number of candidate answers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `word` is one of the candidates.
    pub fn contains(&self, word: &Word) -> bool {
        self.0.contains(word)
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self(
            DEFAULT_WORDS
                .iter()
                .filter_map(|raw| Word::parse(raw).ok())
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    max_rounds: u32,
    words: WordList,
}

impl AppConfig {
    /// Build a configuration from already validated parts.
    pub fn new(max_rounds: u32, words: WordList) -> Result<Self, ConfigError> {
        if max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        Ok(Self { max_rounds, words })
    }

    /// Load the application configuration from disk, falling back to the built-in defaults.
    ///
    /// A words file named by `WORDLE_RACE_WORDS_PATH` replaces whatever list the JSON file holds.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents)
                .map_err(|err| err.to_string())
                .and_then(|raw| Self::try_from(raw).map_err(|err| err.to_string()))
            {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        max_rounds = config.max_rounds,
                        words = config.words.len(),
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "invalid config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        match env::var_os(WORDS_PATH_ENV).filter(|value| !value.is_empty()) {
            Some(words_path) => config.with_words_file(PathBuf::from(words_path)),
            None => config,
        }
    }

    fn with_words_file(self, path: PathBuf) -> Self {
        let words = fs::read_to_string(&path)
            .map_err(|err| err.to_string())
            .and_then(|contents| WordList::from_lines(&contents).map_err(|err| err.to_string()));

        match words {
            Ok(words) => {
                info!(path = %path.display(), words = words.len(), "loaded words file");
                Self { words, ..self }
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load words file; keeping configured list"
                );
                self
            }
        }
    }

    /// Rounds each player gets.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Candidate answers.
    pub fn words(&self) -> &WordList {
        &self.words
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            words: WordList::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    word_list: Option<Vec<String>>,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(value: RawConfig) -> Result<Self, Self::Error> {
        let words = match value.word_list {
            Some(list) => WordList::new(list)?,
            None => WordList::default(),
        };
        Self::new(value.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS), words)
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
