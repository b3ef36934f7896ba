use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::games::hangman::game::{Difficulty, Language};

pub const WINS_KEY: &str = "hangmanWins";
pub const LOSSES_KEY: &str = "hangmanLosses";
pub const HISTORY_KEY: &str = "hangmanLeaderboard";

pub const STORAGE_FILE: &str = "storage.json";

/// Flat string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys kept in one JSON object on disk, rewritten on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Opens the file, starting empty if it is missing or unreadable.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(error) => {
                warn!(%error, path = %path.display(), "could not read storage, starting empty");
                Self { path, entries: BTreeMap::new() }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn label(self) -> &'static str {
        match self {
            GameResult::Win => "Win",
            GameResult::Loss => "Loss",
        }
    }
}

/// One finished game. Appended once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: String,
    pub result: GameResult,
    pub word: String,
    pub difficulty: Difficulty,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTotals {
    pub wins: u32,
    pub losses: u32,
}

/// Win/loss counters and game history, backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct ResultStore<S> {
    store: S,
    totals: ScoreTotals,
    history: Vec<GameRecord>,
}

impl<S: KeyValueStore> ResultStore<S> {
    pub fn load(store: S) -> Self {
        let totals = Self::load_totals(&store);
        let history = Self::load_history(&store);
        info!(wins = totals.wins, losses = totals.losses, games = history.len(), "results loaded");
        Self { store, totals, history }
    }

    pub fn load_totals(store: &S) -> ScoreTotals {
        ScoreTotals {
            wins: read_counter(store, WINS_KEY),
            losses: read_counter(store, LOSSES_KEY),
        }
    }

    pub fn load_history(store: &S) -> Vec<GameRecord> {
        let raw = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(%error, "could not read game history");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "stored game history is corrupt, starting fresh");
            Vec::new()
        })
    }

    /// Counts the game and appends it to the history. Storage failures are
    /// logged; the in-memory totals still move.
    pub fn record_result(
        &mut self,
        result: GameResult,
        word: &str,
        difficulty: Difficulty,
        language: Language,
    ) -> &GameRecord {
        let (key, count) = match result {
            GameResult::Win => {
                self.totals.wins += 1;
                (WINS_KEY, self.totals.wins)
            }
            GameResult::Loss => {
                self.totals.losses += 1;
                (LOSSES_KEY, self.totals.losses)
            }
        };
        self.write(key, count.to_string());

        self.history.push(GameRecord {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            result,
            word: word.to_string(),
            difficulty,
            language,
        });
        match serde_json::to_string(&self.history) {
            Ok(json) => self.write(HISTORY_KEY, json),
            Err(error) => warn!(%error, "could not encode game history"),
        }
        info!(result = result.label(), word, %difficulty, %language, "game recorded");

        &self.history[self.history.len() - 1]
    }

    fn write(&mut self, key: &str, value: String) {
        if let Err(error) = self.store.set(key, value) {
            warn!(%error, key, "could not persist value");
        }
    }

    pub fn totals(&self) -> ScoreTotals {
        self.totals
    }

    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn read_counter<S: KeyValueStore>(store: &S, key: &str) -> u32 {
    match store.get(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "stored counter is not a number, using 0");
            0
        }),
        Ok(None) => 0,
        Err(error) => {
            warn!(%error, key, "could not read counter");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_loads_defaults() {
        let results = ResultStore::load(MemoryStore::new());
        assert_eq!(results.totals(), ScoreTotals::default());
        assert!(results.history().is_empty());
    }

    #[test]
    fn recording_a_win_counts_and_persists() {
        let mut results = ResultStore::load(MemoryStore::new());
        let record = results
            .record_result(GameResult::Win, "cat", Difficulty::Medium, Language::English)
            .clone();
        assert_eq!(record.result, GameResult::Win);
        assert_eq!(record.word, "cat");
        assert_eq!(results.totals(), ScoreTotals { wins: 1, losses: 0 });

        let store = results.store();
        assert_eq!(store.get(WINS_KEY).unwrap().as_deref(), Some("1"));
        assert_eq!(store.get(LOSSES_KEY).unwrap(), None);
        let history: Vec<GameRecord> =
            serde_json::from_str(&store.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(history, vec![record]);
    }

    #[test]
    fn record_serializes_with_short_codes() {
        let record = GameRecord {
            date: "2024-01-01 10:00:00".into(),
            result: GameResult::Loss,
            word: "sol".into(),
            difficulty: Difficulty::Hard,
            language: Language::Spanish,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["result"], "Loss");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["language"], "es");
    }

    #[test]
    fn corrupt_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(WINS_KEY, "many".into()).unwrap();
        store.set(LOSSES_KEY, "4".into()).unwrap();
        store.set(HISTORY_KEY, "{not json".into()).unwrap();
        let results = ResultStore::load(store);
        assert_eq!(results.totals(), ScoreTotals { wins: 0, losses: 4 });
        assert!(results.history().is_empty());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORAGE_FILE);

        let mut results = ResultStore::load(FileStore::open(&path).unwrap());
        results.record_result(GameResult::Loss, "chien", Difficulty::Easy, Language::French);
        results.record_result(GameResult::Win, "chat", Difficulty::Easy, Language::French);

        let reopened = ResultStore::load(FileStore::open(&path).unwrap());
        assert_eq!(reopened.totals(), ScoreTotals { wins: 1, losses: 1 });
        let words: Vec<_> = reopened.history().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, ["chien", "chat"]);
    }

    #[test]
    fn unreadable_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, "garbage").unwrap();
        assert!(FileStore::open(&path).is_err());
        let store = FileStore::open_or_empty(&path);
        assert_eq!(store.get(WINS_KEY).unwrap(), None);
    }
}
