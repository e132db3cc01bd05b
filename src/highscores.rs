//! Puzzle leaderboard
//!
//! Persisted under `puzzleHighScores`, keeps the 10 fastest completions.

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORES_KEY;
use crate::persistence::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Piece count of the puzzle
    pub difficulty: u32,
    /// Seconds taken
    pub time: u32,
    /// Moves made
    pub moves: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, fastest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time would make the leaderboard
    pub fn qualifies(&self, time: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| time < e.time).unwrap_or(true)
    }

    /// Record a completion. Returns the rank achieved (1-indexed) or None if
    /// it was trimmed off the board.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        // Ties go after existing entries with the same time
        let pos = self
            .entries
            .iter()
            .position(|e| entry.time < e.time)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fastest time (if any)
    pub fn best_time(&self) -> Option<u32> {
        self.entries.first().map(|e| e.time)
    }

    /// Entries for one puzzle size, fastest first
    pub fn for_difficulty(&self, difficulty: u32) -> impl Iterator<Item = &HighScoreEntry> {
        self.entries
            .iter()
            .filter(move |e| e.difficulty == difficulty)
    }

    /// Load high scores; empty board when missing or unreadable
    pub fn load(storage: &Storage) -> Self {
        let mut scores: HighScores = storage.load(HIGH_SCORES_KEY, Self::new());
        // Hand-edited or legacy boards may be unsorted or too long
        scores.entries.sort_by_key(|e| e.time);
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save(&self, storage: &Storage) {
        storage.save(HIGH_SCORES_KEY, self);
        log::info!("High scores saved ({} entries)", self.entries.len());
    }
}
