//! Budget Jigsaw - two small browser apps sharing one persistence layer
//!
//! Core modules:
//! - `finance`: transactions, categories, summary, export/import
//! - `puzzle`: piece generation, game rules, timer, drag tracking
//! - `highscores`: puzzle leaderboard
//! - `settings`: theme preference
//! - `persistence`: best-effort key/value storage (LocalStorage on web)
//! - `platform`: Browser/native platform abstraction

pub mod finance;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod puzzle;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use finance::FinanceTracker;
pub use highscores::HighScores;
pub use persistence::Storage;
pub use puzzle::PuzzleGame;
pub use settings::{Theme, ThemePreference};

/// App configuration constants
pub mod consts {
    /// Storage keys
    pub const TRANSACTIONS_KEY: &str = "expense-tracker-transactions";
    pub const CATEGORIES_KEY: &str = "expense-tracker-categories";
    pub const THEME_KEY: &str = "expense-tracker-theme";
    pub const GAME_STATE_KEY: &str = "puzzleGameState";
    pub const HIGH_SCORES_KEY: &str = "puzzleHighScores";

    /// Max per-axis distance (pixels) for a piece to snap into place
    pub const SNAP_TOLERANCE: f32 = 30.0;
    /// Piece count offered by default (4x4)
    pub const DEFAULT_DIFFICULTY: u32 = 16;
    /// Largest board side accepted (10x10 pieces)
    pub const MAX_GRID_SIDE: u32 = 10;
    /// Game timer period
    pub const TICK_INTERVAL_MS: i32 = 1000;

    /// Native data directory override
    pub const DATA_DIR_ENV: &str = "BUDGET_JIGSAW_DATA_DIR";
    pub const DEFAULT_DATA_DIR: &str = "budget-jigsaw-data";
}
