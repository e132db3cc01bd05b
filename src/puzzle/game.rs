//! Puzzle session: state plus timer, leaderboard and persistence
//!
//! Every mutating call saves `puzzleGameState` before returning.

use glam::Vec2;

use super::piece::Location;
use super::rules::{self, MoveOutcome};
use super::state::{GameConfig, GameState};
use super::timer::{IntervalId, Timer};
use super::{ImageHandle, PuzzleError};
use crate::consts::GAME_STATE_KEY;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::Storage;
use crate::platform;

#[derive(Debug)]
pub struct PuzzleGame {
    state: GameState,
    image: Option<ImageHandle>,
    config: GameConfig,
    timer: Timer,
    high_scores: HighScores,
    storage: Storage,
}

impl PuzzleGame {
    /// Fresh session (ignores any saved game)
    pub fn new(storage: Storage, config: GameConfig) -> Self {
        Self {
            state: GameState::new(config.default_difficulty),
            image: None,
            config,
            timer: Timer::new(),
            high_scores: HighScores::load(&storage),
            storage,
        }
    }

    /// Session resumed from the saved game, if there is one. The timer stays
    /// stopped until the image is attached again.
    pub fn restore(storage: Storage, config: GameConfig) -> Self {
        let mut game = Self::new(storage, config);
        game.state = game
            .storage
            .load(GAME_STATE_KEY, GameState::new(config.default_difficulty));
        if game.state.is_playing {
            log::info!(
                "Restored puzzle: {}/{} pieces placed",
                game.state.placed_pieces,
                game.state.total_pieces
            );
        }
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Interval the host should be ticking, if the clock is running
    pub fn active_interval(&self) -> Option<IntervalId> {
        self.timer.active()
    }

    /// Attach a decoded image. If it belongs to a restored game in progress
    /// the timer resumes and the new interval is returned.
    pub fn upload_image(&mut self, image: ImageHandle) -> Option<IntervalId> {
        let resumes = self.state.is_playing
            && !self.state.is_completed
            && self.state.image_url.as_deref() == Some(image.url.as_str());
        self.state.image_url = Some(image.url.clone());
        self.image = Some(image);

        let interval = resumes.then(|| self.timer.start());
        self.save();
        interval
    }

    /// Start a new puzzle on the current image
    pub fn start_puzzle(&mut self, difficulty: u32) -> Result<IntervalId, PuzzleError> {
        self.start_puzzle_seeded(difficulty, platform::now_ms() as u64)
    }

    /// Start a new puzzle with a fixed seed (edge shapes and tray order)
    pub fn start_puzzle_seeded(
        &mut self,
        difficulty: u32,
        seed: u64,
    ) -> Result<IntervalId, PuzzleError> {
        let image = self.image.as_ref().ok_or(PuzzleError::NoImage)?;
        self.state = GameState::start(image, difficulty, seed)?;
        log::info!("Started {difficulty}-piece puzzle (seed {seed})");

        let interval = self.timer.start();
        self.save();
        Ok(interval)
    }

    /// Drop the puzzle and the image, and forget the saved game
    pub fn reset(&mut self) {
        self.timer.stop();
        self.state = GameState::new(self.config.default_difficulty);
        self.image = None;
        self.storage.remove(GAME_STATE_KEY);
    }

    pub fn move_piece(&mut self, id: u32, location: Location, pos: Vec2) -> MoveOutcome {
        let outcome = rules::move_piece(&mut self.state, id, location, pos, &self.config);
        match outcome {
            MoveOutcome::NotFound | MoveOutcome::Pinned => return outcome,
            MoveOutcome::Moved { completed, .. } => {
                if completed {
                    self.timer.stop();
                    self.record_high_score();
                }
            }
        }
        self.save();
        outcome
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.state.show_preview = !self.state.show_preview;
        self.save();
        self.state.show_preview
    }

    /// One second elapsed on interval `id`. Stale intervals are ignored.
    pub fn tick(&mut self, id: IntervalId) -> bool {
        if !self.timer.tick(id) {
            return false;
        }
        self.state.elapsed_time += 1;
        true
    }

    fn record_high_score(&mut self) {
        let time = self.state.elapsed_time;
        if !self.high_scores.qualifies(time) {
            log::info!("Completed in {time}s, not a high score");
            return;
        }
        let entry = HighScoreEntry {
            difficulty: self.state.difficulty,
            time,
            moves: self.state.move_count,
            timestamp: platform::now_ms(),
        };
        if let Some(rank) = self.high_scores.add_score(entry) {
            log::info!("New high score, rank {rank}");
        }
        self.high_scores.save(&self.storage);
    }

    fn save(&self) {
        self.storage.save(GAME_STATE_KEY, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORES_KEY;
    use crate::highscores::MAX_HIGH_SCORES;

    fn image() -> ImageHandle {
        ImageHandle::new("blob:puzzle", 200, 200)
    }

    fn game(storage: &Storage) -> PuzzleGame {
        let mut game = PuzzleGame::new(storage.clone(), GameConfig::default());
        game.upload_image(image());
        game
    }

    /// Let `seconds` tick by, then drop every piece on its spot
    fn solve(game: &mut PuzzleGame, seconds: u32) {
        let interval = game.active_interval().unwrap();
        for _ in 0..seconds {
            game.tick(interval);
        }
        let targets: Vec<(u32, Vec2)> = game
            .state()
            .pieces
            .iter()
            .map(|p| (p.id, p.correct_pos))
            .collect();
        for (id, pos) in targets {
            game.move_piece(id, Location::Assembly, pos);
        }
    }

    #[test]
    fn test_start_requires_image() {
        let mut game = PuzzleGame::new(Storage::in_memory(), GameConfig::default());
        assert_eq!(game.start_puzzle(4).unwrap_err(), PuzzleError::NoImage);
    }

    #[test]
    fn test_start_rejects_non_square() {
        let mut game = game(&Storage::in_memory());
        assert!(matches!(
            game.start_puzzle(15),
            Err(PuzzleError::InvalidConfiguration { piece_count: 15 })
        ));
        assert_eq!(game.active_interval(), None);
    }

    #[test]
    fn test_ticks_only_count_for_live_interval() {
        let mut game = game(&Storage::in_memory());
        let first = game.start_puzzle_seeded(4, 1).unwrap();
        assert!(game.tick(first));

        let second = game.start_puzzle_seeded(4, 2).unwrap();
        assert!(!game.tick(first));
        assert!(game.tick(second));
        assert_eq!(game.state().elapsed_time, 1);
    }

    #[test]
    fn test_completion_records_one_high_score() {
        let storage = Storage::in_memory();
        let mut game = game(&storage);
        game.start_puzzle_seeded(4, 3).unwrap();
        solve(&mut game, 42);

        assert!(game.state().is_completed);
        assert_eq!(game.active_interval(), None);
        assert_eq!(game.high_scores().entries.len(), 1);
        let entry = &game.high_scores().entries[0];
        assert_eq!((entry.difficulty, entry.time, entry.moves), (4, 42, 0));

        // Further moves on a finished board change nothing
        game.move_piece(0, Location::Assembly, Vec2::ZERO);
        assert_eq!(game.high_scores().entries.len(), 1);
        assert_eq!(HighScores::load(&storage).entries.len(), 1);
    }

    #[test]
    fn test_leaderboard_never_exceeds_cap() {
        let storage = Storage::in_memory();
        let mut game = game(&storage);
        for round in 0..15u32 {
            game.start_puzzle_seeded(4, round as u64).unwrap();
            solve(&mut game, 100 - round);
        }
        let scores = HighScores::load(&storage);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best_time(), Some(86));
        assert!(storage.load_token(HIGH_SCORES_KEY).is_some());
    }

    #[test]
    fn test_slow_completion_leaves_full_board_alone() {
        let storage = Storage::in_memory();
        let mut full = HighScores::new();
        for time in 1..=MAX_HIGH_SCORES as u32 {
            full.add_score(HighScoreEntry {
                difficulty: 4,
                time,
                moves: 0,
                timestamp: 0.0,
            });
        }
        full.save(&storage);

        let mut game = game(&storage);
        game.start_puzzle_seeded(4, 6).unwrap();
        solve(&mut game, 500);
        assert!(game.state().is_completed);
        assert_eq!(game.high_scores(), &full);
        assert_eq!(HighScores::load(&storage), full);
    }

    #[test]
    fn test_every_move_is_saved_and_restorable() {
        let storage = Storage::in_memory();
        let mut game = game(&storage);
        game.start_puzzle_seeded(9, 4).unwrap();
        let interval = game.active_interval().unwrap();
        game.tick(interval);
        let pos = game.state().piece(4).unwrap().correct_pos;
        game.move_piece(4, Location::Assembly, pos);

        let mut restored = PuzzleGame::restore(storage.clone(), GameConfig::default());
        assert_eq!(restored.state(), game.state());
        assert_eq!(restored.active_interval(), None);

        // Re-attaching the same image resumes the clock
        assert!(restored.upload_image(image()).is_some());

        // A different image does not
        let mut other = PuzzleGame::restore(storage, GameConfig::default());
        let other_image = ImageHandle::new("blob:other", 10, 10);
        assert!(other.upload_image(other_image).is_none());
    }

    #[test]
    fn test_reset_clears_saved_game() {
        let storage = Storage::in_memory();
        let mut game = game(&storage);
        game.start_puzzle_seeded(4, 5).unwrap();
        game.reset();

        assert!(game.state().pieces.is_empty());
        assert!(game.image().is_none());
        assert_eq!(game.active_interval(), None);
        assert!(storage.load_token(GAME_STATE_KEY).is_none());
    }

    #[test]
    fn test_toggle_preview() {
        let mut game = game(&Storage::in_memory());
        assert!(game.toggle_preview());
        assert!(!game.toggle_preview());
    }
}
