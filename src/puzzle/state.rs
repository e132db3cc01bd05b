//! Puzzle game state
//!
//! Everything persisted under `puzzleGameState` lives here.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generator::generate_pieces;
use super::piece::{GroupId, PuzzlePiece};
use super::{ImageHandle, PuzzleError};
use crate::consts::{DEFAULT_DIFFICULTY, SNAP_TOLERANCE};

/// Tunable rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Per-axis snap distance (pixels, exclusive)
    pub snap_tolerance: f32,
    /// Piece count used when none is chosen
    pub default_difficulty: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            default_difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub image_url: Option<String>,
    /// Piece count; always a perfect square once a puzzle is started
    pub difficulty: u32,
    pub pieces: Vec<PuzzlePiece>,
    pub is_playing: bool,
    pub is_completed: bool,
    #[serde(default)]
    pub show_preview: bool,
    /// Whole seconds
    pub elapsed_time: u32,
    pub move_count: u32,
    pub placed_pieces: u32,
    pub total_pieces: u32,
    /// Run seed (edge shapes and tray order)
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "first_group_id")]
    next_group_id: GroupId,
}

fn first_group_id() -> GroupId {
    1
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl GameState {
    /// Empty state (no image, no pieces)
    pub fn new(difficulty: u32) -> Self {
        Self {
            image_url: None,
            difficulty,
            pieces: Vec::new(),
            is_playing: false,
            is_completed: false,
            show_preview: false,
            elapsed_time: 0,
            move_count: 0,
            placed_pieces: 0,
            total_pieces: 0,
            seed: 0,
            next_group_id: first_group_id(),
        }
    }

    /// Fresh puzzle for `image`: generated pieces, shuffled tray order
    pub fn start(image: &ImageHandle, difficulty: u32, seed: u64) -> Result<Self, PuzzleError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut pieces = generate_pieces(image.size(), difficulty, &mut rng)?;
        pieces.shuffle(&mut rng);

        Ok(Self {
            image_url: Some(image.url.clone()),
            difficulty,
            total_pieces: pieces.len() as u32,
            pieces,
            is_playing: true,
            seed,
            ..Self::new(difficulty)
        })
    }

    /// Allocate a new group ID
    pub fn next_group(&mut self) -> GroupId {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    pub fn piece(&self, id: u32) -> Option<&PuzzlePiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_index(&self, id: u32) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    /// All pieces placed (and there is at least one)
    pub fn all_placed(&self) -> bool {
        self.total_pieces > 0 && self.placed_pieces == self.total_pieces
    }

    /// Fraction of pieces placed, 0.0 - 1.0
    pub fn progress(&self) -> f32 {
        if self.total_pieces == 0 {
            0.0
        } else {
            self.placed_pieces as f32 / self.total_pieces as f32
        }
    }
}
