//! Image jigsaw puzzle
//!
//! - `generator`: image + piece count -> interlocking piece grid
//! - `state` / `rules`: pure game state and move handling
//! - `game`: session (timer, high scores, persistence)
//! - `drag`: pointer offset tracking

pub mod drag;
pub mod game;
pub mod generator;
pub mod piece;
pub mod rules;
pub mod state;
pub mod timer;

pub use drag::{ContainerRect, DragResult, DragTracker};
pub use game::PuzzleGame;
pub use generator::{are_adjacent, generate_pieces, group_members, merge_groups, should_snap};
pub use piece::{Edge, Edges, GroupId, Location, PuzzlePiece};
pub use rules::{MoveOutcome, move_piece};
pub use state::{GameConfig, GameState};
pub use timer::{IntervalId, Timer};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("piece count must be a perfect square (4, 9, 16, 25, ...), got {piece_count}")]
    InvalidConfiguration { piece_count: u32 },

    #[error("image has no area ({width}x{height})")]
    InvalidImage { width: f32, height: f32 },

    #[error("no image loaded")]
    NoImage,
}

/// A decoded image with known pixel dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}
