//! Piece moves, snapping, grouping and the win check
//!
//! Pure functions over [`GameState`]; the session layer handles the timer,
//! high scores and persistence.

use glam::Vec2;

use super::generator::merge_groups;
use super::piece::Location;
use super::state::{GameConfig, GameState};

/// Result of [`move_piece`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No piece with that id
    NotFound,
    /// Piece is already placed and no longer moves
    Pinned,
    Moved {
        /// This move snapped the piece into its correct position
        snapped: bool,
        /// This move completed the puzzle
        completed: bool,
    },
}

/// Move piece `id` to `location` at `pos`
pub fn move_piece(
    state: &mut GameState,
    id: u32,
    location: Location,
    pos: Vec2,
    config: &GameConfig,
) -> MoveOutcome {
    let Some(index) = state.piece_index(id) else {
        return MoveOutcome::NotFound;
    };

    let piece = &mut state.pieces[index];
    if piece.is_placed {
        return MoveOutcome::Pinned;
    }

    let was_in_tray = piece.location == Location::Tray;
    piece.location = location;
    piece.pos = pos;

    // Taking a piece out of the tray is free; repositioning counts
    if !was_in_tray {
        state.move_count += 1;
    }

    let mut snapped = false;
    if location == Location::Assembly {
        snapped = check_placement(state, index, config.snap_tolerance);
        if snapped {
            connect_adjacent(state, index);
        }
    }

    let completed = check_win(state);
    MoveOutcome::Moved { snapped, completed }
}

/// Snap the piece at `index` if it is close enough. Returns true only on the
/// move that places it.
fn check_placement(state: &mut GameState, index: usize, tolerance: f32) -> bool {
    let piece = &mut state.pieces[index];
    if piece.is_placed || !piece.within_snap(tolerance) {
        return false;
    }
    piece.is_placed = true;
    piece.pos = piece.correct_pos;
    state.placed_pieces += 1;
    log::info!("Piece {} snapped into place", piece.id);
    true
}

/// Join the placed piece at `index` with every placed grid neighbour in the
/// assembly area.
fn connect_adjacent(state: &mut GameState, index: usize) {
    let neighbours: Vec<usize> = {
        let moved = &state.pieces[index];
        state
            .pieces
            .iter()
            .enumerate()
            .filter(|(i, other)| {
                *i != index
                    && other.location == Location::Assembly
                    && other.is_placed
                    && moved.is_adjacent_to(other)
            })
            .map(|(i, _)| i)
            .collect()
    };

    for other in neighbours {
        match (state.pieces[index].group_id, state.pieces[other].group_id) {
            (None, None) => {
                let group = state.next_group();
                state.pieces[index].group_id = Some(group);
                state.pieces[other].group_id = Some(group);
            }
            (Some(group), None) => state.pieces[other].group_id = Some(group),
            (None, Some(group)) => state.pieces[index].group_id = Some(group),
            (Some(keep), Some(absorbed)) if keep != absorbed => {
                merge_groups(&mut state.pieces, keep, absorbed);
            }
            _ => {}
        }
    }
}

/// Mark the puzzle complete the first time every piece is placed
fn check_win(state: &mut GameState) -> bool {
    if state.is_completed || !state.all_placed() {
        return false;
    }
    state.is_completed = true;
    state.is_playing = false;
    log::info!(
        "Puzzle complete: {} pieces, {} moves, {}s",
        state.total_pieces,
        state.move_count,
        state.elapsed_time
    );
    true
}
