//! Cut an image into a square grid of interlocking pieces

use glam::Vec2;
use rand::Rng;

use super::PuzzleError;
use super::piece::{Edge, Edges, GroupId, Location, PuzzlePiece};
use crate::consts::MAX_GRID_SIDE;

/// Integer side length for a perfect-square piece count of at most
/// `MAX_GRID_SIDE` squared
pub fn grid_side(piece_count: u32) -> Result<u32, PuzzleError> {
    let cols = piece_count.isqrt();
    if piece_count == 0 || cols * cols != piece_count || cols > MAX_GRID_SIDE {
        return Err(PuzzleError::InvalidConfiguration { piece_count });
    }
    Ok(cols)
}

fn random_edge(rng: &mut impl Rng) -> Edge {
    if rng.random_bool(0.5) {
        Edge::Tab
    } else {
        Edge::Blank
    }
}

/// Border sides are flat, inner sides random
fn edge_or_flat(border: bool, rng: &mut impl Rng) -> Edge {
    if border { Edge::Flat } else { random_edge(rng) }
}

/// Generate `piece_count` pieces for an image of `image_size` pixels.
///
/// Pieces come back in row-major order with ids `0..piece_count`. Border
/// edges are flat and every shared edge is a tab/blank pair.
pub fn generate_pieces(
    image_size: Vec2,
    piece_count: u32,
    rng: &mut impl Rng,
) -> Result<Vec<PuzzlePiece>, PuzzleError> {
    let cols = grid_side(piece_count)?;
    if !(image_size.x > 0.0 && image_size.y > 0.0) {
        return Err(PuzzleError::InvalidImage {
            width: image_size.x,
            height: image_size.y,
        });
    }
    let rows = cols;
    let size = image_size / cols as f32;

    let mut pieces = Vec::with_capacity(piece_count as usize);
    for row in 0..rows {
        for col in 0..cols {
            let source = Vec2::new(col as f32, row as f32) * size;
            let edges = Edges {
                top: edge_or_flat(row == 0, rng),
                right: edge_or_flat(col == cols - 1, rng),
                bottom: edge_or_flat(row == rows - 1, rng),
                left: edge_or_flat(col == 0, rng),
            };
            pieces.push(PuzzlePiece {
                id: pieces.len() as u32,
                row,
                col,
                source,
                size,
                pos: Vec2::ZERO,
                correct_pos: source,
                location: Location::Tray,
                is_placed: false,
                group_id: None,
                edges,
            });
        }
    }

    match_adjacent_edges(&mut pieces, cols as usize);
    Ok(pieces)
}

/// Force each right/lower neighbour's facing edge to complement ours.
/// Row-major, so every shared edge is written exactly once.
fn match_adjacent_edges(pieces: &mut [PuzzlePiece], cols: usize) {
    let rows = pieces.len() / cols;
    for row in 0..rows {
        for col in 0..cols {
            let index = row * cols + col;
            if col + 1 < cols {
                pieces[index + 1].edges.left = pieces[index].edges.right.complement();
            }
            if row + 1 < rows {
                pieces[index + cols].edges.top = pieces[index].edges.bottom.complement();
            }
        }
    }
}

/// True if the two pieces are grid neighbours
pub fn are_adjacent(a: &PuzzlePiece, b: &PuzzlePiece) -> bool {
    a.is_adjacent_to(b)
}

/// True if `piece` is close enough to snap into place
pub fn should_snap(piece: &PuzzlePiece, tolerance: f32) -> bool {
    piece.within_snap(tolerance)
}

/// All pieces carrying `group_id`
pub fn group_members(pieces: &[PuzzlePiece], group_id: GroupId) -> Vec<&PuzzlePiece> {
    pieces
        .iter()
        .filter(|p| p.group_id == Some(group_id))
        .collect()
}

/// Relabel every piece in `absorbed` to `keep`. Returns how many moved.
pub fn merge_groups(pieces: &mut [PuzzlePiece], keep: GroupId, absorbed: GroupId) -> usize {
    if keep == absorbed {
        return 0;
    }
    let mut moved = 0;
    for piece in pieces.iter_mut().filter(|p| p.group_id == Some(absorbed)) {
        piece.group_id = Some(keep);
        moved += 1;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const IMAGE: Vec2 = Vec2::new(800.0, 600.0);

    fn generate(count: u32, seed: u64) -> Vec<PuzzlePiece> {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_pieces(IMAGE, count, &mut rng).unwrap()
    }

    fn assert_edges_interlock(pieces: &[PuzzlePiece]) {
        let cols = (pieces.len() as u32).isqrt();
        for p in pieces {
            let idx = |r: u32, c: u32| (r * cols + c) as usize;
            if p.row == 0 {
                assert_eq!(p.edges.top, Edge::Flat);
            } else {
                let above = &pieces[idx(p.row - 1, p.col)];
                assert_ne!(p.edges.top, Edge::Flat);
                assert_eq!(p.edges.top, above.edges.bottom.complement());
            }
            if p.col == 0 {
                assert_eq!(p.edges.left, Edge::Flat);
            } else {
                let left = &pieces[idx(p.row, p.col - 1)];
                assert_ne!(p.edges.left, Edge::Flat);
                assert_eq!(p.edges.left, left.edges.right.complement());
            }
            if p.row == cols - 1 {
                assert_eq!(p.edges.bottom, Edge::Flat);
            }
            if p.col == cols - 1 {
                assert_eq!(p.edges.right, Edge::Flat);
            }
        }
    }

    #[test]
    fn test_rejects_non_square_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        for count in [0, 5, 10, 15] {
            let err = generate_pieces(IMAGE, count, &mut rng).unwrap_err();
            assert_eq!(
                err,
                PuzzleError::InvalidConfiguration { piece_count: count }
            );
        }
    }

    #[test]
    fn test_rejects_oversized_boards() {
        let mut rng = Pcg32::seed_from_u64(1);
        let largest = MAX_GRID_SIDE * MAX_GRID_SIDE;
        let pieces = generate_pieces(IMAGE, largest, &mut rng).unwrap();
        assert_eq!(pieces.len(), largest as usize);

        let side = MAX_GRID_SIDE + 1;
        for count in [side * side, 60_000 * 60_000] {
            let err = generate_pieces(IMAGE, count, &mut rng).unwrap_err();
            assert_eq!(
                err,
                PuzzleError::InvalidConfiguration { piece_count: count }
            );
        }
    }

    #[test]
    fn test_accepts_square_counts() {
        for count in [4, 9, 16, 25] {
            assert_eq!(generate(count, 7).len(), count as usize);
        }
    }

    #[test]
    fn test_rejects_empty_image() {
        let mut rng = Pcg32::seed_from_u64(1);
        let err = generate_pieces(Vec2::new(0.0, 100.0), 4, &mut rng).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidImage { .. }));
    }

    #[test]
    fn test_geometry() {
        let pieces = generate(4, 3);
        let p = &pieces[3];
        assert_eq!((p.row, p.col), (1, 1));
        assert_eq!(p.size, Vec2::new(400.0, 300.0));
        assert_eq!(p.source, Vec2::new(400.0, 300.0));
        assert_eq!(p.correct_pos, p.source);
        for p in &pieces {
            assert_eq!(p.location, Location::Tray);
            assert!(!p.is_placed);
        }
    }

    #[test]
    fn test_same_seed_same_edges() {
        let a = generate(16, 99);
        let b = generate(16, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_snap_and_adjacency_helpers() {
        let mut pieces = generate(4, 2);
        assert!(are_adjacent(&pieces[0], &pieces[1]));
        assert!(!are_adjacent(&pieces[0], &pieces[3]));

        pieces[3].pos = pieces[3].correct_pos + Vec2::new(29.0, 0.0);
        assert!(should_snap(&pieces[3], 30.0));
        assert!(!should_snap(&pieces[3], 20.0));
    }

    #[test]
    fn test_merge_groups_relabels_everyone() {
        let mut pieces = generate(9, 5);
        pieces[0].group_id = Some(1);
        pieces[1].group_id = Some(1);
        pieces[4].group_id = Some(2);
        pieces[5].group_id = Some(2);
        pieces[8].group_id = Some(3);

        assert_eq!(merge_groups(&mut pieces, 1, 2), 2);
        assert!(group_members(&pieces, 2).is_empty());
        assert_eq!(group_members(&pieces, 1).len(), 4);
        assert_eq!(pieces[8].group_id, Some(3));
        assert_eq!(merge_groups(&mut pieces, 1, 1), 0);
    }

    proptest! {
        #[test]
        fn prop_grid_is_covered_once(side in 1u32..8, seed in any::<u64>()) {
            let count = side * side;
            let pieces = generate(count, seed);
            prop_assert_eq!(pieces.len(), count as usize);

            let mut seen = vec![false; count as usize];
            for (i, p) in pieces.iter().enumerate() {
                prop_assert_eq!(p.id as usize, i);
                prop_assert!(p.row < side && p.col < side);
                let cell = (p.row * side + p.col) as usize;
                prop_assert!(!seen[cell]);
                seen[cell] = true;
            }
        }

        #[test]
        fn prop_edges_interlock(side in 1u32..8, seed in any::<u64>()) {
            assert_edges_interlock(&generate(side * side, seed));
        }

        #[test]
        fn prop_non_squares_rejected(n in 2u32..2000) {
            let count = n * n + 1;
            let mut rng = Pcg32::seed_from_u64(0);
            prop_assert!(generate_pieces(IMAGE, count, &mut rng).is_err());
        }
    }
}
