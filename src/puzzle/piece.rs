//! Puzzle piece types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Edge shape on one side of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Outer border of the puzzle
    Flat,
    /// Sticks out
    Tab,
    /// Cut in
    Blank,
}

impl Edge {
    /// The edge that interlocks with this one. Flat stays flat.
    pub fn complement(self) -> Self {
        match self {
            Edge::Flat => Edge::Flat,
            Edge::Tab => Edge::Blank,
            Edge::Blank => Edge::Tab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub top: Edge,
    pub right: Edge,
    pub bottom: Edge,
    pub left: Edge,
}

/// Where a piece currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Tray,
    Assembly,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Tray => "tray",
            Location::Assembly => "assembly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tray" => Some(Location::Tray),
            "assembly" => Some(Location::Assembly),
            _ => None,
        }
    }
}

/// Group identifier shared by connected pieces
pub type GroupId = u32;

/// One piece of the cut image. Serialized with flat coordinates
/// (`x`, `y`, `correctX`, `sourceX`, `width`, ...) to match the saved game
/// layout the UI reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PieceRecord", from = "PieceRecord")]
pub struct PuzzlePiece {
    pub id: u32,
    pub row: u32,
    pub col: u32,
    /// Top-left of the source rectangle in image pixels
    pub source: Vec2,
    /// Width/height of the source rectangle
    pub size: Vec2,
    /// Current position
    pub pos: Vec2,
    /// Snapped position in the assembly area (mirrors `source`)
    pub correct_pos: Vec2,
    pub location: Location,
    /// Only ever goes false -> true
    pub is_placed: bool,
    pub group_id: Option<GroupId>,
    pub edges: Edges,
}

/// Wire shape of [`PuzzlePiece`]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PieceRecord {
    id: u32,
    row: u32,
    col: u32,
    source_x: f32,
    source_y: f32,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    correct_x: f32,
    correct_y: f32,
    location: Location,
    is_placed: bool,
    group_id: Option<GroupId>,
    edges: Edges,
}

impl From<PuzzlePiece> for PieceRecord {
    fn from(p: PuzzlePiece) -> Self {
        Self {
            id: p.id,
            row: p.row,
            col: p.col,
            source_x: p.source.x,
            source_y: p.source.y,
            width: p.size.x,
            height: p.size.y,
            x: p.pos.x,
            y: p.pos.y,
            correct_x: p.correct_pos.x,
            correct_y: p.correct_pos.y,
            location: p.location,
            is_placed: p.is_placed,
            group_id: p.group_id,
            edges: p.edges,
        }
    }
}

impl From<PieceRecord> for PuzzlePiece {
    fn from(r: PieceRecord) -> Self {
        Self {
            id: r.id,
            row: r.row,
            col: r.col,
            source: Vec2::new(r.source_x, r.source_y),
            size: Vec2::new(r.width, r.height),
            pos: Vec2::new(r.x, r.y),
            correct_pos: Vec2::new(r.correct_x, r.correct_y),
            location: r.location,
            is_placed: r.is_placed,
            group_id: r.group_id,
            edges: r.edges,
        }
    }
}

impl PuzzlePiece {
    /// Grid neighbours: one step on exactly one axis
    pub fn is_adjacent_to(&self, other: &PuzzlePiece) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let col_diff = self.col.abs_diff(other.col);
        (row_diff == 1 && col_diff == 0) || (row_diff == 0 && col_diff == 1)
    }

    /// Within `tolerance` of the correct position on both axes (strict)
    pub fn within_snap(&self, tolerance: f32) -> bool {
        let d = (self.pos - self.correct_pos).abs();
        d.x < tolerance && d.y < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_at(row: u32, col: u32) -> PuzzlePiece {
        PuzzlePiece {
            id: 0,
            row,
            col,
            source: Vec2::ZERO,
            size: Vec2::splat(10.0),
            pos: Vec2::ZERO,
            correct_pos: Vec2::ZERO,
            location: Location::Tray,
            is_placed: false,
            group_id: None,
            edges: Edges {
                top: Edge::Flat,
                right: Edge::Flat,
                bottom: Edge::Flat,
                left: Edge::Flat,
            },
        }
    }

    #[test]
    fn test_complement() {
        assert_eq!(Edge::Tab.complement(), Edge::Blank);
        assert_eq!(Edge::Blank.complement(), Edge::Tab);
        assert_eq!(Edge::Flat.complement(), Edge::Flat);
    }

    #[test]
    fn test_adjacency() {
        let a = piece_at(1, 1);
        assert!(a.is_adjacent_to(&piece_at(0, 1)));
        assert!(a.is_adjacent_to(&piece_at(1, 2)));
        assert!(!a.is_adjacent_to(&piece_at(2, 2)));
        assert!(!a.is_adjacent_to(&piece_at(1, 1)));
        assert!(!a.is_adjacent_to(&piece_at(1, 3)));
    }

    #[test]
    fn test_within_snap_is_strict() {
        let mut p = piece_at(0, 0);
        p.correct_pos = Vec2::new(100.0, 100.0);
        p.pos = Vec2::new(129.0, 71.0);
        assert!(p.within_snap(30.0));
        p.pos = Vec2::new(130.0, 100.0);
        assert!(!p.within_snap(30.0));
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(piece_at(0, 0)).unwrap();
        assert_eq!(json["location"], "tray");
        assert_eq!(json["isPlaced"], false);
        assert!(json["groupId"].is_null());
        assert_eq!(json["edges"]["top"], "flat");
    }

    #[test]
    fn test_coordinates_are_flat() {
        let mut p = piece_at(1, 2);
        p.source = Vec2::new(20.0, 10.0);
        p.correct_pos = p.source;
        p.pos = Vec2::new(3.5, 4.0);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["x"], 3.5);
        assert_eq!(json["y"], 4.0);
        assert_eq!(json["correctX"], 20.0);
        assert_eq!(json["correctY"], 10.0);
        assert_eq!(json["sourceX"], 20.0);
        assert_eq!(json["width"], 10.0);
        assert!(json.get("pos").is_none());

        let back: PuzzlePiece = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
