//! Placement and lock outcome types.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Piece, Rotation};

/// Classification of the rotation bonus a completed placement earns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TspinStatus {
    #[default]
    None,
    Mini,
    Full,
}

/// A resting position for a piece: kind, orientation, and center cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Placement {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    pub fn spawn(piece: Piece) -> Self {
        Self::new(piece, Rotation::North, piece.spawn_x(), piece.spawn_y())
    }

    /// The 4 cells this placement occupies, in mino-table order.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut cells = [(0, 0); 4];
        for (cell, (dx, dy)) in cells.iter_mut().zip(self.piece.minos(self.rotation)) {
            *cell = (self.x + dx, self.y + dy);
        }
        cells
    }
}

/// Outcome of locking a placement into a [`crate::BoardState`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LockResult {
    /// Row indexes removed by this lock, in pre-clear coordinates, bottom-up.
    pub cleared_lines: ArrayVec<u8, 4>,
    pub tspin: TspinStatus,
    pub perfect_clear: bool,
    /// Whether this clear extended a back-to-back chain.
    pub back_to_back: bool,
    /// Consecutive-clear count after the lock.
    pub combo: u32,
}

impl LockResult {
    pub fn lines(&self) -> usize {
        self.cleared_lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_placement() {
        let p = Placement::spawn(Piece::T);
        assert_eq!(p.rotation, Rotation::North);
        assert_eq!(p.x, 4);
        assert_eq!(p.y, 20);
    }

    #[test]
    fn test_cells_offset_by_center() {
        let p = Placement::new(Piece::O, Rotation::North, 4, 0);
        let cells = p.cells();
        assert!(cells.contains(&(4, 0)));
        assert!(cells.contains(&(5, 0)));
        assert!(cells.contains(&(4, 1)));
        assert!(cells.contains(&(5, 1)));
    }

    #[test]
    fn test_lock_result_lines() {
        let mut lock = LockResult::default();
        assert_eq!(lock.lines(), 0);
        lock.cleared_lines.push(0);
        lock.cleared_lines.push(1);
        assert_eq!(lock.lines(), 2);
    }
}
