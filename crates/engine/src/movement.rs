//! Rotation and shift primitives with kick application.

use drift_core::{Board, Piece, Rotation, TspinStatus};

use crate::collision::can_place;
use crate::kicks::get_kicks;

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub new_rotation: Rotation,
    pub new_x: i8,
    pub new_y: i8,
    pub tspin: TspinStatus,
}

/// Try to rotate a piece, applying kicks if necessary.
/// Returns None if rotation is not possible.
pub fn try_rotate(
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
) -> Option<RotationResult> {
    let to = if clockwise {
        rotation.cw()
    } else {
        rotation.ccw()
    };

    // First try without kicks
    if can_place(board, piece, to, x, y) {
        let tspin = detect_tspin(board, piece, to, x, y, false);
        return Some(RotationResult {
            new_rotation: to,
            new_x: x,
            new_y: y,
            tspin,
        });
    }

    // Try each kick offset
    for &(dx, dy) in get_kicks(piece, rotation, to) {
        let nx = x + dx;
        let ny = y + dy;
        if can_place(board, piece, to, nx, ny) {
            let tspin = detect_tspin(board, piece, to, nx, ny, true);
            return Some(RotationResult {
                new_rotation: to,
                new_x: nx,
                new_y: ny,
                tspin,
            });
        }
    }

    None
}

/// Try to move the piece horizontally
pub fn try_shift(
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    dx: i8,
) -> Option<i8> {
    let new_x = x + dx;
    if can_place(board, piece, rotation, new_x, y) {
        Some(new_x)
    } else {
        None
    }
}

/// Detect T-spin using the 3-corner rule.
pub fn detect_tspin(
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    used_kick: bool,
) -> TspinStatus {
    if piece != Piece::T {
        return TspinStatus::None;
    }

    // check the 4 corners around the T piece center
    let corners = [
        (x - 1, y + 1),
        (x + 1, y + 1),
        (x - 1, y - 1),
        (x + 1, y - 1),
    ];
    let mut filled = 0;
    let mut front_filled = 0;

    for (i, &(cx, cy)) in corners.iter().enumerate() {
        let is_filled = if cx < 0 || cx >= Board::WIDTH as i8 || cy < 0 || cy >= Board::HEIGHT as i8
        {
            true // out of bounds counts as filled
        } else {
            board.get(cx as usize, cy as usize)
        };

        if is_filled {
            filled += 1;
            // front corners depend on rotation
            let is_front = match rotation {
                Rotation::North => i < 2,           // top corners
                Rotation::East => i == 1 || i == 3, // right corners
                Rotation::South => i >= 2,          // bottom corners
                Rotation::West => i == 0 || i == 2, // left corners
            };
            if is_front {
                front_filled += 1;
            }
        }
    }

    if filled >= 3 {
        if front_filled >= 2 {
            TspinStatus::Full
        } else if used_kick {
            TspinStatus::Mini
        } else {
            TspinStatus::None
        }
    } else {
        TspinStatus::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rotation() {
        let board = Board::new();
        let result = try_rotate(&board, Piece::T, Rotation::North, 4, 5, true);
        assert!(result.is_some());
        let r = result.unwrap();
        assert_eq!(r.new_rotation, Rotation::East);
        assert_eq!((r.new_x, r.new_y), (4, 5)); // no kick needed
    }

    #[test]
    fn test_wall_kick() {
        let board = Board::new();
        // T piece at x=0, rotating CCW into the wall needs a kick
        let result = try_rotate(&board, Piece::T, Rotation::North, 0, 5, false);
        assert!(result.is_some());
    }

    #[test]
    fn test_shift_left() {
        let board = Board::new();
        let new_x = try_shift(&board, Piece::T, Rotation::North, 4, 0, -1);
        assert_eq!(new_x, Some(3));
    }

    #[test]
    fn test_shift_blocked() {
        let board = Board::new();
        // T piece West at x=0 hugs the wall
        let new_x = try_shift(&board, Piece::T, Rotation::East, 0, 5, -1);
        assert_eq!(new_x, None);
    }

    #[test]
    fn test_tspin_in_slot() {
        // T South at (4, 0): floor provides the bottom corners, fill the top two
        let mut board = Board::new();
        board.set(3, 1, true);
        board.set(5, 1, true);
        let status = detect_tspin(&board, Piece::T, Rotation::South, 4, 0, true);
        assert_eq!(status, TspinStatus::Full);
    }

    #[test]
    fn test_no_tspin_for_other_pieces() {
        let board = Board::new();
        assert_eq!(
            detect_tspin(&board, Piece::S, Rotation::North, 4, 1, true),
            TspinStatus::None
        );
    }
}
