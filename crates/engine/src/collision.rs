//! Collision detection - walls, floor, other blocks.

use drift_core::{Board, Piece, Rotation};

/// Does the piece collide with anything at this position?
pub fn collides(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    for (dx, dy) in piece.minos(rotation) {
        let cx = x + dx;
        let cy = y + dy;
        if cx < 0 || cx >= Board::WIDTH as i8 || cy < 0 || cy >= Board::HEIGHT as i8 {
            return true;
        }
        if board.get(cx as usize, cy as usize) {
            return true;
        }
    }
    false
}

/// Can we place here? (just !collides)
pub fn can_place(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    !collides(board, piece, rotation, x, y)
}

#[inline]
pub fn hard_drop_y(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> i8 {
    let mut landing_y = y;
    while !collides(board, piece, rotation, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_collision_empty_board() {
        let board = Board::new();
        assert!(!collides(&board, Piece::T, Rotation::North, 4, 1));
    }

    #[test]
    fn test_collision_with_wall() {
        let board = Board::new();
        // T piece at x=-1 should collide with left wall
        assert!(collides(&board, Piece::T, Rotation::North, -1, 1));
    }

    #[test]
    fn test_collision_with_floor() {
        let board = Board::new();
        // T piece North at y=0 has minos at y=0 and y=1, should be valid
        assert!(!collides(&board, Piece::T, Rotation::North, 4, 0));
        // T piece South at y=0 has mino at y=-1, should collide
        assert!(collides(&board, Piece::T, Rotation::South, 4, 0));
    }

    #[test]
    fn test_collision_with_filled_cell() {
        let mut board = Board::new();
        board.set(4, 0, true);
        assert!(collides(&board, Piece::T, Rotation::North, 4, 0));
    }

    #[test]
    fn test_hard_drop() {
        let board = Board::new();
        let y = hard_drop_y(&board, Piece::T, Rotation::North, 4, 20);
        assert_eq!(y, 0);
    }

    #[test]
    fn test_hard_drop_with_obstacle() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            board.set(x, 5, true);
        }
        let y = hard_drop_y(&board, Piece::T, Rotation::North, 4, 20);
        assert_eq!(y, 6); // lands on top of row 5
    }
}
