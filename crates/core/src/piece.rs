//! Piece types and mino definitions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    T,
    O,
    S,
    Z,
    L,
    J,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::T,
        Piece::O,
        Piece::S,
        Piece::Z,
        Piece::L,
        Piece::J,
    ];

    /// Get mino offsets for this piece at given rotation.
    /// Returns 4 (x, y) offsets relative to piece center.
    pub fn minos(self, rot: Rotation) -> [(i8, i8); 4] {
        let idx = match rot {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        };
        match self {
            Piece::I => [
                [(-1, 0), (0, 0), (1, 0), (2, 0)],
                [(0, -1), (0, 0), (0, 1), (0, 2)],
                [(-1, 0), (0, 0), (1, 0), (2, 0)],
                [(0, -1), (0, 0), (0, 1), (0, 2)],
            ][idx],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::T => [
                [(-1, 0), (0, 0), (1, 0), (0, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 0)],
                [(-1, 0), (0, 0), (1, 0), (0, -1)],
                [(0, -1), (0, 0), (0, 1), (-1, 0)],
            ][idx],
            Piece::S => [
                [(-1, 0), (0, 0), (0, 1), (1, 1)],
                [(0, 1), (0, 0), (1, 0), (1, -1)],
                [(-1, -1), (0, -1), (0, 0), (1, 0)],
                [(-1, 1), (-1, 0), (0, 0), (0, -1)],
            ][idx],
            Piece::Z => [
                [(0, 0), (1, 0), (-1, 1), (0, 1)],
                [(0, -1), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (1, -1), (-1, 0), (0, 0)],
                [(-1, -1), (-1, 0), (0, 0), (0, 1)],
            ][idx],
            Piece::L => [
                [(-1, 0), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, -1)],
                [(-1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, 1), (0, -1), (0, 0), (0, 1)],
            ][idx],
            Piece::J => [
                [(-1, 0), (0, 0), (1, 0), (-1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 1)],
                [(1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, -1), (0, -1), (0, 0), (0, 1)],
            ][idx],
        }
    }

    /// Spawn x position (center column)
    pub fn spawn_x(self) -> i8 {
        4
    }

    /// Spawn y position, just above the visible field
    pub fn spawn_y(self) -> i8 {
        20
    }
}
