//! Decision payloads delivered back to the host.

use arrayvec::ArrayVec;
use drift_core::{Movement, Piece, TspinStatus};
use serde::{Deserialize, Serialize};

/// The decision produced for one piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether the piece must be exchanged with the held piece first.
    pub hold: bool,
    /// The 4 cells the placement is expected to occupy, (0, 0) bottom-left.
    pub expected_cells: [(u8, u8); 4],
    /// Input path, ending with the hard drop that locks the piece.
    pub movements: ArrayVec<Movement, 32>,
    /// Nodes explored before this decision.
    pub nodes: u32,
    /// Depth the favored line was searched to.
    pub depth: u32,
    /// Rank of this move in the pre-search static ordering.
    pub original_rank: u32,
}

/// One predicted future placement in the agent's favored continuation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPlacement {
    pub piece: Piece,
    pub tspin: TspinStatus,
    pub expected_cells: [(u8, u8); 4],
    /// Rows this placement is expected to clear, pre-clear indexes.
    pub cleared_lines: ArrayVec<u8, 4>,
}

/// Resolution state of the outstanding move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The decision is ready; the agent has already advanced its belief as
    /// if the move executes exactly as predicted.
    MoveProvided {
        mv: MoveResult,
        /// Favored continuation, truncated to the caller's capacity.
        plan: Vec<PlanPlacement>,
    },
    /// Not resolved yet.
    Waiting,
    /// No legal continuation keeps the game alive. Terminal until `reset`.
    Dead,
}

impl PollOutcome {
    pub fn is_waiting(&self) -> bool {
        matches!(self, PollOutcome::Waiting)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, PollOutcome::Dead)
    }
}
