//! Boundary errors. The protocol itself signals only through poll statuses;
//! these errors defend caller preconditions instead of corrupting state.

use drift_core::Piece;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum AgentError {
    /// The handle was already terminated.
    #[error("agent has been terminated")]
    Terminated,
    /// The appended piece is not a member of the current 7-bag cycle.
    #[error("piece {piece:?} is not in the current bag cycle")]
    IllegalPiece { piece: Piece },
}
