//! Drift core crate - fundamental types for the falling-block decision agent.

mod board;
mod movement;
mod piece;
mod placement;
mod queue;

pub use board::{Board, BoardState};
pub use movement::{Movement, MovementMode};
pub use piece::{Piece, Rotation};
pub use placement::{LockResult, Placement, TspinStatus};
pub use queue::{Bag, PieceQueue};
