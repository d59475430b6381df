//! Drift - an asynchronous decision agent for falling-block stacking games.
//!
//! The agent searches for placements on its own worker thread while the host
//! game loop runs; the two meet only through the request/poll/block protocol
//! on [`AgentHandle`]. See the `drift-bot` crate for the protocol itself and
//! `drift-search` for the built-in engine.

pub use drift_bot::{
    AgentError, AgentHandle, Engine, MoveResult, Options, PlanPlacement, PollOutcome, Suggestion,
};
pub use drift_core::{
    Board, BoardState, Movement, MovementMode, Piece, PieceQueue, Placement, Rotation, TspinStatus,
};
pub use drift_engine::{generate_moves, lock, MoveCandidate};
pub use drift_eval::Weights;
pub use drift_search::BeamEngine;

/// Launch an agent over the built-in engine with a blank field, empty queue,
/// and a full bag. Terminate the handle (or drop it) when done.
pub fn launch(options: Options, weights: Weights) -> AgentHandle {
    AgentHandle::launch(Box::new(BeamEngine::new(options, weights)), options)
}
