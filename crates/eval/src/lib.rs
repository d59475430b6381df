//! Drift eval crate - the weight table and board feature scoring.

mod features;
mod weights;

pub use features::{score_board, score_lock};
pub use weights::Weights;
