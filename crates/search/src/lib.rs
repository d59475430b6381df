//! Drift search crate - the built-in engine behind the agent.
//!
//! A queue-lookahead beam search: one beam layer per think unit, scores
//! accumulated down each line, the best root committed on suggestion.

mod beam;

pub use beam::BeamEngine;
