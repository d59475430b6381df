//! Drift bot crate - the asynchronous decision-request protocol.
//!
//! The host game loop talks to a search engine through an [`AgentHandle`]:
//! it synchronizes the agent's belief of the field, requests the next move,
//! and later polls (or blocks) for the decision. Search runs on a worker
//! thread owned by the handle, so a slow decision never stalls a game frame.

mod engine;
mod error;
mod handle;
mod options;
mod results;
pub mod wire;

pub use engine::{Engine, Suggestion};
pub use error::AgentError;
pub use handle::AgentHandle;
pub use options::Options;
pub use results::{MoveResult, PlanPlacement, PollOutcome};
