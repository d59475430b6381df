//! drift-engine - game mechanics for the decision agent.
//!
//! Provides SRS rotation with kicks, collision tests, piece locking with
//! line-clear accounting, and input pathfinding for reachable placements.

pub mod collision;
pub mod kicks;
pub mod lock;
pub mod movement;
pub mod path;

pub use collision::{can_place, collides, hard_drop_y};
pub use kicks::get_kicks;
pub use lock::lock;
pub use movement::{detect_tspin, try_rotate, try_shift, RotationResult};
pub use path::{generate_moves, MoveCandidate};
