//! Input primitives the agent's paths are expressed in.

use serde::{Deserialize, Serialize};

/// One atomic controller input. A path is an ordered sequence of these,
/// ending implicitly in a hard drop.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    Cw,
    Ccw,
    Drop,
}

/// How the pathfinder is allowed to maneuver pieces. Fixed for the lifetime
/// of an agent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum MovementMode {
    /// Pieces maneuver freely before the final drop.
    #[default]
    ZeroG,
    /// Pieces rest on the stack after every input; tucks and spins from
    /// grounded positions are reachable.
    TwentyG,
    /// Rotate and shift at the spawn row only, then drop.
    HardDropOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        assert_eq!(MovementMode::default(), MovementMode::ZeroG);
    }

    #[test]
    fn test_movement_equality() {
        assert_eq!(Movement::Left, Movement::Left);
        assert_ne!(Movement::Cw, Movement::Ccw);
    }
}
