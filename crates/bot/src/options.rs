//! Per-agent configuration, fixed at launch.

use drift_core::MovementMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub mode: MovementMode,
    pub use_hold: bool,
    /// Model unknown upcoming pieces through the 7-bag constraint. Also
    /// makes the handle enforce bag legality on appended pieces.
    pub speculate: bool,
    /// Bias search toward perfect-clear continuations.
    pub pc_loop: bool,
    /// A move is never suggested before this many nodes were explored for it.
    pub min_nodes: u32,
    /// Search stops expanding past this many nodes.
    pub max_nodes: u32,
    /// Worker threads available to the engine.
    pub threads: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: MovementMode::ZeroG,
            use_hold: true,
            speculate: true,
            pc_loop: false,
            min_nodes: 0,
            max_nodes: 4_000_000_000,
            threads: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.mode, MovementMode::ZeroG);
        assert!(options.use_hold);
        assert!(options.speculate);
        assert!(!options.pc_loop);
        assert_eq!(options.min_nodes, 0);
        assert_eq!(options.threads, 1);
    }

    #[test]
    fn test_field_change_is_observable() {
        let mut options = Options::default();
        options.threads = 4;
        assert_ne!(options, Options::default());
    }
}
