//! Input pathfinding: which placements are reachable, and by what inputs.
//!
//! Breadth-first search over piece states. The first path found to a landing
//! is input-shortest. Every path ends with the hard drop that locks the piece.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use drift_core::{Board, Movement, MovementMode, Piece, Placement, Rotation, TspinStatus};
use rustc_hash::FxHashMap;

use crate::collision::{collides, hard_drop_y};
use crate::movement::{try_rotate, try_shift};

/// The longest input path the agent will report.
pub const MAX_PATH: usize = 32;

/// A reachable resting position together with the inputs that produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCandidate {
    pub placement: Placement,
    pub tspin: TspinStatus,
    pub path: ArrayVec<Movement, MAX_PATH>,
}

type StateKey = (i8, i8, Rotation);

struct Step {
    parent: Option<StateKey>,
    movement: Movement,
    /// Spin classification of the movement that produced this state.
    tspin: TspinStatus,
}

/// Enumerate every placement of `piece` reachable on `board` under `mode`.
///
/// Returns an empty list when the piece cannot spawn - the top-out signal.
pub fn generate_moves(board: &Board, piece: Piece, mode: MovementMode) -> Vec<MoveCandidate> {
    let spawn = Placement::spawn(piece);
    if collides(board, piece, spawn.rotation, spawn.x, spawn.y) {
        return Vec::new();
    }

    let start: StateKey = match mode {
        MovementMode::TwentyG => {
            let y = hard_drop_y(board, piece, spawn.rotation, spawn.x, spawn.y);
            (spawn.x, y, spawn.rotation)
        }
        _ => (spawn.x, spawn.y, spawn.rotation),
    };

    let mut steps: FxHashMap<StateKey, Step> = FxHashMap::default();
    steps.insert(
        start,
        Step {
            parent: None,
            movement: Movement::Drop,
            tspin: TspinStatus::None,
        },
    );

    let mut landings: FxHashMap<[(i8, i8); 4], ()> = FxHashMap::default();
    let mut candidates = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(state) = queue.pop_front() {
        let (x, y, rotation) = state;

        // every state implies a landing via the final hard drop
        let landing_y = hard_drop_y(board, piece, rotation, x, y);
        let placement = Placement::new(piece, rotation, x, landing_y);
        let key = canonical_cells(&placement);
        if !landings.contains_key(&key) {
            if let Some(path) = reconstruct(&steps, state) {
                // a spin only counts if it was the last input and the piece
                // was already resting where it locks
                let tspin = if landing_y == y {
                    steps[&state].tspin
                } else {
                    TspinStatus::None
                };
                landings.insert(key, ());
                candidates.push(MoveCandidate {
                    placement,
                    tspin,
                    path,
                });
            }
        }

        for movement in [Movement::Left, Movement::Right, Movement::Cw, Movement::Ccw, Movement::Drop]
        {
            let Some((next, tspin)) = transition(board, piece, state, movement, mode) else {
                continue;
            };
            if steps.contains_key(&next) {
                continue;
            }
            steps.insert(
                next,
                Step {
                    parent: Some(state),
                    movement,
                    tspin,
                },
            );
            queue.push_back(next);
        }
    }

    candidates
}

fn transition(
    board: &Board,
    piece: Piece,
    (x, y, rotation): StateKey,
    movement: Movement,
    mode: MovementMode,
) -> Option<(StateKey, TspinStatus)> {
    let (mut next, mut tspin) = match movement {
        Movement::Left | Movement::Right => {
            let dx = if movement == Movement::Left { -1 } else { 1 };
            let nx = try_shift(board, piece, rotation, x, y, dx)?;
            ((nx, y, rotation), TspinStatus::None)
        }
        Movement::Cw | Movement::Ccw => {
            let r = try_rotate(board, piece, rotation, x, y, movement == Movement::Cw)?;
            ((r.new_x, r.new_y, r.new_rotation), r.tspin)
        }
        Movement::Drop => {
            // sonic drop as an explicit input; only meaningful in free movement
            if mode != MovementMode::ZeroG {
                return None;
            }
            let ny = hard_drop_y(board, piece, rotation, x, y);
            if ny == y {
                return None;
            }
            ((x, ny, rotation), TspinStatus::None)
        }
    };

    match mode {
        MovementMode::ZeroG => {}
        MovementMode::TwentyG => {
            // gravity grounds the piece after every input
            let grounded = hard_drop_y(board, piece, next.2, next.0, next.1);
            if grounded != next.1 {
                next.1 = grounded;
                tspin = TspinStatus::None;
            }
        }
        MovementMode::HardDropOnly => {
            // no maneuvering below the spawn row
            if next.1 != piece.spawn_y() {
                return None;
            }
        }
    }

    Some((next, tspin))
}

fn reconstruct(
    steps: &FxHashMap<StateKey, Step>,
    state: StateKey,
) -> Option<ArrayVec<Movement, MAX_PATH>> {
    let mut reversed = Vec::new();
    let mut cursor = state;
    while let Some(parent) = steps[&cursor].parent {
        reversed.push(steps[&cursor].movement);
        cursor = parent;
    }
    if reversed.len() >= MAX_PATH {
        return None;
    }
    let mut path = ArrayVec::new();
    for &movement in reversed.iter().rev() {
        path.push(movement);
    }
    path.push(Movement::Drop);
    Some(path)
}

fn canonical_cells(placement: &Placement) -> [(i8, i8); 4] {
    let mut cells = placement.cells();
    cells.sort_unstable();
    cells
}
