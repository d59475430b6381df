//! Piece locking with line-clear, back-to-back, and combo accounting.

use drift_core::{Board, BoardState, LockResult, Placement, TspinStatus};

/// Lock a placement into the state, clearing lines and updating counters.
///
/// Out-of-bounds cells are skipped rather than panicking; pathfinding is
/// expected to only produce in-bounds placements.
pub fn lock(state: &mut BoardState, placement: Placement, tspin: TspinStatus) -> LockResult {
    for (x, y) in placement.cells() {
        if x >= 0 && y >= 0 && x < Board::WIDTH as i8 && y < Board::HEIGHT as i8 {
            state.board.set(x as usize, y as usize, true);
        }
    }

    let cleared_lines = state.board.clear_lines();
    let lines = cleared_lines.len();

    let mut result = LockResult {
        cleared_lines,
        tspin,
        perfect_clear: false,
        back_to_back: false,
        combo: 0,
    };

    if lines > 0 {
        // quads and spin clears sustain the chain
        let hard = lines == 4 || tspin != TspinStatus::None;
        result.back_to_back = state.back_to_back && hard;
        state.back_to_back = hard;
        state.combo += 1;
        result.perfect_clear = state.board.is_empty();
    } else {
        state.combo = 0;
    }
    result.combo = state.combo;

    result
}
