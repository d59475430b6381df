//! Board feature extraction and lock bonus scoring.

use drift_core::{Board, BoardState, LockResult, Piece, TspinStatus};

use crate::Weights;

/// Garbage lines sent per consecutive-clear count.
const COMBO_GARBAGE: [i32; 12] = [0, 0, 1, 1, 1, 2, 2, 3, 3, 4, 4, 4];

/// Score the stacking quality of a position.
pub fn score_board(state: &BoardState, weights: &Weights) -> i32 {
    let board = &state.board;
    let mut score = 0i32;

    if state.back_to_back {
        score += weights.back_to_back;
    }

    let mut heights = [0usize; Board::WIDTH];
    for (x, h) in heights.iter_mut().enumerate() {
        *h = board.column_height(x);
    }
    let max_height = heights.iter().copied().max().unwrap_or(0);

    score += max_height as i32 * weights.height;
    if max_height > Board::VISIBLE_HEIGHT / 2 {
        score += weights.top_half;
    }
    if max_height > Board::VISIBLE_HEIGHT * 3 / 4 {
        score += weights.top_quarter;
    }

    for x in 0..Board::WIDTH - 1 {
        let diff = (heights[x] as i32 - heights[x + 1] as i32).abs();
        score += diff * weights.bumpiness;
        score += diff * diff * weights.bumpiness_sq;
    }

    let (cavities, overhangs, covered) = buried_cells(board, &heights);
    score += cavities * weights.cavity_cells;
    score += cavities * cavities * weights.cavity_cells_sq;
    score += overhangs * weights.overhang_cells;
    score += overhangs * overhangs * weights.overhang_cells_sq;
    score += covered * weights.covered_cells;
    score += covered * covered * weights.covered_cells_sq;

    score += well_score(&heights, weights);
    if let Some(lines) = tslot_lines(board) {
        score += weights.tslot[lines];
    }

    score
}

/// Score the immediate reward of one lock.
pub fn score_lock(piece: Piece, lock: &LockResult, weights: &Weights) -> i32 {
    let mut score = 0i32;

    score += match (lock.tspin, lock.lines()) {
        (TspinStatus::None, 1) => weights.clear1,
        (TspinStatus::None, 2) => weights.clear2,
        (TspinStatus::None, 3) => weights.clear3,
        (TspinStatus::None, 4) => weights.clear4,
        (TspinStatus::Full, 1) => weights.tspin1,
        (TspinStatus::Full, 2) => weights.tspin2,
        (TspinStatus::Full, 3) => weights.tspin3,
        (TspinStatus::Mini, 1) => weights.mini_tspin1,
        (TspinStatus::Mini, 2) => weights.mini_tspin2,
        _ => 0,
    };

    if lock.back_to_back {
        score += weights.b2b_clear;
    }
    if lock.perfect_clear {
        score += weights.perfect_clear;
    }
    if lock.lines() > 0 {
        let combo = (lock.combo as usize).min(COMBO_GARBAGE.len() - 1);
        score += COMBO_GARBAGE[combo] * weights.combo_garbage;
    }
    if piece == Piece::T && lock.tspin == TspinStatus::None {
        score += weights.wasted_t;
    }

    score
}

/// Count buried empty cells.
///
/// A cavity sits directly beneath a filled cell; an overhang is buried
/// deeper, with open space immediately above it. Covered counts the filled
/// cells stacked on top of each buried cell.
fn buried_cells(board: &Board, heights: &[usize; Board::WIDTH]) -> (i32, i32, i32) {
    let mut cavities = 0;
    let mut overhangs = 0;
    let mut covered = 0;
    for x in 0..Board::WIDTH {
        for y in 0..heights[x] {
            if board.get(x, y) {
                continue;
            }
            if board.get(x, y + 1) {
                cavities += 1;
            } else {
                overhangs += 1;
            }
            covered += (y + 1..heights[x]).filter(|&cy| board.get(x, cy)).count() as i32;
        }
    }
    (cavities, overhangs, covered)
}

/// Reward keeping one deep well, weighted by which column holds it.
fn well_score(heights: &[usize; Board::WIDTH], weights: &Weights) -> i32 {
    let mut best_column = None;
    let mut best_depth = 0usize;
    for x in 0..Board::WIDTH {
        let left = if x == 0 {
            Board::HEIGHT
        } else {
            heights[x - 1]
        };
        let right = if x == Board::WIDTH - 1 {
            Board::HEIGHT
        } else {
            heights[x + 1]
        };
        let rim = left.min(right);
        if rim > heights[x] {
            let depth = rim - heights[x];
            if depth > best_depth {
                best_depth = depth;
                best_column = Some(x);
            }
        }
    }

    match best_column {
        Some(x) => {
            let capped = (best_depth as i32).min(weights.max_well_depth.max(0));
            weights.well_column[x] + capped * weights.well_depth
        }
        None => 0,
    }
}

/// Lines a T piece spun into the best ready slot would clear.
/// None when the board has no usable slot.
fn tslot_lines(board: &Board) -> Option<usize> {
    let mut best = None;
    for x in 1..(Board::WIDTH as i8 - 1) {
        for y in 1..Board::VISIBLE_HEIGHT as i8 {
            // T South resting at (x, y): slot cells must be empty and the
            // corners must satisfy the 3-corner rule
            let cells = [(x - 1, y), (x, y), (x + 1, y), (x, y - 1)];
            if cells
                .iter()
                .any(|&(cx, cy)| board.get(cx as usize, cy as usize))
            {
                continue;
            }
            if t_corner_count(board, x, y) < 3 {
                continue;
            }
            let mut lines = 0usize;
            for row in [y - 1, y] {
                let full = (0..Board::WIDTH as i8).all(|cx| {
                    board.get(cx as usize, row as usize) || cells.contains(&(cx, row))
                });
                if full {
                    lines += 1;
                }
            }
            best = Some(best.map_or(lines, |b: usize| b.max(lines)));
        }
    }
    best
}

fn t_corner_count(board: &Board, x: i8, y: i8) -> usize {
    [(x - 1, y + 1), (x + 1, y + 1), (x - 1, y - 1), (x + 1, y - 1)]
        .into_iter()
        .filter(|&(cx, cy)| {
            cx < 0 || cx >= Board::WIDTH as i8 || cy < 0 || board.get(cx as usize, cy as usize)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(board: Board) -> BoardState {
        BoardState::new(board, false, 0)
    }

    #[test]
    fn test_flat_board_scores_zero_features() {
        let state = BoardState::default();
        assert_eq!(score_board(&state, &Weights::default()), 0);
    }

    #[test]
    fn test_cavity_penalized() {
        let mut board = Board::new();
        board.set(3, 1, true); // roof over an empty (3, 0)
        let with_cavity = score_board(&state_with(board), &Weights::default());

        let mut board = Board::new();
        board.set(3, 0, true); // same single cell, no cavity
        let without = score_board(&state_with(board), &Weights::default());

        assert!(with_cavity < without);
    }

    #[test]
    fn test_tall_stack_penalized() {
        let mut board = Board::new();
        for y in 0..16 {
            board.set(0, y, true);
        }
        let tall = score_board(&state_with(board), &Weights::default());

        let mut board = Board::new();
        for y in 0..2 {
            board.set(0, y, true);
        }
        let short = score_board(&state_with(board), &Weights::default());

        assert!(tall < short);
    }

    #[test]
    fn test_quad_beats_single() {
        let weights = Weights::default();
        let mut single = LockResult::default();
        single.cleared_lines.push(0);
        single.combo = 1;
        let mut quad = LockResult::default();
        for y in 0..4 {
            quad.cleared_lines.push(y);
        }
        quad.combo = 1;

        assert!(
            score_lock(Piece::I, &quad, &weights) > score_lock(Piece::I, &single, &weights)
        );
    }

    #[test]
    fn test_wasted_t_penalty() {
        let weights = Weights::default();
        let lock = LockResult::default();
        let t = score_lock(Piece::T, &lock, &weights);
        let i = score_lock(Piece::I, &lock, &weights);
        assert_eq!(i - t, -weights.wasted_t);
    }

    #[test]
    fn test_tslot_detected() {
        // classic double slot at (4, 1): row 0 full except column 4, row 1
        // full except columns 3..=5, one roof corner at (3, 2)
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            if x != 4 {
                board.set(x, 0, true);
            }
            if !(3..=5).contains(&x) {
                board.set(x, 1, true);
            }
        }
        board.set(3, 2, true);
        assert_eq!(tslot_lines(&board), Some(2));
    }

    #[test]
    fn test_no_tslot_on_empty_board() {
        assert_eq!(tslot_lines(&Board::new()), None);
    }

    #[test]
    fn test_combo_garbage_rewarded() {
        let weights = Weights::default();
        let mut early = LockResult::default();
        early.cleared_lines.push(0);
        early.combo = 1;
        let mut deep = LockResult::default();
        deep.cleared_lines.push(0);
        deep.combo = 7;
        assert!(
            score_lock(Piece::L, &deep, &weights) > score_lock(Piece::L, &early, &weights)
        );
    }
}
