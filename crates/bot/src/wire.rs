//! Fixed-layout mirrors of the protocol types.
//!
//! Enums travel as fixed-width integers only at this edge; everywhere else
//! they are proper sum types. Field order in the raw structs is part of the
//! contract and must not be rearranged.

use drift_core::{Movement, MovementMode, Piece, TspinStatus};
use drift_eval::Weights;

use crate::options::Options;
use crate::results::{MoveResult, PlanPlacement, PollOutcome};

pub const STATUS_MOVE_PROVIDED: i32 = 0;
pub const STATUS_WAITING: i32 = 1;
pub const STATUS_DEAD: i32 = 2;

/// Sentinel in `cleared_lines` meaning "no line".
pub const NO_LINE: i32 = -1;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawMove {
    pub hold: bool,
    pub expected_x: [u8; 4],
    pub expected_y: [u8; 4],
    pub movement_count: u8,
    pub movements: [i32; 32],
    pub nodes: u32,
    pub depth: u32,
    pub original_rank: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawPlanPlacement {
    pub piece: i32,
    pub tspin: i32,
    pub expected_x: [u8; 4],
    pub expected_y: [u8; 4],
    pub cleared_lines: [i32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawOptions {
    pub mode: i32,
    pub use_hold: bool,
    pub speculate: bool,
    pub pc_loop: bool,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub threads: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawWeights {
    pub back_to_back: i32,
    pub bumpiness: i32,
    pub bumpiness_sq: i32,
    pub height: i32,
    pub top_half: i32,
    pub top_quarter: i32,
    pub jeopardy: i32,
    pub cavity_cells: i32,
    pub cavity_cells_sq: i32,
    pub overhang_cells: i32,
    pub overhang_cells_sq: i32,
    pub covered_cells: i32,
    pub covered_cells_sq: i32,
    pub tslot: [i32; 4],
    pub well_depth: i32,
    pub max_well_depth: i32,
    pub well_column: [i32; 10],
    pub b2b_clear: i32,
    pub clear1: i32,
    pub clear2: i32,
    pub clear3: i32,
    pub clear4: i32,
    pub tspin1: i32,
    pub tspin2: i32,
    pub tspin3: i32,
    pub mini_tspin1: i32,
    pub mini_tspin2: i32,
    pub perfect_clear: i32,
    pub combo_garbage: i32,
    pub move_time: i32,
    pub wasted_t: i32,
    pub use_bag: bool,
}

pub fn piece_to_i32(piece: Piece) -> i32 {
    match piece {
        Piece::I => 0,
        Piece::T => 1,
        Piece::O => 2,
        Piece::S => 3,
        Piece::Z => 4,
        Piece::L => 5,
        Piece::J => 6,
    }
}

pub fn piece_from_i32(value: i32) -> Piece {
    match value {
        0 => Piece::I,
        1 => Piece::T,
        2 => Piece::O,
        3 => Piece::S,
        4 => Piece::Z,
        5 => Piece::L,
        _ => Piece::J,
    }
}

pub fn movement_to_i32(movement: Movement) -> i32 {
    match movement {
        Movement::Left => 0,
        Movement::Right => 1,
        Movement::Cw => 2,
        Movement::Ccw => 3,
        Movement::Drop => 4,
    }
}

pub fn movement_from_i32(value: i32) -> Movement {
    match value {
        0 => Movement::Left,
        1 => Movement::Right,
        2 => Movement::Cw,
        3 => Movement::Ccw,
        _ => Movement::Drop,
    }
}

pub fn tspin_to_i32(tspin: TspinStatus) -> i32 {
    match tspin {
        TspinStatus::None => 0,
        TspinStatus::Mini => 1,
        TspinStatus::Full => 2,
    }
}

pub fn tspin_from_i32(value: i32) -> TspinStatus {
    match value {
        1 => TspinStatus::Mini,
        2 => TspinStatus::Full,
        _ => TspinStatus::None,
    }
}

pub fn mode_to_i32(mode: MovementMode) -> i32 {
    match mode {
        MovementMode::ZeroG => 0,
        MovementMode::TwentyG => 1,
        MovementMode::HardDropOnly => 2,
    }
}

pub fn mode_from_i32(value: i32) -> MovementMode {
    match value {
        1 => MovementMode::TwentyG,
        2 => MovementMode::HardDropOnly,
        _ => MovementMode::ZeroG,
    }
}

/// Status code for an outcome, per the table above.
pub fn status_code(outcome: &PollOutcome) -> i32 {
    match outcome {
        PollOutcome::MoveProvided { .. } => STATUS_MOVE_PROVIDED,
        PollOutcome::Waiting => STATUS_WAITING,
        PollOutcome::Dead => STATUS_DEAD,
    }
}

impl From<&MoveResult> for RawMove {
    fn from(mv: &MoveResult) -> Self {
        let mut raw = RawMove {
            hold: mv.hold,
            expected_x: [0; 4],
            expected_y: [0; 4],
            movement_count: mv.movements.len() as u8,
            movements: [0; 32],
            nodes: mv.nodes,
            depth: mv.depth,
            original_rank: mv.original_rank,
        };
        for (i, &(x, y)) in mv.expected_cells.iter().enumerate() {
            raw.expected_x[i] = x;
            raw.expected_y[i] = y;
        }
        for (i, &movement) in mv.movements.iter().enumerate() {
            raw.movements[i] = movement_to_i32(movement);
        }
        raw
    }
}

impl From<&RawMove> for MoveResult {
    fn from(raw: &RawMove) -> Self {
        let mut mv = MoveResult {
            hold: raw.hold,
            expected_cells: [(0, 0); 4],
            movements: Default::default(),
            nodes: raw.nodes,
            depth: raw.depth,
            original_rank: raw.original_rank,
        };
        for i in 0..4 {
            mv.expected_cells[i] = (raw.expected_x[i], raw.expected_y[i]);
        }
        let count = (raw.movement_count as usize).min(raw.movements.len());
        for &value in &raw.movements[..count] {
            mv.movements.push(movement_from_i32(value));
        }
        mv
    }
}

impl From<&PlanPlacement> for RawPlanPlacement {
    fn from(plan: &PlanPlacement) -> Self {
        let mut raw = RawPlanPlacement {
            piece: piece_to_i32(plan.piece),
            tspin: tspin_to_i32(plan.tspin),
            expected_x: [0; 4],
            expected_y: [0; 4],
            cleared_lines: [NO_LINE; 4],
        };
        for (i, &(x, y)) in plan.expected_cells.iter().enumerate() {
            raw.expected_x[i] = x;
            raw.expected_y[i] = y;
        }
        for (i, &line) in plan.cleared_lines.iter().enumerate() {
            raw.cleared_lines[i] = line as i32;
        }
        raw
    }
}

impl From<&RawPlanPlacement> for PlanPlacement {
    fn from(raw: &RawPlanPlacement) -> Self {
        let mut plan = PlanPlacement {
            piece: piece_from_i32(raw.piece),
            tspin: tspin_from_i32(raw.tspin),
            expected_cells: [(0, 0); 4],
            cleared_lines: Default::default(),
        };
        for i in 0..4 {
            plan.expected_cells[i] = (raw.expected_x[i], raw.expected_y[i]);
        }
        for &line in raw.cleared_lines.iter().filter(|&&l| l != NO_LINE) {
            plan.cleared_lines.push(line as u8);
        }
        plan
    }
}

impl From<&Options> for RawOptions {
    fn from(options: &Options) -> Self {
        RawOptions {
            mode: mode_to_i32(options.mode),
            use_hold: options.use_hold,
            speculate: options.speculate,
            pc_loop: options.pc_loop,
            min_nodes: options.min_nodes,
            max_nodes: options.max_nodes,
            threads: options.threads,
        }
    }
}

impl From<&RawOptions> for Options {
    fn from(raw: &RawOptions) -> Self {
        Options {
            mode: mode_from_i32(raw.mode),
            use_hold: raw.use_hold,
            speculate: raw.speculate,
            pc_loop: raw.pc_loop,
            min_nodes: raw.min_nodes,
            max_nodes: raw.max_nodes,
            threads: raw.threads,
        }
    }
}

impl From<&Weights> for RawWeights {
    fn from(w: &Weights) -> Self {
        RawWeights {
            back_to_back: w.back_to_back,
            bumpiness: w.bumpiness,
            bumpiness_sq: w.bumpiness_sq,
            height: w.height,
            top_half: w.top_half,
            top_quarter: w.top_quarter,
            jeopardy: w.jeopardy,
            cavity_cells: w.cavity_cells,
            cavity_cells_sq: w.cavity_cells_sq,
            overhang_cells: w.overhang_cells,
            overhang_cells_sq: w.overhang_cells_sq,
            covered_cells: w.covered_cells,
            covered_cells_sq: w.covered_cells_sq,
            tslot: w.tslot,
            well_depth: w.well_depth,
            max_well_depth: w.max_well_depth,
            well_column: w.well_column,
            b2b_clear: w.b2b_clear,
            clear1: w.clear1,
            clear2: w.clear2,
            clear3: w.clear3,
            clear4: w.clear4,
            tspin1: w.tspin1,
            tspin2: w.tspin2,
            tspin3: w.tspin3,
            mini_tspin1: w.mini_tspin1,
            mini_tspin2: w.mini_tspin2,
            perfect_clear: w.perfect_clear,
            combo_garbage: w.combo_garbage,
            move_time: w.move_time,
            wasted_t: w.wasted_t,
            use_bag: w.use_bag,
        }
    }
}

impl From<&RawWeights> for Weights {
    fn from(raw: &RawWeights) -> Self {
        Weights {
            back_to_back: raw.back_to_back,
            bumpiness: raw.bumpiness,
            bumpiness_sq: raw.bumpiness_sq,
            height: raw.height,
            top_half: raw.top_half,
            top_quarter: raw.top_quarter,
            jeopardy: raw.jeopardy,
            cavity_cells: raw.cavity_cells,
            cavity_cells_sq: raw.cavity_cells_sq,
            overhang_cells: raw.overhang_cells,
            overhang_cells_sq: raw.overhang_cells_sq,
            covered_cells: raw.covered_cells,
            covered_cells_sq: raw.covered_cells_sq,
            tslot: raw.tslot,
            well_depth: raw.well_depth,
            max_well_depth: raw.max_well_depth,
            well_column: raw.well_column,
            b2b_clear: raw.b2b_clear,
            clear1: raw.clear1,
            clear2: raw.clear2,
            clear3: raw.clear3,
            clear4: raw.clear4,
            tspin1: raw.tspin1,
            tspin2: raw.tspin2,
            tspin3: raw.tspin3,
            mini_tspin1: raw.mini_tspin1,
            mini_tspin2: raw.mini_tspin2,
            perfect_clear: raw.perfect_clear,
            combo_garbage: raw.combo_garbage,
            move_time: raw.move_time,
            wasted_t: raw.wasted_t,
            use_bag: raw.use_bag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayVec;

    #[test]
    fn test_piece_codes_round_trip() {
        for piece in Piece::ALL {
            assert_eq!(piece_from_i32(piece_to_i32(piece)), piece);
        }
        assert_eq!(piece_to_i32(Piece::I), 0);
        assert_eq!(piece_to_i32(Piece::J), 6);
    }

    #[test]
    fn test_movement_codes_round_trip() {
        for movement in [
            Movement::Left,
            Movement::Right,
            Movement::Cw,
            Movement::Ccw,
            Movement::Drop,
        ] {
            assert_eq!(movement_from_i32(movement_to_i32(movement)), movement);
        }
    }

    #[test]
    fn test_move_round_trip() {
        let mut movements = ArrayVec::new();
        movements.push(Movement::Left);
        movements.push(Movement::Cw);
        let mv = MoveResult {
            hold: true,
            expected_cells: [(3, 0), (4, 0), (5, 0), (4, 1)],
            movements,
            nodes: 1234,
            depth: 6,
            original_rank: 2,
        };
        let raw = RawMove::from(&mv);
        assert_eq!(raw.movement_count, 2);
        assert_eq!(raw.expected_x, [3, 4, 5, 4]);
        assert_eq!(MoveResult::from(&raw), mv);
    }

    #[test]
    fn test_plan_round_trip_uses_sentinel() {
        let mut cleared_lines = ArrayVec::new();
        cleared_lines.push(0);
        let plan = PlanPlacement {
            piece: Piece::T,
            tspin: TspinStatus::Full,
            expected_cells: [(3, 0), (4, 0), (5, 0), (4, 1)],
            cleared_lines,
        };
        let raw = RawPlanPlacement::from(&plan);
        assert_eq!(raw.cleared_lines, [0, NO_LINE, NO_LINE, NO_LINE]);
        assert_eq!(PlanPlacement::from(&raw), plan);
    }

    #[test]
    fn test_options_round_trip() {
        let options = Options {
            threads: 3,
            pc_loop: true,
            ..Options::default()
        };
        let raw = RawOptions::from(&options);
        assert_eq!(Options::from(&raw), options);
    }

    #[test]
    fn test_weights_round_trip() {
        for weights in [Weights::default(), Weights::fast()] {
            let raw = RawWeights::from(&weights);
            assert_eq!(Weights::from(&raw), weights);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(&PollOutcome::Waiting), STATUS_WAITING);
        assert_eq!(status_code(&PollOutcome::Dead), STATUS_DEAD);
    }
}
