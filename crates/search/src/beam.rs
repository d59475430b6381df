//! Beam search over the known piece queue.

use drift_bot::{Engine, MoveResult, Options, PlanPlacement, Suggestion};
use drift_core::{BoardState, Piece, PieceQueue};
use drift_engine::{generate_moves, lock, MoveCandidate};
use drift_eval::{score_board, score_lock, Weights};
use rayon::prelude::*;

const BEAM_WIDTH: usize = 64;
const PLAN_CAP: usize = 32;

/// The default search engine: lookahead beam over the known queue.
pub struct BeamEngine {
    state: BoardState,
    queue: PieceQueue,
    hold: Option<Piece>,
    options: Options,
    weights: Weights,
    nodes: u32,
    depth: u32,
    search: Option<Search>,
    dead: bool,
    pool: Option<rayon::ThreadPool>,
}

struct Search {
    roots: Vec<Root>,
    beam: Vec<Node>,
}

/// One committed first move under consideration.
struct Root {
    candidate: MoveCandidate,
    hold: bool,
    original_rank: u32,
    /// Stack height after the lock, for incoming-garbage risk weighting.
    stack_height: i64,
}

#[derive(Clone)]
struct Node {
    root: u32,
    state: BoardState,
    hold: Option<Piece>,
    queue_pos: usize,
    score: i64,
    plan: Vec<PlanPlacement>,
}

/// A candidate expansion of one node: the move taken and the node it leads to.
struct Expansion {
    hold_used: bool,
    candidate: MoveCandidate,
    node: Node,
}

impl BeamEngine {
    pub fn new(options: Options, weights: Weights) -> Self {
        let pool = if options.threads > 1 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(options.threads as usize)
                .build()
                .ok()
        } else {
            None
        };
        BeamEngine {
            state: BoardState::default(),
            queue: PieceQueue::new(),
            hold: None,
            options,
            weights,
            nodes: 0,
            depth: 0,
            search: None,
            dead: false,
            pool,
        }
    }

    fn discard_search(&mut self) {
        self.search = None;
        self.nodes = 0;
        self.depth = 0;
    }

    /// Build the first layer. Returns false when the queue does not carry
    /// enough information yet, or when the position is dead.
    fn build_roots(&mut self) -> bool {
        let Some(current) = self.queue.get(0) else {
            return false;
        };
        if generate_moves(&self.state.board, current, self.options.mode).is_empty() {
            // the current piece cannot even spawn
            self.dead = true;
            return false;
        }
        if self.options.use_hold && self.hold.is_none() && self.queue.len() < 2 {
            // the piece behind a hold is unknown; wait for more queue
            return false;
        }

        let seed = Node {
            root: 0,
            state: self.state.clone(),
            hold: self.hold,
            queue_pos: 0,
            score: 0,
            plan: Vec::new(),
        };
        let mut expansions = expand_node(&seed, &self.queue, &self.options, &self.weights);
        if expansions.is_empty() {
            self.dead = true;
            return false;
        }

        expansions.sort_unstable_by(|a, b| b.node.score.cmp(&a.node.score));
        self.nodes = self.nodes.saturating_add(expansions.len() as u32);
        self.depth = 1;

        let mut roots = Vec::with_capacity(expansions.len());
        let mut beam = Vec::with_capacity(BEAM_WIDTH.min(expansions.len()));
        for (rank, expansion) in expansions.into_iter().enumerate() {
            let mut node = expansion.node;
            node.root = rank as u32;
            roots.push(Root {
                stack_height: node.state.board.max_height() as i64,
                candidate: expansion.candidate,
                hold: expansion.hold_used,
                original_rank: rank as u32,
            });
            if beam.len() < BEAM_WIDTH {
                beam.push(node);
            }
        }

        self.search = Some(Search { roots, beam });
        true
    }

    /// Expand the deepest layer by one piece. Returns false when the known
    /// queue is exhausted.
    fn deepen(&mut self) -> bool {
        let Some(search) = self.search.as_mut() else {
            return false;
        };

        let queue = &self.queue;
        let options = &self.options;
        let weights = &self.weights;
        let expand = |node: &Node| expand_node(node, queue, options, weights);

        let mut children: Vec<Node> = match &self.pool {
            Some(pool) => pool.install(|| {
                search
                    .beam
                    .par_iter()
                    .flat_map_iter(|node| expand(node).into_iter().map(|e| e.node))
                    .collect()
            }),
            None => search
                .beam
                .iter()
                .flat_map(|node| expand(node).into_iter().map(|e| e.node))
                .collect(),
        };

        if children.is_empty() {
            return false;
        }

        self.nodes = self.nodes.saturating_add(children.len() as u32);
        self.depth += 1;
        children.sort_unstable_by(|a, b| b.score.cmp(&a.score));
        children.truncate(BEAM_WIDTH);
        search.beam = children;
        true
    }
}

impl Engine for BeamEngine {
    fn reset(&mut self, state: BoardState) {
        self.state = state;
        self.dead = false;
        self.discard_search();
    }

    fn add_next_piece(&mut self, piece: Piece) {
        self.queue.push_back(piece);
    }

    fn think(&mut self) -> bool {
        if self.dead {
            return false;
        }
        if self.search.is_none() {
            self.build_roots()
        } else {
            self.deepen()
        }
    }

    fn nodes(&self) -> u32 {
        self.nodes
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn suggest(&mut self, incoming: u32) -> Option<Suggestion> {
        if self.dead {
            return None;
        }
        let search = self.search.as_ref()?;

        // pick the root whose best surviving line scores highest, shifted
        // by how risky its stack is against the announced garbage
        let jeopardy = self.weights.jeopardy as i64 * incoming as i64;
        let mut best: Option<(i64, &Node)> = None;
        for node in &search.beam {
            let root = &search.roots[node.root as usize];
            let adjusted = node.score + jeopardy * root.stack_height / 4;
            if best.map_or(true, |(score, _)| adjusted > score) {
                best = Some((adjusted, node));
            }
        }
        let (_, best_node) = best?;
        let root = &search.roots[best_node.root as usize];

        let mut expected_cells = [(0u8, 0u8); 4];
        for (slot, (x, y)) in expected_cells
            .iter_mut()
            .zip(root.candidate.placement.cells())
        {
            *slot = (x as u8, y as u8);
        }

        let suggestion = Suggestion {
            mv: MoveResult {
                hold: root.hold,
                expected_cells,
                movements: root.candidate.path.clone(),
                nodes: self.nodes,
                depth: self.depth,
                original_rank: root.original_rank,
            },
            plan: best_node.plan.clone(),
        };

        // advance the belief as if the placement executes exactly
        let hold_used = root.hold;
        let placement = root.candidate.placement;
        let tspin = root.candidate.tspin;
        lock(&mut self.state, placement, tspin);
        if hold_used {
            // the queue head moves into the hold slot; a first-ever hold
            // also consumes the piece actually played
            if let Some(stored) = self.queue.pop_front() {
                if self.hold.replace(stored).is_none() {
                    self.queue.pop_front();
                }
            }
        } else {
            self.queue.pop_front();
        }
        self.discard_search();

        Some(suggestion)
    }
}

/// Generate all successor nodes of `node`: every reachable placement of the
/// next queue piece, plus every placement after a hold when allowed.
fn expand_node(
    node: &Node,
    queue: &PieceQueue,
    options: &Options,
    weights: &Weights,
) -> Vec<Expansion> {
    let Some(current) = queue.get(node.queue_pos) else {
        return Vec::new();
    };

    // (piece to place, hold used, queue entries consumed, hold afterwards)
    let mut branches = Vec::with_capacity(2);
    branches.push((current, false, 1usize, node.hold));
    if options.use_hold {
        let swap = node.hold.or_else(|| queue.get(node.queue_pos + 1));
        if let Some(swap) = swap {
            if swap != current {
                let consumed = if node.hold.is_some() { 1 } else { 2 };
                branches.push((swap, true, consumed, Some(current)));
            }
        }
    }

    let mut expansions = Vec::new();
    for (piece, hold_used, consumed, hold_after) in branches {
        for candidate in generate_moves(&node.state.board, piece, options.mode) {
            let mut state = node.state.clone();
            let result = lock(&mut state, candidate.placement, candidate.tspin);

            let mut delta = score_board(&state, weights) as i64
                + score_lock(piece, &result, weights) as i64;
            let inputs = candidate.path.len() as i64 + hold_used as i64;
            delta += weights.move_time as i64 * inputs;
            if options.pc_loop && result.perfect_clear {
                delta += weights.perfect_clear as i64;
            }

            let mut plan = node.plan.clone();
            if plan.len() < PLAN_CAP {
                let mut expected_cells = [(0u8, 0u8); 4];
                for (slot, (x, y)) in
                    expected_cells.iter_mut().zip(candidate.placement.cells())
                {
                    *slot = (x as u8, y as u8);
                }
                plan.push(PlanPlacement {
                    piece,
                    tspin: candidate.tspin,
                    expected_cells,
                    cleared_lines: result.cleared_lines.clone(),
                });
            }

            expansions.push(Expansion {
                hold_used,
                candidate,
                node: Node {
                    root: node.root,
                    state,
                    hold: hold_after,
                    queue_pos: node.queue_pos + consumed,
                    score: node.score + delta,
                    plan,
                },
            });
        }
    }
    expansions
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{Board, Movement};

    fn engine_with(options: Options) -> BeamEngine {
        BeamEngine::new(options, Weights::default())
    }

    fn think_until_settled(engine: &mut BeamEngine) {
        while engine.think() {}
    }

    #[test]
    fn test_launch_state_defaults() {
        let engine = engine_with(Options::default());
        assert_eq!(engine.state, BoardState::default());
        assert!(engine.state.board.is_empty());
        assert!(!engine.state.back_to_back);
        assert_eq!(engine.state.combo, 0);
        assert!(engine.queue.is_empty());
        assert!(engine.hold.is_none());
    }

    #[test]
    fn test_no_queue_no_suggestion() {
        let mut engine = engine_with(Options::default());
        assert!(!engine.think());
        assert_eq!(engine.suggest(0), None);
        assert!(!engine.is_dead());
    }

    #[test]
    fn test_hold_needs_second_piece() {
        let mut engine = engine_with(Options::default());
        engine.add_next_piece(Piece::I);
        // with hold enabled the piece behind the hold is still unknown
        assert!(!engine.think());
        assert_eq!(engine.suggest(0), None);

        engine.add_next_piece(Piece::J);
        assert!(engine.think());
        assert!(engine.suggest(0).is_some());
    }

    #[test]
    fn test_hold_disabled_needs_one_piece() {
        let options = Options {
            use_hold: false,
            ..Options::default()
        };
        let mut engine = engine_with(options);
        engine.add_next_piece(Piece::T);
        assert!(engine.think());
        let suggestion = engine.suggest(0).expect("move");
        assert!(!suggestion.mv.hold);
    }

    #[test]
    fn test_suggestion_is_in_bounds_and_pathed() {
        let mut engine = engine_with(Options::default());
        for piece in [
            Piece::I,
            Piece::J,
            Piece::O,
            Piece::Z,
            Piece::T,
            Piece::L,
            Piece::S,
        ] {
            engine.add_next_piece(piece);
        }
        think_until_settled(&mut engine);
        let suggestion = engine.suggest(0).expect("move");

        for (x, y) in suggestion.mv.expected_cells {
            assert!((x as usize) < Board::WIDTH);
            assert!((y as usize) < Board::HEIGHT);
        }
        assert!(!suggestion.mv.movements.is_empty());
        assert_eq!(suggestion.mv.movements.last(), Some(&Movement::Drop));
        assert!(suggestion.mv.nodes > 0);
        assert!(suggestion.mv.depth >= 1);
    }

    #[test]
    fn test_suggest_advances_queue_belief() {
        let mut engine = engine_with(Options::default());
        for piece in [Piece::I, Piece::J, Piece::O, Piece::Z, Piece::T] {
            engine.add_next_piece(piece);
        }
        think_until_settled(&mut engine);
        let before = engine.queue.len();
        let suggestion = engine.suggest(0).expect("move");
        let consumed = before - engine.queue.len();
        if suggestion.mv.hold {
            // first-ever hold consumes the held and the played piece
            assert_eq!(consumed, 2);
            assert!(engine.hold.is_some());
        } else {
            assert_eq!(consumed, 1);
        }
        // search state is rebuilt for the next request
        assert_eq!(engine.nodes(), 0);
    }

    #[test]
    fn test_plan_follows_the_favored_line() {
        let mut engine = engine_with(Options::default());
        for piece in [Piece::I, Piece::J, Piece::O, Piece::Z] {
            engine.add_next_piece(piece);
        }
        think_until_settled(&mut engine);
        let suggestion = engine.suggest(0).expect("move");
        assert!(!suggestion.plan.is_empty());
        // the plan opens with the suggested placement itself
        assert_eq!(suggestion.plan[0].expected_cells, suggestion.mv.expected_cells);
    }

    #[test]
    fn test_dead_when_spawn_blocked() {
        let mut engine = engine_with(Options::default());
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            for y in 19..=22 {
                board.set(x, y, true);
            }
        }
        engine.reset(BoardState::new(board, false, 0));
        engine.add_next_piece(Piece::T);
        engine.add_next_piece(Piece::I);
        assert!(!engine.think());
        assert!(engine.is_dead());
        assert_eq!(engine.suggest(0), None);
    }

    #[test]
    fn test_reset_revives_dead_engine() {
        let mut engine = engine_with(Options::default());
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            for y in 19..=22 {
                board.set(x, y, true);
            }
        }
        engine.reset(BoardState::new(board, false, 0));
        engine.add_next_piece(Piece::T);
        engine.add_next_piece(Piece::I);
        assert!(!engine.think());
        assert!(engine.is_dead());

        // queue survives the reset; only the field belief is replaced
        engine.reset(BoardState::default());
        assert!(!engine.is_dead());
        assert!(engine.think());
        assert!(engine.suggest(0).is_some());
    }

    #[test]
    fn test_threaded_engine_still_decides() {
        let options = Options {
            threads: 4,
            ..Options::default()
        };
        let mut engine = engine_with(options);
        for piece in [Piece::I, Piece::J, Piece::O, Piece::Z, Piece::T] {
            engine.add_next_piece(piece);
        }
        think_until_settled(&mut engine);
        assert!(engine.suggest(0).is_some());
    }
}
