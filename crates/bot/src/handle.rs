//! The live agent: one worker thread driving an engine, and the
//! request / poll / block machinery the host talks to.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use drift_core::{Bag, Board, BoardState, Piece};

use crate::engine::{Engine, Suggestion};
use crate::error::AgentError;
use crate::options::Options;
use crate::results::PollOutcome;

enum BotMsg {
    Reset(Box<BoardState>),
    NewPiece(Piece),
    NextMove(u32),
}

#[derive(Default)]
struct Slot {
    /// Bumped by every host-side reset; the worker only publishes results
    /// stamped with the epoch it last saw, so stale computation is dropped.
    epoch: u64,
    outcome: Option<Suggestion>,
    dead: bool,
}

struct Shared {
    slot: Mutex<Slot>,
    cond: Condvar,
}

/// Owns one running engine and its worker thread.
///
/// All interaction goes through the methods below; the worker is joined on
/// [`AgentHandle::terminate`] or drop, whichever comes first.
pub struct AgentHandle {
    tx: Option<Sender<BotMsg>>,
    worker: Option<JoinHandle<()>>,
    shared: Arc<Shared>,
    bag: Bag,
    speculate: bool,
}

impl AgentHandle {
    /// Start an agent over `engine` with an empty field, no back-to-back,
    /// no combo, and an empty queue seeded from a full bag.
    pub fn launch(engine: Box<dyn Engine>, options: Options) -> AgentHandle {
        let (tx, rx) = mpsc::channel();
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot::default()),
            cond: Condvar::new(),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || worker_loop(engine, options, rx, worker_shared));
        AgentHandle {
            tx: Some(tx),
            worker: Some(worker),
            shared,
            bag: Bag::full(),
            speculate: options.speculate,
        }
    }

    /// Replace the field belief and discard all in-flight computation,
    /// including any unconsumed move, outstanding request, and a latched
    /// dead state. The piece queue is unaffected.
    pub fn reset(
        &mut self,
        field: &[[bool; Board::WIDTH]; Board::HEIGHT],
        back_to_back: bool,
        combo: u32,
    ) -> Result<(), AgentError> {
        let tx = self.tx.as_ref().ok_or(AgentError::Terminated)?;
        {
            let mut slot = self.shared.slot.lock().unwrap();
            slot.epoch += 1;
            slot.outcome = None;
            slot.dead = false;
        }
        let state = BoardState::new(Board::from_grid(field), back_to_back, combo);
        let _ = tx.send(BotMsg::Reset(Box::new(state)));
        Ok(())
    }

    /// Append one piece to the tail of the queue.
    ///
    /// With speculation enabled the piece must belong to the current 7-bag
    /// cycle; an illegal append is rejected without reaching the engine.
    pub fn add_next_piece(&mut self, piece: Piece) -> Result<(), AgentError> {
        let tx = self.tx.as_ref().ok_or(AgentError::Terminated)?;
        if self.speculate && !self.bag.contains(piece) {
            return Err(AgentError::IllegalPiece { piece });
        }
        self.bag.take(piece);
        let _ = tx.send(BotMsg::NewPiece(piece));
        Ok(())
    }

    /// Ask for the next move as soon as possible. Non-blocking; re-issuing
    /// before resolution replaces the previous request.
    ///
    /// `incoming` is the number of garbage lines expected to arrive after
    /// the next placement.
    pub fn request_next_move(&mut self, incoming: u32) -> Result<(), AgentError> {
        let tx = self.tx.as_ref().ok_or(AgentError::Terminated)?;
        let _ = tx.send(BotMsg::NextMove(incoming));
        Ok(())
    }

    /// Non-blocking check for the requested move. At most `plan_capacity`
    /// placements of the favored continuation are returned with it.
    pub fn poll_next_move(&self, plan_capacity: usize) -> Result<PollOutcome, AgentError> {
        if self.tx.is_none() {
            return Err(AgentError::Terminated);
        }
        let mut slot = self.shared.slot.lock().unwrap();
        Ok(resolve(&mut slot, plan_capacity).unwrap_or(PollOutcome::Waiting))
    }

    /// Like [`AgentHandle::poll_next_move`], but suspends the calling
    /// thread until the request resolves. No timeout; only `terminate`
    /// (or a reset from the host's logic) abandons the wait.
    pub fn block_next_move(&self, plan_capacity: usize) -> Result<PollOutcome, AgentError> {
        if self.tx.is_none() {
            return Err(AgentError::Terminated);
        }
        let mut slot = self.shared.slot.lock().unwrap();
        loop {
            if let Some(outcome) = resolve(&mut slot, plan_capacity) {
                return Ok(outcome);
            }
            slot = self.shared.cond.wait(slot).unwrap();
        }
    }

    /// Stop the engine and reclaim the worker thread. Idempotent; also runs
    /// on drop so every exit path releases the agent.
    pub fn terminate(&mut self) {
        self.tx = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn resolve(slot: &mut Slot, plan_capacity: usize) -> Option<PollOutcome> {
    if let Some(mut suggestion) = slot.outcome.take() {
        suggestion.plan.truncate(plan_capacity);
        return Some(PollOutcome::MoveProvided {
            mv: suggestion.mv,
            plan: suggestion.plan,
        });
    }
    if slot.dead {
        return Some(PollOutcome::Dead);
    }
    None
}

fn worker_loop(
    mut engine: Box<dyn Engine>,
    options: Options,
    rx: Receiver<BotMsg>,
    shared: Arc<Shared>,
) {
    let mut pending: Option<u32> = None;
    let mut epoch = 0u64;

    loop {
        // host calls are observed in issue order
        loop {
            match rx.try_recv() {
                Ok(msg) => apply(&mut *engine, msg, &mut pending, &mut epoch),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        if engine.is_dead() {
            publish_dead(&shared, epoch);
            match rx.recv() {
                Ok(msg) => apply(&mut *engine, msg, &mut pending, &mut epoch),
                Err(_) => return,
            }
            continue;
        }

        if let Some(incoming) = pending {
            if engine.nodes() >= options.min_nodes {
                if let Some(suggestion) = engine.suggest(incoming) {
                    pending = None;
                    publish_move(&shared, epoch, suggestion);
                    continue;
                }
            }
        }

        let may_expand = engine.nodes() < options.max_nodes;
        if !(may_expand && engine.think()) {
            if engine.is_dead() {
                // death discovered mid-think; publish at the top of the loop
                continue;
            }
            // nothing useful to do until the host says more
            match rx.recv() {
                Ok(msg) => apply(&mut *engine, msg, &mut pending, &mut epoch),
                Err(_) => return,
            }
        }
    }
}

fn apply(engine: &mut dyn Engine, msg: BotMsg, pending: &mut Option<u32>, epoch: &mut u64) {
    match msg {
        BotMsg::Reset(state) => {
            engine.reset(*state);
            *pending = None;
            *epoch += 1;
        }
        BotMsg::NewPiece(piece) => engine.add_next_piece(piece),
        BotMsg::NextMove(incoming) => *pending = Some(incoming),
    }
}

fn publish_move(shared: &Shared, epoch: u64, suggestion: Suggestion) {
    let mut slot = shared.slot.lock().unwrap();
    if slot.epoch == epoch {
        slot.outcome = Some(suggestion);
        shared.cond.notify_all();
    }
}

fn publish_dead(shared: &Shared, epoch: u64) {
    let mut slot = shared.slot.lock().unwrap();
    if slot.epoch == epoch && !slot.dead {
        slot.dead = true;
        shared.cond.notify_all();
    }
}
