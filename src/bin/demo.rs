//! Interactive demo: the agent plays by itself on a random 7-bag.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{bail, Result};
use rand::seq::SliceRandom;

use drift::{launch, Board, Options, Piece, PollOutcome, Weights};

const PREVIEWS: usize = 5;
const PIECES_TO_PLAY: usize = 200;

fn main() -> Result<()> {
    let mut bot = launch(Options::default(), Weights::default());
    let mut rng = rand::thread_rng();

    let mut board = Board::new();
    let mut queue = VecDeque::new();
    let mut bag: Vec<Piece> = Vec::new();
    let mut hold: Option<Piece> = None;

    top_up(&mut bot, &mut queue, &mut bag, &mut rng)?;

    for placed in 0..PIECES_TO_PLAY {
        std::thread::sleep(Duration::from_millis(100));
        bot.request_next_move(0)?;

        let mv = match bot.block_next_move(0)? {
            PollOutcome::MoveProvided { mv, .. } => mv,
            PollOutcome::Dead => {
                println!("the agent cannot survive this position, stopping");
                return Ok(());
            }
            PollOutcome::Waiting => bail!("blocking call resolved to waiting"),
        };

        if mv.hold {
            let previous = hold;
            hold = queue.pop_front();
            if previous.is_none() {
                queue.pop_front();
            }
        } else {
            queue.pop_front();
        }
        top_up(&mut bot, &mut queue, &mut bag, &mut rng)?;

        for (x, y) in mv.expected_cells {
            board.set(x as usize, y as usize, true);
        }
        board.clear_lines();

        println!("{}", board);
        let hold_name = hold.map_or(" ".to_string(), |p| format!("{:?}", p));
        let preview: Vec<String> = queue
            .iter()
            .take(PREVIEWS)
            .map(|p| format!("{:?}", p))
            .collect();
        println!(
            "#{:<4} H: [{}] Q: [{}]",
            placed + 1,
            hold_name,
            preview.join(", ")
        );
        println!();
    }

    Ok(())
}

fn top_up(
    bot: &mut drift::AgentHandle,
    queue: &mut VecDeque<Piece>,
    bag: &mut Vec<Piece>,
    rng: &mut impl rand::Rng,
) -> Result<()> {
    while queue.len() < PREVIEWS {
        if bag.is_empty() {
            *bag = Piece::ALL.to_vec();
            bag.shuffle(rng);
        }
        let piece = bag.pop().expect("bag refilled above");
        bot.add_next_piece(piece)?;
        queue.push_back(piece);
    }
    Ok(())
}
