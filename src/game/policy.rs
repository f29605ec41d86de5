//! Move-selection policies.
//!
//! The engine never decides where a card goes; a [`MovePolicy`] does.
//! Stock policies:
//! - `RandomPolicy`: uniform over legal moves, seeded
//! - `FirstLegalPolicy`: always the first legal move
//! - `ScriptedPolicy`: replays a fixed queue of moves

use std::collections::VecDeque;

use super::moves::Move;
use crate::board::Board;
use crate::core::{Card, GameRng, Rank, Row, Suit};

/// Chooses one placement per turn.
pub trait MovePolicy {
    /// Pick a move from `legal_moves`, which is never empty when called by
    /// the engine.
    fn choose_move(
        &mut self,
        board: &Board,
        hand: &[Card],
        legal_moves: &[Move],
        opponent_board: Option<&Board>,
    ) -> Move;
}

/// Uniformly random legal move.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl MovePolicy for RandomPolicy {
    fn choose_move(&mut self, _board: &Board, hand: &[Card], legal_moves: &[Move], _opponent: Option<&Board>) -> Move {
        match self.rng.choose(legal_moves) {
            Some(mv) => *mv,
            None => fallback(hand),
        }
    }
}

/// First legal move, which is deterministic given the hand order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPolicy;

impl MovePolicy for FirstLegalPolicy {
    fn choose_move(&mut self, _board: &Board, hand: &[Card], legal_moves: &[Move], _opponent: Option<&Board>) -> Move {
        legal_moves.first().copied().unwrap_or_else(|| fallback(hand))
    }
}

/// Replays a queue of moves. An exhausted queue, or a queued move that is
/// not legal right now, falls back to the first legal move.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    script: VecDeque<Move>,
}

impl ScriptedPolicy {
    #[must_use]
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            script: moves.into_iter().collect(),
        }
    }

    pub fn push(&mut self, mv: Move) {
        self.script.push_back(mv);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MovePolicy for ScriptedPolicy {
    fn choose_move(&mut self, board: &Board, hand: &[Card], legal_moves: &[Move], opponent: Option<&Board>) -> Move {
        match self.script.pop_front() {
            Some(mv) if legal_moves.contains(&mv) => mv,
            Some(mv) => {
                log::debug!("scripted move {} is not legal, using first legal move", mv);
                FirstLegalPolicy.choose_move(board, hand, legal_moves, opponent)
            }
            None => FirstLegalPolicy.choose_move(board, hand, legal_moves, opponent),
        }
    }
}

/// Move returned when a policy is asked with nothing legal; the engine
/// rejects it like any other illegal move.
fn fallback(hand: &[Card]) -> Move {
    let card = hand.first().copied().unwrap_or(Card::new(Rank::Two, Suit::Spades));
    Move::new(card, Row::Back)
}
