//! Showdown scoring.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::StateError;
use crate::board::Board;
use crate::core::{OfcConfig, PlayerId, PlayerMap, Row};
use crate::eval::HandEvaluator;

/// Final outcome of a hand, derived from two complete boards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Points scored by each side.
    pub scores: PlayerMap<i32>,

    /// Royalties counted for each side; a fouled board counts none.
    pub royalties: PlayerMap<u32>,

    pub fouls: PlayerMap<bool>,

    /// Winner of each row (front, middle, back). Rows are only compared
    /// when both boards are valid; a tied row has no winner.
    pub row_winners: [Option<PlayerId>; 3],

    /// Side that won all three rows.
    pub scoop: Option<PlayerId>,

    /// Higher total, or `None` on equal totals.
    pub winner: Option<PlayerId>,
}

impl GameResult {
    /// Score two complete boards.
    pub fn from_boards(
        boards: &PlayerMap<Board>,
        evaluator: &HandEvaluator,
        config: &OfcConfig,
    ) -> Result<Self, StateError> {
        if boards.iter().any(|(_, b)| !b.is_complete()) {
            return Err(StateError::BoardsIncomplete);
        }

        let fouls = boards.map(|_, b| b.is_foul(evaluator));
        let mut royalties = boards.map(|_, b| b.royalty_total(evaluator));
        let mut scores = PlayerMap::new(0i32, 0i32);
        let mut row_winners = [None; 3];
        let mut scoop = None;

        match (fouls[PlayerId::FIRST], fouls[PlayerId::SECOND]) {
            (true, true) => {
                royalties = PlayerMap::new(0, 0);
            }
            (true, false) | (false, true) => {
                let valid = if fouls[PlayerId::FIRST] { PlayerId::SECOND } else { PlayerId::FIRST };
                royalties[valid.opponent()] = 0;
                scores[valid] = config.foul_bonus + royalty_points(royalties[valid]);
            }
            (false, false) => {
                for row in Row::ALL {
                    row_winners[row.index()] = row_winner(boards, evaluator, row);
                }
                for player in PlayerId::BOTH {
                    let rows_won = row_winners.iter().filter(|w| **w == Some(player)).count();
                    scores[player] = rows_won as i32 + royalty_points(royalties[player]);
                    if rows_won == Row::ALL.len() {
                        scores[player] += config.scoop_bonus;
                        scoop = Some(player);
                    }
                }
            }
        }

        let winner = match scores[PlayerId::FIRST].cmp(&scores[PlayerId::SECOND]) {
            Ordering::Greater => Some(PlayerId::FIRST),
            Ordering::Less => Some(PlayerId::SECOND),
            Ordering::Equal => None,
        };

        Ok(Self {
            scores,
            royalties,
            fouls,
            row_winners,
            scoop,
            winner,
        })
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == Some(player)
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Points of `player` minus the opponent's.
    #[must_use]
    pub fn net(&self, player: PlayerId) -> i32 {
        self.scores[player] - self.scores[player.opponent()]
    }
}

fn royalty_points(royalty: u32) -> i32 {
    i32::try_from(royalty).unwrap_or(i32::MAX)
}

fn row_winner(boards: &PlayerMap<Board>, evaluator: &HandEvaluator, row: Row) -> Option<PlayerId> {
    let first = boards[PlayerId::FIRST].row_rank(evaluator, row)?;
    let second = boards[PlayerId::SECOND].row_rank(evaluator, row)?;
    // Lower rank is stronger.
    match first.value().cmp(&second.value()) {
        Ordering::Less => Some(PlayerId::FIRST),
        Ordering::Greater => Some(PlayerId::SECOND),
        Ordering::Equal => None,
    }
}
