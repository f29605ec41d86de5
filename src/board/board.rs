//! A player's three-row board.
//!
//! ## Validity
//!
//! Once all thirteen cards are placed the back row must be at least as
//! strong as the middle, and the middle at least as strong as the front.
//! The front row is ranked in the three-card space, so the comparison runs
//! on [`HandRank::strength`]. A complete board that breaks the ordering is a
//! foul, which is a scoring outcome rather than an error.
//!
//! ## Encoding
//!
//! Serializes as `{"front": [...], "middle": [...], "back": [...]}` with
//! card tokens. Decoding re-checks capacities and duplicates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

use crate::core::{Card, Row};
use crate::eval::{HandEvaluator, HandRank, RoyaltyCalculator};

/// Cards in one row, in placement order.
pub type RowCards = SmallVec<[Card; 5]>;

/// Cards a side holds but has not placed yet.
pub type Hand = SmallVec<[Card; 5]>;

/// Placement failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{0} row is full")]
    RowFull(Row),
    #[error("card {0} is not available")]
    CardNotAvailable(Card),
}

/// Three rows owned by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    rows: [RowCards; 3],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card on a row.
    pub fn place(&mut self, card: Card, row: Row) -> Result<(), PlacementError> {
        if self.is_row_full(row) {
            return Err(PlacementError::RowFull(row));
        }
        if self.contains(card) {
            return Err(PlacementError::CardNotAvailable(card));
        }
        self.rows[row.index()].push(card);
        Ok(())
    }

    /// Move a card from `hand` onto a row. The hand is untouched on failure.
    pub fn place_from_hand(&mut self, hand: &mut Hand, card: Card, row: Row) -> Result<(), PlacementError> {
        let pos = hand
            .iter()
            .position(|&c| c == card)
            .ok_or(PlacementError::CardNotAvailable(card))?;
        self.place(card, row)?;
        hand.remove(pos);
        Ok(())
    }

    #[must_use]
    pub fn row_cards(&self, row: Row) -> &[Card] {
        &self.rows[row.index()]
    }

    #[must_use]
    pub fn is_row_full(&self, row: Row) -> bool {
        self.rows[row.index()].len() >= row.capacity()
    }

    /// Rows that can still take a card.
    #[must_use]
    pub fn free_rows(&self) -> Vec<Row> {
        Row::ALL.into_iter().filter(|&row| !self.is_row_full(row)).collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        Row::ALL.iter().all(|&row| self.is_row_full(row))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.rows.iter().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.rows.iter().any(|r| r.contains(&card))
    }

    /// All placed cards, front row first.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    /// Rank of a row, `None` until it is full.
    #[must_use]
    pub fn row_rank(&self, evaluator: &HandEvaluator, row: Row) -> Option<HandRank> {
        if !self.is_row_full(row) {
            return None;
        }
        // Full rows hold exactly `capacity` distinct cards.
        evaluator.evaluate(self.row_cards(row)).ok()
    }

    /// Complete and correctly ordered.
    #[must_use]
    pub fn is_valid(&self, evaluator: &HandEvaluator) -> bool {
        let ranks = (
            self.row_rank(evaluator, Row::Front),
            self.row_rank(evaluator, Row::Middle),
            self.row_rank(evaluator, Row::Back),
        );
        match ranks {
            (Some(front), Some(middle), Some(back)) => {
                back.strength() <= middle.strength() && middle.strength() <= front.strength()
            }
            _ => false,
        }
    }

    /// Complete but misordered.
    #[must_use]
    pub fn is_foul(&self, evaluator: &HandEvaluator) -> bool {
        self.is_complete() && !self.is_valid(evaluator)
    }

    /// Royalty for one row; 0 unless the row is full.
    #[must_use]
    pub fn row_royalty(&self, evaluator: &HandEvaluator, row: Row) -> u32 {
        self.row_rank(evaluator, row)
            .map_or(0, |rank| RoyaltyCalculator::for_rank(row, rank, self.row_cards(row)))
    }

    /// Sum of row royalties; 0 while the board is incomplete.
    #[must_use]
    pub fn royalty_total(&self, evaluator: &HandEvaluator) -> u32 {
        if !self.is_complete() {
            return 0;
        }
        Row::ALL.iter().map(|&row| self.row_royalty(evaluator, row)).sum()
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in Row::ALL {
            let cards: Vec<String> = self.row_cards(row).iter().map(Card::to_string).collect();
            writeln!(f, "{:<6} {}", row.name(), cards.join(" "))?;
        }
        Ok(())
    }
}

/// Wire form of a board.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BoardRepr {
    front: Vec<Card>,
    middle: Vec<Card>,
    back: Vec<Card>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        let [front, middle, back] = board.rows;
        Self {
            front: front.into_vec(),
            middle: middle.into_vec(),
            back: back.into_vec(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = PlacementError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut board = Board::new();
        for (row, cards) in [(Row::Front, repr.front), (Row::Middle, repr.middle), (Row::Back, repr.back)] {
            for card in cards {
                board.place(card, row)?;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    fn board(front: &str, middle: &str, back: &str) -> Board {
        let mut board = Board::new();
        for (row, s) in [(Row::Front, front), (Row::Middle, middle), (Row::Back, back)] {
            for card in cards(s) {
                board.place(card, row).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_place_and_free_rows() {
        let mut b = Board::new();
        assert_eq!(b.free_rows(), vec![Row::Front, Row::Middle, Row::Back]);

        for card in cards("Ah Kd 2c") {
            b.place(card, Row::Front).unwrap();
        }
        assert_eq!(b.free_rows(), vec![Row::Middle, Row::Back]);
        assert_eq!(b.place(cards("3c")[0], Row::Front), Err(PlacementError::RowFull(Row::Front)));
        assert_eq!(b.card_count(), 3);
    }

    #[test]
    fn test_duplicate_placement_rejected() {
        let mut b = Board::new();
        let ace = cards("Ah")[0];
        b.place(ace, Row::Back).unwrap();
        assert_eq!(b.place(ace, Row::Middle), Err(PlacementError::CardNotAvailable(ace)));
    }

    #[test]
    fn test_place_from_hand() {
        let mut b = Board::new();
        let mut hand: Hand = cards("Ah Kd").into_iter().collect();
        let queen = cards("Qs")[0];

        assert_eq!(
            b.place_from_hand(&mut hand, queen, Row::Back),
            Err(PlacementError::CardNotAvailable(queen))
        );
        b.place_from_hand(&mut hand, cards("Kd")[0], Row::Back).unwrap();
        assert_eq!(hand.as_slice(), cards("Ah").as_slice());
        assert!(b.contains(cards("Kd")[0]));
    }

    #[test]
    fn test_place_from_hand_keeps_hand_on_full_row() {
        let mut b = board("Ah Kd 2c", "", "");
        let mut hand: Hand = cards("3s").into_iter().collect();
        assert!(b.place_from_hand(&mut hand, cards("3s")[0], Row::Front).is_err());
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_valid_board() {
        let evaluator = HandEvaluator::new(64);
        let b = board("Qh Qd 3c", "9c 9d 9h 4d 2h", "As 9s 7s 4s 2s");
        assert!(b.is_complete());
        assert!(b.is_valid(&evaluator));
        assert!(!b.is_foul(&evaluator));
        // QQ front 7, trips middle 2, flush back 4.
        assert_eq!(b.royalty_total(&evaluator), 13);
    }

    #[test]
    fn test_middle_weaker_than_front_fouls() {
        let evaluator = HandEvaluator::new(64);
        let b = board("Kh Kd 3c", "Qc Qs 8h 4d 2h", "As 9s 7s 4s 2s");
        assert!(b.is_complete());
        assert!(!b.is_valid(&evaluator));
        assert!(b.is_foul(&evaluator));
    }

    #[test]
    fn test_back_weaker_than_middle_fouls() {
        let evaluator = HandEvaluator::new(64);
        let b = board("2h 3d 4c", "As 9s 7s 4s 2s", "Kc Kd 8h 5d 6h");
        assert!(b.is_foul(&evaluator));
    }

    #[test]
    fn test_same_pair_with_more_kickers_is_not_a_foul() {
        let evaluator = HandEvaluator::new(64);
        // Front QQ-K, middle QQ-K-5-2: the middle's extra kickers make it stronger.
        let b = board("Qh Qd Kc", "Qc Qs Kh 5d 2h", "Ah As 7s 7d 2s");
        assert!(b.is_valid(&evaluator));
    }

    #[test]
    fn test_front_pair_beats_middle_high_card() {
        let evaluator = HandEvaluator::new(64);
        let b = board("2h 2d 3c", "Ah Kd Qs Jh 9c", "Ac As 7s 7d 4s");
        assert!(b.is_foul(&evaluator));
    }

    #[test]
    fn test_incomplete_board() {
        let evaluator = HandEvaluator::new(64);
        let b = board("Ah Ad Ac", "Kh Kd", "");
        assert!(!b.is_complete());
        assert!(!b.is_valid(&evaluator));
        assert!(!b.is_foul(&evaluator));
        assert_eq!(b.royalty_total(&evaluator), 0);
        assert_eq!(b.row_royalty(&evaluator, Row::Front), 24);
        assert_eq!(b.row_rank(&evaluator, Row::Middle), None);
    }

    #[test]
    fn test_display() {
        let b = board("Ah Kd", "", "2c");
        let text = b.to_string();
        assert!(text.contains("front  Ah Kd"));
        assert!(text.contains("back   2c"));
    }

    #[test]
    fn test_serde_shape_and_roundtrip() {
        let b = board("Qh Qd 3c", "9c 9d", "Ah");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"{"front":["Qh","Qd","3c"],"middle":["9c","9d"],"back":["Ah"]}"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_serde_rejects_overfull_and_duplicates() {
        let overfull = r#"{"front":["Qh","Qd","3c","4c"],"middle":[],"back":[]}"#;
        assert!(serde_json::from_str::<Board>(overfull).is_err());
        let duplicate = r#"{"front":["Qh"],"middle":["Qh"],"back":[]}"#;
        assert!(serde_json::from_str::<Board>(duplicate).is_err());
    }
}
