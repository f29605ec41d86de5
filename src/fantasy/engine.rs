//! Fantasy state machine.
//!
//! A side is NORMAL or ACTIVE. At each showdown a complete, unfouled board
//! is checked for entry; an active side exits and re-enters in one step when
//! it re-qualifies.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use super::state::{
    FantasyMode, FantasyRecord, FantasyState, FantasyStats, ProgressiveBonus, TransitionKind,
    STANDARD_FANTASY_CARDS,
};
use crate::board::Board;
use crate::core::{OfcConfig, Rank, Row};
use crate::eval::{HandCategory, HandEvaluator};

/// Fantasy history capacity when no config is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FantasyError {
    #[error("board is not complete")]
    BoardIncomplete,
}

/// What a showdown did to one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyOutcome {
    /// `Some(success)` when the side was playing fantasy.
    pub exited: Option<bool>,
    /// Card count for the next hand when the side (re-)entered.
    pub entered: Option<u8>,
}

/// Per-side fantasy tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FantasyEngine {
    mode: FantasyMode,
    threshold: u32,
    state: FantasyState,
    /// Trigger found by the last qualifying `check_entry`.
    pending_bonus: Option<ProgressiveBonus>,
    history: VecDeque<FantasyRecord>,
    history_capacity: usize,
    stats: FantasyStats,
}

impl Default for FantasyEngine {
    fn default() -> Self {
        Self::new(FantasyMode::Normal, 6)
    }
}

impl FantasyEngine {
    #[must_use]
    pub fn new(mode: FantasyMode, threshold: u32) -> Self {
        Self {
            mode,
            threshold,
            state: FantasyState::default(),
            pending_bonus: None,
            history: VecDeque::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            stats: FantasyStats::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &OfcConfig) -> Self {
        Self::new(config.fantasy_mode, config.fantasy_threshold)
            .with_history_capacity(config.fantasy_history_capacity)
    }

    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        while self.history.len() > capacity {
            self.history.pop_front();
        }
        self
    }

    #[must_use]
    pub fn mode(&self) -> FantasyMode {
        self.mode
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[must_use]
    pub fn state(&self) -> &FantasyState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Cards to deal this side while active.
    #[must_use]
    pub fn cards_dealt(&self) -> u8 {
        self.state.cards_dealt
    }

    #[must_use]
    pub fn consecutive_count(&self) -> u32 {
        self.state.consecutive_count
    }

    #[must_use]
    pub fn pending_bonus(&self) -> Option<ProgressiveBonus> {
        self.pending_bonus
    }

    /// Transition log, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &FantasyRecord> {
        self.history.iter()
    }

    #[must_use]
    pub fn stats(&self) -> FantasyStats {
        self.stats
    }

    /// Whether a finished board earns fantasy.
    ///
    /// Fouled boards never qualify. In progressive mode a QQ+ pair or trips
    /// on the front row qualifies on its own and is kept as the pending
    /// bonus for the next [`enter`](Self::enter).
    pub fn check_entry(&mut self, board: &Board, evaluator: &HandEvaluator) -> Result<bool, FantasyError> {
        if !board.is_complete() {
            return Err(FantasyError::BoardIncomplete);
        }
        self.pending_bonus = None;
        if !board.is_valid(evaluator) {
            return Ok(false);
        }

        let trigger = match self.mode {
            FantasyMode::Progressive => progressive_trigger(board, evaluator),
            FantasyMode::Normal => None,
        };
        let qualifies = trigger.is_some() || board.royalty_total(evaluator) >= self.threshold;
        if qualifies {
            self.pending_bonus = trigger;
        }
        Ok(qualifies)
    }

    /// Activate fantasy; returns the number of cards for the bonus hand.
    pub fn enter(&mut self) -> u8 {
        let bonus = self.pending_bonus.take();
        let cards = bonus.map_or(STANDARD_FANTASY_CARDS, ProgressiveBonus::cards);

        self.state.active = true;
        self.state.cards_dealt = cards;
        self.state.progressive_bonus = bonus;
        self.state.consecutive_count += 1;
        self.state.max_consecutive = self.state.max_consecutive.max(self.state.consecutive_count);

        self.stats.entries += 1;
        self.stats.max_consecutive = self.state.max_consecutive;
        self.record(TransitionKind::Entered);
        log::info!(
            "fantasy entered: {} cards, streak {}",
            cards,
            self.state.consecutive_count
        );
        cards
    }

    /// Leave fantasy. A failed hand resets the streak.
    pub fn exit(&mut self, success: bool) {
        self.state.active = false;
        self.state.progressive_bonus = None;
        if success {
            self.stats.successes += 1;
            self.state.max_consecutive = self.state.max_consecutive.max(self.state.consecutive_count);
        } else {
            self.stats.failures += 1;
            self.state.consecutive_count = 0;
        }
        self.stats.max_consecutive = self.state.max_consecutive;
        self.record(TransitionKind::Exited { success });
        log::info!("fantasy exited: success={}", success);
    }

    /// Run the showdown transitions for one finished board.
    pub fn settle(&mut self, board: &Board, evaluator: &HandEvaluator) -> Result<FantasyOutcome, FantasyError> {
        let was_active = self.state.active;
        let qualifies = self.check_entry(board, evaluator)?;
        let mut outcome = FantasyOutcome::default();
        if was_active {
            self.exit(qualifies);
            outcome.exited = Some(qualifies);
        }
        if qualifies {
            outcome.entered = Some(self.enter());
        }
        Ok(outcome)
    }

    /// Back to NORMAL with an empty log and zeroed counters.
    pub fn reset(&mut self) {
        self.state = FantasyState::default();
        self.pending_bonus = None;
        self.history.clear();
        self.stats = FantasyStats::default();
    }

    fn record(&mut self, kind: TransitionKind) {
        if self.history_capacity == 0 {
            return;
        }
        if self.history.len() == self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(FantasyRecord {
            kind,
            consecutive_count: self.state.consecutive_count,
            cards_dealt: self.state.cards_dealt,
            progressive_bonus: self.state.progressive_bonus,
        });
    }
}

/// Progressive trigger shown by a full front row, if any.
fn progressive_trigger(board: &Board, evaluator: &HandEvaluator) -> Option<ProgressiveBonus> {
    let rank = board.row_rank(evaluator, Row::Front)?;
    let cards = board.row_cards(Row::Front);
    match rank.category() {
        HandCategory::ThreeOfAKind => Some(ProgressiveBonus::Trips),
        HandCategory::OnePair => {
            let pair = cards
                .iter()
                .map(|c| c.rank())
                .find(|&r| cards.iter().filter(|c| c.rank() == r).count() == 2)?;
            match pair {
                Rank::Queen => Some(ProgressiveBonus::QQ),
                Rank::King => Some(ProgressiveBonus::KK),
                Rank::Ace => Some(ProgressiveBonus::AA),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn board(front: &str, middle: &str, back: &str) -> Board {
        let mut board = Board::new();
        for (row, s) in [(Row::Front, front), (Row::Middle, middle), (Row::Back, back)] {
            for card in Card::parse_many(s).unwrap() {
                board.place(card, row).unwrap();
            }
        }
        board
    }

    fn evaluator() -> HandEvaluator {
        HandEvaluator::new(256)
    }

    #[test]
    fn test_incomplete_board_is_an_error() {
        let mut engine = FantasyEngine::default();
        let b = board("Qh Qd 3c", "9c 9d", "");
        assert_eq!(engine.check_entry(&b, &evaluator()), Err(FantasyError::BoardIncomplete));
    }

    #[test]
    fn test_qualifies_on_royalty_threshold() {
        let mut engine = FantasyEngine::default();
        // 7 + 2 + 4 royalty
        let b = board("Qh Qd 3c", "9c 9d 9h 4d 2h", "As 9s 7s 4s 2s");
        assert!(engine.check_entry(&b, &evaluator()).unwrap());
        assert_eq!(engine.pending_bonus(), None);
        assert_eq!(engine.enter(), 13);
        assert!(engine.is_active());
        assert_eq!(engine.consecutive_count(), 1);
    }

    #[test]
    fn test_below_threshold_does_not_qualify() {
        let mut engine = FantasyEngine::default();
        // Only the back flush pays (4).
        let b = board("2h 3d 5c", "9c 9d Kh 4d 2c", "As 9s 7s 4s 2s");
        assert!(!engine.check_entry(&b, &evaluator()).unwrap());
    }

    #[test]
    fn test_foul_never_qualifies() {
        let mut engine = FantasyEngine::new(FantasyMode::Progressive, 6);
        let b = board("Ah Ad Ac", "Qc Qs 8h 4d 2h", "Ks 9s 7s 4s 2s");
        assert!(b.is_foul(&evaluator()));
        assert!(!engine.check_entry(&b, &evaluator()).unwrap());
        assert_eq!(engine.pending_bonus(), None);
    }

    #[test]
    fn test_progressive_card_counts() {
        let cases = [
            ("Qh Qd 3c", ProgressiveBonus::QQ, 14),
            ("Kh Kd 3c", ProgressiveBonus::KK, 15),
            ("Ah Ad 3c", ProgressiveBonus::AA, 17),
            ("3h 3d 3c", ProgressiveBonus::Trips, 18),
        ];
        for (front, bonus, cards) in cases {
            let mut engine = FantasyEngine::new(FantasyMode::Progressive, 6);
            let b = board(front, "Tc Ts Th 6d 2h", "9s 8s 7s 5s 4s");
            assert!(engine.check_entry(&b, &evaluator()).unwrap(), "{front}");
            assert_eq!(engine.pending_bonus(), Some(bonus));
            assert_eq!(engine.enter(), cards);
            assert_eq!(engine.state().progressive_bonus, Some(bonus));
        }
    }

    #[test]
    fn test_progressive_trigger_alone_qualifies() {
        // Huge threshold: only the trigger can qualify.
        let mut engine = FantasyEngine::new(FantasyMode::Progressive, 100);
        let b = board("Qh Qd 3c", "Kc Ks 8h 6d 2h", "Ah As 9d 7c 4c");
        assert!(engine.check_entry(&b, &evaluator()).unwrap());

        let mut normal = FantasyEngine::new(FantasyMode::Normal, 100);
        assert!(!normal.check_entry(&b, &evaluator()).unwrap());
    }

    #[test]
    fn test_exit_failure_resets_streak() {
        let mut engine = FantasyEngine::default();
        engine.enter();
        engine.exit(true);
        engine.enter();
        assert_eq!(engine.consecutive_count(), 2);
        engine.exit(false);
        assert!(!engine.is_active());
        assert_eq!(engine.consecutive_count(), 0);
        assert_eq!(engine.state().max_consecutive, 2);
        assert_eq!(engine.state().progressive_bonus, None);
    }

    #[test]
    fn test_settle_active_side_requalifies() {
        let eval = evaluator();
        let mut engine = FantasyEngine::default();
        engine.enter();
        let good = board("Qh Qd 3c", "9c 9d 9h 4d 2h", "As 9s 7s 4s 2s");
        let outcome = engine.settle(&good, &eval).unwrap();
        assert_eq!(outcome, FantasyOutcome { exited: Some(true), entered: Some(13) });
        assert!(engine.is_active());
        assert_eq!(engine.consecutive_count(), 2);

        let weak = board("2h 3d 5c", "9c 9d Kh 4d 2c", "As 9s 7s 4s 2s");
        let outcome = engine.settle(&weak, &eval).unwrap();
        assert_eq!(outcome, FantasyOutcome { exited: Some(false), entered: None });
        assert!(!engine.is_active());
        assert_eq!(engine.consecutive_count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut engine = FantasyEngine::default().with_history_capacity(3);
        for _ in 0..5 {
            engine.enter();
            engine.exit(true);
        }
        assert_eq!(engine.history().count(), 3);
        let last = engine.history().last().unwrap();
        assert_eq!(last.kind, TransitionKind::Exited { success: true });
        assert_eq!(last.consecutive_count, 5);

        let stats = engine.stats();
        assert_eq!(stats.entries, 5);
        assert_eq!(stats.successes, 5);
        assert_eq!(stats.max_consecutive, 5);
        assert!((stats.success_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut engine = FantasyEngine::default();
        engine.enter();
        engine.reset();
        assert!(!engine.is_active());
        assert_eq!(engine.history().count(), 0);
        assert_eq!(engine.stats(), FantasyStats::default());
    }
}
