//! Fantasy state machine integration tests.

use ofc_engine::board::Board;
use ofc_engine::core::{Card, Row};
use ofc_engine::eval::HandEvaluator;
use ofc_engine::fantasy::{FantasyEngine, FantasyError, FantasyMode, ProgressiveBonus, TransitionKind};

fn board(front: &str, middle: &str, back: &str) -> Board {
    let mut board = Board::new();
    for (row, s) in [(Row::Front, front), (Row::Middle, middle), (Row::Back, back)] {
        for card in Card::parse_many(s).unwrap() {
            board.place(card, row).unwrap();
        }
    }
    board
}

#[test]
fn test_threshold_boundary() {
    let evaluator = HandEvaluator::new(256);
    // Front 66 (1) + back flush (4) = 5
    let five = board("6h 6d 2c", "8c 8d Kh 4d 3h", "As 9s 7s 4s 2s");
    // Front 77 (2) + back flush (4) = 6
    let six = board("7h 7d 2c", "8c 8d Kh 4d 3h", "As 9s 7s 4s 2s");

    let mut engine = FantasyEngine::default();
    assert_eq!(five.royalty_total(&evaluator), 5);
    assert!(!engine.check_entry(&five, &evaluator).unwrap());
    assert_eq!(six.royalty_total(&evaluator), 6);
    assert!(engine.check_entry(&six, &evaluator).unwrap());
}

#[test]
fn test_incomplete_board_error() {
    let evaluator = HandEvaluator::new(16);
    let mut engine = FantasyEngine::default();
    assert_eq!(
        engine.check_entry(&Board::new(), &evaluator),
        Err(FantasyError::BoardIncomplete)
    );
}

#[test]
fn test_progressive_below_queens_uses_threshold() {
    let evaluator = HandEvaluator::new(256);
    let mut engine = FantasyEngine::new(FantasyMode::Progressive, 6);
    // JJ front pays 6 but is no progressive trigger: 13 cards.
    let b = board("Jh Jd 2c", "Tc Ts Th 6d 3h", "9s 8s 7s 5s 4s");
    assert!(engine.check_entry(&b, &evaluator).unwrap());
    assert_eq!(engine.pending_bonus(), None);
    assert_eq!(engine.enter(), 13);
}

#[test]
fn test_streak_across_hands() {
    let evaluator = HandEvaluator::new(256);
    let qualifying = board("Kh Kd 2c", "Tc Ts Th 6d 3h", "9s 8s 7s 5s 4s");
    let weak = board("2h 3d 5c", "9c 9d Kh 4d 2c", "As 9s 7s 4s 2s");
    let mut engine = FantasyEngine::new(FantasyMode::Progressive, 6);

    let outcome = engine.settle(&qualifying, &evaluator).unwrap();
    assert_eq!(outcome.exited, None);
    assert_eq!(outcome.entered, Some(15));
    assert_eq!(engine.state().progressive_bonus, Some(ProgressiveBonus::KK));

    let outcome = engine.settle(&qualifying, &evaluator).unwrap();
    assert_eq!(outcome.exited, Some(true));
    assert_eq!(engine.consecutive_count(), 2);

    let outcome = engine.settle(&weak, &evaluator).unwrap();
    assert_eq!(outcome.exited, Some(false));
    assert_eq!(outcome.entered, None);
    assert_eq!(engine.consecutive_count(), 0);
    assert_eq!(engine.state().max_consecutive, 2);
    assert_eq!(engine.state().progressive_bonus, None);

    let kinds: Vec<TransitionKind> = engine.history().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransitionKind::Entered,
            TransitionKind::Exited { success: true },
            TransitionKind::Entered,
            TransitionKind::Exited { success: false },
        ]
    );

    let stats = engine.stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.successes, 1);
    assert_eq!(stats.failures, 1);
    assert!((stats.success_rate() - 0.5).abs() < 1e-9);
}

#[test]
fn test_engine_serialization() {
    let mut engine = FantasyEngine::new(FantasyMode::Progressive, 8);
    engine.enter();
    let json = serde_json::to_string(&engine).unwrap();
    let back: FantasyEngine = serde_json::from_str(&json).unwrap();
    assert_eq!(back, engine);
    assert!(back.is_active());
}
