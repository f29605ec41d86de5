//! Two-player hand orchestration.
//!
//! ## Lifecycle
//!
//! `Waiting → InProgress → Completed`. A hand that cannot be dealt from the
//! deck moves to `Error` and refuses further calls.
//!
//! ## Turn protocol
//!
//! Round 1 deals five cards to each side (or its fantasy count). Sides then
//! alternate single placements; a side with an empty hand or a complete
//! board is skipped. When nobody can act, each incomplete board that is not
//! playing fantasy receives one more card and the first side able to act
//! moves. Leftover cards of a completed board go to the discard pile. Once
//! both boards hold thirteen cards the hand is scored and the fantasy
//! transitions run.
//!
//! ## Example
//!
//! ```
//! use ofc_engine::game::{FirstLegalPolicy, GameEngine, GamePhase, RandomPolicy};
//!
//! let mut engine = GameEngine::builder().seed(11).build();
//! let mut first = RandomPolicy::new(1);
//! let mut second = FirstLegalPolicy;
//! let result = engine.play([&mut first, &mut second]).unwrap();
//!
//! assert_eq!(engine.phase(), GamePhase::Completed);
//! assert_eq!(engine.history().len(), 26);
//! assert_eq!(engine.result().unwrap(), &result);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::error::{GameError, MoveError, StateError};
use super::events::{EventSink, GameEvent};
use super::moves::{Move, MoveRecord};
use super::policy::MovePolicy;
use super::result::GameResult;
use super::snapshot::GameSnapshot;
use crate::board::{Board, Hand};
use crate::core::{Card, Deck, DeckError, GameRng, OfcConfig, PlayerId, PlayerMap, Row};
use crate::eval::HandEvaluator;
use crate::fantasy::FantasyEngine;

/// Cards dealt to a normal side in round 1.
pub const INITIAL_DEAL: usize = 5;

/// Cards dealt to each incomplete normal side in later rounds.
pub const ROUND_DEAL: usize = 1;

/// Cards on a complete board.
pub const BOARD_CARDS: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Waiting,
    InProgress,
    Completed,
    Error,
}

/// Engine for one heads-up hand.
pub struct GameEngine {
    config: OfcConfig,
    evaluator: Arc<HandEvaluator>,
    rng: GameRng,
    deck: Deck,
    shuffle_on_start: bool,
    phase: GamePhase,
    boards: PlayerMap<Board>,
    hands: PlayerMap<Hand>,
    discards: Vec<Card>,
    fantasy: PlayerMap<FantasyEngine>,
    /// Fantasy status frozen at `start`.
    playing_fantasy: PlayerMap<bool>,
    active: Option<PlayerId>,
    round: u32,
    history: Vector<MoveRecord>,
    result: Option<GameResult>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl GameEngine {
    /// Engine with its own evaluator and a freshly seeded deck.
    #[must_use]
    pub fn new(config: OfcConfig) -> Self {
        Self::builder().config(config).build()
    }

    #[must_use]
    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder::new()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &OfcConfig {
        &self.config
    }

    #[must_use]
    pub fn evaluator(&self) -> &Arc<HandEvaluator> {
        &self.evaluator
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Completed
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player]
    }

    #[must_use]
    pub fn boards(&self) -> &PlayerMap<Board> {
        &self.boards
    }

    /// Cards `player` holds but has not placed.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    #[must_use]
    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn fantasy(&self, player: PlayerId) -> &FantasyEngine {
        &self.fantasy[player]
    }

    /// Whether `player` is playing the current hand as a fantasy hand.
    #[must_use]
    pub fn is_playing_fantasy(&self, player: PlayerId) -> bool {
        self.playing_fantasy[player]
    }

    /// Side expected to move next, `None` outside of play.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    /// Current deal round, 0 before `start`.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Applied moves in order.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// The scored hand. Available once both boards are complete.
    pub fn result(&self) -> Result<&GameResult, StateError> {
        self.result.as_ref().ok_or(StateError::BoardsIncomplete)
    }

    /// Cards held anywhere: deck, boards, hands and discards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.remaining()
            + self.boards.iter().map(|(_, b)| b.card_count()).sum::<usize>()
            + self.hands.iter().map(|(_, h)| h.len()).sum::<usize>()
            + self.discards.len()
    }

    /// Register a statistics sink.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    // === Lifecycle ===

    /// Shuffle and deal round 1.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Waiting => {}
            GamePhase::Error => return Err(StateError::Faulted.into()),
            GamePhase::InProgress | GamePhase::Completed => return Err(StateError::AlreadyStarted.into()),
        }

        self.playing_fantasy = self.fantasy.map(|_, f| f.is_active());
        if self.shuffle_on_start {
            self.deck.shuffle(&mut self.rng);
        }

        let needed: usize = PlayerId::BOTH.iter().map(|&p| self.cards_for_hand(p)).sum();
        if needed > self.deck.remaining() {
            let err = DeckError::Exhausted {
                requested: needed,
                remaining: self.deck.remaining(),
            };
            log::warn!("cannot deal hand: {}", err);
            self.phase = GamePhase::Error;
            return Err(err.into());
        }

        self.phase = GamePhase::InProgress;
        self.round = 1;
        log::info!(
            "hand started (seed {}, fantasy {:?})",
            self.config.seed,
            self.playing_fantasy
        );
        self.emit(GameEvent::HandStarted {
            fantasy: self.playing_fantasy,
        });

        for player in PlayerId::BOTH {
            let count = if self.playing_fantasy[player] {
                usize::from(self.fantasy[player].cards_dealt())
            } else {
                INITIAL_DEAL
            };
            self.deal(player, count)?;
        }
        self.active = PlayerId::BOTH.into_iter().find(|&p| self.can_act(p));
        Ok(())
    }

    /// Every legal placement for `player`; empty unless it is their turn.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        if self.phase != GamePhase::InProgress || self.active != Some(player) {
            return Vec::new();
        }
        let rows = self.boards[player].free_rows();
        self.hands[player]
            .iter()
            .flat_map(|&card| rows.iter().map(move |&row| Move::new(card, row)))
            .collect()
    }

    /// Place one held card. Nothing changes on error.
    pub fn apply_move(&mut self, player: PlayerId, card: Card, row: Row) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        if self.active != Some(player) {
            return Err(MoveError::NotYourTurn(player).into());
        }
        if !self.hands[player].contains(&card) {
            return Err(MoveError::CardNotAvailable(card).into());
        }
        if self.boards[player].is_row_full(row) {
            return Err(MoveError::RowFull(row).into());
        }

        self.boards[player].place_from_hand(&mut self.hands[player], card, row)?;
        let record = MoveRecord::new(player, Move::new(card, row), self.round, self.history.len() as u32);
        self.history.push_back(record);
        log::debug!("{} placed {} on {} (round {})", player, card, row, self.round);
        self.emit(GameEvent::MoveApplied { record });

        if self.boards[player].is_complete() && !self.hands[player].is_empty() {
            let leftovers: Vec<Card> = self.hands[player].drain(..).collect();
            log::debug!("{} discards {} leftover cards", player, leftovers.len());
            self.discards.extend_from_slice(&leftovers);
            self.emit(GameEvent::CardsDiscarded {
                player,
                cards: leftovers,
            });
        }

        self.advance(player)
    }

    /// Apply a [`Move`] for `player`.
    pub fn apply(&mut self, player: PlayerId, mv: Move) -> Result<(), GameError> {
        self.apply_move(player, mv.card, mv.row)
    }

    /// Drive the hand to completion, starting it if needed.
    ///
    /// `policies[i]` moves for `PlayerId(i)`. An illegal choice aborts play
    /// with the engine's error and leaves the hand where it stood.
    pub fn play(&mut self, mut policies: [&mut dyn MovePolicy; 2]) -> Result<GameResult, GameError> {
        if self.phase == GamePhase::Waiting {
            self.start()?;
        }
        loop {
            match self.phase {
                GamePhase::Completed => break,
                GamePhase::InProgress => {}
                GamePhase::Waiting => return Err(StateError::NotStarted.into()),
                GamePhase::Error => return Err(StateError::Faulted.into()),
            }
            let player = self.active.ok_or(StateError::Faulted)?;
            let legal = self.legal_moves(player);
            let mv = policies[player.index()].choose_move(
                &self.boards[player],
                &self.hands[player],
                &legal,
                Some(&self.boards[player.opponent()]),
            );
            self.apply(player, mv)?;
        }
        Ok(self.result()?.clone())
    }

    /// Reset for the following hand, keeping fantasy engines and sinks.
    pub fn next_hand(&mut self, seed: u64) -> Result<(), StateError> {
        match self.phase {
            GamePhase::Completed => {}
            GamePhase::Waiting => return Err(StateError::NotStarted),
            GamePhase::InProgress => return Err(StateError::BoardsIncomplete),
            GamePhase::Error => return Err(StateError::Faulted),
        }
        self.config.seed = seed;
        self.rng = GameRng::new(seed);
        self.deck.reset();
        self.shuffle_on_start = true;
        self.phase = GamePhase::Waiting;
        for player in PlayerId::BOTH {
            self.boards[player].clear();
            self.hands[player].clear();
        }
        self.discards.clear();
        self.playing_fantasy = PlayerMap::default();
        self.active = None;
        self.round = 0;
        self.history = Vector::new();
        self.result = None;
        Ok(())
    }

    // === Snapshots ===

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            phase: self.phase,
            rng: self.rng.state(),
            deck: self.deck.clone(),
            shuffle_on_start: self.shuffle_on_start,
            boards: self.boards.clone(),
            hands: self.hands.map(|_, h| h.to_vec()),
            discards: self.discards.clone(),
            fantasy: self.fantasy.clone(),
            playing_fantasy: self.playing_fantasy,
            active: self.active,
            round: self.round,
            history: self.history.iter().copied().collect(),
            result: self.result.clone(),
        }
    }

    /// Rebuild an engine. Fails if any card appears twice or a seat is out of range.
    pub fn from_snapshot(snapshot: GameSnapshot, evaluator: Arc<HandEvaluator>) -> Result<Self, StateError> {
        let seats = snapshot.active.into_iter().chain(snapshot.history.iter().map(|record| record.player));
        for player in seats {
            if !PlayerId::BOTH.contains(&player) {
                return Err(StateError::UnknownPlayer(player));
            }
        }

        let mut seen = 0u64;
        for card in snapshot.cards() {
            if seen & card.mask() != 0 {
                return Err(DeckError::DuplicateCard(card).into());
            }
            seen |= card.mask();
        }

        Ok(Self {
            rng: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
            evaluator,
            deck: snapshot.deck,
            shuffle_on_start: snapshot.shuffle_on_start,
            phase: snapshot.phase,
            boards: snapshot.boards,
            hands: snapshot.hands.map(|_, h| h.iter().copied().collect()),
            discards: snapshot.discards,
            fantasy: snapshot.fantasy,
            playing_fantasy: snapshot.playing_fantasy,
            active: snapshot.active,
            round: snapshot.round,
            history: snapshot.history.into_iter().collect(),
            result: snapshot.result,
            sinks: Vec::new(),
        })
    }

    // === Internals ===

    fn ensure_in_progress(&self) -> Result<(), StateError> {
        match self.phase {
            GamePhase::InProgress => Ok(()),
            GamePhase::Waiting => Err(StateError::NotStarted),
            GamePhase::Completed => Err(StateError::GameOver),
            GamePhase::Error => Err(StateError::Faulted),
        }
    }

    /// Cards `player` needs from the deck for a whole hand.
    fn cards_for_hand(&self, player: PlayerId) -> usize {
        if self.playing_fantasy[player] {
            usize::from(self.fantasy[player].cards_dealt())
        } else {
            BOARD_CARDS
        }
    }

    fn can_act(&self, player: PlayerId) -> bool {
        !self.hands[player].is_empty() && !self.boards[player].is_complete()
    }

    fn deal(&mut self, player: PlayerId, count: usize) -> Result<(), DeckError> {
        let cards = self.deck.draw(count)?;
        self.hands[player].extend(cards.iter().copied());
        log::debug!("dealt {} cards to {} (round {})", cards.len(), player, self.round);
        self.emit(GameEvent::CardsDealt {
            player,
            round: self.round,
            cards,
        });
        Ok(())
    }

    fn advance(&mut self, last: PlayerId) -> Result<(), GameError> {
        if self.boards.iter().all(|(_, b)| b.is_complete()) {
            return self.showdown();
        }

        let other = last.opponent();
        if self.can_act(other) {
            self.active = Some(other);
            return Ok(());
        }
        if self.can_act(last) {
            self.active = Some(last);
            return Ok(());
        }

        self.round += 1;
        for player in PlayerId::BOTH {
            if !self.boards[player].is_complete() && !self.playing_fantasy[player] {
                if let Err(err) = self.deal(player, ROUND_DEAL) {
                    self.phase = GamePhase::Error;
                    self.active = None;
                    return Err(err.into());
                }
            }
        }
        self.active = PlayerId::BOTH.into_iter().find(|&p| self.can_act(p));
        if self.active.is_none() {
            self.phase = GamePhase::Error;
            return Err(StateError::Faulted.into());
        }
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        let result = GameResult::from_boards(&self.boards, &self.evaluator, &self.config)?;

        for player in PlayerId::BOTH {
            let outcome = self.fantasy[player].settle(&self.boards[player], &self.evaluator)?;
            if let Some(success) = outcome.exited {
                self.emit(GameEvent::FantasyExited { player, success });
            }
            if let Some(cards) = outcome.entered {
                let consecutive = self.fantasy[player].consecutive_count();
                self.emit(GameEvent::FantasyEntered {
                    player,
                    cards,
                    consecutive,
                });
            }
        }

        self.active = None;
        self.phase = GamePhase::Completed;
        log::info!(
            "hand completed: scores {}-{}, winner {:?}",
            result.scores[PlayerId::FIRST],
            result.scores[PlayerId::SECOND],
            result.winner
        );
        self.result = Some(result.clone());
        self.emit(GameEvent::HandCompleted { result });
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        for sink in &mut self.sinks {
            sink.emit(&event);
        }
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("active", &self.active)
            .field("boards", &self.boards)
            .field("hands", &self.hands)
            .field("deck_remaining", &self.deck.remaining())
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`GameEngine`].
#[derive(Default)]
pub struct GameEngineBuilder {
    config: OfcConfig,
    evaluator: Option<Arc<HandEvaluator>>,
    deck: Option<Deck>,
    fantasy: PlayerMap<Option<FantasyEngine>>,
}

impl GameEngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: OfcConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Share an evaluator (and its cache) with other engines.
    #[must_use]
    pub fn evaluator(mut self, evaluator: Arc<HandEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Deal from `deck` in its given order instead of shuffling.
    #[must_use]
    pub fn stacked_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Carry an existing fantasy tracker for one side.
    #[must_use]
    pub fn fantasy(mut self, player: PlayerId, engine: FantasyEngine) -> Self {
        self.fantasy[player] = Some(engine);
        self
    }

    #[must_use]
    pub fn build(self) -> GameEngine {
        let config = self.config;
        let evaluator = self
            .evaluator
            .unwrap_or_else(|| Arc::new(HandEvaluator::new(config.eval_cache_capacity)));
        let shuffle_on_start = self.deck.is_none();
        let deck = self.deck.unwrap_or_else(Deck::standard);
        let fantasy = PlayerMap::from_fn(|p| {
            self.fantasy[p]
                .clone()
                .unwrap_or_else(|| FantasyEngine::from_config(&config))
        });

        GameEngine {
            rng: GameRng::new(config.seed),
            config,
            evaluator,
            deck,
            shuffle_on_start,
            phase: GamePhase::Waiting,
            boards: PlayerMap::default(),
            hands: PlayerMap::default(),
            discards: Vec::new(),
            fantasy,
            playing_fantasy: PlayerMap::default(),
            active: None,
            round: 0,
            history: Vector::new(),
            result: None,
            sinks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::policy::{FirstLegalPolicy, RandomPolicy};

    fn started(seed: u64) -> GameEngine {
        let mut engine = GameEngine::builder().seed(seed).build();
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_start_deals_five_each() {
        let engine = started(1);
        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert_eq!(engine.hand(PlayerId::FIRST).len(), 5);
        assert_eq!(engine.hand(PlayerId::SECOND).len(), 5);
        assert_eq!(engine.deck().remaining(), 42);
        assert_eq!(engine.active_player(), Some(PlayerId::FIRST));
        assert_eq!(engine.round(), 1);
    }

    #[test]
    fn test_start_twice() {
        let mut engine = started(1);
        assert_eq!(engine.start(), Err(GameError::from(StateError::AlreadyStarted)));
    }

    #[test]
    fn test_move_before_start() {
        let mut engine = GameEngine::builder().build();
        let card = "Ah".parse().unwrap();
        assert_eq!(
            engine.apply_move(PlayerId::FIRST, card, Row::Back),
            Err(GameError::from(StateError::NotStarted))
        );
        assert!(engine.legal_moves(PlayerId::FIRST).is_empty());
    }

    #[test]
    fn test_legal_moves_only_for_active_side() {
        let engine = started(2);
        assert_eq!(engine.legal_moves(PlayerId::FIRST).len(), 15);
        assert!(engine.legal_moves(PlayerId::SECOND).is_empty());
    }

    #[test]
    fn test_wrong_turn_is_atomic() {
        let mut engine = started(3);
        let card = engine.hand(PlayerId::SECOND)[0];
        let before = engine.snapshot();
        assert_eq!(
            engine.apply_move(PlayerId::SECOND, card, Row::Back),
            Err(GameError::from(MoveError::NotYourTurn(PlayerId::SECOND)))
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_turns_alternate() {
        let mut engine = started(4);
        let card = engine.hand(PlayerId::FIRST)[0];
        engine.apply_move(PlayerId::FIRST, card, Row::Back).unwrap();
        assert_eq!(engine.active_player(), Some(PlayerId::SECOND));
        assert_eq!(engine.hand(PlayerId::FIRST).len(), 4);
        assert_eq!(engine.board(PlayerId::FIRST).row_cards(Row::Back), &[card]);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_full_hand_completes() {
        let mut engine = GameEngine::builder().seed(5).build();
        let mut a = RandomPolicy::new(10);
        let mut b = FirstLegalPolicy;
        let result = engine.play([&mut a, &mut b]).unwrap();

        assert!(engine.is_complete());
        assert_eq!(engine.history().len(), 26);
        assert_eq!(engine.card_count(), 52);
        assert_eq!(engine.round(), 9);
        assert_eq!(engine.result().unwrap(), &result);

        let card = engine.deck().cards()[0];
        assert_eq!(
            engine.apply_move(PlayerId::FIRST, card, Row::Back),
            Err(GameError::from(StateError::GameOver))
        );
    }

    #[test]
    fn test_result_before_completion() {
        let engine = started(6);
        assert_eq!(engine.result(), Err(StateError::BoardsIncomplete));
    }

    #[test]
    fn test_short_deck_is_a_setup_error() {
        let deck = Deck::from_cards(Card::parse_many("Ah Kh Qh Jh Th 9h 8h 7h 6h 5h").unwrap()).unwrap();
        let mut engine = GameEngine::builder().stacked_deck(deck).build();
        let err = engine.start().unwrap_err();
        assert!(matches!(err, GameError::State(StateError::Setup(DeckError::Exhausted { .. }))));
        assert_eq!(engine.phase(), GamePhase::Error);
        assert_eq!(engine.start(), Err(GameError::from(StateError::Faulted)));
    }

    #[test]
    fn test_next_hand_resets() {
        let mut engine = GameEngine::builder().seed(8).build();
        let mut a = FirstLegalPolicy;
        let mut b = FirstLegalPolicy;
        engine.play([&mut a, &mut b]).unwrap();

        engine.next_hand(9).unwrap();
        assert_eq!(engine.phase(), GamePhase::Waiting);
        assert_eq!(engine.card_count(), 52);
        assert!(engine.history().is_empty());
        assert_eq!(engine.config().seed, 9);
        assert_eq!(engine.next_hand(10), Err(StateError::NotStarted));
    }
}
