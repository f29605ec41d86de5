//! Hand categories and the banded `HandRank` space.
//!
//! ## Bands
//!
//! Five-card hands occupy `1..=7462`, one integer per distinct hand, lower
//! is stronger:
//!
//! | category        | ranks        |
//! |-----------------|--------------|
//! | royal flush     | 1            |
//! | straight flush  | 2 – 10       |
//! | four of a kind  | 11 – 166     |
//! | full house      | 167 – 322    |
//! | flush           | 323 – 1599   |
//! | straight        | 1600 – 1609  |
//! | three of a kind | 1610 – 2467  |
//! | two pair        | 2468 – 3325  |
//! | one pair        | 3326 – 6185  |
//! | high card       | 6186 – 7462  |
//!
//! Three-card (front row) hands sit directly above, in `7463..=7917`:
//! trips `7463 – 7475`, pair `7476 – 7631`, high card `7632 – 7917`.
//!
//! ## Comparing across the two spaces
//!
//! Raw values only compare within one space. [`HandRank::strength`] maps
//! both onto one doubled scale: a five-card rank `r` becomes `2r`, a
//! three-card hand becomes `2p - 1` where `p` is the rank of the first
//! five-card hand that is strictly weaker (missing kickers count below a
//! deuce). Five-card strengths are even and three-card strengths odd, so the
//! two never tie.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tables;

/// Poker hand category, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    HighCard,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::OnePair,
        HandCategory::HighCard,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "Royal Flush",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "Pair",
            HandCategory::HighCard => "High Card",
        }
    }

    /// Number of significant ranks in the kicker key for a five-card hand.
    pub(crate) const fn key_width(self) -> usize {
        match self {
            HandCategory::RoyalFlush | HandCategory::StraightFlush | HandCategory::Straight => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::Flush | HandCategory::HighCard => 5,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous block of ranks holding one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub category: HandCategory,
    pub first: u16,
    pub len: u16,
}

impl Band {
    const fn new(category: HandCategory, first: u16, len: u16) -> Self {
        Self { category, first, len }
    }

    #[must_use]
    pub const fn last(self) -> u16 {
        self.first + self.len - 1
    }

    #[must_use]
    pub const fn contains(self, value: u16) -> bool {
        value >= self.first && value <= self.last()
    }
}

/// Five-card bands, strongest first; indexed by `HandCategory::index`.
pub const FIVE_CARD_BANDS: [Band; 10] = [
    Band::new(HandCategory::RoyalFlush, 1, 1),
    Band::new(HandCategory::StraightFlush, 2, 9),
    Band::new(HandCategory::FourOfAKind, 11, 156),
    Band::new(HandCategory::FullHouse, 167, 156),
    Band::new(HandCategory::Flush, 323, 1277),
    Band::new(HandCategory::Straight, 1600, 10),
    Band::new(HandCategory::ThreeOfAKind, 1610, 858),
    Band::new(HandCategory::TwoPair, 2468, 858),
    Band::new(HandCategory::OnePair, 3326, 2860),
    Band::new(HandCategory::HighCard, 6186, 1277),
];

/// Three-card bands, strongest first.
pub const THREE_CARD_BANDS: [Band; 3] = [
    Band::new(HandCategory::ThreeOfAKind, 7463, 13),
    Band::new(HandCategory::OnePair, 7476, 156),
    Band::new(HandCategory::HighCard, 7632, 286),
];

/// Weakest five-card rank.
pub const FIVE_CARD_WORST: u16 = 7462;

/// Weakest three-card rank.
pub const THREE_CARD_WORST: u16 = 7917;

/// Evaluated strength of a row; lower is stronger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HandRank(u16);

impl HandRank {
    pub const ROYAL_FLUSH: HandRank = HandRank(1);

    /// Wrap a raw value, rejecting anything outside both bands.
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value >= 1 && value <= THREE_CARD_WORST {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Whether this rank came from a three-card (front row) evaluation.
    #[must_use]
    pub const fn is_three_card(self) -> bool {
        self.0 > FIVE_CARD_WORST
    }

    /// The band this rank falls in.
    #[must_use]
    pub fn band(self) -> Band {
        let bands: &[Band] = if self.is_three_card() {
            &THREE_CARD_BANDS
        } else {
            &FIVE_CARD_BANDS
        };
        // Constructors only admit values inside one of the bands.
        bands
            .iter()
            .copied()
            .find(|band| band.contains(self.0))
            .unwrap_or(FIVE_CARD_BANDS[HandCategory::HighCard.index()])
    }

    #[must_use]
    pub fn category(self) -> HandCategory {
        self.band().category
    }

    /// Position on the shared scale used to compare front rows against
    /// middle and back rows. Lower is stronger.
    #[must_use]
    pub fn strength(self) -> u32 {
        if self.is_three_card() {
            2 * tables::get().front_insertion(self) - 1
        } else {
            2 * u32::from(self.0)
        }
    }

    /// Strictly stronger than `other`, valid across both spaces.
    #[must_use]
    pub fn beats(self, other: HandRank) -> bool {
        self.strength() < other.strength()
    }
}

impl TryFrom<u16> for HandRank {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        HandRank::new(value).ok_or_else(|| format!("hand rank {value} outside 1..={THREE_CARD_WORST}"))
    }
}

impl From<HandRank> for u16 {
    fn from(rank: HandRank) -> Self {
        rank.0
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category(), self.0)
    }
}
