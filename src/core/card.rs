//! Card value types.
//!
//! ## Encoding
//!
//! A card is written as a two-character token: rank (`23456789TJQKA`) then
//! suit (`shdc`). `"Ah"` is the ace of hearts, `"Td"` the ten of diamonds.
//! Parsing accepts either case; formatting is always `Ah` style.
//!
//! ## Ordering
//!
//! Cards order by rank, then suit. Each card also has a dense index in
//! `0..52` and a single bit in a `u64` mask, which the evaluator uses as an
//! order-independent key for a set of cards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Card rank, deuce through ace. The discriminant is the rank value (2..=14).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank value (2..=14, ace high).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Look up a rank by numeric value.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            2..=14 => Some(Self::ALL[(value - 2) as usize]),
            _ => None,
        }
    }

    /// Token character for this rank.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Parse a rank character (case-insensitive).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Error returned when a card token cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card token {0:?}: expected rank [23456789TJQKA] followed by suit [shdc]")]
pub struct CardParseError(pub String);

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Dense index in `0..52`, grouped by rank.
    #[must_use]
    pub const fn index(self) -> u8 {
        (self.rank as u8 - 2) * 4 + self.suit as u8
    }

    /// Inverse of [`Card::index`].
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        if index >= 52 {
            return None;
        }
        let rank = Rank::ALL[(index / 4) as usize];
        let suit = Suit::ALL[(index % 4) as usize];
        Some(Self::new(rank, suit))
    }

    /// Single-bit mask for this card.
    #[must_use]
    pub const fn mask(self) -> u64 {
        1u64 << self.index()
    }

    /// Parse a whitespace-separated list of tokens, e.g. `"Ah Kd 2c"`.
    pub fn parse_many(tokens: &str) -> Result<Vec<Card>, CardParseError> {
        tokens.split_whitespace().map(str::parse).collect()
    }
}

/// Canonical, order-independent key for a set of cards.
#[must_use]
pub fn card_set_mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0u64, |mask, card| mask | card.mask())
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError(s.to_string()));
        };
        match (Rank::from_char(r), Suit::from_char(su)) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            _ => Err(CardParseError(s.to_string())),
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
