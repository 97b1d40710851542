use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hole cards must be two different cards")]
    DuplicateHoleCards,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("board holds at most five cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private cards.
///
/// ```
/// use holdem_sim::hand::HoleCards;
///
/// let hole: HoleCards = "Ah Kh".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// assert!("Ah Ah".parse::<HoleCards>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match *slice {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 == card || self.1 == card
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// Betting round implied by the number of community cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    /// Community cards showing on this street.
    pub const fn board_len(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::PreFlop => "Pre-flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };
        f.write_str(name)
    }
}

/// Community cards dealt so far, at most five and all distinct.
///
/// ```
/// use holdem_sim::hand::{Board, Street};
///
/// let board: Board = "2c 7d Jh".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.street(), Street::Flop);
/// assert_eq!(board.missing(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const FULL: usize = 5;

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::FULL {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to come before the river.
    pub fn missing(&self) -> usize {
        Self::FULL - self.cards.len()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Street for display. Partial flops (1 or 2 cards) report as pre-flop.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0..=2 => Street::PreFlop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Check that hole cards and board could come from one deck: no card appears twice.
///
/// ```
/// use holdem_sim::hand::{validate_holdem, Board, HandError, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "As 2c 3c".parse().unwrap();
/// assert_eq!(validate_holdem(&hole, &board), Err(HandError::Overlap));
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.as_slice().iter().any(|&c| hole.contains(c)) {
        return Err(HandError::Overlap);
    }
    Ok(())
}
