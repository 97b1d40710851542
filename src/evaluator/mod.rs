//! Hand ranking: scores five cards, and finds the best five of six or seven.

pub(crate) mod analysis;
pub mod combinations;
pub(crate) mod detector;

use crate::cards::{Card, Rank};
use crate::error::InvalidStateError;
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use analysis::HandAnalysis;
use combinations::Combinations;
use detector::DETECTORS;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl HandCategory {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::Trips => "Trips",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::Quads => "Quads",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable strength of a five-card hand: a category plus a tiebreak sequence.
///
/// Scores order by category first, then by the tiebreak ranks from most to least
/// significant. Two scores are equal only when both parts match, which is exactly
/// when two hands split a pot.
///
/// Tiebreak layout per category:
/// - straight / straight flush: top card (the wheel counts as Five-high)
/// - quads: quad rank, kicker
/// - full house: trip rank, pair rank
/// - trips: trip rank, two kickers
/// - two pair: high pair, low pair, kicker
/// - one pair: pair rank, three kickers
/// - flush / high card: all five ranks, descending
#[derive(Debug, Clone, Copy)]
pub struct HandScore {
    category: HandCategory,
    ranks: [Rank; 5],
    len: u8,
}

impl HandScore {
    pub(crate) fn from_parts(category: HandCategory, tiebreak: &[Rank]) -> Self {
        debug_assert!(tiebreak.len() <= 5);
        let mut ranks = [Rank::Two; 5];
        let len = tiebreak.len().min(5);
        ranks[..len].copy_from_slice(&tiebreak[..len]);
        Self { category, ranks, len: len as u8 }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn tiebreak(&self) -> &[Rank] {
        &self.ranks[..self.len as usize]
    }

    /// Category first, then tiebreak ranks element by element.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            for (a, b) in self.tiebreak().iter().zip(other.tiebreak()) {
                match a.cmp(b) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            self.len.cmp(&other.len)
        })
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandScore {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for HandScore {}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category)?;
        for (i, r) in self.tiebreak().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{r}")?;
        }
        f.write_str(")")
    }
}

/// A score together with the five cards that earn it. Ordered by score only.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub score: HandScore,
    pub best_five: [Card; 5],
}

impl Evaluation {
    pub fn category(&self) -> HandCategory {
        self.score.category()
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for Evaluation {}

/// Score exactly five distinct cards.
///
/// ```
/// use holdem_sim::cards::parse_cards;
/// use holdem_sim::evaluator::{rank_five, HandCategory};
///
/// let full_house = rank_five(&parse_cards("7s 7h 7d 2c 2s").unwrap()).unwrap();
/// let flush = rank_five(&parse_cards("As Ks Qs Js 9s").unwrap()).unwrap();
/// assert_eq!(full_house.category(), HandCategory::FullHouse);
/// assert!(full_house > flush);
/// ```
pub fn rank_five(cards: &[Card]) -> Result<HandScore, InvalidStateError> {
    let five: [Card; 5] = cards
        .try_into()
        .map_err(|_| InvalidStateError::WrongCardCount { expected: "5", got: cards.len() })?;
    ensure_distinct(&five)?;
    Ok(evaluate_five(&five).score)
}

/// Best score over every five-card subset of six or seven distinct cards.
///
/// ```
/// use holdem_sim::cards::parse_cards;
/// use holdem_sim::evaluator::{rank_best, HandCategory};
///
/// let score = rank_best(&parse_cards("Ah Kd 2h 5h 9h Jh 3c").unwrap()).unwrap();
/// assert_eq!(score.category(), HandCategory::Flush);
/// ```
pub fn rank_best(cards: &[Card]) -> Result<HandScore, InvalidStateError> {
    evaluate_best(cards).map(|e| e.score)
}

/// Like [`rank_best`], but also reports which five cards made the hand.
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, InvalidStateError> {
    if !(6..=7).contains(&cards.len()) {
        return Err(InvalidStateError::WrongCardCount { expected: "6 or 7", got: cards.len() });
    }
    ensure_distinct(cards)?;
    let best = Combinations::<5>::new(cards.len())
        .map(|idx| evaluate_five(&idx.map(|i| cards[i])))
        .max();
    // six or seven cards always yield at least one subset
    best.ok_or(InvalidStateError::WrongCardCount { expected: "6 or 7", got: cards.len() })
}

/// Score five cards without validation. Callers guarantee the cards are distinct.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS.iter() {
        if detector.detect(&analysis) {
            return detector.build_evaluation(&analysis);
        }
    }
    unreachable!("high card detector always matches")
}

/// Best of the 21 five-card subsets of seven cards, without validation.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for idx in Combinations::<5>::new(7).skip(1) {
        let eval = evaluate_five(&idx.map(|i| cards[i]));
        if eval > best {
            best = eval;
        }
    }
    best
}

fn ensure_distinct(cards: &[Card]) -> Result<(), InvalidStateError> {
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(InvalidStateError::DuplicateCard(c));
        }
    }
    Ok(())
}
