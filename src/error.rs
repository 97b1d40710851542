use crate::cards::Card;
use crate::hand::HandError;

/// A caller broke the contract of a core operation.
///
/// These are programming errors (asking for a card that was already dealt, ranking the
/// wrong number of cards) rather than runtime conditions, so callers should surface them
/// instead of retrying.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateError {
    #[error("card {0} is not in the deck")]
    CardNotInDeck(Card),
    #[error("expected {expected} cards, got {got}")]
    WrongCardCount { expected: &'static str, got: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("sample count must be positive")]
    NoSamples,
    #[error("cannot deal {got} opponents from one deck (at most {max})")]
    TooManyOpponents { max: usize, got: usize },
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
}
