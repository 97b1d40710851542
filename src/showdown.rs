use crate::cards::Card;
use crate::error::InvalidStateError;
use crate::evaluator::{evaluate_best, Evaluation, HandScore};
use crate::hand::{validate_holdem, Board, HoleCards};
use std::collections::HashSet;

/// Result of comparing every remaining seat on a complete board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Showdown {
    /// Best hand per seat, in seat order.
    pub hands: Vec<Evaluation>,
    /// Seats holding the best score, ascending.
    pub winners: Vec<usize>,
}

impl Showdown {
    pub fn best(&self) -> HandScore {
        self.hands[self.winners[0]].score
    }

    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }

    /// Equal integer share per winner, and the chips left over after the split.
    pub fn split_pot(&self, pot: u64) -> (u64, u64) {
        let n = self.winners.len() as u64;
        (pot / n, pot % n)
    }
}

/// Rank each seat's hole cards with the five-card board and find the winners.
///
/// ```
/// use holdem_sim::hand::{Board, HoleCards};
/// use holdem_sim::showdown::resolve_showdown;
///
/// let board: Board = "Ac 9d 4s 2h 6c".parse().unwrap();
/// let seats: Vec<HoleCards> = vec!["Ks Kh".parse().unwrap(), "Qc Qh".parse().unwrap()];
/// let sd = resolve_showdown(&board, &seats).unwrap();
/// assert_eq!(sd.winners, vec![0]);
/// assert_eq!(sd.split_pot(90), (90, 0));
/// ```
pub fn resolve_showdown(board: &Board, seats: &[HoleCards]) -> Result<Showdown, InvalidStateError> {
    if board.len() != Board::FULL {
        return Err(InvalidStateError::WrongCardCount { expected: "5 board", got: board.len() });
    }
    if seats.is_empty() {
        return Err(InvalidStateError::WrongCardCount { expected: "at least 1 seat", got: 0 });
    }

    let mut dealt = HashSet::new();
    for hole in seats {
        validate_holdem(hole, board)?;
        for c in hole.as_array() {
            if !dealt.insert(c) {
                return Err(InvalidStateError::DuplicateCard(c));
            }
        }
    }

    let mut hands = Vec::with_capacity(seats.len());
    for hole in seats {
        let seven: Vec<Card> = hole.as_array().iter().chain(board.as_slice()).copied().collect();
        hands.push(evaluate_best(&seven)?);
    }
    let top = hands.iter().map(|e| e.score).max();
    let winners = hands
        .iter()
        .enumerate()
        .filter(|(_, e)| Some(e.score) == top)
        .map(|(i, _)| i)
        .collect();
    Ok(Showdown { hands, winners })
}
