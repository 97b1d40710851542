//! A single hand played out street by street for one acting seat.
//!
//! The seat sees its equity and the suggested action on every street and answers with an
//! [`AutoAction`]. Opponents never act; a hand the seat does not fold ends in a showdown.
//! Chip counts stay with the caller.

use crate::advice::{suggest, Advice, AutoAction};
use crate::cards::Card;
use crate::config::SimConfig;
use crate::deck::Deck;
use crate::equity::{EquityEstimator, EquityResult};
use crate::error::InvalidStateError;
use crate::hand::{Board, HoleCards, Street};
use crate::showdown::{resolve_showdown, Showdown};
use rand::RngCore;
use std::iter;

/// Amount the acting seat owes before the flop. Later streets open unbet.
pub const BIG_BLIND: u64 = 20;

/// Every card of one hand, fixed up front from a seeded shuffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hole: HoleCards,
    pub opponents: Vec<HoleCards>,
    runout: [Card; 5],
}

impl Deal {
    /// Opponents one deck can serve alongside the acting seat and a full board.
    pub const MAX_OPPONENTS: usize = (52 - 2 - Board::FULL) / 2;

    /// Shuffle a fresh deck with `seed` and deal the seat, then each opponent, then the board.
    ///
    /// ```
    /// use holdem_sim::play::Deal;
    ///
    /// let deal = Deal::new(7, 3).unwrap();
    /// assert_eq!(deal, Deal::new(7, 3).unwrap());
    /// assert_eq!(deal.opponents.len(), 3);
    /// ```
    pub fn new(seed: u64, opponents: usize) -> Result<Self, InvalidStateError> {
        if opponents > Self::MAX_OPPONENTS {
            return Err(InvalidStateError::TooManyOpponents { max: Self::MAX_OPPONENTS, got: opponents });
        }
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        let cards = deck.draw_n(2 + 2 * opponents + Board::FULL);

        let (hole, rest) = cards.split_at(2);
        let (seats, board) = rest.split_at(2 * opponents);
        let hole = HoleCards::from_slice(hole)?;
        let opponents = seats
            .chunks_exact(2)
            .map(HoleCards::from_slice)
            .collect::<Result<Vec<_>, _>>()?;
        let runout: [Card; 5] = board
            .try_into()
            .map_err(|_| InvalidStateError::WrongCardCount { expected: "5 board", got: board.len() })?;
        Ok(Self { hole, opponents, runout })
    }

    /// Community cards showing on `street`.
    pub fn board(&self, street: Street) -> Result<Board, InvalidStateError> {
        Ok(Board::try_new(self.runout[..street.board_len()].to_vec())?)
    }

    /// Resolve the river with the acting seat at index 0 and opponents after it.
    pub fn showdown(&self) -> Result<Showdown, InvalidStateError> {
        let seats: Vec<HoleCards> = iter::once(self.hole).chain(self.opponents.iter().copied()).collect();
        resolve_showdown(&self.board(Street::River)?, &seats)
    }
}

/// Seeds for successive hands, drawn from the configuration's RNG.
pub fn hand_seeds(config: &SimConfig) -> impl Iterator<Item = u64> {
    let mut rng = config.rng();
    iter::repeat_with(move || rng.next_u64())
}

/// What the acting seat knows when it has to move.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetView {
    pub street: Street,
    pub board: Board,
    pub equity: EquityResult,
    pub advice: Advice,
    pub to_call: u64,
}

#[derive(Debug, Clone)]
pub struct HandRecord {
    /// Each street reached, with the action taken on it.
    pub streets: Vec<(StreetView, AutoAction)>,
    /// `None` when the acting seat folded.
    pub showdown: Option<Showdown>,
}

impl HandRecord {
    pub fn folded(&self) -> bool {
        self.showdown.is_none()
    }

    /// The acting seat is seat 0 of the showdown.
    pub fn won(&self) -> bool {
        self.showdown.as_ref().is_some_and(|sd| sd.winners.contains(&0))
    }
}

/// Play `deal` to a fold or a showdown, asking `decide` for the seat's move on every street.
///
/// Equity is estimated with `config` against as many opponents as the deal holds.
pub fn play_hand<F>(deal: &Deal, config: &SimConfig, mut decide: F) -> Result<HandRecord, InvalidStateError>
where
    F: FnMut(&StreetView) -> AutoAction,
{
    let estimator = EquityEstimator::new(config.clone().with_opponents(deal.opponents.len()));
    let mut streets = Vec::with_capacity(Street::ALL.len());

    for street in Street::ALL {
        let board = deal.board(street)?;
        let equity = estimator.estimate(&deal.hole, &board)?;
        let to_call = if street == Street::PreFlop { BIG_BLIND } else { 0 };
        let view = StreetView { street, board, equity, advice: suggest(equity.win_pct), to_call };
        let action = decide(&view);
        log::debug!("{}: {} -> {}", street, equity, action);
        streets.push((view, action));
        if action == AutoAction::Fold {
            return Ok(HandRecord { streets, showdown: None });
        }
    }

    let showdown = deal.showdown()?;
    Ok(HandRecord { streets, showdown: Some(showdown) })
}
