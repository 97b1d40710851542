//! Monte-Carlo equity estimation.
//!
//! Each trial shuffles a private copy of the unseen cards, completes the board, deals two
//! cards to every opponent (in that order) and compares best seven-card hands. Trials share
//! nothing but their read-only inputs, so they can be split across workers and the tallies
//! summed.

use crate::cards::Card;
use crate::config::SimConfig;
use crate::deck::Deck;
use crate::error::InvalidStateError;
use crate::evaluator::{evaluate_seven, HandScore};
use crate::hand::{validate_holdem, Board, HoleCards};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Win/tie/loss percentages for one estimate. The three always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityResult {
    pub win_pct: f64,
    pub tie_pct: f64,
    pub loss_pct: f64,
    /// Trials the percentages are based on. Below the requested count only if cancelled.
    pub trials: u32,
}

impl EquityResult {
    /// The fallback when there are not enough unseen cards to deal every hand.
    pub const fn all_loss() -> Self {
        Self { win_pct: 0.0, tie_pct: 0.0, loss_pct: 100.0, trials: 0 }
    }

    fn from_tally(t: Tally) -> Self {
        if t.trials == 0 {
            return Self::all_loss();
        }
        let n = f64::from(t.trials);
        let losses = t.trials - t.wins - t.ties;
        Self {
            win_pct: 100.0 * f64::from(t.wins) / n,
            tie_pct: 100.0 * f64::from(t.ties) / n,
            loss_pct: 100.0 * f64::from(losses) / n,
            trials: t.trials,
        }
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "win {:5.1}% | tie {:4.1}% | lose {:5.1}%",
            self.win_pct, self.tie_pct, self.loss_pct
        )
    }
}

/// How a single trial ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    /// The player wins outright only when no opponent reaches its score; with no
    /// opponents at all every trial is a win.
    pub fn classify(player: HandScore, opponents: impl IntoIterator<Item = HandScore>) -> Self {
        match opponents.into_iter().max() {
            None => Outcome::Win,
            Some(best) if player > best => Outcome::Win,
            Some(best) if player == best => Outcome::Tie,
            Some(_) => Outcome::Loss,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: u32,
    ties: u32,
    trials: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        self.trials += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => {}
        }
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }
}

/// Shared flag checked between trials. Cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear the flag so the next run goes ahead. Every clone sees the reset.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Estimate the player's win/tie/loss percentages against `opponents` random hands.
///
/// `board` may hold 0, 3, 4 or 5 cards. When the unseen cards cannot cover the rest of the
/// board plus two cards per opponent the result is [`EquityResult::all_loss`].
///
/// ```
/// use holdem_sim::equity::estimate_equity;
/// use holdem_sim::hand::{Board, HoleCards};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let eq = estimate_equity(&hole, &Board::empty(), 1, 2_000, &mut rng).unwrap();
/// assert!(eq.win_pct > 75.0);
/// assert!((eq.win_pct + eq.tie_pct + eq.loss_pct - 100.0).abs() < 1e-9);
/// ```
pub fn estimate_equity<R: Rng + ?Sized>(
    hole: &HoleCards,
    board: &Board,
    opponents: usize,
    samples: u32,
    rng: &mut R,
) -> Result<EquityResult, InvalidStateError> {
    let Some(deck) = prepare(hole, board, opponents, samples)? else {
        return Ok(EquityResult::all_loss());
    };
    let tally = run_trials(&deck, hole, board, opponents, samples, rng, None);
    Ok(EquityResult::from_tally(tally))
}

/// Validate inputs and build the unseen-card deck. `None` means the deck is too small.
fn prepare(
    hole: &HoleCards,
    board: &Board,
    opponents: usize,
    samples: u32,
) -> Result<Option<Deck>, InvalidStateError> {
    validate_holdem(hole, board)?;
    if samples == 0 {
        return Err(InvalidStateError::NoSamples);
    }
    let known: Vec<Card> = hole.as_array().iter().chain(board.as_slice()).copied().collect();
    let deck = Deck::standard().remove_known(&known)?;

    // an opponent count whose card total overflows can never fit either
    let needed = opponents.checked_mul(2).and_then(|n| n.checked_add(board.missing()));
    match needed {
        Some(n) if n <= deck.len() => Ok(Some(deck)),
        _ => {
            log::debug!(
                "{} opponents need more than the {} unseen cards; reporting a loss",
                opponents,
                deck.len()
            );
            Ok(None)
        }
    }
}

fn run_trials<R: Rng + ?Sized>(
    deck: &Deck,
    hole: &HoleCards,
    board: &Board,
    opponents: usize,
    samples: u32,
    rng: &mut R,
    cancel: Option<&CancelToken>,
) -> Tally {
    let mut tally = Tally::default();
    let mut opp_scores = Vec::with_capacity(opponents);
    for _ in 0..samples {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            break;
        }
        tally.record(trial(deck, hole, board, opponents, rng, &mut opp_scores));
    }
    tally
}

fn trial<R: Rng + ?Sized>(
    deck: &Deck,
    hole: &HoleCards,
    board: &Board,
    opponents: usize,
    rng: &mut R,
    opp_scores: &mut Vec<HandScore>,
) -> Outcome {
    let mut d = deck.clone();
    d.shuffle_with(rng);

    let mut community = [hole.first(); 5];
    community[..board.len()].copy_from_slice(board.as_slice());
    for slot in community.iter_mut().skip(board.len()) {
        // deck size was checked against everything this trial draws
        *slot = d.draw().unwrap_or(*slot);
    }
    let [b0, b1, b2, b3, b4] = community;

    opp_scores.clear();
    for _ in 0..opponents {
        let (Some(x), Some(y)) = (d.draw(), d.draw()) else { break };
        opp_scores.push(evaluate_seven(&[x, y, b0, b1, b2, b3, b4]).score);
    }

    let player = evaluate_seven(&[hole.first(), hole.second(), b0, b1, b2, b3, b4]).score;
    Outcome::classify(player, opp_scores.iter().copied())
}

/// Equity estimation driven by a [`SimConfig`], optionally spread over rayon workers.
///
/// Worker `i` draws from the ChaCha8 stream `i` of the configured seed, so a seeded
/// estimate is reproducible for a fixed worker count. With one worker the result equals
/// [`estimate_equity`] called with `ChaCha8Rng::seed_from_u64(seed)`.
#[derive(Debug, Clone, Default)]
pub struct EquityEstimator {
    config: SimConfig,
    cancel: CancelToken,
}

impl EquityEstimator {
    pub fn new(config: SimConfig) -> Self {
        Self { config, cancel: CancelToken::new() }
    }

    /// Share an externally owned cancellation flag.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn estimate(&self, hole: &HoleCards, board: &Board) -> Result<EquityResult, InvalidStateError> {
        let SimConfig { samples, opponents, workers, .. } = self.config;
        let Some(deck) = prepare(hole, board, opponents, samples)? else {
            return Ok(EquityResult::all_loss());
        };
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().next_u64());
        let workers = workers.clamp(1, samples as usize);
        log::debug!(
            "estimating equity for {} on [{}] vs {} opponents: {} samples, {} workers",
            hole,
            board.as_slice().iter().map(Card::to_string).collect::<Vec<_>>().join(" "),
            opponents,
            samples,
            workers
        );

        let share = |i: usize| {
            let base = samples / workers as u32;
            base + u32::from((i as u32) < samples % workers as u32)
        };
        let worker = |i: usize| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            let t = run_trials(&deck, hole, board, opponents, share(i), &mut rng, Some(&self.cancel));
            log::trace!("worker {} finished {} trials", i, t.trials);
            t
        };

        let tally = if workers == 1 {
            worker(0)
        } else {
            (0..workers).into_par_iter().map(worker).reduce(Tally::default, Tally::merge)
        };

        if tally.trials < samples {
            log::info!("equity run cancelled after {} of {} trials", tally.trials, samples);
        }
        log::debug!("equity: {} wins, {} ties over {} trials", tally.wins, tally.ties, tally.trials);
        Ok(EquityResult::from_tally(tally))
    }
}
