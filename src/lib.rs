//! holdem-sim: Texas Hold'em hand ranking and Monte-Carlo equity.
//!
//! The library is the core a table front end calls into:
//! - [`evaluator::rank_best`] ranks a player's six or seven cards for showdown
//! - [`equity::estimate_equity`] estimates win/tie/loss odds against random opponents
//! - [`advice::suggest`] turns a win percentage into a suggested action
//! - [`play::play_hand`] walks one seat through a hand street by street
//!
//! Stacks, blinds, prompts and rendering stay with the caller.
//!
//! ## Quick start
//! ```
//! use holdem_sim::advice::{suggest, Advice};
//! use holdem_sim::equity::estimate_equity;
//! use holdem_sim::hand::{Board, HoleCards};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let hole: HoleCards = "Ah Kh".parse().unwrap();
//! let board: Board = "Qh Jh 2c".parse().unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let eq = estimate_equity(&hole, &board, 1, 1_000, &mut rng).unwrap();
//! assert_eq!(suggest(eq.win_pct), Advice::Raise);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin holdem -- equity "As Ah" --opponents 3 --sims 5000
//! ```

pub mod advice;
pub mod cards;
pub mod config;
pub mod deck;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod play;
pub mod showdown;

pub use advice::suggest;
pub use equity::{estimate_equity, EquityResult};
pub use error::InvalidStateError;
pub use evaluator::{rank_best, rank_five, HandCategory, HandScore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
