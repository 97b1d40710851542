use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use holdem_sim::advice::{auto_decision, suggest, AutoAction};
use holdem_sim::cards::{parse_cards, Card, Suit};
use holdem_sim::config::SimConfig;
use holdem_sim::equity::EquityEstimator;
use holdem_sim::evaluator::{evaluate_best, rank_five};
use holdem_sim::hand::{Board, HoleCards, Street};
use holdem_sim::play::{hand_seeds, play_hand, Deal, StreetView};
use holdem_sim::showdown::{resolve_showdown, Showdown};
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Parser)]
#[command(name = "holdem", author, version, about = "Texas Hold'em odds and hand ranking")]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate win/tie/lose odds for a hand against random opponents
    #[command(alias = "eq")]
    Equity {
        /// Hole cards, e.g. "As Kd"
        hand: String,
        /// Community cards dealt so far (0, 3, 4 or 5)
        #[arg(short, long, default_value = "")]
        board: String,
        #[arg(short, long, default_value_t = SimConfig::DEFAULT_OPPONENTS)]
        opponents: usize,
        /// Monte-Carlo trials
        #[arg(short = 'n', long, default_value_t = SimConfig::DEFAULT_SAMPLES)]
        sims: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value_t = 1)]
        workers: usize,
    },
    /// Rank five, six or seven cards
    Rank { cards: String },
    /// Compare several hole-card pairs on a full board
    Showdown {
        #[arg(short, long)]
        board: String,
        #[arg(required = true, num_args = 1..)]
        hands: Vec<String>,
    },
    /// Deal and play hands against silent opponents, street by street
    Play {
        /// Let the advice policy act instead of prompting
        #[arg(short, long)]
        auto: bool,
        /// Hands to play; without it, interactive play asks after each hand
        #[arg(short = 'n', long)]
        hands: Option<u32>,
        #[arg(long, default_value_t = SimConfig::DEFAULT_SAMPLES)]
        sims: u32,
        #[arg(short, long, default_value_t = SimConfig::DEFAULT_OPPONENTS)]
        opponents: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Equity { hand, board, opponents, sims, seed, workers } => {
            let hole: HoleCards = hand.parse().with_context(|| format!("hole cards '{hand}'"))?;
            let board: Board = board.parse().with_context(|| format!("board '{board}'"))?;
            let mut config = SimConfig::default()
                .with_samples(sims)
                .with_opponents(opponents)
                .with_workers(workers);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let eq = EquityEstimator::new(config).estimate(&hole, &board)?;
            println!("*** {} vs {} opponents", board.street(), opponents);
            println!("Your hand : {}", paint_all(&hole.as_array()));
            println!("Board     : {}", if board.is_empty() { "--".into() } else { paint_all(board.as_slice()) });
            println!("{}  | Suggested: {}", eq, suggest(eq.win_pct).to_string().bold());
        }
        Command::Rank { cards } => {
            let cards = parse_cards(&cards).context("cards")?;
            let eval = match cards.len() {
                5 => {
                    let score = rank_five(&cards)?;
                    println!("{} -> {}", paint_all(&cards), score);
                    return Ok(());
                }
                6 | 7 => evaluate_best(&cards)?,
                n => bail!("expected 5, 6 or 7 cards, got {n}"),
            };
            println!("{} -> {} with {}", paint_all(&cards), eval.score, paint_all(&eval.best_five));
        }
        Command::Showdown { board, hands } => {
            let board: Board = board.parse().with_context(|| format!("board '{board}'"))?;
            let seats = hands
                .iter()
                .map(|h| h.parse::<HoleCards>().with_context(|| format!("hole cards '{h}'")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let sd = resolve_showdown(&board, &seats)?;
            print_showdown(&board, &seats, &sd, |i| format!("Seat {}", i + 1));
        }
        Command::Play { auto, hands, sims, opponents, seed } => {
            let mut config = SimConfig::default().with_samples(sims).with_opponents(opponents);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            play(&config, auto, hands)?;
        }
    }
    Ok(())
}

fn play(config: &SimConfig, auto: bool, hands: Option<u32>) -> anyhow::Result<()> {
    if hands == Some(0) {
        return Ok(());
    }
    let mut interactive = !auto && io::stdin().is_terminal();
    let (mut played, mut won) = (0u32, 0u32);

    for hand_seed in hand_seeds(config) {
        let deal = Deal::new(hand_seed, config.opponents)?;
        played += 1;
        println!("\n{}", format!("=== Hand #{played} (seed {hand_seed}) ===").bold());

        let record = play_hand(&deal, config, |view| {
            print_street(&deal.hole, view);
            let action = if interactive { prompt_action(view) } else { None };
            action.unwrap_or_else(|| {
                interactive = false;
                let action = auto_decision(view.equity.win_pct, view.to_call);
                println!("[AUTO] {}", action.to_string().to_uppercase());
                action
            })
        })?;

        match &record.showdown {
            None => println!("You folded. Hand over."),
            Some(sd) => {
                println!("\n*** Showdown ***");
                let board = deal.board(Street::River)?;
                let seats: Vec<HoleCards> =
                    std::iter::once(deal.hole).chain(deal.opponents.iter().copied()).collect();
                print_showdown(&board, &seats, sd, |i| if i == 0 { "You".into() } else { format!("Opp {i}") });
            }
        }
        won += u32::from(record.won());

        let more = match hands {
            Some(n) => played < n,
            None => interactive && ask("Play another hand? (y/n): ").is_some_and(|a| a == "y"),
        };
        if !more {
            break;
        }
    }
    println!("\nWon {won} of {played} hands.");
    Ok(())
}

fn print_street(hole: &HoleCards, view: &StreetView) {
    println!("\n*** {}", view.street);
    println!("Your hand : {}", paint_all(&hole.as_array()));
    let board = if view.board.is_empty() { "--".into() } else { paint_all(view.board.as_slice()) };
    println!("Board     : {board}");
    println!("{}  | Suggested: {}", view.equity, view.advice.to_string().bold());
}

/// Ask until the answer parses. `None` once stdin is closed.
fn prompt_action(view: &StreetView) -> Option<AutoAction> {
    let options = if view.to_call > 0 { "fold/call/raise" } else { "fold/check/raise" };
    loop {
        let answer = ask(&format!("Your move ({options}): "))?;
        match answer.parse::<AutoAction>() {
            Ok(AutoAction::Check) if view.to_call > 0 => return Some(AutoAction::Call),
            Ok(action) => return Some(action),
            Err(e) => println!("{e}"),
        }
    }
}

fn ask(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_lowercase()),
    }
}

fn print_showdown(board: &Board, seats: &[HoleCards], sd: &Showdown, name: impl Fn(usize) -> String) {
    println!("Board    : {}", paint_all(board.as_slice()));
    for (i, (hole, eval)) in seats.iter().zip(&sd.hands).enumerate() {
        let mark = if sd.winners.contains(&i) { "*" } else { " " };
        println!("{mark} {:<6} : {}  {}", name(i), paint_all(&hole.as_array()), eval.score);
    }
    let names: Vec<String> = sd.winners.iter().map(|&i| name(i)).collect();
    let verdict = if sd.is_split() { "split pot" } else { "win" };
    println!("Result   : {} {}", names.join(", "), verdict);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn paint(card: Card) -> ColoredString {
    let s = card.symbol_string();
    match card.suit() {
        Suit::Hearts | Suit::Diamonds => s.red(),
        Suit::Spades => s.blue(),
        Suit::Clubs => s.green(),
    }
}

fn paint_all(cards: &[Card]) -> String {
    cards.iter().map(|&c| paint(c).to_string()).collect::<Vec<_>>().join(" ")
}
