//! Action advice derived from a win percentage.

use std::fmt;
use std::str::FromStr;

/// Win percentage at or above which the advice is to raise.
pub const RAISE_THRESHOLD: f64 = 55.0;
/// Win percentage at or above which the advice is to call or check.
pub const CALL_THRESHOLD: f64 = 35.0;

/// Suggested action shown next to the equity figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Raise,
    CallCheck,
    Fold,
}

impl Advice {
    pub const fn label(self) -> &'static str {
        match self {
            Advice::Raise => "RAISE",
            Advice::CallCheck => "CALL/CHECK",
            Advice::Fold => "FOLD",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a win percentage to advice. Both thresholds are inclusive.
///
/// ```
/// use holdem_sim::advice::{suggest, Advice};
///
/// assert_eq!(suggest(55.0), Advice::Raise);
/// assert_eq!(suggest(54.9).label(), "CALL/CHECK");
/// assert_eq!(suggest(34.9), Advice::Fold);
/// ```
pub fn suggest(win_pct: f64) -> Advice {
    if win_pct >= RAISE_THRESHOLD {
        Advice::Raise
    } else if win_pct >= CALL_THRESHOLD {
        Advice::CallCheck
    } else {
        Advice::Fold
    }
}

/// Concrete move taken by the automatic player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAction {
    Fold,
    Call,
    Check,
    Raise,
}

impl fmt::Display for AutoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AutoAction::Fold => "fold",
            AutoAction::Call => "call",
            AutoAction::Check => "check",
            AutoAction::Raise => "raise",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action '{0}' (expected fold, call, check or raise)")]
pub struct ActionParseError(String);

impl FromStr for AutoAction {
    type Err = ActionParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fold" => Ok(AutoAction::Fold),
            "c" | "call" => Ok(AutoAction::Call),
            "k" | "check" => Ok(AutoAction::Check),
            "r" | "raise" => Ok(AutoAction::Raise),
            other => Err(ActionParseError(other.to_string())),
        }
    }
}

/// Move chosen when nobody is at the keyboard.
///
/// Facing a bet it calls from 30% up and folds below; unopened it raises from 50% up
/// and checks below.
pub fn auto_decision(win_pct: f64, to_call: u64) -> AutoAction {
    match (to_call > 0, win_pct) {
        (true, w) if w < 30.0 => AutoAction::Fold,
        (true, _) => AutoAction::Call,
        (false, w) if w < 50.0 => AutoAction::Check,
        (false, _) => AutoAction::Raise,
    }
}
