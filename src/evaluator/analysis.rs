use crate::cards::{Card, Rank};
use crate::evaluator::{Evaluation, HandCategory, HandScore};

/// Facts about a five-card hand, computed once and shared by every detector.
#[derive(Debug, Clone)]
pub(crate) struct HandAnalysis {
    /// Cards ordered by rank, then suit, descending.
    pub sorted: [Card; 5],
    /// Distinct ranks ordered by (multiplicity desc, rank desc). AAKK5 -> [A, K, 5].
    group_ranks: [Rank; 5],
    group_counts: [u8; 5],
    groups: usize,
    pub is_flush: bool,
    /// Highest card of the straight; the wheel reports Five.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.cmp(a));

        let mut counts = [0u8; 15];
        for c in &sorted {
            counts[c.rank().value() as usize] += 1;
        }

        let mut grouped = [(Rank::Two, 0u8); 5];
        let mut groups = 0;
        for &rank in Rank::ALL.iter().rev() {
            let n = counts[rank.value() as usize];
            if n > 0 {
                grouped[groups] = (rank, n);
                groups += 1;
            }
        }
        // stable: ranks stay descending within a multiplicity
        grouped[..groups].sort_by(|a, b| b.1.cmp(&a.1));

        let mut group_ranks = [Rank::Two; 5];
        let mut group_counts = [0u8; 5];
        for (i, &(r, n)) in grouped[..groups].iter().enumerate() {
            group_ranks[i] = r;
            group_counts[i] = n;
        }

        let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
        let straight_top = if groups == 5 { straight_top(&group_ranks) } else { None };

        Self { sorted, group_ranks, group_counts, groups, is_flush, straight_top }
    }

    /// Group ranks in significance order; this is the tiebreak for every non-straight category.
    pub fn group_ranks(&self) -> &[Rank] {
        &self.group_ranks[..self.groups]
    }

    /// Multiplicity of each entry of [`Self::group_ranks`].
    pub fn group_counts(&self) -> &[u8] {
        &self.group_counts[..self.groups]
    }

    /// Multiplicity of the largest group (1 for five distinct ranks).
    pub fn top_count(&self) -> u8 {
        self.group_counts[0]
    }

    /// Multiplicity of the second largest group, 0 when there is only one.
    pub fn second_count(&self) -> u8 {
        self.group_counts().get(1).copied().unwrap_or(0)
    }

    pub fn evaluation(&self, category: HandCategory, tiebreak: &[Rank]) -> Evaluation {
        Evaluation { score: HandScore::from_parts(category, tiebreak), best_five: self.sorted }
    }
}

/// `ranks` must be five distinct ranks in descending order.
fn straight_top(ranks: &[Rank; 5]) -> Option<Rank> {
    if ranks[0].value() - ranks[4].value() == 4 {
        return Some(ranks[0]);
    }
    if *ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
        return Some(Rank::Five);
    }
    None
}
