use super::analysis::HandAnalysis;
use crate::evaluator::{Evaluation, HandCategory};

/// One hand category: how to recognise it and how to score it.
///
/// Detectors are tried strongest first, so each may assume every stronger category
/// has already been ruled out.
pub(crate) trait CategoryDetector {
    fn category(&self) -> HandCategory;

    fn detect(&self, analysis: &HandAnalysis) -> bool;

    /// Grouped categories break ties on group ranks (quad/trip/pair ranks, then kickers).
    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        analysis.evaluation(self.category(), analysis.group_ranks())
    }
}

/// Straights break ties on their top card alone.
fn straight_evaluation(category: HandCategory, analysis: &HandAnalysis) -> Evaluation {
    match analysis.straight_top {
        Some(top) => analysis.evaluation(category, &[top]),
        None => analysis.evaluation(category, analysis.group_ranks()),
    }
}

pub(crate) struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> HandCategory {
        HandCategory::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.is_flush && analysis.straight_top.is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        straight_evaluation(self.category(), analysis)
    }
}

pub(crate) struct QuadsDetector;

impl CategoryDetector for QuadsDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Quads
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.top_count() == 4
    }
}

pub(crate) struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> HandCategory {
        HandCategory::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.top_count() == 3 && analysis.second_count() == 2
    }
}

pub(crate) struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.is_flush
    }
}

pub(crate) struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_top.is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        straight_evaluation(self.category(), analysis)
    }
}

pub(crate) struct TripsDetector;

impl CategoryDetector for TripsDetector {
    fn category(&self) -> HandCategory {
        HandCategory::Trips
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.top_count() == 3
    }
}

pub(crate) struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> HandCategory {
        HandCategory::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.top_count() == 2 && analysis.second_count() == 2
    }
}

pub(crate) struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> HandCategory {
        HandCategory::OnePair
    }

    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.top_count() == 2
    }
}

pub(crate) struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> HandCategory {
        HandCategory::HighCard
    }

    fn detect(&self, _analysis: &HandAnalysis) -> bool {
        true
    }
}

/// Strongest first; the last entry always matches.
pub(crate) const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &QuadsDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &TripsDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank};

    fn analyse(s: &str) -> HandAnalysis {
        let c = parse_cards(s).unwrap();
        HandAnalysis::new(&[c[0], c[1], c[2], c[3], c[4]])
    }

    fn first_match(a: &HandAnalysis) -> HandCategory {
        DETECTORS.iter().find(|d| d.detect(a)).map(|d| d.category()).unwrap()
    }

    #[test]
    fn detectors_are_listed_strongest_first() {
        let cats: Vec<HandCategory> = DETECTORS.iter().map(|d| d.category()).collect();
        assert!(cats.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn straight_flush_also_matches_weaker_detectors() {
        let a = analyse("9h 8h 7h 6h 5h");
        assert!(StraightFlushDetector.detect(&a));
        assert!(FlushDetector.detect(&a));
        assert!(StraightDetector.detect(&a));
        assert_eq!(first_match(&a), HandCategory::StraightFlush);
    }

    #[test]
    fn full_house_is_found_before_trips() {
        let a = analyse("Kc Kd Kh 4s 4d");
        assert!(TripsDetector.detect(&a));
        assert_eq!(first_match(&a), HandCategory::FullHouse);
    }

    #[test]
    fn straight_tiebreak_is_top_card_only() {
        let a = analyse("5c 4d 3h 2s Ad");
        let e = StraightDetector.build_evaluation(&a);
        assert_eq!(e.score.tiebreak(), &[Rank::Five]);
    }

    #[test]
    fn trips_tiebreak_carries_two_kickers() {
        let a = analyse("Jc Jd Jh 3s 9d");
        let e = TripsDetector.build_evaluation(&a);
        assert_eq!(e.score.tiebreak(), &[Rank::Jack, Rank::Nine, Rank::Three]);
    }
}
