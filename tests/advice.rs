use holdem_sim::advice::{auto_decision, suggest, Advice, AutoAction, CALL_THRESHOLD, RAISE_THRESHOLD};
use proptest::prelude::*;

#[test]
fn thresholds_sit_at_55_and_35() {
    assert_eq!(RAISE_THRESHOLD, 55.0);
    assert_eq!(CALL_THRESHOLD, 35.0);
    assert_eq!(suggest(55.0), Advice::Raise);
    assert_eq!(suggest(54.9), Advice::CallCheck);
    assert_eq!(suggest(35.0), Advice::CallCheck);
    assert_eq!(suggest(34.9), Advice::Fold);
}

#[test]
fn auto_player_checks_weak_hands_when_free() {
    assert_eq!(auto_decision(10.0, 0), AutoAction::Check);
    assert_eq!(auto_decision(10.0, 1), AutoAction::Fold);
    assert_eq!(auto_decision(75.0, 0), AutoAction::Raise);
    assert_eq!(auto_decision(75.0, 500), AutoAction::Call);
}

proptest! {
    #[test]
    fn advice_is_monotonic_in_win_pct(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let strength = |adv: Advice| match adv {
            Advice::Fold => 0,
            Advice::CallCheck => 1,
            Advice::Raise => 2,
        };
        if a <= b {
            prop_assert!(strength(suggest(a)) <= strength(suggest(b)));
        }
    }
}
