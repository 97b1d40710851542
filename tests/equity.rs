use holdem_sim::cards::Card;
use holdem_sim::config::SimConfig;
use holdem_sim::deck::Deck;
use holdem_sim::equity::{estimate_equity, EquityEstimator, EquityResult};
use holdem_sim::error::InvalidStateError;
use holdem_sim::hand::{Board, HoleCards};
use proptest::prelude::*;
use proptest::sample::subsequence;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn hole(s: &str) -> HoleCards {
    s.parse().unwrap()
}

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn sums_to_100(r: &EquityResult) -> bool {
    (r.win_pct + r.tie_pct + r.loss_pct - 100.0).abs() < 1e-9
}

#[test]
fn no_opponents_always_wins() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let r = estimate_equity(&hole("2c 7d"), &Board::empty(), 0, 200, &mut rng).unwrap();
    assert_eq!((r.win_pct, r.tie_pct, r.loss_pct), (100.0, 0.0, 0.0));
    assert_eq!(r.trials, 200);
}

#[test]
fn pocket_aces_with_no_opponents_win_every_trial() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let r = estimate_equity(&hole("As Ah"), &Board::empty(), 0, 1_000, &mut rng).unwrap();
    assert_eq!(r, EquityResult { win_pct: 100.0, tie_pct: 0.0, loss_pct: 0.0, trials: 1_000 });
}

#[test]
fn pocket_aces_heads_up_preflop() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let r = estimate_equity(&hole("As Ad"), &Board::empty(), 1, 4_000, &mut rng).unwrap();
    assert!(r.win_pct > 78.0 && r.win_pct < 92.0, "AA vs one hand: {r}");
    assert!(sums_to_100(&r));
}

#[test]
fn royal_flush_on_the_river_never_loses() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let r = estimate_equity(&hole("As Ks"), &board("Qs Js Ts 2d 3c"), 5, 500, &mut rng).unwrap();
    assert_eq!(r.win_pct, 100.0);
}

#[test]
fn board_royal_flush_ties_every_trial() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let r = estimate_equity(&hole("2c 3d"), &board("As Ks Qs Js Ts"), 2, 300, &mut rng).unwrap();
    assert_eq!(r.tie_pct, 100.0);
}

#[test]
fn same_seed_same_estimate() {
    let (h, b) = (hole("Kh Qh"), board("Jh 2s 9d"));
    let a = estimate_equity(&h, &b, 3, 800, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
    let c = estimate_equity(&h, &b, 3, 800, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
    assert_eq!(a, c);
}

#[test]
fn too_many_opponents_for_the_deck_is_a_loss() {
    // 45 unseen cards on the river cover 22 opponents but not 23
    let (h, b) = (hole("As Ad"), board("Kc 9d 4s 2h 6c"));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(estimate_equity(&h, &b, 23, 100, &mut rng).unwrap(), EquityResult::all_loss());
    let fits = estimate_equity(&h, &b, 22, 100, &mut rng).unwrap();
    assert_eq!(fits.trials, 100);
}

#[test]
fn absurd_opponent_counts_are_a_loss_not_a_panic() {
    let (h, b) = (hole("As Ad"), board("Kc 9d 4s 2h 6c"));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for opponents in [usize::MAX / 2 + 1, usize::MAX] {
        assert_eq!(estimate_equity(&h, &b, opponents, 10, &mut rng).unwrap(), EquityResult::all_loss());
        let cfg = SimConfig::default().with_opponents(opponents).with_seed(1).with_workers(2);
        assert_eq!(EquityEstimator::new(cfg).estimate(&h, &b).unwrap(), EquityResult::all_loss());
    }
}

#[test]
fn overlapping_cards_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = estimate_equity(&hole("As Ad"), &board("As 9d 4s"), 1, 10, &mut rng).unwrap_err();
    assert!(matches!(err, InvalidStateError::InvalidHand(_)));
    assert!("As As".parse::<HoleCards>().is_err());
    assert!("Kc Kc 4s".parse::<Board>().is_err());
}

#[test]
fn zero_samples_is_an_error() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = estimate_equity(&hole("As Ad"), &Board::empty(), 1, 0, &mut rng).unwrap_err();
    assert_eq!(err, InvalidStateError::NoSamples);
}

#[test]
fn seeded_workers_are_reproducible() {
    let cfg = SimConfig::default().with_samples(1_001).with_opponents(2).with_seed(42).with_workers(4);
    let (h, b) = (hole("8s 8d"), board("Ac 8h 3d 5s"));
    let first = EquityEstimator::new(cfg.clone()).estimate(&h, &b).unwrap();
    let second = EquityEstimator::new(cfg).estimate(&h, &b).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.trials, 1_001);
    assert!(sums_to_100(&first));
}

#[test]
fn estimator_reports_guard_and_errors_like_the_free_function() {
    let cfg = SimConfig::default().with_opponents(30).with_seed(3);
    let r = EquityEstimator::new(cfg).estimate(&hole("As Ad"), &Board::empty()).unwrap();
    assert_eq!(r, EquityResult::all_loss());

    let cfg = SimConfig::default().with_samples(0);
    assert_eq!(
        EquityEstimator::new(cfg).estimate(&hole("As Ad"), &Board::empty()),
        Err(InvalidStateError::NoSamples)
    );
}

/// Two hole cards plus a 0, 3, 4 or 5 card board, all distinct.
fn hand_and_board() -> impl Strategy<Value = (HoleCards, Board)> {
    prop::sample::select(vec![0usize, 3, 4, 5])
        .prop_flat_map(|n| subsequence(Deck::standard().as_slice().to_vec(), n + 2).prop_shuffle())
        .prop_map(|cards: Vec<Card>| {
            let h = HoleCards::from_slice(&cards[..2]).unwrap();
            let b = Board::try_new(cards[2..].to_vec()).unwrap();
            (h, b)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn percentages_always_sum_to_100(
        (h, b) in hand_and_board(),
        opponents in 0usize..=6,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let r = estimate_equity(&h, &b, opponents, 50, &mut rng).unwrap();
        prop_assert!(sums_to_100(&r));
        prop_assert!(r.win_pct >= 0.0 && r.tie_pct >= 0.0 && r.loss_pct >= 0.0);
        prop_assert_eq!(r.trials, 50);
    }
}
