use holdem_sim::cards::{Card, Rank, Suit};
use holdem_sim::deck::Deck;
use holdem_sim::evaluator::{rank_best, rank_five, HandCategory};
use proptest::prelude::*;
use proptest::sample::subsequence;

/// `n` distinct cards in random order.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(Deck::standard().as_slice().to_vec(), n).prop_shuffle()
}

fn straight(top: u8) -> Vec<Card> {
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    let values: Vec<u8> = if top == 5 { vec![14, 2, 3, 4, 5] } else { (top - 4..=top).collect() };
    values
        .into_iter()
        .zip(suits)
        .map(|(v, s)| Card::new(Rank::from_value(v).unwrap(), s))
        .collect()
}

proptest! {
    #[test]
    fn rank_five_ignores_card_order(cards in distinct_cards(5), perm in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle()) {
        let shuffled: Vec<Card> = perm.iter().map(|&i| cards[i]).collect();
        prop_assert_eq!(rank_five(&cards).unwrap(), rank_five(&shuffled).unwrap());
    }

    #[test]
    fn ordering_is_total_and_consistent(a in distinct_cards(5), b in distinct_cards(5), c in distinct_cards(5)) {
        let (ea, eb, ec) = (rank_five(&a).unwrap(), rank_five(&b).unwrap(), rank_five(&c).unwrap());
        prop_assert_eq!(ea.cmp(&eb), eb.cmp(&ea).reverse());
        prop_assert_eq!(ea == eb, ea.cmp(&eb).is_eq());
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
        if ea.category() != eb.category() {
            prop_assert_eq!(ea > eb, ea.category() > eb.category());
        }
    }

    #[test]
    fn best_of_seven_dominates_every_five(cards in distinct_cards(7)) {
        let best = rank_best(&cards).unwrap();
        let mut matched = false;
        for skip_a in 0..7 {
            for skip_b in (skip_a + 1)..7 {
                let sub: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip_a && *i != skip_b)
                    .map(|(_, &c)| c)
                    .collect();
                let s = rank_five(&sub).unwrap();
                prop_assert!(best >= s);
                matched |= best == s;
            }
        }
        prop_assert!(matched, "best score must come from some five-card subset");
    }

    #[test]
    fn best_of_six_dominates_every_five(cards in distinct_cards(6)) {
        let best = rank_best(&cards).unwrap();
        for skip in 0..6 {
            let sub: Vec<Card> = cards
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, &c)| c)
                .collect();
            prop_assert!(best >= rank_five(&sub).unwrap());
        }
    }

    #[test]
    fn royal_flush_is_found_wherever_it_sits(
        extra in subsequence(
            Deck::standard()
                .as_slice()
                .iter()
                .copied()
                .filter(|c| c.suit() != Suit::Spades)
                .collect::<Vec<_>>(),
            2,
        ),
        perm in Just((0..7usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let royal = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]
            .map(|r| Card::new(r, Suit::Spades));
        let pool: Vec<Card> = royal.iter().copied().chain(extra).collect();
        let cards: Vec<Card> = perm.iter().map(|&i| pool[i]).collect();
        let best = rank_best(&cards).unwrap();
        prop_assert_eq!(best, rank_five(&royal).unwrap());
        prop_assert_eq!(best.category(), HandCategory::StraightFlush);
    }

    #[test]
    fn straights_order_by_top_card(hi in 6u8..=14, lo in 5u8..=13) {
        prop_assume!(hi > lo);
        let (a, b) = (rank_five(&straight(hi)).unwrap(), rank_five(&straight(lo)).unwrap());
        prop_assert_eq!(a.category(), HandCategory::Straight);
        prop_assert_eq!(b.category(), HandCategory::Straight);
        prop_assert!(a > b);
    }
}
