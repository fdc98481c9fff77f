use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::evaluator::{evaluate, HandRank};
use proptest::prelude::*;
use std::collections::HashSet;

fn deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for &rank in Rank::ALL.iter() {
        for &suit in Suit::ALL.iter() {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Seven distinct cards drawn from a full deck.
fn seven_cards() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(deck(), 7)
}

proptest! {
    #[test]
    fn rank_number_is_always_in_band(cards in seven_cards()) {
        let e = evaluate(&cards);
        prop_assert!((1..=10).contains(&e.rank.rank_number()));
    }

    #[test]
    fn evaluation_ignores_card_order(cards in seven_cards(), seed in any::<u64>()) {
        let forward = evaluate(&cards);
        let mut shuffled = cards.clone();
        // Cheap deterministic permutation.
        shuffled.rotate_left((seed as usize) % 7);
        if seed % 2 == 0 {
            shuffled.reverse();
        }
        prop_assert_eq!(forward, evaluate(&shuffled));
    }

    #[test]
    fn hand_values_stay_within_rank_range(cards in seven_cards()) {
        let e = evaluate(&cards);
        for &v in e.hand_values.iter().chain(e.kickers.iter()) {
            prop_assert!((1..=14).contains(&v));
        }
    }

    #[test]
    fn flush_suit_is_reported_iff_five_share_a_suit(cards in seven_cards()) {
        let e = evaluate(&cards);
        let has_flush = Suit::ALL
            .iter()
            .any(|&s| cards.iter().filter(|c| c.suit() == s).count() >= 5);
        match e.rank {
            HandRank::RoyalFlush | HandRank::StraightFlush | HandRank::Flush => {
                prop_assert!(has_flush);
                prop_assert!(e.flush_suit.is_some());
            }
            _ => prop_assert!(e.flush_suit.is_none()),
        }
    }

    #[test]
    fn flush_hand_values_are_exactly_five(cards in seven_cards()) {
        let e = evaluate(&cards);
        if e.rank == HandRank::Flush {
            prop_assert_eq!(e.hand_values.len(), 5);
            for w in e.hand_values.windows(2) {
                prop_assert!(w[0] > w[1]);
            }
        }
    }

    #[test]
    fn pair_family_counts_are_exact(cards in seven_cards()) {
        let e = evaluate(&cards);
        let expected = match e.rank {
            HandRank::FourOfAKind => Some(4),
            HandRank::ThreeOfAKind => Some(3),
            HandRank::TwoPair => Some(4),
            HandRank::OnePair => Some(2),
            _ => None,
        };
        if let Some(n) = expected {
            prop_assert_eq!(e.hand_values.len(), n);
        }
    }

    #[test]
    fn kickers_never_reuse_made_hand_ranks(cards in seven_cards()) {
        let e = evaluate(&cards);
        let used: HashSet<u8> = e.hand_values.iter().copied().collect();
        for k in &e.kickers {
            prop_assert!(!used.contains(k), "kicker {} reused from made hand", k);
        }
    }

    #[test]
    fn straights_are_five_consecutive_values(cards in seven_cards()) {
        let e = evaluate(&cards);
        if matches!(e.rank, HandRank::Straight | HandRank::StraightFlush) {
            prop_assert_eq!(e.hand_values.len(), 5);
            for w in e.hand_values.windows(2) {
                prop_assert_eq!(w[0], w[1] + 1);
            }
        }
    }

    #[test]
    fn adding_cards_never_weakens_a_hand(cards in seven_cards()) {
        let five = evaluate(&cards[..5]);
        let seven = evaluate(&cards);
        prop_assert!(seven >= five);
    }
}
