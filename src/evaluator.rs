use crate::cards::{Card, Suit};
use core::cmp::Ordering;
use std::fmt;

/// Hand categories from strongest to weakest. [`HandRank::rank_number`]
/// follows the classic 1 (royal flush) to 10 (high card) numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandRank {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    HighCard,
}

impl HandRank {
    /// 1 is the best hand, 10 the worst.
    pub const fn rank_number(self) -> u8 {
        match self {
            HandRank::RoyalFlush => 1,
            HandRank::StraightFlush => 2,
            HandRank::FourOfAKind => 3,
            HandRank::FullHouse => 4,
            HandRank::Flush => 5,
            HandRank::Straight => 6,
            HandRank::ThreeOfAKind => 7,
            HandRank::TwoPair => 8,
            HandRank::OnePair => 9,
            HandRank::HighCard => 10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HandRank::RoyalFlush => "Royal Flush",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::FullHouse => "Full House",
            HandRank::Flush => "Flush",
            HandRank::Straight => "Straight",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::TwoPair => "Two Pair",
            HandRank::OnePair => "One Pair",
            HandRank::HighCard => "High Card",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of classifying a 5..=7 card hand.
///
/// `hand_values` holds the rank values of the cards forming the category
/// (highest first; the wheel straight is `[5, 4, 3, 2, 1]` with the ace
/// counted low). `kickers` holds the tie-break values outside the made
/// hand, truncated to what the category needs. Comparison follows the
/// showdown protocol: category first, then `hand_values`, then `kickers`;
/// hands comparing equal are a true tie and split the pot. Equality uses
/// the same protocol, so `flush_suit` never distinguishes two hands.
#[derive(Debug, Clone)]
pub struct HandEval {
    pub rank: HandRank,
    pub hand_values: Vec<u8>,
    pub kickers: Vec<u8>,
    pub flush_suit: Option<Suit>,
}

impl Ord for HandEval {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smaller rank_number is the stronger hand.
        other
            .rank
            .rank_number()
            .cmp(&self.rank.rank_number())
            .then_with(|| self.hand_values.cmp(&other.hand_values))
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

impl PartialOrd for HandEval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandEval {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandEval {}

impl fmt::Display for HandEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)
    }
}

/// Classify the best five-card hand available in `cards`.
///
/// Deterministic, order-insensitive, and total: callers pass 5..=7 cards
/// in practice, but smaller sets degrade gracefully through the
/// pair-family checks down to high card. Checks run from strongest
/// category to weakest and the first match wins.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{evaluate, HandRank};
///
/// let cards = parse_cards("9c 9s 9h 9d 2c 5s Kh").unwrap();
/// let eval = evaluate(&cards);
/// assert_eq!(eval.rank, HandRank::FourOfAKind);
/// assert_eq!(eval.hand_values, vec![9, 9, 9, 9]);
/// assert_eq!(eval.kickers, vec![13]);
/// ```
pub fn evaluate(cards: &[Card]) -> HandEval {
    let tally = RankTally::new(cards);

    if let Some(eval) = find_straight_flush(cards) {
        return eval;
    }
    if let Some(eval) = tally.find_quads() {
        return eval;
    }
    if let Some(eval) = tally.find_full_house() {
        return eval;
    }
    if let Some(eval) = find_flush(cards) {
        return eval;
    }
    if let Some(top) = find_straight(&tally.distinct_desc) {
        return HandEval {
            rank: HandRank::Straight,
            hand_values: straight_values(top).to_vec(),
            kickers: Vec::new(),
            flush_suit: None,
        };
    }
    if let Some(eval) = tally.find_trips() {
        return eval;
    }
    if let Some(eval) = tally.find_two_pair() {
        return eval;
    }
    if let Some(eval) = tally.find_pair() {
        return eval;
    }
    tally.high_card()
}

/// Per-rank counts plus derived groupings, shared by the pair-family
/// checks.
struct RankTally {
    counts: [u8; 15],
    /// All rank values present, descending, duplicates removed.
    distinct_desc: Vec<u8>,
    /// Every card's rank value, descending.
    values_desc: Vec<u8>,
}

impl RankTally {
    fn new(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }
        let mut values_desc: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
        values_desc.sort_unstable_by(|a, b| b.cmp(a));
        let mut distinct_desc = values_desc.clone();
        distinct_desc.dedup();
        Self { counts, distinct_desc, values_desc }
    }

    /// Rank values with exactly `count` copies, descending.
    fn with_count(&self, count: u8) -> Vec<u8> {
        (2u8..=14).rev().filter(|&v| self.counts[v as usize] == count).collect()
    }

    /// Tie-break values outside the made hand, descending, truncated.
    fn kickers_excluding(&self, used: &[u8], take: usize) -> Vec<u8> {
        self.values_desc.iter().copied().filter(|v| !used.contains(v)).take(take).collect()
    }

    fn find_quads(&self) -> Option<HandEval> {
        let quad = *self.with_count(4).first()?;
        Some(HandEval {
            rank: HandRank::FourOfAKind,
            hand_values: vec![quad; 4],
            kickers: self.kickers_excluding(&[quad], 1),
            flush_suit: None,
        })
    }

    fn find_full_house(&self) -> Option<HandEval> {
        let trips = self.with_count(3);
        let trip = *trips.first()?;
        // The pair half may itself come from a second set of trips.
        let pair = trips
            .get(1)
            .copied()
            .into_iter()
            .chain(self.with_count(2).first().copied())
            .max()?;
        Some(HandEval {
            rank: HandRank::FullHouse,
            hand_values: vec![trip, trip, trip, pair, pair],
            kickers: Vec::new(),
            flush_suit: None,
        })
    }

    fn find_trips(&self) -> Option<HandEval> {
        let trip = *self.with_count(3).first()?;
        Some(HandEval {
            rank: HandRank::ThreeOfAKind,
            hand_values: vec![trip; 3],
            kickers: self.kickers_excluding(&[trip], 2),
            flush_suit: None,
        })
    }

    fn find_two_pair(&self) -> Option<HandEval> {
        // Strictly count == 2: a tripped rank must never double as a pair.
        let pairs = self.with_count(2);
        let (&hi, &lo) = match pairs.as_slice() {
            [hi, lo, ..] => (hi, lo),
            _ => return None,
        };
        Some(HandEval {
            rank: HandRank::TwoPair,
            hand_values: vec![hi, hi, lo, lo],
            kickers: self.kickers_excluding(&[hi, lo], 1),
            flush_suit: None,
        })
    }

    fn find_pair(&self) -> Option<HandEval> {
        let pair = *self.with_count(2).first()?;
        Some(HandEval {
            rank: HandRank::OnePair,
            hand_values: vec![pair; 2],
            kickers: self.kickers_excluding(&[pair], 3),
            flush_suit: None,
        })
    }

    fn high_card(&self) -> HandEval {
        HandEval {
            rank: HandRank::HighCard,
            hand_values: Vec::new(),
            kickers: self.values_desc.iter().copied().take(5).collect(),
            flush_suit: None,
        }
    }
}

/// Rank values of the suit holding five or more cards, descending.
/// At most one suit can qualify in a 7-card hand.
fn flush_values(cards: &[Card]) -> Option<(Suit, Vec<u8>)> {
    let mut by_suit: [Vec<u8>; 4] = Default::default();
    for c in cards {
        by_suit[c.suit().index()].push(c.rank().value());
    }
    for (i, values) in by_suit.iter_mut().enumerate() {
        if values.len() >= 5 {
            values.sort_unstable_by(|a, b| b.cmp(a));
            return Some((Suit::ALL[i], std::mem::take(values)));
        }
    }
    None
}

fn find_flush(cards: &[Card]) -> Option<HandEval> {
    let (suit, values) = flush_values(cards)?;
    // A 6- or 7-card flush must be trimmed to its best five; comparison
    // assumes exactly five hand values.
    Some(HandEval {
        rank: HandRank::Flush,
        hand_values: values.into_iter().take(5).collect(),
        kickers: Vec::new(),
        flush_suit: Some(suit),
    })
}

/// Top value of the best straight within `distinct_desc` (descending,
/// deduplicated rank values). The ace-low wheel is found by treating an
/// ace as a trailing 1, so its top card reports as 5.
fn find_straight(distinct_desc: &[u8]) -> Option<u8> {
    let mut values = distinct_desc.to_vec();
    if values.first() == Some(&14) {
        values.push(1);
    }
    let mut run = 1usize;
    for w in values.windows(2) {
        if w[0] == w[1] + 1 {
            run += 1;
            if run == 5 {
                return Some(w[1] + 4);
            }
        } else {
            run = 1;
        }
    }
    None
}

const fn straight_values(top: u8) -> [u8; 5] {
    [top, top - 1, top - 2, top - 3, top - 4]
}

fn find_straight_flush(cards: &[Card]) -> Option<HandEval> {
    let (suit, values) = flush_values(cards)?;
    let top = find_straight(&values)?;
    let rank = if top == 14 { HandRank::RoyalFlush } else { HandRank::StraightFlush };
    Some(HandEval {
        rank,
        hand_values: straight_values(top).to_vec(),
        kickers: Vec::new(),
        flush_suit: Some(suit),
    })
}
