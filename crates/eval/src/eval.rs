// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator builds the per suit rank masks of a hand in a single pass and
//! checks the categories from the strongest to the weakest, the first match is
//! the best five cards hand. The resulting [HandValue] packs the category in
//! the bits above [VALUE_SHIFT] and up to five 4-bits rank ordinals below it
//! to break ties between hands of the same category.
use std::{fmt, iter, ops};

use jeeves_cards::{Card, Rank};

/// The shift to go from a [HandValue] to its [HandCategory].
pub const VALUE_SHIFT: u32 = 24;

/// Mask for the 13 ranks of a suit.
const RANKS_MASK: u64 = 0x1fff;

/// Ace, five, four, trey, deuce.
const WHEEL_MASK: u16 = 0x100f;

/// A Poker hand category from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair, only high cards.
    NoPair = 0,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandCategory {
    /// The number of categories.
    pub const COUNT: usize = 9;

    const ALL: [HandCategory; Self::COUNT] = {
        use HandCategory::*;
        [
            NoPair,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
    };

    /// Returns all categories from the weakest to the strongest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        Self::ALL.into_iter()
    }

    /// The category position, 0 for no pair up to 8 for straight flush.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// The category canonical name.
    pub const fn name(&self) -> &'static str {
        match self {
            HandCategory::NoPair => "NO_PAIR",
            HandCategory::Pair => "PAIR",
            HandCategory::TwoPair => "TWO_PAIR",
            HandCategory::ThreeOfAKind => "THREE_OF_A_KIND",
            HandCategory::Straight => "STRAIGHT",
            HandCategory::Flush => "FLUSH",
            HandCategory::FullHouse => "FULL_HOUSE",
            HandCategory::FourOfAKind => "FOUR_OF_A_KIND",
            HandCategory::StraightFlush => "STRAIGHT_FLUSH",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cards of a hand encoded as a bitmask.
///
/// Each card sets the bit `suit * 16 + rank`, so that each suit uses 13 bits
/// of a 16 bits lane:
///
/// ```text
///   +----------------+----------------+----------------+----------------+
///   |xxxAKQJT98765432|xxxAKQJT98765432|xxxAKQJT98765432|xxxAKQJT98765432|
///   +----------------+----------------+----------------+----------------+
///        spades           hearts          diamonds           clubs
/// ```
///
/// Adding the codes of distinct cards gives the code of the hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HandCode(u64);

impl HandCode {
    /// Encodes a slice of cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        cards.iter().copied().map(HandCode::from).sum()
    }

    /// The number of cards in this hand.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    fn suit_mask(&self, suit: usize) -> u16 {
        ((self.0 >> (suit * 16)) & RANKS_MASK) as u16
    }
}

impl From<Card> for HandCode {
    fn from(card: Card) -> Self {
        let bit = u32::from(card.suit().ordinal()) * 16 + u32::from(card.rank().ordinal());
        Self(1 << bit)
    }
}

impl ops::Add for HandCode {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl ops::AddAssign for HandCode {
    fn add_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl iter::Sum for HandCode {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HandCode::default(), |acc, c| acc + c)
    }
}

/// The value of a hand, a higher value is a stronger hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a 5, 6 or 7 cards hand.
    ///
    /// Panics if the hand doesn't have between 5 and 7 cards.
    pub fn eval(cards: &[Card]) -> Self {
        let code = HandCode::from_cards(cards);
        match cards.len() {
            5 => Self::eval5(code),
            6 => Self::eval6(code),
            7 => Self::eval7(code),
            n => panic!("Cannot evaluate a {n} cards hand"),
        }
    }

    /// Evaluates a 5 cards hand code.
    pub fn eval5(code: HandCode) -> Self {
        debug_assert_eq!(code.count(), 5);
        Self::eval_code(code)
    }

    /// Evaluates the best 5 cards out of a 6 cards hand code.
    pub fn eval6(code: HandCode) -> Self {
        debug_assert_eq!(code.count(), 6);
        Self::eval_code(code)
    }

    /// Evaluates the best 5 cards out of a 7 cards hand code.
    pub fn eval7(code: HandCode) -> Self {
        debug_assert_eq!(code.count(), 7);
        Self::eval_code(code)
    }

    /// The hand numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        // Values are only built from a category so the band is always valid.
        HandCategory::ALL[(self.value() >> VALUE_SHIFT) as usize]
    }

    fn new(category: HandCategory, ranks: &[u8]) -> Self {
        debug_assert!(ranks.len() <= 5);

        let kickers = ranks
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &r)| acc | (u32::from(r) << (16 - 4 * i)));
        Self(((category as u32) << VALUE_SHIFT) | kickers)
    }

    fn eval_code(code: HandCode) -> Self {
        use HandCategory::*;

        let suits = [0, 1, 2, 3].map(|s| code.suit_mask(s));
        let ranks = suits.iter().fold(0, |acc, s| acc | s);

        // At most one suit can have five cards in a seven cards hand, and when
        // it does there are not enough cards left for quads or a full house.
        if let Some(&flush) = suits.iter().find(|s| s.count_ones() >= 5) {
            return match straight_top(flush) {
                Some(top) => Self::new(StraightFlush, &[top]),
                None => Self::new(Flush, &top_ranks(flush, 5)),
            };
        }

        let mut counts = [0u8; Rank::COUNT as usize];
        for (rank, count) in counts.iter_mut().enumerate() {
            *count = suits.iter().filter(|&&s| s & (1 << rank) != 0).count() as u8;
        }

        let with_count = |n: u8| {
            (0..Rank::COUNT)
                .rev()
                .filter(|&r| counts[r as usize] == n)
                .collect::<Vec<_>>()
        };

        let quads = with_count(4);
        let trips = with_count(3);
        let pairs = with_count(2);

        if let Some(&q) = quads.first() {
            let kicker = top_ranks(ranks & !(1 << q), 1);
            return Self::new(FourOfAKind, &[q, kicker[0]]);
        }

        if let Some(&t) = trips.first() {
            if let Some(&p) = trips.get(1).or(pairs.first()) {
                return Self::new(FullHouse, &[t, p]);
            }
        }

        if let Some(top) = straight_top(ranks) {
            return Self::new(Straight, &[top]);
        }

        if let Some(&t) = trips.first() {
            let mut hand = vec![t];
            hand.extend(top_ranks(ranks & !(1 << t), 2));
            return Self::new(ThreeOfAKind, &hand);
        }

        if let &[p1, p2, ..] = pairs.as_slice() {
            let kicker = top_ranks(ranks & !(1 << p1) & !(1 << p2), 1);
            return Self::new(TwoPair, &[p1, p2, kicker[0]]);
        }

        if let Some(&p) = pairs.first() {
            let mut hand = vec![p];
            hand.extend(top_ranks(ranks & !(1 << p), 3));
            return Self::new(Pair, &hand);
        }

        Self::new(NoPair, &top_ranks(ranks, 5))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#08x})", self.category(), self.value())
    }
}

/// Returns the top rank of the highest straight in a ranks mask.
fn straight_top(mask: u16) -> Option<u8> {
    (4..Rank::COUNT)
        .rev()
        .find(|&top| {
            let window = 0x1f << (top - 4);
            mask & window == window
        })
        .or_else(|| (mask & WHEEL_MASK == WHEEL_MASK).then_some(Rank::Five.ordinal()))
}

/// Returns the `n` highest ranks in a ranks mask.
fn top_ranks(mask: u16, n: usize) -> Vec<u8> {
    (0..Rank::COUNT)
        .rev()
        .filter(|&r| mask & (1 << r) != 0)
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeeves_cards::Deck;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s))
    }

    #[test]
    fn hand_categories() {
        use HandCategory::*;

        let hands = [
            ("2c 7d 9h Js Ac", NoPair),
            ("2c 2d 9h Js Ac", Pair),
            ("2c 2d 9h 9s Ac", TwoPair),
            ("9c 9d 9h Js Ac", ThreeOfAKind),
            ("Tc Jd Qh Ks Ac", Straight),
            ("Ac 2d 3h 4s 5c", Straight),
            ("2h 7h 9h Jh Ah", Flush),
            ("9c 9d 9h As Ac", FullHouse),
            ("9c 9d 9h 9s Ac", FourOfAKind),
            ("Ts Js Qs Ks As", StraightFlush),
            ("As 2s 3s 4s 5s", StraightFlush),
        ];

        for (hand, category) in hands {
            let value = eval(hand);
            assert_eq!(value.category(), category, "{hand}");
            assert_eq!(value.value() >> VALUE_SHIFT, category.ordinal() as u32);
        }
    }

    #[test]
    fn best_of_six_and_seven() {
        use HandCategory::*;

        // Flush beats the straight.
        assert_eq!(eval("5h 6c 7h 8h 9h Kh").category(), Flush);
        assert_eq!(eval("5h 6c 7h 8h 9d Kh 2h").category(), Flush);

        // Two trips make a full house.
        assert_eq!(eval("9c 9d 9h 4s 4c 4d").category(), FullHouse);

        // Three pairs are two pairs with the best kicker.
        let v1 = eval("9c 9d 4h 4s 2c 2d Kd");
        let v2 = eval("9c 9d 4h 4s 2c 2d Qd");
        assert_eq!(v1.category(), TwoPair);
        assert!(v1 > v2);

        // Quads with a full house on the board.
        assert_eq!(eval("9c 9d 9h 9s 4c 4d 4h").category(), FourOfAKind);

        // Straight flush with a longer straight.
        assert_eq!(eval("4d 5d 6d 7d 8d 9c Ts").category(), StraightFlush);
    }

    #[test]
    fn values_order() {
        assert!(eval("Ac Ad 2h 3s 4c") > eval("Kc Kd Qh Js 9c"));
        assert!(eval("Ac Ad Kh 3s 4c") > eval("Ah As Qh Js 9c"));
        assert!(eval("2c 3d 4h 5s 6c") > eval("Ac 2d 3h 4s 5c"));
        assert!(eval("Ac Kd Qh Js 9c") > eval("Ac Kd Qh Js 8c"));
        assert_eq!(eval("Ac Kd Qh Js 9c"), eval("As Kh Qd Jc 9d"));
    }

    #[test]
    fn hand_code() {
        let hand = cards("Ac 2d Th Ks");
        let code = HandCode::from_cards(&hand);
        assert_eq!(code.count(), 4);

        let mut sum = HandCode::default();
        for c in &hand {
            sum += HandCode::from(*c);
        }
        assert_eq!(sum, code);

        // Adding the same card twice doesn't change the code.
        let ac = HandCode::from(hand[0]);
        assert_eq!(ac + ac, ac);
        assert_eq!((code + ac).count(), 4);
    }

    #[test]
    fn category_names() {
        let names = HandCategory::categories()
            .map(|c| c.name())
            .collect::<Vec<_>>();
        assert_eq!(names.len(), HandCategory::COUNT);
        assert_eq!(names[0], "NO_PAIR");
        assert_eq!(names[1], "PAIR");
        assert_eq!(HandCategory::StraightFlush.to_string(), "STRAIGHT_FLUSH");
        assert_eq!(HandCategory::TwoPair.ordinal(), 2);
    }

    #[test]
    fn seven_cards_is_best_five() {
        let mut rng = rand::rng();

        for _ in 0..500 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let hand = (0..7).filter_map(|_| deck.deal()).collect::<Vec<_>>();

            let mut best = None;
            for skip1 in 0..7 {
                for skip2 in (skip1 + 1)..7 {
                    let five = hand
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip1 && *i != skip2)
                        .map(|(_, c)| *c)
                        .collect::<Vec<_>>();
                    best = best.max(Some(HandValue::eval(&five)));
                }
            }

            assert_eq!(Some(HandValue::eval(&hand)), best, "{hand:?}");
        }
    }

    #[test]
    fn eval_all_five_cards_hands() {
        let mut counts = [0usize; HandCategory::COUNT];
        Deck::default().for_each(5, |hand| {
            counts[HandValue::eval(hand).category().ordinal()] += 1;
        });

        assert_eq!(counts[HandCategory::NoPair as usize], 1_302_540);
        assert_eq!(counts[HandCategory::Pair as usize], 1_098_240);
        assert_eq!(counts[HandCategory::TwoPair as usize], 123_552);
        assert_eq!(counts[HandCategory::ThreeOfAKind as usize], 54_912);
        assert_eq!(counts[HandCategory::Straight as usize], 10_200);
        assert_eq!(counts[HandCategory::Flush as usize], 5_108);
        assert_eq!(counts[HandCategory::FullHouse as usize], 3_744);
        assert_eq!(counts[HandCategory::FourOfAKind as usize], 624);
        assert_eq!(counts[HandCategory::StraightFlush as usize], 40);
    }
}
