// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hole cards and hand classification.
use std::fmt;

use jeeves_cards::Card;
use jeeves_eval::{HandCategory, HandCode, HandValue};

use crate::BotError;

/// The two hole cards of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    cards: [Card; 2],
}

impl Hand {
    /// Creates a hand from two cards.
    pub fn new(c1: Card, c2: Card) -> Self {
        Self { cards: [c1, c2] }
    }

    /// Creates a hand from a list of cards that must have two distinct cards.
    pub fn from_cards(cards: &[Card]) -> Result<Self, BotError> {
        match cards {
            [c1, c2] if c1 == c2 => Err(BotError::DuplicateCard(*c1)),
            [c1, c2] => Ok(Self::new(*c1, *c2)),
            _ => Err(BotError::InvalidHand(cards.len())),
        }
    }

    /// The hand cards.
    pub fn cards(&self) -> &[Card; 2] {
        &self.cards
    }

    /// Checks if the hand contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Checks if the two cards have the same rank.
    pub fn is_pair(&self) -> bool {
        self.cards[0].rank() == self.cards[1].rank()
    }

    /// The sum of the two cards rank ordinals, from 0 for 22 to 24 for AA.
    pub fn ordinal_sum(&self) -> u8 {
        self.cards.iter().map(|c| c.rank().ordinal()).sum()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.cards[0], self.cards[1])
    }
}

/// Classifies the hole cards with the shared cards.
///
/// Preflop there are no combinations to evaluate so a hand is either a pair or
/// nothing, on the other streets the hole and shared cards are evaluated with
/// the 5, 6, or 7 cards evaluator.
pub fn classify(hand: &Hand, shared: &[Card]) -> Result<HandCategory, BotError> {
    if shared.is_empty() {
        return Ok(if hand.is_pair() {
            HandCategory::Pair
        } else {
            HandCategory::NoPair
        });
    }

    let code = HandCode::from_cards(hand.cards()) + HandCode::from_cards(shared);
    let value = match shared.len() {
        3 => HandValue::eval5(code),
        4 => HandValue::eval6(code),
        5 => HandValue::eval7(code),
        n => return Err(BotError::UnsupportedSharedCount(n)),
    };

    Ok(value.category())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeeves_cards::Deck;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn hand(s: &str) -> Hand {
        Hand::from_cards(&cards(s)).unwrap()
    }

    #[test]
    fn preflop_classify() {
        let mut pairs = 0;
        Deck::default().for_each(2, |cards| {
            let hand = Hand::from_cards(cards).unwrap();
            let category = classify(&hand, &[]).unwrap();
            if cards[0].rank() == cards[1].rank() {
                assert_eq!(category, HandCategory::Pair);
                pairs += 1;
            } else {
                assert_eq!(category, HandCategory::NoPair);
            }
        });

        // 6 combinations for each rank.
        assert_eq!(pairs, 78);
    }

    #[test]
    fn postflop_classify() {
        let h = hand("Ah Kh");

        let category = classify(&h, &cards("Qh Jh Th")).unwrap();
        assert_eq!(category, HandCategory::StraightFlush);

        let category = classify(&h, &cards("Ac Kd 2h 7s")).unwrap();
        assert_eq!(category, HandCategory::TwoPair);

        let category = classify(&h, &cards("Ac Ad 2c 7s 9d")).unwrap();
        assert_eq!(category, HandCategory::ThreeOfAKind);

        let category = classify(&h, &cards("2c 3d 5c 7s 9d")).unwrap();
        assert_eq!(category, HandCategory::NoPair);
    }

    #[test]
    fn unsupported_shared_count() {
        let h = hand("Ah Kh");
        let shared = cards("2c 3d 5c 7s 9d 8d");

        for n in [1, 2, 6] {
            assert_eq!(
                classify(&h, &shared[..n]),
                Err(BotError::UnsupportedSharedCount(n))
            );
        }
    }

    #[test]
    fn hand_from_cards() {
        assert_eq!(
            Hand::from_cards(&cards("Ah")),
            Err(BotError::InvalidHand(1))
        );
        assert_eq!(
            Hand::from_cards(&cards("Ah Kh Qh")),
            Err(BotError::InvalidHand(3))
        );
        assert!(matches!(
            Hand::from_cards(&cards("Ah Ah")),
            Err(BotError::DuplicateCard(_))
        ));

        let h = hand("Ah 2c");
        assert_eq!(h.ordinal_sum(), 12);
        assert_eq!(h.to_string(), "[Ah,2c]");
        assert!(h.contains("2c".parse().unwrap()));
        assert!(!h.is_pair());
    }
}
