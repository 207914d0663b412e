// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Outs enumeration.
//!
//! On the flop and on the turn each card not yet visible is added to the
//! shared cards and the resulting hand is classified, the unseen cards are
//! then grouped by the category they would give to the hand. The outs are the
//! cards that would improve the hand past a pair.
use ahash::{HashMap, HashSet};

use jeeves_cards::{Card, Deck};
use jeeves_eval::HandCategory;

use crate::{
    BotError,
    hand::{Hand, classify},
};

/// The unseen cards grouped by the category they would make.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outs {
    cards: HashMap<HandCategory, HashSet<Card>>,
}

impl Outs {
    /// Cards that make a category above this one are outs.
    pub const BASELINE: HandCategory = HandCategory::Pair;

    /// Computes the outs for a hand.
    ///
    /// Outs are only defined on the flop and on the turn, for any other number
    /// of shared cards this returns an empty map.
    pub fn compute(hand: &Hand, shared: &[Card]) -> Result<Self, BotError> {
        let mut outs = Self::default();
        if !matches!(shared.len(), 3 | 4) {
            return Ok(outs);
        }

        let mut deck = Deck::default();
        for card in hand.cards().iter().chain(shared) {
            deck.remove(*card);
        }

        let mut next = shared.to_vec();
        for card in deck.iter() {
            next.truncate(shared.len());
            next.push(card);

            let category = classify(hand, &next)?;
            outs.cards.entry(category).or_default().insert(card);
        }

        Ok(outs)
    }

    /// The number of cards that make a hand better than a pair.
    pub fn count(&self) -> usize {
        self.iter()
            .filter(|(category, _)| *category > Self::BASELINE)
            .map(|(_, cards)| cards.len())
            .sum()
    }

    /// The cards that make the given category.
    pub fn get(&self, category: HandCategory) -> Option<&HashSet<Card>> {
        self.cards.get(&category)
    }

    /// Iterates the categories and their cards.
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, &HashSet<Card>)> {
        self.cards.iter().map(|(category, cards)| (*category, cards))
    }

    /// The number of unseen cards in the map.
    pub fn len(&self) -> usize {
        self.cards.values().map(|cards| cards.len()).sum()
    }

    /// Checks if there are no cards in the map.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
