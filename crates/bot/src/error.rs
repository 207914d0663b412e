// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot error types.
use thiserror::Error;

use jeeves_cards::CardError;

/// Errors from decoding engine facts and computing a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// A card token in a card list could not be parsed.
    #[error(transparent)]
    Card(#[from] CardError),
    /// A fact key that the bot doesn't know about.
    #[error("unknown {namespace} key `{key}`")]
    UnknownKey {
        /// The fact namespace (settings, match, or the actor name).
        namespace: String,
        /// The unknown key.
        key: String,
    },
    /// A fact value that should be a number.
    #[error("invalid number `{value}` for key `{key}`")]
    InvalidNumber {
        /// The fact key.
        key: String,
        /// The value that failed to parse.
        value: String,
    },
    /// A line that doesn't have enough tokens.
    #[error("malformed line `{0}`")]
    MalformedLine(String),
    /// The hole cards must be exactly two.
    #[error("a hand needs 2 cards, got {0}")]
    InvalidHand(usize),
    /// A table update that would break the streets sequence.
    #[error("cannot go from {from} to {to} shared cards")]
    InvalidTable {
        /// The current number of shared cards.
        from: usize,
        /// The number of shared cards in the update.
        to: usize,
    },
    /// A card that is already visible in the hole or shared cards.
    #[error("duplicate card {0}")]
    DuplicateCard(jeeves_cards::Card),
    /// The evaluator only handles 0, 3, 4, or 5 shared cards.
    #[error("unsupported number of shared cards {0}")]
    UnsupportedSharedCount(usize),
    /// A move was requested before the hole cards were dealt.
    #[error("no hole cards for this round")]
    MissingHand,
}
