// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jeeves Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use jeeves_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert_eq!(kd.to_string(), "Kd");
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! Each card has a unique code in `0..52` that can be used to rebuild the card
//! with [Card::from_code] and to enumerate the deck.
//!
//! The [Deck] type is used for shuffling, removing known cards, and iterating
//! the remaining cards. For example to iterate through all 5 cards hands:
//!
//! ```no_run
//! # use jeeves_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, Deck, Rank, Suit};
