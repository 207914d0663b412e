// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jeeves Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. Cards are aggregated into
//! a [HandCode] bitmask and evaluated into a [HandValue], a dense value where
//! a higher number is a stronger hand. The value space is split in 9 equal
//! bands of size `1 << VALUE_SHIFT`, one for each [HandCategory]:
//!
//! ```
//! # use jeeves_eval::*;
//! // 2c, 3c, .., Jc
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert!(v2 > v1);
//! assert_eq!(v1.category(), HandCategory::StraightFlush);
//! assert_eq!(v2.category(), HandCategory::StraightFlush);
//!
//! // Kd, Ad, 2h, Ah, As, Ac
//! let hand = ["Kd", "Ad", "2h", "Ah", "As", "Ac"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let v3 = HandValue::eval6(HandCode::from_cards(&hand));
//! assert_eq!(v3.category(), HandCategory::FourOfAKind);
//! assert!(v3 < v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandCategory, HandCode, HandValue, VALUE_SHIFT};

// Reexport cards types.
pub use jeeves_cards::{Card, Deck, Rank, Suit};
