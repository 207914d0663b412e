// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use log::{error, info};

use jeeves_eval::HandCategory;

use crate::{
    BotError, State,
    protocol::{Action, Move},
};

/// A Poker bot strategy.
pub trait Strategy {
    /// Execute an action given the game state and the time left in
    /// milliseconds.
    fn execute(&mut self, state: &mut State, time_remaining: i64) -> Move;
}

/// A snapshot of the state used to decide a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// This bot name.
    pub name: String,
    /// The time left in milliseconds.
    pub time_remaining: i64,
    /// The number of shared cards.
    pub street: usize,
    /// The sum of the hole cards rank ordinals.
    pub ordinal_sum: u8,
    /// The hand category with the shared cards.
    pub category: HandCategory,
    /// The number of outs, -1 preflop and on the river.
    pub outs: i32,
    /// This bot has the button.
    pub on_button: bool,
    /// The amount to put in to call.
    pub amount_to_call: u32,
}

impl Turn {
    /// Reads a turn snapshot from the state.
    pub fn from_state(state: &mut State, time_remaining: i64) -> Result<Self, BotError> {
        let hand = state.round().hand.ok_or(BotError::MissingHand)?;
        let category = state.category()?;
        let outs = state.number_of_outs()?;

        let round = state.round();
        Ok(Self {
            name: state.name().to_string(),
            time_remaining,
            street: round.street(),
            ordinal_sum: hand.ordinal_sum(),
            category,
            outs,
            on_button: round.on_button,
            amount_to_call: round.amount_to_call,
        })
    }
}

/// A fixed rules strategy keyed by street.
///
/// | Street  | Call if                                      | Else  |
/// |---------|----------------------------------------------|-------|
/// | preflop | ordinals sum > 14 or on button               | fold  |
/// | flop    | category above pair or outs >= 8             | check |
/// | turn    | category above pair or outs >= 10            | check |
/// | river   | category is pair                             | check |
///
/// With less than 500ms left the bot always folds. This strategy never
/// raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTable;

impl RuleTable {
    /// Fold if there is less time than this.
    pub const MIN_TIME: i64 = 500;
    /// Preflop call if the hole ordinals sum is above this.
    pub const PREFLOP_ORDINAL_SUM: u8 = 14;
    /// Flop call with at least these outs.
    pub const FLOP_OUTS: i32 = 8;
    /// Turn call with at least these outs.
    pub const TURN_OUTS: i32 = 10;

    /// Decides a move for a turn.
    pub fn decide(&self, turn: &Turn) -> Move {
        if turn.time_remaining < Self::MIN_TIME {
            return Move::fold(&turn.name);
        }

        let call = match turn.street {
            0 if turn.ordinal_sum > Self::PREFLOP_ORDINAL_SUM || turn.on_button => true,
            0 => return Move::fold(&turn.name),
            3 => turn.category > HandCategory::Pair || turn.outs >= Self::FLOP_OUTS,
            4 => turn.category > HandCategory::Pair || turn.outs >= Self::TURN_OUTS,
            5 => turn.category == HandCategory::Pair,
            _ => false,
        };

        if call {
            Move::new(&turn.name, Action::Call, turn.amount_to_call)
        } else {
            Move::check(&turn.name)
        }
    }
}

impl Strategy for RuleTable {
    fn execute(&mut self, state: &mut State, time_remaining: i64) -> Move {
        if time_remaining < Self::MIN_TIME {
            info!("Folding with {time_remaining}ms left");
            return Move::fold(state.name());
        }

        let turn = match Turn::from_state(state, time_remaining) {
            Ok(turn) => turn,
            Err(err) => return safe_fold(state.name(), &err),
        };

        let round = state.round();
        let opponent = round
            .opponent_move
            .as_ref()
            .map(|m| format!("{} {}", m.actor, m))
            .unwrap_or_else(|| "none".to_string());
        info!(
            "my hand is {}, opponent action is {}, pot: {}",
            turn.category, opponent, round.pot
        );

        self.decide(&turn)
    }
}

/// Folds after an error, the tracker never lets an unsupported number of
/// shared cards through so that fails in debug builds.
fn safe_fold(name: &str, err: &BotError) -> Move {
    debug_assert!(
        !matches!(err, BotError::UnsupportedSharedCount(_)),
        "{err}"
    );

    error!("Cannot decide a move: {err}");
    Move::fold(name)
}
