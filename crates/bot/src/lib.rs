// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jeeves heads up Poker bot.
//!
//! The bot reads engine facts from a line feed, keeps a [State] of the match
//! and answers each `Action` request with the move chosen by a [Strategy].
//!
//! ```
//! use jeeves_bot::{RuleTable, State, Strategy};
//!
//! let mut state = State::new("player1");
//! state.update_match("round", "1").unwrap();
//! state.update_match("on_button", "player1").unwrap();
//! state.update_match("amount_to_call", "10").unwrap();
//! state.update_move("player1", "hand", "[Ah,Kd]").unwrap();
//!
//! let m = RuleTable.execute(&mut state, 10_000);
//! assert_eq!(m.to_string(), "call 10");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use log::{debug, warn};
use std::io::{self, BufRead, Write};

mod error;
pub use error::BotError;

pub mod hand;
pub mod outs;
pub mod protocol;
pub mod state;
pub mod strategy;

pub use state::State;
pub use strategy::{RuleTable, Strategy};

use protocol::{Command, Move};

/// Bot configuration.
#[derive(Debug)]
pub struct Config {
    /// The bot name used until the engine sends one.
    pub name: String,
}

/// Runs the bot on stdin and stdout until the engine closes the input.
pub fn run<S: Strategy>(config: Config, strategy: S) -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    run_with_io(config, strategy, stdin, stdout)
}

/// Runs the bot reading facts from `input` and writing moves to `output`.
///
/// Lines that cannot be decoded or applied are logged and skipped.
pub fn run_with_io<S, R, W>(config: Config, mut strategy: S, input: R, mut output: W) -> Result<()>
where
    S: Strategy,
    R: BufRead,
    W: Write,
{
    let mut state = State::new(config.name);

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                warn!("Skipping line `{line}`: {err}");

                // A move request must always get an answer.
                if line.split_whitespace().next() == Some("Action") {
                    reply(&mut output, &Move::fold(state.name()))?;
                }

                continue;
            }
        };

        let res = match cmd {
            Command::Setting(setting) => {
                state.apply_setting(setting);
                Ok(())
            }
            Command::Match(fact) => state.apply_match(fact),
            Command::Move { actor, fact } => state.apply_move(&actor, fact),
            Command::Action {
                bot,
                time_remaining,
            } => {
                if bot != state.name() {
                    debug!("Move requested for {bot}");
                }

                let m = strategy.execute(&mut state, time_remaining);
                reply(&mut output, &m)?;
                Ok(())
            }
        };

        if let Err(err) = res {
            warn!("Skipping line `{line}`: {err}");
        }
    }

    Ok(())
}

fn reply<W: Write>(output: &mut W, m: &Move) -> Result<()> {
    writeln!(output, "{m}")?;
    output.flush()?;
    Ok(())
}
