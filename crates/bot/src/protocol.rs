// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine protocol types.
//!
//! The engine sends one fact per line as three whitespace separated tokens:
//!
//! ```text
//! Settings your_bot player1
//! Match round 1
//! Match table [Th,9c,3d]
//! player1 hand [Ah,Kd]
//! player2 raise 40
//! Action player1 10000
//! ```
//!
//! Each line is decoded once into a [Command] with typed values, the bot
//! answers an `Action` request with a [Move] line like `call 40`.
use std::{fmt, str::FromStr};

use jeeves_cards::Card;

use crate::BotError;

/// A Poker action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass without betting.
    Check,
    /// Match the amount to call.
    Call,
    /// Raise the bet.
    Raise,
}

impl Action {
    /// The action name used by the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Raise => "raise",
        }
    }

    /// Gets an action from its engine name.
    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "fold" => Some(Action::Fold),
            "check" => Some(Action::Check),
            "call" => Some(Action::Call),
            "raise" => Some(Action::Raise),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An action with its amount made by a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// The player that made the move.
    pub actor: String,
    /// The move action.
    pub action: Action,
    /// The move amount, zero for fold and check.
    pub amount: u32,
}

impl Move {
    /// Creates a new move.
    pub fn new(actor: impl Into<String>, action: Action, amount: u32) -> Self {
        Self {
            actor: actor.into(),
            action,
            amount,
        }
    }

    /// A fold move.
    pub fn fold(actor: impl Into<String>) -> Self {
        Self::new(actor, Action::Fold, 0)
    }

    /// A check move.
    pub fn check(actor: impl Into<String>) -> Self {
        Self::new(actor, Action::Check, 0)
    }
}

/// Formats the move as the engine expects it.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.amount)
    }
}

/// A game setting sent at the start of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// The name the engine uses for this bot.
    YourBot(String),
    /// The maximum time bank in milliseconds.
    TimeBank(u32),
    /// The time added to the time bank for each move.
    TimePerMove(u32),
    /// The number of hands before the blinds increase.
    HandsPerLevel(u32),
    /// The starting stack of each player.
    StartingStack(u32),
}

impl Setting {
    /// Decodes a setting key and value.
    pub fn parse(key: &str, value: &str) -> Result<Self, BotError> {
        let setting = match key {
            "your_bot" => Setting::YourBot(value.to_string()),
            "timebank" => Setting::TimeBank(parse_number(key, value)?),
            "time_per_move" => Setting::TimePerMove(parse_number(key, value)?),
            "hands_per_level" => Setting::HandsPerLevel(parse_number(key, value)?),
            "starting_stack" => Setting::StartingStack(parse_number(key, value)?),
            _ => return Err(unknown_key("settings", key)),
        };

        Ok(setting)
    }
}

/// A fact about the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFact {
    /// A new round starts.
    Round(u32),
    /// The small blind for this round.
    SmallBlind(u32),
    /// The big blind for this round.
    BigBlind(u32),
    /// The name of the player with the button.
    OnButton(String),
    /// The current pot.
    Pot(u32),
    /// The amount this bot has to put in to call.
    AmountToCall(u32),
    /// The shared cards on the table.
    Table(Vec<Card>),
}

impl MatchFact {
    /// Decodes a match key and value.
    pub fn parse(key: &str, value: &str) -> Result<Self, BotError> {
        let fact = match key {
            "round" => MatchFact::Round(parse_number(key, value)?),
            "small_blind" => MatchFact::SmallBlind(parse_number(key, value)?),
            "big_blind" => MatchFact::BigBlind(parse_number(key, value)?),
            "on_button" => MatchFact::OnButton(value.to_string()),
            "max_win_pot" => MatchFact::Pot(parse_number(key, value)?),
            "amount_to_call" => MatchFact::AmountToCall(parse_number(key, value)?),
            "table" => MatchFact::Table(parse_cards(value)?),
            _ => return Err(unknown_key("match", key)),
        };

        Ok(fact)
    }
}

/// A fact about a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFact {
    /// The player stack.
    Stack(u32),
    /// The player posts a blind.
    Post(u32),
    /// The player hole cards.
    Hand(Vec<Card>),
    /// The player wins a pot.
    Wins(u32),
    /// The player made a move.
    Action {
        /// The move action.
        action: Action,
        /// The move amount.
        amount: u32,
    },
}

impl MoveFact {
    /// Decodes a player key and value.
    pub fn parse(actor: &str, key: &str, value: &str) -> Result<Self, BotError> {
        let fact = match key {
            "stack" => MoveFact::Stack(parse_number(key, value)?),
            "post" => MoveFact::Post(parse_number(key, value)?),
            "hand" => MoveFact::Hand(parse_cards(value)?),
            "wins" => MoveFact::Wins(parse_number(key, value)?),
            _ => match Action::from_name(key) {
                Some(action) => MoveFact::Action {
                    action,
                    amount: parse_number(key, value)?,
                },
                None => return Err(unknown_key(actor, key)),
            },
        };

        Ok(fact)
    }
}

/// A decoded engine line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A game setting.
    Setting(Setting),
    /// A round fact.
    Match(MatchFact),
    /// A player fact.
    Move {
        /// The player the fact is about.
        actor: String,
        /// The fact.
        fact: MoveFact,
    },
    /// The engine asks for a move.
    Action {
        /// The bot that should move.
        bot: String,
        /// The time left in the time bank in milliseconds, negative when the
        /// bot is over time.
        time_remaining: i64,
    },
}

impl FromStr for Command {
    type Err = BotError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts = line.split_whitespace().collect::<Vec<_>>();
        let &[namespace, key, value] = parts.as_slice() else {
            return Err(BotError::MalformedLine(line.to_string()));
        };

        let cmd = match namespace {
            "Settings" => Command::Setting(Setting::parse(key, value)?),
            "Match" => Command::Match(MatchFact::parse(key, value)?),
            "Action" => Command::Action {
                bot: key.to_string(),
                time_remaining: parse_number(namespace, value)?,
            },
            actor => Command::Move {
                actor: actor.to_string(),
                fact: MoveFact::parse(actor, key, value)?,
            },
        };

        Ok(cmd)
    }
}

/// Parses a list of cards like `[Ah,Kd]`, the brackets are optional and `[]`
/// is an empty list.
pub fn parse_cards(value: &str) -> Result<Vec<Card>, BotError> {
    let value = value.strip_prefix('[').unwrap_or(value);
    let value = value.strip_suffix(']').unwrap_or(value);

    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|token| token.trim().parse::<Card>().map_err(BotError::from))
        .collect()
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, BotError> {
    value.parse().map_err(|_| BotError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn unknown_key(namespace: &str, key: &str) -> BotError {
    BotError::UnknownKey {
        namespace: namespace.to_string(),
        key: key.to_string(),
    }
}
