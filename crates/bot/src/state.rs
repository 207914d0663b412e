// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot game state.
use log::{debug, info};

use jeeves_cards::{Card, Deck};
use jeeves_eval::HandCategory;

use crate::{
    BotError,
    hand::{Hand, classify},
    outs::Outs,
    protocol::{MatchFact, Move, MoveFact, Setting},
};

/// The match settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// This bot name.
    pub name: String,
    /// The maximum time bank in milliseconds.
    pub time_bank: u32,
    /// The time added to the time bank for each move.
    pub time_per_move: u32,
    /// The number of hands before the blinds increase.
    pub hands_per_level: u32,
    /// The starting stack of each player.
    pub starting_stack: u32,
}

impl Settings {
    fn new(name: String) -> Self {
        Self {
            name,
            time_bank: 0,
            time_per_move: 0,
            hands_per_level: 0,
            starting_stack: 0,
        }
    }
}

/// The state of the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    /// The round number.
    pub round: u32,
    /// The small blind.
    pub small_blind: u32,
    /// The big blind.
    pub big_blind: u32,
    /// This bot stack.
    pub my_stack: u32,
    /// The opponent stack.
    pub opponent_stack: u32,
    /// The current pot.
    pub pot: u32,
    /// This bot has the button.
    pub on_button: bool,
    /// The amount to put in to call.
    pub amount_to_call: u32,
    /// The last opponent move in this round.
    pub opponent_move: Option<Move>,
    /// This bot hole cards.
    pub hand: Option<Hand>,
    /// The shared cards.
    pub shared: Vec<Card>,
}

impl RoundState {
    /// The street is the number of shared cards: 0, 3, 4, or 5.
    pub fn street(&self) -> usize {
        self.shared.len()
    }
}

/// The bot view of the game, updated by the engine facts.
#[derive(Debug)]
pub struct State {
    settings: Settings,
    round: RoundState,
    /// The outs for the street they were computed on.
    outs: Option<(usize, Outs)>,
    /// The last move fact, to skip it if it is sent again.
    last_move: Option<(String, MoveFact)>,
}

impl State {
    /// Creates a state for a bot with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            settings: Settings::new(name.into()),
            round: RoundState::default(),
            outs: None,
            last_move: None,
        }
    }

    /// The match settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current round state.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// This bot name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Updates a setting from its key and value.
    pub fn update_setting(&mut self, key: &str, value: &str) -> Result<(), BotError> {
        let setting = Setting::parse(key, value)?;
        self.apply_setting(setting);
        Ok(())
    }

    /// Updates a round fact from its key and value.
    pub fn update_match(&mut self, key: &str, value: &str) -> Result<(), BotError> {
        let fact = MatchFact::parse(key, value)?;
        self.apply_match(fact)
    }

    /// Updates a player fact from its key and value.
    pub fn update_move(&mut self, actor: &str, key: &str, value: &str) -> Result<(), BotError> {
        let fact = MoveFact::parse(actor, key, value)?;
        self.apply_move(actor, fact)
    }

    /// Applies a setting.
    pub fn apply_setting(&mut self, setting: Setting) {
        self.last_move = None;

        match setting {
            Setting::YourBot(name) => self.settings.name = name,
            Setting::TimeBank(ms) => self.settings.time_bank = ms,
            Setting::TimePerMove(ms) => self.settings.time_per_move = ms,
            Setting::HandsPerLevel(hands) => self.settings.hands_per_level = hands,
            Setting::StartingStack(chips) => {
                self.settings.starting_stack = chips;
                self.round.my_stack = chips;
                self.round.opponent_stack = chips;
            }
        }
    }

    /// Applies a round fact.
    ///
    /// A table fact that would remove or replace shared cards, or that has a
    /// number of cards that is not a street, is rejected and the shared cards
    /// are left unchanged.
    pub fn apply_match(&mut self, fact: MatchFact) -> Result<(), BotError> {
        self.last_move = None;

        match fact {
            MatchFact::Round(round) => {
                self.reset_round();
                self.round.round = round;
                info!("Round {round}");
            }
            MatchFact::SmallBlind(chips) => self.round.small_blind = chips,
            MatchFact::BigBlind(chips) => self.round.big_blind = chips,
            MatchFact::OnButton(name) => self.round.on_button = name == self.settings.name,
            MatchFact::Pot(chips) => self.round.pot = chips,
            MatchFact::AmountToCall(chips) => self.round.amount_to_call = chips,
            MatchFact::Table(cards) => self.set_shared(cards)?,
        }

        Ok(())
    }

    /// Applies a player fact.
    ///
    /// Facts about other players only track their stacks and their last move,
    /// a fact equal to the previous one is skipped.
    pub fn apply_move(&mut self, actor: &str, fact: MoveFact) -> Result<(), BotError> {
        if self
            .last_move
            .as_ref()
            .is_some_and(|(a, f)| a == actor && f == &fact)
        {
            debug!("Skipping repeated fact {actor} {fact:?}");
            return Ok(());
        }

        let mine = actor == self.settings.name;
        match &fact {
            MoveFact::Stack(chips) if mine => self.round.my_stack = *chips,
            MoveFact::Stack(chips) => self.round.opponent_stack = *chips,
            MoveFact::Post(chips) if mine => {
                self.round.my_stack = self.round.my_stack.saturating_sub(*chips);
            }
            MoveFact::Post(chips) => {
                self.round.opponent_stack = self.round.opponent_stack.saturating_sub(*chips);
            }
            MoveFact::Hand(cards) if mine => self.set_hand(Hand::from_cards(cards)?)?,
            MoveFact::Hand(cards) => debug!("{actor} shows {cards:?}"),
            MoveFact::Wins(chips) => debug!("{actor} wins {chips}"),
            MoveFact::Action { action, amount } if mine => {
                debug!("{actor} {action} {amount}");
            }
            MoveFact::Action { action, amount } => {
                self.round.opponent_move = Some(Move::new(actor, *action, *amount));
            }
        }

        self.last_move = Some((actor.to_string(), fact));
        Ok(())
    }

    /// The street number, same as the number of shared cards.
    pub fn street(&self) -> usize {
        self.round.street()
    }

    /// Classifies this bot hand with the shared cards.
    pub fn category(&self) -> Result<HandCategory, BotError> {
        let hand = self.round.hand.as_ref().ok_or(BotError::MissingHand)?;
        classify(hand, &self.round.shared)
    }

    /// Gets the outs for the current street, computing them if needed.
    pub fn outs(&mut self) -> Result<&Outs, BotError> {
        let street = self.street();
        let (_, outs) = match self.outs.take() {
            Some((s, outs)) if s == street => self.outs.insert((s, outs)),
            _ => {
                let hand = self.round.hand.as_ref().ok_or(BotError::MissingHand)?;
                let outs = Outs::compute(hand, &self.round.shared)?;
                self.outs.insert((street, outs))
            }
        };

        Ok(outs)
    }

    /// The number of outs, -1 preflop and on the river where outs are not
    /// defined.
    pub fn number_of_outs(&mut self) -> Result<i32, BotError> {
        if matches!(self.street(), 0 | 5) {
            return Ok(-1);
        }

        Ok(self.outs()?.count() as i32)
    }

    /// The pot to call ratio, or `None` if there is nothing to call.
    pub fn pot_odds(&self) -> Option<f64> {
        (self.round.amount_to_call > 0)
            .then(|| f64::from(self.round.pot) / f64::from(self.round.amount_to_call))
    }

    /// The number of cards this bot hasn't seen.
    pub fn remaining_cards(&self) -> usize {
        let hole = self.round.hand.map_or(0, |h| h.cards().len());
        Deck::SIZE - self.round.shared.len() - hole
    }

    fn reset_round(&mut self) {
        let round = &mut self.round;
        round.small_blind = 0;
        round.big_blind = 0;
        round.pot = 0;
        round.amount_to_call = 0;
        round.opponent_move = None;
        round.hand = None;
        round.shared.clear();

        self.outs = None;
        self.last_move = None;
    }

    fn set_hand(&mut self, hand: Hand) -> Result<(), BotError> {
        if let Some(card) = hand.cards().iter().find(|c| self.round.shared.contains(c)) {
            return Err(BotError::DuplicateCard(*card));
        }

        if self.round.hand != Some(hand) {
            self.round.hand = Some(hand);
            self.outs = None;
        }

        Ok(())
    }

    fn set_shared(&mut self, cards: Vec<Card>) -> Result<(), BotError> {
        let (from, to) = (self.round.shared.len(), cards.len());
        // Within a round cards are only added to the table.
        if !matches!(to, 0 | 3 | 4 | 5) || to < from || !cards.starts_with(&self.round.shared)
        {
            return Err(BotError::InvalidTable { from, to });
        }

        for (idx, card) in cards.iter().enumerate() {
            let in_hand = self.round.hand.is_some_and(|h| h.contains(*card));
            if in_hand || cards[..idx].contains(card) {
                return Err(BotError::DuplicateCard(*card));
            }
        }

        if self.round.shared != cards {
            self.round.shared = cards;
            self.outs = None;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Action, parse_cards};

    fn new_state() -> State {
        let mut state = State::new("Jeeves");
        state.update_setting("your_bot", "player1").unwrap();
        state.update_setting("starting_stack", "2000").unwrap();
        state.update_match("round", "1").unwrap();
        state
    }

    #[test]
    fn settings() {
        let mut state = State::new("Jeeves");
        assert_eq!(state.name(), "Jeeves");

        state.update_setting("your_bot", "player1").unwrap();
        state.update_setting("timebank", "5000").unwrap();
        state.update_setting("time_per_move", "500").unwrap();
        state.update_setting("hands_per_level", "10").unwrap();
        state.update_setting("starting_stack", "2000").unwrap();

        let settings = state.settings();
        assert_eq!(settings.name, "player1");
        assert_eq!(settings.time_bank, 5000);
        assert_eq!(settings.time_per_move, 500);
        assert_eq!(settings.hands_per_level, 10);
        assert_eq!(state.round().my_stack, 2000);
        assert_eq!(state.round().opponent_stack, 2000);

        let before = state.settings().clone();
        assert!(state.update_setting("colour", "blue").is_err());
        assert_eq!(state.settings(), &before);
    }

    #[test]
    fn round_facts() {
        let mut state = new_state();

        state.update_match("small_blind", "10").unwrap();
        state.update_match("big_blind", "20").unwrap();
        state.update_match("on_button", "player1").unwrap();
        state.update_match("max_win_pot", "30").unwrap();
        state.update_match("amount_to_call", "10").unwrap();
        state.update_move("player1", "post", "10").unwrap();
        state.update_move("player2", "post", "20").unwrap();
        state.update_move("player1", "hand", "[Ah,Kd]").unwrap();
        state.update_move("player2", "raise", "40").unwrap();

        let round = state.round();
        assert_eq!(round.round, 1);
        assert_eq!(round.small_blind, 10);
        assert_eq!(round.big_blind, 20);
        assert!(round.on_button);
        assert_eq!(round.pot, 30);
        assert_eq!(round.amount_to_call, 10);
        assert_eq!(round.my_stack, 1990);
        assert_eq!(round.opponent_stack, 1980);
        assert_eq!(round.hand.unwrap().to_string(), "[Ah,Kd]");
        assert_eq!(
            round.opponent_move,
            Some(Move::new("player2", Action::Raise, 40))
        );

        state.update_match("on_button", "player2").unwrap();
        assert!(!state.round().on_button);

        // Opponent cards at showdown and own moves are not tracked.
        state.update_move("player2", "hand", "[2c,2d]").unwrap();
        state.update_move("player1", "call", "40").unwrap();
        assert_eq!(state.round().hand.unwrap().to_string(), "[Ah,Kd]");
        assert_eq!(
            state.round().opponent_move,
            Some(Move::new("player2", Action::Raise, 40))
        );
    }

    #[test]
    fn round_reset() {
        let mut state = new_state();
        state.update_match("max_win_pot", "30").unwrap();
        state.update_match("amount_to_call", "10").unwrap();
        state.update_move("player1", "hand", "[Ah,Kd]").unwrap();
        state.update_move("player2", "call", "10").unwrap();
        state.update_match("table", "[2h,7h,9c]").unwrap();
        assert!(state.number_of_outs().unwrap() >= 0);

        state.update_match("round", "2").unwrap();

        let round = state.round();
        assert_eq!(round.round, 2);
        assert_eq!(state.street(), 0);
        assert_eq!(round.pot, 0);
        assert_eq!(round.amount_to_call, 0);
        assert!(round.hand.is_none());
        assert!(round.shared.is_empty());
        assert!(round.opponent_move.is_none());
        assert!(state.outs.is_none());
        assert_eq!(round.my_stack, 2000);
    }

    #[test]
    fn repeated_facts() {
        let mut state = new_state();
        let facts = [
            ("Match", "small_blind", "10"),
            ("Match", "table", "[]"),
            ("player1", "post", "10"),
            ("player2", "post", "20"),
            ("player1", "hand", "[Ah,Kd]"),
            ("Match", "table", "[2h,7h,9c]"),
            ("player2", "check", "0"),
            ("player1", "stack", "1500"),
            ("Match", "round", "2"),
        ];

        for (namespace, key, value) in facts {
            let apply = |state: &mut State| match namespace {
                "Match" => state.update_match(key, value),
                actor => state.update_move(actor, key, value),
            };

            apply(&mut state).unwrap();
            let once = (state.settings().clone(), state.round().clone());
            let outs_once = state.number_of_outs();

            apply(&mut state).unwrap();
            assert_eq!((state.settings().clone(), state.round().clone()), once);
            assert_eq!(state.number_of_outs(), outs_once);
        }
    }

    #[test]
    fn table_updates() {
        let mut state = new_state();
        state.update_move("player1", "hand", "[Ah,Kh]").unwrap();

        state.update_match("table", "[2h,7h,9c]").unwrap();
        assert_eq!(state.street(), 3);

        // A bad token leaves the previous cards.
        assert!(matches!(
            state.update_match("table", "[2h,7h,9c,Zz]"),
            Err(BotError::Card(_))
        ));
        assert_eq!(state.street(), 3);

        // Streets don't go backwards and have 0, 3, 4, or 5 cards.
        assert_eq!(
            state.update_match("table", "[2h,7h]"),
            Err(BotError::InvalidTable { from: 3, to: 2 })
        );
        assert_eq!(
            state.update_match("table", "[]"),
            Err(BotError::InvalidTable { from: 3, to: 0 })
        );

        // Cards already on the table must stay.
        assert_eq!(
            state.update_match("table", "[9s,8s,7s,6s]"),
            Err(BotError::InvalidTable { from: 3, to: 4 })
        );
        assert_eq!(
            state.update_match("table", "[2h,9c,7h,Jd]"),
            Err(BotError::InvalidTable { from: 3, to: 4 })
        );
        assert_eq!(
            state.update_match("table", "[2h,7h,3c]"),
            Err(BotError::InvalidTable { from: 3, to: 3 })
        );
        assert_eq!(state.round().shared, parse_cards("[2h,7h,9c]").unwrap());

        // Cards already visible.
        assert!(matches!(
            state.update_match("table", "[2h,7h,9c,Ah]"),
            Err(BotError::DuplicateCard(_))
        ));
        assert!(matches!(
            state.update_match("table", "[2h,7h,9c,9c]"),
            Err(BotError::DuplicateCard(_))
        ));
        assert_eq!(state.street(), 3);

        state.update_match("table", "[2h,7h,9c,Jd]").unwrap();
        assert_eq!(state.street(), 4);
        state.update_match("table", "[2h,7h,9c,Jd,3s]").unwrap();
        assert_eq!(state.street(), 5);
    }

    #[test]
    fn outs_memo() {
        let mut state = new_state();
        assert_eq!(state.number_of_outs(), Ok(-1));
        assert_eq!(state.outs().map(|o| o.is_empty()), Err(BotError::MissingHand));

        state.update_move("player1", "hand", "[Ah,Kh]").unwrap();
        assert_eq!(state.number_of_outs(), Ok(-1));

        state.update_match("table", "[2h,7h,9c]").unwrap();
        assert_eq!(state.number_of_outs(), Ok(9));
        assert!(matches!(state.outs, Some((3, _))));

        // Fetch from the memo.
        assert_eq!(state.number_of_outs(), Ok(9));

        // A new card clears the memo.
        state.update_match("table", "[2h,7h,9c,Jd]").unwrap();
        assert!(state.outs.is_none());
        assert_eq!(state.number_of_outs(), Ok(9));
        assert!(matches!(state.outs, Some((4, _))));

        state.update_match("table", "[2h,7h,9c,Jd,3s]").unwrap();
        assert_eq!(state.number_of_outs(), Ok(-1));
    }

    #[test]
    fn derived_reads() {
        let mut state = new_state();
        assert_eq!(state.remaining_cards(), 52);
        assert_eq!(state.pot_odds(), None);
        assert_eq!(state.category(), Err(BotError::MissingHand));

        state.update_match("max_win_pot", "60").unwrap();
        state.update_match("amount_to_call", "20").unwrap();
        assert_eq!(state.pot_odds(), Some(3.0));

        state.update_move("player1", "hand", "[Ah,Ad]").unwrap();
        assert_eq!(state.remaining_cards(), 50);
        assert_eq!(state.category(), Ok(HandCategory::Pair));

        state.update_match("table", "[As,7h,9c]").unwrap();
        assert_eq!(state.remaining_cards(), 47);
        assert_eq!(state.category(), Ok(HandCategory::ThreeOfAKind));
    }

    #[test]
    fn own_hand_needs_two_cards() {
        let mut state = new_state();
        assert_eq!(
            state.update_move("player1", "hand", "[Ah]"),
            Err(BotError::InvalidHand(1))
        );
        assert!(state.round().hand.is_none());
    }
}
