//! Plays rounds against a shoe, so that a strategy chart can be checked by sampling.
//!
//! The dealer is dealt two cards first, then the player. A round ends at once if either side
//! has a Blackjack. Otherwise every player hand is played in order, hands created by a split
//! are appended and played after the current one, and the dealer draws to 17, hitting a soft
//! 17, unless no hand is left in play.

pub mod hand;
pub mod shoe;
pub mod strategy;

use crate::calculation::BLACKJACK_PAYOUT;
use crate::strategy::SURRENDER_EV;
use crate::{Decision, Error, Result, Role};
use hand::PlayedHand;
use shoe::Shoe;
use std::cmp::Ordering;
use std::fmt;
use strategy::Strategy;
use tracing::trace;

/// Splitting stops once the player holds this many hands.
pub const MAX_HANDS: usize = 4;

/// The hands of one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub dealer: PlayedHand,
    pub hands: Vec<PlayedHand>,
}

impl Game {
    /// Net winnings of the round in units of the initial stake.
    pub fn result(&self) -> f64 {
        self.hands
            .iter()
            .map(|hand| settle(hand, &self.dealer))
            .sum()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dealer: {}", self.dealer)?;
        for (i, hand) in self.hands.iter().enumerate() {
            writeln!(f, "Hand {}: {}", i + 1, hand)?;
        }
        Ok(())
    }
}

pub trait SimulatorEventHandler {
    fn on_game_begin(&mut self, _game_id: u64) {}
    fn on_game_early_end(&mut self, _game: &Game) {}
    fn on_make_decision(&mut self, _decision: Decision, _hand_index: usize) {}
    fn on_summary_game(&mut self, _game: &Game, _result: f64, _balance: f64) {}
}

/// Ignores every event.
impl SimulatorEventHandler for () {}

/// The decisions open to `hand` while the player holds `number_of_hands` hands. Once a hand
/// has been hit only standing and hitting remain, and a hand made by splitting may not
/// surrender.
pub fn allowed_decisions(hand: &PlayedHand, number_of_hands: usize) -> Vec<Decision> {
    let mut allowed = vec![Decision::Stand, Decision::Hit];
    if hand.is_dirty() {
        return allowed;
    }
    allowed.push(Decision::Double);
    if hand.can_split() && number_of_hands < MAX_HANDS {
        allowed.push(Decision::Split);
    }
    if !hand.is_from_split() {
        allowed.push(Decision::Surrender);
    }
    allowed
}

/// Net winnings of `hand` against the finished dealer hand.
pub fn settle(hand: &PlayedHand, dealer: &PlayedHand) -> f64 {
    let bet = hand.bet();
    if hand.is_surrendered() {
        SURRENDER_EV * bet
    } else if hand.is_bust() {
        -bet
    } else if hand.is_blackjack() && dealer.is_blackjack() {
        0.0
    } else if hand.is_blackjack() {
        BLACKJACK_PAYOUT * bet
    } else if dealer.is_blackjack() {
        -bet
    } else if dealer.is_bust() {
        bet
    } else {
        match hand.total().cmp(&dealer.total()) {
            Ordering::Greater => bet,
            Ordering::Less => -bet,
            Ordering::Equal => 0.0,
        }
    }
}

/// Deals rounds from a shoe and keeps the running balance.
#[derive(Debug, Clone)]
pub struct Simulator<S: Shoe> {
    shoe: S,
    games_played: u64,
    balance: f64,
}

impl<S: Shoe> Simulator<S> {
    pub fn new(shoe: S) -> Simulator<S> {
        Simulator {
            shoe,
            games_played: 0,
            balance: 0.0,
        }
    }

    pub fn shoe(&self) -> &S {
        &self.shoe
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Mean winnings per round so far.
    pub fn average_return(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.balance / self.games_played as f64
        }
    }

    /// Plays one round. A failed round, such as one with a decision outside the allowed set,
    /// is not counted and leaves the balance untouched.
    pub fn play_game<T, U>(&mut self, strategy: &mut T, handler: &mut U) -> Result<Game>
    where
        T: Strategy + ?Sized,
        U: SimulatorEventHandler + ?Sized,
    {
        let game_id = self.games_played + 1;
        handler.on_game_begin(game_id);

        let dealer = PlayedHand::deal(&mut self.shoe, Role::Dealer)?;
        let player = PlayedHand::deal(&mut self.shoe, Role::Player)?;
        let mut game = Game {
            dealer,
            hands: vec![player],
        };

        if game.hands[0].is_blackjack() || game.dealer.is_blackjack() {
            handler.on_game_early_end(&game);
        } else {
            self.play_hands(&mut game, strategy, handler)?;
            if game.hands.iter().any(PlayedHand::is_live) {
                self.dealer_plays(&mut game.dealer)?;
            }
        }

        let result = game.result();
        self.games_played = game_id;
        self.balance += result;
        trace!(game = game_id, result, balance = self.balance, "game finished");
        handler.on_summary_game(&game, result, self.balance);
        Ok(game)
    }

    fn play_hands<T, U>(
        &mut self,
        game: &mut Game,
        strategy: &mut T,
        handler: &mut U,
    ) -> Result<()>
    where
        T: Strategy + ?Sized,
        U: SimulatorEventHandler + ?Sized,
    {
        let mut i = 0;
        while i < game.hands.len() {
            while game.hands[i].is_active() {
                let allowed = allowed_decisions(&game.hands[i], game.hands.len());
                let decision = strategy.make_decision(&game.hands[i], &game.dealer, &allowed)?;
                if !allowed.contains(&decision) {
                    return Err(Error::IllegalDecision {
                        decision,
                        code: game.hands[i].code(),
                    });
                }
                handler.on_make_decision(decision, i);

                let hand = &mut game.hands[i];
                match decision {
                    Decision::Stand => hand.stand(),
                    Decision::Hit => hand.hit(&mut self.shoe)?,
                    Decision::Double => hand.double(&mut self.shoe)?,
                    Decision::Surrender => hand.surrender(),
                    Decision::Split => {
                        let other = hand.split(&mut self.shoe)?;
                        game.hands.push(other);
                    }
                }
            }
            i += 1;
        }
        Ok(())
    }

    fn dealer_plays(&mut self, dealer: &mut PlayedHand) -> Result<()> {
        while dealer.total() < 17 || (dealer.total() == 17 && dealer.is_soft()) {
            dealer.receive(self.shoe.deal_card()?)?;
        }
        Ok(())
    }
}
