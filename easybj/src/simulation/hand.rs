use super::shoe::Shoe;
use crate::{Card, Code, Hand, Result, Role};
use std::fmt;

/// A hand on the table: the cards as dealt, its stake and what has been done with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedHand {
    hand: Hand,
    cards: Vec<Card>,
    bet: f64,
    from_split: bool,
    dirty: bool,
    done: bool,
    surrendered: bool,
}

impl PlayedHand {
    pub fn new(card0: Card, card1: Card, role: Role) -> Result<PlayedHand> {
        Ok(PlayedHand {
            hand: Hand::new(card0, card1, role)?,
            cards: vec![card0, card1],
            bet: 1.0,
            from_split: false,
            dirty: false,
            done: false,
            surrendered: false,
        })
    }

    pub fn deal<S: Shoe + ?Sized>(shoe: &mut S, role: Role) -> Result<PlayedHand> {
        let card0 = shoe.deal_card()?;
        let card1 = shoe.deal_card()?;
        PlayedHand::new(card0, card1, role)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn code(&self) -> Code {
        self.hand.code()
    }

    pub fn total(&self) -> u16 {
        self.hand.total()
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn is_soft(&self) -> bool {
        self.hand.soft_aces() > 0 && !self.is_bust() && !self.is_blackjack()
    }

    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// A two-card 21 that was not made by splitting.
    pub fn is_blackjack(&self) -> bool {
        !self.from_split && self.hand.is_blackjack()
    }

    pub fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Hit at least once, so only standing and hitting remain.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_doubled(&self) -> bool {
        self.bet > 1.0
    }

    pub fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    pub fn can_split(&self) -> bool {
        self.hand.can_split()
    }

    /// Split aces get exactly one card each and are never played.
    pub fn is_from_ace_split(&self) -> bool {
        self.from_split && self.cards[0] == Card::Ace
    }

    /// The player still has a decision to make on this hand.
    pub fn is_active(&self) -> bool {
        !self.is_bust() && self.total() != 21 && !self.done && !self.is_from_ace_split()
    }

    /// Still in play when the dealer draws.
    pub fn is_live(&self) -> bool {
        !self.is_bust() && !self.is_blackjack() && !self.surrendered
    }

    /// The strategy chart row of this hand. A pair that may not be split is looked up by its
    /// hard total, which for two aces is hard 12.
    pub fn chart_row(&self, split_allowed: bool) -> Code {
        match self.code() {
            code if code.is_pair() && split_allowed => code,
            Code::SoftAces => Code::Hard12,
            code => code.split_to_hard(),
        }
    }

    pub(crate) fn receive(&mut self, card: Card) -> Result<()> {
        self.hand.add_card(card)?;
        self.cards.push(card);
        Ok(())
    }

    pub(crate) fn stand(&mut self) {
        self.done = true;
    }

    pub(crate) fn hit<S: Shoe + ?Sized>(&mut self, shoe: &mut S) -> Result<()> {
        self.receive(shoe.deal_card()?)?;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn double<S: Shoe + ?Sized>(&mut self, shoe: &mut S) -> Result<()> {
        self.bet *= 2.0;
        self.hit(shoe)?;
        self.stand();
        Ok(())
    }

    pub(crate) fn surrender(&mut self) {
        self.surrendered = true;
        self.done = true;
    }

    /// Splits off the second card into a new hand. This hand draws its second card first,
    /// then the new hand draws.
    pub(crate) fn split<S: Shoe + ?Sized>(&mut self, shoe: &mut S) -> Result<PlayedHand> {
        let (kept, moved) = (self.cards[0], self.cards[1]);
        let bet = self.bet;
        *self = PlayedHand::new(kept, shoe.deal_card()?, Role::Player)?;
        self.from_split = true;
        self.bet = bet;

        let mut other = PlayedHand::new(moved, shoe.deal_card()?, Role::Player)?;
        other.from_split = true;
        other.bet = bet;
        Ok(other)
    }
}

/// Prints the cards, then the total, then the stake changes, e.g. `A 6 (soft 17) DOUBLE`.
impl fmt::Display for PlayedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{} ", card)?;
        }
        if self.is_blackjack() {
            write!(f, "(blackjack)")?;
        } else if self.is_bust() {
            write!(f, "(bust)")?;
        } else if self.is_soft() {
            write!(f, "(soft {})", self.total())?;
        } else {
            write!(f, "({})", self.total())?;
        }
        if self.is_doubled() {
            write!(f, " DOUBLE")?;
        }
        if self.surrendered {
            write!(f, " SURRENDER")?;
        }
        Ok(())
    }
}
