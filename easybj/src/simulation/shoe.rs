use crate::{Card, Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

/// Source of the cards dealt during a game.
pub trait Shoe {
    fn deal_card(&mut self) -> Result<Card>;
}

/// An infinite deck: every rank is equally likely on every draw, whatever was dealt before.
#[derive(Debug, Clone)]
pub struct RandomShoe {
    rng: StdRng,
    record: Option<Vec<Card>>,
}

impl RandomShoe {
    pub fn with_seed(seed: u64) -> RandomShoe {
        RandomShoe {
            rng: StdRng::seed_from_u64(seed),
            record: None,
        }
    }

    pub fn from_entropy() -> RandomShoe {
        RandomShoe {
            rng: StdRng::from_entropy(),
            record: None,
        }
    }

    /// Keeps every dealt card, so the session can be replayed with a [`ListShoe`].
    pub fn recording(mut self) -> RandomShoe {
        self.record = Some(Vec::new());
        self
    }

    pub fn recorded(&self) -> Option<&[Card]> {
        self.record.as_deref()
    }
}

impl Shoe for RandomShoe {
    fn deal_card(&mut self) -> Result<Card> {
        let card = Card::RANKS[self.rng.gen_range(0..Card::RANKS.len())];
        if let Some(record) = &mut self.record {
            record.push(card);
        }
        Ok(card)
    }
}

/// A fixed sequence of cards, dealt in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListShoe {
    cards: Vec<Card>,
    next: usize,
}

impl ListShoe {
    pub fn new(cards: Vec<Card>) -> ListShoe {
        ListShoe { cards, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

impl Shoe for ListShoe {
    fn deal_card(&mut self) -> Result<Card> {
        let card = self
            .cards
            .get(self.next)
            .copied()
            .ok_or(Error::ShoeExhausted(self.cards.len()))?;
        self.next += 1;
        Ok(card)
    }
}

/// Parses whitespace-separated rank labels, e.g. `"A 7 T K 10"`.
impl FromStr for ListShoe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let cards = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Card>>>()?;
        Ok(ListShoe::new(cards))
    }
}

/// Writes cards in the format [`ListShoe`] parses.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
