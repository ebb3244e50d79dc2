use crate::{Code, Error, Result};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// Number of ranks in a French deck.
pub const NUM_RANKS: u8 = 13;

/// Number of ranks worth 10 points.
pub const NUM_FACES: u8 = 4;

/// Probability of drawing one particular rank. The deck is never depleted, so every draw in
/// the whole computation uses this same weight.
pub const DRAW_WEIGHT: f64 = 1.0 / NUM_RANKS as f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Card {
    #[strum(to_string = "A")]
    Ace,
    #[strum(to_string = "2")]
    Two,
    #[strum(to_string = "3")]
    Three,
    #[strum(to_string = "4")]
    Four,
    #[strum(to_string = "5")]
    Five,
    #[strum(to_string = "6")]
    Six,
    #[strum(to_string = "7")]
    Seven,
    #[strum(to_string = "8")]
    Eight,
    #[strum(to_string = "9")]
    Nine,
    #[strum(to_string = "T")]
    Ten,
    #[strum(to_string = "J")]
    Jack,
    #[strum(to_string = "Q")]
    Queen,
    #[strum(to_string = "K")]
    King,
}

static VALUE_TO_CARD: [Card; 10] = [
    Card::Two,
    Card::Three,
    Card::Four,
    Card::Five,
    Card::Six,
    Card::Seven,
    Card::Eight,
    Card::Nine,
    Card::Ten,
    Card::Ace,
];

impl Card {
    /// Every rank once, in deck order.
    pub const RANKS: [Card; NUM_RANKS as usize] = [
        Card::Ace,
        Card::Two,
        Card::Three,
        Card::Four,
        Card::Five,
        Card::Six,
        Card::Seven,
        Card::Eight,
        Card::Nine,
        Card::Ten,
        Card::Jack,
        Card::Queen,
        Card::King,
    ];

    /// One card of every point value. Used when enumerating starting hands, where each
    /// value is weighted by [`Card::probability`].
    pub const DISTINCT: [Card; 10] = [
        Card::Ace,
        Card::Two,
        Card::Three,
        Card::Four,
        Card::Five,
        Card::Six,
        Card::Seven,
        Card::Eight,
        Card::Nine,
        Card::Ten,
    ];

    /// Point value, with an ace counted as 11.
    pub fn value(self) -> u8 {
        match self {
            Card::Ace => 11,
            Card::Two => 2,
            Card::Three => 3,
            Card::Four => 4,
            Card::Five => 5,
            Card::Six => 6,
            Card::Seven => 7,
            Card::Eight => 8,
            Card::Nine => 9,
            Card::Ten | Card::Jack | Card::Queen | Card::King => 10,
        }
    }

    pub fn is_ten_valued(self) -> bool {
        self.value() == 10
    }

    /// Probability of being dealt a card with this point value.
    pub fn probability(self) -> f64 {
        if self.is_ten_valued() {
            NUM_FACES as f64 / NUM_RANKS as f64
        } else {
            DRAW_WEIGHT
        }
    }

    /// The card worth `value` points (11 for an ace). Ten-valued cards map to `T`.
    pub fn from_value(value: u8) -> Option<Card> {
        match value {
            2..=11 => Some(VALUE_TO_CARD[(value - 2) as usize]),
            _ => None,
        }
    }
}

impl TryFrom<char> for Card {
    type Error = Error;

    fn try_from(value: char) -> Result<Self> {
        let card = match value {
            'A' => Card::Ace,
            '2' => Card::Two,
            '3' => Card::Three,
            '4' => Card::Four,
            '5' => Card::Five,
            '6' => Card::Six,
            '7' => Card::Seven,
            '8' => Card::Eight,
            '9' => Card::Nine,
            'T' => Card::Ten,
            'J' => Card::Jack,
            'Q' => Card::Queen,
            'K' => Card::King,
            _ => return Err(Error::InvalidCard(value.to_string())),
        };
        Ok(card)
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Card::try_from(c),
            _ if s == "10" => Ok(Card::Ten),
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[strum(to_string = "dealer")]
    Dealer,
    #[strum(to_string = "player")]
    Player,
}

/// A blackjack hand. Only the first two cards are kept, which is all that split eligibility
/// needs; the total, soft aces, probability and code are maintained as cards arrive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hand {
    role: Role,
    first_two: [Card; 2],
    number_of_cards: u8,
    total: u16,
    soft_aces: u8,
    probability: f64,
    code: Code,
}

impl Hand {
    pub fn new(card0: Card, card1: Card, role: Role) -> Result<Hand> {
        let mut hand = Hand {
            role,
            first_two: [card0, card1],
            number_of_cards: 0,
            total: 0,
            soft_aces: 0,
            probability: 1.0,
            code: Code::Bust,
        };
        hand.receive(card0);
        hand.receive(card1);
        hand.code = hand.calculate_code()?;
        Ok(hand)
    }

    /// Builds a hand from rank labels such as `"A"`, `"7"` or `"K"`.
    pub fn from_labels(card0: &str, card1: &str, role: Role) -> Result<Hand> {
        Hand::new(card0.parse()?, card1.parse()?, role)
    }

    /// Adds a card and recomputes the code.
    pub fn add_card(&mut self, card: Card) -> Result<()> {
        self.receive(card);
        self.code = self.calculate_code()?;
        Ok(())
    }

    /// The hand after drawing `card`, leaving `self` untouched.
    pub fn with_card(mut self, card: Card) -> Result<Hand> {
        self.add_card(card)?;
        Ok(self)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn total(&self) -> u16 {
        self.total
    }

    pub fn soft_aces(&self) -> u8 {
        self.soft_aces
    }

    pub fn number_of_cards(&self) -> u8 {
        self.number_of_cards
    }

    /// Product of the single-draw probabilities of every card in the hand.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_blackjack(&self) -> bool {
        self.number_of_cards == 2 && self.total == 21
    }

    pub fn is_bust(&self) -> bool {
        self.total > 21
    }

    /// Two cards of the same rank, or two ten-valued cards.
    pub fn can_split(&self) -> bool {
        let [card0, card1] = self.first_two;
        self.number_of_cards == 2
            && (card0 == card1 || (card0.is_ten_valued() && card1.is_ten_valued()))
    }

    fn receive(&mut self, card: Card) {
        self.number_of_cards += 1;
        self.probability *= card.probability();
        if card == Card::Ace {
            if self.total + 11 > 21 {
                self.total += 1;
            } else {
                self.total += 11;
                self.soft_aces += 1;
            }
        } else {
            self.total += card.value() as u16;
        }

        while self.total > 21 && self.soft_aces > 0 {
            self.total -= 10;
            self.soft_aces -= 1;
        }
    }

    // Precedence: Blackjack > Bust > pair > soft > hard.
    fn calculate_code(&self) -> Result<Code> {
        if self.is_blackjack() {
            return Ok(Code::Blackjack);
        }
        if self.is_bust() {
            return Ok(Code::Bust);
        }

        let code = if self.can_split() && self.role == Role::Player {
            Code::pair(self.first_two[0].value())
        } else if self.soft_aces > 0 && self.total < 21 {
            // A dealer ace pair is soft 12, which is already the soft `AA` code.
            if self.role == Role::Dealer && self.total >= 18 {
                Code::hard(self.total)
            } else {
                Code::soft(self.total)
            }
        } else {
            Code::hard(self.total)
        };

        code.ok_or(Error::UnencodableHand {
            role: self.role,
            cards: self.number_of_cards,
            total: self.total,
            soft_aces: self.soft_aces,
        })
    }
}

/// A concrete two-card hand with the given code.
pub fn representative_hand(code: Code) -> Result<(Card, Card)> {
    let points = code.points();
    let cards = if code.is_pair() || code == Code::SoftAces {
        let card = match code {
            Code::PairAces | Code::SoftAces => Some(Card::Ace),
            pair => Card::from_value((pair.points() / 2) as u8),
        };
        card.map(|card| (card, card))
    } else if code.is_soft() {
        Card::from_value((points - 11) as u8).map(|card| (Card::Ace, card))
    } else if code.is_hard() && code != Code::Hard21 {
        let low = points / 2;
        Card::from_value(low as u8).zip(Card::from_value((points - low) as u8))
    } else {
        None
    };

    cards.ok_or(Error::NoRepresentative(code))
}

/// The representative hand of `code`, dealt to `role`.
pub fn representative(code: Code, role: Role) -> Result<Hand> {
    let (card0, card1) = representative_hand(code)?;
    Hand::new(card0, card1, role)
}
