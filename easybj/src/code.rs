use strum_macros::{Display, EnumCount, EnumIter};

/// Canonical label of a hand state.
///
/// The soft ace pair and the splittable ace pair are different states that share the
/// display string `AA`; no axis contains both of them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter,
)]
pub enum Code {
    #[strum(to_string = "4")]
    Hard4,
    #[strum(to_string = "5")]
    Hard5,
    #[strum(to_string = "6")]
    Hard6,
    #[strum(to_string = "7")]
    Hard7,
    #[strum(to_string = "8")]
    Hard8,
    #[strum(to_string = "9")]
    Hard9,
    #[strum(to_string = "10")]
    Hard10,
    #[strum(to_string = "11")]
    Hard11,
    #[strum(to_string = "12")]
    Hard12,
    #[strum(to_string = "13")]
    Hard13,
    #[strum(to_string = "14")]
    Hard14,
    #[strum(to_string = "15")]
    Hard15,
    #[strum(to_string = "16")]
    Hard16,
    #[strum(to_string = "17")]
    Hard17,
    #[strum(to_string = "18")]
    Hard18,
    #[strum(to_string = "19")]
    Hard19,
    #[strum(to_string = "20")]
    Hard20,
    #[strum(to_string = "21")]
    Hard21,

    /// Soft 12 (an ace counted as 11 plus an ace counted as 1).
    #[strum(to_string = "AA")]
    SoftAces,
    #[strum(to_string = "A2")]
    SoftA2,
    #[strum(to_string = "A3")]
    SoftA3,
    #[strum(to_string = "A4")]
    SoftA4,
    #[strum(to_string = "A5")]
    SoftA5,
    #[strum(to_string = "A6")]
    SoftA6,
    #[strum(to_string = "A7")]
    SoftA7,
    #[strum(to_string = "A8")]
    SoftA8,
    #[strum(to_string = "A9")]
    SoftA9,

    #[strum(to_string = "22")]
    Pair2,
    #[strum(to_string = "33")]
    Pair3,
    #[strum(to_string = "44")]
    Pair4,
    #[strum(to_string = "55")]
    Pair5,
    #[strum(to_string = "66")]
    Pair6,
    #[strum(to_string = "77")]
    Pair7,
    #[strum(to_string = "88")]
    Pair8,
    #[strum(to_string = "99")]
    Pair9,
    /// Any two ten-valued cards.
    #[strum(to_string = "TT")]
    PairTens,
    #[strum(to_string = "AA")]
    PairAces,

    #[strum(to_string = "BJ")]
    Blackjack,
    #[strum(to_string = "BUST")]
    Bust,
}

use Code::*;

const HARD_BY_TOTAL: [Code; 18] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, Hard21,
];

const SOFT_BY_TOTAL: [Code; 9] = [
    SoftAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6, SoftA7, SoftA8, SoftA9,
];

const PAIR_BY_VALUE: [Code; 10] = [
    Pair2, Pair3, Pair4, Pair5, Pair6, Pair7, Pair8, Pair9, PairTens, PairAces,
];

impl Code {
    /// Hard total in `[4, 21]`.
    pub fn hard(total: u16) -> Option<Code> {
        match total {
            4..=21 => Some(HARD_BY_TOTAL[(total - 4) as usize]),
            _ => None,
        }
    }

    /// Soft total in `[12, 20]`.
    pub fn soft(total: u16) -> Option<Code> {
        match total {
            12..=20 => Some(SOFT_BY_TOTAL[(total - 12) as usize]),
            _ => None,
        }
    }

    /// Pair of cards worth `value` points each, where an ace is worth 11.
    pub fn pair(value: u8) -> Option<Code> {
        match value {
            2..=11 => Some(PAIR_BY_VALUE[(value - 2) as usize]),
            _ => None,
        }
    }

    pub fn is_hard(self) -> bool {
        self <= Hard21
    }

    pub fn is_soft(self) -> bool {
        (SoftAces..=SoftA9).contains(&self)
    }

    pub fn is_pair(self) -> bool {
        (Pair2..=PairAces).contains(&self)
    }

    /// Points used to compare against the dealer. A Blackjack counts as 21 and a busted
    /// hand as 0, so a bust loses every integer comparison.
    pub fn points(self) -> u16 {
        match self {
            Blackjack => 21,
            Bust => 0,
            code if code.is_hard() => code as u16 - Hard4 as u16 + 4,
            code if code.is_soft() => code as u16 - SoftAces as u16 + 12,
            PairAces => 12,
            code => 2 * (code as u16 - Pair2 as u16 + 2),
        }
    }

    /// Collapses a pair to the hard total of its two cards. Every other code maps to itself.
    pub fn split_to_hard(self) -> Code {
        match self {
            PairAces => Hard12,
            code if code.is_pair() => HARD_BY_TOTAL[(code.points() - 4) as usize],
            code => code,
        }
    }

    /// The code under which a pair is looked up when it is played as one hand. The ace pair
    /// stays soft.
    pub fn as_single_hand(self) -> Code {
        match self {
            PairAces => SoftAces,
            code => code.split_to_hard(),
        }
    }

    /// Finds the code displayed as `label` within `axis`.
    pub fn parse_label(axis: &[Code], label: &str) -> Option<Code> {
        axis.iter().copied().find(|code| code.to_string() == label)
    }
}

pub const HARD_CODES: [Code; 17] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20,
];

pub const SOFT_CODES: [Code; 9] = SOFT_BY_TOTAL;

pub const SPLIT_CODES: [Code; 10] = PAIR_BY_VALUE;

/// Pairs that may still be split again after a split.
pub const RESPLIT_CODES: [Code; 9] = [
    Pair2, Pair3, Pair4, Pair5, Pair6, Pair7, Pair8, Pair9, PairTens,
];

/// Every total a player may stand on.
pub const STAND_CODES: [Code; 27] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, Hard21, SoftAces, SoftA2, SoftA3, SoftA4, SoftA5,
    SoftA6, SoftA7, SoftA8, SoftA9,
];

pub const NON_SPLIT_CODES: [Code; 26] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, SoftAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6,
    SoftA7, SoftA8, SoftA9,
];

/// Rows of the optimal EV and strategy tables.
pub const PLAYER_CODES: [Code; 35] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, Pair2, Pair3, Pair4, Pair5, Pair6, Pair7, Pair8,
    Pair9, PairTens, PairAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6, SoftA7, SoftA8, SoftA9,
];

/// Two-card dealer states the player acts against. Dealer soft totals of 18 and above are
/// coded as hard totals.
pub const DEALER_CODES: [Code; 23] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, SoftAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6,
];

pub const INITIAL_DEALER_CODES: [Code; 24] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, SoftAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6,
    Blackjack,
];

/// Two-card player starting codes. Hard 4 is always `22` and hard 20 always `TT`.
pub const INITIAL_PLAYER_CODES: [Code; 34] = [
    Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15, Hard16,
    Hard17, Hard18, Hard19, Pair2, Pair3, Pair4, Pair5, Pair6, Pair7, Pair8, Pair9, PairTens,
    PairAces, SoftA2, SoftA3, SoftA4, SoftA5, SoftA6, SoftA7, SoftA8, SoftA9, Blackjack,
];

/// Rows of the dealer outcome distribution: every dealer state plus a drawn-to 21.
pub const DEALER_ODDS_CODES: [Code; 24] = [
    Hard4, Hard5, Hard6, Hard7, Hard8, Hard9, Hard10, Hard11, Hard12, Hard13, Hard14, Hard15,
    Hard16, Hard17, Hard18, Hard19, Hard20, Hard21, SoftAces, SoftA2, SoftA3, SoftA4, SoftA5,
    SoftA6,
];

/// Final dealer results.
pub const DEALER_OUTCOMES: [Code; 6] = [Bust, Hard17, Hard18, Hard19, Hard20, Hard21];
