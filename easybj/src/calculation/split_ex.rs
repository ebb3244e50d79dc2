//! Expectations of splitting a pair, bounded by how many further splits are allowed.
//!
//! After a split each hand holds one card of the pair plus a fresh draw. A post-split
//! Blackjack only counts as 21, and a post-split pair is played as its hard total unless
//! the layer above allows it to be split again.

use super::stand_hit_ex::{DoubleEv, HitEv, StandEv};
use super::util::build_by_columns;
use crate::code::{Code, DEALER_CODES, RESPLIT_CODES, SPLIT_CODES, STAND_CODES};
use crate::hand::{representative_hand, Hand, Role, DRAW_WEIGHT};
use crate::{Card, Result, Table};
use strum::IntoEnumIterator;
use tracing::debug;

phase_table!(
    /// Best of stand, hit and double for a hand that cannot be split again.
    SplitEv0,
    f64
);

phase_table!(
    /// Splitting a pair with no further resplits.
    SplitEv1,
    f64
);

phase_table!(
    /// Splitting a pair where one of the two hands may be split once more.
    SplitEv2,
    f64
);

phase_table!(
    /// Splitting a pair with up to two further splits. This is the player-facing split
    /// expectation.
    SplitEv3,
    f64
);

const SPLIT_EV_0: &str = "Split EV 0";
const SPLIT_EV_1: &str = "Split EV 1";
const SPLIT_EV_2: &str = "Split EV 2";
const SPLIT_EV_3: &str = "Split EV 3";

const DOUBLE_DRAW_WEIGHT: f64 = DRAW_WEIGHT * DRAW_WEIGHT;

/// The code a post-split hand is played as when it cannot be split again.
fn resolve(hand: &Hand) -> Code {
    if hand.is_blackjack() {
        Code::Hard21
    } else {
        hand.code().split_to_hard()
    }
}

/// Both post-split hands for every pair of draws, with the weight of that combination.
fn post_split_hands(pair: Code) -> Result<Vec<(Hand, Hand)>> {
    let (card, _) = representative_hand(pair)?;
    let mut hands = Vec::with_capacity(169);
    for draw0 in Card::iter() {
        let hand0 = Hand::new(card, draw0, Role::Player)?;
        for draw1 in Card::iter() {
            hands.push((hand0, Hand::new(card, draw1, Role::Player)?));
        }
    }
    Ok(hands)
}

/// Expectation of one post-split hand that is not split again together with its sibling.
/// A pair is looked up in `pair_ev`.
fn post_split_ev(
    hand: &Hand,
    dealer: Code,
    stand: &Table<f64>,
    layer0: &Table<f64>,
    pair_ev: &Table<f64>,
) -> Result<f64> {
    if hand.is_blackjack() {
        stand.get(Code::Hard21, dealer).copied()
    } else if hand.can_split() {
        pair_ev.get(hand.code(), dealer).copied()
    } else {
        layer0.get(hand.code(), dealer).copied()
    }
}

pub fn make_split_ev0(stand: &StandEv, hit: &HitEv, double: &DoubleEv) -> Result<SplitEv0> {
    debug!(table = SPLIT_EV_0, "phase started");
    let table = build_by_columns(SPLIT_EV_0, &STAND_CODES, &DEALER_CODES, |dealer, column| {
        for player in STAND_CODES {
            let stand_ex = *stand.get(player, dealer)?;
            let ex = if player == Code::Hard21 {
                stand_ex
            } else {
                stand_ex
                    .max(*hit.get(player, dealer)?)
                    .max(*double.get(player, dealer)?)
            };
            column.set(player, dealer, ex)?;
        }
        Ok(())
    })?;
    debug!(table = SPLIT_EV_0, cells = table.len(), "phase finished");
    Ok(SplitEv0(table))
}

pub fn make_split_ev1(layer0: &SplitEv0) -> Result<SplitEv1> {
    debug!(table = SPLIT_EV_1, "phase started");
    let table = build_by_columns(SPLIT_EV_1, &RESPLIT_CODES, &DEALER_CODES, |dealer, column| {
        for pair in RESPLIT_CODES {
            let (card, _) = representative_hand(pair)?;
            let mut ex = 0.0;
            for draw in Card::iter() {
                let hand = Hand::new(card, draw, Role::Player)?;
                ex += DRAW_WEIGHT * *layer0.get(resolve(&hand), dealer)?;
            }
            column.set(pair, dealer, 2.0 * ex)?;
        }
        Ok(())
    })?;
    debug!(table = SPLIT_EV_1, cells = table.len(), "phase finished");
    Ok(SplitEv1(table))
}

pub fn make_split_ev2(stand: &StandEv, layer0: &SplitEv0, layer1: &SplitEv1) -> Result<SplitEv2> {
    debug!(table = SPLIT_EV_2, "phase started");
    let table = build_by_columns(SPLIT_EV_2, &RESPLIT_CODES, &DEALER_CODES, |dealer, column| {
        for pair in RESPLIT_CODES {
            let mut ex = 0.0;
            for (hand0, hand1) in post_split_hands(pair)? {
                ex += DOUBLE_DRAW_WEIGHT * {
                    if hand0.can_split() && hand1.can_split() {
                        // Only the first hand may be split again.
                        *layer1.get(hand0.code(), dealer)? + *layer0.get(resolve(&hand1), dealer)?
                    } else {
                        post_split_ev(&hand0, dealer, stand, layer0, layer1)?
                            + post_split_ev(&hand1, dealer, stand, layer0, layer1)?
                    }
                };
            }
            column.set(pair, dealer, ex)?;
        }
        Ok(())
    })?;
    debug!(table = SPLIT_EV_2, cells = table.len(), "phase finished");
    Ok(SplitEv2(table))
}

pub fn make_split_ev3(
    stand: &StandEv,
    layer0: &SplitEv0,
    layer1: &SplitEv1,
    layer2: &SplitEv2,
) -> Result<SplitEv3> {
    debug!(table = SPLIT_EV_3, "phase started");
    let table = build_by_columns(SPLIT_EV_3, &SPLIT_CODES, &DEALER_CODES, |dealer, column| {
        for pair in SPLIT_CODES {
            let mut ex = 0.0;
            for (hand0, hand1) in post_split_hands(pair)? {
                ex += DOUBLE_DRAW_WEIGHT * {
                    if pair == Code::PairAces {
                        // Split aces receive one card each and stand.
                        *stand.get(resolve(&hand0), dealer)? + *stand.get(resolve(&hand1), dealer)?
                    } else if hand0.can_split() && hand1.can_split() {
                        *layer1.get(hand0.code(), dealer)? + *layer1.get(hand1.code(), dealer)?
                    } else {
                        post_split_ev(&hand0, dealer, stand, layer0, layer2)?
                            + post_split_ev(&hand1, dealer, stand, layer0, layer2)?
                    }
                };
            }
            column.set(pair, dealer, ex)?;
        }
        Ok(())
    })?;
    debug!(table = SPLIT_EV_3, cells = table.len(), "phase finished");
    Ok(SplitEv3(table))
}
