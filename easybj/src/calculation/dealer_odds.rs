use super::util::check_distribution;
use crate::code::{Code, DEALER_ODDS_CODES, DEALER_OUTCOMES};
use crate::hand::{representative, Role, DRAW_WEIGHT};
use crate::{Card, Result, Table};
use strum::IntoEnumIterator;
use tracing::debug;

phase_table!(
    /// Probability of each final dealer result, per dealer state.
    DealerOdds,
    f64
);

const DEALER_ODDS: &str = "Dealer Probabilities";

/// Dealer states that must draw, ordered so that every successor is solved first.
const DEALER_SOLVE_ORDER: [Code; 19] = [
    Code::Hard16,
    Code::Hard15,
    Code::Hard14,
    Code::Hard13,
    Code::Hard12,
    Code::Hard11,
    Code::Hard10,
    Code::Hard9,
    Code::Hard8,
    Code::Hard7,
    Code::SoftA6,
    Code::SoftA5,
    Code::SoftA4,
    Code::SoftA3,
    Code::SoftA2,
    Code::SoftAces,
    Code::Hard6,
    Code::Hard5,
    Code::Hard4,
];

/// The final dealer results, in [`DEALER_OUTCOMES`] order.
#[derive(Default, Clone, Copy, Debug)]
struct DealerHandValueProbability {
    odds: [f64; 6],
}

impl DealerHandValueProbability {
    fn end_with(total: Code) -> Self {
        let mut ret = Self::default();
        if let Some(i) = DEALER_OUTCOMES.iter().position(|outcome| *outcome == total) {
            ret.odds[i] = 1.0;
        }
        ret
    }

    fn end_with_bust(&mut self, p: f64) {
        self.odds[0] += p;
    }

    fn add_assign_with_p(&mut self, rhs: &Self, p: f64) {
        for (lhs, rhs) in self.odds.iter_mut().zip(rhs.odds.iter()) {
            *lhs += rhs * p;
        }
    }

    fn sum(&self) -> f64 {
        self.odds.iter().sum()
    }

    fn load(table: &Table<f64>, state: Code) -> Result<Self> {
        let mut ret = Self::default();
        for (odds, outcome) in ret.odds.iter_mut().zip(DEALER_OUTCOMES) {
            *odds = *table.get(state, outcome)?;
        }
        Ok(ret)
    }

    fn store(&self, table: &mut Table<f64>, state: Code) -> Result<()> {
        for (odds, outcome) in self.odds.iter().zip(DEALER_OUTCOMES) {
            table.set(state, outcome, *odds)?;
        }
        Ok(())
    }
}

pub fn make_dealer_odds() -> Result<DealerOdds> {
    debug!(table = DEALER_ODDS, "phase started");
    let mut table = Table::new(DEALER_ODDS, &DEALER_ODDS_CODES, &DEALER_OUTCOMES).with_unit("%");

    for total in [
        Code::Hard17,
        Code::Hard18,
        Code::Hard19,
        Code::Hard20,
        Code::Hard21,
    ] {
        DealerHandValueProbability::end_with(total).store(&mut table, total)?;
    }

    for state in DEALER_SOLVE_ORDER {
        let hand = representative(state, Role::Dealer)?;
        let mut odds = DealerHandValueProbability::default();
        for card in Card::iter() {
            let next = hand.with_card(card)?;
            if next.is_bust() {
                odds.end_with_bust(DRAW_WEIGHT);
            } else {
                let next_odds = DealerHandValueProbability::load(&table, next.code())?;
                odds.add_assign_with_p(&next_odds, DRAW_WEIGHT);
            }
        }
        check_distribution(DEALER_ODDS, state, odds.sum())?;
        odds.store(&mut table, state)?;
    }

    debug!(table = DEALER_ODDS, cells = table.len(), "phase finished");
    Ok(DealerOdds(table))
}
