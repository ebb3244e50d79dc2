//! Optimal expectations and the basic strategy chart derived from them.

use crate::calculation::{DoubleEv, HitEv, SplitEv3, StandEv};
use crate::calculation::util::build_by_columns;
use crate::code::{Code, DEALER_CODES, PLAYER_CODES};
use crate::{Decision, Result};
use std::fmt;
use tracing::debug;

/// Expectation of giving up half of the stake.
pub const SURRENDER_EV: f64 = -0.5;

const OPTIMAL_EV: &str = "Optimal EV";
const STRATEGY: &str = "Strategy";

phase_table!(
    /// Expectation of the best action, per player state and dealer state.
    OptimalEv,
    f64
);

phase_table!(
    /// The best action, per player state and dealer state.
    StrategyTable,
    Action
);

/// A strategy chart entry. Doubling and surrendering carry the action to take when they are
/// not allowed, written as a lowercase suffix (`Dh`, `Rs`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub decision: Decision,
    pub fallback: Option<Decision>,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decision)?;
        if let Some(fallback) = self.fallback {
            write!(f, "{}", fallback.to_string().to_lowercase())?;
        }
        Ok(())
    }
}

/// Expectations of every action available on a two-card hand. Actions that are not
/// available are `-inf`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expectations {
    pub split: f64,
    pub stand: f64,
    pub hit: f64,
    pub double: f64,
}

impl Default for Expectations {
    fn default() -> Self {
        Expectations {
            split: -f64::INFINITY,
            stand: -f64::INFINITY,
            hit: -f64::INFINITY,
            double: -f64::INFINITY,
        }
    }
}

impl Expectations {
    /// Collects the expectations of `player` against `dealer`. A pair is played as its
    /// single-hand code when it is not split.
    pub fn gather(
        player: Code,
        dealer: Code,
        stand: &StandEv,
        hit: &HitEv,
        double: &DoubleEv,
        split: &SplitEv3,
    ) -> Result<Expectations> {
        let (single_hand, split) = if player.is_pair() {
            (player.as_single_hand(), *split.get(player, dealer)?)
        } else {
            (player, -f64::INFINITY)
        };
        Ok(Expectations {
            split,
            stand: *stand.get(single_hand, dealer)?,
            hit: *hit.get(single_hand, dealer)?,
            double: *double.get(single_hand, dealer)?,
        })
    }

    /// The best expectation and the action reaching it. Splitting is chosen only when it is
    /// strictly better than every other action. Otherwise the earlier action in stand, hit,
    /// double, surrender order wins a tie.
    pub fn get_max_expectation(&self) -> (f64, Action) {
        let (mut max_ex, mut max_decision) = (-f64::INFINITY, Decision::Surrender);
        for (ex, decision) in [
            (self.stand, Decision::Stand),
            (self.hit, Decision::Hit),
            (self.double, Decision::Double),
            (SURRENDER_EV, Decision::Surrender),
        ] {
            if max_ex < ex {
                max_ex = ex;
                max_decision = decision;
            }
        }
        if max_ex < self.split {
            max_ex = self.split;
            max_decision = Decision::Split;
        }

        let fallback = match max_decision {
            Decision::Double | Decision::Surrender => Some(if self.stand < self.hit {
                Decision::Hit
            } else {
                Decision::Stand
            }),
            _ => None,
        };
        (
            max_ex,
            Action {
                decision: max_decision,
                fallback,
            },
        )
    }
}

pub fn make_optimal_ev(
    stand: &StandEv,
    hit: &HitEv,
    double: &DoubleEv,
    split: &SplitEv3,
) -> Result<OptimalEv> {
    debug!(table = OPTIMAL_EV, "phase started");
    let table = build_by_columns(OPTIMAL_EV, &PLAYER_CODES, &DEALER_CODES, |dealer, column| {
        for player in PLAYER_CODES {
            let ex = Expectations::gather(player, dealer, stand, hit, double, split)?;
            column.set(player, dealer, ex.get_max_expectation().0)?;
        }
        Ok(())
    })?;
    debug!(table = OPTIMAL_EV, cells = table.len(), "phase finished");
    Ok(OptimalEv(table))
}

pub fn make_strategy(
    stand: &StandEv,
    hit: &HitEv,
    double: &DoubleEv,
    split: &SplitEv3,
) -> Result<StrategyTable> {
    debug!(table = STRATEGY, "phase started");
    let table = build_by_columns(STRATEGY, &PLAYER_CODES, &DEALER_CODES, |dealer, column| {
        for player in PLAYER_CODES {
            let ex = Expectations::gather(player, dealer, stand, hit, double, split)?;
            column.set(player, dealer, ex.get_max_expectation().1)?;
        }
        Ok(())
    })?;
    debug!(table = STRATEGY, cells = table.len(), "phase finished");
    Ok(StrategyTable(table))
}
