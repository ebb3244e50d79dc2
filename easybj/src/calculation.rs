//! The calculation pipeline. Each phase takes the tables it depends on and returns a new
//! table type that only that phase can build.

mod dealer_odds;
mod initial;
mod split_ex;
mod stand_hit_ex;
pub(crate) mod util;

pub use dealer_odds::{make_dealer_odds, DealerOdds};
pub use initial::{calc_advantage, make_initial_table, InitialTable, BLACKJACK_PAYOUT};
pub use split_ex::{
    make_split_ev0, make_split_ev1, make_split_ev2, make_split_ev3, SplitEv0, SplitEv1,
    SplitEv2, SplitEv3,
};
pub use stand_hit_ex::{make_double_ev, make_hit_ev, make_stand_ev, DoubleEv, HitEv, StandEv};
pub use util::is_close;

use crate::strategy::{make_optimal_ev, make_strategy, OptimalEv, StrategyTable};
use crate::Result;
use std::time::Instant;
use tracing::info;

/// Every table of the calculation, plus the player advantage.
#[derive(Debug, Clone)]
pub struct Tables {
    pub initial: InitialTable,
    pub dealer_odds: DealerOdds,
    pub stand: StandEv,
    pub hit: HitEv,
    pub double: DoubleEv,
    pub split0: SplitEv0,
    pub split1: SplitEv1,
    pub split2: SplitEv2,
    pub split3: SplitEv3,
    pub optimal: OptimalEv,
    pub strategy: StrategyTable,
    pub advantage: f64,
}

/// Runs every phase in dependency order. No tables are returned if any phase fails.
pub fn calculate() -> Result<Tables> {
    let start = Instant::now();

    let initial = make_initial_table()?;
    let dealer_odds = make_dealer_odds()?;
    let stand = make_stand_ev(&dealer_odds)?;
    let hit = make_hit_ev(&stand)?;
    let double = make_double_ev(&stand)?;
    let split0 = make_split_ev0(&stand, &hit, &double)?;
    let split1 = make_split_ev1(&split0)?;
    let split2 = make_split_ev2(&stand, &split0, &split1)?;
    let split3 = make_split_ev3(&stand, &split0, &split1, &split2)?;
    let optimal = make_optimal_ev(&stand, &hit, &double, &split3)?;
    let strategy = make_strategy(&stand, &hit, &double, &split3)?;
    let advantage = calc_advantage(&initial, &optimal)?;

    info!(elapsed = ?start.elapsed(), "calculation finished");
    Ok(Tables {
        initial,
        dealer_odds,
        stand,
        hit,
        double,
        split0,
        split1,
        split2,
        split3,
        optimal,
        strategy,
        advantage,
    })
}
