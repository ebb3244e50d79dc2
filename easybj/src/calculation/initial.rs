use super::util::check_distribution;
use crate::code::{Code, INITIAL_DEALER_CODES, INITIAL_PLAYER_CODES};
use crate::strategy::OptimalEv;
use crate::{Card, Hand, Result, Role, Table};
use tracing::{debug, info};

phase_table!(
    /// Probability of every starting combination of player code and dealer code.
    InitialTable,
    f64
);

const INITIAL: &str = "Initial Probabilities";

/// Payout of a player Blackjack against anything but a dealer Blackjack.
pub const BLACKJACK_PAYOUT: f64 = 1.5;

pub fn make_initial_table() -> Result<InitialTable> {
    debug!(table = INITIAL, "phase started");
    let mut table = Table::new(INITIAL, &INITIAL_PLAYER_CODES, &INITIAL_DEALER_CODES).with_unit("%");
    for dealer0 in Card::DISTINCT {
        for dealer1 in Card::DISTINCT {
            let dealer = Hand::new(dealer0, dealer1, Role::Dealer)?;
            for player0 in Card::DISTINCT {
                for player1 in Card::DISTINCT {
                    let player = Hand::new(player0, player1, Role::Player)?;
                    table.accumulate(
                        player.code(),
                        dealer.code(),
                        dealer.probability() * player.probability(),
                    )?;
                }
            }
        }
    }
    check_distribution(INITIAL, "all starting hands", table.sum())?;
    debug!(table = INITIAL, cells = table.len(), "phase finished");
    Ok(InitialTable(table))
}

/// Expected return per unit bet when the player follows the optimal strategy.
pub fn calc_advantage(initial: &InitialTable, optimal: &OptimalEv) -> Result<f64> {
    let mut advantage = 0.0;
    for dealer in INITIAL_DEALER_CODES {
        for player in INITIAL_PLAYER_CODES {
            let p = *initial.get(player, dealer)?;
            let payoff = match (player, dealer) {
                (Code::Blackjack, Code::Blackjack) => 0.0,
                (Code::Blackjack, _) => BLACKJACK_PAYOUT,
                (_, Code::Blackjack) => -1.0,
                _ => *optimal.get(player, dealer)?,
            };
            advantage += p * payoff;
        }
    }
    info!(advantage, "player advantage");
    Ok(advantage)
}
