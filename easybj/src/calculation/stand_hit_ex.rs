use super::dealer_odds::DealerOdds;
use super::util::{build_by_columns, is_close};
use crate::code::{Code, DEALER_CODES, DEALER_OUTCOMES, NON_SPLIT_CODES, STAND_CODES};
use crate::hand::{representative, Role, DRAW_WEIGHT};
use crate::{Card, Result, Table};
use std::cmp::Ordering;
use strum::IntoEnumIterator;
use tracing::debug;

phase_table!(
    /// Expectation of standing, per player total and dealer state.
    StandEv,
    f64
);

phase_table!(
    /// Expectation of hitting and then playing optimally between standing and hitting.
    HitEv,
    f64
);

phase_table!(
    /// Expectation of doubling: one more card for twice the stake.
    DoubleEv,
    f64
);

const STAND_EV: &str = "Stand EV";
const HIT_EV: &str = "Hit EV";
const DOUBLE_EV: &str = "Double EV";

/// Player states in the order they are solved when hitting. Every state reachable by one
/// more card comes earlier.
const HIT_SOLVE_ORDER: [Code; 26] = [
    Code::Hard20,
    Code::Hard19,
    Code::Hard18,
    Code::Hard17,
    Code::Hard16,
    Code::Hard15,
    Code::Hard14,
    Code::Hard13,
    Code::Hard12,
    Code::Hard11,
    Code::Hard10,
    Code::SoftA9,
    Code::SoftA8,
    Code::SoftA7,
    Code::SoftA6,
    Code::SoftA5,
    Code::SoftA4,
    Code::SoftA3,
    Code::SoftA2,
    Code::SoftAces,
    Code::Hard9,
    Code::Hard8,
    Code::Hard7,
    Code::Hard6,
    Code::Hard5,
    Code::Hard4,
];

#[derive(Default, Clone, Copy, Debug)]
struct WinLoseCasesOdds {
    win: f64,
    push: f64,
    lose: f64,
}

impl WinLoseCasesOdds {
    fn expectation(&self) -> f64 {
        self.win - self.lose
    }

    fn total(&self) -> f64 {
        self.win + self.push + self.lose
    }
}

fn add_to_win_lose_cases_count(
    player_points: u16,
    dealer_outcome: Code,
    odds: &mut WinLoseCasesOdds,
    p: f64,
) {
    match dealer_outcome.points().cmp(&player_points) {
        Ordering::Less => odds.win += p,
        Ordering::Equal => odds.push += p,
        Ordering::Greater => odds.lose += p,
    }
}

fn calculate_stand_odds(
    player: Code,
    dealer: Code,
    dealer_odds: &DealerOdds,
) -> Result<WinLoseCasesOdds> {
    let mut odds = WinLoseCasesOdds::default();
    for outcome in DEALER_OUTCOMES {
        let p = *dealer_odds.get(dealer, outcome)?;
        // A dealer bust counts 0 points and loses to every standing hand.
        add_to_win_lose_cases_count(player.points(), outcome, &mut odds, p);
    }
    Ok(odds)
}

pub fn make_stand_ev(dealer_odds: &DealerOdds) -> Result<StandEv> {
    debug!(table = STAND_EV, "phase started");
    let table = build_by_columns(STAND_EV, &STAND_CODES, &DEALER_CODES, |dealer, column| {
        for player in STAND_CODES {
            let odds = calculate_stand_odds(player, dealer, dealer_odds)?;
            debug_assert!(is_close(odds.total(), 1.0));
            column.set(player, dealer, odds.expectation())?;
        }
        Ok(())
    })?;
    debug!(table = STAND_EV, cells = table.len(), "phase finished");
    Ok(StandEv(table))
}

/// Hit expectation of one player state, given the hit expectations of every state it can
/// reach with one more card.
pub(crate) fn hit_cell(
    player: Code,
    dealer: Code,
    stand: &Table<f64>,
    hit: &Table<f64>,
) -> Result<f64> {
    let hand = representative(player, Role::Player)?;
    let mut ex = 0.0;
    for card in Card::iter() {
        let next = hand.with_card(card)?;
        ex += DRAW_WEIGHT * {
            if next.is_bust() {
                -1.0
            } else if next.total() == 21 {
                *stand.get(Code::Hard21, dealer)?
            } else {
                let code = next.code();
                stand.get(code, dealer)?.max(*hit.get(code, dealer)?)
            }
        };
    }
    Ok(ex)
}

pub fn make_hit_ev(stand: &StandEv) -> Result<HitEv> {
    debug!(table = HIT_EV, "phase started");
    let table = build_by_columns(HIT_EV, &NON_SPLIT_CODES, &DEALER_CODES, |dealer, column| {
        for player in HIT_SOLVE_ORDER {
            let ex = hit_cell(player, dealer, stand, column)?;
            column.set(player, dealer, ex)?;
        }
        Ok(())
    })?;
    debug!(table = HIT_EV, cells = table.len(), "phase finished");
    Ok(HitEv(table))
}

pub fn make_double_ev(stand: &StandEv) -> Result<DoubleEv> {
    debug!(table = DOUBLE_EV, "phase started");
    let table = build_by_columns(DOUBLE_EV, &NON_SPLIT_CODES, &DEALER_CODES, |dealer, column| {
        for player in NON_SPLIT_CODES {
            let hand = representative(player, Role::Player)?;
            let mut ex = 0.0;
            for card in Card::iter() {
                let next = hand.with_card(card)?;
                ex += 2.0 * DRAW_WEIGHT * {
                    if next.is_bust() {
                        -1.0
                    } else {
                        *stand.get(next.code(), dealer)?
                    }
                };
            }
            column.set(player, dealer, ex)?;
        }
        Ok(())
    })?;
    debug!(table = DOUBLE_EV, cells = table.len(), "phase finished");
    Ok(DoubleEv(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::dealer_odds::make_dealer_odds;
    use crate::Error;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
    }

    fn stand_ev() -> StandEv {
        make_stand_ev(&make_dealer_odds().unwrap()).unwrap()
    }

    #[test]
    fn stand() {
        let stand = stand_ev();
        assert!(stand.is_complete());
        assert_close(*stand.get(Code::Hard20, Code::Hard17).unwrap(), 1.0);
        assert_close(
            *stand.get(Code::Hard16, Code::Hard4).unwrap(),
            -0.20584968608305457,
        );
        assert_close(
            *stand.get(Code::Hard21, Code::Hard4).unwrap(),
            0.8873979451552184,
        );
        assert_close(
            *stand.get(Code::SoftA7, Code::SoftA6).unwrap(),
            0.22002963034170198,
        );
        // Standing on 20 against a dealer 20 always pushes.
        assert_close(*stand.get(Code::Hard20, Code::Hard20).unwrap(), 0.0);
        assert_close(*stand.get(Code::SoftA9, Code::Hard20).unwrap(), 0.0);
    }

    #[test]
    fn hit_and_double() {
        let stand = stand_ev();
        let hit = make_hit_ev(&stand).unwrap();
        let double = make_double_ev(&stand).unwrap();
        assert!(hit.is_complete());
        assert!(double.is_complete());

        assert_close(
            *hit.get(Code::Hard12, Code::Hard6).unwrap(),
            -0.17241676251641375,
        );
        assert_close(
            *stand.get(Code::Hard12, Code::Hard6).unwrap(),
            -0.12106685019651232,
        );
        assert_close(
            *hit.get(Code::Hard11, Code::Hard6).unwrap(),
            0.3323317045944628,
        );
        assert_close(
            *double.get(Code::Hard11, Code::Hard6).unwrap(),
            0.6646634091889256,
        );
        assert_close(
            *hit.get(Code::SoftAces, Code::Hard20).unwrap(),
            -0.35827114247873615,
        );
    }

    #[test]
    fn hitting_stiff_hands_against_stiff_dealers_is_worse() {
        let stand = stand_ev();
        let hit = make_hit_ev(&stand).unwrap();
        for dealer in [
            Code::Hard4,
            Code::Hard5,
            Code::Hard6,
            Code::Hard12,
            Code::Hard13,
            Code::Hard14,
            Code::Hard15,
            Code::Hard16,
        ] {
            let diff = hit.get(Code::Hard12, dealer).unwrap() - stand.get(Code::Hard12, dealer).unwrap();
            assert!(diff < 0.0, "{}: {}", dealer, diff);
        }
    }

    #[test]
    fn hit_reads_only_solved_states() {
        let stand = stand_ev();
        let empty = Table::new(HIT_EV, &NON_SPLIT_CODES, &DEALER_CODES);
        assert_eq!(
            hit_cell(Code::Hard12, Code::Hard10, &stand, &empty),
            Err(Error::MissingValue {
                table: HIT_EV,
                row: Code::Hard13,
                col: Code::Hard10,
            })
        );
        // Every draw from 20 either busts or reaches 21.
        assert!(hit_cell(Code::Hard20, Code::Hard10, &stand, &empty).is_ok());
    }
}
