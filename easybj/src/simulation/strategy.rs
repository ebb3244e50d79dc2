use super::hand::PlayedHand;
use crate::strategy::StrategyTable;
use crate::{Action, Decision, Error, Result};

pub trait Strategy {
    /// Picks one of `allowed` for `hand`. Both dealer cards are visible.
    fn make_decision(
        &mut self,
        hand: &PlayedHand,
        dealer: &PlayedHand,
        allowed: &[Decision],
    ) -> Result<Decision>;
}

/// Plays by a computed strategy chart. A double or surrender that is not allowed falls back
/// to the chart's lowercase suffix, and a pair that may not be split is looked up by its hard
/// total.
#[derive(Debug, Clone, Copy)]
pub struct ChartStrategy<'a> {
    chart: &'a StrategyTable,
}

impl<'a> ChartStrategy<'a> {
    pub fn new(chart: &'a StrategyTable) -> ChartStrategy<'a> {
        ChartStrategy { chart }
    }

    pub fn lookup(
        &self,
        hand: &PlayedHand,
        dealer: &PlayedHand,
        split_allowed: bool,
    ) -> Result<Action> {
        Ok(*self.chart.get(hand.chart_row(split_allowed), dealer.code())?)
    }
}

impl Strategy for ChartStrategy<'_> {
    fn make_decision(
        &mut self,
        hand: &PlayedHand,
        dealer: &PlayedHand,
        allowed: &[Decision],
    ) -> Result<Decision> {
        let action = self.lookup(hand, dealer, allowed.contains(&Decision::Split))?;
        if allowed.contains(&action.decision) {
            return Ok(action.decision);
        }
        match action.fallback {
            Some(fallback) if allowed.contains(&fallback) => Ok(fallback),
            _ => Err(Error::IllegalDecision {
                decision: action.decision,
                code: hand.code(),
            }),
        }
    }
}

/// Plays a fixed list of decisions in order, then stands.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    decisions: Vec<Decision>,
    next: usize,
}

impl ScriptedStrategy {
    pub fn new(decisions: Vec<Decision>) -> ScriptedStrategy {
        ScriptedStrategy { decisions, next: 0 }
    }
}

impl Strategy for ScriptedStrategy {
    fn make_decision(
        &mut self,
        _hand: &PlayedHand,
        _dealer: &PlayedHand,
        _allowed: &[Decision],
    ) -> Result<Decision> {
        let decision = self
            .decisions
            .get(self.next)
            .copied()
            .unwrap_or(Decision::Stand);
        self.next += 1;
        Ok(decision)
    }
}
