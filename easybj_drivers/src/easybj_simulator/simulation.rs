use self::private::Statistics;
use easybj::simulation::hand::PlayedHand;
use easybj::simulation::shoe::Shoe;
use easybj::simulation::strategy::Strategy;
use easybj::simulation::{Game, Simulator, SimulatorEventHandler};
use easybj::Decision;
use easybj_drivers::render::to_currency;
use easybj_drivers::Result;
use std::io::{BufRead, Write};

mod private {
    use easybj::Decision;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        lowest_balance: f64,
        splits: u64,
        doubles: u64,
        surrenders: u64,
    }

    impl Statistics {
        pub fn record_decision(&mut self, decision: Decision) {
            match decision {
                Decision::Split => self.splits += 1,
                Decision::Double => self.doubles += 1,
                Decision::Surrender => self.surrenders += 1,
                Decision::Stand | Decision::Hit => {}
            }
        }

        pub fn record_balance(&mut self, balance: f64) {
            if self.lowest_balance > balance {
                self.lowest_balance = balance;
            }
        }

        pub fn get_lowest_balance(&self) -> f64 {
            self.lowest_balance
        }

        pub fn get_splits(&self) -> u64 {
            self.splits
        }

        pub fn get_doubles(&self) -> u64 {
            self.doubles
        }

        pub fn get_surrenders(&self) -> u64 {
            self.surrenders
        }
    }
}

/// Prints every finished game unless silent, and keeps statistics for the session summary.
#[derive(Debug, Clone, Default)]
pub struct Handler {
    silent: bool,
    stat: Statistics,
}

impl Handler {
    pub fn new(silent: bool) -> Handler {
        Handler {
            silent,
            stat: Statistics::default(),
        }
    }

    pub fn session_summary<S: Shoe>(&self, simulator: &Simulator<S>, advantage: f64) -> String {
        format!(
            "Hands played: {}\n\
             Splits: {}, Doubles: {}, Surrenders: {}\n\
             Return per hand: {:.4}% (expected {:.4}%)\n\
             Lowest Balance: {}\n\
             Current Balance: {}\n",
            simulator.games_played(),
            self.stat.get_splits(),
            self.stat.get_doubles(),
            self.stat.get_surrenders(),
            simulator.average_return() * 100.0,
            advantage * 100.0,
            to_currency(self.stat.get_lowest_balance()),
            to_currency(simulator.balance()),
        )
    }
}

impl SimulatorEventHandler for Handler {
    fn on_make_decision(&mut self, decision: Decision, _hand_index: usize) {
        self.stat.record_decision(decision);
    }

    fn on_summary_game(&mut self, game: &Game, result: f64, balance: f64) {
        self.stat.record_balance(balance);
        if !self.silent {
            println!("{}", game_summary(game, result, balance));
        }
    }
}

pub fn game_summary(game: &Game, result: f64, balance: f64) -> String {
    format!(
        "{}Result: {}\nCurrent Balance: {}",
        game,
        to_currency(result),
        to_currency(balance)
    )
}

fn decision_name(decision: Decision) -> &'static str {
    match decision {
        Decision::Split => "Split",
        Decision::Stand => "Stand",
        Decision::Hit => "Hit",
        Decision::Double => "Double",
        Decision::Surrender => "Surrender",
    }
}

/// The decision named by the first letter of `input`, in either case.
pub fn parse_decision(input: &str) -> Option<Decision> {
    let letter = input.trim().chars().next()?.to_ascii_uppercase().to_string();
    [
        Decision::Stand,
        Decision::Hit,
        Decision::Double,
        Decision::Split,
        Decision::Surrender,
    ]
    .into_iter()
    .find(|decision| decision.to_string() == letter)
}

/// Asks for every decision on `input`, showing the table on `output`.
pub struct ManualStrategy<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ManualStrategy<R, W> {
    pub fn new(input: R, output: W) -> ManualStrategy<R, W> {
        ManualStrategy { input, output }
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn ask(
        &mut self,
        hand: &PlayedHand,
        dealer: &PlayedHand,
        allowed: &[Decision],
    ) -> std::io::Result<Option<Decision>> {
        writeln!(self.output, "Dealer: {}\nHand: {}", dealer, hand)?;
        loop {
            let prompt: Vec<String> = allowed
                .iter()
                .map(|decision| format!("{} ({})", decision_name(*decision), decision))
                .collect();
            write!(self.output, "{}: ", prompt.join(" "))?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_decision(&line) {
                Some(decision) if allowed.contains(&decision) => return Ok(Some(decision)),
                _ => writeln!(self.output, "Unrecognized action")?,
            }
        }
    }

    /// Whether to deal another round. Anything but `q` continues.
    pub fn again(&mut self) -> Result<bool> {
        write!(self.output, "Press Any Key to Continue, (Q to Quit): ")?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            Some(line) => !line.trim_start().to_lowercase().starts_with('q'),
            None => false,
        })
    }
}

impl<R: BufRead, W: Write> Strategy for ManualStrategy<R, W> {
    fn make_decision(
        &mut self,
        hand: &PlayedHand,
        dealer: &PlayedHand,
        allowed: &[Decision],
    ) -> easybj::Result<Decision> {
        match self.ask(hand, dealer, allowed) {
            Ok(Some(decision)) => Ok(decision),
            Ok(None) => Err(easybj::Error::NoDecision(String::from("end of input"))),
            Err(error) => Err(easybj::Error::NoDecision(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easybj::simulation::shoe::ListShoe;
    use easybj::simulation::strategy::ScriptedStrategy;
    use std::io::Cursor;

    fn manual(input: &str) -> ManualStrategy<Cursor<Vec<u8>>, Vec<u8>> {
        ManualStrategy::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn decisions_are_read_by_first_letter() {
        assert_eq!(parse_decision("s"), Some(Decision::Stand));
        assert_eq!(parse_decision("Hit"), Some(Decision::Hit));
        assert_eq!(parse_decision(" d\n"), Some(Decision::Double));
        assert_eq!(parse_decision("p"), Some(Decision::Split));
        assert_eq!(parse_decision("R"), Some(Decision::Surrender));
        assert_eq!(parse_decision("x"), None);
        assert_eq!(parse_decision(""), None);
    }

    #[test]
    fn manual_play_reprompts_until_allowed() {
        let shoe: ListShoe = "T 7 5 6 2 4".parse().unwrap();
        let mut simulator = Simulator::new(shoe);
        let mut strategy = manual("x\nh\nd\ns\n");
        let game = simulator.play_game(&mut strategy, &mut ()).unwrap();
        assert_eq!(game.hands[0].total(), 13);
        assert_eq!(game.result(), -1.0);

        let output = String::from_utf8(strategy.output).unwrap();
        assert!(output.starts_with("Dealer: T 7 (17)\nHand: 5 6 (11)\n"));
        assert!(output.contains(
            "Stand (S) Hit (H) Double (D) Surrender (R): Unrecognized action\n"
        ));
        assert!(output.contains("Hand: 5 6 2 (13)\nStand (S) Hit (H): Unrecognized action"));
    }

    #[test]
    fn end_of_input_stops_the_game() {
        let shoe: ListShoe = "T 7 5 6".parse().unwrap();
        let mut simulator = Simulator::new(shoe);
        let mut strategy = manual("");
        assert_eq!(
            simulator.play_game(&mut strategy, &mut ()),
            Err(easybj::Error::NoDecision(String::from("end of input")))
        );
        assert!(!strategy.again().unwrap());
    }

    #[test]
    fn again_unless_quit() {
        assert!(manual("\n").again().unwrap());
        assert!(manual("y\n").again().unwrap());
        assert!(!manual("Q\n").again().unwrap());
        assert!(!manual("quit\n").again().unwrap());
    }

    #[test]
    fn summaries() {
        let shoe: ListShoe = "T 7 A K".parse().unwrap();
        let mut simulator = Simulator::new(shoe);
        let mut handler = Handler::new(true);
        let mut strategy = ScriptedStrategy::default();
        let game = simulator.play_game(&mut strategy, &mut handler).unwrap();
        assert_eq!(
            game_summary(&game, 1.5, 1.5),
            "Dealer: T 7 (17)\nHand 1: A K (blackjack)\nResult: +$1.50\nCurrent Balance: +$1.50"
        );
        let summary = handler.session_summary(&simulator, 0.1166847);
        assert!(summary.starts_with("Hands played: 1\n"));
        assert!(summary.contains("Return per hand: 150.0000% (expected 11.6685%)"));
        assert!(summary.ends_with("Lowest Balance: $0.00\nCurrent Balance: +$1.50\n"));
    }
}
