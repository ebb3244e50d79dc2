//! Plain-text output: tables with a header of column labels, one line per row label, then
//! `End Table`, and money amounts for the simulator.

use crate::AnyTable;
use easybj::{Action, Table};

/// How a cell value is printed.
pub trait CellText {
    /// Width of every column.
    const WIDTH: usize;

    fn cell_text(&self, unit: Option<&str>) -> String;
}

impl CellText for f64 {
    const WIDTH: usize = 6;

    fn cell_text(&self, unit: Option<&str>) -> String {
        match unit {
            Some("%") => format!("{:.3}%", self * 100.0),
            _ if *self < 0.0 => format!("{:.3}", self),
            _ => format!(" {:.3}", self),
        }
    }
}

impl CellText for Action {
    const WIDTH: usize = 2;

    fn cell_text(&self, _unit: Option<&str>) -> String {
        format!("{:^width$}", self.to_string(), width = Self::WIDTH)
    }
}

fn truncate(label: &str, width: usize) -> &str {
    label.get(..width).unwrap_or(label)
}

pub fn render_table<T: CellText>(table: &Table<T>) -> String {
    let width = T::WIDTH;
    let label_width = table
        .rows()
        .iter()
        .map(|row| row.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", table.name());
    let mut header = vec![" ".repeat(label_width)];
    header.extend(
        table
            .cols()
            .iter()
            .map(|col| format!("{:^width$}", truncate(&col.to_string(), width))),
    );
    out.push_str(&header.join(" "));
    out.push('\n');

    for row in table.rows() {
        let mut line = vec![format!("{:>label_width$}", row.to_string())];
        for col in table.cols() {
            line.push(match table.try_get(*row, *col) {
                Ok(Some(value)) => value.cell_text(table.unit()),
                _ => "-".repeat(width),
            });
        }
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out.push_str("\nEnd Table\n");
    out
}

pub fn render_any(table: AnyTable<'_>) -> String {
    match table {
        AnyTable::Number(table) => render_table(table),
        AnyTable::Action(table) => render_table(table),
    }
}

/// The advantage line printed after the tables.
pub fn render_advantage(advantage: f64) -> String {
    format!("Player advantage: {:.4}%\n", advantage * 100.0)
}

/// Money with an explicit sign, e.g. `+$1.50`, `-$0.50` or `$0.00`.
pub fn to_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+${:.2}", value)
    } else if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        String::from("$0.00")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easybj::code::{DEALER_OUTCOMES, SOFT_CODES, SPLIT_CODES};
    use easybj::{Code, Decision};

    #[test]
    fn numbers() {
        assert_eq!(0.5_f64.cell_text(None), " 0.500");
        assert_eq!((-0.25_f64).cell_text(None), "-0.250");
        assert_eq!(0.0769230769_f64.cell_text(Some("%")), "7.692%");
    }

    #[test]
    fn actions_are_centred() {
        let action = Action {
            decision: Decision::Hit,
            fallback: None,
        };
        assert_eq!(action.cell_text(None), "H ");
        let action = Action {
            decision: Decision::Double,
            fallback: Some(Decision::Stand),
        };
        assert_eq!(action.cell_text(None), "Ds");
    }

    #[test]
    fn layout() {
        let mut table: Table<f64> = Table::new("Dealer", &SPLIT_CODES, &DEALER_OUTCOMES);
        table.set(Code::Pair2, Code::Bust, 0.5).unwrap();
        table.set(Code::PairAces, Code::Hard21, -1.0).unwrap();
        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Dealer");
        assert_eq!(lines[1], "    BUST    17     18     19     20     21  ");
        assert_eq!(
            lines[2],
            "22  0.500 ------ ------ ------ ------ ------"
        );
        assert_eq!(
            lines[11],
            "AA ------ ------ ------ ------ ------ -1.000"
        );
        assert!(text.ends_with("\nEnd Table\n"));
    }

    #[test]
    fn probability_tables_use_percent() {
        let mut table: Table<f64> =
            Table::new("Initial", &SOFT_CODES, &DEALER_OUTCOMES).with_unit("%");
        table.set(Code::SoftA2, Code::Hard17, 0.25).unwrap();
        assert!(render_table(&table).contains("A2 ------ 25.000%"));
    }

    #[test]
    fn currency() {
        assert_eq!(to_currency(1.5), "+$1.50");
        assert_eq!(to_currency(-0.5), "-$0.50");
        assert_eq!(to_currency(0.0), "$0.00");
        assert_eq!(to_currency(-0.0), "$0.00");
        assert_eq!(to_currency(1234.0), "+$1234.00");
    }
}
