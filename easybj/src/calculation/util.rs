use crate::{Code, Error, Result, Table};
use rayon::prelude::*;
use std::fmt::Display;
use tracing::trace;

const RELATIVE_TOLERANCE: f64 = 1e-9;
const ABSOLUTE_TOLERANCE: f64 = 1e-12;

pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= (RELATIVE_TOLERANCE * a.abs().max(b.abs())).max(ABSOLUTE_TOLERANCE)
}

/// Fails unless `sum` is 1 within tolerance.
pub fn check_distribution(table: &'static str, label: impl Display, sum: f64) -> Result<()> {
    if is_close(sum, 1.0) {
        Ok(())
    } else {
        Err(Error::DistributionSum {
            table,
            label: label.to_string(),
            sum,
        })
    }
}

/// Builds a table one dealer column at a time, with the columns running in parallel.
///
/// `fill` receives the dealer code and an empty single-column table. It may read back the
/// cells it has already written to that column, but never another column.
pub fn build_by_columns<T, F>(
    name: &'static str,
    rows: &'static [Code],
    cols: &'static [Code],
    fill: F,
) -> Result<Table<T>>
where
    T: Send,
    F: Fn(Code, &mut Table<T>) -> Result<()> + Sync,
{
    let columns = (0..cols.len())
        .into_par_iter()
        .map(|i| -> Result<Table<T>> {
            let dealer = cols[i];
            trace!(table = name, dealer = %dealer, "computing column");
            let mut column = Table::new(name, rows, &cols[i..=i]);
            fill(dealer, &mut column)?;
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = Table::new(name, rows, cols);
    for column in columns {
        table.absorb(column)?;
    }
    Ok(table)
}
