use crate::{Code, Error, Result};
use strum::EnumCount;

type AxisIndex = [Option<u8>; Code::COUNT];

const fn index_axis(axis: &[Code]) -> AxisIndex {
    let mut index = [None; Code::COUNT];
    let mut i = 0;
    while i < axis.len() {
        index[axis[i] as usize] = Some(i as u8);
        i += 1;
    }
    index
}

/// A dense two-dimensional store keyed by a row code and a column code.
///
/// Both axes are fixed when the table is created. Every access with a code outside its
/// axis fails with [`Error::InvalidKey`], and reading a cell that was never written fails
/// with [`Error::MissingValue`] instead of falling back to a default.
#[derive(Debug, Clone)]
pub struct Table<T> {
    name: &'static str,
    unit: Option<&'static str>,
    rows: &'static [Code],
    cols: &'static [Code],
    row_index: AxisIndex,
    col_index: AxisIndex,
    cells: Vec<Option<T>>,
}

impl<T> Table<T> {
    pub fn new(name: &'static str, rows: &'static [Code], cols: &'static [Code]) -> Table<T> {
        let mut cells = Vec::with_capacity(rows.len() * cols.len());
        cells.resize_with(rows.len() * cols.len(), || None);
        Table {
            name,
            unit: None,
            rows,
            cols,
            row_index: index_axis(rows),
            col_index: index_axis(cols),
            cells,
        }
    }

    /// Sets the unit printed after every value, e.g. `%` for probabilities.
    pub fn with_unit(mut self, unit: &'static str) -> Table<T> {
        self.unit = Some(unit);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.unit
    }

    pub fn rows(&self) -> &'static [Code] {
        self.rows
    }

    pub fn cols(&self) -> &'static [Code] {
        self.cols
    }

    fn position(&self, row: Code, col: Code) -> Result<usize> {
        match (self.row_index[row as usize], self.col_index[col as usize]) {
            (Some(r), Some(c)) => Ok(r as usize * self.cols.len() + c as usize),
            _ => Err(Error::InvalidKey {
                table: self.name,
                row,
                col,
            }),
        }
    }

    pub fn get(&self, row: Code, col: Code) -> Result<&T> {
        self.try_get(row, col)?.ok_or(Error::MissingValue {
            table: self.name,
            row,
            col,
        })
    }

    /// Like [`Table::get`], but an unset cell is `Ok(None)`.
    pub fn try_get(&self, row: Code, col: Code) -> Result<Option<&T>> {
        let position = self.position(row, col)?;
        Ok(self.cells[position].as_ref())
    }

    pub fn set(&mut self, row: Code, col: Code, value: T) -> Result<()> {
        let position = self.position(row, col)?;
        self.cells[position] = Some(value);
        Ok(())
    }

    pub fn unset(&mut self, row: Code, col: Code) -> Result<()> {
        let position = self.position(row, col)?;
        self.cells[position] = None;
        Ok(())
    }

    pub fn contains(&self, row: Code, col: Code) -> bool {
        matches!(self.try_get(row, col), Ok(Some(_)))
    }

    /// Number of cells holding a value.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over the set cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Code, Code, &T)> + '_ {
        let width = self.cols.len();
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|value| (self.rows[i / width], self.cols[i % width], value))
        })
    }

    /// Moves every set cell of `other` into this table. Fails if `other` holds a key this
    /// table does not have.
    pub fn absorb(&mut self, other: Table<T>) -> Result<()> {
        let width = other.cols.len();
        for (i, cell) in other.cells.into_iter().enumerate() {
            if let Some(value) = cell {
                self.set(other.rows[i / width], other.cols[i % width], value)?;
            }
        }
        Ok(())
    }
}

impl Table<f64> {
    /// Adds `value` to a cell, treating an unset cell as zero.
    pub fn accumulate(&mut self, row: Code, col: Code, value: f64) -> Result<()> {
        let position = self.position(row, col)?;
        *self.cells[position].get_or_insert(0.0) += value;
        Ok(())
    }

    /// Sum of all set cells.
    pub fn sum(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{DEALER_CODES, PLAYER_CODES, SOFT_CODES, SPLIT_CODES};

    #[test]
    fn foreign_labels_are_invalid_keys() {
        let mut table: Table<f64> = Table::new("test", &SPLIT_CODES, &DEALER_CODES);
        assert_eq!(
            table.set(Code::SoftAces, Code::Hard4, 1.0),
            Err(Error::InvalidKey {
                table: "test",
                row: Code::SoftAces,
                col: Code::Hard4,
            })
        );
        assert!(table.get(Code::Pair8, Code::SoftA7).is_err());
        assert!(table.set(Code::PairAces, Code::SoftAces, 1.0).is_ok());
    }

    #[test]
    fn unset_cells_are_missing() {
        let mut table: Table<f64> = Table::new("test", &PLAYER_CODES, &DEALER_CODES);
        assert_eq!(
            table.get(Code::Hard12, Code::Hard6),
            Err(Error::MissingValue {
                table: "test",
                row: Code::Hard12,
                col: Code::Hard6,
            })
        );
        assert_eq!(table.try_get(Code::Hard12, Code::Hard6), Ok(None));

        table.set(Code::Hard12, Code::Hard6, -0.25).unwrap();
        assert_eq!(table.get(Code::Hard12, Code::Hard6), Ok(&-0.25));
        assert!(table.contains(Code::Hard12, Code::Hard6));

        table.unset(Code::Hard12, Code::Hard6).unwrap();
        assert!(table.get(Code::Hard12, Code::Hard6).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn iteration_is_row_major_over_set_cells() {
        let mut table: Table<&str> = Table::new("labels", &SOFT_CODES, &DEALER_CODES);
        table.set(Code::SoftA9, Code::Hard4, "S").unwrap();
        table.set(Code::SoftA2, Code::SoftA6, "H").unwrap();
        table.set(Code::SoftA2, Code::Hard5, "D").unwrap();

        let cells: Vec<_> = table.iter().collect();
        assert_eq!(
            cells,
            vec![
                (Code::SoftA2, Code::Hard5, &"D"),
                (Code::SoftA2, Code::SoftA6, &"H"),
                (Code::SoftA9, Code::Hard4, &"S"),
            ]
        );
        assert_eq!(table.len(), 3);
        assert!(!table.is_complete());
    }

    #[test]
    fn absorb_single_column() {
        let mut table: Table<f64> = Table::new("test", &SPLIT_CODES, &DEALER_CODES);
        let dealers: &'static [Code] = &DEALER_CODES;
        let mut column: Table<f64> = Table::new("test", &SPLIT_CODES, &dealers[3..4]);
        for pair in SPLIT_CODES {
            column.set(pair, Code::Hard7, pair.points() as f64).unwrap();
        }
        table.absorb(column).unwrap();
        assert_eq!(table.get(Code::Pair9, Code::Hard7), Ok(&18.0));
        assert_eq!(table.len(), SPLIT_CODES.len());

        let pairs: &'static [Code] = &SPLIT_CODES;
        let mut narrow: Table<f64> = Table::new("narrow", &pairs[..1], dealers);
        let mut wide: Table<f64> = Table::new("wide", &SPLIT_CODES, &DEALER_CODES);
        wide.set(Code::Pair3, Code::Hard4, 0.0).unwrap();
        assert!(narrow.absorb(wide).is_err());
    }

    #[test]
    fn accumulate_starts_from_zero() {
        let mut table: Table<f64> = Table::new("test", &SPLIT_CODES, &DEALER_CODES);
        table.accumulate(Code::Pair2, Code::Hard4, 0.25).unwrap();
        table.accumulate(Code::Pair2, Code::Hard4, 0.5).unwrap();
        assert_eq!(table.get(Code::Pair2, Code::Hard4), Ok(&0.75));
        assert_eq!(table.sum(), 0.75);
        table.set(Code::Pair3, Code::Hard4, 0.25).unwrap();
        assert_eq!(table.sum(), 1.0);
    }
}
