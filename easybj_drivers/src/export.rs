use crate::{select_table, AnyTable, Result, TableName};
use easybj::{Table, Tables};
use serde::Serialize;

/// A cell value as written to YAML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedTable {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// `(row, column, value)` for every set cell.
    pub cells: Vec<(String, String, CellValue)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
    pub advantage: f64,
    pub tables: Vec<ExportedTable>,
}

fn export_table<T>(table: &Table<T>, value: impl Fn(&T) -> CellValue) -> ExportedTable {
    ExportedTable {
        name: table.name().to_string(),
        unit: table.unit().map(String::from),
        cells: table
            .iter()
            .map(|(row, col, cell)| (row.to_string(), col.to_string(), value(cell)))
            .collect(),
    }
}

pub fn export_any(table: AnyTable<'_>) -> ExportedTable {
    match table {
        AnyTable::Number(table) => export_table(table, |value| CellValue::Number(*value)),
        AnyTable::Action(table) => {
            export_table(table, |action| CellValue::Label(action.to_string()))
        }
    }
}

pub fn export(tables: &Tables, names: &[TableName]) -> Export {
    Export {
        advantage: tables.advantage,
        tables: names
            .iter()
            .map(|name| export_any(select_table(tables, *name)))
            .collect(),
    }
}

pub fn export_to_yaml(tables: &Tables, names: &[TableName]) -> Result<String> {
    Ok(serde_yaml::to_string(&export(tables, names))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use easybj::code::{DEALER_CODES, SPLIT_CODES};
    use easybj::{Action, Code, Decision};

    #[test]
    fn cells_become_triples() {
        let mut table: Table<f64> = Table::new("Split EV 3", &SPLIT_CODES, &DEALER_CODES);
        table.set(Code::PairAces, Code::Hard6, 0.5).unwrap();
        table.set(Code::Pair8, Code::SoftAces, -0.25).unwrap();

        let exported = export_any(AnyTable::Number(&table));
        assert_eq!(exported.name, "Split EV 3");
        assert_eq!(exported.unit, None);
        assert_eq!(
            exported.cells,
            vec![
                (
                    String::from("88"),
                    String::from("AA"),
                    CellValue::Number(-0.25)
                ),
                (
                    String::from("AA"),
                    String::from("6"),
                    CellValue::Number(0.5)
                ),
            ]
        );
    }

    #[test]
    fn yaml_layout() {
        let mut table: Table<Action> = Table::new("Strategy", &SPLIT_CODES, &DEALER_CODES);
        let action = Action {
            decision: Decision::Double,
            fallback: Some(Decision::Hit),
        };
        table.set(Code::Pair5, Code::Hard9, action).unwrap();
        let export = Export {
            advantage: 0.125,
            tables: vec![export_any(AnyTable::Action(&table))],
        };

        let yaml = serde_yaml::to_string(&export).unwrap();
        assert!(yaml.starts_with("advantage: 0.125\n"));
        assert!(yaml.contains("name: Strategy\n"));
        assert!(yaml.contains("- - '55'\n"));
        assert!(yaml.contains("- Dh\n"));
        assert!(!yaml.contains("unit"));
    }
}
