#![allow(ambiguous_associated_items)]

use easybj::simulation::shoe::{format_cards, ListShoe};
use easybj::{Action, Card, Table, Tables};
use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod export;
pub mod render;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read config file {path}: {source}")]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid option: {0}")]
    InvalidOption(#[from] serde::de::value::Error),
    #[error("cannot read shoe file {path}: {source}")]
    ReadShoe {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write shoe file {path}: {source}")]
    WriteShoe {
        path: String,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Calculation(#[from] easybj::Error),
}

pub const DEFAULT_CONFIG_PATH: &str = "~/.easybj.yml";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: ConfigOutput,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: ConfigOutput::default(),
            log_level: String::from("info"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOutput {
    pub format: String,
    pub tables: Vec<String>,
}

impl Default for ConfigOutput {
    fn default() -> Self {
        ConfigOutput {
            format: String::from("text"),
            tables: vec![String::from("strategy")],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum TableName {
    #[serde(rename = "initial")]
    Initial,
    #[serde(rename = "dealer")]
    Dealer,
    #[serde(rename = "stand")]
    Stand,
    #[serde(rename = "hit")]
    Hit,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "split0")]
    Split0,
    #[serde(rename = "split1")]
    Split1,
    #[serde(rename = "split2")]
    Split2,
    #[serde(rename = "split3")]
    Split3,
    #[serde(rename = "optimal")]
    Optimal,
    #[serde(rename = "strategy")]
    Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize_enum_str, Deserialize_enum_str)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// The level `steps` more verbose than this one, capped at `trace`.
    pub fn raised(self, steps: u8) -> LogLevel {
        let i = Self::ALL.iter().position(|level| *level == self).unwrap_or(0);
        Self::ALL[(i + steps as usize).min(Self::ALL.len() - 1)]
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// A config whose options have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub tables: Vec<TableName>,
    pub log_level: LogLevel,
}

impl TryFrom<Config> for Settings {
    type Error = Error;

    fn try_from(config: Config) -> Result<Self> {
        Ok(Settings {
            format: config.output.format.parse()?,
            tables: parse_table_names(&config.output.tables)?,
            log_level: config.log_level.parse()?,
        })
    }
}

pub fn parse_table_names(names: &[String]) -> Result<Vec<TableName>> {
    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        tables.push(name.parse()?);
    }
    Ok(tables)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &Path) -> Result<Config> {
    let file_content = fs::read_to_string(filename).map_err(|source| Error::ReadConfig {
        path: filename.display().to_string(),
        source,
    })?;
    Ok(serde_yaml::from_str(&file_content)?)
}

/// Loads the config file. The default path may be absent, in which case the built-in
/// defaults are used.
pub fn load_config(path: &str) -> Result<(Config, Option<PathBuf>)> {
    if path != DEFAULT_CONFIG_PATH {
        let path = PathBuf::from(path);
        return Ok((parse_config_from_file(&path)?, Some(path)));
    }
    match home::home_dir().map(|home_dir| home_dir.join(".easybj.yml")) {
        Some(path) if path.is_file() => Ok((parse_config_from_file(&path)?, Some(path))),
        _ => Ok((Config::default(), None)),
    }
}

/// Reads a shoe of whitespace-separated rank labels.
pub fn read_shoe_file(filename: &Path) -> Result<ListShoe> {
    let file_content = fs::read_to_string(filename).map_err(|source| Error::ReadShoe {
        path: filename.display().to_string(),
        source,
    })?;
    Ok(file_content.parse()?)
}

/// Writes dealt cards in the format [`read_shoe_file`] reads.
pub fn write_shoe_file(filename: &Path, cards: &[Card]) -> Result<()> {
    fs::write(filename, format_cards(cards) + "\n").map_err(|source| Error::WriteShoe {
        path: filename.display().to_string(),
        source,
    })
}

/// A table of any cell type, borrowed from [`Tables`].
#[derive(Debug, Clone, Copy)]
pub enum AnyTable<'a> {
    Number(&'a Table<f64>),
    Action(&'a Table<Action>),
}

impl AnyTable<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            AnyTable::Number(table) => table.name(),
            AnyTable::Action(table) => table.name(),
        }
    }
}

pub fn select_table(tables: &Tables, name: TableName) -> AnyTable<'_> {
    match name {
        TableName::Initial => AnyTable::Number(&tables.initial),
        TableName::Dealer => AnyTable::Number(&tables.dealer_odds),
        TableName::Stand => AnyTable::Number(&tables.stand),
        TableName::Hit => AnyTable::Number(&tables.hit),
        TableName::Double => AnyTable::Number(&tables.double),
        TableName::Split0 => AnyTable::Number(&tables.split0),
        TableName::Split1 => AnyTable::Number(&tables.split1),
        TableName::Split2 => AnyTable::Number(&tables.split2),
        TableName::Split3 => AnyTable::Number(&tables.split3),
        TableName::Optimal => AnyTable::Number(&tables.optimal),
        TableName::Strategy => AnyTable::Action(&tables.strategy),
    }
}
