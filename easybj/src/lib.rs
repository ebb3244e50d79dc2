//! Exact optimal strategy for Easy Blackjack, where both dealer cards are dealt face up.
//!
//! All tables are produced by [`calculate`], which runs the phases of [`calculation`] in
//! dependency order. Every phase returns its own table type, and a phase only accepts the
//! tables it depends on, so a table can never be read before it has been built.

use strum_macros::Display;
use thiserror::Error;

/// Declares the read-only table type produced by a single phase. The wrapped table can only
/// be constructed inside the module that declares it (and its children).
macro_rules! phase_table {
    ($(#[$meta:meta])* $name:ident, $cell:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(crate::Table<$cell>);

        impl std::ops::Deref for $name {
            type Target = crate::Table<$cell>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl $name {
            pub fn into_table(self) -> crate::Table<$cell> {
                self.0
            }
        }
    };
}

pub mod calculation;
pub mod code;
pub mod hand;
pub mod simulation;
pub mod strategy;
mod table;

pub use calculation::{calculate, Tables};
pub use code::Code;
pub use hand::{representative_hand, Card, Hand, Role};
pub use strategy::Action;
pub use table::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Decision {
    #[strum(to_string = "P")]
    Split,
    #[strum(to_string = "S")]
    Stand,
    #[strum(to_string = "H")]
    Hit,
    #[strum(to_string = "D")]
    Double,
    #[strum(to_string = "R")]
    Surrender,
}

/// Error type for every fallible engine operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid card: {0:?}")]
    InvalidCard(String),
    #[error("cannot encode {role} hand of {cards} cards (total {total}, soft aces {soft_aces})")]
    UnencodableHand {
        role: Role,
        cards: u8,
        total: u16,
        soft_aces: u8,
    },
    #[error("no two-card hand represents code {0}")]
    NoRepresentative(Code),
    #[error("{table}: ({row}, {col}) is not a valid key")]
    InvalidKey {
        table: &'static str,
        row: Code,
        col: Code,
    },
    #[error("{table}: ({row}, {col}) has no value")]
    MissingValue {
        table: &'static str,
        row: Code,
        col: Code,
    },
    #[error("{table}: distribution of {label} sums to {sum}")]
    DistributionSum {
        table: &'static str,
        label: String,
        sum: f64,
    },
    #[error("shoe ran out after {0} cards")]
    ShoeExhausted(usize),
    #[error("{decision} is not allowed for {code}")]
    IllegalDecision { decision: Decision, code: Code },
    #[error("no decision: {0}")]
    NoDecision(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
