//! Error type shared by formula construction, conversion and evaluation.

use std::fmt::{Display, Formatter};

use crate::formula::FormulaId;
use crate::types::Tick;

/// Errors raised eagerly at the point where a caller contract is violated.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// Malformed formula: missing operand, or an invalid timing interval.
    InvalidFormula(String),
    /// Bad converter argument: negative horizon, missing formula, mismatched trace.
    InvalidArgument(String),
    /// A theta was queried before [`Converter::apply`][crate::converter::Converter::apply].
    NotReady,
    /// The queried node is not part of the converter's formula tree.
    UnknownFormula(FormulaId),
    /// The queried tick lies beyond the horizon.
    TickOutOfRange { tick: Tick, horizon: Tick },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidFormula(msg) => write!(f, "Invalid formula: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::NotReady => write!(f, "Converter is not ready: call apply() first"),
            Error::UnknownFormula(id) => write!(f, "Formula {} is not part of the converted tree", id),
            Error::TickOutOfRange { tick, horizon } => {
                write!(f, "Tick {} is out of range for horizon {}", tick, horizon)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
