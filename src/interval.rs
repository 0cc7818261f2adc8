//! Timing intervals of temporal operators.
//!
//! Every temporal operator carries a closed interval `[l, u]` of non-negative integers, where
//! the upper bound may be infinite. The [`Timed`] trait is the uniform way to read bounds off
//! a temporal node without matching on its concrete variant.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::types::Tick;

/// Upper bound of an interval.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Bound {
    Finite(Tick),
    Infinite,
}

impl Bound {
    pub fn is_infinite(self) -> bool {
        matches!(self, Bound::Infinite)
    }

    /// Returns the finite value, if any.
    pub fn finite(self) -> Option<Tick> {
        match self {
            Bound::Finite(value) => Some(value),
            Bound::Infinite => None,
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Finite(value) => write!(f, "{}", value),
            Bound::Infinite => write!(f, "inf"),
        }
    }
}

/// A closed timing interval `[lower, upper]`.
///
/// # Invariants
///
/// - `lower <= upper` (trivially true when `upper` is infinite)
/// - Both bounds are non-negative
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Interval {
    lower: Tick,
    upper: Bound,
}

impl Interval {
    /// Creates the bounded interval `[lower, upper]`.
    pub fn new(lower: Tick, upper: Tick) -> Result<Self> {
        if lower > upper {
            return Err(Error::InvalidFormula(format!(
                "interval lower bound {} exceeds upper bound {}",
                lower, upper
            )));
        }
        Ok(Self {
            lower,
            upper: Bound::Finite(upper),
        })
    }

    /// Creates the interval `[lower, inf)`.
    pub fn unbounded(lower: Tick) -> Self {
        Self {
            lower,
            upper: Bound::Infinite,
        }
    }

    /// Creates an interval from signed bounds, as produced by a front end.
    ///
    /// `upper = None` stands for an infinite upper bound.
    pub fn from_signed(lower: i64, upper: Option<i64>) -> Result<Self> {
        let lower = to_tick(lower)?;
        match upper {
            Some(upper) => Interval::new(lower, to_tick(upper)?),
            None => Ok(Interval::unbounded(lower)),
        }
    }

    pub fn lower(&self) -> Tick {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// Clamps the window `[t + lower, t + upper]` to `0..=last`.
    ///
    /// Returns `None` if nothing of the window is left.
    pub fn future_window(&self, t: Tick, last: Tick) -> Option<(Tick, Tick)> {
        let lo = t as u64 + self.lower as u64;
        let hi = match self.upper {
            Bound::Finite(upper) => (t as u64 + upper as u64).min(last as u64),
            Bound::Infinite => last as u64,
        };
        if lo > hi {
            None
        } else {
            Some((lo as Tick, hi as Tick))
        }
    }

    /// Clamps the window `[t - upper, t - lower]` to `0..=t`.
    ///
    /// Returns `None` if the whole window lies before tick `0`.
    pub fn past_window(&self, t: Tick) -> Option<(Tick, Tick)> {
        let hi = t.checked_sub(self.lower)?;
        let lo = match self.upper {
            Bound::Finite(upper) => t.saturating_sub(upper),
            Bound::Infinite => 0,
        };
        Some((lo, hi))
    }
}

fn to_tick(value: i64) -> Result<Tick> {
    if value < 0 {
        return Err(Error::InvalidFormula(format!("interval bound must be non-negative, got {}", value)));
    }
    Tick::try_from(value).map_err(|_| Error::InvalidFormula(format!("interval bound {} is too large", value)))
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = Error;

    fn try_from((lower, upper): (i64, i64)) -> Result<Self> {
        Interval::from_signed(lower, Some(upper))
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.lower, self.upper)
    }
}

/// Timing capability of temporal operators.
pub trait Timed {
    fn interval(&self) -> Interval;

    fn lower_bound(&self) -> Tick {
        self.interval().lower()
    }

    /// May be [`Bound::Infinite`].
    fn upper_bound(&self) -> Bound {
        self.interval().upper()
    }
}

impl Timed for Interval {
    fn interval(&self) -> Interval {
        *self
    }
}
