//! Discrete time: ticks and horizons.
//!
//! Time is a finite set of discrete steps `{0, ..., H}`. A [`Horizon`] fixes `H`; a [`Tick`]
//! indexes one step.
use std::fmt;

use crate::error::Error;

/// One discrete time step.
pub type Tick = u32;

/// The largest tick considered by a translation.
///
/// # Invariants
///
/// - The horizon is non-negative; signed inputs are checked by [`Horizon::try_from`].
/// - The tick set is `0..=H`, so a horizon of `0` still has one tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Horizon(Tick);

impl Horizon {
    pub const fn new(last: Tick) -> Self {
        Horizon(last)
    }

    /// Returns the last tick `H`.
    pub const fn last(self) -> Tick {
        self.0
    }

    /// Number of ticks, `H + 1`.
    pub fn len(self) -> usize {
        self.0 as usize + 1
    }

    pub fn contains(self, tick: Tick) -> bool {
        tick <= self.0
    }

    /// Iterates over `0..=H`.
    pub fn ticks(self) -> impl DoubleEndedIterator<Item = Tick> {
        0..=self.0
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl From<Tick> for Horizon {
    fn from(last: Tick) -> Self {
        Horizon(last)
    }
}

impl From<Horizon> for Tick {
    fn from(horizon: Horizon) -> Self {
        horizon.0
    }
}

impl TryFrom<i64> for Horizon {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(Error::InvalidArgument(format!("horizon must be non-negative, got {}", value)));
        }
        Tick::try_from(value)
            .map(Horizon)
            .map_err(|_| Error::InvalidArgument(format!("horizon {} is too large", value)))
    }
}
