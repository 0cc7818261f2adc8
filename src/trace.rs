//! Finite traces and bounded evaluation.
//!
//! A [`Trace`] fixes which atoms hold at each tick of a horizon. Formulas can be evaluated on
//! it directly ([`FormulaArena::holds`]), or through the constraints of a translation
//! ([`Converter::evaluate`]). Both follow the same horizon policy, so for every node and
//! tick the two must agree.

use std::collections::{BTreeSet, HashMap};

use crate::atom::Atom;
use crate::cltloc::{Lit, Prop};
use crate::converter::Converter;
use crate::error::{Error, Result};
use crate::formula::{Formula, FormulaArena, FormulaId};
use crate::types::{Horizon, Tick};

/// Atoms holding at each tick of `0..=H`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Trace {
    horizon: Horizon,
    states: Vec<BTreeSet<Atom>>,
}

impl Trace {
    /// The trace where no atom ever holds.
    pub fn new(horizon: Tick) -> Self {
        let horizon = Horizon::new(horizon);
        Self {
            horizon,
            states: vec![BTreeSet::new(); horizon.len()],
        }
    }

    /// Builds a trace from a bit pattern: bit `t * atoms.len() + i` sets `atoms[i]` at `t`.
    ///
    /// Bits beyond 64 are treated as unset.
    pub fn from_bits(horizon: Tick, atoms: &[Atom], bits: u64) -> Self {
        let mut trace = Trace::new(horizon);
        for t in trace.horizon.ticks() {
            for (i, atom) in atoms.iter().enumerate() {
                let bit = t as usize * atoms.len() + i;
                if bit < 64 && (bits >> bit) & 1 == 1 {
                    trace.states[t as usize].insert(atom.clone());
                }
            }
        }
        trace
    }

    /// All traces over `atoms`, or `None` if there are more than `2^20` of them.
    pub fn enumerate(horizon: Tick, atoms: &[Atom]) -> Option<impl Iterator<Item = Trace> + '_> {
        let bits = Horizon::new(horizon).len() * atoms.len();
        if bits > 20 {
            return None;
        }
        Some((0..1u64 << bits).map(move |b| Trace::from_bits(horizon, atoms, b)))
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn set(&mut self, atom: &Atom, t: Tick, value: bool) -> Result<()> {
        let Some(state) = self.states.get_mut(t as usize) else {
            return Err(Error::TickOutOfRange {
                tick: t,
                horizon: self.horizon.last(),
            });
        };
        if value {
            state.insert(atom.clone());
        } else {
            state.remove(atom);
        }
        Ok(())
    }

    /// Whether `atom` holds at `t`; nothing holds beyond the horizon.
    pub fn holds(&self, atom: &Atom, t: Tick) -> bool {
        self.states.get(t as usize).is_some_and(|s| s.contains(atom))
    }
}

impl FormulaArena {
    /// Bounded semantics: whether `id` holds at tick `t` of `trace`.
    ///
    /// Windows are clamped to the trace horizon exactly as in the translation.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this arena.
    pub fn holds(&self, id: FormulaId, trace: &Trace, t: Tick) -> bool {
        let last = trace.horizon().last();
        match self[id] {
            Formula::Atom(ref atom) => trace.holds(atom, t),
            Formula::Not(a) => !self.holds(a, trace, t),
            Formula::And(a, b) => self.holds(a, trace, t) && self.holds(b, trace, t),
            Formula::Or(a, b) => self.holds(a, trace, t) || self.holds(b, trace, t),
            Formula::Next(a) => t < last && self.holds(a, trace, t + 1),
            Formula::Globally(interval, a) => interval
                .future_window(t, last)
                .map_or(true, |(lo, hi)| (lo..=hi).all(|s| self.holds(a, trace, s))),
            Formula::Eventually(interval, a) => interval
                .future_window(t, last)
                .is_some_and(|(lo, hi)| (lo..=hi).any(|s| self.holds(a, trace, s))),
            Formula::Until(interval, a, b) => interval.future_window(t, last).is_some_and(|(lo, hi)| {
                (lo..=hi).any(|s| self.holds(b, trace, s) && (t..s).all(|r| self.holds(a, trace, r)))
            }),
            Formula::Since(interval, a, b) => interval.past_window(t).is_some_and(|(lo, hi)| {
                (lo..=hi).any(|s| self.holds(b, trace, s) && (s + 1..=t).all(|r| self.holds(a, trace, r)))
            }),
        }
    }
}

/// Truth value of every (subformula, tick) entry of a translation on one trace.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Valuation {
    values: HashMap<(FormulaId, Tick), bool>,
}

impl Valuation {
    pub fn get(&self, id: FormulaId, t: Tick) -> Option<bool> {
        self.values.get(&(id, t)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Converter<'_> {
    /// Computes every theta on `trace` by propagating the constraint definitions.
    pub fn evaluate(&self, trace: &Trace) -> Result<Valuation> {
        if !self.is_applied() {
            return Err(Error::NotReady);
        }
        if trace.horizon() != self.horizon() {
            return Err(Error::InvalidArgument(format!(
                "trace horizon {} does not match converter horizon {}",
                trace.horizon().last(),
                self.horizon().last()
            )));
        }

        let mut values = HashMap::new();
        let mut thetas = HashMap::new();
        for &id in self.nodes() {
            for t in self.horizon().ticks() {
                let theta = self.theta(id, t)?;
                let value = match self.definition(id, t)? {
                    None => match theta.prop() {
                        Prop::Atom(atom) => trace.holds(atom, t),
                        Prop::Theta(_) => false,
                    },
                    Some(definition) => definition.eval(&mut |lit: &Lit| match lit.prop() {
                        Prop::Atom(atom) => trace.holds(atom, lit.tick()),
                        Prop::Theta(_) => thetas.get(lit).copied().unwrap_or(false),
                    }),
                };
                thetas.insert(theta.clone(), value);
                values.insert((id, t), value);
            }
        }
        Ok(Valuation { values })
    }
}
