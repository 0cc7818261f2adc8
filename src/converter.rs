//! Bounded translation of MITL formulas into CLTLoc constraints.
//!
//! A [`Converter`] is built for one formula and one [`Horizon`] `H`. [`Converter::apply`]
//! walks the formula bottom-up and assigns every (subformula, tick) pair in `0..=H` a theta
//! literal. Atoms are their own theta. Every other node gets a fresh theta symbol, defined by
//! one [`Constraint`] per tick over the thetas of its operands:
//!
//! | Node              | `theta(t)`                                                        |
//! |-------------------|-------------------------------------------------------------------|
//! | `a`               | `a(t)`                                                            |
//! | `!p`              | `!p(t)`                                                           |
//! | `p & q`           | `p(t) & q(t)`                                                     |
//! | `p \| q`          | `p(t) \| q(t)`                                                    |
//! | `X p`             | `p(t+1)`, or `false` at `t = H`                                   |
//! | `G[l,u] p`        | AND of `p(s)` for `s` in `[t+l, min(t+u, H)]`                     |
//! | `F[l,u] p`        | OR of `p(s)` for `s` in `[t+l, min(t+u, H)]`                      |
//! | `p U[l,u] q`      | OR over `s` in `[t+l, min(t+u, H)]` of `p(t..s) & q(s)`           |
//! | `p S[l,u] q`      | OR over `s` in `[max(t-u, 0), t-l]` of `p(s+1..=t) & q(s)`        |
//!
//! Windows are clamped to `0..=H`. Ticks outside the horizon are never referenced: an empty
//! conjunction is `true` and an empty disjunction is `false`.
//!
//! # Example
//!
//! ```
//! use mitli_rs::converter::translate;
//! use mitli_rs::formula::FormulaArena;
//! use mitli_rs::interval::Interval;
//!
//! let mut arena = FormulaArena::new();
//! let a = arena.atom("a");
//! let g = arena.globally(Interval::new(1, 2).unwrap(), a).unwrap();
//!
//! let converter = translate(&arena, g, 5).unwrap();
//! assert_eq!(converter.definition(g, 0).unwrap().unwrap().to_string(), "a(1) & a(2)");
//! assert_eq!(converter.definition(g, 4).unwrap().unwrap().to_string(), "a(5)");
//! assert_eq!(converter.definition(g, 5).unwrap().unwrap().to_string(), "true");
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, trace};

use crate::cltloc::{Constraint, Expr, Lit, Prop, ThetaVar};
use crate::error::{Error, Result};
use crate::formula::{Formula, FormulaArena, FormulaId};
use crate::types::{Horizon, Tick};

/// Configuration of a [`Converter`].
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Prefix of fresh theta symbols (default: `"theta"`).
    ///
    /// Give each converter a distinct namespace when their constraints end up in the same
    /// solver instance.
    pub namespace: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            namespace: "theta".to_string(),
        }
    }
}

/// Size of a translation.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ConverterStats {
    /// Subformulas of the top formula.
    pub nodes: usize,
    /// Entries of the theta mapping, atoms included.
    pub thetas: usize,
    /// Distinct fresh theta symbols.
    pub fresh_symbols: usize,
    pub constraints: usize,
    /// Literal occurrences over all constraint definitions.
    pub literal_occurrences: usize,
}

pub struct Converter<'a> {
    formulas: &'a FormulaArena,
    root: FormulaId,
    horizon: Horizon,
    namespace: Arc<str>,
    /// Subformulas of `root`, bottom-up.
    nodes: Vec<FormulaId>,
    thetas: HashMap<(FormulaId, Tick), Lit>,
    /// Index into `constraints` of each fresh theta's definition.
    definitions: HashMap<(FormulaId, Tick), usize>,
    constraints: Vec<Constraint>,
    applied: bool,
}

impl<'a> Converter<'a> {
    pub fn new(formulas: &'a FormulaArena, root: FormulaId, horizon: Tick) -> Result<Self> {
        Self::with_config(formulas, root, horizon, &ConverterConfig::default())
    }

    pub fn with_config(
        formulas: &'a FormulaArena,
        root: FormulaId,
        horizon: Tick,
        config: &ConverterConfig,
    ) -> Result<Self> {
        if !formulas.contains(root) {
            return Err(Error::InvalidArgument(format!("formula {} does not exist", root)));
        }
        if config.namespace.is_empty() {
            return Err(Error::InvalidArgument("theta namespace must not be empty".to_string()));
        }
        if let Some(atom) = formulas
            .atoms_of(root)
            .into_iter()
            .find(|atom| shadows_theta(atom.name(), &config.namespace))
        {
            return Err(Error::InvalidArgument(format!(
                "atom '{}' clashes with theta namespace '{}'",
                atom, config.namespace
            )));
        }
        Ok(Self {
            formulas,
            root,
            horizon: Horizon::new(horizon),
            namespace: Arc::from(config.namespace.as_str()),
            nodes: formulas.descendants(root),
            thetas: HashMap::new(),
            definitions: HashMap::new(),
            constraints: Vec::new(),
            applied: false,
        })
    }
}

/// Whether `name` has the shape `{namespace}{digits}` of a rendered theta symbol.
fn shadows_theta(name: &str, namespace: &str) -> bool {
    name.strip_prefix(namespace)
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

impl Debug for Converter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("root", &self.root)
            .field("horizon", &self.horizon)
            .field("namespace", &self.namespace)
            .field("nodes", &self.nodes.len())
            .field("constraints", &self.constraints.len())
            .field("applied", &self.applied)
            .finish()
    }
}

/// Builds a converter and runs [`Converter::apply`] on it.
pub fn translate(formulas: &FormulaArena, root: FormulaId, horizon: Tick) -> Result<Converter<'_>> {
    let mut converter = Converter::new(formulas, root, horizon)?;
    converter.apply();
    Ok(converter)
}

impl<'a> Converter<'a> {
    pub fn formulas(&self) -> &'a FormulaArena {
        self.formulas
    }

    pub fn root(&self) -> FormulaId {
        self.root
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Subformulas of the top formula, bottom-up.
    pub fn nodes(&self) -> &[FormulaId] {
        &self.nodes
    }

    /// Runs the translation. Calling it again is a no-op.
    pub fn apply(&mut self) {
        if self.applied {
            debug!("apply: {} already translated, skipping", self.root);
            return;
        }

        debug!(
            "apply: translating {} ({} nodes) up to tick {}",
            self.formulas.display(self.root),
            self.nodes.len(),
            self.horizon.last()
        );

        let formulas = self.formulas;
        for i in 0..self.nodes.len() {
            let id = self.nodes[i];
            self.translate_node(id, &formulas[id]);
        }
        self.applied = true;

        debug!(
            "apply: done, {} thetas, {} constraints",
            self.thetas.len(),
            self.constraints.len()
        );
    }

    fn translate_node(&mut self, id: FormulaId, formula: &Formula) {
        // Future operators fill from the horizon downwards, past ones from tick 0 upwards.
        let ticks: Vec<Tick> = if formula.is_future() {
            self.horizon.ticks().rev().collect()
        } else {
            self.horizon.ticks().collect()
        };

        for t in ticks {
            let key = (id, t);
            if self.thetas.contains_key(&key) {
                continue;
            }

            let theta = match formula {
                Formula::Atom(atom) => Lit::new(atom.clone(), t),
                _ => {
                    let theta = Lit::new(Prop::Theta(ThetaVar::new(self.namespace.clone(), id)), t);
                    let definition = self.define(formula, t);
                    trace!("{} <-> {}", theta, definition);
                    self.definitions.insert(key, self.constraints.len());
                    self.constraints.push(Constraint::new(theta.clone(), definition));
                    theta
                }
            };
            self.thetas.insert(key, theta);
        }

        if !formula.is_atom() {
            debug!("translated {} = {}", id, self.formulas.display(id));
        }
    }

    /// Theta of an operand; operands are always translated before their parents.
    fn at(&self, id: FormulaId, t: Tick) -> Expr {
        Expr::lit(self.thetas[&(id, t)].clone())
    }

    fn define(&self, formula: &Formula, t: Tick) -> Expr {
        let last = self.horizon.last();
        // Window of a temporal node at `t`, clamped to the horizon.
        let window = formula.timing().and_then(|timed| {
            let interval = timed.interval();
            if formula.is_past() {
                interval.past_window(t)
            } else {
                interval.future_window(t, last)
            }
        });
        match *formula {
            Formula::Atom(ref atom) => Expr::lit(Lit::new(atom.clone(), t)),
            Formula::Not(a) => Expr::not(self.at(a, t)),
            Formula::And(a, b) => Expr::all([self.at(a, t), self.at(b, t)]),
            Formula::Or(a, b) => Expr::any([self.at(a, t), self.at(b, t)]),
            Formula::Next(a) => {
                if t < last {
                    self.at(a, t + 1)
                } else {
                    Expr::False
                }
            }
            Formula::Globally(_, a) => match window {
                Some((lo, hi)) => Expr::all((lo..=hi).map(|s| self.at(a, s))),
                None => Expr::True,
            },
            Formula::Eventually(_, a) => match window {
                Some((lo, hi)) => Expr::any((lo..=hi).map(|s| self.at(a, s))),
                None => Expr::False,
            },
            Formula::Until(_, a, b) => match window {
                Some((lo, hi)) => Expr::any((lo..=hi).map(|s| {
                    let hold = (t..s).map(|r| self.at(a, r));
                    Expr::all(hold.chain([self.at(b, s)]))
                })),
                None => Expr::False,
            },
            Formula::Since(_, a, b) => match window {
                Some((lo, hi)) => Expr::any((lo..=hi).rev().map(|s| {
                    let hold = (s + 1..=t).map(|r| self.at(a, r));
                    Expr::all(hold.chain([self.at(b, s)]))
                })),
                None => Expr::False,
            },
        }
    }
}

// Queries
impl<'a> Converter<'a> {
    fn check(&self, id: FormulaId) -> Result<()> {
        if !self.applied {
            return Err(Error::NotReady);
        }
        if self.nodes.binary_search(&id).is_err() {
            return Err(Error::UnknownFormula(id));
        }
        Ok(())
    }

    fn check_tick(&self, t: Tick) -> Result<()> {
        if self.horizon.contains(t) {
            Ok(())
        } else {
            Err(Error::TickOutOfRange {
                tick: t,
                horizon: self.horizon.last(),
            })
        }
    }

    /// Theta of `id` at tick `t`.
    pub fn theta(&self, id: FormulaId, t: Tick) -> Result<&Lit> {
        self.check(id)?;
        self.check_tick(t)?;
        Ok(&self.thetas[&(id, t)])
    }

    /// Thetas of `id`, indexed by tick `0..=H`.
    pub fn thetas(&self, id: FormulaId) -> Result<Vec<&Lit>> {
        self.check(id)?;
        Ok(self.horizon.ticks().map(|t| &self.thetas[&(id, t)]).collect())
    }

    /// Defining expression of the theta of `id` at `t`; `None` for atoms.
    pub fn definition(&self, id: FormulaId, t: Tick) -> Result<Option<&Expr>> {
        self.check(id)?;
        self.check_tick(t)?;
        Ok(self
            .definitions
            .get(&(id, t))
            .map(|&i| self.constraints[i].definition()))
    }

    /// All definitions, operands before parents.
    pub fn constraints(&self) -> Result<&[Constraint]> {
        if !self.applied {
            return Err(Error::NotReady);
        }
        Ok(&self.constraints)
    }

    /// Fresh theta symbols, bottom-up.
    pub fn fresh_symbols(&self) -> Result<Vec<ThetaVar>> {
        if !self.applied {
            return Err(Error::NotReady);
        }
        Ok(self
            .nodes
            .iter()
            .filter(|&&id| !self.formulas[id].is_atom())
            .map(|&id| ThetaVar::new(self.namespace.clone(), id))
            .collect())
    }

    pub fn stats(&self) -> ConverterStats {
        ConverterStats {
            nodes: self.nodes.len(),
            thetas: self.thetas.len(),
            fresh_symbols: self.definitions.keys().map(|&(id, _)| id).collect::<HashSet<_>>().len(),
            constraints: self.constraints.len(),
            literal_occurrences: self.constraints.iter().map(|c| c.definition().lits().len()).sum(),
        }
    }
}
