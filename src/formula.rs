//! MITL formula abstract syntax tree.
//!
//! Formulas live in a [`FormulaArena`] and refer to their operands by [`FormulaId`].
//! The arena is append-only: an operand must already exist when its parent is created, so
//! node indices form a bottom-up topological order and the structure is acyclic by
//! construction. Atom nodes are hash-consed by name.
//!
//! # Example
//!
//! ```
//! use mitli_rs::formula::FormulaArena;
//! use mitli_rs::interval::Interval;
//!
//! let mut arena = FormulaArena::new();
//! let a = arena.atom("a");
//! let b = arena.atom("b");
//! let until = arena.until(Interval::new(0, 2).unwrap(), a, b).unwrap();
//! let g = arena.globally(Interval::unbounded(0), until).unwrap();
//!
//! assert_eq!(arena.display(g).to_string(), "G[0,inf] (a U[0,2] b)");
//! assert_eq!(arena[until].children(), vec![a, b]);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::ops::Index;

use crate::atom::{Atom, AtomRegistry};
use crate::error::{Error, Result};
use crate::interval::{Interval, Timed};

/// Stable index of a node in a [`FormulaArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormulaId(u32);

impl FormulaId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for FormulaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A formula node.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Formula {
    Atom(Atom),
    Not(FormulaId),
    And(FormulaId, FormulaId),
    Or(FormulaId, FormulaId),
    /// X φ: φ holds at the next tick.
    Next(FormulaId),
    /// G[l,u] φ: φ holds at every tick of the window.
    Globally(Interval, FormulaId),
    /// F[l,u] φ: φ holds at some tick of the window.
    Eventually(Interval, FormulaId),
    /// φ U[l,u] ψ: ψ holds at some tick of the window, and φ holds from now until then.
    Until(Interval, FormulaId, FormulaId),
    /// φ S[l,u] ψ: ψ held at some tick of the past window, and φ has held since then.
    Since(Interval, FormulaId, FormulaId),
}

impl Formula {
    /// The single operand of a unary node.
    pub fn child(&self) -> Option<FormulaId> {
        match *self {
            Formula::Not(a) | Formula::Next(a) | Formula::Globally(_, a) | Formula::Eventually(_, a) => Some(a),
            _ => None,
        }
    }

    /// Immediate operands, left to right. Empty for atoms.
    pub fn children(&self) -> Vec<FormulaId> {
        match *self {
            Formula::Atom(_) => vec![],
            Formula::Not(a) | Formula::Next(a) | Formula::Globally(_, a) | Formula::Eventually(_, a) => vec![a],
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Until(_, a, b) | Formula::Since(_, a, b) => {
                vec![a, b]
            }
        }
    }

    /// Timing capability of temporal nodes; `None` for untimed ones.
    pub fn timing(&self) -> Option<&dyn Timed> {
        match self {
            Formula::Globally(i, _) | Formula::Eventually(i, _) | Formula::Until(i, _, _) | Formula::Since(i, _, _) => {
                Some(i as &dyn Timed)
            }
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Atom(_))
    }

    /// Whether the node refers to ticks before the current one.
    pub fn is_past(&self) -> bool {
        matches!(self, Formula::Since(..))
    }

    /// Whether the node refers to ticks after the current one.
    pub fn is_future(&self) -> bool {
        matches!(
            self,
            Formula::Next(_) | Formula::Globally(..) | Formula::Eventually(..) | Formula::Until(..)
        )
    }
}

/// Append-only storage for formula nodes.
#[derive(Debug, Default)]
pub struct FormulaArena {
    atoms: AtomRegistry,
    /// Topologically sorted nodes, by construction.
    nodes: Vec<Formula>,
    atom_nodes: HashMap<Atom, FormulaId>,
}

impl FormulaArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: FormulaId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: FormulaId) -> Option<&Formula> {
        self.nodes.get(id.index())
    }

    pub fn atoms(&self) -> &AtomRegistry {
        &self.atoms
    }

    /// Iterates over all nodes in bottom-up order.
    pub fn iter(&self) -> impl Iterator<Item = (FormulaId, &Formula)> {
        self.nodes.iter().enumerate().map(|(i, f)| (FormulaId(i as u32), f))
    }

    fn push(&mut self, formula: Formula) -> FormulaId {
        let id = FormulaId(self.nodes.len() as u32);
        self.nodes.push(formula);
        id
    }

    fn check(&self, id: FormulaId) -> Result<FormulaId> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(Error::InvalidFormula(format!("operand {} does not exist", id)))
        }
    }
}

// Builders
impl FormulaArena {
    /// Returns the node for atom `name`, shared by all its occurrences.
    pub fn atom(&mut self, name: &str) -> FormulaId {
        let atom = self.atoms.intern(name);
        if let Some(&id) = self.atom_nodes.get(&atom) {
            return id;
        }
        let id = self.push(Formula::Atom(atom.clone()));
        self.atom_nodes.insert(atom, id);
        id
    }

    pub fn not(&mut self, a: FormulaId) -> Result<FormulaId> {
        let a = self.check(a)?;
        Ok(self.push(Formula::Not(a)))
    }

    pub fn and(&mut self, a: FormulaId, b: FormulaId) -> Result<FormulaId> {
        let (a, b) = (self.check(a)?, self.check(b)?);
        Ok(self.push(Formula::And(a, b)))
    }

    pub fn or(&mut self, a: FormulaId, b: FormulaId) -> Result<FormulaId> {
        let (a, b) = (self.check(a)?, self.check(b)?);
        Ok(self.push(Formula::Or(a, b)))
    }

    /// `a -> b`, encoded as `!a | b`.
    pub fn implies(&mut self, a: FormulaId, b: FormulaId) -> Result<FormulaId> {
        self.check(b)?;
        let not_a = self.not(a)?;
        self.or(not_a, b)
    }

    pub fn next(&mut self, a: FormulaId) -> Result<FormulaId> {
        let a = self.check(a)?;
        Ok(self.push(Formula::Next(a)))
    }

    pub fn globally(&mut self, interval: Interval, a: FormulaId) -> Result<FormulaId> {
        let a = self.check(a)?;
        Ok(self.push(Formula::Globally(interval, a)))
    }

    pub fn eventually(&mut self, interval: Interval, a: FormulaId) -> Result<FormulaId> {
        let a = self.check(a)?;
        Ok(self.push(Formula::Eventually(interval, a)))
    }

    pub fn until(&mut self, interval: Interval, a: FormulaId, b: FormulaId) -> Result<FormulaId> {
        let (a, b) = (self.check(a)?, self.check(b)?);
        Ok(self.push(Formula::Until(interval, a, b)))
    }

    pub fn since(&mut self, interval: Interval, a: FormulaId, b: FormulaId) -> Result<FormulaId> {
        let (a, b) = (self.check(a)?, self.check(b)?);
        Ok(self.push(Formula::Since(interval, a, b)))
    }
}

// Traversal
impl FormulaArena {
    /// All nodes reachable from `root` (including it), in bottom-up order.
    pub fn descendants(&self, root: FormulaId) -> Vec<FormulaId> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.contains(id) || !visited.insert(id) {
                continue;
            }
            stack.extend(self[id].children());
        }
        visited.into_iter().collect()
    }

    /// Height of the tree rooted at `root`; atoms have depth 0.
    pub fn depth(&self, root: FormulaId) -> usize {
        let mut depth = HashMap::new();
        for id in self.descendants(root) {
            let d = self[id].children().iter().map(|c| depth[c] + 1).max().unwrap_or(0);
            depth.insert(id, d);
        }
        depth.get(&root).copied().unwrap_or(0)
    }

    /// Atoms occurring under `root`.
    pub fn atoms_of(&self, root: FormulaId) -> BTreeSet<Atom> {
        self.descendants(root)
            .into_iter()
            .filter_map(|id| match &self[id] {
                Formula::Atom(atom) => Some(atom.clone()),
                _ => None,
            })
            .collect()
    }

    /// Renders the formula rooted at `id` in ASCII syntax.
    pub fn display(&self, id: FormulaId) -> FormulaDisplay<'_> {
        FormulaDisplay { arena: self, id }
    }
}

impl Index<FormulaId> for FormulaArena {
    type Output = Formula;

    fn index(&self, id: FormulaId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

pub struct FormulaDisplay<'a> {
    arena: &'a FormulaArena,
    id: FormulaId,
}

impl FormulaDisplay<'_> {
    fn with(&self, id: FormulaId) -> Self {
        FormulaDisplay { arena: self.arena, id }
    }
}

impl Display for FormulaDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some(formula) = self.arena.get(self.id) else {
            return write!(f, "<{}>", self.id);
        };
        match *formula {
            Formula::Atom(ref atom) => write!(f, "{}", atom),
            Formula::Not(a) => write!(f, "!{}", self.with(a)),
            Formula::And(a, b) => write!(f, "({} & {})", self.with(a), self.with(b)),
            Formula::Or(a, b) => write!(f, "({} | {})", self.with(a), self.with(b)),
            Formula::Next(a) => write!(f, "X {}", self.with(a)),
            Formula::Globally(i, a) => write!(f, "G{} {}", i, self.with(a)),
            Formula::Eventually(i, a) => write!(f, "F{} {}", i, self.with(a)),
            Formula::Until(i, a, b) => write!(f, "({} U{} {})", self.with(a), i, self.with(b)),
            Formula::Since(i, a, b) => write!(f, "({} S{} {})", self.with(a), i, self.with(b)),
        }
    }
}
