//! Propositional atoms and their interning registry.
//!
//! An [`Atom`] is identified by its name only. The [`AtomRegistry`] hands out a single
//! canonical [`Atom`] per name, so every occurrence of `a` in a formula shares the same
//! backing string.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A named propositional atom.
///
/// Cloning is cheap (reference-counted name). Equality, ordering and hashing are by name.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interning table for atoms.
#[derive(Debug, Default)]
pub struct AtomRegistry {
    atoms: HashSet<Atom>,
}

impl AtomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical atom for `name`, creating it on first use.
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(atom) = self.atoms.get(name) {
            return atom.clone();
        }
        let atom = Atom(Arc::from(name));
        self.atoms.insert(atom.clone());
        atom
    }

    /// Looks up an already interned atom.
    pub fn get(&self, name: &str) -> Option<&Atom> {
        self.atoms.get(name)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterates over all interned atoms (in no particular order).
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }
}
