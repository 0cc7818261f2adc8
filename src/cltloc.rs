//! Target vocabulary of the translation.
//!
//! A [`Prop`] is either an atom of the source formula or a fresh theta symbol standing for a
//! subformula. A [`Lit`] is a proposition observed at one tick, written `p(t)`. Each fresh
//! theta is pinned down by a [`Constraint`] `theta(t) <-> expr`, where `expr` is an [`Expr`]
//! over literals of the subformula's operands.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::atom::Atom;
use crate::formula::FormulaId;
use crate::types::Tick;

/// Fresh symbol introduced for a non-atomic subformula.
///
/// Symbols are scoped by a namespace; two converters sharing a namespace over the same arena
/// produce the same symbol for the same node.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ThetaVar {
    namespace: Arc<str>,
    node: FormulaId,
}

impl ThetaVar {
    pub(crate) fn new(namespace: Arc<str>, node: FormulaId) -> Self {
        Self { namespace, node }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The subformula this symbol stands for.
    pub fn node(&self) -> FormulaId {
        self.node
    }
}

impl Display for ThetaVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.namespace, self.node.index())
    }
}

/// A proposition of the target logic.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Prop {
    Atom(Atom),
    Theta(ThetaVar),
}

impl Prop {
    pub fn is_theta(&self) -> bool {
        matches!(self, Prop::Theta(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Prop::Atom(atom) => Some(atom),
            Prop::Theta(_) => None,
        }
    }

    pub fn as_theta(&self) -> Option<&ThetaVar> {
        match self {
            Prop::Theta(theta) => Some(theta),
            Prop::Atom(_) => None,
        }
    }
}

impl Display for Prop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Prop::Atom(atom) => write!(f, "{}", atom),
            Prop::Theta(theta) => write!(f, "{}", theta),
        }
    }
}

impl From<Atom> for Prop {
    fn from(atom: Atom) -> Self {
        Prop::Atom(atom)
    }
}

/// A proposition at a tick.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    prop: Prop,
    tick: Tick,
}

impl Lit {
    pub fn new(prop: impl Into<Prop>, tick: Tick) -> Self {
        Self {
            prop: prop.into(),
            tick,
        }
    }

    pub fn prop(&self) -> &Prop {
        &self.prop
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.prop, self.tick)
    }
}

/// Boolean expression over literals.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr {
    True,
    False,
    Lit(Lit),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn lit(lit: Lit) -> Self {
        Expr::Lit(lit)
    }

    pub fn not(expr: Self) -> Self {
        match expr {
            Expr::True => Expr::False,
            Expr::False => Expr::True,
            _ => Expr::Not(Box::new(expr)),
        }
    }

    /// Conjunction of `items`; the empty conjunction is [`Expr::True`].
    pub fn all(items: impl IntoIterator<Item = Expr>) -> Self {
        let mut items: Vec<Expr> = items.into_iter().collect();
        match items.len() {
            0 => Expr::True,
            1 => items.pop().unwrap_or(Expr::True),
            _ => Expr::And(items),
        }
    }

    /// Disjunction of `items`; the empty disjunction is [`Expr::False`].
    pub fn any(items: impl IntoIterator<Item = Expr>) -> Self {
        let mut items: Vec<Expr> = items.into_iter().collect();
        match items.len() {
            0 => Expr::False,
            1 => items.pop().unwrap_or(Expr::False),
            _ => Expr::Or(items),
        }
    }

    /// Evaluates the expression, reading literal values from `value`.
    pub fn eval<F>(&self, value: &mut F) -> bool
    where
        F: FnMut(&Lit) -> bool,
    {
        match self {
            Expr::True => true,
            Expr::False => false,
            Expr::Lit(lit) => value(lit),
            Expr::Not(e) => !e.eval(value),
            Expr::And(es) => es.iter().all(|e| e.eval(value)),
            Expr::Or(es) => es.iter().any(|e| e.eval(value)),
        }
    }

    /// Calls `f` on every literal occurrence, left to right.
    pub fn visit_lits<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Lit),
    {
        match self {
            Expr::True | Expr::False => {}
            Expr::Lit(lit) => f(lit),
            Expr::Not(e) => e.visit_lits(f),
            Expr::And(es) | Expr::Or(es) => es.iter().for_each(|e| e.visit_lits(f)),
        }
    }

    pub fn lits(&self) -> Vec<&Lit> {
        let mut lits = Vec::new();
        self.visit_lits(&mut |lit| lits.push(lit));
        lits
    }

    /// Ticks referenced by the expression.
    pub fn ticks(&self) -> BTreeSet<Tick> {
        self.lits().into_iter().map(Lit::tick).collect()
    }

    fn is_compound(&self) -> bool {
        matches!(self, Expr::And(_) | Expr::Or(_))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let join = |f: &mut Formatter<'_>, es: &[Expr], op: &str| -> std::fmt::Result {
            for (i, e) in es.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                if e.is_compound() {
                    write!(f, "({})", e)?;
                } else {
                    write!(f, "{}", e)?;
                }
            }
            Ok(())
        };
        match self {
            Expr::True => write!(f, "true"),
            Expr::False => write!(f, "false"),
            Expr::Lit(lit) => write!(f, "{}", lit),
            Expr::Not(e) if e.is_compound() => write!(f, "!({})", e),
            Expr::Not(e) => write!(f, "!{}", e),
            Expr::And(es) => join(f, es, "&"),
            Expr::Or(es) => join(f, es, "|"),
        }
    }
}

/// Definition `theta <-> definition` of one fresh theta at one tick.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Constraint {
    theta: Lit,
    definition: Expr,
}

impl Constraint {
    pub(crate) fn new(theta: Lit, definition: Expr) -> Self {
        Self { theta, definition }
    }

    pub fn theta(&self) -> &Lit {
        &self.theta
    }

    pub fn definition(&self) -> &Expr {
        &self.definition
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.theta, self.definition)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::atom::AtomRegistry;

    fn lits() -> (Lit, Lit, Lit) {
        let mut registry = AtomRegistry::new();
        let a = registry.intern("a");
        let b = registry.intern("b");
        (Lit::new(a.clone(), 3), Lit::new(b.clone(), 3), Lit::new(b, 4))
    }

    #[test]
    fn test_empty_aggregates() {
        assert_eq!(Expr::all(Vec::<Expr>::new()), Expr::True);
        assert_eq!(Expr::any(Vec::<Expr>::new()), Expr::False);
    }

    #[test]
    fn test_singleton_aggregates() {
        let (a3, _, _) = lits();
        assert_eq!(Expr::all([Expr::lit(a3.clone())]), Expr::Lit(a3.clone()));
        assert_eq!(Expr::any([Expr::lit(a3.clone())]), Expr::Lit(a3));
    }

    #[test]
    fn test_not_constants() {
        assert_eq!(Expr::not(Expr::True), Expr::False);
        assert_eq!(Expr::not(Expr::False), Expr::True);
    }

    #[test]
    fn test_display() {
        let (a3, b3, b4) = lits();
        let e = Expr::any([
            Expr::lit(b3),
            Expr::all([Expr::lit(a3.clone()), Expr::lit(b4)]),
        ]);
        assert_eq!(e.to_string(), "b(3) | (a(3) & b(4))");
        assert_eq!(Expr::not(e).to_string(), "!(b(3) | (a(3) & b(4)))");
        assert_eq!(Expr::not(Expr::lit(a3)).to_string(), "!a(3)");
    }

    #[test]
    fn test_eval() {
        let (a3, b3, b4) = lits();
        let e = Expr::any([
            Expr::lit(b3.clone()),
            Expr::all([Expr::lit(a3.clone()), Expr::lit(b4.clone())]),
        ]);
        assert!(e.eval(&mut |l: &Lit| *l == b3));
        assert!(e.eval(&mut |l: &Lit| *l == a3 || *l == b4));
        assert!(!e.eval(&mut |l: &Lit| *l == a3));
        assert_eq!(e.ticks().into_iter().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(e.lits(), vec![&b3, &a3, &b4]);
    }

    #[test]
    fn test_theta_display() {
        let theta = ThetaVar::new(Arc::from("theta"), crate::formula::FormulaArena::new().atom("x"));
        let lit = Lit::new(Prop::Theta(theta.clone()), 2);
        assert_eq!(theta.to_string(), "theta0");
        assert_eq!(lit.to_string(), "theta0(2)");
        let c = Constraint::new(lit, Expr::True);
        assert_eq!(c.to_string(), "theta0(2) <-> true");
    }
}
