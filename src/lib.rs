//! # mitli-rs: bounded MITL to CLTLoc translation
//!
//! **`mitli-rs`** translates formulas of **Metric Interval Temporal Logic (MITL)** into a
//! discrete constraint logic (**CLTLoc**) over a finite horizon of ticks `0..=H`, ready for a
//! bounded satisfiability or model checking back end.
//!
//! ## How it works
//!
//! Every subformula φ gets, for every tick `t`, a *theta* literal standing for "φ holds at
//! `t`". Atoms are their own theta. Every other subformula gets a fresh symbol, pinned down by
//! a definition `theta(t) <-> expr` over the thetas of its operands. Temporal windows that
//! reach past the horizon are truncated: the encoding never asserts an obligation that the
//! finite horizon cannot witness.
//!
//! ## Key Features
//!
//! - **Arena-Based AST**: Formulas live in a [`FormulaArena`][crate::formula::FormulaArena] and are addressed by stable [`FormulaId`][crate::formula::FormulaId] indices. Operands always precede their parents, so the arena order is a bottom-up order.
//! - **Interned Atoms**: Each atom name maps to one shared [`Atom`][crate::atom::Atom].
//! - **Memoized Translation**: The [`Converter`][crate::converter::Converter] computes each (subformula, tick) pair exactly once.
//! - **Cross-Checking**: Constraint sets can be evaluated on a [`Trace`][crate::trace::Trace] and compared against the direct bounded semantics.
//!
//! ## Basic Usage
//!
//! ```rust
//! use mitli_rs::converter::translate;
//! use mitli_rs::formula::FormulaArena;
//! use mitli_rs::interval::Interval;
//!
//! // 1. Build the formula (a U[0,2] b)
//! let mut arena = FormulaArena::new();
//! let a = arena.atom("a");
//! let b = arena.atom("b");
//! let u = arena.until(Interval::new(0, 2).unwrap(), a, b).unwrap();
//!
//! // 2. Translate it for ticks 0..=4
//! let converter = translate(&arena, u, 4).unwrap();
//!
//! // 3. Query thetas and their definitions
//! let theta = converter.theta(u, 3).unwrap();
//! assert_eq!(theta.to_string(), "theta2(3)");
//! let definition = converter.definition(u, 3).unwrap().unwrap();
//! assert_eq!(definition.to_string(), "b(3) | (a(3) & b(4))");
//!
//! // 4. Atoms are never renamed
//! assert_eq!(converter.theta(a, 3).unwrap().to_string(), "a(3)");
//! ```
//!
//! ## Core Components
//!
//! - **[`formula`]**: The AST and its builder.
//! - **[`interval`]**: Timing intervals and the [`Timed`][crate::interval::Timed] capability.
//! - **[`converter`]**: The translation itself.
//! - **[`cltloc`]**: Theta symbols, literals, expressions and constraints.
//! - **[`trace`]**: Finite traces, reference semantics and constraint evaluation.
//! - **[`dot`]**: Utilities for visualizing formulas using Graphviz.

pub mod atom;
pub mod cltloc;
pub mod converter;
pub mod dot;
pub mod error;
pub mod formula;
pub mod interval;
pub mod trace;
pub mod types;
