//! Formula to DOT (Graphviz) conversion.
//!
//! The generated graph follows these conventions:
//! - **Atoms** are rendered as boxes at the bottom (sink rank)
//! - **Operators** are rendered as ellipses labeled with the operator and its interval
//! - **Edges** point from an operator to its operands; the left operand of a binary operator
//!   is solid, the right one dashed
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use mitli_rs::formula::FormulaArena;
//! use mitli_rs::interval::Interval;
//!
//! let mut arena = FormulaArena::new();
//! let a = arena.atom("a");
//! let b = arena.atom("b");
//! let f = arena.until(Interval::new(0, 2).unwrap(), a, b).unwrap();
//!
//! let dot = arena.to_dot(&[f]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use crate::formula::{Formula, FormulaArena, FormulaId};

/// Configuration options for DOT output generation.
///
/// # Examples
///
/// ```
/// use mitli_rs::dot::DotConfig;
/// use mitli_rs::formula::FormulaArena;
///
/// let mut arena = FormulaArena::new();
/// let a = arena.atom("a");
/// let config = DotConfig {
///     atom_shape: "circle",
///     ..DotConfig::default()
/// };
///
/// let dot = arena.to_dot_with_config(&[a], &config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for operator nodes (default: "ellipse")
    pub node_shape: &'static str,
    /// Shape for atoms (default: "box")
    pub atom_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for edges to the left (or only) operand (default: "solid")
    pub left_edge_style: &'static str,
    /// Style for edges to the right operand (default: "dashed")
    pub right_edge_style: &'static str,
    /// Whether to show node ids in labels (default: false)
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "ellipse",
            atom_shape: "box",
            root_shape: "rect",
            left_edge_style: "solid",
            right_edge_style: "dashed",
            show_ids: false,
        }
    }
}

fn label(formula: &Formula) -> String {
    match formula {
        Formula::Atom(atom) => atom.to_string(),
        Formula::Not(_) => "!".to_string(),
        Formula::And(..) => "&".to_string(),
        Formula::Or(..) => "|".to_string(),
        Formula::Next(_) => "X".to_string(),
        Formula::Globally(i, _) => format!("G{}", i),
        Formula::Eventually(i, _) => format!("F{}", i),
        Formula::Until(i, _, _) => format!("U{}", i),
        Formula::Since(i, _, _) => format!("S{}", i),
    }
}

impl FormulaArena {
    /// Converts the formulas rooted at `roots` to DOT format.
    ///
    /// Subformulas shared between roots (atoms in particular) are displayed once.
    pub fn to_dot(&self, roots: &[FormulaId]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts formulas to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, roots: &[FormulaId], config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut nodes = std::collections::BTreeSet::new();
        for &root in roots {
            nodes.extend(self.descendants(root));
        }

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let (atoms, operators): (Vec<FormulaId>, Vec<FormulaId>) =
            nodes.iter().copied().partition(|&id| self[id].is_atom());

        let render = |id: FormulaId| {
            let text = label(&self[id]);
            if config.show_ids {
                format!("\"{} {}\"", id, text)
            } else {
                format!("\"{}\"", text)
            }
        };

        writeln!(dot, "{{ rank=sink")?;
        for &id in atoms.iter() {
            writeln!(dot, "{} [shape={}, label={}];", id.index(), config.atom_shape, render(id))?;
        }
        writeln!(dot, "}}")?;

        for &id in operators.iter() {
            writeln!(dot, "{} [label={}];", id.index(), render(id))?;
        }

        for &id in operators.iter() {
            for (k, child) in self[id].children().into_iter().enumerate() {
                let style = if k == 0 {
                    config.left_edge_style
                } else {
                    config.right_edge_style
                };
                writeln!(dot, "{} -> {} [style={}];", id.index(), child.index(), style)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, &root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, self.display(root))?;
        }
        writeln!(dot, "}}")?;
        for (i, &root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -> {};", i, root.index())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    #[test]
    fn test_to_dot_basic() {
        let mut arena = FormulaArena::new();
        let a = arena.atom("a");
        let g = arena.globally(Interval::new(1, 2).unwrap(), a).unwrap();

        let dot = arena.to_dot(&[g]).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("0 [shape=box, label=\"a\"];"));
        assert!(dot.contains("1 [label=\"G[1,2]\"];"));
        assert!(dot.contains("1 -> 0 [style=solid];"));
        assert!(dot.contains("r0 -> 1;"));
    }

    #[test]
    fn test_to_dot_binary_edges() {
        let mut arena = FormulaArena::new();
        let a = arena.atom("a");
        let b = arena.atom("b");
        let u = arena.until(Interval::unbounded(0), a, b).unwrap();

        let dot = arena.to_dot(&[u]).unwrap();
        assert!(dot.contains("2 -> 0 [style=solid];"));
        assert!(dot.contains("2 -> 1 [style=dashed];"));
        assert!(dot.contains("label=\"U[0,inf]\""));
    }

    #[test]
    fn test_to_dot_multiple_roots_share_atoms() {
        let mut arena = FormulaArena::new();
        let a = arena.atom("a");
        let x = arena.next(a).unwrap();
        let not = arena.not(a).unwrap();

        let dot = arena.to_dot(&[x, not]).unwrap();
        assert_eq!(dot.matches("label=\"a\"").count(), 1);
        assert!(dot.contains("r0 -> 1;"));
        assert!(dot.contains("r1 -> 2;"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let mut arena = FormulaArena::new();
        let a = arena.atom("a");
        let config = DotConfig {
            show_ids: true,
            atom_shape: "circle",
            ..DotConfig::default()
        };

        let dot = arena.to_dot_with_config(&[a], &config).unwrap();
        assert!(dot.contains("0 [shape=circle, label=\"#0 a\"];"));
    }
}
