//! Translation tests against the public API.
//!
//! Tests cover the concrete window scenarios, the horizon policy, and semantic properties
//! checked by exhaustive evaluation on small traces.

use test_log::test;

use mitli_rs::atom::Atom;
use mitli_rs::cltloc::{Expr, Lit};
use mitli_rs::converter::{translate, Converter, ConverterConfig};
use mitli_rs::error::Error;
use mitli_rs::formula::{FormulaArena, FormulaId};
use mitli_rs::interval::Interval;
use mitli_rs::trace::Trace;

fn atom(arena: &FormulaArena, name: &str) -> Atom {
    arena.atoms().get(name).unwrap().clone()
}

fn at(arena: &FormulaArena, name: &str, t: u32) -> Expr {
    Expr::lit(Lit::new(atom(arena, name), t))
}

fn def(converter: &Converter<'_>, id: FormulaId, t: u32) -> Expr {
    converter.definition(id, t).unwrap().unwrap().clone()
}

/// Checks that `f` and `g` evaluate identically at every tick of every trace.
fn assert_equivalent(arena: &FormulaArena, f: FormulaId, g: FormulaId, horizon: u32) {
    let cf = translate(arena, f, horizon).unwrap();
    let cg = translate(arena, g, horizon).unwrap();
    let atoms: Vec<Atom> = arena.atoms_of(f).union(&arena.atoms_of(g)).cloned().collect();
    for trace in Trace::enumerate(horizon, &atoms).unwrap() {
        let vf = cf.evaluate(&trace).unwrap();
        let vg = cg.evaluate(&trace).unwrap();
        for t in 0..=horizon {
            assert_eq!(vf.get(f, t), vg.get(g, t), "differ at tick {} on {:?}", t, trace);
        }
    }
}

// ─── Window Scenarios ──────────────────────────────────────────────────────────

#[test]
fn globally_window_is_truncated_at_horizon() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let g = arena.globally(Interval::new(1, 2).unwrap(), a).unwrap();

    let converter = translate(&arena, g, 5).unwrap();

    assert_eq!(def(&converter, g, 0), Expr::all([at(&arena, "a", 1), at(&arena, "a", 2)]));
    assert_eq!(def(&converter, g, 3), Expr::all([at(&arena, "a", 4), at(&arena, "a", 5)]));
    assert_eq!(def(&converter, g, 4), at(&arena, "a", 5));
    assert_eq!(def(&converter, g, 5), Expr::True);
}

#[test]
fn globally_never_references_ticks_beyond_horizon() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let g = arena.globally(Interval::new(0, 3).unwrap(), a).unwrap();

    let converter = translate(&arena, g, 2).unwrap();

    let ticks: Vec<u32> = def(&converter, g, 0).ticks().into_iter().collect();
    assert_eq!(ticks, vec![0, 1, 2]);
    for c in converter.constraints().unwrap() {
        assert!(c.definition().ticks().iter().all(|&t| t <= 2));
    }
}

#[test]
fn eventually_window_is_truncated_at_horizon() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let f = arena.eventually(Interval::new(0, 1).unwrap(), a).unwrap();

    let converter = translate(&arena, f, 3).unwrap();

    assert_eq!(def(&converter, f, 3), at(&arena, "a", 3));
    assert_eq!(def(&converter, f, 2), Expr::any([at(&arena, "a", 2), at(&arena, "a", 3)]));
}

#[test]
fn until_candidates_are_limited_to_horizon() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let u = arena.until(Interval::new(0, 2).unwrap(), a, b).unwrap();

    let converter = translate(&arena, u, 4).unwrap();

    let expected = Expr::any([
        at(&arena, "b", 3),
        Expr::all([at(&arena, "a", 3), at(&arena, "b", 4)]),
    ]);
    assert_eq!(def(&converter, u, 3), expected);
}

#[test]
fn since_window_is_truncated_at_zero() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let s = arena.since(Interval::new(0, 3).unwrap(), a, b).unwrap();

    let converter = translate(&arena, s, 4).unwrap();

    assert_eq!(def(&converter, s, 0), at(&arena, "b", 0));
    assert_eq!(
        def(&converter, s, 1),
        Expr::any([
            at(&arena, "b", 1),
            Expr::all([at(&arena, "a", 1), at(&arena, "b", 0)]),
        ])
    );
    assert!(def(&converter, s, 4).ticks().iter().all(|&t| t >= 1));
}

// ─── Theta Mapping ─────────────────────────────────────────────────────────────

#[test]
fn lone_atom_converter() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");

    let mut converter = Converter::new(&arena, a, 5).unwrap();
    converter.apply();

    let family = converter.thetas(a).unwrap();
    assert_eq!(family.len(), 6);
    for (t, theta) in family.into_iter().enumerate() {
        assert_eq!(theta.prop().as_atom(), Some(&atom(&arena, "a")));
        assert_eq!(theta.tick(), t as u32);
    }
}

#[test]
fn atoms_keep_their_identity_inside_composites() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let or = arena.or(a, b).unwrap();
    let f = arena.eventually(Interval::new(1, 3).unwrap(), or).unwrap();

    let converter = translate(&arena, f, 4).unwrap();

    for t in 0..=4 {
        assert_eq!(converter.theta(a, t).unwrap(), &Lit::new(atom(&arena, "a"), t));
        assert_eq!(converter.theta(b, t).unwrap(), &Lit::new(atom(&arena, "b"), t));
        assert!(converter.theta(f, t).unwrap().prop().is_theta());
    }
    let symbols = converter.fresh_symbols().unwrap();
    assert_eq!(symbols.iter().map(|s| s.node()).collect::<Vec<_>>(), vec![or, f]);
}

#[test]
fn apply_twice_changes_nothing() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let s = arena.since(Interval::unbounded(1), a, b).unwrap();
    let x = arena.next(s).unwrap();

    let mut converter = Converter::new(&arena, x, 3).unwrap();
    converter.apply();
    let first: Vec<String> = converter.constraints().unwrap().iter().map(|c| c.to_string()).collect();
    converter.apply();
    let second: Vec<String> = converter.constraints().unwrap().iter().map(|c| c.to_string()).collect();

    assert_eq!(first, second);
    assert_eq!(converter.stats().fresh_symbols, 2);
}

#[test]
fn larger_horizon_only_adds_entries() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let u = arena.until(Interval::new(0, 1).unwrap(), a, b).unwrap();
    let g = arena.globally(Interval::new(0, 1).unwrap(), u).unwrap();

    let small = translate(&arena, g, 3).unwrap();
    let large = translate(&arena, g, 6).unwrap();

    // Windows of ticks 0..=1 reach at most tick 3, so nothing is truncated at H=3.
    for &id in small.nodes() {
        for t in 0..=3 {
            assert_eq!(small.theta(id, t).unwrap(), large.theta(id, t).unwrap());
        }
        for t in 0..=1 {
            assert_eq!(small.definition(id, t).unwrap(), large.definition(id, t).unwrap());
        }
    }
    assert!(large.stats().constraints > small.stats().constraints);
}

#[test]
fn converters_with_distinct_namespaces_do_not_clash() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let x = arena.next(a).unwrap();

    let left = Converter::with_config(&arena, x, 2, &ConverterConfig { namespace: "l".to_string() });
    let right = Converter::with_config(&arena, x, 2, &ConverterConfig { namespace: "r".to_string() });
    let (mut left, mut right) = (left.unwrap(), right.unwrap());
    left.apply();
    right.apply();

    assert_ne!(left.theta(x, 0).unwrap(), right.theta(x, 0).unwrap());
    assert_eq!(left.theta(a, 0).unwrap(), right.theta(a, 0).unwrap());
}

#[test]
fn atoms_shaped_like_thetas_are_rejected() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("theta1");
    let not = arena.not(a).unwrap();

    assert!(matches!(translate(&arena, not, 0), Err(Error::InvalidArgument(_))));

    let config = ConverterConfig { namespace: "aux".to_string() };
    let mut converter = Converter::with_config(&arena, not, 0, &config).unwrap();
    converter.apply();
    assert_ne!(
        converter.theta(not, 0).unwrap().to_string(),
        converter.theta(a, 0).unwrap().to_string()
    );
    assert_eq!(converter.constraints().unwrap()[0].to_string(), "aux1(0) <-> !theta1(0)");

    // Only `{namespace}{digits}` can collide.
    let mut arena = FormulaArena::new();
    let a = arena.atom("theta");
    let b = arena.atom("theta_1");
    let and = arena.and(a, b).unwrap();
    assert!(translate(&arena, and, 1).is_ok());
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn query_before_apply_is_not_ready() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let f = arena.eventually(Interval::new(0, 1).unwrap(), a).unwrap();

    let converter = Converter::new(&arena, f, 3).unwrap();
    assert_eq!(converter.theta(f, 0), Err(Error::NotReady));
    assert_eq!(converter.definition(f, 0), Err(Error::NotReady));
    assert_eq!(converter.fresh_symbols(), Err(Error::NotReady));
}

#[test]
fn query_of_foreign_node_is_unknown() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let f = arena.eventually(Interval::new(0, 1).unwrap(), a).unwrap();
    let g = arena.globally(Interval::new(0, 1).unwrap(), b).unwrap();

    let converter = translate(&arena, f, 3).unwrap();
    assert_eq!(converter.theta(g, 0), Err(Error::UnknownFormula(g)));
    assert_eq!(converter.theta(b, 0), Err(Error::UnknownFormula(b)));
}

#[test]
fn invalid_construction_is_rejected() {
    let mut arena = FormulaArena::new();
    arena.atom("a");

    assert!(matches!(Interval::new(2, 1), Err(Error::InvalidFormula(_))));
    assert!(matches!(Interval::from_signed(-1, Some(1)), Err(Error::InvalidFormula(_))));

    // A node of another, larger arena does not exist here.
    let mut other = FormulaArena::new();
    let x = other.atom("x");
    let missing = other.not(x).unwrap();
    assert!(matches!(arena.next(missing), Err(Error::InvalidFormula(_))));
    assert!(matches!(Converter::new(&arena, missing, 1), Err(Error::InvalidArgument(_))));
}

// ─── Semantics ─────────────────────────────────────────────────────────────────

#[test]
fn double_negation_is_equivalent() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let u = arena.until(Interval::new(1, 2).unwrap(), a, b).unwrap();
    let not = arena.not(u).unwrap();
    let not_not = arena.not(not).unwrap();

    assert_equivalent(&arena, not_not, u, 3);
}

#[test]
fn eventually_is_true_until() {
    // F[l,u] b == (b | !b) U[l,u] b
    let mut arena = FormulaArena::new();
    let b = arena.atom("b");
    let not_b = arena.not(b).unwrap();
    let top = arena.or(b, not_b).unwrap();
    let f = arena.eventually(Interval::new(1, 2).unwrap(), b).unwrap();
    let u = arena.until(Interval::new(1, 2).unwrap(), top, b).unwrap();

    assert_equivalent(&arena, f, u, 4);
}

#[test]
fn globally_is_dual_of_eventually() {
    // G[l,u] a == !F[l,u] !a
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let g = arena.globally(Interval::new(0, 2).unwrap(), a).unwrap();
    let not_a = arena.not(a).unwrap();
    let f = arena.eventually(Interval::new(0, 2).unwrap(), not_a).unwrap();
    let not_f = arena.not(f).unwrap();

    assert_equivalent(&arena, g, not_f, 4);
}

#[test]
fn constraints_agree_with_bounded_semantics() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let x = arena.next(a).unwrap();
    let s = arena.since(Interval::new(0, 1).unwrap(), x, b).unwrap();
    let u = arena.until(Interval::unbounded(1), b, s).unwrap();
    let imp = arena.implies(a, u).unwrap();
    let g = arena.globally(Interval::new(0, 1).unwrap(), imp).unwrap();

    let horizon = 3;
    let converter = translate(&arena, g, horizon).unwrap();
    let atoms = [atom(&arena, "a"), atom(&arena, "b")];
    for trace in Trace::enumerate(horizon, &atoms).unwrap() {
        let valuation = converter.evaluate(&trace).unwrap();
        for &id in converter.nodes() {
            for t in 0..=horizon {
                assert_eq!(
                    valuation.get(id, t),
                    Some(arena.holds(id, &trace, t)),
                    "{} at tick {}",
                    arena.display(id),
                    t
                );
            }
        }
    }
}

// ─── Concurrency ───────────────────────────────────────────────────────────────

#[test]
fn converters_share_a_read_only_arena() {
    let mut arena = FormulaArena::new();
    let a = arena.atom("a");
    let b = arena.atom("b");
    let u = arena.until(Interval::new(0, 3).unwrap(), a, b).unwrap();

    let arena = &arena;
    let sizes: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u32)
            .map(|h| scope.spawn(move || translate(arena, u, h).unwrap().stats().constraints))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(sizes, vec![1, 2, 3, 4]);
}
