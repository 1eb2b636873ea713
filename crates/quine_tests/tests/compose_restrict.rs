//! Composition and restriction properties.

mod common;

use common::{assert_equivalent, eval};
use quine_kernel::{Expr, ExprMap, Kind, Pool};

#[test]
fn composing_with_an_empty_map_is_the_identity() {
    let pool = Pool::new();
    let ex = Expr::implies(
        &Expr::or([pool.literal(1), pool.literal(-2)]),
        &Expr::xor([pool.literal(2), pool.literal(3)]),
    );
    assert_eq!(ex.compose(&ExprMap::new()), ex);
}

#[test]
fn restrict_agrees_with_compose_then_simplify() {
    let pool = Pool::new();
    let (a, b, c) = (pool.literal(1), pool.literal(2), pool.literal(3));
    let ex = Expr::or([
        Expr::and([a.clone(), b.clone()]),
        Expr::xor([b.clone(), c.clone()]),
    ]);
    let mut point = ExprMap::new();
    point.insert(a.clone(), Expr::one());
    point.insert(b.clone(), Expr::zero());
    assert_eq!(
        ex.restrict(&point).to_string(),
        ex.compose(&point).simplify().to_string()
    );
}

#[test]
fn composition_substitutes_whole_expressions() {
    let pool = Pool::new();
    let (a, b, c) = (pool.literal(1), pool.literal(2), pool.literal(3));
    let f = Expr::or([a.clone(), Expr::and([b.clone(), pool.literal(-1)])]);
    let mut map = ExprMap::new();
    map.insert(a.clone(), Expr::and([b.clone(), c.clone()]));
    let g = f.compose(&map);
    // Every occurrence of a (and ~a, negated) now reads b·c.
    for model in 0..8u32 {
        let expect = {
            let bc = eval(&Expr::and([b.clone(), c.clone()]), &pool, 3, model).unwrap();
            let bv = model >> 1 & 1 == 1;
            bc || (bv && !bc)
        };
        assert_eq!(eval(&g, &pool, 3, model), Some(expect));
    }
}

#[test]
fn shannon_expansion_reconstructs_the_function() {
    let pool = Pool::new();
    let (a, b, c) = (pool.literal(1), pool.literal(2), pool.literal(3));
    let f = Expr::xor([a.clone(), Expr::and([b.clone(), c.clone()])]);

    let mut at_one = ExprMap::new();
    at_one.insert(a.clone(), Expr::one());
    let mut at_zero = ExprMap::new();
    at_zero.insert(a.clone(), Expr::zero());

    let expansion = Expr::or([
        Expr::and([a.clone(), f.restrict(&at_one)]),
        Expr::and([Expr::not(&a), f.restrict(&at_zero)]),
    ]);
    assert_equivalent(&f, &expansion, &pool, 3);
}

#[test]
fn cofactors_drop_the_variable_from_the_support() {
    let pool = Pool::new();
    let (a, b) = (pool.literal(1), pool.literal(2));
    let f = Expr::or([Expr::and([a.clone(), b.clone()]), pool.literal(-1)]);
    let mut point = ExprMap::new();
    point.insert(a.clone(), Expr::zero());
    let cofactor = f.restrict(&point);
    assert!(cofactor.support().iter().all(|v| *v != a));
}

#[test]
fn variable_to_variable_renaming() {
    let pool = Pool::new();
    let (a, b, d) = (pool.literal(1), pool.literal(2), pool.literal(4));
    let f = Expr::and([a.clone(), Expr::or([pool.literal(-1), b.clone()])]);
    let mut map = ExprMap::new();
    map.insert(a.clone(), d.clone());
    let g = f.compose(&map);
    assert_eq!(g.kind(), Kind::And);
    assert_eq!(g.args()[0], d);
    assert_eq!(g.args()[1].args()[0], pool.literal(-4));
}
