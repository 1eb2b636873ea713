//! Shared helpers: model enumeration and semantic evaluation.
//!
//! Evaluation goes through the engine itself: restricting an expression at
//! a constant point must collapse it to ZERO or ONE.

use quine_kernel::{Expr, ExprMap, Pool};

/// The first `n` variables of the pool, ids `1..=n`.
#[allow(dead_code)]
pub fn vars(pool: &Pool, n: i32) -> Vec<Expr> {
    (1..=n).map(|i| pool.literal(i)).collect()
}

/// Evaluates `ex` at the model encoded in the low `n` bits of `model`
/// (bit `i` is the value of variable `i + 1`). `None` if the restriction
/// does not collapse to a constant.
pub fn eval(ex: &Expr, pool: &Pool, n: u32, model: u32) -> Option<bool> {
    let mut point = ExprMap::new();
    for i in 0..n {
        let value = if model >> i & 1 == 1 {
            Expr::one()
        } else {
            Expr::zero()
        };
        point.insert(pool.literal(i as i32 + 1), value);
    }
    let restricted = ex.restrict(&point);
    if restricted == Expr::one() {
        Some(true)
    } else if restricted == Expr::zero() {
        Some(false)
    } else {
        None
    }
}

/// Asserts that `f` and `g` agree on every model over `n` variables.
pub fn assert_equivalent(f: &Expr, g: &Expr, pool: &Pool, n: u32) {
    for model in 0..1u32 << n {
        assert_eq!(
            eval(f, pool, n, model),
            eval(g, pool, n, model),
            "{} and {} differ at model {:0width$b}",
            f,
            g,
            model,
            width = n as usize,
        );
    }
}
