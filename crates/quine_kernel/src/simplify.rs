//! Algebraic simplification.
//!
//! `simplify` is bottom-up: children are canonicalized first, the parent is
//! rebuilt only when a child changed, and a per-kind rule then collapses
//! the rebuilt node. The SIMPLE flag memoizes the whole pass; a flagged
//! node is returned as-is, and every returned tree is flagged on the way
//! out, so no node is simplified twice.
//!
//! # Canonical shape
//!
//! For OR/AND the rule flattens same-kind children, drops identity
//! operands, collapses on the dominator or a complementary literal pair,
//! sorts operands (literals first, by variable then sign, everything else
//! in kind order), and removes duplicate neighbors. XOR does the same with
//! a parity bit and cancellation; EQ folds its constants into flags. NOT,
//! IMPL, and ITE apply their constant tables.
//!
//! Operand equality throughout is handle identity; nothing here compares
//! structure.

use std::cmp::Ordering;

use crate::expr::{dominator_of, identity_of, map_children, mark_flags, nary, Expr, SIMPLE};
use crate::kind::Kind;

impl Expr {
    /// Returns the canonicalized form of this expression.
    ///
    /// The result and all of its descendants carry the SIMPLE flag; calling
    /// `simplify` again returns the same handle.
    pub fn simplify(&self) -> Expr {
        if self.is_simple() {
            return self.clone();
        }
        let out = if self.is_atom() {
            self.clone()
        } else {
            let node = map_children(self, &mut |x| x.simplify());
            match node.kind() {
                Kind::Or | Kind::And => orand_simplify(&node),
                Kind::Xor => xor_simplify(&node),
                Kind::Eq => eq_simplify(&node),
                Kind::Not => not_simplify(&node),
                Kind::Impl => impl_simplify(&node),
                Kind::Ite => ite_simplify(&node),
                // The rebuild itself collapsed to an atom.
                _ => node,
            }
        };
        mark_flags(&out, SIMPLE);
        out
    }
}

/// Operand order: literals first, by variable then signed id, so a
/// variable's complement lands right next to it; everything else keeps its
/// relative order within a kind class.
fn operand_cmp(a: &Expr, b: &Expr) -> Ordering {
    match (a.is_literal(), b.is_literal()) {
        (true, true) => {
            let (x, y) = (a.uniqid(), b.uniqid());
            (x.abs(), x).cmp(&(y.abs(), y))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => (a.kind() as u8).cmp(&(b.kind() as u8)),
    }
}

fn complementary(a: &Expr, b: &Expr) -> bool {
    a.is_literal() && b.is_literal() && a.uniqid() == -b.uniqid()
}

/// NOT over a literal either way, or a complementary literal pair.
fn inverse_of(a: &Expr, b: &Expr) -> bool {
    complementary(a, b)
        || (a.kind() == Kind::Not && a.args()[0] == *b)
        || (b.kind() == Kind::Not && b.args()[0] == *a)
}

fn orand_simplify(node: &Expr) -> Expr {
    let kind = node.kind();
    let identity = identity_of(kind);
    let dominator = dominator_of(kind);

    // Flatten one level; same-kind children are already canonical, so
    // their operands cannot nest further.
    let mut flat: Vec<Expr> = Vec::with_capacity(node.args().len());
    for x in node.args() {
        if *x == dominator {
            return dominator;
        }
        if *x == identity {
            continue;
        }
        if x.kind() == kind {
            flat.extend(x.args().iter().cloned());
        } else {
            flat.push(x.clone());
        }
    }

    flat.sort_by(operand_cmp);

    let mut out: Vec<Expr> = Vec::with_capacity(flat.len());
    for x in flat {
        if let Some(last) = out.last() {
            if *last == x {
                continue;
            }
            if complementary(last, &x) {
                return dominator;
            }
        }
        out.push(x);
    }
    nary(kind, out)
}

fn xor_simplify(node: &Expr) -> Expr {
    let mut parity = false;
    let mut flat: Vec<Expr> = Vec::with_capacity(node.args().len());
    for x in node.args() {
        if *x == Expr::zero() {
            continue;
        }
        if *x == Expr::one() {
            parity = !parity;
            continue;
        }
        if x.kind() == Kind::Xor {
            flat.extend(x.args().iter().cloned());
        } else {
            flat.push(x.clone());
        }
    }

    flat.sort_by(operand_cmp);

    let mut out: Vec<Expr> = Vec::with_capacity(flat.len());
    for x in flat {
        if let Some(last) = out.last() {
            if *last == x {
                // x ^ x = 0
                out.pop();
                continue;
            }
            if complementary(last, &x) {
                // x ^ ~x = 1
                out.pop();
                parity = !parity;
                continue;
            }
        }
        out.push(x);
    }

    let base = nary(Kind::Xor, out);
    if parity {
        Expr::not(&base)
    } else {
        base
    }
}

fn eq_simplify(node: &Expr) -> Expr {
    let mut zero = false;
    let mut one = false;
    let mut flat: Vec<Expr> = Vec::with_capacity(node.args().len());
    for x in node.args() {
        if *x == Expr::zero() {
            zero = true;
        } else if *x == Expr::one() {
            one = true;
        } else {
            flat.push(x.clone());
        }
    }
    if zero && one {
        return Expr::zero();
    }

    flat.sort_by(operand_cmp);

    let mut xs: Vec<Expr> = Vec::with_capacity(flat.len());
    for x in flat {
        if let Some(last) = xs.last() {
            if *last == x {
                continue;
            }
            if complementary(last, &x) {
                return Expr::zero();
            }
        }
        xs.push(x);
    }

    if zero {
        match xs.len() {
            0 => Expr::one(),
            1 => Expr::not(&xs[0]),
            _ => Expr::nor(xs).simplify(),
        }
    } else if one {
        match xs.len() {
            0 => Expr::one(),
            1 => xs[0].clone(),
            _ => Expr::and(xs).simplify(),
        }
    } else {
        Expr::equal(xs)
    }
}

fn not_simplify(node: &Expr) -> Expr {
    // The child is already simple, so the constructor's folding rules
    // resolve constants, literals, and double negation.
    Expr::not(&node.args()[0])
}

fn impl_simplify(node: &Expr) -> Expr {
    let p = &node.args()[0];
    let q = &node.args()[1];
    if *p == Expr::zero() || *q == Expr::one() {
        return Expr::one();
    }
    if *p == Expr::one() {
        return q.clone();
    }
    if *q == Expr::zero() {
        return Expr::not(p);
    }
    if p == q {
        return Expr::one();
    }
    if inverse_of(p, q) {
        // ~p -> p = p
        return q.clone();
    }
    Expr::implies(p, q)
}

fn ite_simplify(node: &Expr) -> Expr {
    let s = &node.args()[0];
    let d1 = &node.args()[1];
    let d0 = &node.args()[2];

    if *s == Expr::zero() {
        return d0.clone();
    }
    if *s == Expr::one() {
        return d1.clone();
    }
    if *d1 == Expr::zero() {
        if *d0 == Expr::zero() {
            return Expr::zero();
        }
        if *d0 == Expr::one() {
            return Expr::not(s);
        }
        // ITE(s, 0, d0) = ~s & d0
        return Expr::nor([s.clone(), Expr::not(d0)]).simplify();
    }
    if *d1 == Expr::one() {
        if *d0 == Expr::one() {
            return Expr::one();
        }
        if *d0 == Expr::zero() {
            return s.clone();
        }
        // ITE(s, 1, d0) = s | d0
        return Expr::or([s.clone(), d0.clone()]).simplify();
    }
    if *d0 == Expr::zero() {
        // ITE(s, d1, 0) = s & d1
        return Expr::and([s.clone(), d1.clone()]).simplify();
    }
    if *d0 == Expr::one() {
        // ITE(s, d1, 1) = ~s | d1
        return Expr::or([Expr::not(s), d1.clone()]).simplify();
    }
    if d1 == d0 {
        return d1.clone();
    }
    if s == d1 {
        return Expr::or([s.clone(), d0.clone()]).simplify();
    }
    if s == d0 {
        return Expr::and([s.clone(), d1.clone()]).simplify();
    }
    Expr::ite(s, d1, d0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pool;

    #[test]
    fn duplicate_operands_collapse() {
        let pool = Pool::new();
        let (a, b) = (pool.literal(1), pool.literal(2));
        let s = Expr::or([a.clone(), a.clone(), b.clone()]).simplify();
        assert_eq!(s.args(), &[a, b]);
        assert!(s.is_simple());
    }

    #[test]
    fn complementary_pair_dominates() {
        let pool = Pool::new();
        let a = pool.literal(1);
        let na = pool.literal(-1);
        assert_eq!(Expr::or([a.clone(), na.clone()]).simplify(), Expr::one());
        assert_eq!(Expr::and([a, na]).simplify(), Expr::zero());
    }

    #[test]
    fn identity_and_dominator_constants() {
        let pool = Pool::new();
        let a = pool.literal(1);
        assert_eq!(Expr::or([a.clone(), Expr::zero()]).simplify(), a);
        assert_eq!(Expr::or([a.clone(), Expr::one()]).simplify(), Expr::one());
        assert_eq!(Expr::and([a.clone(), Expr::one()]).simplify(), a);
        assert_eq!(Expr::and([a, Expr::zero()]).simplify(), Expr::zero());
    }

    #[test]
    fn nested_same_kind_operators_flatten() {
        let pool = Pool::new();
        let (a, b, c) = (pool.literal(1), pool.literal(2), pool.literal(3));
        let s = Expr::or([a.clone(), Expr::or([b.clone(), c.clone()])]).simplify();
        assert_eq!(s.args(), &[a, b, c]);
    }

    #[test]
    fn operands_sort_literals_first() {
        let pool = Pool::new();
        let (a, b) = (pool.literal(1), pool.literal(2));
        let inner = Expr::and([a.clone(), b.clone()]);
        let s = Expr::or([inner.clone(), b.clone(), a.clone()]).simplify();
        assert_eq!(s.args()[0], a);
        assert_eq!(s.args()[1], b);
        assert_eq!(s.args()[2].kind(), Kind::And);
    }

    #[test]
    fn xor_cancellation_and_parity() {
        let pool = Pool::new();
        let (a, b) = (pool.literal(1), pool.literal(2));
        assert_eq!(Expr::xor([a.clone(), a.clone(), b.clone()]).simplify(), b);
        assert_eq!(
            Expr::xor([a.clone(), pool.literal(-1)]).simplify(),
            Expr::one()
        );
        // One constant ONE flips to XNOR.
        let s = Expr::xor([Expr::one(), a.clone(), b.clone()]).simplify();
        assert_eq!(s.kind(), Kind::Not);
        assert_eq!(s.args()[0].kind(), Kind::Xor);
    }

    #[test]
    fn eq_constant_flags() {
        let pool = Pool::new();
        let (a, b) = (pool.literal(1), pool.literal(2));
        // eq(0, a, b) = neither a nor b
        let s = Expr::equal([Expr::zero(), a.clone(), b.clone()]).simplify();
        assert_eq!(s.kind(), Kind::Not);
        assert_eq!(s.args()[0].kind(), Kind::Or);
        // eq(1, a, b) = both
        let s = Expr::equal([Expr::one(), a.clone(), b.clone()]).simplify();
        assert_eq!(s.kind(), Kind::And);
        // both constants is unsatisfiable
        assert_eq!(
            Expr::equal([Expr::zero(), Expr::one(), a.clone()]).simplify(),
            Expr::zero()
        );
        // eq(0, a) = ~a
        assert_eq!(
            Expr::equal([Expr::zero(), a.clone()]).simplify(),
            pool.literal(-1)
        );
        // complementary operands
        assert_eq!(
            Expr::equal([a.clone(), pool.literal(-1)]).simplify(),
            Expr::zero()
        );
        // duplicates drop to a vacuous truth
        assert_eq!(Expr::equal([a.clone(), a]).simplify(), Expr::one());
    }

    #[test]
    fn impl_table() {
        let pool = Pool::new();
        let (p, q) = (pool.literal(1), pool.literal(2));
        assert_eq!(Expr::implies(&Expr::zero(), &q).simplify(), Expr::one());
        assert_eq!(Expr::implies(&p, &Expr::one()).simplify(), Expr::one());
        assert_eq!(Expr::implies(&Expr::one(), &q).simplify(), q);
        assert_eq!(Expr::implies(&p, &Expr::zero()).simplify(), pool.literal(-1));
        assert_eq!(Expr::implies(&p, &p).simplify(), Expr::one());
        assert_eq!(Expr::implies(&pool.literal(-1), &p).simplify(), p);
        let kept = Expr::implies(&p, &q).simplify();
        assert_eq!(kept.kind(), Kind::Impl);
    }

    #[test]
    fn ite_table() {
        let pool = Pool::new();
        let (s, d1, d0) = (pool.literal(1), pool.literal(2), pool.literal(3));
        assert_eq!(Expr::ite(&Expr::one(), &d1, &d0).simplify(), d1);
        assert_eq!(Expr::ite(&Expr::zero(), &d1, &d0).simplify(), d0);
        assert_eq!(
            Expr::ite(&s, &Expr::zero(), &Expr::one()).simplify(),
            pool.literal(-1)
        );
        assert_eq!(Expr::ite(&s, &Expr::one(), &Expr::zero()).simplify(), s);
        assert_eq!(Expr::ite(&s, &d1, &d1).simplify(), d1);
        // ITE(s, 1, d0) = s | d0
        let or = Expr::ite(&s, &Expr::one(), &d0).simplify();
        assert_eq!(or.kind(), Kind::Or);
        // ITE(s, d1, 0) = s & d1
        let and = Expr::ite(&s, &d1, &Expr::zero()).simplify();
        assert_eq!(and.kind(), Kind::And);
        // ITE(s, 0, d0) = ~s & d0, built as a NOR
        let nor = Expr::ite(&s, &Expr::zero(), &d0).simplify();
        assert_eq!(nor.kind(), Kind::Not);
        // ITE(s, s, d0) = s | d0 and ITE(s, d1, s) = s & d1
        assert_eq!(Expr::ite(&s, &s, &d0).simplify().kind(), Kind::Or);
        assert_eq!(Expr::ite(&s, &d1, &s).simplify().kind(), Kind::And);
    }

    #[test]
    fn simplify_is_idempotent_by_identity() {
        let pool = Pool::new();
        let ex = Expr::or([
            Expr::and([pool.literal(1), pool.literal(2)]),
            pool.literal(1),
            pool.literal(1),
        ]);
        let once = ex.simplify();
        let twice = once.simplify();
        assert_eq!(once, twice);
    }

    #[test]
    fn flags_are_marked_recursively() {
        let pool = Pool::new();
        let ex = Expr::or([
            Expr::and([pool.literal(1), pool.literal(2)]),
            pool.literal(3),
        ]);
        let s = ex.simplify();
        for node in s.iter_dfs() {
            assert!(node.is_simple());
        }
        assert!(!ex.is_simple());
    }

    #[test]
    fn logical_constants_pass_through() {
        let pool = Pool::new();
        let a = pool.literal(1);
        let s = Expr::or([Expr::logical(), a.clone()]).simplify();
        assert_eq!(s.kind(), Kind::Or);
        assert_eq!(s.args().len(), 2);
        assert!(s.args().contains(&Expr::logical()));
    }
}
