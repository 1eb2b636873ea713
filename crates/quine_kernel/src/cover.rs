//! Two-level covers: DNF, CNF, absorption, and the complete sum.
//!
//! Both conversions go through NNF and then normalize recursively: children
//! first, a simplify to flatten, an early return when the node already has
//! the target shape, absorption over the clause family, and finally a
//! cartesian distribution with one more absorption round.
//!
//! # Absorption
//!
//! A cover is treated as a family of literal sets, one per clause. For each
//! clause pair a single merge walk over the sorted literal ids computes
//! both containment flags; the superset clause is redundant (`a + a·b = a`,
//! dually `a · (a + b) = a`). Clauses holding a non-literal operand are
//! incomparable and simply survive.
//!
//! # Complete sum
//!
//! `complete_sum` produces the DNF of all prime implicants by Shannon
//! expansion: split on the first literal of the first clause, recur on both
//! cofactors, and take the DNF of `(v + cs0) · (~v + cs1)`; the absorption
//! inside the DNF conversion deletes every non-prime term.

use std::cmp::Ordering;

use crate::array::{cartesian, Array2d};
use crate::expr::{map_children, mark_flags, nary, Expr, ExprMap, NNF, SIMPLE};
use crate::kind::Kind;

impl Expr {
    /// Converts to disjunctive normal form: an OR of AND clauses.
    pub fn to_dnf(&self) -> Expr {
        let out = flatten(&self.to_nnf(), Kind::Or);
        mark_flags(&out, SIMPLE | NNF);
        out
    }

    /// Converts to conjunctive normal form: an AND of OR clauses.
    pub fn to_cnf(&self) -> Expr {
        let out = flatten(&self.to_nnf(), Kind::And);
        mark_flags(&out, SIMPLE | NNF);
        out
    }

    /// Structural DNF check: a constant, literal, clause, or sum of
    /// clauses.
    pub fn is_dnf(&self) -> bool {
        is_form(self, Kind::Or)
    }

    /// Structural CNF check: a constant, literal, clause, or product of
    /// clauses.
    pub fn is_cnf(&self) -> bool {
        is_form(self, Kind::And)
    }

    /// The DNF containing every prime implicant.
    pub fn complete_sum(&self) -> Expr {
        let dnf = if self.is_dnf() {
            self.clone()
        } else {
            self.to_dnf()
        };
        shannon_sum(&dnf)
    }
}

/// Two-level shape test. A constant of either polarity counts: ONE is the
/// sum of one empty product and ZERO the empty sum, and dually for CNF.
fn is_form(ex: &Expr, outer: Kind) -> bool {
    if ex.is_const() || ex.is_literal() {
        return true;
    }
    let inner = outer.dual();
    if ex.kind() == inner {
        return ex.is_clause();
    }
    if ex.kind() == outer {
        return ex
            .args()
            .iter()
            .all(|x| x.is_literal() || (x.kind() == inner && x.is_clause()));
    }
    false
}

/// Recursive two-level normalizer. `outer` is OR for DNF, AND for CNF.
fn flatten(ex: &Expr, outer: Kind) -> Expr {
    if ex.is_atom() {
        return ex.clone();
    }
    let inner = outer.dual();

    let node = map_children(ex, &mut |x| flatten(x, outer)).simplify();
    if is_form(&node, outer) {
        return node;
    }

    // The node is the inner kind over literals and outer-kind covers; an
    // outer-kind node would already have the target shape.
    debug_assert_eq!(node.kind(), inner);
    let node = nary(inner, absorb(node.args())).simplify();
    if is_form(&node, outer) {
        return node;
    }

    // Distribute: one operand row per child, one pick per product term.
    let rows: Array2d = node
        .args()
        .iter()
        .map(|x| {
            if x.kind() == outer {
                x.args().to_vec()
            } else {
                vec![x.clone()]
            }
        })
        .collect();
    let terms = cartesian(inner, &rows);
    let sum = nary(outer, terms).simplify();

    if sum.kind() == outer {
        nary(outer, absorb(sum.args())).simplify()
    } else {
        sum
    }
}

/// Drops every clause another clause absorbs. Children must be simplified,
/// so each clause's literals arrive sorted.
fn absorb(children: &[Expr]) -> Vec<Expr> {
    let sets: Vec<Option<Vec<i32>>> = children.iter().map(clause_lits).collect();
    let mut alive = vec![true; children.len()];
    for i in 0..children.len() {
        if !alive[i] {
            continue;
        }
        let Some(xs) = &sets[i] else { continue };
        for j in i + 1..children.len() {
            if !alive[j] {
                continue;
            }
            let Some(ys) = &sets[j] else { continue };
            let (xs_lte_ys, ys_lte_xs) = containment(xs, ys);
            if xs_lte_ys {
                alive[j] = false;
            } else if ys_lte_xs {
                alive[i] = false;
                break;
            }
        }
    }
    children
        .iter()
        .zip(&alive)
        .filter(|(_, keep)| **keep)
        .map(|(c, _)| c.clone())
        .collect()
}

/// The literal ids of a clause, or `None` for an incomparable child.
fn clause_lits(ex: &Expr) -> Option<Vec<i32>> {
    if ex.is_literal() {
        return Some(vec![ex.uniqid()]);
    }
    if ex.is_clause() {
        return Some(ex.args().iter().map(Expr::uniqid).collect());
    }
    None
}

/// One merge walk computing both subset flags over sorted id lists.
fn containment(xs: &[i32], ys: &[i32]) -> (bool, bool) {
    let mut xs_lte_ys = true;
    let mut ys_lte_xs = true;
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        match lit_order(xs[i], ys[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                xs_lte_ys = false;
                i += 1;
            }
            Ordering::Greater => {
                ys_lte_xs = false;
                j += 1;
            }
        }
    }
    if i < xs.len() {
        xs_lte_ys = false;
    }
    if j < ys.len() {
        ys_lte_xs = false;
    }
    (xs_lte_ys, ys_lte_xs)
}

/// The sort order simplification leaves literals in: variable, then sign.
fn lit_order(a: i32, b: i32) -> Ordering {
    (a.abs(), a).cmp(&(b.abs(), b))
}

/// Shannon cofactor recursion over a DNF input.
fn shannon_sum(f: &Expr) -> Expr {
    if f.depth() <= 1 {
        return f.clone();
    }
    let v = splitting_var(f);

    let mut at_zero = ExprMap::new();
    at_zero.insert(v.clone(), Expr::zero());
    let cs0 = shannon_sum(&f.restrict(&at_zero));

    let mut at_one = ExprMap::new();
    at_one.insert(v.clone(), Expr::one());
    let cs1 = shannon_sum(&f.restrict(&at_one));

    Expr::and([
        Expr::or([v.clone(), cs0]),
        Expr::or([Expr::not(&v), cs1]),
    ])
    .to_dnf()
}

/// The first literal of the first clause, as a positive variable.
fn splitting_var(f: &Expr) -> Expr {
    let first = &f.args()[0];
    let lit = if first.is_literal() {
        first.clone()
    } else {
        first.args()[0].clone()
    };
    if lit.kind() == Kind::Comp {
        Expr::not(&lit)
    } else {
        lit
    }
}
