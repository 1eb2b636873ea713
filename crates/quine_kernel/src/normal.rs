//! Structural rewrites: NOT-bubbling, binary split, negation normal form.
//!
//! # NOT-bubbling
//!
//! `push_down_not` is the De Morgan rewrite: a NOT over OR or AND flips to
//! the dual over negated children, a NOT over ITE negates the two data
//! inputs in place, and everything else just recurses. XOR and EQ are left
//! alone here; the NNF pass eliminates them wholesale first.
//!
//! # Binary split
//!
//! `to_binary` reduces every n-ary operator to arity two. Commutative
//! operators split at the midpoint into a halving tree rather than a chain;
//! EQ becomes the conjunction of all pairwise equalities, itself binified.
//!
//! # NNF
//!
//! `to_nnf` first lifts every operator outside {OR, AND, NOT} to an
//! OR/AND/NOT equivalent, bottom-up, then bubbles the NOTs down to the
//! literals and simplifies. XOR and ITE have two expansions each; the
//! lifting picks the conjunctive one when the operand list leans toward
//! ORs and the disjunctive one when it leans toward ANDs, once per node.

use crate::expr::{map_children, mark_flags, nary, Expr, NNF, SIMPLE};
use crate::kind::Kind;

impl Expr {
    /// Pushes NOT through OR, AND, and ITE down toward the literals.
    pub fn push_down_not(&self) -> Expr {
        if self.is_atom() {
            return self.clone();
        }
        if self.kind() == Kind::Not {
            let x = &self.args()[0];
            match x.kind() {
                Kind::Or | Kind::And => {
                    let args: Vec<Expr> = x
                        .args()
                        .iter()
                        .map(|xi| Expr::not(xi).push_down_not())
                        .collect();
                    return nary(x.kind().dual(), args);
                }
                Kind::Ite => {
                    let xs = x.args();
                    return Expr::ite(
                        &xs[0],
                        &Expr::not(&xs[1]).push_down_not(),
                        &Expr::not(&xs[2]).push_down_not(),
                    );
                }
                _ => {}
            }
        }
        map_children(self, &mut |c| c.push_down_not())
    }

    /// Converts every n-ary OR, AND, XOR, and EQ into binary trees.
    pub fn to_binary(&self) -> Expr {
        if self.is_atom() {
            return self.clone();
        }
        let node = map_children(self, &mut |x| x.to_binary());
        match node.kind() {
            Kind::Or | Kind::And | Kind::Xor => {
                if node.args().len() <= 2 {
                    node
                } else {
                    split(node.kind(), node.args())
                }
            }
            Kind::Eq => {
                if node.args().len() <= 2 {
                    node
                } else {
                    let xs = node.args();
                    let mut pairs = Vec::new();
                    for i in 0..xs.len() {
                        for j in i + 1..xs.len() {
                            pairs.push(Expr::equal([xs[i].clone(), xs[j].clone()]));
                        }
                    }
                    split(Kind::And, &pairs)
                }
            }
            _ => node,
        }
    }

    /// Rewrites to negation normal form: only OR, AND, literals, and
    /// constants remain, and the result is simplified.
    ///
    /// The result and its descendants carry both the NNF and SIMPLE flags;
    /// an expression already carrying both is returned as-is.
    pub fn to_nnf(&self) -> Expr {
        if self.is_nnf() && self.is_simple() {
            return self.clone();
        }
        let lifted = nnf_lift(self);
        let out = lifted.push_down_not().simplify();
        mark_flags(&out, SIMPLE | NNF);
        out
    }
}

/// Midpoint split of a commutative operand list into a halving tree.
fn split(kind: Kind, args: &[Expr]) -> Expr {
    match args.len() {
        1 => args[0].clone(),
        2 => nary(kind, args.to_vec()),
        n => {
            let mid = n / 2;
            nary(kind, vec![split(kind, &args[..mid]), split(kind, &args[mid..])])
        }
    }
}

/// Rewrites IMPL, EQ, XOR, and ITE into OR/AND/NOT equivalents, bottom-up.
fn nnf_lift(ex: &Expr) -> Expr {
    if ex.is_atom() {
        return ex.clone();
    }
    let node = map_children(ex, &mut nnf_lift);
    match node.kind() {
        Kind::Impl => {
            let p = &node.args()[0];
            let q = &node.args()[1];
            Expr::or([Expr::not(p), q.clone()])
        }
        Kind::Eq => {
            // All equal: all zero or all one.
            let all_zero = Expr::and(node.args().iter().map(Expr::not));
            let all_one = Expr::and(node.args().to_vec());
            Expr::or([all_zero, all_one])
        }
        Kind::Xor => xor_expand(node.args(), leans_toward_or(node.args())),
        Kind::Ite => {
            let s = &node.args()[0];
            let d1 = &node.args()[1];
            let d0 = &node.args()[2];
            if leans_toward_or(node.args()) {
                Expr::and([
                    Expr::or([Expr::not(s), d1.clone()]),
                    Expr::or([s.clone(), d0.clone()]),
                ])
            } else {
                Expr::or([
                    Expr::and([s.clone(), d1.clone()]),
                    Expr::and([Expr::not(s), d0.clone()]),
                ])
            }
        }
        _ => node,
    }
}

/// Chooses the conjunctive expansion when the operands contain more ORs
/// than ANDs.
fn leans_toward_or(args: &[Expr]) -> bool {
    let ors = args.iter().filter(|x| x.kind() == Kind::Or).count();
    let ands = args.iter().filter(|x| x.kind() == Kind::And).count();
    ors > ands
}

/// Halving expansion of an n-ary XOR into two-operand expansions.
fn xor_expand(args: &[Expr], conjunctive: bool) -> Expr {
    match args.len() {
        1 => args[0].clone(),
        2 => xor_pair(&args[0], &args[1], conjunctive),
        n => {
            let mid = n / 2;
            xor_pair(
                &xor_expand(&args[..mid], conjunctive),
                &xor_expand(&args[mid..], conjunctive),
                conjunctive,
            )
        }
    }
}

fn xor_pair(a: &Expr, b: &Expr, conjunctive: bool) -> Expr {
    if conjunctive {
        // a ^ b = (a | b) & (~a | ~b)
        Expr::and([
            Expr::or([a.clone(), b.clone()]),
            Expr::or([Expr::not(a), Expr::not(b)]),
        ])
    } else {
        // a ^ b = (~a & b) | (a & ~b)
        Expr::or([
            Expr::and([Expr::not(a), b.clone()]),
            Expr::and([a.clone(), Expr::not(b)]),
        ])
    }
}
