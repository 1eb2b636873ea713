//! Algebraic argument accumulators.
//!
//! An arg-set collects operands for one operator kind and applies the
//! operator's absorption rules eagerly on every insert:
//!
//! - [`OrAndArgSet`] drops identity operands, flattens same-kind operands,
//!   and collapses to the dominator on a dominator operand or a
//!   complementary literal pair.
//! - [`XorArgSet`] cancels duplicate operands outright and folds constants
//!   and complementary pairs into a parity bit.
//! - [`EqArgSet`] tracks the ZERO and ONE constants as flags and collapses
//!   when both (or a complementary pair) have been seen.
//!
//! Once an accumulator has collapsed, its operand set is cleared and later
//! inserts are ignored. Same-kind flattening is iterative over a worklist,
//! so a deeply nested operand cannot overflow the stack.

use quine_data::ChainSet;

use crate::expr::{dominator_of, identity_of, nary, Expr};
use crate::kind::Kind;

/// Incremental OR or AND argument set.
pub struct OrAndArgSet {
    kind: Kind,
    min: bool,
    max: bool,
    args: ChainSet<Expr>,
}

impl OrAndArgSet {
    /// Creates an empty accumulator for OR or AND.
    ///
    /// # Panics
    ///
    /// Panics for any other kind.
    pub fn new(kind: Kind) -> Self {
        assert!(
            kind == Kind::Or || kind == Kind::And,
            "OrAndArgSet is for OR and AND"
        );
        OrAndArgSet {
            kind,
            min: true,
            max: false,
            args: ChainSet::new(),
        }
    }

    /// Whether the accumulator still equals the identity constant.
    pub fn is_min(&self) -> bool {
        self.min
    }

    /// Whether the accumulator has collapsed to the dominator constant.
    pub fn is_max(&self) -> bool {
        self.max
    }

    /// The surviving operands.
    pub fn args(&self) -> &ChainSet<Expr> {
        &self.args
    }

    /// Accumulates an operand.
    pub fn insert(&mut self, ex: &Expr) {
        let identity = identity_of(self.kind);
        let dominator = dominator_of(self.kind);
        let mut todo = vec![ex.clone()];
        while let Some(x) = todo.pop() {
            if self.max || x == identity {
                continue;
            }
            if x == dominator || (x.is_literal() && self.args.contains(&Expr::not(&x))) {
                self.max = true;
                self.min = false;
                self.args.clear();
                return;
            }
            if x.kind() == self.kind {
                todo.extend(x.args().iter().cloned());
                continue;
            }
            self.args.insert(x);
            self.min = false;
        }
    }

    /// Collapses the accumulator into an expression. Operand order is the
    /// set's iteration order; the result is not simplified.
    pub fn reduce(&self) -> Expr {
        if self.max {
            return dominator_of(self.kind);
        }
        if self.args.is_empty() {
            return identity_of(self.kind);
        }
        nary(self.kind, self.args.iter().cloned().collect())
    }
}

/// Incremental XOR/XNOR argument set.
///
/// The parity bit starts even (XOR); every ONE operand and every
/// complementary pair flips it. [`reduce`](XorArgSet::reduce) yields XOR on
/// even parity and XNOR on odd.
pub struct XorArgSet {
    parity: bool,
    args: ChainSet<Expr>,
}

impl XorArgSet {
    /// Creates an empty accumulator with even parity.
    pub fn new() -> Self {
        XorArgSet {
            parity: false,
            args: ChainSet::new(),
        }
    }

    /// Whether an odd number of inversions has been absorbed.
    pub fn parity(&self) -> bool {
        self.parity
    }

    /// The surviving operands.
    pub fn args(&self) -> &ChainSet<Expr> {
        &self.args
    }

    /// Accumulates an operand.
    pub fn insert(&mut self, ex: &Expr) {
        let mut todo = vec![ex.clone()];
        while let Some(x) = todo.pop() {
            if x == Expr::zero() {
                continue;
            }
            if x == Expr::one() {
                self.parity = !self.parity;
                continue;
            }
            if x.kind() == Kind::Xor {
                todo.extend(x.args().iter().cloned());
                continue;
            }
            if x.kind() == Kind::Not && x.args()[0].kind() == Kind::Xor {
                self.parity = !self.parity;
                todo.extend(x.args()[0].args().iter().cloned());
                continue;
            }
            if self.args.contains(&x) {
                // x ^ x = 0
                self.args.remove(&x);
                continue;
            }
            if x.is_literal() {
                let comp = Expr::not(&x);
                if self.args.contains(&comp) {
                    // x ^ ~x = 1
                    self.args.remove(&comp);
                    self.parity = !self.parity;
                    continue;
                }
            }
            self.args.insert(x);
        }
    }

    /// Collapses the accumulator into an expression: XOR of the surviving
    /// operands, complemented when the parity is odd.
    pub fn reduce(&self) -> Expr {
        let base = nary(Kind::Xor, self.args.iter().cloned().collect());
        if self.parity {
            Expr::not(&base)
        } else {
            base
        }
    }
}

impl Default for XorArgSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental EQ argument set.
///
/// ZERO and ONE operands become flags; seeing both, or a complementary
/// literal pair, collapses the whole accumulator to ZERO. Same-kind
/// operands stay opaque: chained equality is not associative.
pub struct EqArgSet {
    zero: bool,
    one: bool,
    args: ChainSet<Expr>,
}

impl EqArgSet {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        EqArgSet {
            zero: false,
            one: false,
            args: ChainSet::new(),
        }
    }

    /// Whether a ZERO operand has been seen.
    pub fn has_zero(&self) -> bool {
        self.zero
    }

    /// Whether a ONE operand has been seen.
    pub fn has_one(&self) -> bool {
        self.one
    }

    /// The surviving operands.
    pub fn args(&self) -> &ChainSet<Expr> {
        &self.args
    }

    fn collapsed(&self) -> bool {
        self.zero && self.one
    }

    /// Accumulates an operand.
    pub fn insert(&mut self, ex: &Expr) {
        if self.collapsed() {
            return;
        }
        if *ex == Expr::zero() {
            self.zero = true;
        } else if *ex == Expr::one() {
            self.one = true;
        } else if ex.is_literal() && self.args.contains(&Expr::not(ex)) {
            // x = ~x is unsatisfiable
            self.zero = true;
            self.one = true;
        } else {
            self.args.insert(ex.clone());
            return;
        }
        if self.collapsed() {
            self.args.clear();
        }
    }

    /// Collapses the accumulator into an expression, following the EQ
    /// simplification shape: a ZERO flag turns the operands into a NOR, a
    /// ONE flag into an AND, and both into the ZERO constant.
    pub fn reduce(&self) -> Expr {
        if self.collapsed() {
            return Expr::zero();
        }
        let xs: Vec<Expr> = self.args.iter().cloned().collect();
        if self.zero {
            match xs.len() {
                0 => Expr::one(),
                1 => Expr::not(&xs[0]),
                _ => Expr::nor(xs),
            }
        } else if self.one {
            match xs.len() {
                0 => Expr::one(),
                1 => xs[0].clone(),
                _ => Expr::and(xs),
            }
        } else {
            Expr::equal(xs)
        }
    }
}

impl Default for EqArgSet {
    fn default() -> Self {
        Self::new()
    }
}
