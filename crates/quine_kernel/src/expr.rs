//! Expression nodes and handles.
//!
//! An expression is a node in a shared, acyclic DAG. Handles ([`Expr`]) are
//! reference-counted: cloning a handle takes a new strong reference and
//! dropping one releases it, so every constructor hands the caller exactly
//! one reference and intermediate results release themselves on every exit
//! path. The counts are plain `Rc` counts; the whole engine is
//! single-threaded by design and handles are deliberately not `Send`.
//!
//! # Identity
//!
//! Handle equality is *identity*, never structure: two OR nodes over the
//! same children are different expressions to `==`. The four constants are
//! unique per thread and every literal is unique per pool, so for atoms
//! identity and semantic equality coincide. This is what makes node-keyed
//! dictionaries and the adjacency tricks in simplification sound.
//!
//! # Flags
//!
//! Each node carries two memoization bits, SIMPLE and NNF, set by the
//! rewrite passes once the node (and everything under it) is known to be in
//! the corresponding form. Flags only ever go from clear to set.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use quine_data::{ChainKey, ChainMap, ChainSet};
use rustc_hash::FxHashSet;

use crate::iter::DfsIter;
use crate::kind::Kind;
use crate::pool::PoolInner;

/// Canonicalized by `simplify`; see the simplification pass.
pub(crate) const SIMPLE: u8 = 1 << 0;
/// In negation normal form; see the NNF pass.
pub(crate) const NNF: u8 = 1 << 1;

/// Kind-dependent node payload.
pub(crate) enum Payload {
    /// Possible truth values as a bitmask over {0, 1}.
    Const { pcvals: u8 },
    /// Signed unique id (negative for a complement) and the owning pool.
    Lit {
        uniqid: i32,
        pool: Weak<RefCell<PoolInner>>,
    },
    /// Owned, ordered children.
    Op { args: Vec<Expr> },
}

/// An expression node. Reached only through [`Expr`] handles.
pub(crate) struct Node {
    pub(crate) kind: Kind,
    pub(crate) flags: Cell<u8>,
    pub(crate) payload: Payload,
}

/// A strong reference to an expression node.
///
/// `Clone` takes a reference, `Drop` releases one; when the last handle to
/// an operator node drops, its children are released in turn. Constants and
/// pooled literals are kept alive by their owners and survive any number of
/// handle drops.
#[derive(Clone)]
pub struct Expr(pub(crate) Rc<Node>);

/// A node-keyed dictionary mapping expressions to expressions.
pub type ExprMap = ChainMap<Expr, Expr>;

/// A node-keyed set of expressions.
pub type ExprSet = ChainSet<Expr>;

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(Rc::as_ptr(&self.0) as usize);
    }
}

impl ChainKey for Expr {
    fn chain_hash(&self) -> usize {
        // Drop the alignment zeroes; bucket counts are prime anyway.
        (Rc::as_ptr(&self.0) as usize) >> 3
    }
}

thread_local! {
    static CONSTANTS: [Expr; 4] = [
        Expr::constant(Kind::Zero, 0b01),
        Expr::constant(Kind::One, 0b10),
        Expr::constant(Kind::Logical, 0b11),
        Expr::constant(Kind::Illogical, 0b00),
    ];
}

impl Expr {
    fn constant(kind: Kind, pcvals: u8) -> Expr {
        Expr(Rc::new(Node {
            kind,
            flags: Cell::new(SIMPLE | NNF),
            payload: Payload::Const { pcvals },
        }))
    }

    /// The false constant.
    pub fn zero() -> Expr {
        CONSTANTS.with(|c| c[0].clone())
    }

    /// The true constant.
    pub fn one() -> Expr {
        CONSTANTS.with(|c| c[1].clone())
    }

    /// The "either value" pseudo-constant. Opaque to every rewrite pass.
    pub fn logical() -> Expr {
        CONSTANTS.with(|c| c[2].clone())
    }

    /// The "no value" pseudo-constant. Opaque to every rewrite pass.
    pub fn illogical() -> Expr {
        CONSTANTS.with(|c| c[3].clone())
    }

    fn by_pcvals(pcvals: u8) -> Expr {
        match pcvals {
            0b01 => Expr::zero(),
            0b10 => Expr::one(),
            0b11 => Expr::logical(),
            _ => Expr::illogical(),
        }
    }

    /// N-ary disjunction. No operands gives ZERO, one gives the operand.
    pub fn or<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        nary(Kind::Or, args.into_iter().collect())
    }

    /// N-ary conjunction. No operands gives ONE, one gives the operand.
    pub fn and<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        nary(Kind::And, args.into_iter().collect())
    }

    /// N-ary exclusive or. No operands gives ZERO, one gives the operand.
    pub fn xor<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        nary(Kind::Xor, args.into_iter().collect())
    }

    /// N-ary equality: true when all operands agree. Fewer than two
    /// operands is vacuously ONE.
    pub fn equal<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        let xs: Vec<Expr> = args.into_iter().collect();
        if xs.len() <= 1 {
            Expr::one()
        } else {
            new_op(Kind::Eq, xs)
        }
    }

    /// NOT of [`Expr::or`].
    pub fn nor<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        Expr::not(&Expr::or(args))
    }

    /// NOT of [`Expr::and`].
    pub fn nand<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        Expr::not(&Expr::and(args))
    }

    /// NOT of [`Expr::xor`].
    pub fn xnor<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        Expr::not(&Expr::xor(args))
    }

    /// NOT of [`Expr::equal`].
    pub fn unequal<I: IntoIterator<Item = Expr>>(args: I) -> Expr {
        Expr::not(&Expr::equal(args))
    }

    /// Negation.
    ///
    /// Constants fold, a literal yields its pooled complement, a NOT node
    /// yields its child; anything else is wrapped in a fresh NOT node.
    ///
    /// # Panics
    ///
    /// Panics if `x` is a literal whose pool has been dropped.
    pub fn not(x: &Expr) -> Expr {
        match &x.0.payload {
            Payload::Const { pcvals } => {
                let flipped = ((pcvals << 1) | (pcvals >> 1)) & 0b11;
                Expr::by_pcvals(flipped)
            }
            Payload::Lit { .. } => x.complement(),
            Payload::Op { args } if x.0.kind == Kind::Not => args[0].clone(),
            Payload::Op { .. } => new_op(Kind::Not, vec![x.clone()]),
        }
    }

    /// Material implication `p -> q`. Built as-is; no simplification.
    pub fn implies(p: &Expr, q: &Expr) -> Expr {
        new_op(Kind::Impl, vec![p.clone(), q.clone()])
    }

    /// If-then-else `s ? d1 : d0`. Built as-is; no simplification.
    pub fn ite(s: &Expr, d1: &Expr, d0: &Expr) -> Expr {
        new_op(Kind::Ite, vec![s.clone(), d1.clone(), d0.clone()])
    }

    /// The node's kind.
    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    /// Constant or literal.
    pub fn is_atom(&self) -> bool {
        !self.0.kind.is_operator()
    }

    /// One of the four constants.
    pub fn is_const(&self) -> bool {
        self.0.kind.is_constant()
    }

    /// VAR or COMP.
    pub fn is_literal(&self) -> bool {
        self.0.kind.is_literal()
    }

    /// Any operator node.
    pub fn is_operator(&self) -> bool {
        self.0.kind.is_operator()
    }

    /// An operator all of whose children are literals.
    pub fn is_clause(&self) -> bool {
        self.is_operator() && self.args().iter().all(Expr::is_literal)
    }

    /// The children of an operator; empty for atoms.
    pub fn args(&self) -> &[Expr] {
        match &self.0.payload {
            Payload::Op { args } => args,
            _ => &[],
        }
    }

    /// The signed unique id of a literal (negative for a complement).
    ///
    /// # Panics
    ///
    /// Panics on a non-literal.
    pub fn uniqid(&self) -> i32 {
        match &self.0.payload {
            Payload::Lit { uniqid, .. } => *uniqid,
            _ => panic!("uniqid of a non-literal"),
        }
    }

    /// Whether the SIMPLE memoization bit is set.
    pub fn is_simple(&self) -> bool {
        self.0.flags.get() & SIMPLE != 0
    }

    /// Whether the NNF memoization bit is set.
    pub fn is_nnf(&self) -> bool {
        self.0.flags.get() & NNF != 0
    }

    /// 0 for an atom, else one more than the deepest child.
    pub fn depth(&self) -> usize {
        if self.is_atom() {
            0
        } else {
            1 + self.args().iter().map(Expr::depth).max().unwrap_or(0)
        }
    }

    /// Total node occurrences in the tree, counting shared nodes once per
    /// occurrence.
    pub fn size(&self) -> usize {
        if self.is_atom() {
            1
        } else {
            1 + self.args().iter().map(Expr::size).sum::<usize>()
        }
    }

    /// Atom occurrences in the tree.
    pub fn atom_count(&self) -> usize {
        if self.is_atom() {
            1
        } else {
            self.args().iter().map(Expr::atom_count).sum()
        }
    }

    /// Operator occurrences in the tree.
    pub fn op_count(&self) -> usize {
        if self.is_atom() {
            0
        } else {
            1 + self.args().iter().map(Expr::op_count).sum::<usize>()
        }
    }

    /// The distinct variables under this expression, in first-visit order.
    /// Complemented literals contribute their positive variable.
    ///
    /// # Panics
    ///
    /// Panics if a complemented literal's pool has been dropped.
    pub fn support(&self) -> Vec<Expr> {
        let mut seen: FxHashSet<i32> = FxHashSet::default();
        let mut vars = Vec::new();
        for node in self.iter_dfs() {
            if node.is_literal() {
                let id = node.uniqid();
                if seen.insert(id.abs()) {
                    let var = if id < 0 { node.complement() } else { node.clone() };
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// Depth-first post-order traversal: children before parents, the
    /// expression itself last. Single-shot; borrows the expression and
    /// takes no references on yielded nodes.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        DfsIter::new(self)
    }
}

/// The neutral operand for an operator kind.
pub(crate) fn identity_of(kind: Kind) -> Expr {
    match kind {
        Kind::Or | Kind::Xor => Expr::zero(),
        Kind::And => Expr::one(),
        Kind::Eq => Expr::one(),
        _ => panic!("no identity constant for {:?}", kind),
    }
}

/// The constant that absorbs an operator kind.
pub(crate) fn dominator_of(kind: Kind) -> Expr {
    match kind {
        Kind::Or => Expr::one(),
        Kind::And => Expr::zero(),
        _ => panic!("no dominator constant for {:?}", kind),
    }
}

/// Applies the arity collapse rules and builds an n-ary operator.
pub(crate) fn nary(kind: Kind, mut args: Vec<Expr>) -> Expr {
    match args.len() {
        0 => identity_of(kind),
        1 => args.pop().unwrap(),
        _ => new_op(kind, args),
    }
}

pub(crate) fn new_op(kind: Kind, args: Vec<Expr>) -> Expr {
    Expr(Rc::new(Node {
        kind,
        flags: Cell::new(0),
        payload: Payload::Op { args },
    }))
}

/// Rebuilds a node of the given kind from fresh children, going through the
/// public constructors so arity collapse and NOT folding apply.
pub(crate) fn from_args(kind: Kind, mut args: Vec<Expr>) -> Expr {
    match kind {
        Kind::Or | Kind::And | Kind::Xor => nary(kind, args),
        Kind::Eq => Expr::equal(args),
        Kind::Not => Expr::not(&args[0]),
        Kind::Impl => {
            let q = args.pop().unwrap();
            let p = args.pop().unwrap();
            Expr::implies(&p, &q)
        }
        Kind::Ite => {
            let d0 = args.pop().unwrap();
            let d1 = args.pop().unwrap();
            let s = args.pop().unwrap();
            Expr::ite(&s, &d1, &d0)
        }
        _ => panic!("atoms have no argument list"),
    }
}

/// Applies `f` to every child; rebuilds the parent only if some child
/// actually changed, otherwise returns the parent unchanged.
pub(crate) fn map_children<F: FnMut(&Expr) -> Expr>(ex: &Expr, f: &mut F) -> Expr {
    let args = ex.args();
    let mut out = Vec::with_capacity(args.len());
    let mut changed = false;
    for a in args {
        let b = f(a);
        if b != *a {
            changed = true;
        }
        out.push(b);
    }
    if changed {
        from_args(ex.kind(), out)
    } else {
        ex.clone()
    }
}

/// Sets `flags` on the node and every descendant. Stops descending where
/// the bits are already set; a flagged node never has unflagged children.
pub(crate) fn mark_flags(ex: &Expr, flags: u8) {
    if ex.0.flags.get() & flags == flags {
        return;
    }
    ex.0.flags.set(ex.0.flags.get() | flags);
    for a in ex.args() {
        mark_flags(a, flags);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind {
            Kind::Zero => write!(f, "0"),
            Kind::One => write!(f, "1"),
            Kind::Logical => write!(f, "X"),
            Kind::Illogical => write!(f, "?"),
            Kind::Var => write!(f, "x{}", self.uniqid()),
            Kind::Comp => write!(f, "~x{}", -self.uniqid()),
            kind => {
                write!(f, "{}(", kind.name())?;
                for (i, a) in self.args().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }
        }
    }
}

// Debug output is the display form; the pointer itself is never useful.
impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
