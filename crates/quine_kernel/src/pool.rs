//! The literal pool.
//!
//! A pool is the context that owns every literal node for a set of signed
//! unique ids: positive ids name variables, negative ids their complements.
//! The first request for an id creates the node; later requests hand back
//! the cached node, so literal identity coincides with id equality within a
//! pool. The pool holds exactly one strong reference per live literal.
//!
//! Slots in the backing vector are derived from the id: variable `k` lives
//! at `2(k-1)` and its complement at `2(k-1) + 1`.
//!
//! Pools must not be mixed: an expression may only combine literals drawn
//! from one pool. The engine does not detect mixing; it is a caller
//! contract, like passing an index from one vector into another.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use quine_data::SlotVec;

use crate::expr::{Expr, Node, Payload, NNF, SIMPLE};
use crate::kind::Kind;

pub(crate) struct PoolInner {
    lits: SlotVec<Expr>,
}

/// A per-context literal pool.
///
/// Cloning a `Pool` clones the handle, not the pool; all clones share the
/// same literals.
#[derive(Clone)]
pub struct Pool {
    inner: Rc<RefCell<PoolInner>>,
}

impl Pool {
    /// Creates an empty pool.
    pub fn new() -> Pool {
        Pool {
            inner: Rc::new(RefCell::new(PoolInner { lits: SlotVec::new() })),
        }
    }

    /// The unique literal for a signed id, created on first use.
    ///
    /// # Panics
    ///
    /// Panics if `uniqid` is zero; zero cannot carry a complement sign.
    pub fn literal(&self, uniqid: i32) -> Expr {
        assert!(uniqid != 0, "literal ids are signed and nonzero");
        let index = lit_index(uniqid);
        if let Some(lit) = self.inner.borrow().lits.get(index) {
            return lit.clone();
        }
        let kind = if uniqid > 0 { Kind::Var } else { Kind::Comp };
        let lit = Expr(Rc::new(Node {
            kind,
            flags: Cell::new(SIMPLE | NNF),
            payload: Payload::Lit {
                uniqid,
                pool: Rc::downgrade(&self.inner),
            },
        }));
        self.inner.borrow_mut().lits.insert(index, lit.clone());
        lit
    }

    /// Number of live literals (variables and complements counted apart).
    pub fn len(&self) -> usize {
        self.inner.borrow().lits.occupied()
    }

    /// Returns `true` if no literal has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

fn lit_index(uniqid: i32) -> usize {
    let k = uniqid.unsigned_abs() as usize - 1;
    if uniqid > 0 {
        2 * k
    } else {
        2 * k + 1
    }
}

impl Expr {
    /// The complementary literal from the same pool.
    ///
    /// # Panics
    ///
    /// Panics on a non-literal, or if the owning pool has been dropped.
    pub(crate) fn complement(&self) -> Expr {
        let Payload::Lit { uniqid, pool } = &self.0.payload else {
            panic!("complement of a non-literal");
        };
        let inner = pool.upgrade().expect("literal outlived its pool");
        Pool { inner }.literal(-uniqid)
    }
}
