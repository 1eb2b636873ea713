//! The quine kernel: a Boolean expression engine.
//!
//! Expressions are multi-valued Boolean formulas over a fixed connective
//! set, held as a shared, reference-counted DAG. The kernel's value is the
//! family of rewrite passes over that DAG: canonicalization, NOT-bubbling,
//! binary conversion, negation normal form, two-level covers, the complete
//! sum of prime implicants, and variable substitution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Rewrite passes                          │
//! │  simplify, push_down_not, to_binary, to_nnf,                 │
//! │  to_dnf/to_cnf, complete_sum, compose/restrict               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//! ┌─────────────────────────┐   ┌─────────────────────────────┐
//! │       Node model        │   │     Argument machinery      │
//! │  Kind, Expr, Pool,      │   │  arg-sets, arrays,          │
//! │  depth-first iteration  │   │  cartesian product          │
//! └─────────────────────────┘   └─────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              quine-data: generic containers                  │
//! │  SlotVec, ChainMap, ChainSet                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Handles and identity
//!
//! Every constructor and pass returns an [`Expr`] handle owning one strong
//! reference; dropping the handle releases it. Equality between handles is
//! node identity, and the engine relies on it: constants are per-thread
//! singletons and literals are unique within their [`Pool`], so atoms
//! compare semantically, while operator nodes never do.
//!
//! # Single-threaded by design
//!
//! Reference counts are plain `Rc` counts and node flags are `Cell` bits;
//! nothing here is `Send`. Supporting parallel rewrites would mean a mutex
//! per node, which this engine does not attempt.
//!
//! # Example
//!
//! ```
//! use quine_kernel::{Expr, Pool};
//!
//! let pool = Pool::new();
//! let a = pool.literal(1);
//! let b = pool.literal(2);
//!
//! let f = Expr::or([Expr::and([a.clone(), b.clone()]), a.clone()]);
//! let dnf = f.to_dnf();
//! assert!(dnf.is_dnf());
//!
//! assert_eq!(Expr::or([a.clone(), Expr::not(&a)]).simplify(), Expr::one());
//! ```

mod argset;
mod array;
mod compose;
mod cover;
mod expr;
mod iter;
mod kind;
mod normal;
mod pool;
mod simplify;

pub use argset::{EqArgSet, OrAndArgSet, XorArgSet};
pub use array::{cartesian, Array, Array2d};
pub use expr::{Expr, ExprMap, ExprSet};
pub use iter::DfsIter;
pub use kind::Kind;
pub use pool::Pool;

// Re-export the container crate the way the data layer re-exports its
// hashing primitives; kernel users routinely need the key trait.
pub use quine_data::{ChainKey, ChainMap, ChainSet, SlotVec};
