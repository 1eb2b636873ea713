//! Expression arrays and the cartesian product.
//!
//! Arrays are plain vectors of handles; cloning an array takes a reference
//! on every element and dropping it releases them, and equality between
//! arrays is element-wise handle identity. The 2D array is an array of
//! arrays, used by the cover passes to describe one operand row per clause.

use crate::expr::{identity_of, nary, Expr};
use crate::kind::Kind;

/// An owned, ordered sequence of expression handles.
pub type Array = Vec<Expr>;

/// An owned sequence of [`Array`] rows.
pub type Array2d = Vec<Array>;

/// Cartesian product of the rows, combining each selection with binary
/// operators of `kind`.
///
/// With no rows the product is the singleton array holding the identity
/// constant of `kind`; with rows, each element of the result pairs an
/// element of the product of the leading rows with an element of the last
/// row. An empty row annihilates the product.
pub fn cartesian(kind: Kind, rows: &[Array]) -> Array {
    match rows.split_last() {
        None => vec![identity_of(kind)],
        Some((last, lead)) => {
            let prefix = cartesian(kind, lead);
            let mut out = Vec::with_capacity(prefix.len() * last.len());
            for p in &prefix {
                for x in last {
                    out.push(nary(kind, vec![p.clone(), x.clone()]));
                }
            }
            out
        }
    }
}
