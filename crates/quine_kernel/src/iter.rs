//! Depth-first traversal.
//!
//! The iterator yields, for each operator, every node under each child in
//! order and then the operator itself; for an atom it yields just the atom.
//! It is single-shot, keeps its state in an explicit stack of child
//! indices, and borrows the expression rather than taking references on
//! the nodes it yields.

use crate::expr::Expr;

/// Single-shot depth-first post-order iterator over an expression.
pub struct DfsIter<'a> {
    stack: Vec<(&'a Expr, usize)>,
}

impl<'a> DfsIter<'a> {
    pub(crate) fn new(ex: &'a Expr) -> Self {
        DfsIter {
            stack: vec![(ex, 0)],
        }
    }
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<&'a Expr> {
        loop {
            let (ex, visited) = *self.stack.last()?;
            let args = ex.args();
            if visited < args.len() {
                self.stack.last_mut().expect("non-empty stack").1 += 1;
                self.stack.push((&args[visited], 0));
            } else {
                let (done, _) = self.stack.pop().expect("non-empty stack");
                return Some(done);
            }
        }
    }
}
