//! Variable substitution.
//!
//! `compose` replaces variables by expressions, bottom-up: constants pass
//! through, a variable is looked up in the dictionary, a complemented
//! literal composes its positive form under a NOT, and an operator is
//! rebuilt only when some child changed. `restrict` is composition with
//! constants followed by simplification.

use crate::expr::{map_children, Expr, ExprMap};
use crate::kind::Kind;

impl Expr {
    /// Substitutes expressions for variables.
    ///
    /// Keys of `replace` are variable literals; each occurrence is replaced
    /// by its mapped expression, and unmapped variables stay themselves.
    ///
    /// # Panics
    ///
    /// Panics if a complemented literal's pool has been dropped.
    pub fn compose(&self, replace: &ExprMap) -> Expr {
        match self.kind() {
            k if k.is_constant() => self.clone(),
            Kind::Var => replace
                .get(self)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Kind::Comp => Expr::not(&Expr::not(self).compose(replace)),
            _ => map_children(self, &mut |x| x.compose(replace)),
        }
    }

    /// Restriction: composes with a constant point and simplifies.
    pub fn restrict(&self, point: &ExprMap) -> Expr {
        self.compose(point).simplify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pool;

    #[test]
    fn empty_composition_is_identity() {
        let pool = Pool::new();
        let ex = Expr::or([pool.literal(1), pool.literal(-2)]);
        assert_eq!(ex.compose(&ExprMap::new()), ex);
    }

    #[test]
    fn variables_are_replaced() {
        let pool = Pool::new();
        let (a, b, c) = (pool.literal(1), pool.literal(2), pool.literal(3));
        let mut map = ExprMap::new();
        map.insert(a.clone(), c.clone());
        let ex = Expr::or([a.clone(), b.clone()]);
        let composed = ex.compose(&map);
        assert_eq!(composed.args(), &[c, b]);
    }

    #[test]
    fn complements_compose_through_not() {
        let pool = Pool::new();
        let a = pool.literal(1);
        let b = pool.literal(2);
        let mut map = ExprMap::new();
        map.insert(a.clone(), b.clone());
        assert_eq!(pool.literal(-1).compose(&map), pool.literal(-2));
        // Replacing a with an operator wraps the complement in a NOT.
        let op = Expr::and([b.clone(), pool.literal(3)]);
        let mut map = ExprMap::new();
        map.insert(a, op.clone());
        let composed = pool.literal(-1).compose(&map);
        assert_eq!(composed.kind(), Kind::Not);
        assert_eq!(composed.args()[0], op);
    }

    #[test]
    fn unchanged_children_keep_the_node() {
        let pool = Pool::new();
        let ex = Expr::and([pool.literal(1), pool.literal(2)]);
        let mut map = ExprMap::new();
        map.insert(pool.literal(9), Expr::one());
        assert_eq!(ex.compose(&map), ex);
    }

    #[test]
    fn restrict_evaluates_at_a_point() {
        let pool = Pool::new();
        let (a, b) = (pool.literal(1), pool.literal(2));
        let ex = Expr::or([Expr::and([a.clone(), b.clone()]), pool.literal(-1)]);
        let mut point = ExprMap::new();
        point.insert(a.clone(), Expr::one());
        assert_eq!(ex.restrict(&point), b);
        let mut point = ExprMap::new();
        point.insert(a, Expr::zero());
        assert_eq!(ex.restrict(&point), Expr::one());
    }
}
