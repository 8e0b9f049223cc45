//! Caller-supplied facts about opaque host code
//!
//! The compiler only understands the statement tree's shape. Whether a
//! statement reaches a yield, whether an expression hides one, whether an
//! opaque statement diverges or declares a variable: those are questions
//! about the host language, answered through [`Analysis`].

use super::ast::Stmt;

pub trait Analysis<S, E> {
    /// Does `stmt` reach a yield point transitively?
    ///
    /// The default walks the tree: only `Yield` and `YieldFrom` yield.
    fn reaches_yield(&self, stmt: &Stmt<S, E>) -> bool {
        structural_yield(self, stmt)
    }

    /// Does evaluating `expr` reach a yield point?
    fn expr_yields(&self, _expr: &E) -> bool {
        false
    }

    /// Does running `op` never complete normally (panic, exit, ...)?
    fn diverges(&self, _op: &S) -> bool {
        false
    }

    /// Does `op` declare a new variable?
    fn declares(&self, _op: &S) -> bool {
        false
    }
}

/// Yield reachability by structure alone
pub fn structural_yield<S, E, A>(analysis: &A, stmt: &Stmt<S, E>) -> bool
where
    A: Analysis<S, E> + ?Sized,
{
    match stmt {
        Stmt::Yield { .. } | Stmt::YieldFrom { .. } => true,
        Stmt::Block { body, .. } => body.iter().any(|s| analysis.reaches_yield(s)),
        Stmt::If {
            then_s, else_s, ..
        } => {
            analysis.reaches_yield(then_s)
                || else_s.as_deref().is_some_and(|s| analysis.reaches_yield(s))
        }
        Stmt::Switch { init, cases, .. } => {
            init.as_deref().is_some_and(|s| analysis.reaches_yield(s))
                || cases
                    .iter()
                    .flat_map(|case| case.body.iter())
                    .any(|s| analysis.reaches_yield(s))
        }
        Stmt::For {
            init, post, body, ..
        } => {
            init.as_deref().is_some_and(|s| analysis.reaches_yield(s))
                || post.as_deref().is_some_and(|s| analysis.reaches_yield(s))
                || analysis.reaches_yield(body)
        }
        Stmt::Opaque { .. }
        | Stmt::Break { .. }
        | Stmt::Continue { .. }
        | Stmt::Goto { .. }
        | Stmt::Return { .. } => false,
    }
}

/// Purely structural analysis: no host knowledge at all
#[derive(Debug, Clone, Copy, Default)]
pub struct Structural;

impl<S, E> Analysis<S, E> for Structural {}

/// Analysis backed by a caller-supplied yield oracle
///
/// The oracle is consulted for every statement; structural knowledge is not
/// applied on top of it.
pub struct FnAnalysis<F>(pub F);

impl<S, E, F> Analysis<S, E> for FnAnalysis<F>
where
    F: Fn(&Stmt<S, E>) -> bool,
{
    fn reaches_yield(&self, stmt: &Stmt<S, E>) -> bool {
        (self.0)(stmt)
    }
}
