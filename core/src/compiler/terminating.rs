//! Terminating-statement analysis
//!
//! A statement terminates when control can never fall off its end. The
//! compiler uses this to decide whether a translated branch needs an explicit
//! `Normal` appended.

use super::analysis::Analysis;
use super::ast::Stmt;

/// Can control never fall through `stmt`?
pub fn is_terminating<S, E>(stmt: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> bool {
    match stmt {
        Stmt::Return { .. } | Stmt::Goto { .. } => true,
        Stmt::Block { body, .. } => body
            .last()
            .is_some_and(|last| is_terminating(last, analysis)),
        Stmt::Opaque { op, .. } => analysis.diverges(op),
        Stmt::If {
            then_s, else_s, ..
        } => match else_s {
            Some(else_s) => is_terminating(then_s, analysis) && is_terminating(else_s, analysis),
            None => false,
        },
        Stmt::Switch { cases, .. } => {
            cases.iter().any(|case| case.is_default())
                && cases.iter().all(|case| {
                    !case.body.iter().any(has_break)
                        && case
                            .body
                            .last()
                            .is_some_and(|last| is_terminating(last, analysis))
                })
        }
        Stmt::For { cond, body, .. } => cond.is_none() && !has_break(body),
        Stmt::Break { .. }
        | Stmt::Continue { .. }
        | Stmt::Yield { .. }
        | Stmt::YieldFrom { .. } => false,
    }
}

/// Does `stmt` contain an unlabeled `break` that targets the statement
/// enclosing it? Breaks inside nested loops and switches do not count.
pub fn has_break<S, E>(stmt: &Stmt<S, E>) -> bool {
    match stmt {
        Stmt::Break { label: None, .. } => true,
        Stmt::Block { body, .. } => body.iter().any(has_break),
        Stmt::If {
            then_s, else_s, ..
        } => has_break(then_s) || else_s.as_deref().is_some_and(has_break),
        _ => false,
    }
}

/// Does `stmt` contain a `continue` that targets the loop enclosing it?
/// Continues inside nested loops do not count; switches are transparent.
pub fn has_continue<S, E>(stmt: &Stmt<S, E>) -> bool {
    match stmt {
        Stmt::Continue { label: None, .. } => true,
        Stmt::Block { body, .. } => body.iter().any(has_continue),
        Stmt::If {
            then_s, else_s, ..
        } => has_continue(then_s) || else_s.as_deref().is_some_and(has_continue),
        Stmt::Switch { cases, .. } => cases
            .iter()
            .flat_map(|case| case.body.iter())
            .any(has_continue),
        _ => false,
    }
}

/// Does `stmt` contain a `break`, `continue` or `return` that leaves it
/// through `if` and block nesting only?
pub fn escapes<S, E>(stmt: &Stmt<S, E>) -> bool {
    match stmt {
        Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Return { .. } => true,
        Stmt::Block { body, .. } => body.iter().any(escapes),
        Stmt::If {
            then_s, else_s, ..
        } => escapes(then_s) || else_s.as_deref().is_some_and(escapes),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::analysis::Structural;
    use crate::compiler::ast::Case;

    type T = Stmt<&'static str, bool>;

    fn op(name: &'static str) -> T {
        Stmt::opaque(name)
    }

    struct Panics;

    impl Analysis<&'static str, bool> for Panics {
        fn diverges(&self, op: &&'static str) -> bool {
            *op == "panic"
        }
    }

    #[test]
    fn test_return_terminates() {
        assert!(is_terminating(&T::return_(None), &Structural));
        assert!(!is_terminating(&op("x"), &Structural));
    }

    #[test]
    fn test_if_needs_both_branches() {
        let one = T::if_(true, T::return_(None), None);
        let both = T::if_(true, T::return_(None), Some(T::block(vec![op("x"), T::return_(None)])));
        assert!(!is_terminating(&one, &Structural));
        assert!(is_terminating(&both, &Structural));
    }

    #[test]
    fn test_switch_needs_default_and_no_break() {
        let cases = |default_body: Vec<T>| {
            T::switch(
                None,
                Some(true),
                vec![
                    Case::new(vec![true], vec![T::return_(None)]),
                    Case::default_arm(default_body),
                ],
            )
        };
        assert!(is_terminating(&cases(vec![T::return_(None)]), &Structural));
        assert!(!is_terminating(
            &cases(vec![T::if_(true, T::break_(), None), T::return_(None)]),
            &Structural
        ));

        let no_default = T::switch(None, None, vec![Case::new(vec![true], vec![T::return_(None)])]);
        assert!(!is_terminating(&no_default, &Structural));
    }

    #[test]
    fn test_endless_loop_without_break() {
        let endless = T::for_(None, None, None, T::block(vec![op("x")]));
        let broken = T::for_(None, None, None, T::block(vec![T::if_(true, T::break_(), None)]));
        let bounded = T::for_(None, Some(true), None, T::block(vec![op("x")]));
        assert!(is_terminating(&endless, &Structural));
        assert!(!is_terminating(&broken, &Structural));
        assert!(!is_terminating(&bounded, &Structural));
    }

    #[test]
    fn test_break_in_nested_loop_does_not_count() {
        let inner = T::for_(None, None, None, T::break_());
        let outer = T::for_(None, None, None, T::block(vec![inner]));
        assert!(is_terminating(&outer, &Structural));
    }

    #[test]
    fn test_diverging_opaque_statement() {
        assert!(is_terminating(&op("panic"), &Panics));
        assert!(is_terminating(&T::block(vec![op("x"), op("panic")]), &Panics));
        assert!(!is_terminating(&op("x"), &Panics));
    }

    #[test]
    fn test_has_continue_sees_through_switch() {
        let sw = T::switch(None, None, vec![Case::new(vec![true], vec![T::continue_()])]);
        assert!(has_continue(&T::block(vec![sw])));
        assert!(!has_continue(&T::for_(None, None, None, T::continue_())));
    }

    #[test]
    fn test_escapes() {
        assert!(escapes(&T::if_(true, T::block(vec![T::break_()]), None)));
        assert!(!escapes(&T::for_(None, None, None, T::break_())));
        assert!(!escapes(&op("x")));
    }
}
