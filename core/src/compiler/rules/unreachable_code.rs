//! Rule: Unreachable Code
//!
//! Warns about statements after a `return`, `break`, `continue` or any
//! other terminating statement in the same list. The compiler drops them.

use crate::compiler::analysis::Analysis;
use crate::compiler::ast::Stmt;
use crate::compiler::terminating::is_terminating;
use crate::compiler::validate::{walk, Diagnostic, Rule, Scope};

pub struct UnreachableCodeRule;

impl<S, E> Rule<S, E> for UnreachableCodeRule {
    fn id(&self) -> &'static str {
        "unreachable-code"
    }

    fn description(&self) -> &'static str {
        "code after a terminating statement never runs"
    }

    fn check(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        let rule_id = <Self as Rule<S, E>>::id(self);
        let mut warnings = Vec::new();
        let mut check_list = |list: &[Stmt<S, E>]| {
            let Some(at) = list.iter().position(|s| ends_flow(s, analysis)) else {
                return;
            };
            if let Some(dead) = list.get(at + 1) {
                warnings.push(Diagnostic::warning(
                    dead.span(),
                    format!("unreachable code after {}", list[at].kind()),
                    rule_id,
                ));
            }
        };
        walk(body, Scope::default(), &mut |stmt, _| match stmt {
            Stmt::Block { body, .. } => check_list(body),
            Stmt::Switch { cases, .. } => {
                for case in cases {
                    check_list(&case.body);
                }
            }
            _ => {}
        });
        warnings
    }
}

fn ends_flow<S, E>(stmt: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> bool {
    matches!(stmt, Stmt::Break { .. } | Stmt::Continue { .. }) || is_terminating(stmt, analysis)
}
