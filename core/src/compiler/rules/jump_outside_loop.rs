//! Rule: Jump Outside Loop
//!
//! Reports an error for a `break` with no enclosing loop or switch, and for
//! a `continue` with no enclosing loop.

use crate::compiler::analysis::Analysis;
use crate::compiler::ast::Stmt;
use crate::compiler::validate::{walk, Diagnostic, Rule, Scope};

pub struct JumpOutsideLoopRule;

impl<S, E> Rule<S, E> for JumpOutsideLoopRule {
    fn id(&self) -> &'static str {
        "jump-outside-loop"
    }

    fn description(&self) -> &'static str {
        "break must be inside a loop or switch, continue inside a loop"
    }

    fn check(&self, body: &Stmt<S, E>, _analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        let rule_id = <Self as Rule<S, E>>::id(self);
        let mut errors = Vec::new();
        walk(body, Scope::default(), &mut |stmt, scope| match stmt {
            Stmt::Break { label: None, span } if scope.loops + scope.switches == 0 => {
                errors.push(Diagnostic::error(
                    *span,
                    "'break' statement outside of loop or switch",
                    rule_id,
                ))
            }
            Stmt::Continue { label: None, span } if scope.loops == 0 => errors.push(
                Diagnostic::error(*span, "'continue' statement outside of loop", rule_id),
            ),
            _ => {}
        });
        errors
    }
}
