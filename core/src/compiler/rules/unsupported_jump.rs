//! Rule: Unsupported Jump
//!
//! Reports an error for unstructured jumps: labeled `break`/`continue` and
//! `goto`. They cannot cross a suspension boundary, so a body using them is
//! rejected as a whole.

use crate::compiler::analysis::Analysis;
use crate::compiler::ast::Stmt;
use crate::compiler::validate::{walk, Diagnostic, Rule, Scope};

pub struct UnsupportedJumpRule;

impl<S, E> Rule<S, E> for UnsupportedJumpRule {
    fn id(&self) -> &'static str {
        "unsupported-jump"
    }

    fn description(&self) -> &'static str {
        "labeled break/continue and goto are not supported in generator bodies"
    }

    fn check(&self, body: &Stmt<S, E>, _analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        let rule_id = <Self as Rule<S, E>>::id(self);
        let mut errors = Vec::new();
        walk(body, Scope::default(), &mut |stmt, _| match stmt {
            Stmt::Break {
                label: Some(label),
                span,
            } => errors.push(Diagnostic::error(
                *span,
                format!("labeled break '{}' is not supported", label),
                rule_id,
            )),
            Stmt::Continue {
                label: Some(label),
                span,
            } => errors.push(Diagnostic::error(
                *span,
                format!("labeled continue '{}' is not supported", label),
                rule_id,
            )),
            Stmt::Goto { label, span } => errors.push(Diagnostic::error(
                *span,
                format!("goto '{}' is not supported", label),
                rule_id,
            )),
            _ => {}
        });
        errors
    }
}
