//! Rule: Yield In Expression
//!
//! Yields are only supported at statement level. Reports an error when a
//! condition, switch tag or case selector reaches a yield.
//!
//! # Invalid
//!
//! ```text
//! if next(yield 1) { }
//! for i := 0; i < (yield 2); i++ { }
//! switch yield 3 { }
//! ```

use crate::compiler::analysis::Analysis;
use crate::compiler::ast::Stmt;
use crate::compiler::validate::{walk, Diagnostic, Rule, Scope};

pub struct YieldInExpressionRule;

impl<S, E> Rule<S, E> for YieldInExpressionRule {
    fn id(&self) -> &'static str {
        "yield-in-expression"
    }

    fn description(&self) -> &'static str {
        "yield must be at statement level, not inside conditions or selectors"
    }

    fn check(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        let rule_id = <Self as Rule<S, E>>::id(self);
        let mut errors = Vec::new();
        walk(body, Scope::default(), &mut |stmt, _| {
            let mut report = |what: &str| {
                errors.push(Diagnostic::error(
                    stmt.span(),
                    format!("yield inside {} is not supported", what),
                    rule_id,
                ))
            };
            match stmt {
                Stmt::If { cond, .. } if analysis.expr_yields(cond) => report("if condition"),
                Stmt::For {
                    cond: Some(cond), ..
                } if analysis.expr_yields(cond) => report("loop condition"),
                Stmt::Switch { tag, cases, .. } => {
                    if tag.as_ref().is_some_and(|tag| analysis.expr_yields(tag)) {
                        report("switch tag");
                    }
                    let mut selectors = cases.iter().flat_map(|case| case.exprs.iter());
                    if selectors.any(|e| analysis.expr_yields(e)) {
                        report("case selector");
                    }
                }
                _ => {}
            }
        });
        errors
    }
}
