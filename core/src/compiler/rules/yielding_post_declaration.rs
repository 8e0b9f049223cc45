//! Rule: Yielding Post Declaration
//!
//! A loop post that yields is lowered into its own scope after the body, so
//! a variable it declares would not survive into the next iteration's
//! condition. Reports an error for that combination.

use crate::compiler::analysis::Analysis;
use crate::compiler::ast::Stmt;
use crate::compiler::validate::{walk, Diagnostic, Rule, Scope};

pub struct YieldingPostDeclarationRule;

impl<S, E> Rule<S, E> for YieldingPostDeclarationRule {
    fn id(&self) -> &'static str {
        "yielding-post-declaration"
    }

    fn description(&self) -> &'static str {
        "a loop post statement that yields cannot declare variables"
    }

    fn check(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        let rule_id = <Self as Rule<S, E>>::id(self);
        let mut errors = Vec::new();
        walk(body, Scope::default(), &mut |stmt, _| {
            if let Stmt::For {
                post: Some(post), ..
            } = stmt
            {
                if analysis.reaches_yield(post) && declares_in(post, analysis) {
                    errors.push(Diagnostic::error(
                        post.span(),
                        "loop post that yields cannot declare variables",
                        rule_id,
                    ));
                }
            }
        });
        errors
    }
}

fn declares_in<S, E>(stmt: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> bool {
    let mut found = false;
    walk(stmt, Scope::default(), &mut |s, _| {
        if let Stmt::Opaque { op, .. } = s {
            found |= analysis.declares(op);
        }
    });
    found
}
