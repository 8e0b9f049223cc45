//! # Compiler - Structural Translation to Suspensions
//!
//! Takes a procedure body whose yields sit anywhere inside sequences,
//! branches and loops, and produces an equivalent [`Compiled`] program: a
//! lowered tree in which host statements that never yield stay native and
//! every yielding construct becomes a combinator expression.
//!
//! ## Pipeline
//!
//! 1. **Validation**: rule-based, see [`validate`]; any error rejects the body,
//!    whether or not it yields
//! 2. **Reachability**: a body that reaches no yield is returned untouched
//! 3. **Lowering**: translation rules, see `lower.rs`
//! 4. **Simplification**: optional, see `optimize.rs`
//!
//! ## Translation at a glance
//!
//! | statement                          | lowered                                  |
//! |------------------------------------|------------------------------------------|
//! | `yield v; rest`                    | `Bind(v, rest)`                          |
//! | `yield from s; rest`               | `YieldFrom(s)` then `rest`               |
//! | yielding compound, then `rest`     | `Combine(Delay(compound), Delay(rest))`  |
//! | `if` with a yielding branch        | sealed branches, `Normal` for no `else`  |
//! | `switch` with a yielding case      | `Absorb(Break, dispatch)`                |
//! | `for` with a yielding body         | `For(cond, post, Delay(body))`           |
//! | `for` with a yielding post         | `For(cond, -, Combine(body, post))`      |
//! | `break` / `continue` / `return`    | the matching terminal                    |

pub mod analysis;
pub mod ast;
mod lower;
pub mod lowered;
mod optimize;
pub mod rules;
pub mod terminating;
pub mod validate;

#[cfg(test)]
mod tests;

pub use analysis::{Analysis, FnAnalysis, Structural};
pub use ast::{Case, Span, Stmt};
pub use lowered::{Arm, Block, Code, Compiled, LoweredCase, SeqExpr};
pub use validate::{Diagnostic, Severity, Validator};

use lower::Lowerer;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

/* ===================== Options ===================== */

/// Knobs for the translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Run the simplification pass
    pub optimize: bool,
    /// Unwrap `else { if .. }` into a flat else-if chain
    pub flatten_else_if: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            flatten_else_if: true,
        }
    }
}

/* ===================== Errors ===================== */

#[derive(Debug, Error)]
pub enum CompileError {
    /// Validation reported at least one error. Carries every diagnostic,
    /// warnings included.
    #[error("generator body rejected:\n{}", render(.0))]
    Rejected(Vec<Diagnostic>),
}

impl CompileError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Rejected(diagnostics) => diagnostics,
        }
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {}", d))
        .collect::<Vec<_>>()
        .join("\n")
}

/* ===================== Compiler ===================== */

pub struct Compiler<S, E> {
    options: CompileOptions,
    validator: Validator<S, E>,
}

impl<S: Clone, E: Clone> Compiler<S, E> {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Compiler {
            options,
            validator: Validator::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Run validation only.
    pub fn check(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        self.validator.validate(body, analysis)
    }

    /// Translate a procedure body.
    pub fn compile(
        &self,
        body: &Stmt<S, E>,
        analysis: &dyn Analysis<S, E>,
    ) -> Result<Compiled<S, E>, CompileError> {
        let diagnostics = self.check(body, analysis);
        if diagnostics.iter().any(Diagnostic::is_error) {
            debug!(count = diagnostics.len(), "body rejected");
            return Err(CompileError::Rejected(diagnostics));
        }
        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }

        if !analysis.reaches_yield(body) {
            debug!("body reaches no yield; kept plain");
            return Ok(Compiled::Plain {
                body: Rc::new(body.clone()),
            });
        }

        let lowerer = Lowerer::new(analysis, &self.options);
        let mut seq = SeqExpr::Delay {
            body: lowerer.sealed(body.as_list()),
        };
        if self.options.optimize {
            seq = optimize::simplify_body(seq);
        }
        debug!(optimize = self.options.optimize, "body compiled");
        Ok(Compiled::Seq { seq })
    }
}

impl<S: Clone, E: Clone> Default for Compiler<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate `body` with default options.
pub fn compile<S: Clone, E: Clone>(
    body: &Stmt<S, E>,
    analysis: &dyn Analysis<S, E>,
) -> Result<Compiled<S, E>, CompileError> {
    Compiler::new().compile(body, analysis)
}
