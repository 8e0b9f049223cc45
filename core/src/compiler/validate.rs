//! Rule-based validation of statement trees
//!
//! Runs before lowering and catches the constructs the translation cannot
//! express.
//!
//! # Architecture
//!
//! 1. **Rule trait** - Each rule implements this trait
//! 2. **Validator** - Collects and runs all rules
//! 3. **Diagnostic** - The output of validation (errors and warnings)
//!
//! # Adding a New Rule
//!
//! 1. Create a new file in `compiler/rules/`
//! 2. Implement `Rule` for your struct
//! 3. Add it to the `Validator::new()` constructor

use super::analysis::Analysis;
use super::ast::{Span, Stmt};
use super::rules;
use serde::Serialize;

// ============================================================================
// Diagnostics
// ============================================================================

/// A problem found in a statement tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The source location of the issue
    pub span: Span,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Which rule produced this diagnostic
    pub rule_id: &'static str,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Compilation is rejected
    Error,
    /// Compiles, but probably not what was meant
    Warning,
}

impl Diagnostic {
    /// Create a new error
    pub fn error(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Error,
            rule_id,
        }
    }

    /// Create a new warning
    pub fn warning(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Warning,
            rule_id,
        }
    }

    /// Check if this is an error (not a warning)
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{} at line {}, col {}: {} [{}]",
            severity,
            self.span.start_line + 1,
            self.span.start_col + 1,
            self.message,
            self.rule_id
        )
    }
}

// ============================================================================
// Rule Trait
// ============================================================================

/// Trait that all validation rules implement.
///
/// Rules are independent of each other and only report; they never change
/// the tree.
pub trait Rule<S, E> {
    /// Unique identifier for this rule (e.g., "jump-outside-loop")
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Check a procedure body. An empty vector means no issues found.
    fn check(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic>;
}

// ============================================================================
// Traversal
// ============================================================================

/// Enclosing breakable constructs at a point of the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub loops: usize,
    pub switches: usize,
}

/// Visit `stmt` and every statement nested in it, pre-order.
pub fn walk<S, E>(stmt: &Stmt<S, E>, scope: Scope, visit: &mut dyn FnMut(&Stmt<S, E>, Scope)) {
    visit(stmt, scope);
    match stmt {
        Stmt::Block { body, .. } => {
            for s in body {
                walk(s, scope, visit);
            }
        }
        Stmt::If {
            then_s, else_s, ..
        } => {
            walk(then_s, scope, visit);
            if let Some(else_s) = else_s {
                walk(else_s, scope, visit);
            }
        }
        Stmt::Switch { init, cases, .. } => {
            if let Some(init) = init {
                walk(init, scope, visit);
            }
            let inner = Scope {
                switches: scope.switches + 1,
                ..scope
            };
            for s in cases.iter().flat_map(|case| case.body.iter()) {
                walk(s, inner, visit);
            }
        }
        Stmt::For {
            init, post, body, ..
        } => {
            if let Some(init) = init {
                walk(init, scope, visit);
            }
            if let Some(post) = post {
                walk(post, scope, visit);
            }
            let inner = Scope {
                loops: scope.loops + 1,
                ..scope
            };
            walk(body, inner, visit);
        }
        _ => {}
    }
}

// ============================================================================
// Validator - Runs All Rules
// ============================================================================

/// The main validator that orchestrates all validation rules.
pub struct Validator<S, E> {
    rules: Vec<Box<dyn Rule<S, E>>>,
}

impl<S, E> Validator<S, E> {
    /// Create a new validator with all built-in rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                // Error rules - the translation cannot express these
                Box::new(rules::UnsupportedJumpRule),
                Box::new(rules::JumpOutsideLoopRule),
                Box::new(rules::YieldInExpressionRule),
                Box::new(rules::YieldingPostDeclarationRule),
                // Warning rules
                Box::new(rules::UnreachableCodeRule),
            ],
        }
    }

    /// Run all validation rules and collect diagnostics.
    pub fn validate(&self, body: &Stmt<S, E>, analysis: &dyn Analysis<S, E>) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .flat_map(|rule| rule.check(body, analysis))
            .collect()
    }

    /// Get a list of all registered rules
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }
}

impl<S, E> Default for Validator<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
