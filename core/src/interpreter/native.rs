//! Native execution of yield-free statements

use super::Machine;
use crate::compiler::ast::Stmt;
use tracing::warn;

/* ===================== Control Flow ===================== */

/// Control flow leaving a natively executed statement
#[derive(Debug, Clone, PartialEq)]
pub enum Control<V> {
    None,
    Break,
    Continue,
    Return(Option<V>),
}

impl<V> Control<V> {
    pub fn is_none(&self) -> bool {
        matches!(self, Control::None)
    }
}

/* ===================== Statements ===================== */

/// Run `stmt` to completion on `machine`.
///
/// Loops and switches consume the jumps that target them; anything else
/// leaves through the returned [`Control`].
pub fn exec_stmt<M: Machine>(machine: &M, stmt: &Stmt<M::Op, M::Expr>) -> Control<M::Value> {
    match stmt {
        Stmt::Opaque { op, .. } => {
            machine.exec(op);
            Control::None
        }
        Stmt::Block { body, .. } => exec_list(machine, body),
        Stmt::If {
            cond,
            then_s,
            else_s,
            ..
        } => {
            if machine.test(cond) {
                exec_stmt(machine, then_s)
            } else if let Some(else_s) = else_s {
                exec_stmt(machine, else_s)
            } else {
                Control::None
            }
        }
        Stmt::Switch {
            init, tag, cases, ..
        } => {
            if let Some(init) = init {
                let control = exec_stmt(machine, init);
                if !control.is_none() {
                    return control;
                }
            }
            let tag = tag.as_ref().map(|tag| machine.eval(tag));
            let chosen = cases
                .iter()
                .find(|case| case.exprs.iter().any(|e| machine.matches(tag.as_ref(), e)))
                .or_else(|| cases.iter().find(|case| case.is_default()));
            match chosen.map(|case| exec_list(machine, &case.body)) {
                None | Some(Control::Break) => Control::None,
                Some(control) => control,
            }
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
            ..
        } => {
            if let Some(init) = init {
                let control = exec_stmt(machine, init);
                if !control.is_none() {
                    return control;
                }
            }
            loop {
                if let Some(cond) = cond {
                    if !machine.test(cond) {
                        return Control::None;
                    }
                }
                match exec_stmt(machine, body) {
                    Control::Break => return Control::None,
                    Control::Return(value) => return Control::Return(value),
                    Control::None | Control::Continue => {}
                }
                if let Some(post) = post {
                    exec_stmt(machine, post);
                }
            }
        }
        Stmt::Break { .. } => Control::Break,
        Stmt::Continue { .. } => Control::Continue,
        Stmt::Return { value, .. } => Control::Return(value.as_ref().map(|e| machine.eval(e))),
        Stmt::Goto { label, .. } => {
            warn!(%label, "goto is not supported natively; skipped");
            Control::None
        }
        Stmt::Yield { .. } | Stmt::YieldFrom { .. } => {
            warn!(kind = stmt.kind(), "yield reached by native execution; skipped");
            Control::None
        }
    }
}

/// Run statements in order until one leaves with a jump.
pub fn exec_list<M: Machine>(machine: &M, stmts: &[Stmt<M::Op, M::Expr>]) -> Control<M::Value> {
    for stmt in stmts {
        let control = exec_stmt(machine, stmt);
        if !control.is_none() {
            return control;
        }
    }
    Control::None
}
