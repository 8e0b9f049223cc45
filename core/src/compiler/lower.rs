//! Structural translation from statement trees to lowered code

use super::analysis::Analysis;
use super::ast::{Case, Stmt};
use super::lowered::{Arm, Block, Code, LoweredCase, SeqExpr};
use super::terminating::{escapes, has_continue, is_terminating};
use super::CompileOptions;
use crate::seq::Signal;
use std::rc::Rc;
use tracing::debug;

pub(super) struct Lowerer<'a, S, E> {
    analysis: &'a dyn Analysis<S, E>,
    options: &'a CompileOptions,
}

impl<'a, S: Clone, E: Clone> Lowerer<'a, S, E> {
    pub(super) fn new(analysis: &'a dyn Analysis<S, E>, options: &'a CompileOptions) -> Self {
        Lowerer { analysis, options }
    }

    fn yields(&self, stmt: &Stmt<S, E>) -> bool {
        self.analysis.reaches_yield(stmt)
    }

    /* ===================== Sequences ===================== */

    /// Lower a statement list left to right.
    ///
    /// Stops at the first terminal: a translated statement swallows the rest
    /// of the list as its continuation, and anything after a terminating
    /// statement is dead.
    pub(super) fn lower_list(&self, stmts: &[Stmt<S, E>]) -> Vec<Code<S, E>> {
        let mut out = Vec::new();
        for (i, stmt) in stmts.iter().enumerate() {
            let rest = &stmts[i + 1..];
            let terminal = match stmt {
                Stmt::Break { .. } => Code::tail(SeqExpr::Break),
                Stmt::Continue { .. } => Code::tail(SeqExpr::Continue),
                Stmt::Return { value, .. } => Code::tail(SeqExpr::Return {
                    value: value.clone(),
                }),
                Stmt::Yield { value, recv, .. } => {
                    out.push(Code::tail(SeqExpr::Bind {
                        value: value.clone(),
                        recv: recv.clone().map(Rc::new),
                        then: self.sealed(rest),
                    }));
                    return out;
                }
                Stmt::YieldFrom { source, .. } => {
                    out.push(Code::tail(SeqExpr::YieldFrom {
                        source: source.clone(),
                        then: self.sealed(rest),
                    }));
                    return out;
                }
                _ if !self.yields(stmt) => {
                    let code = self.lower_native(stmt);
                    if !code.is_terminal(&|s| is_terminating(s, self.analysis)) {
                        out.push(code);
                        continue;
                    }
                    code
                }
                Stmt::For { init: Some(init), .. } | Stmt::Switch { init: Some(init), .. } => {
                    let mut hoisted = Vec::with_capacity(rest.len() + 2);
                    hoisted.push((**init).clone());
                    hoisted.push(without_init(stmt));
                    hoisted.extend_from_slice(rest);
                    out.extend(self.lower_list(&hoisted));
                    return out;
                }
                Stmt::Block { body, .. } => {
                    let inner = self.sealed(body);
                    out.push(Code::tail(if rest.is_empty() {
                        SeqExpr::Delay { body: inner }
                    } else {
                        SeqExpr::Combine {
                            first: inner,
                            second: self.sealed(rest),
                        }
                    }));
                    return out;
                }
                compound => {
                    let code = self.lower_compound(compound);
                    if rest.is_empty() {
                        out.push(code);
                    } else {
                        out.push(Code::tail(SeqExpr::Combine {
                            first: self.seal(vec![code]),
                            second: self.sealed(rest),
                        }));
                    }
                    return out;
                }
            };
            if !rest.is_empty() {
                debug!(
                    after = stmt.kind(),
                    dropped = rest.len(),
                    "dropping unreachable statements"
                );
            }
            out.push(terminal);
            return out;
        }
        out
    }

    /// Append `Normal` unless control can never reach the end.
    pub(super) fn seal(&self, mut codes: Vec<Code<S, E>>) -> Block<S, E> {
        let terminal = codes
            .last()
            .is_some_and(|last| last.is_terminal(&|s| is_terminating(s, self.analysis)));
        if !terminal {
            codes.push(Code::tail(SeqExpr::Normal));
        }
        Block::new(codes)
    }

    pub(super) fn sealed(&self, stmts: &[Stmt<S, E>]) -> Block<S, E> {
        self.seal(self.lower_list(stmts))
    }

    /* ===================== Yield-free statements ===================== */

    /// A statement that reaches no yield. It stays native unless a jump
    /// inside it leaves through `if`/block nesting, in which case that
    /// nesting is unfolded so the jump becomes a terminal.
    fn lower_native(&self, stmt: &Stmt<S, E>) -> Code<S, E> {
        match stmt {
            Stmt::Block { body, .. } if escapes(stmt) => Code::Block {
                body: Block::new(self.lower_list(body)),
            },
            Stmt::If {
                cond,
                then_s,
                else_s,
                ..
            } if escapes(stmt) => self.lower_if(cond, then_s, else_s.as_deref(), false),
            _ => Code::Native {
                stmt: Rc::new(stmt.clone()),
            },
        }
    }

    /* ===================== Compound statements ===================== */

    fn lower_compound(&self, stmt: &Stmt<S, E>) -> Code<S, E> {
        match stmt {
            Stmt::If {
                cond,
                then_s,
                else_s,
                ..
            } => self.lower_if(cond, then_s, else_s.as_deref(), true),
            Stmt::Switch { tag, cases, .. } => self.lower_switch(tag, cases),
            Stmt::For {
                cond, post, body, ..
            } => self.lower_for(cond, post.as_deref(), body),
            other => {
                // opaque statements the analysis reports as yielding
                debug!(kind = other.kind(), "statement kept native");
                Code::Native {
                    stmt: Rc::new(other.clone()),
                }
            }
        }
    }

    /// `if / else if / else`. Translated branches are sealed and an absent
    /// `else` becomes an explicit `Normal`.
    fn lower_if(
        &self,
        cond: &E,
        then_s: &Stmt<S, E>,
        else_s: Option<&Stmt<S, E>>,
        translated: bool,
    ) -> Code<S, E> {
        let branch = |stmt: &Stmt<S, E>| {
            if translated {
                self.sealed(stmt.as_list())
            } else {
                Block::new(self.lower_list(stmt.as_list()))
            }
        };

        let mut arms = vec![Arm {
            cond: cond.clone(),
            body: branch(then_s),
        }];
        let mut next = else_s;
        let else_body = loop {
            match next.and_then(|s| self.chained_if(s)) {
                Some(Stmt::If {
                    cond,
                    then_s,
                    else_s,
                    ..
                }) => {
                    arms.push(Arm {
                        cond: cond.clone(),
                        body: branch(then_s),
                    });
                    next = else_s.as_deref();
                }
                _ => break next.map(branch),
            }
        };

        let else_body = match else_body {
            None if translated => Some(Block::new(vec![Code::tail(SeqExpr::Normal)])),
            other => other,
        };
        Code::If { arms, else_body }
    }

    /// The `if` continuing an else-if chain, if `else_s` is one.
    fn chained_if<'s>(&self, else_s: &'s Stmt<S, E>) -> Option<&'s Stmt<S, E>> {
        match else_s {
            Stmt::If { .. } => Some(else_s),
            Stmt::Block { body, .. } if self.options.flatten_else_if => match body.as_slice() {
                [only @ Stmt::If { .. }] => Some(only),
                _ => None,
            },
            _ => None,
        }
    }

    /// A translated switch runs inside `Absorb(Break)`, so a `break` in a
    /// case leaves the switch and nothing else.
    fn lower_switch(&self, tag: &Option<E>, cases: &[Case<S, E>]) -> Code<S, E> {
        let cases = cases
            .iter()
            .map(|case| LoweredCase {
                exprs: case.exprs.clone(),
                body: self.sealed(&case.body),
            })
            .collect();
        let dispatch = Code::Switch {
            tag: tag.clone(),
            cases,
        };
        Code::tail(SeqExpr::Absorb {
            signal: Signal::Break,
            body: self.seal(vec![dispatch]),
        })
    }

    fn lower_for(
        &self,
        cond: &Option<E>,
        post: Option<&Stmt<S, E>>,
        body: &Stmt<S, E>,
    ) -> Code<S, E> {
        let cond = cond.clone().map(Rc::new);
        let post = match post {
            Some(post) if self.yields(post) => post,
            post => {
                return Code::tail(SeqExpr::For {
                    cond,
                    post: post.map(|p| Rc::new(p.clone())),
                    body: self.sealed(body.as_list()),
                })
            }
        };

        let continues = has_continue(body);
        let loop_body = if !self.yields(body) && !continues {
            debug!("merging yield-free loop body with yielding post");
            let mut merged = body.as_list().to_vec();
            merged.extend_from_slice(post.as_list());
            self.sealed(&merged)
        } else {
            let mut first = self.sealed(body.as_list());
            if continues {
                first = Block::new(vec![Code::tail(SeqExpr::Absorb {
                    signal: Signal::Continue,
                    body: first,
                })]);
            }
            Block::new(vec![Code::tail(SeqExpr::Combine {
                first,
                second: self.sealed(post.as_list()),
            })])
        };
        Code::tail(SeqExpr::For {
            cond,
            post: None,
            body: loop_body,
        })
    }
}

/// `stmt` with its init clause removed
fn without_init<S: Clone, E: Clone>(stmt: &Stmt<S, E>) -> Stmt<S, E> {
    let mut stmt = stmt.clone();
    match &mut stmt {
        Stmt::For { init, .. } | Stmt::Switch { init, .. } => *init = None,
        _ => {}
    }
    stmt
}
