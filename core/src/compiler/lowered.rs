//! Lowered tree: host statements interleaved with combinator expressions
//!
//! This is what the compiler produces and what the interpreter runs. A
//! [`Block`] is executed top to bottom; it either falls off its end or stops
//! at a [`Code::Tail`], whose combinator expression becomes the suspension
//! for the rest of the block.

use super::ast::Stmt;
use crate::seq::Signal;
use serde::Serialize;
use std::rc::Rc;

/// Result of compiling one procedure body
#[derive(Debug, Serialize)]
#[serde(tag = "t")]
pub enum Compiled<S, E> {
    /// Nothing reaches a yield; the body runs as is
    Plain { body: Rc<Stmt<S, E>> },
    /// The body as a suspension, always an outermost `Delay`
    Seq { seq: SeqExpr<S, E> },
}

/// A shared list of lowered code
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Block<S, E>(pub Rc<Vec<Code<S, E>>>);

impl<S, E> Clone for Block<S, E> {
    fn clone(&self) -> Self {
        Block(Rc::clone(&self.0))
    }
}

impl<S, E> Block<S, E> {
    pub fn new(codes: Vec<Code<S, E>>) -> Self {
        Block(Rc::new(codes))
    }

    pub fn codes(&self) -> &[Code<S, E>] {
        &self.0
    }

    /// Does control never fall off the end of this block?
    ///
    /// `native_terminates` answers the same question for native statements.
    pub fn is_terminal(&self, native_terminates: &dyn Fn(&Stmt<S, E>) -> bool) -> bool {
        self.0
            .last()
            .is_some_and(|last| last.is_terminal(native_terminates))
    }
}

/// One entry of a lowered block
#[derive(Debug, Serialize)]
#[serde(tag = "t")]
pub enum Code<S, E> {
    /// A yield-free host statement
    Native { stmt: Rc<Stmt<S, E>> },
    /// A nested scope
    Block { body: Block<S, E> },
    /// `if / else if / else` with lowered branches
    If {
        arms: Vec<Arm<S, E>>,
        else_body: Option<Block<S, E>>,
    },
    /// A switch dispatch with lowered case bodies; first match wins
    Switch {
        tag: Option<E>,
        cases: Vec<LoweredCase<S, E>>,
    },
    /// The rest of the block is this suspension
    Tail { seq: SeqExpr<S, E> },
}

impl<S, E> Code<S, E> {
    pub fn tail(seq: SeqExpr<S, E>) -> Self {
        Code::Tail { seq }
    }

    pub fn is_terminal(&self, native_terminates: &dyn Fn(&Stmt<S, E>) -> bool) -> bool {
        match self {
            Code::Tail { .. } => true,
            Code::Native { stmt } => native_terminates(stmt),
            Code::Block { body } => body.is_terminal(native_terminates),
            Code::If { arms, else_body } => {
                else_body
                    .as_ref()
                    .is_some_and(|b| b.is_terminal(native_terminates))
                    && arms.iter().all(|arm| arm.body.is_terminal(native_terminates))
            }
            Code::Switch { cases, .. } => {
                cases.iter().any(|case| case.exprs.is_empty())
                    && cases.iter().all(|case| case.body.is_terminal(native_terminates))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Arm<S, E> {
    pub cond: E,
    pub body: Block<S, E>,
}

#[derive(Debug, Serialize)]
pub struct LoweredCase<S, E> {
    /// Empty for `default`
    pub exprs: Vec<E>,
    pub body: Block<S, E>,
}

/// A combinator expression, built into a [`Seq`](crate::Seq) at run time
#[derive(Debug, Serialize)]
#[serde(tag = "t")]
pub enum SeqExpr<S, E> {
    Normal,
    Break,
    Continue,
    Return {
        value: Option<E>,
    },
    /// Yield `value`, then run `then`
    Bind {
        value: E,
        recv: Option<Rc<E>>,
        then: Block<S, E>,
    },
    /// Delegate to `source`, then run `then`
    YieldFrom {
        source: E,
        then: Block<S, E>,
    },
    Delay {
        body: Block<S, E>,
    },
    Combine {
        first: Block<S, E>,
        second: Block<S, E>,
    },
    For {
        cond: Option<Rc<E>>,
        post: Option<Rc<Stmt<S, E>>>,
        body: Block<S, E>,
    },
    Absorb {
        signal: Signal,
        body: Block<S, E>,
    },
}

impl<S, E> SeqExpr<S, E> {
    pub fn kind(&self) -> &'static str {
        match self {
            SeqExpr::Normal => "Normal",
            SeqExpr::Break => "Break",
            SeqExpr::Continue => "Continue",
            SeqExpr::Return { .. } => "Return",
            SeqExpr::Bind { recv: None, .. } => "Bind",
            SeqExpr::Bind { .. } => "BindRecv",
            SeqExpr::YieldFrom { .. } => "YieldFrom",
            SeqExpr::Delay { .. } => "Delay",
            SeqExpr::Combine { .. } => "Combine",
            SeqExpr::For { .. } => "For",
            SeqExpr::Absorb { .. } => "Absorb",
        }
    }

    /// Does building this expression evaluate nothing from host storage?
    pub fn is_lazy(&self) -> bool {
        matches!(
            self,
            SeqExpr::Normal
                | SeqExpr::Break
                | SeqExpr::Continue
                | SeqExpr::Return { value: None }
                | SeqExpr::Delay { .. }
                | SeqExpr::Combine { .. }
                | SeqExpr::For { .. }
                | SeqExpr::Absorb { .. }
        )
    }
}
