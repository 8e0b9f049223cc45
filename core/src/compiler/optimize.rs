//! Simplification of lowered trees
//!
//! Only removes indirections; the produced sequence never changes. Host
//! expressions are never moved, since a `Bind` value or `Return` payload
//! must be evaluated exactly when its segment runs.

use super::lowered::{Arm, Block, Code, LoweredCase, SeqExpr};
use std::rc::Rc;

/// Simplify everything below the outermost `Delay`, which is kept.
pub fn simplify_body<S, E>(seq: SeqExpr<S, E>) -> SeqExpr<S, E> {
    match seq {
        SeqExpr::Delay { body } => SeqExpr::Delay { body: block(body) },
        other => expr(other),
    }
}

fn block<S, E>(body: Block<S, E>) -> Block<S, E> {
    match Rc::try_unwrap(body.0) {
        Ok(codes) => Block::new(codes.into_iter().map(code).collect()),
        Err(shared) => Block(shared),
    }
}

fn code<S, E>(code: Code<S, E>) -> Code<S, E> {
    match code {
        Code::Tail { seq } => Code::Tail { seq: expr(seq) },
        Code::Block { body } => Code::Block { body: block(body) },
        Code::If { arms, else_body } => Code::If {
            arms: arms
                .into_iter()
                .map(|arm| Arm {
                    cond: arm.cond,
                    body: block(arm.body),
                })
                .collect(),
            else_body: else_body.map(block),
        },
        Code::Switch { tag, cases } => Code::Switch {
            tag,
            cases: cases
                .into_iter()
                .map(|case| LoweredCase {
                    exprs: case.exprs,
                    body: block(case.body),
                })
                .collect(),
        },
        native @ Code::Native { .. } => native,
    }
}

fn expr<S, E>(seq: SeqExpr<S, E>) -> SeqExpr<S, E> {
    match seq {
        SeqExpr::Delay { body } => collapse(block(body)),
        SeqExpr::Bind { value, recv, then } => SeqExpr::Bind {
            value,
            recv,
            then: flatten(block(then)),
        },
        SeqExpr::YieldFrom { source, then } => SeqExpr::YieldFrom {
            source,
            then: flatten(block(then)),
        },
        SeqExpr::Combine { first, second } => {
            let first = block(first);
            let second = block(second);
            if matches!(second.codes(), [Code::Tail { seq: SeqExpr::Normal }]) {
                collapse(first)
            } else {
                SeqExpr::Combine { first, second }
            }
        }
        SeqExpr::For { cond, post, body } => SeqExpr::For {
            cond,
            post,
            body: block(body),
        },
        SeqExpr::Absorb { signal, body } => SeqExpr::Absorb {
            signal,
            body: block(body),
        },
        terminal => terminal,
    }
}

/// `Delay([Tail(x)])` becomes `x` when building `x` reads nothing.
fn collapse<S, E>(body: Block<S, E>) -> SeqExpr<S, E> {
    match into_lazy_tail(body) {
        Ok(seq) => seq,
        Err(body) => SeqExpr::Delay { body },
    }
}

/// A continuation that only delays a block is that block.
fn flatten<S, E>(then: Block<S, E>) -> Block<S, E> {
    match into_lazy_tail(then) {
        Ok(SeqExpr::Delay { body }) => body,
        Ok(other) => Block::new(vec![Code::tail(other)]),
        Err(then) => then,
    }
}

fn into_lazy_tail<S, E>(body: Block<S, E>) -> Result<SeqExpr<S, E>, Block<S, E>> {
    if !matches!(body.codes(), [Code::Tail { seq }] if seq.is_lazy()) {
        return Err(body);
    }
    match Rc::try_unwrap(body.0) {
        Ok(mut codes) => match codes.pop() {
            Some(Code::Tail { seq }) => Ok(seq),
            other => Err(Block::new(other.into_iter().collect())),
        },
        Err(shared) => Err(Block(shared)),
    }
}
