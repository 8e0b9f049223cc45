//! # Interpreter - Running Lowered Code
//!
//! Turns a [`Compiled`] program into a runtime [`Seq`] over a host
//! [`Machine`]. The machine owns the host's storage and knows how to run
//! opaque statements and evaluate expressions; the interpreter only walks
//! the lowered tree.
//!
//! Every thunk holds the machine by `Rc`, so each segment reads storage at
//! the moment it runs. [`instantiate`] creates a fresh machine each time the
//! resulting suspension is started.

pub mod native;

#[cfg(test)]
mod tests;

pub use native::{exec_list, exec_stmt, Control};

use crate::compiler::lowered::{Block, Code, Compiled, SeqExpr};
use crate::generator::Generator;
use crate::seq::{Cond, Post, Seq};
use std::rc::Rc;
use tracing::{trace, warn};

/// Host hooks used by the interpreter
pub trait Machine: 'static {
    /// Opaque statement
    type Op: 'static;
    /// Expression
    type Expr: 'static;
    /// Yielded, sent and returned values
    type Value: Clone + Default + 'static;

    fn exec(&self, op: &Self::Op);

    fn eval(&self, expr: &Self::Expr) -> Self::Value;

    /// Evaluate a condition
    fn test(&self, expr: &Self::Expr) -> bool;

    /// Does case selector `case` match the switch `tag`? Without a tag the
    /// selector is a condition.
    fn matches(&self, tag: Option<&Self::Value>, case: &Self::Expr) -> bool;

    /// Store a value delivered by `send`
    fn assign(&self, place: &Self::Expr, value: Self::Value);

    /// The sub-sequence a `yield from` delegates to
    fn delegate(&self, source: &Self::Expr) -> Seq<Self::Value>;
}

/// A compiled program runnable on machine `M`
pub type Program<M> = Compiled<<M as Machine>::Op, <M as Machine>::Expr>;

type MBlock<M> = Block<<M as Machine>::Op, <M as Machine>::Expr>;

/// Where running a lowered block ended
enum Flow<V> {
    /// Fell off the end
    Fall,
    /// Stopped at a tail; the rest of the block is this suspension
    Tail(Seq<V>),
}

/// A suspension running `program` on a fresh machine from `factory` each
/// time it is started.
pub fn instantiate<M, F>(program: Rc<Program<M>>, factory: F) -> Seq<M::Value>
where
    M: Machine,
    F: Fn() -> M + 'static,
{
    Seq::delay(move || {
        let machine = Rc::new(factory());
        match &*program {
            Compiled::Plain { body } => match exec_stmt(&*machine, body) {
                Control::Return(value) => Seq::return_(value),
                _ => Seq::normal(),
            },
            Compiled::Seq { seq } => build(&machine, seq),
        }
    })
}

/// Start driving `program` on a fresh machine.
pub fn start<M, F>(program: Rc<Program<M>>, factory: F) -> Generator<M::Value>
where
    M: Machine,
    F: Fn() -> M + 'static,
{
    Generator::start(instantiate(program, factory))
}

/// Build the runtime suspension for a combinator expression.
pub fn build<M: Machine>(machine: &Rc<M>, seq: &SeqExpr<M::Op, M::Expr>) -> Seq<M::Value> {
    trace!(kind = seq.kind(), "building suspension");
    match seq {
        SeqExpr::Normal => Seq::normal(),
        SeqExpr::Break => Seq::break_(),
        SeqExpr::Continue => Seq::continue_(),
        SeqExpr::Return { value } => Seq::return_(value.as_ref().map(|e| machine.eval(e))),
        SeqExpr::Bind {
            value,
            recv: None,
            then,
        } => {
            let value = machine.eval(value);
            let (machine, then) = (Rc::clone(machine), then.clone());
            Seq::bind(value, move || segment(&machine, &then))
        }
        SeqExpr::Bind {
            value,
            recv: Some(place),
            then,
        } => {
            let value = machine.eval(value);
            let (machine, place, then) = (Rc::clone(machine), Rc::clone(place), then.clone());
            Seq::bind_recv(value, move |sent| {
                machine.assign(&place, sent);
                segment(&machine, &then)
            })
        }
        SeqExpr::YieldFrom { source, then } => Seq::combine(
            Seq::yield_from(machine.delegate(source)),
            deferred(machine, then),
        ),
        SeqExpr::Delay { body } => deferred(machine, body),
        SeqExpr::Combine { first, second } => {
            Seq::combine(deferred(machine, first), deferred(machine, second))
        }
        SeqExpr::For { cond, post, body } => {
            let cond = cond.as_ref().map(|cond| {
                let (machine, cond) = (Rc::clone(machine), Rc::clone(cond));
                Rc::new(move || machine.test(&cond)) as Cond
            });
            let post = post.as_ref().map(|post| {
                let (machine, post) = (Rc::clone(machine), Rc::clone(post));
                Rc::new(move || {
                    let control = exec_stmt(&*machine, &post);
                    if !control.is_none() {
                        warn!("jump out of a loop post ignored");
                    }
                }) as Post
            });
            Seq::for_(cond, post, deferred(machine, body))
        }
        SeqExpr::Absorb { signal, body } => Seq::absorb(*signal, deferred(machine, body)),
    }
}

/// `Delay` around running `block`
fn deferred<M: Machine>(machine: &Rc<M>, block: &MBlock<M>) -> Seq<M::Value> {
    let (machine, block) = (Rc::clone(machine), block.clone());
    Seq::delay(move || segment(&machine, &block))
}

/// Run `block` now; falling off its end means `Normal`.
fn segment<M: Machine>(machine: &Rc<M>, block: &MBlock<M>) -> Seq<M::Value> {
    match run_block(machine, block) {
        Flow::Fall => Seq::normal(),
        Flow::Tail(seq) => seq,
    }
}

fn run_block<M: Machine>(machine: &Rc<M>, block: &MBlock<M>) -> Flow<M::Value> {
    for code in block.codes() {
        let flow = match code {
            Code::Native { stmt } => match exec_stmt(&**machine, stmt) {
                Control::None => Flow::Fall,
                Control::Break => Flow::Tail(Seq::break_()),
                Control::Continue => Flow::Tail(Seq::continue_()),
                Control::Return(value) => Flow::Tail(Seq::return_(value)),
            },
            Code::Block { body } => run_block(machine, body),
            Code::If { arms, else_body } => {
                let chosen = arms
                    .iter()
                    .find(|arm| machine.test(&arm.cond))
                    .map(|arm| &arm.body)
                    .or(else_body.as_ref());
                match chosen {
                    Some(body) => run_block(machine, body),
                    None => Flow::Fall,
                }
            }
            Code::Switch { tag, cases } => {
                let tag = tag.as_ref().map(|tag| machine.eval(tag));
                let chosen = cases
                    .iter()
                    .find(|case| case.exprs.iter().any(|e| machine.matches(tag.as_ref(), e)))
                    .or_else(|| cases.iter().find(|case| case.exprs.is_empty()));
                match chosen {
                    Some(case) => run_block(machine, &case.body),
                    None => Flow::Fall,
                }
            }
            Code::Tail { seq } => Flow::Tail(build(machine, seq)),
        };
        if let Flow::Tail(seq) = flow {
            return Flow::Tail(seq);
        }
    }
    Flow::Fall
}
