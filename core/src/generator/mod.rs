//! # Generator - Trampolined Suspension Driver
//!
//! Drives a [`Seq`] as a pull-based iterator.
//!
//! ## Core Principles
//!
//! 1. **Stack-driven execution**: pending work lives in `frames: Vec<Frame>`,
//!    never in native call frames. Delegation to any depth costs heap, not stack.
//! 2. **Explicit step results**: every advance returns [`StepResult`] directly,
//!    so no shared out-parameter cell is needed between combinators and driver.
//! 3. **Centralized signals**: `Normal`/`Break`/`Continue`/`Return` are
//!    resolved in one place, [`Generator::unwind`].
//! 4. **Single-use resumptions**: the pending resumption is taken out of the
//!    generator before it is invoked.

mod frame;

#[cfg(test)]
mod tests;

use crate::seq::{Node, Seq, Signal};
use frame::{Frame, Resume, Work};
use std::iter::FusedIterator;

/* ===================== State ===================== */

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created, nothing run yet
    NotStarted,
    /// Suspended at a yield point
    Running,
    /// Finished; every further advance reports "no more elements"
    Exhausted,
}

/// Result of advancing the trampoline once
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult<V> {
    /// A value was yielded; the generator is suspended after it
    Yielded(V),
    /// The suspension chain is finished
    Done,
}

/* ===================== Generator ===================== */

/// Pull-based driver over a suspension tree.
///
/// A generator exclusively owns its frame stack and pending resumption.
/// Dropping it at any point is safe and runs nothing.
pub struct Generator<V> {
    state: State,
    resume: Option<Resume<V>>,
    frames: Vec<Frame<V>>,
    current: V,
    result: V,
}

/// Start driving `seq`.
pub fn start<V: Clone + Default + 'static>(seq: Seq<V>) -> Generator<V> {
    Generator::start(seq)
}

impl<V: Clone + Default + 'static> Generator<V> {
    /// Wrap `seq` in a fresh driver. Nothing runs until the first advance.
    pub fn start(seq: Seq<V>) -> Self {
        Generator {
            state: State::NotStarted,
            resume: Some(Resume::Start(seq)),
            frames: Vec::new(),
            current: V::default(),
            result: V::default(),
        }
    }

    /// Advance to the next yielded value.
    ///
    /// Returns `false` once the chain is exhausted, and keeps returning
    /// `false` on every later call.
    pub fn move_next(&mut self) -> bool {
        self.advance(None)
    }

    /// Value produced by the most recent successful advance; `V::default()`
    /// before the first one and after exhaustion.
    pub fn current(&self) -> &V {
        &self.current
    }

    /// Deliver `value` to the pending receive point and advance.
    ///
    /// A generator that has not started is first advanced to its first yield
    /// point and that first value is discarded, so the first `send` always
    /// lands in a receive continuation. Returns the value yielded after the
    /// delivery, or `None` when the generator finished.
    pub fn send(&mut self, value: V) -> Option<V> {
        if self.state == State::NotStarted && !self.move_next() {
            return None;
        }
        if self.advance(Some(value)) {
            Some(self.current.clone())
        } else {
            None
        }
    }

    /// Payload of the terminal `Return`, or `V::default()` when the chain
    /// ended by falling through.
    pub fn result(&self) -> &V {
        &self.result
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of pending frames (loops, sequencing points, delegations).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn advance(&mut self, sent: Option<V>) -> bool {
        match self.step(sent) {
            StepResult::Yielded(value) => {
                self.current = value;
                self.state = State::Running;
                true
            }
            StepResult::Done => {
                self.current = V::default();
                self.state = State::Exhausted;
                false
            }
        }
    }

    /// The trampoline: runs until the next yield or the end of the chain.
    fn step(&mut self, sent: Option<V>) -> StepResult<V> {
        let mut work = match self.resume.take() {
            None => return StepResult::Done,
            Some(Resume::Start(seq)) => Work::Run(seq),
            Some(Resume::Next(next)) => {
                if sent.is_some() {
                    tracing::trace!("sent value dropped: pending yield does not receive");
                }
                Work::Run(next())
            }
            Some(Resume::Recv(next)) => Work::Run(next(sent.unwrap_or_default())),
            Some(Resume::Pull) => Work::Pull,
        };

        loop {
            work = match work {
                Work::Run(seq) => match seq.node {
                    Node::Normal => Work::Unwind(Signal::Normal, None),
                    Node::Break => Work::Unwind(Signal::Break, None),
                    Node::Continue => Work::Unwind(Signal::Continue, None),
                    Node::Return(value) => Work::Unwind(Signal::Return, value),
                    Node::Bind(value, next) => {
                        self.resume = Some(Resume::Next(next));
                        return StepResult::Yielded(value);
                    }
                    Node::BindRecv(value, next) => {
                        self.resume = Some(Resume::Recv(next));
                        return StepResult::Yielded(value);
                    }
                    Node::Delay(build) => Work::Run(build()),
                    Node::Combine(first, second) => {
                        self.frames.push(Frame::Combine(second));
                        Work::Run(Seq::clone(&first))
                    }
                    Node::For { cond, post, body } => {
                        // first iteration: no post
                        if cond.as_ref().map_or(true, |cond| cond()) {
                            let next = Seq::clone(&body);
                            self.frames.push(Frame::For { cond, post, body });
                            Work::Run(next)
                        } else {
                            Work::Unwind(Signal::Normal, None)
                        }
                    }
                    Node::Absorb(signal, body) => {
                        self.frames.push(Frame::Absorb(signal));
                        Work::Run(Seq::clone(&body))
                    }
                    Node::YieldFrom(inner) => {
                        self.frames.push(Frame::Delegate);
                        Work::Run(Seq::clone(&inner))
                    }
                    Node::Each(source) => {
                        self.frames.push(Frame::Iter(source()));
                        Work::Pull
                    }
                },

                Work::Pull => match self.frames.last_mut() {
                    Some(Frame::Iter(iter)) => match iter.next() {
                        Some(value) => {
                            self.resume = Some(Resume::Pull);
                            return StepResult::Yielded(value);
                        }
                        None => {
                            self.frames.pop();
                            Work::Unwind(Signal::Normal, None)
                        }
                    },
                    _ => Work::Unwind(Signal::Normal, None),
                },

                Work::Unwind(signal, payload) => match self.unwind(signal, payload) {
                    Some(next) => next,
                    None => return StepResult::Done,
                },
            };
        }
    }

    /// Hand a signal to the innermost frame.
    ///
    /// Returns the next piece of work, or `None` when the signal reached the
    /// outermost level and the generator is finished.
    fn unwind(&mut self, signal: Signal, payload: Option<V>) -> Option<Work<V>> {
        let Some(frame) = self.frames.pop() else {
            if signal == Signal::Return {
                self.result = payload.unwrap_or_default();
            }
            tracing::trace!(%signal, "generator exhausted");
            return None;
        };

        let next = match frame {
            Frame::Combine(second) => match signal {
                Signal::Normal => Work::Run(Seq::clone(&second)),
                _ => Work::Unwind(signal, payload),
            },
            Frame::For { cond, post, body } => match signal {
                Signal::Normal | Signal::Continue => {
                    if let Some(post) = &post {
                        post();
                    }
                    if cond.as_ref().map_or(true, |cond| cond()) {
                        let next = Seq::clone(&body);
                        self.frames.push(Frame::For { cond, post, body });
                        Work::Run(next)
                    } else {
                        Work::Unwind(Signal::Normal, None)
                    }
                }
                Signal::Break => Work::Unwind(Signal::Normal, None),
                Signal::Return => Work::Unwind(Signal::Return, payload),
            },
            Frame::Absorb(absorbed) if absorbed == signal => Work::Unwind(Signal::Normal, None),
            Frame::Absorb(_) => Work::Unwind(signal, payload),
            Frame::Delegate => Work::Unwind(Signal::Normal, None),
            Frame::Iter(_) => Work::Unwind(signal, payload),
        };
        Some(next)
    }
}

impl<V: Clone + Default + 'static> Iterator for Generator<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.move_next() {
            Some(self.current.clone())
        } else {
            None
        }
    }
}

impl<V: Clone + Default + 'static> FusedIterator for Generator<V> {}

impl<V: Clone + Default + 'static> From<Seq<V>> for Generator<V> {
    fn from(seq: Seq<V>) -> Self {
        Generator::start(seq)
    }
}
