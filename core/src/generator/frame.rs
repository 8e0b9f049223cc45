//! Frame stack entries and trampoline work items

use crate::seq::{Cond, Post, RecvThunk, Seq, Signal, Thunk};
use std::rc::Rc;

/// What the driver does on the next advance
pub(super) enum Resume<V> {
    /// Not started yet
    Start(Seq<V>),
    /// Suspended in a `Bind`
    Next(Thunk<V>),
    /// Suspended in a `BindRecv`
    Recv(RecvThunk<V>),
    /// Suspended inside an `Each` iterator
    Pull,
}

/// A pending continuation on the frame stack
pub(super) enum Frame<V> {
    /// Run this once the first half ends with `Normal`
    Combine(Rc<Seq<V>>),
    /// An active loop
    For {
        cond: Option<Cond>,
        post: Option<Post>,
        body: Rc<Seq<V>>,
    },
    /// Turns this signal into `Normal`
    Absorb(Signal),
    /// Boundary of a `YieldFrom`; every signal ends the delegation
    Delegate,
    /// An `Each` being drained
    Iter(Box<dyn Iterator<Item = V>>),
}

pub(super) enum Work<V> {
    Run(Seq<V>),
    Pull,
    Unwind(Signal, Option<V>),
}
