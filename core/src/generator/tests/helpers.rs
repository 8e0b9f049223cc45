//! Test helpers for generator tests

use crate::seq::Seq;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A shared mutable integer, the way compiled code shares a local across segments
pub fn cell(value: i64) -> Rc<Cell<i64>> {
    Rc::new(Cell::new(value))
}

/// A shared log of received values
pub fn log() -> Rc<RefCell<Vec<i64>>> {
    Rc::new(RefCell::new(Vec::new()))
}

/// Yield each of `values` in order, then fall through
pub fn yields(values: &[i64]) -> Seq<i64> {
    match values.split_first() {
        None => Seq::normal(),
        Some((first, rest)) => {
            let rest = rest.to_vec();
            Seq::bind(*first, move || yields(&rest))
        }
    }
}

/// Chain of `depth` nested delegations around a single yield of `leaf`
pub fn delegation_chain(depth: usize, leaf: i64) -> Seq<i64> {
    if depth == 0 {
        Seq::bind(leaf, Seq::normal)
    } else {
        Seq::yield_from(Seq::delay(move || delegation_chain(depth - 1, leaf)))
    }
}
