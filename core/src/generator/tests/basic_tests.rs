//! Tests for plain sequencing, terminals and lifecycle

use super::super::*;
use super::helpers::{cell, yields};
use crate::seq::{Seq, Signal};

#[test]
fn test_yield_123() {
    let seq = Seq::bind(1, || Seq::bind(2, || Seq::bind(3, Seq::normal)));
    let values: Vec<i64> = Generator::start(seq).collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_empty_sequence() {
    let mut gen = start(Seq::<i64>::normal());
    assert!(!gen.move_next());
    assert_eq!(*gen.current(), 0);
    assert_eq!(*gen.result(), 0);
    assert_eq!(gen.state(), State::Exhausted);
}

#[test]
fn test_result_of_return() {
    let mut gen = start(Seq::bind(1, || Seq::return_value(42)));

    assert!(gen.move_next());
    assert_eq!(*gen.current(), 1);
    assert_eq!(*gen.result(), 0);

    assert!(!gen.move_next());
    assert_eq!(*gen.result(), 42);
}

#[test]
fn test_return_without_value_leaves_default_result() {
    let mut gen = start(Seq::bind(5, || Seq::return_(None)));
    assert!(gen.move_next());
    assert!(!gen.move_next());
    assert_eq!(*gen.result(), 0);
}

#[test]
fn test_exhaustion_is_sticky() {
    let mut gen = start(yields(&[7]));
    assert!(gen.move_next());
    assert_eq!(*gen.current(), 7);

    for _ in 0..3 {
        assert!(!gen.move_next());
        assert_eq!(*gen.current(), 0);
        assert_eq!(gen.state(), State::Exhausted);
    }
}

#[test]
fn test_state_transitions() {
    let mut gen = start(yields(&[1]));
    assert_eq!(gen.state(), State::NotStarted);
    gen.move_next();
    assert_eq!(gen.state(), State::Running);
    gen.move_next();
    assert_eq!(gen.state(), State::Exhausted);
}

#[test]
fn test_combine_runs_second_after_normal() {
    let seq = Seq::combine(yields(&[1, 2]), yields(&[3]));
    assert_eq!(start(seq).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_combine_short_circuits_on_return() {
    let seq = Seq::combine(
        Seq::bind(1, || Seq::return_value(10)),
        Seq::bind(2, || panic!("second half must not run")),
    );
    let mut gen = start(seq);
    assert_eq!(gen.by_ref().collect::<Vec<_>>(), vec![1]);
    assert_eq!(*gen.result(), 10);
}

#[test]
fn test_delay_reads_state_at_run_time() {
    let x = cell(1);
    let seq = {
        let set = x.clone();
        let read = x.clone();
        Seq::bind(0, move || {
            set.set(99);
            let read = read.clone();
            Seq::delay(move || Seq::bind(read.get(), Seq::normal))
        })
    };
    assert_eq!(start(seq).collect::<Vec<_>>(), vec![0, 99]);
    assert_eq!(x.get(), 99);
}

#[test]
fn test_independent_drivers() {
    let seq = yields(&[1, 2, 3]);
    let mut a = start(seq.clone());
    let mut b = start(seq);

    assert!(a.move_next());
    assert!(a.move_next());
    assert!(b.move_next());
    assert_eq!(*a.current(), 2);
    assert_eq!(*b.current(), 1);

    assert_eq!(b.collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(a.collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_absorb_turns_matching_signal_into_normal() {
    let seq = Seq::combine(
        Seq::absorb(Signal::Break, Seq::bind(1, Seq::break_)),
        yields(&[2]),
    );
    assert_eq!(start(seq).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_absorb_propagates_other_signals() {
    let seq = Seq::combine(
        Seq::absorb(Signal::Break, Seq::return_value(5)),
        Seq::bind(2, || panic!("must not run")),
    );
    let mut gen = start(seq);
    assert!(!gen.move_next());
    assert_eq!(*gen.result(), 5);
}

#[test]
fn test_dropping_suspended_generator_runs_nothing() {
    let seq = Seq::bind(1, || -> Seq<i64> { panic!("continuation must not run on drop") });
    let mut gen = start(seq);
    assert!(gen.move_next());
    drop(gen);
}
