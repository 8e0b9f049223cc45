//! Tests for loop lowering

use super::helpers::{ints, run, run_with, shape};
use crate::compiler::CompileOptions;
use crate::demo::dsl::*;
use crate::demo::Val;

#[test]
fn test_counting_loop() {
    let body = vec![count("i", 0, int(3), vec![yield_(var("i"))])];

    assert_eq!(shape(body.clone()), "Delay [statement, For+post [Bind [Normal]]]");
    assert_eq!(run(body), vec![0, 1, 2]);
}

#[test]
fn test_false_condition_runs_nothing() {
    let body = vec![count("i", 5, int(3), vec![yield_(var("i"))]), yield_(int(9))];
    assert_eq!(run(body), vec![9]);
}

#[test]
fn test_yield_free_loop_stays_native() {
    let body = vec![
        count("i", 0, int(3), vec![emit(var("i"))]),
        yield_(int(7)),
    ];
    assert_eq!(shape(body.clone()), "Delay [for, Bind [Normal]]");
    assert_eq!(run(body), vec![7]);
}

#[test]
fn test_yielding_post_merged_with_body() {
    let body = vec![for_(
        Some(let_("i", int(0))),
        Some(lt(var("i"), int(3))),
        Some(yield_(var("i"))),
        vec![incr("i")],
    )];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, For [statement, Bind [Normal]]]"
    );
    assert_eq!(run(body), vec![1, 2, 3]);
}

#[test]
fn test_yielding_body_and_post() {
    let body = vec![for_(
        Some(let_("i", int(0))),
        Some(lt(var("i"), int(2))),
        Some(yield_(int(100))),
        vec![yield_(var("i")), incr("i")],
    )];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, For [Combine [Bind [statement, Normal]] [Bind [Normal]]]]"
    );
    assert_eq!(run(body), vec![0, 100, 1, 100]);
}

#[test]
fn test_continue_still_runs_yielding_post() {
    let body = vec![for_(
        Some(let_("i", int(0))),
        Some(lt(var("i"), int(3))),
        Some(yield_(int(100))),
        vec![
            incr("i"),
            if_(eq(var("i"), int(2)), vec![continue_()]),
            yield_(var("i")),
        ],
    )];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, For [Combine [Absorb(continue) [statement, if [Continue], Bind [Normal]]] [Bind [Normal]]]]"
    );
    assert_eq!(run(body), vec![1, 100, 100, 3, 100]);
}

#[test]
fn test_break_leaves_loop() {
    let body = vec![
        count(
            "i",
            0,
            int(10),
            vec![
                if_(eq(var("i"), int(3)), vec![break_()]),
                yield_(var("i")),
            ],
        ),
        yield_(int(99)),
    ];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, Combine [For+post [if [Break], Bind [Normal]]] [Bind [Normal]]]"
    );
    assert_eq!(run(body), vec![0, 1, 2, 99]);
}

#[test]
fn test_infinite_loop_with_break() {
    let body = vec![
        let_("n", int(0)),
        for_(
            None,
            None,
            None,
            vec![
                incr("n"),
                if_(eq(var("n"), int(3)), vec![break_()]),
                yield_(var("n")),
            ],
        ),
    ];
    assert_eq!(run(body), vec![1, 2]);
}

#[test]
fn test_nested_break_leaves_inner_loop_only() {
    let body = vec![count(
        "i",
        0,
        int(2),
        vec![
            count(
                "j",
                0,
                int(3),
                vec![
                    if_(eq(var("j"), int(2)), vec![break_()]),
                    yield_(var("j")),
                ],
            ),
            yield_(add(var("i"), int(100))),
        ],
    )];
    assert_eq!(run(body), vec![0, 1, 100, 0, 1, 101]);
}

#[test]
fn test_return_from_native_loop() {
    let body = vec![
        yield_(int(1)),
        count(
            "i",
            0,
            int(10),
            vec![if_(eq(var("i"), int(5)), vec![ret(Some(var("i")))])],
        ),
        yield_(int(2)),
    ];
    let (values, result) = run_with(body, CompileOptions::default());
    assert_eq!(ints(&values), vec![1]);
    assert_eq!(result, Val::Int(5));
}

#[test]
fn test_return_from_translated_loop() {
    let body = vec![
        count(
            "i",
            0,
            int(10),
            vec![
                yield_(var("i")),
                if_(eq(var("i"), int(2)), vec![ret(Some(int(42)))]),
            ],
        ),
        yield_(int(99)),
    ];
    let (values, result) = run_with(body, CompileOptions::default());
    assert_eq!(ints(&values), vec![0, 1, 2]);
    assert_eq!(result, Val::Int(42));
}

#[test]
fn test_native_switch_continue_targets_loop() {
    let body = vec![count(
        "i",
        0,
        int(5),
        vec![
            switch(
                Some(var("i")),
                vec![case(vec![int(0), int(2)], vec![continue_()])],
            ),
            yield_(var("i")),
        ],
    )];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, For+post [switch, Bind [Normal]]]"
    );
    assert_eq!(run(body), vec![1, 3, 4]);
}

#[test]
fn test_long_loop() {
    let body = vec![count("i", 0, int(10_000), vec![yield_(var("i"))])];
    let values = run(body);
    assert_eq!(values.len(), 10_000);
    assert_eq!(values.last(), Some(&9_999));
}
