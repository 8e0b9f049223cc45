//! Tests for switch lowering

use super::helpers::{run, run_with, shape};
use crate::compiler::{CompileOptions, Stmt};
use crate::demo::dsl::*;
use crate::demo::{DemoStmt, Val};

fn dispatch(x: i64) -> Vec<DemoStmt> {
    vec![
        let_("x", int(x)),
        switch(
            Some(var("x")),
            vec![
                case(vec![int(1)], vec![yield_(int(10)), break_(), yield_(int(11))]),
                case(vec![int(2)], vec![yield_(int(20))]),
                default(vec![yield_(int(0))]),
            ],
        ),
        yield_(int(99)),
    ]
}

#[test]
fn test_switch_absorbs_break() {
    assert_eq!(
        shape(dispatch(1)),
        "Delay [statement, Combine [Absorb(break) [switch [Bind [Break]] [Bind [Normal]] [Bind [Normal]]]] [Bind [Normal]]]"
    );
    assert_eq!(run(dispatch(1)), vec![10, 99]);
    assert_eq!(run(dispatch(2)), vec![20, 99]);
    assert_eq!(run(dispatch(5)), vec![0, 99]);
}

#[test]
fn test_switch_without_default_falls_through() {
    let body = |x: i64| {
        vec![
            let_("x", int(x)),
            switch(Some(var("x")), vec![case(vec![int(1)], vec![yield_(int(10))])]),
        ]
    };

    assert_eq!(
        shape(body(1)),
        "Delay [statement, Absorb(break) [switch [Bind [Normal]], Normal]]"
    );
    assert_eq!(run(body(1)), vec![10]);
    assert!(run(body(2)).is_empty());
}

#[test]
fn test_switch_init_is_hoisted() {
    let body = vec![Stmt::switch(
        Some(let_("x", int(2))),
        Some(var("x")),
        vec![
            case(vec![int(2)], vec![yield_(int(20))]),
            default(vec![yield_(int(0))]),
        ],
    )];

    assert_eq!(
        shape(body.clone()),
        "Delay [statement, Absorb(break) [switch [Bind [Normal]] [Bind [Normal]]]]"
    );
    assert_eq!(run(body), vec![20]);
}

#[test]
fn test_multiple_selectors() {
    let body = |x: i64| {
        vec![
            let_("x", int(x)),
            switch(
                Some(var("x")),
                vec![
                    case(vec![int(1), int(3)], vec![yield_(string("odd"))]),
                    default(vec![yield_(int(0))]),
                ],
            ),
        ]
    };
    let (odd, _) = run_with(body(3), CompileOptions::default());
    let (even, _) = run_with(body(2), CompileOptions::default());
    assert_eq!(odd, vec![Val::from("odd")]);
    assert_eq!(even, vec![Val::Int(0)]);
}

#[test]
fn test_tagless_switch_tests_conditions() {
    let body = |x: i64| {
        vec![
            let_("x", int(x)),
            switch(
                None,
                vec![
                    case(vec![lt(var("x"), int(5))], vec![yield_(int(1))]),
                    default(vec![yield_(int(2))]),
                ],
            ),
        ]
    };
    assert_eq!(run(body(3)), vec![1]);
    assert_eq!(run(body(7)), vec![2]);
}

#[test]
fn test_break_in_switch_stays_in_loop() {
    let body = vec![count(
        "i",
        1,
        int(4),
        vec![
            switch(
                Some(var("i")),
                vec![case(vec![int(2)], vec![yield_(int(20)), break_()])],
            ),
            yield_(var("i")),
        ],
    )];
    assert_eq!(run(body), vec![1, 20, 2, 3]);
}

#[test]
fn test_continue_in_switch_targets_loop() {
    let body = vec![count(
        "i",
        1,
        int(4),
        vec![
            switch(
                Some(var("i")),
                vec![case(vec![int(2)], vec![yield_(int(20)), continue_()])],
            ),
            yield_(var("i")),
        ],
    )];
    assert_eq!(run(body), vec![1, 20, 3]);
}

#[test]
fn test_yield_free_switch_stays_native() {
    let body = vec![
        let_("x", int(1)),
        switch(Some(var("x")), vec![case(vec![int(1)], vec![emit(var("x"))])]),
        yield_(int(5)),
    ];
    assert_eq!(shape(body.clone()), "Delay [statement, switch, Bind [Normal]]");
    assert_eq!(run(body), vec![5]);
}

/// Operand type with no `Default`
#[derive(Debug, PartialEq, serde::Deserialize)]
struct Tag(u8);

#[test]
fn test_switch_deserializes_without_default_operands() {
    let json = r#"{
        "t": "Switch",
        "tag": 1,
        "cases": [
            { "exprs": [1], "body": [] },
            { "body": [ { "t": "Opaque", "op": 2 } ] }
        ]
    }"#;
    let stmt: Stmt<Tag, Tag> = serde_json::from_str(json).unwrap();

    let Stmt::Switch { init, tag, cases, .. } = stmt else {
        panic!("expected a switch");
    };
    assert!(init.is_none());
    assert_eq!(tag, Some(Tag(1)));
    assert_eq!(cases[0].exprs, vec![Tag(1)]);
    assert!(cases[1].is_default());
    assert!(matches!(&cases[1].body[0], Stmt::Opaque { op: Tag(2), .. }));
}
