//! Test helpers for compiler tests
//!
//! Common utilities for compiling demo bodies and rendering lowered trees

use crate::compiler::lowered::{Block, Code, Compiled, SeqExpr};
use crate::compiler::{CompileError, CompileOptions, Compiler, Stmt};
use crate::demo::{DemoAnalysis, DemoStmt, Expr, Module, Op, Runtime, Val};

/// Compile `body` as a generator function body
pub fn compile_with(
    body: Vec<DemoStmt>,
    options: CompileOptions,
) -> Result<Compiled<Op, Expr>, CompileError> {
    Compiler::with_options(options).compile(&Stmt::block(body), &DemoAnalysis)
}

/// Compile and render `body`, expecting a translated tree
pub fn shape_with(body: Vec<DemoStmt>, options: CompileOptions) -> String {
    match compile_with(body, options).expect("compile failed") {
        Compiled::Seq { seq } => render(&seq),
        Compiled::Plain { .. } => panic!("expected a translated body"),
    }
}

pub fn shape(body: Vec<DemoStmt>) -> String {
    shape_with(body, CompileOptions::default())
}

pub fn unoptimized() -> CompileOptions {
    CompileOptions {
        optimize: false,
        ..CompileOptions::default()
    }
}

/// Run `body` as `main` with no arguments and collect the yielded values
pub fn run_with(body: Vec<DemoStmt>, options: CompileOptions) -> (Vec<Val>, Val) {
    let module = Module::new().function("main", &[], body);
    let runtime = Runtime::with_options(&module, options).expect("compile failed");
    let mut gen = runtime.start("main", vec![]).expect("start failed");
    let values: Vec<Val> = gen.by_ref().collect();
    (values, gen.result().clone())
}

/// Yielded integers of running `body`, checked to be the same with and
/// without simplification
pub fn run(body: Vec<DemoStmt>) -> Vec<i64> {
    let (optimized, result) = run_with(body.clone(), CompileOptions::default());
    let (plain, plain_result) = run_with(body, unoptimized());
    assert_eq!(optimized, plain, "simplification changed the sequence");
    assert_eq!(result, plain_result, "simplification changed the result");
    ints(&optimized)
}

pub fn ints(values: &[Val]) -> Vec<i64> {
    values
        .iter()
        .map(|v| v.as_int().expect("expected an integer"))
        .collect()
}

/* ===================== Rendering ===================== */

pub fn render(seq: &SeqExpr<Op, Expr>) -> String {
    match seq {
        SeqExpr::Normal => "Normal".to_string(),
        SeqExpr::Break => "Break".to_string(),
        SeqExpr::Continue => "Continue".to_string(),
        SeqExpr::Return { .. } => "Return".to_string(),
        SeqExpr::Bind {
            recv: None, then, ..
        } => format!("Bind {}", block(then)),
        SeqExpr::Bind { then, .. } => format!("BindRecv {}", block(then)),
        SeqExpr::YieldFrom { then, .. } => format!("YieldFrom {}", block(then)),
        SeqExpr::Delay { body } => format!("Delay {}", block(body)),
        SeqExpr::Combine { first, second } => {
            format!("Combine {} {}", block(first), block(second))
        }
        SeqExpr::For {
            post: None, body, ..
        } => format!("For {}", block(body)),
        SeqExpr::For { body, .. } => format!("For+post {}", block(body)),
        SeqExpr::Absorb { signal, body } => format!("Absorb({}) {}", signal, block(body)),
    }
}

fn block(b: &Block<Op, Expr>) -> String {
    let codes: Vec<String> = b.codes().iter().map(code).collect();
    format!("[{}]", codes.join(", "))
}

fn code(c: &Code<Op, Expr>) -> String {
    match c {
        Code::Native { stmt } => stmt.kind().to_string(),
        Code::Block { body } => format!("block {}", block(body)),
        Code::If { arms, else_body } => {
            let mut out = "if".to_string();
            for arm in arms {
                out.push(' ');
                out.push_str(&block(&arm.body));
            }
            if let Some(else_body) = else_body {
                out.push_str(" else ");
                out.push_str(&block(else_body));
            }
            out
        }
        Code::Switch { cases, .. } => {
            let cases: Vec<String> = cases.iter().map(|c| block(&c.body)).collect();
            format!("switch {}", cases.join(" "))
        }
        Code::Tail { seq } => render(seq),
    }
}
