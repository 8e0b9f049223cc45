//! Builders for demo programs written in Rust

use super::lang::{DemoStmt, Expr, Op};
use super::value::BinOp;
use crate::compiler::ast::{Case, Stmt};

pub fn int(v: i64) -> Expr {
    Expr::LitInt { v }
}

pub fn boolean(v: bool) -> Expr {
    Expr::LitBool { v }
}

pub fn string(v: &str) -> Expr {
    Expr::LitStr { v: v.to_string() }
}

pub fn var(name: &str) -> Expr {
    Expr::Var {
        name: name.to_string(),
    }
}

pub fn bin(op: BinOp, l: Expr, r: Expr) -> Expr {
    Expr::Bin {
        op,
        l: Box::new(l),
        r: Box::new(r),
    }
}

pub fn add(l: Expr, r: Expr) -> Expr {
    bin(BinOp::Add, l, r)
}

pub fn sub(l: Expr, r: Expr) -> Expr {
    bin(BinOp::Sub, l, r)
}

pub fn lt(l: Expr, r: Expr) -> Expr {
    bin(BinOp::Lt, l, r)
}

pub fn eq(l: Expr, r: Expr) -> Expr {
    bin(BinOp::Eq, l, r)
}

pub fn not(e: Expr) -> Expr {
    Expr::Not { e: Box::new(e) }
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call {
        name: name.to_string(),
        args,
    }
}

pub fn let_(name: &str, value: Expr) -> DemoStmt {
    Stmt::opaque(Op::Let {
        name: name.to_string(),
        value,
    })
}

pub fn set(name: &str, value: Expr) -> DemoStmt {
    Stmt::opaque(Op::Set {
        name: name.to_string(),
        value,
    })
}

/// `name = name + 1`
pub fn incr(name: &str) -> DemoStmt {
    set(name, add(var(name), int(1)))
}

pub fn emit(value: Expr) -> DemoStmt {
    Stmt::opaque(Op::Emit { value })
}

pub fn panic(message: &str) -> DemoStmt {
    Stmt::opaque(Op::Panic {
        message: message.to_string(),
    })
}

pub fn yield_(value: Expr) -> DemoStmt {
    Stmt::yield_(value)
}

/// `name = yield value`
pub fn recv(name: &str, value: Expr) -> DemoStmt {
    Stmt::yield_recv(value, var(name))
}

pub fn yield_from(source: Expr) -> DemoStmt {
    Stmt::yield_from(source)
}

pub fn block(body: Vec<DemoStmt>) -> DemoStmt {
    Stmt::block(body)
}

pub fn if_(cond: Expr, then_s: Vec<DemoStmt>) -> DemoStmt {
    Stmt::if_(cond, block(then_s), None)
}

pub fn if_else(cond: Expr, then_s: Vec<DemoStmt>, else_s: Vec<DemoStmt>) -> DemoStmt {
    Stmt::if_(cond, block(then_s), Some(block(else_s)))
}

/// `for init; cond; post { body }`
pub fn for_(
    init: Option<DemoStmt>,
    cond: Option<Expr>,
    post: Option<DemoStmt>,
    body: Vec<DemoStmt>,
) -> DemoStmt {
    Stmt::for_(init, cond, post, block(body))
}

/// `for i := from; i < to; i++ { body }`
pub fn count(i: &str, from: i64, to: Expr, body: Vec<DemoStmt>) -> DemoStmt {
    for_(
        Some(let_(i, int(from))),
        Some(lt(var(i), to)),
        Some(incr(i)),
        body,
    )
}

pub fn switch(tag: Option<Expr>, cases: Vec<Case<Op, Expr>>) -> DemoStmt {
    Stmt::switch(None, tag, cases)
}

pub fn case(exprs: Vec<Expr>, body: Vec<DemoStmt>) -> Case<Op, Expr> {
    Case::new(exprs, body)
}

pub fn default(body: Vec<DemoStmt>) -> Case<Op, Expr> {
    Case::default_arm(body)
}

pub fn break_() -> DemoStmt {
    Stmt::break_()
}

pub fn continue_() -> DemoStmt {
    Stmt::continue_()
}

pub fn ret(value: Option<Expr>) -> DemoStmt {
    Stmt::return_(value)
}
