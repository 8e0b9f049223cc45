//! Demo language machine and analysis

use super::lang::{Expr, Op};
use super::value::{BinOp, Val};
use super::Runtime;
use crate::compiler::analysis::Analysis;
use crate::interpreter::Machine;
use crate::seq::Seq;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::warn;

/// Storage of one function invocation
pub struct DemoMachine {
    runtime: Runtime,
    env: RefCell<HashMap<String, Val>>,
}

impl DemoMachine {
    pub fn new(runtime: Runtime, env: HashMap<String, Val>) -> Self {
        DemoMachine {
            runtime,
            env: RefCell::new(env),
        }
    }

    pub fn get(&self, name: &str) -> Val {
        match self.env.borrow().get(name) {
            Some(v) => v.clone(),
            None => {
                warn!(%name, "read of undefined variable");
                Val::Null
            }
        }
    }

    fn set(&self, name: &str, value: Val) {
        self.env.borrow_mut().insert(name.to_string(), value);
    }
}

impl Machine for DemoMachine {
    type Op = Op;
    type Expr = Expr;
    type Value = Val;

    fn exec(&self, op: &Op) {
        match op {
            Op::Let { name, value } => {
                let value = self.eval(value);
                self.set(name, value);
            }
            Op::Set { name, value } => {
                let value = self.eval(value);
                if !self.env.borrow().contains_key(name) {
                    warn!(%name, "assignment to undeclared variable");
                }
                self.set(name, value);
            }
            Op::Emit { value } => {
                let value = self.eval(value);
                self.runtime.emit(value);
            }
            Op::Panic { message } => panic!("{}", message),
        }
    }

    fn eval(&self, expr: &Expr) -> Val {
        match expr {
            Expr::LitNull => Val::Null,
            Expr::LitBool { v } => Val::Bool(*v),
            Expr::LitInt { v } => Val::Int(*v),
            Expr::LitStr { v } => Val::Str(v.clone()),
            Expr::Var { name } => self.get(name),
            Expr::Bin { op, l, r } => {
                let (l, r) = (self.eval(l), self.eval(r));
                op.apply(&l, &r).unwrap_or_else(|| {
                    warn!(?op, %l, %r, "operator not defined for operands");
                    Val::Null
                })
            }
            Expr::Not { e } => Val::Bool(!self.eval(e).is_truthy()),
            Expr::Call { name, .. } => {
                warn!(%name, "generator call used as a value");
                Val::Null
            }
        }
    }

    fn test(&self, expr: &Expr) -> bool {
        self.eval(expr).is_truthy()
    }

    fn matches(&self, tag: Option<&Val>, case: &Expr) -> bool {
        match tag {
            Some(tag) => BinOp::Eq.apply(tag, &self.eval(case)) == Some(Val::Bool(true)),
            None => self.test(case),
        }
    }

    fn assign(&self, place: &Expr, value: Val) {
        match place {
            Expr::Var { name } => self.set(name, value),
            other => warn!(?other, "sent value dropped: not an assignable place"),
        }
    }

    fn delegate(&self, source: &Expr) -> Seq<Val> {
        match source {
            Expr::Call { name, args } if name == "range" => {
                let bounds: Vec<Option<i64>> = args.iter().map(|a| self.eval(a).as_int()).collect();
                match bounds.as_slice() {
                    [Some(end)] => {
                        let end = *end;
                        Seq::each(move || (0..end).map(Val::Int))
                    }
                    [Some(start), Some(end)] => {
                        let (start, end) = (*start, *end);
                        Seq::each(move || (start..end).map(Val::Int))
                    }
                    _ => {
                        warn!("range expects one or two integers");
                        Seq::normal()
                    }
                }
            }
            Expr::Call { name, args } => {
                let args = args.iter().map(|a| self.eval(a)).collect();
                self.runtime.call(name, args)
            }
            other => {
                warn!(?other, "yield from a value that is not a generator call");
                Seq::normal()
            }
        }
    }
}

/// What the compiler needs to know about demo statements
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAnalysis;

impl Analysis<Op, Expr> for DemoAnalysis {
    fn diverges(&self, op: &Op) -> bool {
        matches!(op, Op::Panic { .. })
    }

    fn declares(&self, op: &Op) -> bool {
        matches!(op, Op::Let { .. })
    }
}
