//! Demo language AST: expressions and opaque statements

use super::value::{BinOp, Val};
use crate::compiler::ast::Stmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Expr {
    LitNull,
    LitBool { v: bool },
    LitInt { v: i64 },
    LitStr { v: String },
    Var { name: String },
    Bin {
        op: BinOp,
        l: Box<Expr>,
        r: Box<Expr>,
    },
    Not { e: Box<Expr> },
    /// Call of a generator function; only meaningful as a `yield from` source
    Call { name: String, args: Vec<Expr> },
}

/// Opaque statement of the demo language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Op {
    /// Declare (or redeclare) a variable
    Let { name: String, value: Expr },
    Set { name: String, value: Expr },
    /// Append a value to the runtime's side-effect log
    Emit { value: Expr },
    /// Abort the whole program with a Rust panic
    Panic { message: String },
}

/// Statement tree of the demo language
pub type DemoStmt = Stmt<Op, Expr>;

/// A generator function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub params: Vec<String>,
    pub body: Vec<DemoStmt>,
}

/// A program: named generator functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub functions: BTreeMap<String, Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(mut self, name: &str, params: &[&str], body: Vec<DemoStmt>) -> Self {
        self.functions.insert(
            name.to_string(),
            Function {
                params: params.iter().map(|p| p.to_string()).collect(),
                body,
            },
        );
        self
    }
}

impl From<Val> for Expr {
    fn from(v: Val) -> Self {
        match v {
            Val::Null => Expr::LitNull,
            Val::Bool(v) => Expr::LitBool { v },
            Val::Int(v) => Expr::LitInt { v },
            Val::Str(v) => Expr::LitStr { v },
        }
    }
}
